use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{DataEnum, Field, Fields, Generics, Ident};

use crate::{add_default_bounds, Direction};

/// Enums are written as a tuple: variant index (`u32`), then variant's fields.
pub fn derive_enum(
	data: DataEnum,
	ident: Ident,
	mut generics: Generics,
	direction: Direction,
) -> TokenStream {
	let body = match direction {
		Direction::Serialize => {
			let arms = data
				.variants
				.iter()
				.enumerate()
				.map(|(index, variant)| get_serialize_arm(index as u32, &variant.ident, &variant.fields))
				.collect::<Vec<_>>();

			if arms.is_empty() {
				quote! { match *self {} }
			} else {
				quote! {
					match self {
						#(#arms)*
					}
				}
			}
		}
		Direction::Deserialize => {
			add_default_bounds(
				&mut generics,
				data.variants.iter().flat_map(|variant| variant.fields.iter().map(|field| &field.ty)),
			);

			let arms = data
				.variants
				.iter()
				.enumerate()
				.map(|(index, variant)| get_deserialize_arm(index as u32, &variant.ident, &variant.fields))
				.collect::<Vec<_>>();

			quote! {
				__ar.begin_tuple()?;
				let __index: u32 = __ar.read_primitive()?;
				match __index {
					#(#arms)*
					_ => return ::core::result::Result::Err(
						::ser_archive::Error::UnknownVariant { index: __index }
					),
				}
				__ar.end_tuple()
			}
		}
	};

	let trait_path = direction.trait_path();
	let method_sig = direction.method_sig();
	let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

	quote! {
		#[automatically_derived]
		impl #impl_generics #trait_path for #ident #type_generics #where_clause {
			#[allow(unreachable_code)]
			#method_sig {
				#body
			}
		}
	}
}

fn get_serialize_arm(index: u32, ident: &Ident, fields: &Fields) -> TokenStream {
	let aliases = get_aliases(fields);
	let pattern = get_pattern(ident, fields, &aliases);
	let stmts = fields
		.iter()
		.zip(&aliases)
		.map(|(field, alias)| Direction::Serialize.field_stmt(quote!(#alias), field));

	quote_spanned! {ident.span()=>
		#pattern => {
			__ar.begin_tuple()?;
			__ar.write_primitive(#index)?;
			#(#stmts)*
			__ar.end_tuple()
		}
	}
}

/// Load fields into defaulted temporaries, then replace `self`.
fn get_deserialize_arm(index: u32, ident: &Ident, fields: &Fields) -> TokenStream {
	let aliases = get_aliases(fields);
	let pattern = get_pattern(ident, fields, &aliases);
	let lets = fields.iter().zip(&aliases).map(|(field, alias)| {
		let ty = &field.ty;
		let stmt = Direction::Deserialize.field_stmt(quote!(&mut #alias), field);
		quote! {
			let mut #alias: #ty = ::core::default::Default::default();
			#stmt
		}
	});

	quote_spanned! {ident.span()=>
		#index => {
			#(#lets)*
			*self = #pattern;
		}
	}
}

/// Local names for variant's fields.
// Aliases are required in case of a field called `__ar`.
// `Self::Foo {x: val_x}` instead of just `Self::Foo {x}`.
fn get_aliases(fields: &Fields) -> Vec<Ident> {
	fields
		.iter()
		.enumerate()
		.map(|(index, field)| alias_for(index, field))
		.collect()
}

fn alias_for(index: usize, field: &Field) -> Ident {
	match &field.ident {
		Some(ident) => Ident::new(
			&format!("val_{}", ident.to_string().trim_start_matches("r#")),
			ident.span(),
		),
		None => Ident::new(&format!("val_{}", index), proc_macro2::Span::call_site()),
	}
}

/// `Self::Foo`, `Self::Foo(val_0, val_1)` or `Self::Foo { x: val_x }`.
/// Used as a match pattern, and as a constructor.
fn get_pattern(ident: &Ident, fields: &Fields, aliases: &[Ident]) -> TokenStream {
	match fields {
		Fields::Unit => quote!(Self::#ident),
		Fields::Unnamed(_) => quote!(Self::#ident(#(#aliases),*)),
		Fields::Named(named) => {
			let names = named.named.iter().filter_map(|field| field.ident.as_ref());
			quote!(Self::#ident { #(#names: #aliases),* })
		}
	}
}
