use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataStruct, Fields, FieldsNamed, FieldsUnnamed, Generics, Ident, Index};

use crate::Direction;

pub fn derive_struct(
	data: DataStruct,
	ident: Ident,
	generics: Generics,
	direction: Direction,
) -> TokenStream {
	let body = match data.fields {
		Fields::Named(fields) => {
			let stmts = get_named_field_stmts(fields, direction);
			quote! {
				__ar.begin_struct()?;
				#(#stmts)*
				__ar.end_struct()
			}
		}
		Fields::Unnamed(fields) => {
			let stmts = get_unnamed_field_stmts(fields, direction);
			quote! {
				__ar.begin_tuple()?;
				#(#stmts)*
				__ar.end_tuple()
			}
		}
		Fields::Unit => quote! {
			__ar.begin_tuple()?;
			__ar.end_tuple()
		},
	};

	let trait_path = direction.trait_path();
	let method_sig = direction.method_sig();
	let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

	quote! {
		#[automatically_derived]
		impl #impl_generics #trait_path for #ident #type_generics #where_clause {
			#method_sig {
				#body
			}
		}
	}
}

fn get_named_field_stmts(fields: FieldsNamed, direction: Direction) -> Vec<TokenStream> {
	fields
		.named
		.iter()
		.filter_map(|field| {
			let field_name = field.ident.as_ref()?;
			let name = field_name.to_string().trim_start_matches("r#").to_string();
			let value = field_ref(quote!(#field_name), direction);
			let stmt = direction.field_stmt(value, field);
			Some(quote! {
				__ar.field(#name)?;
				#stmt
			})
		})
		.collect()
}

fn get_unnamed_field_stmts(fields: FieldsUnnamed, direction: Direction) -> Vec<TokenStream> {
	fields
		.unnamed
		.iter()
		.enumerate()
		.map(|(index, field)| {
			let index = Index::from(index);
			direction.field_stmt(field_ref(quote!(#index), direction), field)
		})
		.collect()
}

fn field_ref(field_name: TokenStream, direction: Direction) -> TokenStream {
	match direction {
		Direction::Serialize => quote!(&self.#field_name),
		Direction::Deserialize => quote!(&mut self.#field_name),
	}
}
