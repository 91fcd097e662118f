use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{
	parse_macro_input, parse_quote, spanned::Spanned, Data, DeriveInput, Field, GenericParam,
	Generics, Meta, MetaList, NestedMeta, Path, Type, WherePredicate,
};

mod structs;
use structs::derive_struct;
mod enums;
use enums::derive_enum;

#[proc_macro_derive(Serialize, attributes(ser_with))]
pub fn serialize(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	derive(input, Direction::Serialize).into()
}

#[proc_macro_derive(Deserialize, attributes(ser_with))]
pub fn deserialize(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	derive(input, Direction::Deserialize).into()
}

/// Which trait is being derived.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
	Serialize,
	Deserialize,
}

impl Direction {
	/// Path of trait being implemented.
	pub(crate) fn trait_path(self) -> TokenStream {
		match self {
			Direction::Serialize => quote!(::ser_archive::Serialize),
			Direction::Deserialize => quote!(::ser_archive::Deserialize),
		}
	}

	/// Signature of the trait's method.
	pub(crate) fn method_sig(self) -> TokenStream {
		match self {
			Direction::Serialize => quote! {
				fn serialize<__A: ::ser_archive::OArchive>(&self, __ar: &mut __A) -> ::ser_archive::Result<()>
			},
			Direction::Deserialize => quote! {
				fn deserialize<__A: ::ser_archive::IArchive>(&mut self, __ar: &mut __A) -> ::ser_archive::Result<()>
			},
		}
	}

	/// Statement processing one field. `value` is an expression of type `&T`
	/// (serialize) or `&mut T` (deserialize).
	pub(crate) fn field_stmt(self, value: TokenStream, field: &Field) -> TokenStream {
		match (self, get_with(field)) {
			(Direction::Serialize, Some(with)) => quote_spanned! {field.span()=>
				<#with as ::ser_archive::SerializeWith<_>>::serialize_with(#value, __ar)?;
			},
			(Direction::Deserialize, Some(with)) => quote_spanned! {field.span()=>
				<#with as ::ser_archive::SerializeWith<_>>::deserialize_with(#value, __ar)?;
			},
			(Direction::Serialize, None) => quote_spanned! {field.span()=>
				::ser_archive::Serialize::serialize(#value, __ar)?;
			},
			(Direction::Deserialize, None) => quote_spanned! {field.span()=>
				::ser_archive::Deserialize::deserialize(#value, __ar)?;
			},
		}
	}
}

fn derive(input: DeriveInput, direction: Direction) -> TokenStream {
	let generics = add_trait_bounds(input.generics, direction);

	match input.data {
		Data::Struct(data) => derive_struct(data, input.ident, generics, direction),
		Data::Enum(data) => derive_enum(data, input.ident, generics, direction),
		Data::Union(_) => panic!("Deriving `Serialize` / `Deserialize` on unions is not supported"),
	}
}

/// Add `T: Serialize` (or `T: Deserialize`) bound for every type param.
fn add_trait_bounds(mut generics: Generics, direction: Direction) -> Generics {
	let trait_path = direction.trait_path();
	for param in &mut generics.params {
		if let GenericParam::Type(type_param) = param {
			type_param.bounds.push(parse_quote!(#trait_path));
		}
	}
	generics
}

/// Add `Ty: Default` predicates for field types which mention a type param.
/// Other field types either implement `Default` or fail with a clear error at
/// the construction site.
pub(crate) fn add_default_bounds<'a>(
	generics: &mut Generics,
	types: impl Iterator<Item = &'a Type>,
) {
	let params = generics
		.type_params()
		.map(|param| param.ident.to_string())
		.collect::<Vec<_>>();
	if params.is_empty() {
		return;
	}

	let predicates = types
		.filter(|ty| mentions_any(quote!(#ty), &params))
		.map(|ty| -> WherePredicate { parse_quote!(#ty: ::core::default::Default) })
		.collect::<Vec<_>>();
	generics.make_where_clause().predicates.extend(predicates);
}

fn mentions_any(tokens: TokenStream, idents: &[String]) -> bool {
	tokens.into_iter().any(|token| match token {
		proc_macro2::TokenTree::Ident(ident) => idents.iter().any(|name| ident == name),
		proc_macro2::TokenTree::Group(group) => mentions_any(group.stream(), idents),
		_ => false,
	})
}

/// Get path from `#[ser_with(Path)]` attribute, if field has one.
fn get_with(field: &Field) -> Option<Path> {
	let attrs = field
		.attrs
		.iter()
		.filter(|attr| attr.path.is_ident("ser_with"))
		.map(|attr| attr.parse_meta())
		.collect::<Vec<_>>();

	if attrs.is_empty() {
		return None;
	}

	if attrs.len() != 1 {
		panic!("Cannot have more than 1 `#[ser_with]` attribute on a field");
	}

	if let Some(Ok(Meta::List(MetaList { nested, .. }))) = attrs.into_iter().next() {
		let mut parts = nested.into_iter();
		if let (Some(NestedMeta::Meta(Meta::Path(with))), None) = (parts.next(), parts.next()) {
			return Some(with);
		}
	}
	panic!("`#[ser_with]` needs a path e.g. `#[ser_with(ForeignTypeProxy)]`");
}
