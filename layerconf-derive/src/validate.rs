//! Implementation of the #[derive(Validate)] proc macro.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse2, parse_quote, DeriveInput};

use crate::attrs;

/// Expand the #[derive(Validate)] macro.
///
/// Each active field is visited with its dotted path and its `required`
/// flag. The flag passed in for the struct itself is ignored: requiredness is
/// a property of leaves.
pub fn expand(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let name = &input.ident;
    let generics = attrs::with_trait_bound(&input.generics, &parse_quote!(::layerconf::Validate));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let fields = attrs::schema_fields(&input)?;

    let visits = fields.iter().filter(|f| f.is_active()).map(|f| {
        let member = &f.member;
        let field_name = &f.name;
        let required = f.attrs.required;
        quote! {
            ::layerconf::Validate::collect_empty(
                &self.#member,
                &::layerconf::validate::join_path(path, #field_name),
                #required,
                out,
            );
        }
    });

    Ok(quote! {
        impl #impl_generics ::layerconf::Validate for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn collect_empty(
                &self,
                path: &str,
                required: bool,
                out: &mut ::std::vec::Vec<::std::string::String>,
            ) {
                #(#visits)*
            }
        }
    })
}
