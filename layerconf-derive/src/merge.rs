//! Implementation of the #[derive(Merge)] proc macro.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse2, parse_quote, DeriveInput};

use crate::attrs;

/// Expand the #[derive(Merge)] macro.
///
/// Generates one `merge_from` call per active field, in declaration order.
/// Source and destination share the same type, so fields are paired by
/// identifier rather than looked up by name at runtime.
pub fn expand(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let name = &input.ident;
    let generics = attrs::with_trait_bound(&input.generics, &parse_quote!(::layerconf::Merge));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let fields = attrs::schema_fields(&input)?;

    let merges = fields.iter().filter(|f| f.is_active()).map(|f| {
        let member = &f.member;
        quote! {
            ::layerconf::Merge::merge_from(&mut self.#member, &other.#member);
        }
    });

    Ok(quote! {
        impl #impl_generics ::layerconf::Merge for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn merge_from(&mut self, other: &Self) {
                #(#merges)*
            }
        }
    })
}
