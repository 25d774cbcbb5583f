//! Implementation of the #[derive(FromEnv)] proc macro.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse2, parse_quote, DeriveInput};

use crate::attrs;

/// Expand the #[derive(FromEnv)] macro.
///
/// The incoming prefix is extended with the container prefix, then each
/// field is read with its own variable name (leaves) or with the prefix
/// extended by its `env_prefix` (nested structs).
pub fn expand(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let name = &input.ident;
    let generics = attrs::with_trait_bound(&input.generics, &parse_quote!(::layerconf::FromEnv));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let container = attrs::parse_container(&input.attrs)?;
    let fields = attrs::schema_fields(&input)?;

    let own_prefix = container.env_prefix.unwrap_or_default();

    let reads = fields.iter().filter(|f| f.is_active()).map(|f| {
        let member = &f.member;
        let env_name = match &f.attrs.env {
            Some(env) => quote! { ::std::option::Option::Some(#env) },
            None => quote! { ::std::option::Option::None },
        };
        let field_prefix = match &f.attrs.env_prefix {
            Some(p) => quote! { &::std::format!("{}{}", prefix, #p) },
            None => quote! { &prefix },
        };
        quote! {
            ::layerconf::FromEnv::read_env(&mut self.#member, env, #field_prefix, #env_name)?;
        }
    });

    Ok(quote! {
        impl #impl_generics ::layerconf::FromEnv for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn read_env(
                &mut self,
                env: &dyn ::layerconf::EnvSource,
                prefix: &str,
                name: ::std::option::Option<&str>,
            ) -> ::layerconf::Result<()> {
                let prefix = ::std::format!("{}{}", prefix, #own_prefix);
                #(#reads)*
                ::std::result::Result::Ok(())
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    #[test]
    fn test_leaf_env_names() {
        let input = quote! {
            struct Base {
                #[config(env = "A")]
                a: i64,
                c: String,
            }
        };
        let tokens = expand(input).unwrap().to_string();
        assert!(tokens.contains("Some (\"A\")"));
        assert!(tokens.contains("None"));
    }

    #[test]
    fn test_nested_prefix() {
        let input = quote! {
            #[config(env_prefix = "APP_")]
            struct Custom {
                #[config(env_prefix = "BASE_")]
                base: Base,
            }
        };
        let tokens = expand(input).unwrap().to_string();
        assert!(tokens.contains("\"APP_\""));
        assert!(tokens.contains("\"BASE_\""));
    }

    #[test]
    fn test_skipped_field_not_read() {
        let input = quote! {
            struct Base {
                #[config(env = "TOKEN", skip)]
                token: String,
            }
        };
        let tokens = expand(input).unwrap().to_string();
        assert!(!tokens.contains("TOKEN"));
    }

    #[test]
    fn test_unknown_container_attribute() {
        let input = quote! {
            #[config(required)]
            struct Base {
                a: i64,
            }
        };
        assert!(expand(input).is_err());
    }
}
