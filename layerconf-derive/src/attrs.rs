//! Parsing of `#[config(...)]` attributes shared by all derives.

use syn::ext::IdentExt;
use syn::{
    parse_quote, Attribute, Data, DeriveInput, Fields, GenericParam, Generics, Index, LitBool,
    LitStr, Member, Path, Token,
};

/// Attributes placed on the schema struct itself.
#[derive(Debug, Default)]
pub struct ContainerAttrs {
    /// Prefix prepended to every environment variable of the struct.
    pub env_prefix: Option<String>,
}

/// Attributes placed on a single field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    pub required: bool,
    pub env: Option<String>,
    pub env_prefix: Option<String>,
    pub skip: bool,
}

/// A struct field together with its parsed attributes.
#[derive(Debug)]
pub struct SchemaField {
    /// How to access the field (`self.name` or `self.0`).
    pub member: Member,
    /// Name used in dotted validation paths.
    pub name: String,
    pub attrs: FieldAttrs,
}

impl SchemaField {
    /// Fields that take part in merging, validation and environment reading.
    pub fn is_active(&self) -> bool {
        !self.attrs.skip
    }
}

pub fn parse_container(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut out = ContainerAttrs::default();
    for attr in attrs {
        if !attr.path().is_ident("config") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("env_prefix") {
                let value: LitStr = meta.value()?.parse()?;
                out.env_prefix = Some(value.value());
            } else {
                return Err(meta.error("unknown config container attribute"));
            }
            Ok(())
        })?;
    }
    Ok(out)
}

fn parse_field(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for attr in attrs {
        if !attr.path().is_ident("config") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("required") {
                out.required = if meta.input.peek(Token![=]) {
                    let value: LitBool = meta.value()?.parse()?;
                    value.value
                } else {
                    true
                };
            } else if meta.path.is_ident("env") {
                let value: LitStr = meta.value()?.parse()?;
                if value.value().is_empty() {
                    return Err(meta.error("env name cannot be empty"));
                }
                out.env = Some(value.value());
            } else if meta.path.is_ident("env_prefix") {
                let value: LitStr = meta.value()?.parse()?;
                out.env_prefix = Some(value.value());
            } else if meta.path.is_ident("skip") {
                out.skip = true;
            } else {
                return Err(meta.error("unknown config attribute"));
            }
            Ok(())
        })?;
    }
    Ok(out)
}

/// Copy of `generics` with `bound` added to every type parameter.
///
/// Fields of a generic type are merged, validated and read through the same
/// trait, so `T` must implement it for the generated impl to hold.
pub fn with_trait_bound(generics: &Generics, bound: &Path) -> Generics {
    let mut generics = generics.clone();
    for param in &mut generics.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(#bound));
        }
    }
    generics
}

/// Collect the fields of a struct, in declaration order.
///
/// Enums and unions are rejected: a schema is always a struct.
pub fn schema_fields(input: &DeriveInput) -> syn::Result<Vec<SchemaField>> {
    let data = match &input.data {
        Data::Struct(data) => data,
        Data::Enum(data) => {
            return Err(syn::Error::new_spanned(
                data.enum_token,
                "config schemas must be structs; use `layerconf::leaf!` for enum leaves",
            ))
        }
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "config schemas must be structs",
            ))
        }
    };

    let mut fields = Vec::new();
    match &data.fields {
        Fields::Named(named) => {
            for field in &named.named {
                let Some(ident) = field.ident.as_ref() else {
                    continue;
                };
                fields.push(SchemaField {
                    member: Member::Named(ident.clone()),
                    name: ident.unraw().to_string(),
                    attrs: parse_field(&field.attrs)?,
                });
            }
        }
        Fields::Unnamed(unnamed) => {
            for (i, field) in unnamed.unnamed.iter().enumerate() {
                fields.push(SchemaField {
                    member: Member::Unnamed(Index::from(i)),
                    name: i.to_string(),
                    attrs: parse_field(&field.attrs)?,
                });
            }
        }
        Fields::Unit => {}
    }
    Ok(fields)
}
