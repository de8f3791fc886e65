//! Record derive macro implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, Result, Type};

struct MappedField {
    ident: syn::Ident,
    ty: Type,
    tag: String,
}

impl MappedField {
    /// Whether the mapping tag carries the `pk` modifier (and is not an
    /// excluded `-` column).
    fn is_primary_key(&self) -> bool {
        let mut parts = self.tag.split(',');
        if parts.next() == Some("-") {
            return false;
        }
        parts.any(|m| m == "pk")
    }
}

enum FieldKind {
    Pointer,
    Numeric,
    Other,
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Record can only be derived for structs",
            ));
        }
    };

    let mut mapped: Vec<MappedField> = Vec::new();
    for field in fields.iter() {
        let Some(tag) = col_tag(field)? else {
            // Fields without #[col] are not mapped.
            continue;
        };
        mapped.push(MappedField {
            ident: field.ident.clone().expect("named field"),
            ty: field.ty.clone(),
            tag,
        });
    }

    if mapped.is_empty() {
        return Err(syn::Error::new_spanned(
            &input,
            "Record requires at least one field with a #[col(\"…\")] attribute",
        ));
    }

    let tag_entries = mapped.iter().map(|f| {
        let field_name = f.ident.to_string();
        let tag = &f.tag;
        let kind = match field_kind(&f.ty) {
            FieldKind::Pointer => quote! { sqlgen::FieldKind::Pointer },
            FieldKind::Numeric => quote! { sqlgen::FieldKind::Numeric },
            FieldKind::Other => quote! { sqlgen::FieldKind::Other },
        };
        quote! {
            sqlgen::FieldTag { name: #field_name, tag: #tag, kind: #kind }
        }
    });

    let reads = mapped.iter().map(|f| {
        let ident = &f.ident;
        quote! { sqlgen::Value::from(self.#ident.clone()) }
    });

    let key_method = take_generated_key_method(&mapped);

    Ok(quote! {
        impl #impl_generics sqlgen::Record for #name #ty_generics #where_clause {
            fn fields() -> &'static [sqlgen::FieldTag] {
                const FIELDS: &[sqlgen::FieldTag] = &[
                    #(#tag_entries),*
                ];
                FIELDS
            }

            fn read_values(&self) -> ::std::vec::Vec<sqlgen::Value> {
                ::std::vec![
                    #(#reads),*
                ]
            }

            #key_method
        }
    })
}

/// Override `take_generated_key` when the struct declares exactly one `pk`
/// field of an integer type; otherwise fall back to the trait's no-op.
fn take_generated_key_method(mapped: &[MappedField]) -> TokenStream {
    let mut pks = mapped.iter().filter(|f| f.is_primary_key());
    let Some(pk) = pks.next() else {
        return quote! {};
    };
    if pks.next().is_some() {
        return quote! {};
    }

    let ident = &pk.ident;
    if let Some(inner) = option_inner(&pk.ty) {
        if is_integer(inner) {
            return quote! {
                fn take_generated_key(&mut self, key: i64) {
                    self.#ident = ::std::option::Option::Some(key as #inner);
                }
            };
        }
        return quote! {};
    }
    if is_integer(&pk.ty) {
        let ty = &pk.ty;
        return quote! {
            fn take_generated_key(&mut self, key: i64) {
                self.#ident = key as #ty;
            }
        };
    }
    quote! {}
}

/// Extract the tag string from a field's `#[col("…")]` attribute.
fn col_tag(field: &syn::Field) -> Result<Option<String>> {
    for attr in &field.attrs {
        if !attr.path().is_ident("col") {
            continue;
        }
        let lit: LitStr = attr.parse_args()?;
        return Ok(Some(lit.value()));
    }
    Ok(None)
}

fn field_kind(ty: &Type) -> FieldKind {
    if option_inner(ty).is_some() {
        return FieldKind::Pointer;
    }
    if is_numeric(ty) {
        FieldKind::Numeric
    } else {
        FieldKind::Other
    }
}

/// For `Option<T>`, returns `T`.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(tp) = ty else {
        return None;
    };
    let seg = tp.path.segments.last()?;
    if seg.ident != "Option" {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &seg.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        syn::GenericArgument::Type(t) => Some(t),
        _ => None,
    })
}

fn type_ident_is(ty: &Type, names: &[&str]) -> bool {
    let Type::Path(tp) = ty else {
        return false;
    };
    tp.path
        .get_ident()
        .is_some_and(|ident| names.iter().any(|n| ident == n))
}

fn is_integer(ty: &Type) -> bool {
    type_ident_is(
        ty,
        &["i8", "i16", "i32", "i64", "isize", "u8", "u16", "u32", "u64", "usize"],
    )
}

fn is_numeric(ty: &Type) -> bool {
    is_integer(ty) || type_ident_is(ty, &["f32", "f64"])
}
