// Copyright (C) 2022-present The NetGauze Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or
// implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, DataEnum, DeriveInput, Field, Variant};

/// Every `(variant, field, attribute)` in the enum where the field carries an
/// attribute called `name`
fn tagged_fields<'e>(
    en: &'e DataEnum,
    name: &'e str,
) -> impl Iterator<Item = (&'e Variant, &'e Field, &'e syn::Attribute)> + 'e {
    en.variants.iter().flat_map(move |variant| {
        variant.fields.iter().flat_map(move |field| {
            field
                .attrs
                .iter()
                .filter(move |attr| attr.path().is_ident(name))
                .map(move |attr| (variant, field, attr))
        })
    })
}

fn field_type_path(field: &Field) -> syn::Result<&syn::Path> {
    match &field.ty {
        syn::Type::Path(type_path) => Ok(&type_path.path),
        other => Err(syn::Error::new(
            other.span(),
            "Expected a named type for this field",
        )),
    }
}

fn enum_data(input: &DeriveInput) -> syn::Result<&DataEnum> {
    match &input.data {
        syn::Data::Enum(en) => Ok(en),
        _ => Err(syn::Error::new(
            input.span(),
            "Only error enums can be derived",
        )),
    }
}

/// Read the `module = "..."` argument of `#[from_located(..)]`
fn located_module(attr: &syn::Attribute) -> syn::Result<String> {
    let mut module = None;
    if matches!(attr.meta, syn::Meta::List(_)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("module") {
                let value: syn::LitStr = meta.value()?.parse()?;
                module = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("Only `module` is accepted by `from_located`"))
            }
        })?;
    }
    module.ok_or_else(|| {
        syn::Error::new(
            attr.span(),
            "`from_located` needs the module of the located error: #[from_located(module = \"...\")]",
        )
    })
}

/// Path of `Located{Inner}` for a field of type `Inner` (or `a::b::Inner`)
/// living in `module`
fn located_type_path(module: &str, inner: &syn::Path) -> syn::Result<TokenStream> {
    let last = inner
        .segments
        .last()
        .ok_or_else(|| syn::Error::new(inner.span(), "Empty type path"))?;
    let located = format_ident!("Located{}", last.ident);
    let mut segments: Vec<syn::Ident> = module
        .split("::")
        .filter(|part| !part.is_empty())
        .map(|part| syn::Ident::new(part, inner.span()))
        .collect();
    segments.extend(
        inner
            .segments
            .iter()
            .take(inner.segments.len() - 1)
            .map(|seg| seg.ident.clone()),
    );
    Ok(quote! { #(#segments::)* #located })
}

fn derive_located_error(input: &DeriveInput) -> syn::Result<TokenStream> {
    let en = enum_data(input)?;
    let ident = &input.ident;
    let located = format_ident!("Located{}", ident);

    let mut output = quote! {
        #[derive(PartialEq, Eq, Clone, Debug)]
        #[automatically_derived]
        pub struct #located<'a> {
            span: bgp4_parse_utils::Span<'a>,
            error: #ident,
        }

        #[automatically_derived]
        impl<'a> #located<'a> {
            pub const fn new(span: bgp4_parse_utils::Span<'a>, error: #ident) -> Self {
                Self { span, error }
            }
        }

        #[automatically_derived]
        impl<'a> From<#located<'a>> for (bgp4_parse_utils::Span<'a>, #ident) {
            fn from(input: #located<'a>) -> Self {
                (input.span, input.error)
            }
        }

        #[automatically_derived]
        impl<'a> bgp4_parse_utils::LocatedParsingError for #located<'a> {
            type Span = bgp4_parse_utils::Span<'a>;
            type Error = #ident;

            fn span(&self) -> &Self::Span {
                &self.span
            }

            fn error(&self) -> &Self::Error {
                &self.error
            }
        }

        #[automatically_derived]
        impl<'a> nom::error::FromExternalError<bgp4_parse_utils::Span<'a>, #ident> for #located<'a> {
            fn from_external_error(
                input: bgp4_parse_utils::Span<'a>,
                _kind: nom::error::ErrorKind,
                error: #ident,
            ) -> Self {
                #located::new(input, error)
            }
        }
    };

    let from_nom: Vec<_> = tagged_fields(en, "from_nom").collect();
    if let Some((_, _, extra)) = from_nom.get(1) {
        return Err(syn::Error::new(
            extra.span(),
            "Only one variant can be marked with `from_nom`",
        ));
    }
    if let Some((variant, _, _)) = from_nom.first() {
        let variant = &variant.ident;
        output.extend(quote! {
            #[automatically_derived]
            impl<'a> nom::error::ParseError<bgp4_parse_utils::Span<'a>> for #located<'a> {
                fn from_error_kind(input: bgp4_parse_utils::Span<'a>, kind: nom::error::ErrorKind) -> Self {
                    #located::new(input, #ident::#variant(kind))
                }

                fn append(_input: bgp4_parse_utils::Span<'a>, _kind: nom::error::ErrorKind, other: Self) -> Self {
                    other
                }
            }
        });
    }

    for (variant, field, _) in tagged_fields(en, "from_external") {
        let variant = &variant.ident;
        let external = field_type_path(field)?;
        output.extend(quote! {
            #[automatically_derived]
            impl<'a> nom::error::FromExternalError<bgp4_parse_utils::Span<'a>, #external> for #located<'a> {
                fn from_external_error(
                    input: bgp4_parse_utils::Span<'a>,
                    _kind: nom::error::ErrorKind,
                    error: #external,
                ) -> Self {
                    #located::new(input, #ident::#variant(error))
                }
            }
        });
    }

    for (variant, field, attr) in tagged_fields(en, "from_located") {
        let variant = &variant.ident;
        let module = located_module(attr)?;
        let child = located_type_path(&module, field_type_path(field)?)?;
        output.extend(quote! {
            #[automatically_derived]
            impl<'a> From<#child<'a>> for #located<'a> {
                fn from(input: #child<'a>) -> Self {
                    let (span, error) = input.into();
                    #located::new(span, #ident::#variant(error))
                }
            }
        });
    }
    Ok(output)
}

/// Derive `Located{Name}` for an error enum `{Name}`: a struct pairing the
/// error with the `bgp4_parse_utils::Span` where parsing failed.
///
/// Field attributes on the enum variants control the generated conversions:
///
/// - `#[from_nom]` on a `nom::error::ErrorKind` field implements
///   `nom::error::ParseError`, so plain nom combinators can be used. At most
///   one variant may carry it.
/// - `#[from_external]` implements `nom::error::FromExternalError` for the
///   field type, typically the `Undefined*` error of an IANA registry
///   conversion used with `map_res`.
/// - `#[from_located(module = "...")]` implements [`From`] for the located
///   error of a nested parser, so `?` lifts it while keeping its span.
///
/// ```no_compile
/// use bgp4_serde_macros::LocatedError;
///
/// #[derive(LocatedError, PartialEq, Eq, Clone, Debug)]
/// pub enum BgpOpenMessageParsingError {
///     NomError(#[from_nom] nom::error::ErrorKind),
///     UnsupportedVersionNumber(u8),
///     ParameterError(#[from_located(module = "self")] BgpParameterParsingError),
/// }
///
/// #[derive(LocatedError, PartialEq, Eq, Clone, Debug)]
/// pub enum BgpParameterParsingError {
///     NomError(#[from_nom] nom::error::ErrorKind),
///     UndefinedParameterType(#[from_external] UndefinedBgpOpenMessageParameterType),
/// }
/// ```
#[proc_macro_derive(LocatedError, attributes(from_nom, from_external, from_located))]
pub fn located_error(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let ast = syn::parse_macro_input!(input as DeriveInput);
    derive_located_error(&ast)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn derive_writing_error(input: &DeriveInput) -> syn::Result<TokenStream> {
    let en = enum_data(input)?;
    let ident = &input.ident;
    let mut output = TokenStream::new();

    for (variant, _, _) in tagged_fields(en, "from_std_io_error") {
        let variant = &variant.ident;
        output.extend(quote! {
            #[automatically_derived]
            impl From<std::io::Error> for #ident {
                fn from(err: std::io::Error) -> Self {
                    #ident::#variant(err.to_string())
                }
            }
        });
    }

    for (variant, field, _) in tagged_fields(en, "from") {
        let variant = &variant.ident;
        let inner = field_type_path(field)?;
        output.extend(quote! {
            #[automatically_derived]
            impl From<#inner> for #ident {
                fn from(err: #inner) -> Self {
                    #ident::#variant(err)
                }
            }
        });
    }
    Ok(output)
}

/// Derive [`From`] conversions for a serializer error enum.
///
/// - `#[from_std_io_error]` on a `String` field converts [`std::io::Error`]
///   into that variant, keeping the error's text so the enum stays `Eq` and
///   `Clone`.
/// - `#[from]` converts the field type into that variant, used to nest the
///   writing errors of inner PDUs.
///
/// ```no_compile
/// use bgp4_serde_macros::WritingError;
///
/// #[derive(WritingError, PartialEq, Eq, Clone, Debug)]
/// pub enum BgpMessageWritingError {
///     StdIOError(#[from_std_io_error] String),
///     OpenError(#[from] BgpOpenMessageWritingError),
/// }
/// ```
#[proc_macro_derive(WritingError, attributes(from_std_io_error, from))]
pub fn writing_error(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let ast = syn::parse_macro_input!(input as DeriveInput);
    derive_writing_error(&ast)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
