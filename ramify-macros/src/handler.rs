//! Handler-related macros.
//!
//! This module contains:
//! - `#[handler]` - Attribute macro for creating Handler implementations with a
//!   declared parameter signature

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Expr, FnArg, Ident, ItemFn, LitStr, Pat, ReturnType, Token,
    parse::{Parse, ParseStream},
    parse_macro_input,
};

/// Arguments for the `#[handler]` macro.
pub(crate) struct HandlerArgs {
    pub name: Option<String>,
    pub defaults: Vec<(Ident, Expr)>,
}

impl Parse for HandlerArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut name = None;
        let mut defaults = Vec::new();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;

            match ident.to_string().as_str() {
                "name" => {
                    input.parse::<Token![=]>()?;
                    let lit: LitStr = input.parse()?;
                    name = Some(lit.value());
                }
                "default" => {
                    let content;
                    syn::parenthesized!(content in input);
                    while !content.is_empty() {
                        let key: Ident = content.parse()?;
                        content.parse::<Token![=]>()?;
                        let value: Expr = content.parse()?;
                        defaults.push((key, value));
                        if content.peek(Token![,]) {
                            content.parse::<Token![,]>()?;
                        }
                    }
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(HandlerArgs { name, defaults })
    }
}

/// Implementation of the `#[handler]` macro.
pub fn handler_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as HandlerArgs);
    let input = parse_macro_input!(item as ItemFn);

    match expand(args, input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(args: HandlerArgs, input: ItemFn) -> syn::Result<TokenStream2> {
    let sig = &input.sig;
    let fn_name = &sig.ident;
    let fn_vis = &input.vis;
    let fn_block = &input.block;

    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "Handler function must be synchronous",
        ));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "Handler function cannot be generic",
        ));
    }

    let struct_name = match &args.name {
        Some(custom_name) => Ident::new(custom_name, fn_name.span()),
        None => fn_name.clone(),
    };

    let docs: Vec<_> = input
        .attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .collect();

    let mut names = Vec::new();
    let mut specs = Vec::new();
    let mut bindings = Vec::new();

    for (index, arg) in sig.inputs.iter().enumerate() {
        let FnArg::Typed(pat_type) = arg else {
            return Err(syn::Error::new_spanned(
                arg,
                "Handler function cannot take `self`; use `method_handler` for bound methods",
            ));
        };
        let Pat::Ident(pat_ident) = &*pat_type.pat else {
            return Err(syn::Error::new_spanned(
                &pat_type.pat,
                "Handler parameters must be plain identifiers",
            ));
        };

        let raw = pat_ident.ident.to_string();
        let name = raw.strip_prefix("r#").unwrap_or(&raw).to_owned();
        let pat = &pat_type.pat;
        let ty = &pat_type.ty;

        match args.defaults.iter().find(|(key, _)| *key == name) {
            Some((_, expr)) => specs.push(quote! {
                .optional(#name, ::ramify::Value::from(#expr))
            }),
            None => specs.push(quote! { .param(#name) }),
        }
        bindings.push(quote! {
            let #pat: #ty = __args.take::<#ty>(#index)?;
        });
        names.push(name);
    }

    if let Some((key, _)) = args
        .defaults
        .iter()
        .find(|(key, _)| !names.iter().any(|n| key == n))
    {
        return Err(syn::Error::new(
            key.span(),
            format!("`{}` is not a parameter of `{}`", key, fn_name),
        ));
    }

    let output = match &sig.output {
        ReturnType::Default => quote! { () },
        ReturnType::Type(_, ty) => quote! { #ty },
    };

    Ok(quote! {
        #(#docs)*
        #[allow(non_camel_case_types)]
        #[derive(Clone, Copy, Debug, Default)]
        #fn_vis struct #struct_name;

        impl ::ramify::Handler for #struct_name {
            fn signature(&self) -> &::ramify::Signature {
                static SIGNATURE: ::std::sync::OnceLock<::ramify::Signature> =
                    ::std::sync::OnceLock::new();
                SIGNATURE.get_or_init(|| ::ramify::Signature::new() #(#specs)*)
            }

            #[allow(unused_mut, unused_variables, clippy::redundant_closure_call)]
            fn invoke(
                &self,
                mut __args: ::ramify::Args,
            ) -> ::core::result::Result<::ramify::Value, ::ramify::HandlerError> {
                #(#bindings)*
                let __output = (move || -> #output #fn_block)();
                ::ramify::IntoResponse::into_response(__output)
            }
        }
    })
}
