use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, LitInt, LitStr};

/// Implements `envelope::AsEnvelope`.
///
/// `#[envelope(code = 201, message = "created")]` on the type overrides the
/// success code and message; either key may be omitted.
#[proc_macro_derive(AsEnvelope, attributes(envelope))]
pub fn derive_as_envelope(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut code: Option<LitInt> = None;
    let mut message: Option<LitStr> = None;

    for attr in input.attrs.iter().filter(|a| a.path().is_ident("envelope")) {
        let parsed = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("code") {
                code = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("message") {
                message = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `code` or `message`"))
            }
        });
        if let Err(err) = parsed {
            return err.to_compile_error().into();
        }
    }

    let body = if code.is_none() && message.is_none() {
        quote! { ::envelope::Envelope::success(self) }
    } else {
        let code = match code {
            Some(lit) => quote! { #lit },
            None => quote! { ::envelope::ResponseCode::Success.code() },
        };
        let message = match message {
            Some(lit) => quote! { #lit },
            None => quote! { ::envelope::ResponseCode::Success.message() },
        };
        quote! { ::envelope::Envelope::success_with(#code, #message, ::core::option::Option::Some(self)) }
    };

    let expanded = quote! {
        impl #impl_generics ::envelope::AsEnvelope for #name #ty_generics #where_clause {
            fn into_envelope(self) -> ::envelope::Envelope<Self> {
                #body
            }
        }
    };

    TokenStream::from(expanded)
}
