use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, AttributeArgs, DataEnum, DeriveInput};

/// Appends the variants of `right` to the enum `left`.
fn merge_variants(metadata: TokenStream, left: TokenStream, right: TokenStream) -> TokenStream {
    use syn::Data::Enum;

    let args = parse_macro_input!(metadata as AttributeArgs);
    if let Some(first_arg) = args.first() {
        return syn::Error::new_spanned(first_arg, "macro takes no arguments")
            .to_compile_error()
            .into();
    }

    let mut left: DeriveInput = parse_macro_input!(left);
    let right: DeriveInput = parse_macro_input!(right);

    match (&mut left.data, right.data) {
        (
            Enum(DataEnum { variants, .. }),
            Enum(DataEnum {
                variants: to_add, ..
            }),
        ) => {
            variants.extend(to_add);
            quote! { #left }.into()
        }
        _ => syn::Error::new(left.ident.span(), "variants may only be added for enums")
            .to_compile_error()
            .into(),
    }
}

/// Adds the `Tick {}` execute variant every pipeline stage answers to.
#[proc_macro_attribute]
pub fn clocked(metadata: TokenStream, input: TokenStream) -> TokenStream {
    merge_variants(
        metadata,
        input,
        quote!(
            enum Clocked {
                /// Attempts a single state advance. Stages re-check their
                /// preconditions on every tick and no-op when unmet.
                Tick {},
            }
        )
        .into(),
    )
}

#[proc_macro_attribute]
pub fn covenant_deposit_address(metadata: TokenStream, input: TokenStream) -> TokenStream {
    merge_variants(
        metadata,
        input,
        quote!(
            enum Deposit {
                /// Address this stage expects to be funded on. `None` while
                /// the stage is not ready to receive funds.
                #[returns(Option<String>)]
                DepositAddress {},
            }
        )
        .into(),
    )
}

#[proc_macro_attribute]
pub fn covenant_clock_address(metadata: TokenStream, input: TokenStream) -> TokenStream {
    merge_variants(
        metadata,
        input,
        quote!(
            enum Clock {
                /// Clock address authorized to tick this stage
                #[returns(Addr)]
                ClockAddress {},
            }
        )
        .into(),
    )
}

#[proc_macro_attribute]
pub fn covenant_remote_chain(metadata: TokenStream, input: TokenStream) -> TokenStream {
    merge_variants(
        metadata,
        input,
        quote!(
            enum RemoteChain {
                #[returns(RemoteChainInfo)]
                RemoteChainInfo {},
            }
        )
        .into(),
    )
}

#[proc_macro_attribute]
pub fn covenant_ica_address(metadata: TokenStream, input: TokenStream) -> TokenStream {
    merge_variants(
        metadata,
        input,
        quote!(
            enum Ica {
                /// Interchain account owned by this stage, once confirmed
                #[returns(Option<String>)]
                IcaAddress {},
            }
        )
        .into(),
    )
}

#[proc_macro_attribute]
pub fn covenant_holder_address(metadata: TokenStream, input: TokenStream) -> TokenStream {
    merge_variants(
        metadata,
        input,
        quote!(
            enum Holder {
                #[returns(Addr)]
                HolderAddress {},
            }
        )
        .into(),
    )
}
