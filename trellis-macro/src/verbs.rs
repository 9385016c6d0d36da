use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote_spanned;
use syn::spanned::Spanned;

/// Verb attributes have no expansion of their own: `#[routes]` consumes
/// them while scanning the impl block, before they would ever run. Reaching
/// this code means the attribute sits on an item outside a `#[routes]` impl
/// block, where it would silently register nothing, so it is rejected.
pub fn verb_impl(attr: TokenStream, item: TokenStream, verb: &str) -> TokenStream {
    expand(attr.into(), item.into(), verb).into()
}

fn expand(_attr: TokenStream2, item: TokenStream2, verb: &str) -> TokenStream2 {
    let message = format!(
        "#[{}] must be applied to a method inside a #[routes] impl block",
        verb.to_lowercase()
    );
    let span = item.span();
    let mut expanded = quote_spanned! {span=>
        compile_error!(#message);
    };
    // Re-emit the item so the error above stays the only diagnostic
    expanded.extend(item);
    expanded
}
