use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute, FnArg, Ident, ImplItem, ImplItemFn, ItemImpl, LitStr, PatType, Type,
    parse_macro_input,
};

/// How a handler parameter is filled in by the request bridge
enum BridgedArg {
    /// `RequestData` - the merged params/query/body mapping
    MergedData,
    /// `HttpRequest` - the raw request
    RawRequest,
}

/// Information about a route extracted from a method's verb attribute
struct RouteInfo {
    verb: String,
    path: String,
    handler_name: Ident,
    is_async: bool,
    has_self: bool,
    args: Result<Vec<BridgedArg>, syn::Error>,
}

fn is_verb_attr(name: &str) -> bool {
    matches!(name, "get" | "post" | "put" | "delete")
}

/// Classify the typed parameters of a handler method
fn classify_args(method: &ImplItemFn) -> Result<Vec<BridgedArg>, syn::Error> {
    let mut args = Vec::new();

    for arg in &method.sig.inputs {
        let FnArg::Typed(PatType { ty, .. }) = arg else {
            continue;
        };
        let segment = match ty.as_ref() {
            Type::Path(type_path) => type_path.path.segments.last(),
            _ => None,
        };
        match segment.map(|s| s.ident.to_string()).as_deref() {
            Some("RequestData") => args.push(BridgedArg::MergedData),
            Some("HttpRequest") => args.push(BridgedArg::RawRequest),
            _ => {
                return Err(syn::Error::new_spanned(
                    ty,
                    "route handler parameters must be RequestData or HttpRequest",
                ));
            }
        }
    }

    Ok(args)
}

/// Extract route information from a method's attributes
fn extract_route_info(method: &ImplItemFn) -> Option<RouteInfo> {
    let handler_name = method.sig.ident.clone();
    let is_async = method.sig.asyncness.is_some();

    let has_self = method
        .sig
        .inputs
        .iter()
        .any(|arg| matches!(arg, FnArg::Receiver(_)));

    for attr in &method.attrs {
        let Some(ident) = attr.path().get_ident() else {
            continue;
        };
        let verb_name = ident.to_string();
        if !is_verb_attr(&verb_name) {
            continue;
        }

        // Optional path argument; defaults to "/" + the method's own name
        let path = if attr.meta.require_list().is_ok() {
            attr.parse_args::<LitStr>()
                .map(|lit| lit.value())
                .unwrap_or_else(|_| format!("/{}", handler_name))
        } else {
            format!("/{}", handler_name)
        };

        return Some(RouteInfo {
            verb: verb_name.to_uppercase(),
            path,
            handler_name,
            is_async,
            has_self,
            args: classify_args(method),
        });
    }

    None
}

/// Remove verb attributes from a method (get, post, put, delete)
fn strip_verb_attrs(attrs: &[Attribute]) -> Vec<Attribute> {
    attrs
        .iter()
        .filter(|attr| {
            if let Some(ident) = attr.path().get_ident() {
                !is_verb_attr(&ident.to_string())
            } else {
                true
            }
        })
        .cloned()
        .collect()
}

/// Generate the registry submission for one route
fn generate_registration(self_ty: &Type, info: &RouteInfo) -> TokenStream2 {
    let verb = &info.verb;
    let path = &info.path;
    let handler_name = &info.handler_name;
    let handler_name_str = handler_name.to_string();

    let args = match &info.args {
        Ok(args) => args,
        Err(e) => return e.to_compile_error(),
    };

    let call_args: Vec<TokenStream2> = args
        .iter()
        .map(|arg| match arg {
            BridgedArg::MergedData => quote! { __req.merged_data() },
            BridgedArg::RawRequest => quote! { __req.clone() },
        })
        .collect();

    let invoke = match (info.has_self, info.is_async) {
        (true, true) => quote! {
            <#self_ty>::__shared().#handler_name(#(#call_args),*).await
        },
        (true, false) => quote! {
            <#self_ty>::__shared().#handler_name(#(#call_args),*)
        },
        (false, true) => quote! {
            <#self_ty>::#handler_name(#(#call_args),*).await
        },
        (false, false) => quote! {
            <#self_ty>::#handler_name(#(#call_args),*)
        },
    };

    let req_param = if args.is_empty() {
        quote! { _req }
    } else {
        quote! { __req }
    };

    quote! {
        trellis_core::register_route! {
            #self_ty, #verb, #path, #handler_name_str,
            |#req_param: trellis_core::HttpRequest| {
                Box::pin(async move {
                    Ok(trellis_core::respond(#invoke))
                }) as std::pin::Pin<Box<dyn std::future::Future<
                    Output = Result<trellis_core::HttpResponse, trellis_core::Error>,
                > + Send>>
            }
        }
    }
}

pub fn routes_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let _ = attr; // No attributes expected
    let input = parse_macro_input!(item as ItemImpl);

    let self_ty = &input.self_ty;

    let mut registrations: Vec<TokenStream2> = Vec::new();
    let mut modified_items: Vec<ImplItem> = Vec::new();

    for item in &input.items {
        if let ImplItem::Fn(method) = item {
            if let Some(route_info) = extract_route_info(method) {
                registrations.push(generate_registration(self_ty, &route_info));

                // Keep the method, minus its verb attribute
                let mut modified_method = method.clone();
                modified_method.attrs = strip_verb_attrs(&method.attrs);
                modified_items.push(ImplItem::Fn(modified_method));
            } else {
                modified_items.push(item.clone());
            }
        } else {
            modified_items.push(item.clone());
        }
    }

    // Reconstruct the impl block with the verb attributes consumed
    let attrs = &input.attrs;
    let unsafety = &input.unsafety;
    let generics = &input.generics;
    let trait_ = input.trait_.as_ref().map(|(bang, path, for_)| {
        quote! { #bang #path #for_ }
    });

    let expanded = quote! {
        #(#attrs)*
        #unsafety impl #generics #trait_ #self_ty {
            #(#modified_items)*
        }

        #(#registrations)*
    };

    TokenStream::from(expanded)
}
