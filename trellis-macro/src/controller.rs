use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemStruct, LitStr, parse_macro_input};

pub fn controller_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    let struct_name = &input.ident;
    let base_path = parse_macro_input!(attr as LitStr);
    let base_path_value = base_path.value();

    let expanded = quote! {
        #input

        impl trellis_core::Controller for #struct_name {
            fn base_path(&self) -> &'static str {
                #base_path_value
            }

            fn routes(&self) -> Vec<trellis_core::RouteDefinition> {
                Self::route_definitions()
            }
        }

        impl #struct_name {
            pub const BASE_PATH: &'static str = #base_path_value;

            /// Shared instance that bridged handlers run against.
            /// Controllers are stateless; one instance serves every request.
            #[doc(hidden)]
            pub fn __shared() -> std::sync::Arc<Self> {
                static INSTANCE: std::sync::OnceLock<std::sync::Arc<#struct_name>> =
                    std::sync::OnceLock::new();
                INSTANCE
                    .get_or_init(|| std::sync::Arc::new(Self::default()))
                    .clone()
            }

            /// Returns the assembled router for mounting into the
            /// application. Assembly happens on the first call and the
            /// result is cached, so the accessor is idempotent and does
            /// not depend on attribute expansion order.
            pub fn routers() -> trellis_core::Router {
                static ROUTER: std::sync::OnceLock<trellis_core::Router> =
                    std::sync::OnceLock::new();
                ROUTER
                    .get_or_init(|| trellis_core::assemble::<Self>(Self::BASE_PATH))
                    .clone()
            }

            /// Route definitions registered on this controller, with the
            /// base path applied.
            pub fn route_definitions() -> Vec<trellis_core::RouteDefinition> {
                trellis_core::registry::routes_for::<Self>()
                    .into_iter()
                    .filter_map(|entry| {
                        trellis_core::HttpMethod::from_str(entry.verb).map(|method| {
                            trellis_core::RouteDefinition {
                                method,
                                path: trellis_core::join_paths(Self::BASE_PATH, entry.path),
                                handler_name: entry.handler_name.to_string(),
                            }
                        })
                    })
                    .collect()
            }
        }
    };

    TokenStream::from(expanded)
}
