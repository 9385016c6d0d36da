// Core library for the Trellis controller layer
// This module contains the foundational types, traits, and runtime components

// Re-exported for the expansion of `register_route!`
pub use inventory;

pub mod application;
pub mod error;
pub mod http;
pub mod registry;
pub mod respond;
pub mod routing;
pub mod traits;

// Re-export commonly used types
pub use application::*;
pub use error::*;
pub use http::*;
pub use respond::*;
pub use routing::{Route, Router};
pub use traits::*;
