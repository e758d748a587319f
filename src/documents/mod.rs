//! Document model for the product registration API.
//!
//! Field names follow the remote wire schema (`docId`, `ownerInn`, ...). Missing
//! fields decode to `None` and `None` fields are left out when encoding.

pub mod errors;
pub mod impls;
pub mod types;

pub use errors::DocumentError;
pub use types::{Description, Document, Product};
