// === PUBLIC CONTRACT ===
// Other crates consume the market through the contract module and the projections.
pub mod contract;

pub use contract::{client, error, model};

// === MODULE DEFINITION ===
pub mod module;
pub use module::Market;

// === INTERNAL MODULES ===
// Exposed for the binary and for tests; external consumers should stick to `contract`
// and `api::dto`.
pub mod api;
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;
