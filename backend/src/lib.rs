//! Account service library modules.
//!
//! - [`domain`]: account model, validation and use-cases behind ports
//! - [`inbound`]: HTTP adapter translating requests into port calls
//! - [`outbound`]: credential store, password hashing and token adapters

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(test)]
pub(crate) mod test_support;
pub mod token_config;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
