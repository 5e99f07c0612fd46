//! Scavenger hunt backend library.
//!
//! Players scan printed QR codes, each naming a keyword; the first player to
//! claim a keyword is credited its points exactly once.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod keyword_seed;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
