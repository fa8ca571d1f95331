pub mod error;
pub mod policy;
pub mod registry;
pub mod schema;
pub mod schemes;

pub use error::{SchemeConfigError, ValidationErrors};
pub use policy::AdmissibilityPolicy;
pub use registry::SchemeRegistry;
pub use schema::{check_unique, DuplicatePolicy, IdentifierRecord, IdentifierSchema};
pub use schemes::SchemeHandler;
