pub mod config;
pub mod error;
pub mod factory;
pub mod store;
pub mod template;
pub mod value;

pub use config::{LinksConfig, MissingKeyPolicy};
pub use error::{LinksError, TemplateError};
pub use factory::{Link, LinkFactory};
pub use store::{BundleHandle, HostSource, LinkStore};
pub use template::{assemble_url, LinkTemplate};
pub use value::VariableSet;
