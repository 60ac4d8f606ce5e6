//! Extension System
//!
//! Protocol extensions contribute polymorphic sub types, grouped by the
//! abstract supertype they extend. The registry merges every contribution
//! into one [`ProtocolMapper`](crate::ProtocolMapper).
//!
//! ```rust
//! use std::sync::Arc;
//! use pure_protocol::extensions::{
//!     ExtensionLoader, ExtensionRegistry, ProtocolExtension, SubtypeInfo,
//!     SubtypeInfoCollector, Supertype,
//! };
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct BigQuery {
//!     #[serde(rename = "projectId")]
//!     project_id: String,
//! }
//!
//! struct CloudExtension;
//!
//! impl ProtocolExtension for CloudExtension {
//!     fn name(&self) -> &str {
//!         "CloudExtension"
//!     }
//!
//!     fn subtype_info_collectors(&self) -> Vec<SubtypeInfoCollector> {
//!         vec![Box::new(|| {
//!             vec![SubtypeInfo::builder(Supertype::new("DatasourceSpecification"))
//!                 .subtype::<BigQuery>("bigQuery")
//!                 .build()]
//!         })]
//!     }
//! }
//!
//! let registry = ExtensionRegistry::new(Arc::new(ExtensionLoader::new().with(CloudExtension)));
//! let mapper = registry.configure_default().unwrap();
//! assert_eq!(mapper.registered_subtypes().len(), 1);
//! ```

mod types;
mod registry;
mod loader;
pub mod builders;

pub use types::{
    ProtocolExtension, ProtocolObject, SubtypeInfo, SubtypeInfoCollector, Supertype, VariantType,
};
pub(crate) use types::simple_type_name;

pub use registry::{configure, ExtensionRegistry};
pub use loader::{log_extension_list, ExtensionLoader, ExtensionSource};

pub use builders::{BuilderError, SubtypeInfoBuilder};
