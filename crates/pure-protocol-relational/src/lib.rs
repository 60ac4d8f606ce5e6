//! Relational store protocol extension
//!
//! Contributes the wire-level model of relational connections: datasource
//! specifications (where the database lives) and authentication strategies
//! (how to log in). Both are polymorphic and tagged with `_type`.
//!
//! # Example
//!
//! ```rust
//! use pure_protocol::ProtocolMapper;
//! use pure_protocol_relational::{relational_extensions, RedshiftDatasourceSpecification, DATASOURCE_SPECIFICATION};
//!
//! let mapper = pure_protocol::configure(ProtocolMapper::new(), &relational_extensions(), &Default::default()).unwrap();
//! let spec = mapper
//!     .read_as::<RedshiftDatasourceSpecification>(
//!         DATASOURCE_SPECIFICATION,
//!         serde_json::json!({"_type": "redshift", "databaseName": "dev", "endpoint": "localhost", "port": 5439}),
//!     )
//!     .unwrap();
//! assert_eq!(spec.port, 5439);
//! ```

use std::sync::Arc;

use pure_protocol::ProtocolExtension;

pub mod authentication;
pub mod datasource;
mod extension;
mod kind;

pub use authentication::*;
pub use datasource::*;
pub use extension::RelationalProtocolExtension;
pub use kind::DatasourceSpecificationKind;

/// Extensions shipped by this crate, in registration order
pub fn relational_extensions() -> Vec<Arc<dyn ProtocolExtension>> {
    vec![Arc::new(RelationalProtocolExtension)]
}
