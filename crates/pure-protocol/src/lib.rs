//! Pure Protocol - polymorphic sub type registration for protocol extensions
//!
//! Protocol elements such as datasource specifications are abstract
//! supertypes with many concrete variants, each identified on the wire by a
//! tag in the `_type` property. Variants are contributed by independently
//! authored extensions; this crate merges their contributions into a
//! [`ProtocolMapper`] and refuses any combination where two extensions claim
//! the same tag or the same default sub type.
//!
//! # Modules
//!
//! - **extensions** - extension trait, sub type info, discovery and the registry
//! - **mapper** - the JSON mapper the registry configures
//! - **config** - registry configuration (TOML + environment)
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashSet;
//! use pure_protocol::{configure, ProtocolMapper};
//!
//! let mapper = configure(ProtocolMapper::new(), &[], &HashSet::new()).unwrap();
//! assert!(mapper.is_empty());
//! ```

pub mod config;
pub mod extensions;
pub mod mapper;

mod error;

pub use config::{ConfigValidationError, RegistryConfig};
pub use error::{ConflictError, ProtocolError, ProtocolResult};
pub use extensions::{
    configure, ExtensionLoader, ExtensionRegistry, ExtensionSource, ProtocolExtension,
    ProtocolObject, SubtypeInfo, Supertype, VariantType,
};
pub use mapper::{ProtocolMapper, DEFAULT_TYPE_PROPERTY};
