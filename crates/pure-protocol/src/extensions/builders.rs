//! Fluent Builder APIs for Subtype Info
//!
//! # Example
//!
//! ```rust
//! use pure_protocol::extensions::{SubtypeInfo, Supertype};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct StaticDatasource {
//!     host: String,
//!     port: u16,
//! }
//!
//! const DATASOURCE: Supertype = Supertype::new("DatasourceSpecification");
//!
//! let info = SubtypeInfo::builder(DATASOURCE)
//!     .subtype::<StaticDatasource>("static")
//!     .build();
//! assert_eq!(info.subtypes()[0].1, "static");
//! ```

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::{ProtocolObject, SubtypeInfo, Supertype, VariantType};

/// Builder for creating `SubtypeInfo` instances with fluent API
#[derive(Debug, Clone)]
pub struct SubtypeInfoBuilder {
    supertype: Supertype,
    default_subtype: Option<VariantType>,
    subtypes: Vec<(VariantType, String)>,
}

impl SubtypeInfoBuilder {
    /// Create a new builder for the given supertype
    pub fn new(supertype: Supertype) -> Self {
        Self {
            supertype,
            default_subtype: None,
            subtypes: Vec::new(),
        }
    }

    /// Register `T` under `tag`
    pub fn subtype<T>(self, tag: impl Into<String>) -> Self
    where
        T: ProtocolObject + DeserializeOwned,
    {
        self.variant(VariantType::of::<T>(), tag)
    }

    /// Register an already described variant under `tag`
    pub fn variant(mut self, variant: VariantType, tag: impl Into<String>) -> Self {
        self.subtypes.push((variant, tag.into()));
        self
    }

    /// Use `T` when input carries no type property
    pub fn default_subtype<T>(mut self) -> Self
    where
        T: ProtocolObject + DeserializeOwned,
    {
        self.default_subtype = Some(VariantType::of::<T>());
        self
    }

    /// Build the subtype info
    ///
    /// # Panics
    /// Panics if a tag is empty or repeated within this builder
    pub fn build(self) -> SubtypeInfo {
        match self.try_build() {
            Ok(info) => info,
            Err(err) => panic!("SubtypeInfoBuilder: {err}"),
        }
    }

    /// Try to build, returning an error if validation fails
    pub fn try_build(self) -> Result<SubtypeInfo, BuilderError> {
        let mut seen = HashSet::new();
        for (variant, tag) in &self.subtypes {
            if tag.trim().is_empty() {
                return Err(BuilderError::EmptyTag(variant.name().to_string()));
            }
            if !seen.insert(tag.as_str()) {
                return Err(BuilderError::DuplicateTag(tag.clone()));
            }
        }

        Ok(SubtypeInfo {
            supertype: self.supertype,
            default_subtype: self.default_subtype,
            subtypes: self.subtypes,
        })
    }
}

/// Errors that can occur when building subtype info
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    #[error("Empty tag for sub type: {0}")]
    EmptyTag(String),

    #[error("Tag used twice in one contribution: {0}")]
    DuplicateTag(String),
}
