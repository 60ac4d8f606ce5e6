//! Extension Registry
//!
//! Merges the subtype contributions of every extension into one
//! [`ProtocolMapper`]. Two extensions may never claim the same default
//! subtype slot or the same tag; the first claim wins the slot and the
//! second one aborts the whole pass with a [`ConflictError`].

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::config::RegistryConfig;
use crate::error::{ConflictError, ProtocolResult};
use crate::mapper::ProtocolMapper;

use super::loader::{log_extension_list, ExtensionSource};
use super::types::{ProtocolExtension, Supertype, VariantType};

/// Who claimed a registration slot
struct Claim<'a> {
    variant: VariantType,
    extension: &'a str,
}

/// Slots claimed during one configuration pass
#[derive(Default)]
struct RegistrationLedger<'a> {
    default_by_supertype: HashMap<Supertype, Claim<'a>>,
    owner_by_tag: HashMap<&'a str, Claim<'a>>,
}

/// Apply every extension's subtypes to `mapper`.
///
/// Tags in `excluded` are skipped without any conflict check. The mapper is
/// only handed back when the whole pass succeeds.
pub fn configure(
    mut mapper: ProtocolMapper,
    extensions: &[Arc<dyn ProtocolExtension>],
    excluded: &HashSet<String>,
) -> ProtocolResult<ProtocolMapper> {
    // Collected up front so ledger entries can borrow tags
    let contributions: Vec<_> = extensions
        .iter()
        .map(|extension| (extension.name(), extension.subtype_infos()))
        .collect();

    let mut ledger = RegistrationLedger::default();

    for (extension, infos) in &contributions {
        let extension = *extension;
        for info in infos {
            let supertype = info.supertype();

            if let Some(default) = info.default_subtype() {
                if let Some(found) = ledger.default_by_supertype.get(&supertype) {
                    let conflict = ConflictError::DuplicateDefault {
                        supertype: supertype.name().to_string(),
                        variant: default.name().to_string(),
                        extension: extension.to_string(),
                        existing_variant: found.variant.name().to_string(),
                        existing_extension: found.extension.to_string(),
                    };
                    tracing::warn!("{}", conflict);
                    return Err(conflict.into());
                }
                ledger.default_by_supertype.insert(
                    supertype,
                    Claim {
                        variant: default,
                        extension,
                    },
                );
                tracing::debug!(
                    "Registered default sub type '{}' for '{}' from '{}'",
                    default,
                    supertype,
                    extension
                );
                mapper.register_default_subtype(supertype, default);
            }

            for (variant, tag) in info.subtypes() {
                if excluded.contains(tag) {
                    tracing::debug!("Skipping excluded sub type tag '{}' from '{}'", tag, extension);
                    continue;
                }
                if let Some(found) = ledger.owner_by_tag.get(tag.as_str()) {
                    let conflict = ConflictError::DuplicateTag {
                        tag: tag.clone(),
                        supertype: supertype.name().to_string(),
                        variant: variant.name().to_string(),
                        extension: extension.to_string(),
                        existing_variant: found.variant.name().to_string(),
                        existing_extension: found.extension.to_string(),
                    };
                    tracing::warn!("{}", conflict);
                    return Err(conflict.into());
                }
                ledger.owner_by_tag.insert(
                    tag.as_str(),
                    Claim {
                        variant: *variant,
                        extension,
                    },
                );
                tracing::debug!("Registered sub type '{}' as '{}' for '{}'", variant, tag, supertype);
                mapper.register_subtype(supertype, *variant, tag.as_str());
            }
        }
    }

    Ok(mapper)
}

/// Builds protocol mappers from a source of extensions
pub struct ExtensionRegistry {
    source: Arc<dyn ExtensionSource>,
    config: RegistryConfig,
}

impl ExtensionRegistry {
    /// Create a registry with default configuration
    pub fn new(source: Arc<dyn ExtensionSource>) -> Self {
        Self::from_config(source, RegistryConfig::default())
    }

    /// Create a registry with explicit configuration
    pub fn from_config(source: Arc<dyn ExtensionSource>, config: RegistryConfig) -> Self {
        Self { source, config }
    }

    /// Registry configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Extensions the source currently lists, minus the disabled ones
    pub fn extensions(&self) -> Vec<Arc<dyn ProtocolExtension>> {
        let disabled = &self.config.disabled_extensions;
        self.source
            .list()
            .into_iter()
            .filter(|extension| !disabled.iter().any(|name| name == extension.name()))
            .collect()
    }

    /// Fresh mapper with every discovered extension and no exclusions
    pub fn configure_default(&self) -> ProtocolResult<ProtocolMapper> {
        self.new_mapper(&HashSet::new())
    }

    /// Fresh mapper with every discovered extension, minus `excluded` tags
    pub fn new_mapper(&self, excluded: &HashSet<String>) -> ProtocolResult<ProtocolMapper> {
        self.with_extensions(ProtocolMapper::with_type_property(&self.config.type_property), excluded)
    }

    /// Fresh mapper using the configured type property and exclusions
    pub fn configured(&self) -> ProtocolResult<ProtocolMapper> {
        self.new_mapper(&self.config.excluded_set())
    }

    /// Apply every discovered extension to a caller supplied mapper
    pub fn with_extensions(
        &self,
        mapper: ProtocolMapper,
        excluded: &HashSet<String>,
    ) -> ProtocolResult<ProtocolMapper> {
        let extensions = self.extensions();
        if self.config.log_extensions {
            log_extension_list(&extensions);
        }
        configure(mapper, &extensions, excluded)
    }
}
