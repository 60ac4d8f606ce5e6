//! Command implementations.

pub mod check;
pub mod decode;
pub mod list;

use std::sync::Arc;

use pure_protocol::{
    ExtensionLoader, ExtensionRegistry, ProtocolExtension, ProtocolMapper, ProtocolResult, RegistryConfig,
};
use pure_protocol_relational::relational_extensions;

/// Registry over the shipped extensions
pub fn registry(config: &RegistryConfig) -> ExtensionRegistry {
    registry_over(relational_extensions(), config)
}

/// Registry over an explicit extension list
pub fn registry_over(extensions: Vec<Arc<dyn ProtocolExtension>>, config: &RegistryConfig) -> ExtensionRegistry {
    let mut loader = ExtensionLoader::new();
    for extension in extensions {
        loader.register(extension);
    }
    ExtensionRegistry::from_config(Arc::new(loader), config.clone())
}

/// Mapper using the configured exclusions plus `extra` tags
pub fn mapper(config: &RegistryConfig, extra: Vec<String>) -> ProtocolResult<ProtocolMapper> {
    let config = config.clone().with_excluded_subtypes(extra);
    registry(&config).configured()
}
