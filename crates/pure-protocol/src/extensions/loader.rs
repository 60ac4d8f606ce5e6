//! Extension Loader
//!
//! Supplies the extensions a configuration pass iterates over. Extensions
//! are handed in by the host application at startup; nothing here scans the
//! filesystem.

use std::collections::HashSet;
use std::sync::Arc;

use super::types::ProtocolExtension;

/// Enumerable set of protocol extensions.
///
/// `list` must return the same extensions in the same order for the
/// duration of one configuration pass.
pub trait ExtensionSource: Send + Sync {
    /// List the available extensions
    fn list(&self) -> Vec<Arc<dyn ProtocolExtension>>;
}

impl ExtensionSource for Vec<Arc<dyn ProtocolExtension>> {
    fn list(&self) -> Vec<Arc<dyn ProtocolExtension>> {
        self.clone()
    }
}

/// In-process extension source backed by an explicit list
#[derive(Default)]
pub struct ExtensionLoader {
    extensions: Vec<Arc<dyn ProtocolExtension>>,
    disabled: HashSet<String>,
}

impl ExtensionLoader {
    /// Create an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an extension, builder style
    pub fn with(mut self, extension: impl ProtocolExtension + 'static) -> Self {
        self.register(Arc::new(extension));
        self
    }

    /// Add an extension. A second extension with an already known name is
    /// ignored.
    pub fn register(&mut self, extension: Arc<dyn ProtocolExtension>) -> bool {
        if self.extensions.iter().any(|e| e.name() == extension.name()) {
            tracing::warn!("Extension '{}' is already loaded, ignoring duplicate", extension.name());
            return false;
        }
        self.extensions.push(extension);
        true
    }

    /// Hide extensions by name from `list`
    pub fn disable(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.disabled.extend(names.into_iter().map(Into::into));
        self
    }

    /// Number of loaded extensions, disabled ones included
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// No extensions loaded
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl ExtensionSource for ExtensionLoader {
    fn list(&self) -> Vec<Arc<dyn ProtocolExtension>> {
        self.extensions
            .iter()
            .filter(|e| !self.disabled.contains(e.name()))
            .cloned()
            .collect()
    }
}

/// Log the extensions about to be registered
pub fn log_extension_list(extensions: &[Arc<dyn ProtocolExtension>]) {
    if extensions.is_empty() {
        tracing::info!("No protocol extensions loaded");
        return;
    }

    tracing::info!("Protocol extensions ({}):", extensions.len());
    for extension in extensions {
        let contributions = extension.subtype_info_collectors().len();
        tracing::info!("  - {} ({} collectors)", extension.name(), contributions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl ProtocolExtension for Named {
        fn name(&self) -> &str {
            self.0
        }
    }

    fn names(source: &dyn ExtensionSource) -> Vec<String> {
        source.list().iter().map(|e| e.name().to_string()).collect()
    }

    #[test]
    fn test_loader_keeps_registration_order() {
        let loader = ExtensionLoader::new().with(Named("b")).with(Named("a"));

        assert_eq!(loader.len(), 2);
        assert_eq!(names(&loader), vec!["b", "a"]);
    }

    #[test]
    fn test_loader_ignores_duplicate_names() {
        let mut loader = ExtensionLoader::new();
        assert!(loader.register(Arc::new(Named("core"))));
        assert!(!loader.register(Arc::new(Named("core"))));

        assert_eq!(loader.len(), 1);
    }

    #[test]
    fn test_loader_hides_disabled() {
        let loader = ExtensionLoader::new()
            .with(Named("core"))
            .with(Named("relational"))
            .disable(["relational"]);

        assert_eq!(names(&loader), vec!["core"]);
        assert!(!loader.is_empty());
    }

    #[test]
    fn test_vec_source() {
        let source: Vec<Arc<dyn ProtocolExtension>> = vec![Arc::new(Named("x"))];
        assert_eq!(names(&source), vec!["x"]);
        log_extension_list(&source.list());
    }
}
