//! Check the extension set for conflicts.

use std::sync::Arc;

use anyhow::{bail, Result};
use colored::Colorize;

use pure_protocol::{ProtocolExtension, RegistryConfig};
use pure_protocol_relational::relational_extensions;

/// Execute check command.
pub fn execute(exclude: Vec<String>, config: &RegistryConfig) -> Result<()> {
    execute_with(relational_extensions(), exclude, config)
}

/// Check an explicit extension set
pub fn execute_with(
    extensions: Vec<Arc<dyn ProtocolExtension>>,
    exclude: Vec<String>,
    config: &RegistryConfig,
) -> Result<()> {
    let config = config.clone().with_excluded_subtypes(exclude);
    let registry = super::registry_over(extensions, &config);

    println!("{}", "Protocol Extension Check".cyan().bold());
    println!("{}", "─".repeat(50));
    for extension in &registry.extensions() {
        println!("  {} {}", "●".green(), extension.name());
    }
    println!();

    match registry.configured() {
        Ok(mapper) => {
            println!(
                "{} {} sub types, {} defaults",
                "✓".green(),
                mapper.registered_subtypes().len(),
                mapper.default_subtypes().len()
            );
            Ok(())
        }
        Err(err) if err.is_conflict() => {
            println!("{} {}", "✗ Conflict:".red(), err);
            bail!("extension set is not compatible")
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pure_protocol::extensions::SubtypeInfoCollector;
    use pure_protocol::{SubtypeInfo, Supertype};
    use pure_protocol_relational::StaticDatasourceSpecification;

    const DATASOURCE: Supertype = Supertype::new("DatasourceSpecification");

    /// Extension that re-registers a relational tag
    struct Shadowing;

    impl ProtocolExtension for Shadowing {
        fn name(&self) -> &str {
            "ShadowingExtension"
        }

        fn subtype_info_collectors(&self) -> Vec<SubtypeInfoCollector> {
            vec![Box::new(|| {
                vec![SubtypeInfo::builder(DATASOURCE)
                    .subtype::<StaticDatasourceSpecification>("redshift")
                    .build()]
            })]
        }
    }

    fn config() -> RegistryConfig {
        RegistryConfig::default().with_log_extensions(false)
    }

    #[test]
    fn test_check_shipped_extensions() {
        assert!(execute(Vec::new(), &config()).is_ok());
        assert!(execute(vec!["static".into()], &config()).is_ok());
    }

    #[test]
    fn test_check_reports_conflict() {
        let mut extensions = relational_extensions();
        extensions.push(Arc::new(Shadowing));

        let err = execute_with(extensions.clone(), Vec::new(), &config()).unwrap_err();
        assert!(err.to_string().contains("not compatible"));

        // Excluding the contested tag clears the conflict
        assert!(execute_with(extensions.clone(), vec!["redshift".into()], &config()).is_ok());

        // So does disabling the second extension
        let disabled = config().with_disabled_extensions(["ShadowingExtension"]);
        assert!(execute_with(extensions, Vec::new(), &disabled).is_ok());
    }
}
