//! List registered sub types.

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use pure_protocol::{ProtocolMapper, RegistryConfig};

/// Execute list command.
pub fn execute(json: bool, config: &RegistryConfig) -> Result<()> {
    let mapper = super::mapper(config, Vec::new())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary(&mapper))?);
        return Ok(());
    }

    if mapper.is_empty() {
        println!("{}", "No sub types registered.".yellow());
        return Ok(());
    }

    println!("{}", "Registered Sub Types".bold());
    println!("{}", "═".repeat(60));

    for supertype in mapper.supertypes() {
        println!("{}", supertype.name().cyan().bold());
        if let Some(default) = mapper.default_of(supertype) {
            println!("  {} {}", "default:".dimmed(), default.name());
        }
        for (tag, variant) in mapper.subtypes_of(supertype) {
            println!("  {} {}", tag.green(), format!("({})", variant.name()).dimmed());
        }
    }

    println!();
    Ok(())
}

/// Registered sub types grouped by supertype
pub fn summary(mapper: &ProtocolMapper) -> serde_json::Value {
    let supertypes: serde_json::Map<String, serde_json::Value> = mapper
        .supertypes()
        .into_iter()
        .map(|supertype| {
            let subtypes: serde_json::Map<String, serde_json::Value> = mapper
                .subtypes_of(supertype)
                .into_iter()
                .map(|(tag, variant)| (tag, json!(variant.name())))
                .collect();
            let entry = json!({
                "default": mapper.default_of(supertype).map(|v| v.name()),
                "subtypes": subtypes,
            });
            (supertype.name().to_string(), entry)
        })
        .collect();

    json!({
        "typeProperty": mapper.type_property(),
        "supertypes": supertypes,
    })
}
