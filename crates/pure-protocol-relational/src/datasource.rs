//! Datasource Specifications
//!
//! Wire-level descriptions of where a relational database lives.

use serde::{Deserialize, Deserializer, Serialize};

use pure_protocol::Supertype;

/// Abstract category of all datasource specifications
pub const DATASOURCE_SPECIFICATION: Supertype = Supertype::new("DatasourceSpecification");

/// In-process H2 database seeded from CSV or SQL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalH2DatasourceSpecification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_data_setup_csv: Option<String>,
    #[serde(default)]
    pub test_data_setup_sqls: Vec<String>,
}

/// File-backed embedded H2 database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedH2DatasourceSpecification {
    pub database_name: String,
    pub directory: String,
    #[serde(default)]
    pub auto_server_mode: bool,
}

/// Fixed host and port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticDatasourceSpecification {
    pub host: String,
    #[serde(deserialize_with = "port_number")]
    pub port: u16,
    pub database_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnowflakeDatasourceSpecification {
    pub account_name: String,
    pub region: String,
    pub warehouse_name: String,
    pub database_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quoted_identifiers_ignore_case: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedshiftDatasourceSpecification {
    pub database_name: String,
    pub endpoint: String,
    #[serde(deserialize_with = "port_number")]
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BigQueryDatasourceSpecification {
    pub project_id: String,
    pub default_dataset: String,
}

/// Ports arrive either as numbers or as numeric strings
fn port_number<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    match Port::deserialize(deserializer)? {
        Port::Number(port) => Ok(port),
        Port::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}
