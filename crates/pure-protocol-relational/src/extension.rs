//! Relational Protocol Extension

use pure_protocol::extensions::{ProtocolExtension, SubtypeInfo, SubtypeInfoCollector};

use crate::authentication::*;
use crate::datasource::*;

/// Contributes the relational datasource specifications and authentication
/// strategies
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationalProtocolExtension;

impl RelationalProtocolExtension {
    pub const NAME: &'static str = "RelationalProtocolExtension";
}

impl ProtocolExtension for RelationalProtocolExtension {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn subtype_info_collectors(&self) -> Vec<SubtypeInfoCollector> {
        vec![
            Box::new(|| {
                vec![SubtypeInfo::builder(DATASOURCE_SPECIFICATION)
                    .subtype::<LocalH2DatasourceSpecification>("h2Local")
                    .subtype::<EmbeddedH2DatasourceSpecification>("h2Embedded")
                    .subtype::<StaticDatasourceSpecification>("static")
                    .subtype::<SnowflakeDatasourceSpecification>("snowflake")
                    .subtype::<RedshiftDatasourceSpecification>("redshift")
                    .subtype::<BigQueryDatasourceSpecification>("bigQuery")
                    .build()]
            }),
            Box::new(|| {
                vec![SubtypeInfo::builder(AUTHENTICATION_STRATEGY)
                    .default_subtype::<DefaultH2AuthenticationStrategy>()
                    .subtype::<DefaultH2AuthenticationStrategy>("h2Default")
                    .subtype::<UserPasswordAuthenticationStrategy>("userPassword")
                    .subtype::<DelegatedKerberosAuthenticationStrategy>("delegatedKerberos")
                    .subtype::<SnowflakePublicAuthenticationStrategy>("snowflakePublic")
                    .build()]
            }),
        ]
    }
}
