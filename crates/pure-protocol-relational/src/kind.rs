//! Closed view over the known datasource specifications.
//!
//! Consumers that need to branch on the concrete specification match on
//! [`DatasourceSpecificationKind`] instead of probing each type in turn.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::OnceLock;

use pure_protocol::ProtocolObject;

use crate::datasource::*;

/// Every datasource specification this crate defines
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasourceSpecificationKind {
    LocalH2(LocalH2DatasourceSpecification),
    EmbeddedH2(EmbeddedH2DatasourceSpecification),
    Static(StaticDatasourceSpecification),
    Snowflake(SnowflakeDatasourceSpecification),
    Redshift(RedshiftDatasourceSpecification),
    BigQuery(BigQueryDatasourceSpecification),
}

macro_rules! impl_from_spec {
    ($($variant:ident => $spec:ty),* $(,)?) => {
        $(
            impl From<$spec> for DatasourceSpecificationKind {
                fn from(spec: $spec) -> Self {
                    Self::$variant(spec)
                }
            }
        )*

        fn converters() -> &'static HashMap<TypeId, Convert> {
            static CONVERTERS: OnceLock<HashMap<TypeId, Convert>> = OnceLock::new();
            CONVERTERS.get_or_init(|| {
                HashMap::from([$((TypeId::of::<$spec>(), convert::<$spec> as Convert)),*])
            })
        }
    };
}

type Convert = fn(&dyn ProtocolObject) -> Option<DatasourceSpecificationKind>;

fn convert<T>(value: &dyn ProtocolObject) -> Option<DatasourceSpecificationKind>
where
    T: ProtocolObject + Clone + Into<DatasourceSpecificationKind>,
{
    value.downcast_ref::<T>().cloned().map(Into::into)
}

impl_from_spec! {
    LocalH2 => LocalH2DatasourceSpecification,
    EmbeddedH2 => EmbeddedH2DatasourceSpecification,
    Static => StaticDatasourceSpecification,
    Snowflake => SnowflakeDatasourceSpecification,
    Redshift => RedshiftDatasourceSpecification,
    BigQuery => BigQueryDatasourceSpecification,
}

impl DatasourceSpecificationKind {
    /// Classify a decoded protocol value. Returns `None` for values that are
    /// not one of this crate's datasource specifications.
    pub fn from_protocol(value: &dyn ProtocolObject) -> Option<Self> {
        let convert = converters().get(&value.concrete_type_id())?;
        convert(value)
    }

    /// Database name, for the variants that carry one
    pub fn database_name(&self) -> Option<&str> {
        match self {
            Self::EmbeddedH2(spec) => Some(&spec.database_name),
            Self::Static(spec) => Some(&spec.database_name),
            Self::Snowflake(spec) => Some(&spec.database_name),
            Self::Redshift(spec) => Some(&spec.database_name),
            Self::LocalH2(_) | Self::BigQuery(_) => None,
        }
    }
}
