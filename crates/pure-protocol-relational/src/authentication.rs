//! Authentication Strategies

use serde::{Deserialize, Serialize};

use pure_protocol::Supertype;

/// Abstract category of all authentication strategies
pub const AUTHENTICATION_STRATEGY: Supertype = Supertype::new("AuthenticationStrategy");

/// Built-in H2 credentials. Also used when no `_type` is given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultH2AuthenticationStrategy {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPasswordAuthenticationStrategy {
    pub user_name: String,
    pub password_vault_reference: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegatedKerberosAuthenticationStrategy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_principal: Option<String>,
}

/// Snowflake key-pair authentication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnowflakePublicAuthenticationStrategy {
    pub private_key_vault_reference: String,
    pub pass_phrase_vault_reference: String,
    pub public_user_name: String,
}
