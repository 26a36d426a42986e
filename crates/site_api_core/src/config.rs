pub const TABLE_NAME_VAR: &str = "TABLE_NAME";
pub const ITEM_ID_VAR: &str = "ITEM_ID";
pub const ENDPOINT_NAME_VAR: &str = "ENDPOINT_NAME";
pub const DEFAULT_ITEM_ID: &str = "home";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing {var} env var")]
    Missing { var: &'static str },
}

/// Settings for the visit counter, read once at cold start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitsConfig {
    pub table_name: String,
    pub item_id: String,
}

impl VisitsConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let table_name = required(&lookup, TABLE_NAME_VAR)?;
        let item_id =
            optional(&lookup, ITEM_ID_VAR).unwrap_or_else(|| DEFAULT_ITEM_ID.to_string());
        Ok(Self {
            table_name,
            item_id,
        })
    }
}

/// Settings for the prediction proxy, read once at cold start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictConfig {
    pub endpoint_name: String,
}

impl PredictConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint_name: required(&lookup, ENDPOINT_NAME_VAR)?,
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<String, ConfigError> {
    optional(lookup, var).ok_or(ConfigError::Missing { var })
}

// Blank values are treated as unset.
fn optional(lookup: &impl Fn(&str) -> Option<String>, var: &str) -> Option<String> {
    lookup(var)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
