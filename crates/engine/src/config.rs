#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Maximum number of resolver tasks in flight for one operation.
    /// 64 by default, values below 1 are treated as 1.
    pub max_concurrency: usize,
    /// Number of idle resolver tasks kept for reuse across requests.
    /// 1024 by default.
    pub task_pool_capacity: usize,
    /// Whether messages of internal resolver errors are exposed to clients.
    pub include_error_details: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_concurrency: 64,
            task_pool_capacity: 1024,
            include_error_details: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid engine configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

impl EngineConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub(crate) fn effective_max_concurrency(&self) -> usize {
        self.max_concurrency.max(1)
    }
}
