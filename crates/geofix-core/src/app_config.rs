use crate::RequestOptions;

/// Process-wide settings, loaded once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct LocateConfig {
    /// Options merged into every request that leaves a field unset.
    pub defaults: RequestOptions,
    /// Default `tracing` filter directive for binaries.
    pub log_level: String,
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            defaults: RequestOptions::builtin_defaults(),
            log_level: "info".to_string(),
        }
    }
}
