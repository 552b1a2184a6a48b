//! Structured logging helpers
//!
//! Filter construction for the tracing subscriber and request id generation.

pub mod middleware;

pub use middleware::generate_request_id;

use crate::config::LoggingConfig;

/// Build filter directives string from LoggingConfig
///
/// Produces the base level followed by one `tuning_db::<component>=<level>`
/// directive per configured component, sorted by component name so the
/// result is stable.
///
/// # Examples
///
/// ```
/// use tuning_db::config::{LogFormat, LoggingConfig};
/// use tuning_db::logging::build_filter_directives;
/// use std::collections::HashMap;
///
/// let mut component_levels = HashMap::new();
/// component_levels.insert("api".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Pretty,
///     component_levels: Some(component_levels),
/// };
///
/// assert_eq!(build_filter_directives(&config), "info,tuning_db::api=debug");
/// ```
pub fn build_filter_directives(config: &LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        let mut components: Vec<_> = component_levels.iter().collect();
        components.sort();
        for (component, level) in components {
            filter_str.push_str(&format!(",tuning_db::{}={}", component, level));
        }
    }

    filter_str
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_filter_directives_base_level_only() {
        let config = LoggingConfig::default();
        assert_eq!(build_filter_directives(&config), "info");
    }

    #[test]
    fn test_filter_directives_sorted_components() {
        let mut levels = HashMap::new();
        levels.insert("tuning".to_string(), "trace".to_string());
        levels.insert("api".to_string(), "debug".to_string());

        let config = LoggingConfig {
            level: "warn".to_string(),
            component_levels: Some(levels),
            ..LoggingConfig::default()
        };

        assert_eq!(
            build_filter_directives(&config),
            "warn,tuning_db::api=debug,tuning_db::tuning=trace"
        );
    }
}
