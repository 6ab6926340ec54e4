use std::collections::HashMap;
use tracing::Level;

/// Per-scope log levels, parsed from strings like `warn,video=debug`.
#[derive(Debug, Clone)]
pub struct LogConfig {
    global_level: Level,
    scope_levels: HashMap<String, Level>,
}

impl LogConfig {
    pub fn new() -> Self {
        Self {
            global_level: Level::WARN,
            scope_levels: HashMap::new(),
        }
    }

    pub fn parse(config_str: &str) -> Self {
        let mut config = Self::new();
        config.parse_config_string(config_str);
        config
    }

    pub fn from_env(env_var_name: &str) -> Self {
        match std::env::var(env_var_name) {
            Ok(log_config) => Self::parse(&log_config),
            Err(_) => Self::new(),
        }
    }

    fn parse_config_string(&mut self, config_str: &str) {
        for part in config_str.split(',').map(str::trim) {
            if part.is_empty() {
                continue;
            }

            match part.split_once('=') {
                Some((scope, level)) => {
                    if let Some(level) = parse_level(level.trim()) {
                        self.scope_levels.insert(scope.trim().to_string(), level);
                    }
                }
                None => {
                    if let Some(level) = parse_level(part) {
                        self.global_level = level;
                    }
                }
            }
        }
    }

    pub fn should_log(&self, scope: &str, level: Level) -> bool {
        level <= self.level_for(scope)
    }

    pub fn level_for(&self, scope: &str) -> Level {
        self.scope_levels
            .get(scope)
            .copied()
            .unwrap_or(self.global_level)
    }

    pub fn global_level(&self) -> Level {
        self.global_level
    }

    /// The most verbose level any scope asks for.
    pub fn max_level(&self) -> Level {
        self.scope_levels
            .values()
            .copied()
            .fold(self.global_level, Level::max)
    }

    pub fn set_global_level(&mut self, level: Level) {
        self.global_level = level;
    }

    pub fn set_scope_level(&mut self, scope: String, level: Level) {
        self.scope_levels.insert(scope, level);
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_level(level_str: &str) -> Option<Level> {
    match level_str.to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

/// Install the fmt subscriber and the scoped level table.
///
/// `env_var_name` (e.g. `VR360_LOG=warn,video=debug`) drives the scope
/// macros. `RUST_LOG`, when set, replaces the subscriber's filter; otherwise
/// it passes everything up to the most verbose scope.
pub fn init_logging(env_var_name: &str) -> LogConfig {
    let config = LogConfig::from_env(env_var_name);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(config.max_level().as_str().to_lowercase())
    });
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    super::set_log_config(config.clone());
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_level() {
        let config = LogConfig::parse("debug");
        assert_eq!(config.global_level(), Level::DEBUG);
    }

    #[test]
    fn test_parse_scope_levels() {
        let config = LogConfig::parse("warn,video=debug, render = trace");

        assert_eq!(config.global_level(), Level::WARN);
        assert_eq!(config.scope_levels.get("video"), Some(&Level::DEBUG));
        assert_eq!(config.scope_levels.get("render"), Some(&Level::TRACE));
    }

    #[test]
    fn test_max_level() {
        assert_eq!(LogConfig::new().max_level(), Level::WARN);
        assert_eq!(LogConfig::parse("error,video=debug").max_level(), Level::DEBUG);
    }

    #[test]
    fn test_unknown_levels_are_ignored() {
        let config = LogConfig::parse("loud,locomotion=chatty,,");
        assert_eq!(config.global_level(), Level::WARN);
        assert!(config.scope_levels.is_empty());
    }

    #[test]
    fn test_should_log() {
        let mut config = LogConfig::new();
        config.set_scope_level("locomotion".to_string(), Level::DEBUG);

        assert!(config.should_log("unknown", Level::ERROR));
        assert!(config.should_log("unknown", Level::WARN));
        assert!(!config.should_log("unknown", Level::INFO));

        assert!(config.should_log("locomotion", Level::ERROR));
        assert!(config.should_log("locomotion", Level::DEBUG));
        assert!(!config.should_log("locomotion", Level::TRACE));
    }
}
