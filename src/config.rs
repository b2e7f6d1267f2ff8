use std::{collections::HashSet, path::PathBuf};

use crate::{
    core::{DEFAULT_MAX_MESSAGE_BYTES, DEFAULT_PALETTE},
    error::ConfigError,
};

/// Runtime settings read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port to listen on
    pub port: u16,
    /// "production" or "development"
    pub environment: String,
    /// Directory served under /public
    pub public_dir: PathBuf,
    /// Colors handed out to players, last one first
    pub palette: Vec<String>,
    /// Largest inbound WebSocket text frame accepted
    pub max_message_bytes: usize,
}

impl Config {
    /// Load settings from the process environment, reading `.env` first if present
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric setting does not parse, or the palette
    /// ends up empty or names a color twice
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value })?,
            None => 3000,
        };

        let max_message_bytes = match lookup("MAX_MESSAGE_BYTES") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "MAX_MESSAGE_BYTES",
                value,
            })?,
            None => DEFAULT_MAX_MESSAGE_BYTES,
        };

        let palette: Vec<String> = match lookup("COLOR_PALETTE") {
            Some(value) => value
                .split(',')
                .map(str::trim)
                .filter(|color| !color.is_empty())
                .map(String::from)
                .collect(),
            None => DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        };
        if palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        // Each live player must hold a distinct token
        let mut seen = HashSet::new();
        if let Some(color) = palette.iter().find(|color| !seen.insert(color.as_str())) {
            return Err(ConfigError::DuplicateColor(color.clone()));
        }

        Ok(Self {
            port,
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "production".to_string()),
            public_dir: lookup("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public")),
            palette,
            max_message_bytes,
        })
    }

    pub fn is_development(&self) -> bool {
        matches!(self.environment.as_str(), "development" | "dev")
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            environment: "production".to_string(),
            public_dir: PathBuf::from("public"),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.environment, "production");
        assert_eq!(config.public_dir, PathBuf::from("public"));
        assert_eq!(config.palette.len(), 6);
        assert_eq!(config.max_message_bytes, 1024);
        assert!(!config.is_development());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("ENVIRONMENT", "development"),
            ("COLOR_PALETTE", "red, green,,blue "),
            ("MAX_MESSAGE_BYTES", "4096"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert!(config.is_development());
        assert_eq!(config.palette, vec!["red", "green", "blue"]);
        assert_eq!(config.max_message_bytes, 4096);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));
    }

    #[test]
    fn test_empty_palette() {
        let err = Config::from_lookup(lookup_from(&[("COLOR_PALETTE", " , ")])).unwrap_err();

        assert!(matches!(err, ConfigError::EmptyPalette));
    }

    #[test]
    fn test_duplicate_palette() {
        let err = Config::from_lookup(lookup_from(&[("COLOR_PALETTE", "red, blue,red")]))
            .unwrap_err();

        match err {
            ConfigError::DuplicateColor(color) => assert_eq!(color, "red"),
            other => panic!("expected duplicate color, got {other:?}"),
        }

        let err = Config::from_lookup(lookup_from(&[("COLOR_PALETTE", "red,red")])).unwrap_err();
        assert_eq!(err.to_string(), "COLOR_PALETTE lists red more than once");
    }

    #[test]
    fn test_palette_colors_are_distinct() {
        let config = Config::from_lookup(lookup_from(&[("COLOR_PALETTE", "red,blue")])).unwrap();
        let mut manager = crate::core::GameManager::with_palette(config.palette);

        let a = manager.connect("a").unwrap();
        let b = manager.connect("b").unwrap();

        assert_ne!(a.color, b.color);
    }
}
