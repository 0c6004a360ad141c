use std::env;
use std::path::PathBuf;

use crate::error::{AppError, Result};
use crate::input::MouseFilter;
use dotenvy::dotenv;

/// Runtime configuration for the drag controller and the CLI.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Filter that starts a selecting rubber band.
    pub select_filter: MouseFilter,
    /// Filter that starts a toggling rubber band.
    pub toggle_filter: MouseFilter,
    /// Whether handled pointer events are marked consumed.
    pub consume_events: bool,
    /// Scene file opened when none is given on the command line.
    pub scene_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            select_filter: MouseFilter::SELECTION,
            toggle_filter: MouseFilter::ALTERNATE_SELECTION,
            consume_events: true,
            scene_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file if it exists, ignore if it doesn't
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut builder = Self::builder();

        if let Some(raw) = lookup("RUBBERBAND_SELECT_FILTER") {
            builder = builder.with_select_filter(raw.parse()?);
        }
        if let Some(raw) = lookup("RUBBERBAND_TOGGLE_FILTER") {
            builder = builder.with_toggle_filter(raw.parse()?);
        }
        if let Some(raw) = lookup("RUBBERBAND_CONSUME_EVENTS") {
            builder = builder.with_consume_events(parse_bool("RUBBERBAND_CONSUME_EVENTS", &raw)?);
        }
        if let Some(raw) = lookup("RUBBERBAND_SCENE").filter(|s| !s.trim().is_empty()) {
            builder = builder.with_scene_path(raw);
        }

        builder.build()
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::config(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}

/// Programmatic overrides on top of the defaults.
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn with_select_filter(mut self, filter: MouseFilter) -> Self {
        self.config.select_filter = filter;
        self
    }

    pub fn with_toggle_filter(mut self, filter: MouseFilter) -> Self {
        self.config.toggle_filter = filter;
        self
    }

    pub fn with_consume_events(mut self, consume: bool) -> Self {
        self.config.consume_events = consume;
        self
    }

    pub fn with_scene_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.scene_path = Some(path.into());
        self
    }

    /// Finishes the configuration.
    ///
    /// # Errors
    /// Returns [`AppError::Config`] when both filters are identical, since the
    /// toggle gesture could then never be started.
    pub fn build(self) -> Result<Config> {
        if self.config.select_filter == self.config.toggle_filter {
            return Err(AppError::config(format!(
                "select and toggle filters are both '{}'",
                self.config.select_filter
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn reads_filters_and_flags() {
        let config = Config::from_lookup(lookup(&[
            ("RUBBERBAND_TOGGLE_FILTER", "primary+ctrl"),
            ("RUBBERBAND_CONSUME_EVENTS", "off"),
            ("RUBBERBAND_SCENE", "scene.json"),
        ]))
        .unwrap();

        assert!(config.toggle_filter.modifiers.ctrl);
        assert!(!config.consume_events);
        assert_eq!(config.scene_path, Some(PathBuf::from("scene.json")));
    }

    #[test]
    fn rejects_bad_boolean() {
        let err = Config::from_lookup(lookup(&[("RUBBERBAND_CONSUME_EVENTS", "maybe")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn rejects_identical_filters() {
        let err = Config::builder()
            .with_toggle_filter(MouseFilter::SELECTION)
            .build()
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
