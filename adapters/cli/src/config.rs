//! Layered CLI configuration: defaults, then the TOML file, then flags.

use std::{fs, path::Path, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use munch_content::{ContentStore, HttpContentStore, MemoryContentStore};
use munch_core::Level;
use serde::Deserialize;

const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;
const DEFAULT_FRAME: Duration = Duration::from_millis(50);
const DEFAULT_LEVEL_LIMIT: u32 = 3;

/// Contents of the optional configuration file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileConfig {
    game: GameSection,
    content: ContentSection,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct GameSection {
    seed: Option<u64>,
    viewport_width: Option<u32>,
    frame_ms: Option<u64>,
    level_limit: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ContentSection {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    offline: Option<bool>,
}

impl FileConfig {
    /// Reads `path`, or returns the defaults when no path was given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Command-line values that take precedence over the file.
#[derive(Clone, Debug, Default)]
pub(crate) struct Overrides {
    pub(crate) seed: Option<u64>,
    pub(crate) cache_url: Option<String>,
    pub(crate) offline: bool,
}

/// Fully resolved settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) seed: u64,
    pub(crate) viewport_width: u32,
    pub(crate) frame: Duration,
    pub(crate) level_limit: Level,
    pub(crate) cache_url: Option<String>,
    pub(crate) timeout: Duration,
}

impl Settings {
    pub(crate) fn resolve(file: FileConfig, overrides: Overrides) -> Self {
        let FileConfig { game, content } = file;
        let offline = overrides.offline || content.offline.unwrap_or(false);
        let cache_url = if offline {
            None
        } else {
            overrides.cache_url.or(content.base_url)
        };
        Self {
            seed: overrides
                .seed
                .or(game.seed)
                .unwrap_or_else(rand::random),
            viewport_width: game.viewport_width.unwrap_or(DEFAULT_VIEWPORT_WIDTH),
            frame: game
                .frame_ms
                .filter(|ms| *ms > 0)
                .map_or(DEFAULT_FRAME, Duration::from_millis),
            level_limit: Level::new(game.level_limit.unwrap_or(DEFAULT_LEVEL_LIMIT)),
            cache_url,
            timeout: content
                .timeout_secs
                .map_or(HttpContentStore::DEFAULT_TIMEOUT, Duration::from_secs),
        }
    }

    /// Store backing the custom topic; in-memory when running offline.
    pub(crate) fn content_store(&self) -> Arc<dyn ContentStore> {
        match &self.cache_url {
            Some(url) => {
                log::info!("using content cache at {url}");
                Arc::new(HttpContentStore::new(url.clone(), self.timeout))
            }
            None => {
                log::info!("no content cache configured; custom topics are synthesized locally");
                Arc::new(MemoryContentStore::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_the_file() {
        let file = FileConfig::parse(
            r#"
            [game]
            seed = 4
            frame_ms = 20
            level_limit = 2

            [content]
            base_url = "http://cache.local"
            timeout_secs = 3
            "#,
        )
        .expect("valid toml");

        let settings = Settings::resolve(
            file.clone(),
            Overrides {
                seed: Some(9),
                ..Overrides::default()
            },
        );
        assert_eq!(settings.seed, 9);
        assert_eq!(settings.frame, Duration::from_millis(20));
        assert_eq!(settings.level_limit, Level::new(2));
        assert_eq!(settings.cache_url.as_deref(), Some("http://cache.local"));
        assert_eq!(settings.timeout, Duration::from_secs(3));

        let offline = Settings::resolve(
            file,
            Overrides {
                offline: true,
                cache_url: Some("http://other".to_owned()),
                ..Overrides::default()
            },
        );
        assert_eq!(offline.cache_url, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::parse("[game]\nspeed = 3\n").is_err());
        assert_eq!(FileConfig::parse("").expect("empty"), FileConfig::default());
    }

    #[test]
    fn defaults_apply_without_a_file() {
        let settings = Settings::resolve(
            FileConfig::default(),
            Overrides {
                seed: Some(1),
                ..Overrides::default()
            },
        );
        assert_eq!(settings.viewport_width, 1280);
        assert_eq!(settings.frame, Duration::from_millis(50));
        assert_eq!(settings.level_limit, Level::new(3));
        assert_eq!(settings.cache_url, None);
    }
}
