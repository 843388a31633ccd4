use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tilepuzzle_core::ShuffleAlgorithm;

const SETTINGS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_SETTINGS_STR: &str = include_str!("default_settings.yaml");
/// Prefix for environment variables that override settings, such as
/// `TILEPUZZLE_ASSETS_DIR`.
const ENV_PREFIX: &str = "TILEPUZZLE";

lazy_static! {
    pub static ref DEFAULT_SETTINGS: Settings =
        serde_norway::from_str(DEFAULT_SETTINGS_STR).expect("error loading default settings");
}

/// Front end settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory containing the tile images and the profile document.
    pub assets_dir: PathBuf,
    /// File extensions to try, in order, when looking up a tile image.
    pub image_extensions: Vec<String>,
    /// Seed for reproducible shuffles.
    pub seed: Option<u64>,
    /// Shuffle algorithm.
    pub shuffle: ShuffleAlgorithm,
}
impl Default for Settings {
    fn default() -> Self {
        DEFAULT_SETTINGS.clone()
    }
}
impl Settings {
    /// Loads settings from the defaults, then the user file (if any), then
    /// environment variables. Falls back to the defaults if anything fails.
    pub fn load(user_file: Option<&Path>) -> Self {
        Self::load_from(user_file, config::Environment::with_prefix(ENV_PREFIX))
    }

    fn load_from(user_file: Option<&Path>, env: config::Environment) -> Self {
        lazy_static::initialize(&DEFAULT_SETTINGS);

        let mut config = config::Config::builder().add_source(config::File::from_str(
            DEFAULT_SETTINGS_STR,
            SETTINGS_FILE_FORMAT,
        ));
        if let Some(path) = user_file {
            config = config.add_source(config::File::from(path).format(SETTINGS_FILE_FORMAT));
        }
        config = config.add_source(env);

        config
            .build()
            .and_then(|c| c.try_deserialize())
            .unwrap_or_else(|e| {
                log::warn!("Error loading settings: {e}");
                Self::default()
            })
    }
}
