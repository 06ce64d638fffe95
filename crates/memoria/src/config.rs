use crate::events::AppEvent;
use async_channel::Sender;
use carousel::{GestureConfig, RadiusRule, Settings};
use derive_more::{AsRef, Deref, Display, From, Into};
use directories::ProjectDirs;
use config::FileFormat;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct CardTitle(String);

crate::impl_string_newtype!(CardTitle);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct CardText(String);

crate::impl_string_newtype!(CardText);

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CardConfig {
    pub title: CardTitle,
    #[serde(default)]
    pub front: CardText,
    #[serde(default)]
    pub back: CardText,
    pub image: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewConfig {
    pub perspective: f64,
    pub card_width: f64,
    pub card_height: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            perspective: carousel::layout::PERSPECTIVE,
            card_width: 200.0,
            card_height: 280.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ring: RadiusRule,
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub cards: Vec<CardConfig>,
}

impl Config {
    pub fn settings(&self) -> Settings {
        Settings {
            ring: self.ring,
            gesture: self.gesture,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "troia", "memoria").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_from(&get_config_path()?)
}

/// Reads the deck at `path` with `MEMORIA_*` overrides on top. Without a file
/// the sample deck is the base layer, so a deleted config never empties the
/// ring.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder();
    let builder = if path.exists() {
        builder.add_source(config::File::from(path))
    } else {
        log::info!("No deck at {}, using the sample deck", path.display());
        builder.add_source(config::File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    };

    let layered = builder
        .add_source(
            config::Environment::with_prefix("MEMORIA")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;
    Ok(layered.try_deserialize()?)
}

/// The sample deck shipped with the binary.
pub fn builtin() -> Result<Config, ConfigError> {
    parse_toml(DEFAULT_CONFIG)
}

pub fn parse_toml(source: &str) -> Result<Config, ConfigError> {
    let parsed = config::Config::builder()
        .add_source(config::File::from_str(source, FileFormat::Toml))
        .build()?;
    Ok(parsed.try_deserialize()?)
}

/// Loads the user's deck. On first run the sample deck is written out for
/// editing; an unreadable file falls back to the sample deck.
pub fn load_or_setup() -> Config {
    match write_default_config() {
        Ok(Some(path)) => log::info!("Wrote sample deck to {}", path.display()),
        Ok(None) => {}
        Err(e) => log::warn!("Could not write sample deck: {}", e),
    }

    load_config().unwrap_or_else(|e| {
        log::error!("Failed to load config, using sample deck: {}", e);
        builtin().unwrap_or_default()
    })
}

/// Creates the config file from the sample deck unless one already exists.
/// Returns the path only when a new file was written.
pub fn write_default_config() -> Result<Option<PathBuf>, ConfigError> {
    let path = get_config_path()?;
    if let Some(dir) = path.parent() {
        fs_err::create_dir_all(dir)?;
    }

    match fs_err::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
    {
        Ok(mut file) => {
            file.write_all(DEFAULT_CONFIG.as_bytes())?;
            Ok(Some(path))
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Whether a filesystem event touched the config file itself.
pub fn is_config_change(event: &notify::Event, config_path: &Path) -> bool {
    let edits = matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    );
    edits && event.paths.iter().any(|p| p == config_path)
}

type WatchEvents = async_channel::Receiver<notify::Result<notify::Event>>;

fn watch_dir(dir: &Path) -> Result<(RecommendedWatcher, WatchEvents), ConfigError> {
    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = bridge_tx.send_blocking(res);
    })?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    Ok((watcher, bridge_rx))
}

async fn watch_config(tx: Sender<AppEvent>) -> Result<(), ConfigError> {
    let config_path = get_config_path()?;
    let dir = config_path
        .parent()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .to_path_buf();
    fs_err::create_dir_all(&dir)?;

    // the watcher stops when dropped, keep it alive for the loop
    let (_watcher, events) = watch_dir(&dir)?;

    while let Ok(res) = events.recv().await {
        match res {
            Ok(event) if is_config_change(&event, &config_path) => {
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::warn!("Watch error: {}", ConfigError::from(e)),
        }
    }
    Ok(())
}

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    if let Err(e) = watch_config(tx).await {
        log::error!("Config watcher stopped: {}", e);
    }
}
