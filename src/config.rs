//! Settings read from the user's configuration file
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fs::read_to_string;
use std::io;
use std::path::{Path, PathBuf};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

/// Name of the directory under the home directory which holds the configuration file
pub const APP_DIR: &str = ".polybook";

/// Name of the configuration file
pub const CONFIG_FILE: &str = "config.yaml";

////////////////////////////////////////////////////////////////////////////////////////////////////
/// User settings.
///
/// Every field is optional in the file; missing fields take their default values.
///
/// ```rust
/// use polybook::config::Settings;
///
/// let settings: Settings = serde_yaml::from_str("strength: 2.0\nlog:\n  level: debug\n")?;
/// assert_eq!(settings.strength, 2.0);
/// assert_eq!(settings.book, None);
/// assert_eq!(settings.log.level, "debug");
/// # Ok::<(), serde_yaml::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The book to use when none is given on the command line
    pub book: Option<PathBuf>,
    /// The strength used when picking a move
    pub strength: f64,
    /// Logging settings
    pub log: LogSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            book: None,
            strength: 1.0,
            log: LogSettings::default(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Whether to write a log at all
    pub enabled: bool,
    /// Where to write the log
    pub file: PathBuf,
    /// One of `off`, `error`, `warn`, `info`, `debug` or `trace`
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            enabled: false,
            file: PathBuf::from("polybook.log"),
            level: "info".to_owned(),
        }
    }
}

impl Settings {
    /// Reads settings from `path`. A missing file gives the default settings.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Settings, Error> {
        let path = path.as_ref();
        let s = match read_to_string(path) {
            Ok(s) => s,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
            Err(err) => return Err(Error(format!("{}: {}", path.display(), err))),
        };

        if s.trim().is_empty() {
            return Ok(Settings::default());
        }

        let settings: Settings = serde_yaml::from_str(&s)
            .map_err(|err| Error(format!("{}: {}", path.display(), err)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks that the values read are usable.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.strength >= 0.0 && self.strength < crate::book::select::MAX_STRENGTH) {
            return Err(Error(format!("{}: strength must be at least 0 and less than 4",
                                     self.strength)));
        }
        if parse_level(&self.log.level).is_none() {
            return Err(Error(format!("{}: invalid log level", self.log.level)));
        }
        Ok(())
    }

    /// Returns the log level, or `Off` if logging is disabled.
    pub fn log_level(&self) -> LevelFilter {
        if self.log.enabled {
            parse_level(&self.log.level).unwrap_or(LevelFilter::Off)
        } else {
            LevelFilter::Off
        }
    }
}

/// Returns the default location of the configuration file, `~/.polybook/config.yaml`.
pub fn default_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| { home.join(APP_DIR) })
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_FILE)
}

/// Parses a log level name.
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    match level {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error type for reading settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error(String);

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.0.fmt(f)
    }
}

impl std::error::Error for Error { }

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error(err.to_string())
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error(err.to_string())
    }
}
