/*
settings.rs

Copyright 2025 Hervé Quatremain

This file is part of Lockmaze.

Lockmaze is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Lockmaze is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Lockmaze. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Read and write the settings file.
//!
//! The file holds the [`Settings`] object in JSON. Fields missing from the file take their
//! default value, and the loaded values are normalized.

use log::debug;
use std::error::Error;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::settings::Settings;

/// Settings file.
pub struct SaverSettings {
    path: PathBuf,
}

impl SaverSettings {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the settings.
    ///
    /// Return `None` if the file does not exist.
    pub fn get_settings(&self) -> Result<Option<Settings>, Box<dyn Error>> {
        let text: String = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(Box::new(error)),
        };

        let mut settings: Settings = serde_json::from_str(&text)?;
        settings.normalize();
        debug!("Settings loaded from {:?}: {settings:?}", self.path);
        Ok(Some(settings))
    }

    /// Write the settings, creating the parent directories if needed.
    pub fn save_settings(&self, settings: &Settings) -> Result<(), Box<dyn Error>> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let mut text: String = serde_json::to_string_pretty(settings)?;
        text.push('\n');
        fs::write(&self.path, text)?;
        debug!("Settings saved to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::BotAlgorithm;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir: TempDir = tempfile::tempdir().expect("Temporary directory");
        let saver: SaverSettings =
            SaverSettings::new(dir.path().join("config").join("lockmaze.json"));
        let settings: Settings = Settings {
            num_players: 3,
            num_bots: 2,
            bot_algorithm: BotAlgorithm::LeftHandRule,
            mark_trails: true,
            ..Settings::default()
        };

        assert_eq!(saver.get_settings().expect("Missing file is not an error"), None);
        saver.save_settings(&settings).expect("Settings saved");
        assert!(saver.path().exists());
        assert_eq!(saver.get_settings().expect("Settings loaded"), Some(settings));
    }

    #[test]
    fn test_loaded_settings_are_normalized() {
        let dir: TempDir = tempfile::tempdir().expect("Temporary directory");
        let path: PathBuf = dir.path().join("settings.json");
        fs::write(&path, r#"{"num_players": 2, "num_bots": 5}"#).expect("File written");

        let settings: Option<Settings> =
            SaverSettings::new(path).get_settings().expect("Settings loaded");
        assert_eq!(settings.map(|s| s.num_bots), Some(2));
    }

    #[test]
    fn test_invalid_json() {
        let dir: TempDir = tempfile::tempdir().expect("Temporary directory");
        let path: PathBuf = dir.path().join("settings.json");
        fs::write(&path, "{ not json").expect("File written");

        assert!(SaverSettings::new(path.clone()).get_settings().is_err());

        fs::write(&path, r#"{"bot_algorithm": "breadth-first"}"#).expect("File written");
        assert!(SaverSettings::new(path).get_settings().is_err());
    }
}
