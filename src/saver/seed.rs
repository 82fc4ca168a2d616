/*
seed.rs

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

//! Save and restore a maze.
//!
//! A maze is entirely defined by its seed, so only the seed is saved, as a decimal number in a
//! text file. Loading the file generates the maze again.

use log::debug;
use std::error::Error;
use std::fmt;
use std::fs::{File, read_to_string};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::PathBuf;

/// Type of errors for invalid seed files.
#[derive(Debug, PartialEq)]
pub enum SeedFileError {
    /// The file is empty.
    Empty,

    /// The file does not contain a valid seed.
    Invalid(String),
}

impl fmt::Display for SeedFileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SeedFileError::Empty => write!(f, "The seed file is empty"),
            SeedFileError::Invalid(s) => write!(f, "The seed file contains an invalid seed: {s:?}"),
        }
    }
}

impl Error for SeedFileError {}

/// Object to save and restore a maze seed.
pub struct SaverSeed {
    /// Path to the save file.
    save_file: PathBuf,
}

impl SaverSeed {
    /// Create a [`SaverSeed`] object for the given file.
    pub fn new(save_file: PathBuf) -> Self {
        debug!("Seed file: {save_file:?}");
        Self { save_file }
    }

    /// Read the seed from the file.
    ///
    /// Return `None` if the file does not exist.
    pub fn get_seed(&self) -> Result<Option<u64>, Box<dyn Error>> {
        let content: String = match read_to_string(&self.save_file) {
            Ok(c) => c,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        };

        let text: &str = content.trim();
        if text.is_empty() {
            return Err(Box::new(SeedFileError::Empty));
        }
        match text.parse::<u64>() {
            Ok(seed) => Ok(Some(seed)),
            Err(_) => Err(Box::new(SeedFileError::Invalid(text.to_string()))),
        }
    }

    /// Save the seed.
    pub fn save_seed(&self, seed: u64) -> Result<(), Box<dyn Error>> {
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        writeln!(writer, "{seed}")?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir: TempDir = tempfile::tempdir().expect("Temporary directory");
        let saver: SaverSeed = SaverSeed::new(dir.path().join("maze.seed"));

        assert_eq!(saver.get_seed().expect("Missing file is not an error"), None);

        saver.save_seed(18_446_744_073_709_551_615).expect("Seed saved");
        assert_eq!(
            saver.get_seed().expect("Seed loaded"),
            Some(u64::MAX)
        );

        saver.save_seed(7).expect("Seed overwritten");
        assert_eq!(saver.get_seed().expect("Seed loaded"), Some(7));
    }

    #[test]
    fn test_whitespace_is_ignored() {
        let dir: TempDir = tempfile::tempdir().expect("Temporary directory");
        let path: PathBuf = dir.path().join("maze.seed");
        fs::write(&path, "  42 \r\n").expect("File written");

        assert_eq!(SaverSeed::new(path).get_seed().expect("Seed loaded"), Some(42));
    }

    #[test]
    fn test_invalid_content() {
        let dir: TempDir = tempfile::tempdir().expect("Temporary directory");
        let path: PathBuf = dir.path().join("maze.seed");
        let saver: SaverSeed = SaverSeed::new(path.clone());

        fs::write(&path, "\n").expect("File written");
        let error: Box<dyn Error> = saver.get_seed().expect_err("Empty file");
        assert_eq!(
            error.downcast_ref::<SeedFileError>(),
            Some(&SeedFileError::Empty)
        );

        fs::write(&path, "-3").expect("File written");
        let error: Box<dyn Error> = saver.get_seed().expect_err("Negative seed");
        assert_eq!(
            error.downcast_ref::<SeedFileError>(),
            Some(&SeedFileError::Invalid("-3".to_string()))
        );
    }
}
