// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::Error;

/// An appender that adds lines to the end of a single file.
///
/// The file is created on the first append if it does not exist, but its directory is not.
/// Every append opens the file, writes one line and closes it again; no handle is kept between
/// calls. Appends are not synchronized with other writers of the same file, so lines from
/// concurrent writers may interleave.
#[derive(Debug, Clone)]
pub struct SingleFile {
    path: PathBuf,
}

impl SingleFile {
    /// Create an appender for the file at `path`. The path is not checked until the first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path lines are appended to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `line` followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist and cannot be created, if it is not a
    /// writable regular file, or if the write fails. In all these cases nothing is written.
    pub fn append_line(&self, line: &str) -> Result<(), Error> {
        self.ensure_exists()?;
        let mut file = self.open_writable()?;

        let bytes = format!("{line}\n");
        file.write_all(bytes.as_bytes()).map_err(|err| {
            Error::new("failed to append log line")
                .with_context("path", self.path.display())
                .with_source(err)
        })
    }

    fn ensure_exists(&self) -> Result<(), Error> {
        if self.path.exists() {
            return Ok(());
        }

        OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map(drop)
            .map_err(|err| {
                Error::new("failed to create log file")
                    .with_context("path", self.path.display())
                    .with_source(err)
            })
    }

    fn open_writable(&self) -> Result<File, Error> {
        let not_writable = || {
            Error::new("log file is not writable").with_context("path", self.path.display())
        };

        let metadata = fs::metadata(&self.path).map_err(|err| not_writable().with_source(err))?;
        if !metadata.is_file() {
            return Err(not_writable().with_context("reason", "not a regular file"));
        }
        if metadata.permissions().readonly() {
            return Err(not_writable().with_context("reason", "read-only"));
        }

        OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|err| not_writable().with_source(err))
    }
}
