// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Paul <abonnementspaul (at) gmail.com>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, version 3.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! On-disk registry of web apps.
//!
//! Every web app is a pair of files sharing the same base name: a desktop entry
//! in the applications directory and a PNG icon in the icons directory. There is
//! no index, every call reads the directories again.

use crate::types::WebAppEntry;
use crate::types::desktop_entry::{MalformedDesktopEntry, WebAppDesktopEntry};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

pub const DESKTOP_ENTRY_SUFFIX: &str = ".web.desktop";
pub const ICON_EXTENSION: &str = "png";

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("A web app named \"{name}\" already exists. Pick a different name.")]
    Collision { name: String },

    #[error("Invalid web app name \"{name}\": {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("Invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: &'static str },

    #[error("No web app named \"{name}\"")]
    NotFound { name: String },

    #[error("Unable to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unable to remove {}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unable to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed desktop entry {}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: MalformedDesktopEntry,
    },
}

/// Names end up as file names and as the `Name=` line.
pub fn validate_name(name: &str) -> Result<(), RegistryError> {
    let invalid = |reason| {
        Err(RegistryError::InvalidName {
            name: name.to_string(),
            reason,
        })
    };

    if name.trim().is_empty() {
        return invalid("name is empty");
    }

    if name.starts_with('.') {
        return invalid("name must not start with '.'");
    }

    if name.contains(['/', '\\']) {
        return invalid("name must not contain path separators");
    }

    if name.chars().any(char::is_control) {
        return invalid("name must not contain control characters");
    }

    Ok(())
}

pub fn validate_url(url: &str) -> Result<(), RegistryError> {
    let invalid = |reason| {
        Err(RegistryError::InvalidUrl {
            url: url.to_string(),
            reason,
        })
    };

    if url.is_empty() {
        return invalid("URL is empty");
    }

    if url.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return invalid("URL must not contain whitespace or control characters");
    }

    Ok(())
}

/// Flushing syncs to disk, the desktop entry is only done once it is there.
struct SyncingFile(File);

impl Write for SyncingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.sync_all()
    }
}

#[derive(Debug, Clone)]
pub struct Registry {
    desktop_entries_dir: PathBuf,
    icons_dir: PathBuf,
    browser: String,
}

impl Registry {
    pub fn new(desktop_entries_dir: PathBuf, icons_dir: PathBuf, browser: String) -> Self {
        Self {
            desktop_entries_dir,
            icons_dir,
            browser,
        }
    }

    pub fn descriptor_path(&self, name: &str) -> PathBuf {
        self.desktop_entries_dir
            .join(format!("{name}{DESKTOP_ENTRY_SUFFIX}"))
    }

    pub fn icon_path(&self, name: &str) -> PathBuf {
        self.icons_dir.join(format!("{name}.{ICON_EXTENSION}"))
    }

    pub fn exists(&self, name: &str) -> bool {
        validate_name(name).is_ok() && self.descriptor_path(name).is_file()
    }

    /// Writes the icon, then the desktop entry pointing at it, and returns the icon path.
    ///
    /// The desktop entry is opened with `create_new`, so a name that is already taken
    /// fails with [`RegistryError::Collision`] before anything is written. If a later
    /// write fails, the files of this attempt are removed again.
    pub fn create(&self, name: &str, url: &str, icon_bytes: &[u8]) -> Result<PathBuf, RegistryError> {
        validate_name(name)?;
        validate_url(url)?;

        let descriptor_path = self.descriptor_path(name);

        let descriptor = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&descriptor_path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(RegistryError::Collision {
                    name: name.to_string(),
                });
            }
            Err(e) => {
                return Err(RegistryError::Write {
                    path: descriptor_path,
                    source: e,
                });
            }
        };

        self.fill(name, url, icon_bytes, SyncingFile(descriptor))
    }

    /// Second half of [`Registry::create`], once the desktop entry path is claimed.
    fn fill(
        &self,
        name: &str,
        url: &str,
        icon_bytes: &[u8],
        mut descriptor: impl Write,
    ) -> Result<PathBuf, RegistryError> {
        let descriptor_path = self.descriptor_path(name);
        let icon_path = self.icon_path(name);

        if let Err(e) = fs::write(&icon_path, icon_bytes) {
            drop(descriptor);
            self.rollback(&[&descriptor_path]);
            return Err(RegistryError::Write {
                path: icon_path,
                source: e,
            });
        }

        let contents = WebAppDesktopEntry::new(name, url, &icon_path, &self.browser).to_string();
        let written = descriptor
            .write_all(contents.as_bytes())
            .and_then(|_| descriptor.flush());

        if let Err(e) = written {
            drop(descriptor);
            self.rollback(&[&descriptor_path, &icon_path]);
            return Err(RegistryError::Write {
                path: descriptor_path,
                source: e,
            });
        }

        debug!("Wrote {} and {}", descriptor_path.display(), icon_path.display());

        Ok(icon_path)
    }

    /// Names in directory order. A missing directory is an empty registry.
    pub fn list(&self) -> Result<Vec<String>, RegistryError> {
        let read_dir = match fs::read_dir(&self.desktop_entries_dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(RegistryError::Read {
                    path: self.desktop_entries_dir.clone(),
                    source: e,
                });
            }
        };

        let mut names = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = dir_entry.map_err(|e| RegistryError::Read {
                path: self.desktop_entries_dir.clone(),
                source: e,
            })?;

            let file_name = dir_entry.file_name();
            let Some(name) = file_name
                .to_str()
                .and_then(|f| f.strip_suffix(DESKTOP_ENTRY_SUFFIX))
            else {
                continue;
            };

            // Same rules as `exists`, so every listed name can also be deleted
            if validate_name(name).is_err() || !dir_entry.path().is_file() {
                debug!("Skipping {}", dir_entry.path().display());
                continue;
            }

            names.push(name.to_string());
        }

        Ok(names)
    }

    pub fn entry(&self, name: &str) -> Result<WebAppEntry, RegistryError> {
        validate_name(name)?;

        let path = self.descriptor_path(name);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(RegistryError::NotFound {
                    name: name.to_string(),
                });
            }
            Err(e) => return Err(RegistryError::Read { path, source: e }),
        };

        let parsed = WebAppDesktopEntry::parse(&contents)
            .map_err(|e| RegistryError::Malformed { path, source: e })?;

        Ok(WebAppEntry {
            name: name.to_string(),
            url: parsed.url,
            icon_path: parsed.icon,
        })
    }

    /// Removes the desktop entry, then the icon if there is one.
    pub fn delete(&self, name: &str) -> Result<(), RegistryError> {
        validate_name(name)?;

        let descriptor_path = self.descriptor_path(name);
        match fs::remove_file(&descriptor_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(RegistryError::NotFound {
                    name: name.to_string(),
                });
            }
            Err(e) => {
                return Err(RegistryError::Remove {
                    path: descriptor_path,
                    source: e,
                });
            }
        }

        let icon_path = self.icon_path(name);
        match fs::remove_file(&icon_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No icon to remove at {}", icon_path.display());
            }
            Err(e) => {
                return Err(RegistryError::Remove {
                    path: icon_path,
                    source: e,
                });
            }
        }

        Ok(())
    }

    fn rollback(&self, paths: &[&PathBuf]) {
        for path in paths {
            if let Err(e) = fs::remove_file(path) {
                if e.kind() != io::ErrorKind::NotFound {
                    warn!("Unable to clean up {}: {e}", path.display());
                }
            }
        }
    }
}
