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

use crate::internal::registry::Registry;
use crate::types::webapp_config::WebAppConfig;
use crate::utils::browser_detector::get_browser_executable;
use anyhow::{Context, anyhow};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug)]
pub struct WebAppLocalSettings {
    pub home_dir: PathBuf,
    pub config_file: PathBuf,
    pub desktop_entries_dir: PathBuf,
    pub icons_dir: PathBuf,
    pub browser: String,
    pub fetch_timeout: Duration,
    pub max_icon_bytes: u64,
    pub notifications: bool,
}

impl WebAppLocalSettings {
    /// Resolves everything once at startup. `config_override` replaces the default config path.
    pub fn load(config_override: Option<&Path>) -> anyhow::Result<Self> {
        let home_dir = dirs::home_dir().context("Unable to determine the home directory")?;
        let config_file = match config_override {
            Some(path) => path.to_path_buf(),
            None => home_dir.join(".config").join("webapps").join("config.yaml"),
        };
        let config = WebAppConfig::load(&config_file)?;

        let mut settings = Self::from_config(home_dir, config_file, config);
        if settings.browser.is_empty() {
            settings.browser = get_browser_executable().to_string();
        }

        Ok(settings)
    }

    /// Leaves `browser` empty when the config does not name one.
    pub fn from_config(home_dir: PathBuf, config_file: PathBuf, config: WebAppConfig) -> Self {
        let desktop_entries_dir = match &config.applications_dir {
            Some(dir) => resolve_against_home(&home_dir, dir),
            None => home_dir.join(".local").join("share").join("applications"),
        };
        let icons_dir = match &config.icons_dir {
            Some(dir) => resolve_against_home(&home_dir, dir),
            None => home_dir
                .join(".local")
                .join("share")
                .join("icons")
                .join("webapps"),
        };

        Self {
            config_file,
            desktop_entries_dir,
            icons_dir,
            browser: config.browser.unwrap_or_default(),
            fetch_timeout: Duration::from_secs(config.fetch_timeout_secs),
            max_icon_bytes: config.max_icon_bytes,
            notifications: config.notifications,
            home_dir,
        }
    }

    pub fn ensure_dirs(&self) -> anyhow::Result<()> {
        if !self.home_dir.is_dir() {
            return Err(anyhow!(
                "Home directory does not exist: {}",
                self.home_dir.display()
            ));
        }

        for dir in [&self.desktop_entries_dir, &self.icons_dir] {
            std::fs::create_dir_all(dir)
                .context(format!("Unable to create directory {}", dir.display()))?;
        }

        Ok(())
    }

    pub fn registry(&self) -> Registry {
        Registry::new(
            self.desktop_entries_dir.clone(),
            self.icons_dir.clone(),
            self.browser.clone(),
        )
    }
}

fn resolve_against_home(home_dir: &Path, dir: &Path) -> PathBuf {
    if let Ok(rest) = dir.strip_prefix("~") {
        return home_dir.join(rest);
    }

    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        home_dir.join(dir)
    }
}
