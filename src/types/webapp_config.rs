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

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optional user configuration, read from `config.yaml`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WebAppConfig {
    #[serde(default)]
    pub browser: Option<String>,
    #[serde(default)]
    pub applications_dir: Option<PathBuf>,
    #[serde(default)]
    pub icons_dir: Option<PathBuf>,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_max_icon_bytes")]
    pub max_icon_bytes: u64,
    #[serde(default = "default_notifications")]
    pub notifications: bool,
}

impl Default for WebAppConfig {
    fn default() -> Self {
        Self {
            browser: None,
            applications_dir: None,
            icons_dir: None,
            fetch_timeout_secs: default_fetch_timeout_secs(),
            max_icon_bytes: default_max_icon_bytes(),
            notifications: default_notifications(),
        }
    }
}

impl WebAppConfig {
    /// A missing file means defaults; a broken one is an error.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file {}", path.display()))?;

        Self::from_yaml(&content)
            .context(format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        // An empty document deserializes to unit, not to a map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let cfg: Self = serde_yaml::from_str(content).context("Invalid YAML format")?;

        if cfg.browser.as_deref().is_some_and(|b| b.trim().is_empty()) {
            return Err(anyhow::anyhow!("'browser' must not be empty"));
        }

        if cfg.fetch_timeout_secs == 0 {
            return Err(anyhow::anyhow!("'fetch_timeout_secs' must be greater than 0"));
        }

        if cfg.max_icon_bytes == 0 {
            return Err(anyhow::anyhow!("'max_icon_bytes' must be greater than 0"));
        }

        Ok(cfg)
    }
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

fn default_max_icon_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_notifications() -> bool {
    true
}
