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

use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use thiserror::Error;

const GROUP_HEADER: &str = "[Desktop Entry]";
const APP_FLAG: &str = " --app=";

#[derive(Debug, Error)]
#[error("{0}")]
pub struct MalformedDesktopEntry(String);

/// The launcher file written for every web app.
///
/// Field order is fixed, desktop shells and older versions of this tool
/// parse it line by line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebAppDesktopEntry {
    pub name: String,
    pub browser: String,
    pub url: String,
    pub icon: PathBuf,
}

impl WebAppDesktopEntry {
    pub fn new(name: &str, url: &str, icon: &Path, browser: &str) -> Self {
        Self {
            name: name.to_string(),
            browser: browser.to_string(),
            url: url.to_string(),
            icon: icon.to_path_buf(),
        }
    }

    /// Literal percent signs must be doubled inside Exec, everything else is a field code.
    /// https://specifications.freedesktop.org/desktop-entry-spec/1.1/exec-variables.html
    pub fn exec_line(&self) -> String {
        format!("{}{APP_FLAG}{}", self.browser, self.url.replace('%', "%%"))
    }

    pub fn parse(contents: &str) -> Result<Self, MalformedDesktopEntry> {
        let mut in_group = false;
        let mut name = None;
        let mut exec = None;
        let mut icon = None;

        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') {
                if in_group {
                    break;
                }
                in_group = line == GROUP_HEADER;
                continue;
            }

            if !in_group {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(MalformedDesktopEntry(format!("Malformed line: {line}")));
            };

            match key.trim() {
                "Name" => name = Some(value.trim().to_string()),
                "Exec" => exec = Some(value.trim().to_string()),
                "Icon" => icon = Some(PathBuf::from(value.trim())),
                _ => {}
            }
        }

        if !in_group && name.is_none() {
            return Err(MalformedDesktopEntry(format!("Missing {GROUP_HEADER} group")));
        }

        let name = name.ok_or_else(|| MalformedDesktopEntry("Missing Name key".to_string()))?;
        let exec = exec.ok_or_else(|| MalformedDesktopEntry("Missing Exec key".to_string()))?;
        let icon = icon.ok_or_else(|| MalformedDesktopEntry("Missing Icon key".to_string()))?;

        let (browser, url) = exec.split_once(APP_FLAG).ok_or_else(|| {
            MalformedDesktopEntry(format!("Exec line is not an app mode launch: {exec}"))
        })?;

        Ok(Self {
            name,
            browser: browser.to_string(),
            url: url.replace("%%", "%"),
            icon,
        })
    }
}

impl Display for WebAppDesktopEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{GROUP_HEADER}")?;
        writeln!(f, "Name={}", self.name)?;
        writeln!(f, "Exec={}", self.exec_line())?;
        writeln!(f, "Icon={}", self.icon.display())?;
        writeln!(f, "Terminal=false")?;
        writeln!(f, "Type=Application")?;
        writeln!(f, "Categories=Utility;")
    }
}
