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

use serde::Serialize;
use std::path::PathBuf;

pub mod desktop_entry;
pub mod local_settings;
pub mod webapp_config;

/// A web app as read back from its desktop entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebAppEntry {
    pub name: String,
    pub url: String,
    pub icon_path: PathBuf,
}
