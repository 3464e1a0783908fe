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

use crate::internal::registry::{RegistryError, validate_name, validate_url};
use crate::internal::session::Session;
use crate::utils::notifier::notify;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct CreateRequest {
    pub name: String,
    pub url: String,
    pub icon_url: String,
}

/// Fails early on a taken name so nothing gets downloaded for nothing.
pub fn check_available(session: &Session, name: &str) -> Result<()> {
    validate_name(name)?;

    if session.registry.exists(name) {
        return Err(RegistryError::Collision {
            name: name.to_string(),
        }
        .into());
    }

    Ok(())
}

pub fn create_webapp(session: &Session, request: &CreateRequest) -> Result<PathBuf> {
    let name = request.name.trim();
    let url = request.url.trim();
    let icon_url = request.icon_url.trim();

    check_available(session, name)?;
    validate_url(url)?;

    let icon_bytes = session
        .fetcher
        .fetch(icon_url)
        .context(format!("Unable to download the icon for \"{name}\""))?;

    let icon_path = session.registry.create(name, url, &icon_bytes)?;
    info!("Created web app {name} for {url}");

    println!("✨ Created web app \"{name}\" with downloaded icon!");

    if session.notifications {
        notify(
            &format!("\"{name}\" is ready"),
            "It now shows up with your other applications",
            Some(icon_path.as_path()),
        );
    }

    Ok(icon_path)
}
