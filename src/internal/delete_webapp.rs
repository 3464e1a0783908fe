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

use crate::internal::session::Session;
use crate::utils::notifier::notify;
use anyhow::Result;
use tracing::info;

pub fn delete_webapp(session: &Session, name: &str) -> Result<()> {
    session.registry.delete(name)?;
    info!("Deleted web app {name}");

    println!("🗑️ Deleted \"{name}\"");

    if session.notifications {
        notify(&format!("\"{name}\" was removed"), "The launcher and its icon are gone", None);
    }

    Ok(())
}
