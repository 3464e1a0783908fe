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
use anyhow::{Context, Result};
use tracing::warn;

/// Registry order is whatever the file system gives, sort for display.
pub fn sorted_names(session: &Session) -> Result<Vec<String>> {
    let mut names = session
        .registry
        .list()
        .context("Failed to list web apps")?;
    names.sort_by_key(|name| name.to_lowercase());
    Ok(names)
}

pub fn list_webapps(session: &Session, details: bool) -> Result<Vec<String>> {
    let names = sorted_names(session)?;

    if names.is_empty() {
        println!("No web apps found 😢");
        return Ok(names);
    }

    if !details {
        println!("📦 Your web apps:");
        for name in &names {
            println!(" - {name}");
        }
        return Ok(names);
    }

    let mut entries = Vec::with_capacity(names.len());
    for name in &names {
        match session.registry.entry(name) {
            Ok(entry) => entries.push(entry),
            Err(e) => warn!("Skipping {name}: {e}"),
        }
    }

    let yaml = serde_yaml::to_string(&entries).context("Failed to serialize web apps")?;
    print!("{yaml}");

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::test_support::{PNG_BYTES, StubFetcher, TestRegistry};

    #[test]
    fn test_empty_registry_lists_nothing() {
        let t = TestRegistry::new();
        let fetcher = StubFetcher::failing();
        let session = Session {
            registry: &t.registry,
            fetcher: &fetcher,
            notifications: false,
        };

        assert!(list_webapps(&session, false).unwrap().is_empty());
    }

    #[test]
    fn test_names_are_sorted_case_insensitively() {
        let t = TestRegistry::new();
        for name in ["mail", "Chat", "agenda"] {
            t.registry
                .create(name, "https://x.example.com", PNG_BYTES)
                .unwrap();
        }
        let fetcher = StubFetcher::failing();
        let session = Session {
            registry: &t.registry,
            fetcher: &fetcher,
            notifications: false,
        };

        assert_eq!(
            list_webapps(&session, false).unwrap(),
            vec!["agenda", "Chat", "mail"]
        );
    }

    #[test]
    fn test_details_skip_malformed_entries() {
        let t = TestRegistry::new();
        t.registry
            .create("good", "https://good.example.com", PNG_BYTES)
            .unwrap();
        std::fs::write(t.registry.descriptor_path("broken"), "junk").unwrap();
        let fetcher = StubFetcher::failing();
        let session = Session {
            registry: &t.registry,
            fetcher: &fetcher,
            notifications: false,
        };

        assert_eq!(
            list_webapps(&session, true).unwrap(),
            vec!["broken", "good"]
        );
    }
}
