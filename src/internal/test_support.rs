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

//! Shared fixtures for unit tests.

use crate::internal::fetch::{FetchError, IconFetcher};
use crate::internal::menu::Prompter;
use crate::internal::registry::Registry;
use anyhow::anyhow;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

pub struct TestRegistry {
    _temp_dir: TempDir,
    apps: PathBuf,
    icons: PathBuf,
    pub registry: Registry,
}

impl TestRegistry {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let apps = temp_dir.path().join("applications");
        let icons = temp_dir.path().join("icons");
        std::fs::create_dir_all(&apps).unwrap();
        std::fs::create_dir_all(&icons).unwrap();

        Self {
            registry: Registry::new(apps.clone(), icons.clone(), "test-browser".to_string()),
            apps,
            icons,
            _temp_dir: temp_dir,
        }
    }

    pub fn applications_dir(&self) -> &Path {
        &self.apps
    }

    pub fn icons_dir(&self) -> &Path {
        &self.icons
    }
}

/// Returns the same bytes for every URL, or fails every time.
pub struct StubFetcher {
    pub bytes: Option<Vec<u8>>,
    pub calls: RefCell<Vec<String>>,
}

impl StubFetcher {
    pub fn ok(bytes: &[u8]) -> Self {
        Self {
            bytes: Some(bytes.to_vec()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            bytes: None,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl IconFetcher for StubFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.calls.borrow_mut().push(url.to_string());
        match &self.bytes {
            Some(bytes) => Ok(bytes.clone()),
            None => Err(FetchError::Empty {
                url: url.to_string(),
            }),
        }
    }
}

#[derive(Debug)]
pub enum Answer {
    Select(Option<usize>),
    Input(&'static str),
    Confirm(bool),
}

/// Plays back answers in order, fails when the script runs out.
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    pub prompts: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: answers.into(),
            prompts: Vec::new(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.answers.is_empty()
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, prompt: &str, _items: &[String]) -> anyhow::Result<Option<usize>> {
        self.prompts.push(prompt.to_string());
        match self.answers.pop_front() {
            Some(Answer::Select(choice)) => Ok(choice),
            other => Err(anyhow!("Unexpected select for {prompt:?}, script had {other:?}")),
        }
    }

    fn input(&mut self, prompt: &str) -> anyhow::Result<String> {
        self.prompts.push(prompt.to_string());
        match self.answers.pop_front() {
            Some(Answer::Input(text)) => Ok(text.to_string()),
            other => Err(anyhow!("Unexpected input for {prompt:?}, script had {other:?}")),
        }
    }

    fn confirm(&mut self, prompt: &str) -> anyhow::Result<bool> {
        self.prompts.push(prompt.to_string());
        match self.answers.pop_front() {
            Some(Answer::Confirm(yes)) => Ok(yes),
            other => Err(anyhow!("Unexpected confirm for {prompt:?}, script had {other:?}")),
        }
    }
}
