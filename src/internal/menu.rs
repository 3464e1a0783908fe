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

use crate::internal::create_webapp::{CreateRequest, check_available, create_webapp};
use crate::internal::delete_webapp::delete_webapp;
use crate::internal::list_webapps::{list_webapps, sorted_names};
use crate::internal::session::Session;
use anyhow::{Context, Result};
use dialoguer::{Confirm, Input, Select};
use tracing::debug;

const MAIN_PROMPT: &str = "What do you want to do?";

/// Everything the menu asks the user goes through here.
pub trait Prompter {
    /// `None` when the user backs out (Esc / q).
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<Option<usize>>;
    fn input(&mut self, prompt: &str) -> Result<String>;
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<Option<usize>> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()
            .context("Unable to read the selection")
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .context("Unable to read the answer")
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .context("Unable to read the confirmation")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum MenuAction {
    Create,
    Delete,
    List,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 4] = [Self::Create, Self::Delete, Self::List, Self::Quit];

    fn label(self) -> &'static str {
        match self {
            Self::Create => "Create Web App",
            Self::Delete => "Delete Web App",
            Self::List => "List Web Apps",
            Self::Quit => "Quit",
        }
    }
}

/// Runs until the user quits. Command failures are printed and the menu comes back.
pub fn run_menu(session: &Session, prompter: &mut dyn Prompter) -> Result<()> {
    let labels: Vec<String> = MenuAction::ALL
        .iter()
        .map(|a| a.label().to_string())
        .collect();

    loop {
        let action = prompter
            .select(MAIN_PROMPT, &labels)?
            .and_then(|i| MenuAction::ALL.get(i).copied())
            .unwrap_or(MenuAction::Quit);
        debug!("Menu action: {action:?}");

        let outcome = match action {
            MenuAction::Create => create_interactive(session, prompter),
            MenuAction::Delete => delete_interactive(session, prompter),
            MenuAction::List => list_webapps(session, false).map(|_| ()),
            MenuAction::Quit => return Ok(()),
        };

        if let Err(e) = outcome {
            eprintln!("❌ {e:#}");
        }
    }
}

fn create_interactive(session: &Session, prompter: &mut dyn Prompter) -> Result<()> {
    let name = prompter.input("App Name:")?;
    let name = name.trim();
    check_available(session, name)?;

    let url = prompter.input("App URL:")?;
    let icon_url = prompter.input("Icon URL (PNG recommended):")?;

    let request = CreateRequest {
        name: name.to_string(),
        url,
        icon_url,
    };
    create_webapp(session, &request)?;

    Ok(())
}

fn delete_interactive(session: &Session, prompter: &mut dyn Prompter) -> Result<()> {
    let names = sorted_names(session)?;
    if names.is_empty() {
        println!("No web apps found 😢");
        return Ok(());
    }

    let Some(index) = prompter.select("Select app to delete:", &names)? else {
        return Ok(());
    };
    let name = &names[index];

    if !prompter.confirm(&format!("Are you sure you want to delete \"{name}\"?"))? {
        return Ok(());
    }

    delete_webapp(session, name)
}
