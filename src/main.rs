mod internal;
mod types;
mod utils;

use crate::internal::create_webapp::{CreateRequest, create_webapp};
use crate::internal::delete_webapp::delete_webapp;
use crate::internal::fetch::HttpIconFetcher;
use crate::internal::list_webapps::list_webapps;
use crate::internal::menu::{Prompter, TerminalPrompter, run_menu};
use crate::internal::session::Session;
use crate::types::local_settings::WebAppLocalSettings;
use crate::utils::logger;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum CliAction {
    #[value(alias = "m")]
    Menu,
    #[value(alias = "c")]
    Create,
    #[value(alias = "d", alias = "rm")]
    Delete,
    #[value(alias = "ls")]
    List,
}

#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[arg(value_enum, default_value_t = CliAction::Menu)]
    action: CliAction,

    /// Name of the web app, also used for its file names
    #[arg(required_if_eq_any([
        ("action", "create"),
        ("action", "c"),
        ("action", "delete"),
        ("action", "d"),
        ("action", "rm"),
    ]))]
    name: Option<String>,

    /// Address opened by the launcher
    #[arg(long, required_if_eq_any([("action", "create"), ("action", "c")]))]
    url: Option<String>,

    /// Where to download the icon from (PNG recommended)
    #[arg(long, required_if_eq_any([("action", "create"), ("action", "c")]))]
    icon_url: Option<String>,

    /// Delete without asking for confirmation
    #[arg(short, long)]
    yes: bool,

    /// List URLs and icon paths too
    #[arg(long)]
    details: bool,

    /// Config file to use instead of ~/.config/webapps/config.yaml
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    logger::init(args.debug);

    debug!("Args: {args:?}");

    let settings = WebAppLocalSettings::load(args.config.as_deref())?;
    settings.ensure_dirs()?;

    debug!("Using config file {}", settings.config_file.display());
    debug!("Settings: {settings:?}");

    let registry = settings.registry();
    let fetcher = HttpIconFetcher::new(settings.fetch_timeout, settings.max_icon_bytes)?;
    let session = Session {
        registry: &registry,
        fetcher: &fetcher,
        notifications: settings.notifications,
    };

    match args.action {
        CliAction::Menu => run_menu(&session, &mut TerminalPrompter)?,
        CliAction::Create => {
            let request = CreateRequest {
                name: args.name.context("A name is required")?,
                url: args.url.context("--url is required")?,
                icon_url: args.icon_url.context("--icon-url is required")?,
            };
            create_webapp(&session, &request)?;
        }
        CliAction::Delete => {
            let name = args.name.context("A name is required")?;
            let confirmed = args.yes
                || TerminalPrompter
                    .confirm(&format!("Are you sure you want to delete \"{name}\"?"))?;

            if confirmed {
                delete_webapp(&session, &name)?;
            }
        }
        CliAction::List => {
            list_webapps(&session, args.details)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_menu_is_default() {
        let cli = Cli::try_parse_from(["webapps"]).unwrap();
        assert_eq!(cli.action, CliAction::Menu);
    }

    #[test]
    fn test_create_requires_url_and_icon() {
        assert!(Cli::try_parse_from(["webapps", "create", "news"]).is_err());

        let cli = Cli::try_parse_from([
            "webapps",
            "create",
            "news",
            "--url",
            "https://news.example.com",
            "--icon-url",
            "https://news.example.com/icon.png",
        ])
        .unwrap();
        assert_eq!(cli.action, CliAction::Create);
        assert_eq!(cli.name.as_deref(), Some("news"));
    }

    #[test]
    fn test_delete_alias_requires_name() {
        assert!(Cli::try_parse_from(["webapps", "rm"]).is_err());

        let cli = Cli::try_parse_from(["webapps", "rm", "news", "--yes"]).unwrap();
        assert_eq!(cli.action, CliAction::Delete);
        assert!(cli.yes);
    }

    #[test]
    fn test_list_details() {
        let cli = Cli::try_parse_from(["webapps", "ls", "--details"]).unwrap();
        assert_eq!(cli.action, CliAction::List);
        assert!(cli.details);
    }
}
