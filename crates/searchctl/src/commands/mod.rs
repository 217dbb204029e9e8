//! Command handlers, one module per top-level subcommand.

pub mod config_cmd;
pub mod include;
pub mod lists;
pub mod monitor;
pub mod util;

use searchctl_core::{AdminActions, ListKind, PanelConfig};

use crate::cli::{BlacklistCommand, Command, GlobalOpts, KeywordsCommand};
use crate::error::CliError;

use self::lists::ListCommand;

/// Route a backend command to its handler.
pub async fn dispatch(
    cmd: Command,
    panel: &PanelConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let client = panel.connect()?;

    match cmd {
        Command::Monitor(args) => monitor::handle(client, panel, args, global).await,
        Command::Include(args) => include::handle(&AdminActions::new(client), args, global).await,
        Command::Blacklist(args) => {
            let cmd = match args.command {
                BlacklistCommand::List => ListCommand::List,
                BlacklistCommand::Add { domain } => ListCommand::Add(domain),
                BlacklistCommand::Remove { domain } => ListCommand::Remove(domain),
            };
            lists::handle(
                &AdminActions::new(client),
                ListKind::DomainBlacklist,
                cmd,
                global,
            )
            .await
        }
        Command::Keywords(args) => {
            let cmd = match args.command {
                KeywordsCommand::List => ListCommand::List,
                KeywordsCommand::Add { keyword } => ListCommand::Add(keyword),
                KeywordsCommand::Remove { keyword } => ListCommand::Remove(keyword),
            };
            lists::handle(
                &AdminActions::new(client),
                ListKind::IllegalKeywords,
                cmd,
                global,
            )
            .await
        }
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
