//! Domain blacklist and illegal keyword handlers.
//!
//! Both lists share one shape: list, add through the form trigger, and
//! remove by value after confirming the entry exists.

use searchctl_core::{AdminActions, ListKind, ListTable, Trigger};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Debug)]
pub enum ListCommand {
    List,
    Add(String),
    Remove(String),
}

fn add_trigger(kind: ListKind) -> Trigger {
    match kind {
        ListKind::DomainBlacklist => Trigger::BlacklistDomain,
        ListKind::IllegalKeywords => Trigger::AddKeyword,
    }
}

/// Subcommand that manages `kind`.
fn subcommand(kind: ListKind) -> &'static str {
    match kind {
        ListKind::DomainBlacklist => "blacklist",
        ListKind::IllegalKeywords => "keywords",
    }
}

fn render(table: &ListTable, global: &GlobalOpts) -> Result<String, CliError> {
    let values: Vec<&str> = table.rows.iter().map(|r| r.value.as_str()).collect();
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|r| vec![(r.key + 1).to_string(), r.value.clone()])
        .collect();
    output::render_grid(
        &global.output,
        &values,
        &["#", table.kind.entry_label()],
        &rows,
        || values.iter().map(ToString::to_string).collect(),
    )
}

async fn fetch(actions: &AdminActions, kind: ListKind) -> Result<ListTable, CliError> {
    actions
        .refresh_list(kind)
        .await
        .map_err(|feedback| CliError::ActionFailed {
            message: feedback.message,
        })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    actions: &AdminActions,
    kind: ListKind,
    cmd: ListCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        ListCommand::List => {
            let table = fetch(actions, kind).await?;
            let out = render(&table, global)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ListCommand::Add(value) => {
            let feedback = actions.execute(add_trigger(kind), &value).await;
            output::finish_action(feedback, global)
        }

        ListCommand::Remove(value) => {
            let wanted = value.trim();
            let table = fetch(actions, kind).await?;
            let Some(row) = table.rows.iter().find(|r| r.value == wanted) else {
                return Err(CliError::NotFound {
                    resource_type: kind.entry_label().into(),
                    identifier: wanted.into(),
                    list_command: format!("{} list", subcommand(kind)),
                });
            };

            let prompt = format!("Remove {} '{}'?", kind.entry_label().to_lowercase(), row.value);
            if !util::confirm(&prompt, &format!("{} remove", subcommand(kind)), global.yes)? {
                return Ok(());
            }

            let outcome = actions.delete_entry(kind, row).await;
            output::finish_action(outcome.feedback, global)?;

            match outcome.refreshed {
                Some(Ok(table)) => {
                    let out = render(&table, global)?;
                    output::print_output(&out, global.quiet);
                }
                Some(Err(feedback)) => {
                    tracing::warn!(message = feedback.message, "list refresh after delete failed");
                }
                None => {}
            }
            Ok(())
        }
    }
}
