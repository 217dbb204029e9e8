//! Include-domain handler.

use searchctl_core::{AdminActions, Trigger};

use crate::cli::{GlobalOpts, IncludeArgs};
use crate::error::CliError;
use crate::output;

/// Separator the backend splits the `domain` form value on.
const DOMAIN_SEPARATOR: &str = "|";

/// Join positional domains into the single value the backend expects.
fn join_domains(domains: &[String]) -> String {
    domains
        .iter()
        .map(|d| d.trim())
        .filter(|d| !d.is_empty())
        .collect::<Vec<_>>()
        .join(DOMAIN_SEPARATOR)
}

pub async fn handle(
    actions: &AdminActions,
    args: IncludeArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let value = join_domains(&args.domains);
    let feedback = actions.execute(Trigger::IncludeDomain, &value).await;
    output::finish_action(feedback, global)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domains_are_joined_with_pipe() {
        let domains = vec![" a.com ".to_string(), String::new(), "b.org|c.net".to_string()];
        assert_eq!(join_domains(&domains), "a.com|b.org|c.net");
    }
}
