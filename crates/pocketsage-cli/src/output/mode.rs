use crate::cli::Commands;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Import { json, .. }
        | Commands::Ask { json, .. }
        | Commands::Context { json, .. }
        | Commands::Transactions { json, .. }
        | Commands::Accounts { json }
        | Commands::Summary { json } => *json,
    };
    if json {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}

#[cfg(test)]
mod tests {
    use super::{mode_for_command, OutputMode};
    use crate::cli::parse_from;

    #[test]
    fn json_flag_switches_every_command_to_json() {
        let cases: [Vec<&str>; 4] = [
            vec!["pocketsage", "import", "rows.csv", "--json"],
            vec!["pocketsage", "context", "subscriptions?", "--json"],
            vec!["pocketsage", "accounts", "--json"],
            vec!["pocketsage", "summary", "--json"],
        ];
        for case in cases {
            let parsed = parse_from(case.clone());
            assert!(parsed.is_ok(), "failed to parse: {case:?}");
            if let Ok(cli) = parsed {
                assert_eq!(mode_for_command(&cli.command), OutputMode::Json);
            }
        }
    }

    #[test]
    fn text_is_the_default() {
        let parsed = parse_from(["pocketsage", "summary"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert_eq!(mode_for_command(&cli.command), OutputMode::Text);
        }
    }
}
