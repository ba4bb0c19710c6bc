use clap::Parser;

pub mod global;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use subcommands::Commands;

/// Top-level CLI parser for the `staffdesk` binary.
#[derive(Debug, Parser)]
#[command(
    name = "staffdesk",
    version,
    about = "staffdesk - HR dashboards and employee directory"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::subcommands::{AuthCommands, LeaveCommands};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["staffdesk", "dashboard", "--format", "table", "-v"])
            .expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Dashboard));
    }

    #[test]
    fn employees_accepts_repeated_sort() {
        let cli = Cli::try_parse_from([
            "staffdesk", "employees", "--search", "ada", "--sort", "name", "--sort", "name",
            "--page", "2",
        ])
        .expect("cli should parse");
        let Commands::Employees(args) = cli.command else {
            panic!("expected employees command");
        };
        assert_eq!(args.search.as_deref(), Some("ada"));
        assert_eq!(args.sort, vec!["name", "name"]);
        assert_eq!(args.page, Some(2));
    }

    #[test]
    fn auth_and_leave_subcommands_parse() {
        let cli = Cli::try_parse_from([
            "staffdesk", "auth", "login", "--email", "hr@example.com", "--password", "pw",
        ])
        .expect("login should parse");
        assert!(matches!(
            cli.command,
            Commands::Auth {
                action: AuthCommands::Login(_)
            }
        ));

        let cli = Cli::try_parse_from([
            "staffdesk", "leave", "request", "--type", "Annual", "--start", "2026-07-01",
            "--end", "2026-07-05", "--reason", "Holiday",
        ])
        .expect("leave request should parse");
        let Commands::Leave {
            action: LeaveCommands::Request(args),
        } = cli.command
        else {
            panic!("expected leave request");
        };
        assert_eq!(args.leave_type, "Annual");
    }
}
