use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// mailevent - pull a calendar event out of an email
#[derive(Debug, Parser)]
#[command(name = "mailevent")]
#[command(about = "Extract a calendar event from free-form email text", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract an event from a file or standard input
    Extract {
        /// File containing the email text (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Print single-line JSON
        #[arg(long)]
        compact: bool,

        /// Print the extraction trace instead of the event
        #[arg(long)]
        trace: bool,

        /// Treat this as the current time (YYYY-MM-DDTHH:MM:SS)
        #[arg(long, value_parser = parse_now)]
        now: Option<NaiveDateTime>,
    },

    /// Paste emails interactively; an empty line runs the extraction
    #[command(alias = "repl")]
    Interactive,

    /// View or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigActions,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigActions {
    /// Print the effective configuration
    Show,
    /// Print the default configuration file path
    Path,
    /// Write a default configuration file
    Init,
}

fn parse_now(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM:SS: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_extract_flags() {
        let cli = Cli::try_parse_from([
            "mailevent",
            "extract",
            "mail.txt",
            "--compact",
            "--now",
            "2024-03-10T09:30:00",
        ])
        .unwrap();

        match cli.command {
            Commands::Extract {
                file,
                compact,
                trace,
                now,
            } => {
                assert_eq!(file, Some(PathBuf::from("mail.txt")));
                assert!(compact);
                assert!(!trace);
                assert_eq!(now.unwrap().to_string(), "2024-03-10 09:30:00");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let args = ["mailevent", "config", "show", "--config", "alt.toml"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config_file, Some(PathBuf::from("alt.toml")));
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigActions::Show
            }
        ));
    }

    #[test]
    fn test_bad_now_is_rejected() {
        let result = Cli::try_parse_from(["mailevent", "extract", "--now", "tomorrow"]);
        assert!(result.is_err());
    }
}
