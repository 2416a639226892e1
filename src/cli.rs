use clap::{Args, Parser, Subcommand};

use crate::metadata::{PKG_DESCRIPTION, PKG_NAME, PKG_VERSION};
use crate::types::{Dedication, Experience, Timeframe};

#[derive(Parser, Debug, Clone)]
#[command(name = PKG_NAME)]
#[command(version = PKG_VERSION)]
#[command(about = PKG_DESCRIPTION, long_about = None)]
pub struct Cli {
    /// Gemini API key; falls back to the stored key when omitted
    #[arg(long, env = "GEMINI_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the interactive session (default when no command is given)
    Interactive,
    /// Generate a roadmap from flags and print it
    Generate(GenerateArgs),
    /// List saved roadmaps
    List,
    /// Print one saved roadmap by id
    Show(ShowArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// What you want to learn
    #[arg(long)]
    pub goal: String,

    /// Total timeframe for the roadmap
    #[arg(long, value_enum)]
    pub timeframe: Option<Timeframe>,

    /// Current experience level
    #[arg(long, value_enum)]
    pub experience: Option<Experience>,

    /// Time you can dedicate
    #[arg(long, value_enum)]
    pub dedication: Option<Dedication>,

    /// Also append the result to the saved roadmap list
    #[arg(long, default_value_t = false)]
    pub save: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Saved roadmap id (see `list`)
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_args_parse_with_enum_values() {
        let cli = Cli::try_parse_from([
            "skillpath",
            "generate",
            "--goal",
            "rust",
            "--timeframe",
            "six-months",
            "--experience",
            "advanced",
            "--dedication",
            "weekends-only",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Generate(args)) => {
                assert_eq!(args.goal, "rust");
                assert_eq!(args.timeframe, Some(Timeframe::SixMonths));
                assert_eq!(args.experience, Some(Experience::Advanced));
                assert_eq!(args.dedication, Some(Dedication::WeekendsOnly));
                assert!(!args.save);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["skillpath"]).unwrap();
        assert!(cli.command.is_none());
    }
}
