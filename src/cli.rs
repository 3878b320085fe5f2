//! Command-line argument parsing for plugin-agent

use clap::Parser;
use std::path::PathBuf;

/// Task asked when none is given on the command line
pub const DEFAULT_QUERY: &str =
    "What many lamports does 5Ef6TYJvEsNGFH7rhARyGgVutSRCWz5czfbNb7Wsyab own?";

/// plugin-agent - Ask an LLM agent a question it answers through a hosted AI plugin
#[derive(Parser, Debug)]
#[command(name = "plugin-agent")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Question for the agent
    #[arg(value_name = "QUERY", default_value = DEFAULT_QUERY)]
    pub query: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Hide the agent's reasoning steps
    #[arg(short, long)]
    pub quiet: bool,

    /// Maximum Thought/Action rounds
    #[arg(long, value_name = "N")]
    pub max_iterations: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default() {
        let args = Args::parse_from(["plugin-agent"]);
        assert_eq!(args.query, DEFAULT_QUERY);
        assert!(args.config.is_none());
        assert!(!args.debug);
        assert!(!args.quiet);
        assert!(args.max_iterations.is_none());
    }

    #[test]
    fn test_args_with_query() {
        let args = Args::parse_from(["plugin-agent", "What is the balance of abc?"]);
        assert_eq!(args.query, "What is the balance of abc?");
    }

    #[test]
    fn test_args_with_flags() {
        let args = Args::parse_from([
            "plugin-agent",
            "--debug",
            "--config",
            "/tmp/config.toml",
            "--max-iterations",
            "4",
        ]);
        assert!(args.debug);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/config.toml")));
        assert_eq!(args.max_iterations, Some(4));
    }
}
