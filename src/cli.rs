use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    Result,
    config::Overrides,
    paginate::{DEFAULT_MAX_PAGES, DEFAULT_PER_PAGE, PageOptions},
    target::RepoTarget,
};

/// Get some useful statistics from GitHub.
#[derive(Debug, Parser)]
#[command(name = "repo-stats", version)]
pub struct Cli {
    /// Config file (default is $HOME/.repo-stats.json)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Access token used to authenticate against GitHub's API
    #[arg(long, global = true, value_name = "TOKEN")]
    pub access_token: Option<String>,

    /// Base url of the GitHub API
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Get statistics of a repository OWNER/REPO
    Get(GetArgs),
}

#[derive(Debug, Args)]
pub struct GetArgs {
    #[arg(value_name = "OWNER/REPO")]
    pub target: String,

    /// Closed issues requested per page
    #[arg(long, default_value_t = DEFAULT_PER_PAGE, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub per_page: u32,

    /// Give up after this many pages of closed issues
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_pages: u32,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            access_token: self.access_token.clone(),
            verbose: self.verbose,
            api_url: self.api_url.clone(),
        }
    }
}

impl GetArgs {
    /// Validated separately from clap so a bad target is reported like
    /// every other input error.
    pub fn target(&self) -> Result<RepoTarget> {
        self.target.parse()
    }

    pub fn page_options(&self) -> PageOptions {
        PageOptions { per_page: self.per_page, max_pages: self.max_pages }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, error::ErrorKind};

    use super::*;
    use crate::Error;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_get_with_defaults() {
        let cli = Cli::try_parse_from(["repo-stats", "get", "projectatomic/atomicapp"]).unwrap();
        let Command::Get(args) = &cli.command;
        assert_eq!(args.target().unwrap(), RepoTarget::new("projectatomic", "atomicapp"));
        assert_eq!(args.page_options(), PageOptions::default());
        assert_eq!(cli.overrides(), Overrides::default());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "repo-stats",
            "get",
            "a/b",
            "-v",
            "--access-token",
            "ghp_abc",
            "--per-page",
            "100",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.access_token.as_deref(), Some("ghp_abc"));
        let Command::Get(args) = &cli.command;
        assert_eq!(args.per_page, 100);
    }

    #[test]
    fn malformed_target_is_left_to_target_validation() {
        for input in ["atomicapp", "octocat/Hello-World#x"] {
            let cli = Cli::try_parse_from(["repo-stats", "get", input]).unwrap();
            let Command::Get(args) = &cli.command;
            assert!(matches!(args.target(), Err(Error::InvalidTarget(ref s)) if s == input));
        }
    }

    #[test]
    fn rejects_out_of_range_page_size() {
        for size in ["0", "101"] {
            let err =
                Cli::try_parse_from(["repo-stats", "get", "a/b", "--per-page", size]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueValidation);
        }
    }

    #[test]
    fn requires_a_target() {
        let err = Cli::try_parse_from(["repo-stats", "get"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }
}
