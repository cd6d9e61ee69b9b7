use std::{env, io, process::ExitCode};

use clap::Parser;
use log::debug;
use repo_stats::{
    AccessToken, Client,
    cli::{Cli, Command},
    config::{self, Settings},
    logging, report,
};

fn run(cli: Cli) -> anyhow::Result<()> {
    let (file_config, loaded_from) = config::load(cli.config.as_deref())?;
    let settings = Settings::merge(cli.overrides(), env::var("GITHUB_TOKEN").ok(), file_config);
    logging::init(settings.verbose);
    match loaded_from {
        Some(path) => debug!("using config file {}", path.display()),
        None => debug!("no config file found"),
    }

    match cli.command {
        Command::Get(args) => {
            let target = args.target()?;
            debug!("reporting for {target} via {}", settings.api_url);
            let token = AccessToken::new(settings.access_token)?;
            let client = Client::new(&settings.api_url, token)?;
            report(&client, &target, args.page_options(), &mut io::stdout().lock())?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
