use std::process::ExitCode;
use tracing::info;

use ncore_tools::cli::{self, SearchArgs, SEARCH_USAGE};
use ncore_tools::config::Config;
use ncore_tools::report::{print_report, SearchReport, UsageReport};
use ncore_tools::search::{search_torrents, SearchOutcome};
use ncore_tools::site::NcoreClient;

// Usage: ncore-search <query> <username> <password>
fn main() -> anyhow::Result<ExitCode> {
    cli::init_tracing();

    let args: SearchArgs = match cli::parse_args(std::env::args_os(), SEARCH_USAGE) {
        Ok(args) => args,
        Err(err) => {
            print_report(&UsageReport::new(err.to_string()))?;
            return Ok(ExitCode::FAILURE);
        }
    };
    info!(query = %args.query, "searching");

    print_report(&SearchReport::from(run(&args)))?;
    Ok(ExitCode::SUCCESS)
}

fn run(args: &SearchArgs) -> ncore_tools::Result<SearchOutcome> {
    let config = Config::from_env()?;
    let mut client = NcoreClient::new(&config.site)?;
    search_torrents(&mut client, &args.credentials(), &args.query, &config.search)
}
