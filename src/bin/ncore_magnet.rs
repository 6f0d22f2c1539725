use std::process::ExitCode;
use tracing::info;

use ncore_tools::cli::{self, MagnetArgs, MAGNET_USAGE};
use ncore_tools::config::Config;
use ncore_tools::magnet::fetch_magnet;
use ncore_tools::report::{print_report, MagnetReport, UsageReport};
use ncore_tools::site::NcoreClient;
use ncore_tools::torrent::MagnetLink;

// Usage: ncore-magnet <torrent_id> <username> <password>
fn main() -> anyhow::Result<ExitCode> {
    cli::init_tracing();

    let args: MagnetArgs = match cli::parse_args(std::env::args_os(), MAGNET_USAGE) {
        Ok(args) => args,
        Err(err) => {
            print_report(&UsageReport::new(err.to_string()))?;
            return Ok(ExitCode::FAILURE);
        }
    };
    info!(torrent_id = %args.torrent_id, "fetching magnet link");

    print_report(&MagnetReport::from(run(&args)))?;
    Ok(ExitCode::SUCCESS)
}

fn run(args: &MagnetArgs) -> ncore_tools::Result<MagnetLink> {
    let config = Config::from_env()?;
    let mut client = NcoreClient::new(&config.site)?;
    fetch_magnet(&mut client, &args.credentials(), &args.torrent_id)
}
