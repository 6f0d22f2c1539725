use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use tracing_subscriber::EnvFilter;

use crate::site::Credentials;
use crate::{Error, Result};

pub const SEARCH_USAGE: &str = "Usage: ncore-search <query> <username> <password>";
pub const MAGNET_USAGE: &str = "Usage: ncore-magnet <torrent_id> <username> <password>";

/// Search nCore and print the best seeded torrents as JSON
#[derive(Parser, Debug)]
#[command(name = "ncore-search", author, version, about)]
pub struct SearchArgs {
    /// Title to search for
    #[arg(allow_hyphen_values = true)]
    pub query: String,
    /// nCore user name
    #[arg(allow_hyphen_values = true)]
    pub username: String,
    /// nCore password
    #[arg(allow_hyphen_values = true)]
    pub password: String,
    #[arg(hide = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,
}

/// Download a torrent from nCore and print its magnet link as JSON
#[derive(Parser, Debug)]
#[command(name = "ncore-magnet", author, version, about)]
pub struct MagnetArgs {
    /// nCore torrent id
    #[arg(allow_hyphen_values = true)]
    pub torrent_id: String,
    /// nCore user name
    #[arg(allow_hyphen_values = true)]
    pub username: String,
    /// nCore password
    #[arg(allow_hyphen_values = true)]
    pub password: String,
    #[arg(hide = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,
}

impl SearchArgs {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

impl MagnetArgs {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// Parses `args` (program name first). Help and version requests print and
/// exit as usual; anything else that does not parse becomes [`Error::Usage`].
pub fn parse_args<T, I, A>(args: I, usage: &str) -> Result<T>
where
    T: Parser,
    I: IntoIterator<Item = A>,
    A: Into<OsString> + Clone,
{
    T::try_parse_from(args).map_err(|err| match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        _ => Error::Usage(usage.to_string()),
    })
}

/// Logs go to stderr so stdout only ever carries the JSON report.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
