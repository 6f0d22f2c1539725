//! Torrent download and conversion to a magnet link.

use std::path::Path;
use tracing::{debug, info};

use crate::site::{Credentials, TrackerSite};
use crate::torrent::{MagnetLink, Metainfo};
use crate::Result;

const SCRATCH_PREFIX: &str = "ncore-magnet-";

/// Logs in, downloads the torrent `torrent_id` into a scratch directory and
/// builds its magnet link. The scratch directory is gone when this returns,
/// whatever the outcome.
pub fn fetch_magnet<S: TrackerSite + ?Sized>(
    site: &mut S,
    credentials: &Credentials,
    torrent_id: &str,
) -> Result<MagnetLink> {
    site.login(credentials)?;
    let magnet = download_and_convert(site, torrent_id);
    if let Err(err) = site.logout() {
        debug!(error = %err, "logout failed");
    }

    let magnet = magnet?;
    info!(torrent_id, info_hash = %magnet.info_hash, "magnet link ready");
    Ok(magnet)
}

fn download_and_convert<S: TrackerSite + ?Sized>(
    site: &mut S,
    torrent_id: &str,
) -> Result<MagnetLink> {
    // Dropping the TempDir on unwind removes it as well.
    let scratch = tempfile::Builder::new()
        .prefix(SCRATCH_PREFIX)
        .tempdir()?;
    let magnet = convert_in(site, torrent_id, scratch.path());

    let dir = scratch.path().to_path_buf();
    if let Err(err) = scratch.close() {
        debug!(dir = %dir.display(), error = %err, "could not remove scratch directory");
    }
    magnet
}

fn convert_in<S: TrackerSite + ?Sized>(
    site: &mut S,
    torrent_id: &str,
    dir: &Path,
) -> Result<MagnetLink> {
    let path = site.download(torrent_id, dir)?;
    let metainfo = Metainfo::from_file(&path)?;
    MagnetLink::from_metainfo(&metainfo)
}
