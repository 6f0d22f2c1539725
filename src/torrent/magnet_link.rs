use std::fmt;
use tracing::debug;

use super::metainfo::{InfoHash, Metainfo};
use crate::Result;

/// A magnet link built from a torrent file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagnetLink {
    pub info_hash: InfoHash,
    pub name: String,
    pub trackers: Vec<String>,
}

impl MagnetLink {
    /// Builds the link from decoded metadata. Any structural problem fails the
    /// whole build.
    pub fn from_metainfo(metainfo: &Metainfo) -> Result<Self> {
        let info_hash = metainfo.info_hash()?;
        let name = metainfo.name()?.to_string();
        let trackers: Vec<String> = metainfo
            .trackers()?
            .into_iter()
            .map(str::to_string)
            .collect();
        debug!(%info_hash, %name, trackers = trackers.len(), "built magnet link");

        Ok(Self {
            info_hash,
            name,
            trackers,
        })
    }

    /// `magnet:?xt=urn:btih:<hash>&dn=<name>&tr=...` with parameters in that order.
    pub fn to_uri(&self) -> String {
        let mut uri = format!(
            "magnet:?xt=urn:btih:{}&dn={}",
            self.info_hash.to_hex(),
            urlencoding::encode(&self.name)
        );
        for tracker in &self.trackers {
            uri.push_str("&tr=");
            uri.push_str(&urlencoding::encode(tracker));
        }
        uri
    }
}

impl fmt::Display for MagnetLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}
