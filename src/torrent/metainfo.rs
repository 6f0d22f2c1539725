//! BitTorrent metainfo file access.
//!
//! A torrent file (also known as a metainfo file) is a bencoded dictionary containing:
//!
//! - `info`: Dictionary describing the content; its bencoded form identifies the torrent
//!   - `name`: Suggested filename/directory name
//! - `announce`: URL of the tracker server that coordinates peers (optional)
//! - `announce-list`: Tiers of backup tracker URLs (optional)
//!
//! Only the fields needed to build a magnet link are interpreted. The rest of the
//! tree is kept as decoded so the info dictionary re-encodes to the exact bytes
//! it was read from.

use sha1::{Digest, Sha1};
use std::fmt;
use std::path::Path;

use crate::bencode::{BValue, Bencode};
use crate::{Error, Result};

/// SHA-1 of the bencoded info dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InfoHash([u8; 20]);

impl InfoHash {
    /// Lowercase hexadecimal, as used in `urn:btih:`.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; 20]> for InfoHash {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A decoded torrent file.
#[derive(Debug, Clone, PartialEq)]
pub struct Metainfo {
    root: BValue,
}

impl Metainfo {
    /// Parse a torrent file from its raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self {
            root: Bencode::decode_bytes(bytes)?,
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            root: Bencode::decode_file(path)?,
        })
    }

    /// The info dictionary.
    pub fn info(&self) -> Result<&BValue> {
        match self.root.get(b"info") {
            Some(info) if info.as_dict().is_some() => Ok(info),
            _ => Err(Error::MissingInfoDict),
        }
    }

    /// Calculate the SHA-1 hash of the bencoded info dictionary.
    ///
    /// This hash uniquely identifies the torrent. Bytes outside `info` do not
    /// contribute to it.
    pub fn info_hash(&self) -> Result<InfoHash> {
        let encoded = Bencode::encode(self.info()?);
        let mut hasher = Sha1::new();
        hasher.update(&encoded);
        let hash: [u8; 20] = hasher.finalize().into();
        Ok(hash.into())
    }

    /// The display name, `info.name`, as text.
    pub fn name(&self) -> Result<&str> {
        let name = self.info()?.get(b"name").ok_or(Error::MissingName)?;
        let bytes = name.as_bytes().ok_or(Error::InvalidField("name"))?;
        text("name", bytes)
    }

    /// Every tracker in source order: `announce` first, then each tier of
    /// `announce-list` flattened. Duplicates are kept.
    pub fn trackers(&self) -> Result<Vec<&str>> {
        let mut trackers = Vec::new();

        if let Some(announce) = self.root.get(b"announce") {
            let bytes = announce.as_bytes().ok_or(Error::InvalidField("announce"))?;
            trackers.push(text("announce", bytes)?);
        }

        if let Some(announce_list) = self.root.get(b"announce-list") {
            let tiers = announce_list
                .as_list()
                .ok_or(Error::InvalidField("announce-list"))?;
            for tier in tiers {
                let tier = tier.as_list().ok_or(Error::InvalidField("announce-list"))?;
                for tracker in tier {
                    let bytes = tracker
                        .as_bytes()
                        .ok_or(Error::InvalidField("announce-list"))?;
                    trackers.push(text("announce-list", bytes)?);
                }
            }
        }

        Ok(trackers)
    }
}

fn text<'a>(field: &'static str, bytes: &'a [u8]) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|source| Error::Encoding { field, source })
}
