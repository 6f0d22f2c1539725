//! The tracker website: login, search and torrent download.
//!
//! Orchestration only talks to [`TrackerSite`]; [`NcoreClient`] is the
//! HTTP implementation used by the binaries.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::{Error, Result};

mod client;
mod parse;

pub use client::NcoreClient;

/// Search categories of the site, in the site's own parameter spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "hd_hun")]
    HdHun,
    #[serde(rename = "hd")]
    HdEng,
    #[serde(rename = "xvid_hun")]
    SdHun,
    #[serde(rename = "xvid")]
    SdEng,
    #[serde(rename = "dvd_hun")]
    DvdHun,
    #[serde(rename = "dvd")]
    DvdEng,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::HdHun,
        Category::HdEng,
        Category::SdHun,
        Category::SdEng,
        Category::DvdHun,
        Category::DvdEng,
    ];

    pub fn as_param(&self) -> &'static str {
        match self {
            Category::HdHun => "hd_hun",
            Category::HdEng => "hd",
            Category::SdHun => "xvid_hun",
            Category::SdEng => "xvid",
            Category::DvdHun => "dvd_hun",
            Category::DvdEng => "dvd",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_param() == s.trim())
            .ok_or_else(|| Error::Config(format!("unknown search category `{}`", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Uploaded,
    Size,
    Seeders,
    Leechers,
}

impl SortKey {
    pub fn as_param(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Uploaded => "fid",
            SortKey::Size => "size",
            SortKey::Seeders => "seeders",
            SortKey::Leechers => "leechers",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// One search request against a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchQuery<'a> {
    pub pattern: &'a str,
    pub category: Category,
    pub sort_by: SortKey,
    pub order: SortOrder,
}

/// A search hit as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TorrentRecord {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub category: Category,
    pub size: String,
    pub seeders: u64,
    pub leechers: u64,
    pub uploaded: String,
    pub url: String,
}

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Session with the tracker site.
pub trait TrackerSite {
    fn login(&mut self, credentials: &Credentials) -> Result<()>;

    fn logout(&mut self) -> Result<()>;

    /// Results come back in the site's order for the requested sort.
    fn search(&mut self, query: &SearchQuery<'_>) -> Result<Vec<TorrentRecord>>;

    /// Saves the `.torrent` for `id` inside `dest` and returns the written path.
    fn download(&mut self, id: &str, dest: &Path) -> Result<PathBuf>;
}

/// Where a download of torrent `id` lands: `<dest>/<id>.torrent`. The id is
/// percent-encoded so it can never name a path outside `dest`.
pub fn torrent_path(dest: &Path, id: &str) -> PathBuf {
    dest.join(format!("{}.torrent", urlencoding::encode(id)))
}
