//! In-memory [`TrackerSite`] for orchestration tests.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::site::{
    Category, Credentials, SearchQuery, SortKey, SortOrder, TorrentRecord, TrackerSite,
};
use crate::{Error, Result};

pub(crate) fn record(id: &str, seeders: u64) -> TorrentRecord {
    TorrentRecord {
        id: id.to_string(),
        title: format!("Title {}", id),
        category: Category::HdHun,
        size: "1.00 GiB".to_string(),
        seeders,
        leechers: 0,
        uploaded: "2024-01-01 00:00:00".to_string(),
        url: format!("https://ncore.pro/torrents.php?action=details&id={}", id),
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeSite {
    results: HashMap<Category, Vec<TorrentRecord>>,
    failing: HashSet<Category>,
    reject_login: bool,
    torrent: Option<Vec<u8>>,
    pub logged_out: bool,
    pub searched: Vec<Category>,
    pub queries: Vec<(String, SortKey, SortOrder)>,
    pub downloaded: Option<String>,
    pub download_dir: Option<PathBuf>,
    pub written: Option<PathBuf>,
}

impl FakeSite {
    pub fn credentials() -> Credentials {
        Credentials {
            username: "user".to_string(),
            password: "secret".to_string(),
        }
    }

    pub fn with_results(mut self, category: Category, records: Vec<TorrentRecord>) -> Self {
        self.results.insert(category, records);
        self
    }

    pub fn failing_search(mut self, category: Category) -> Self {
        self.failing.insert(category);
        self
    }

    pub fn rejecting_login(mut self) -> Self {
        self.reject_login = true;
        self
    }

    pub fn serving(mut self, torrent: &[u8]) -> Self {
        self.torrent = Some(torrent.to_vec());
        self
    }
}

impl TrackerSite for FakeSite {
    fn login(&mut self, _credentials: &Credentials) -> Result<()> {
        if self.reject_login {
            return Err(Error::Auth("bad credentials".to_string()));
        }
        Ok(())
    }

    fn logout(&mut self) -> Result<()> {
        self.logged_out = true;
        Err(Error::Transport("logout is flaky".to_string()))
    }

    fn search(&mut self, query: &SearchQuery<'_>) -> Result<Vec<TorrentRecord>> {
        self.searched.push(query.category);
        self.queries
            .push((query.pattern.to_string(), query.sort_by, query.order));
        if self.failing.contains(&query.category) {
            return Err(Error::Transport(format!("{} is down", query.category)));
        }
        Ok(self.results.get(&query.category).cloned().unwrap_or_default())
    }

    fn download(&mut self, id: &str, dest: &Path) -> Result<PathBuf> {
        self.download_dir = Some(dest.to_path_buf());
        let torrent = self
            .torrent
            .as_ref()
            .ok_or_else(|| Error::Transport(format!("torrent {} not found", id)))?;
        self.downloaded = Some(id.to_string());
        let path = crate::site::torrent_path(dest, id);
        fs::write(&path, torrent)?;
        self.written = Some(path.clone());
        Ok(path)
    }
}
