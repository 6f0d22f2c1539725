use reqwest::blocking::{Client, Response};
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{parse, Credentials, SearchQuery, TorrentRecord, TrackerSite};
use crate::config::SiteConfig;
use crate::{Error, Result};

#[derive(Debug, Serialize)]
struct LoginForm<'a> {
    nev: &'a str,
    pass: &'a str,
    set_lang: &'a str,
    submitted: u8,
}

#[derive(Debug, Serialize)]
struct SearchParams<'a> {
    oldal: u32,
    tipus: &'a str,
    mire: &'a str,
    miszerint: &'a str,
    hogyan: &'a str,
}

/// Blocking HTTP client for nCore. Cookies carry the session between calls.
pub struct NcoreClient {
    http: Client,
    base_url: String,
    logged_in: bool,
}

impl NcoreClient {
    pub fn new(config: &SiteConfig) -> Result<Self> {
        // Redirects are inspected by hand: a redirect to the login page means
        // the session is gone.
        let http = Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            logged_in: false,
        })
    }

    fn url(&self, path_and_query: &str) -> String {
        parse::absolute_url(&self.base_url, path_and_query)
    }

    fn ensure_logged_in(&self) -> Result<()> {
        if self.logged_in {
            Ok(())
        } else {
            Err(Error::Auth("not logged in".to_string()))
        }
    }

    fn get(&self, url: &str) -> Result<Response> {
        debug!(%url, "GET");
        let response = self.http.get(url).send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status.is_redirection() && redirects_to_login(&response) {
            return Err(Error::Auth("session expired".to_string()));
        }
        Err(Error::Transport(format!("{} returned HTTP {}", url, status)))
    }
}

fn redirects_to_login(response: &Response) -> bool {
    response
        .headers()
        .get(LOCATION)
        .and_then(|location| location.to_str().ok())
        .is_some_and(|location| location.contains("login.php"))
}

impl TrackerSite for NcoreClient {
    fn login(&mut self, credentials: &Credentials) -> Result<()> {
        let form = LoginForm {
            nev: &credentials.username,
            pass: &credentials.password,
            set_lang: "hu",
            submitted: 1,
        };
        let response = self.http.post(self.url("login.php")).form(&form).send()?;
        let status = response.status();

        let accepted = if status.is_redirection() {
            !redirects_to_login(&response)
        } else if status.is_success() {
            response.text()?.contains("logout.php")
        } else {
            return Err(Error::Transport(format!("login returned HTTP {}", status)));
        };

        if !accepted {
            return Err(Error::Auth(format!(
                "site rejected credentials for {}",
                credentials.username
            )));
        }
        info!(user = %credentials.username, "logged in");
        self.logged_in = true;
        Ok(())
    }

    fn logout(&mut self) -> Result<()> {
        if !self.logged_in {
            return Ok(());
        }
        self.logged_in = false;
        // logout.php answers with a redirect to the login page
        let response = self.http.get(self.url("logout.php")).send()?;
        debug!(status = %response.status(), "logged out");
        Ok(())
    }

    fn search(&mut self, query: &SearchQuery<'_>) -> Result<Vec<TorrentRecord>> {
        self.ensure_logged_in()?;
        let params = SearchParams {
            oldal: 1,
            tipus: query.category.as_param(),
            mire: query.pattern,
            miszerint: query.sort_by.as_param(),
            hogyan: query.order.as_param(),
        };
        let params =
            serde_urlencoded::to_string(&params).map_err(|err| Error::Transport(err.to_string()))?;

        let body = self.get(&self.url(&format!("torrents.php?{}", params)))?.text()?;
        parse::search_results(&body, query.category, &self.base_url)
    }

    fn download(&mut self, id: &str, dest: &Path) -> Result<PathBuf> {
        self.ensure_logged_in()?;
        let path = super::torrent_path(dest, id);
        let id = urlencoding::encode(id);

        let details = self
            .get(&self.url(&format!("torrents.php?action=details&id={}", id)))?
            .text()?;
        let link = match parse::download_link(&details)? {
            Some(href) => self.url(&href),
            None => self.url(&format!("torrents.php?action=download&id={}", id)),
        };

        let bytes = self.get(&link)?.bytes()?;
        // Without a valid session the site serves an HTML page instead.
        if bytes.first() != Some(&b'd') {
            return Err(Error::Transport(format!(
                "download of torrent {} did not return a torrent file",
                id
            )));
        }

        fs::write(&path, &bytes)?;
        info!(path = %path.display(), size = bytes.len(), "downloaded torrent file");
        Ok(path)
    }
}
