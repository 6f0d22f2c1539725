use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::{Category, TorrentRecord};
use crate::{Error, Result};

const ROW: &str = "div.box_torrent";
const TITLE_LINK: &str = ".torrent_txt a, .torrent_txt2 a";
const SIZE: &str = ".box_meret2";
const SEEDERS: &str = ".box_s2";
const LEECHERS: &str = ".box_l2";
const UPLOADED: &str = ".box_feltoltve2";
const DOWNLOAD_LINK: &str = "a[href*=\"action=download\"]";

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|err| Error::Transport(format!("bad selector `{}`: {:?}", css, err)))
}

fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolves a link from a result page against the site root.
pub(crate) fn absolute_url(base_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            href.trim_start_matches('/')
        )
    }
}

/// Parses the torrent rows of a search result page. Rows without a title link
/// are skipped and counts that do not parse are reported as zero.
pub(crate) fn search_results(
    html: &str,
    category: Category,
    base_url: &str,
) -> Result<Vec<TorrentRecord>> {
    let document = Html::parse_document(html);
    let rows = selector(ROW)?;
    let title_link = selector(TITLE_LINK)?;
    let size = selector(SIZE)?;
    let seeders = selector(SEEDERS)?;
    let leechers = selector(LEECHERS)?;
    let uploaded = selector(UPLOADED)?;
    let id_pattern = Regex::new(r"id=(\d+)").map_err(|err| Error::Transport(err.to_string()))?;

    let field = |row: ElementRef<'_>, selector: &Selector| {
        row.select(selector).next().map(text_of).unwrap_or_default()
    };
    let count = |row: ElementRef<'_>, selector: &Selector| {
        field(row, selector).parse::<u64>().unwrap_or(0)
    };

    let mut records = Vec::new();
    for row in document.select(&rows) {
        let Some(link) = row.select(&title_link).next() else {
            continue;
        };
        let href = link.value().attr("href").unwrap_or_default();
        let title = link
            .value()
            .attr("title")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| text_of(link));
        let id = id_pattern
            .captures(href)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        records.push(TorrentRecord {
            id,
            title,
            category,
            size: field(row, &size),
            seeders: count(row, &seeders),
            leechers: count(row, &leechers),
            uploaded: field(row, &uploaded),
            url: absolute_url(base_url, href),
        });
    }

    debug!(%category, rows = records.len(), "parsed result page");
    Ok(records)
}

/// Finds the keyed download link on a torrent details page.
pub(crate) fn download_link(html: &str) -> Result<Option<String>> {
    let document = Html::parse_document(html);
    let link = selector(DOWNLOAD_LINK)?;
    Ok(document
        .select(&link)
        .find_map(|a| a.value().attr("href"))
        .map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://ncore.pro";

    fn row(id: u32, title: &str, seeders: &str) -> String {
        format!(
            r#"<div class="box_torrent">
                 <div class="box_nagy">
                   <div class="torrent_txt">
                     <a href="torrents.php?action=details&amp;id={id}" title="{title}"><nobr>{title}</nobr></a>
                   </div>
                 </div>
                 <div class="box_feltoltve2">2024-01-02<br>10:11:12</div>
                 <div class="box_meret2">4.37 GiB</div>
                 <div class="box_s2"><a class="torrent" href="torrents.php?action=details&amp;id={id}&amp;peers=1">{seeders}</a></div>
                 <div class="box_l2"><a class="torrent" href="torrents.php?action=details&amp;id={id}&amp;peers=1">3</a></div>
               </div>"#
        )
    }

    #[test]
    fn test_parses_rows() {
        let html = format!(
            "<html><body><div class=\"box_torrent_all\">{}{}</div></body></html>",
            row(101, "Movie.2024.1080p", "42"),
            row(102, "Movie.2024.720p", "n/a")
        );
        let records = search_results(&html, Category::HdEng, BASE).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.id, "101");
        assert_eq!(first.title, "Movie.2024.1080p");
        assert_eq!(first.category, Category::HdEng);
        assert_eq!(first.size, "4.37 GiB");
        assert_eq!(first.seeders, 42);
        assert_eq!(first.leechers, 3);
        assert_eq!(first.uploaded, "2024-01-02 10:11:12");
        assert_eq!(
            first.url,
            "https://ncore.pro/torrents.php?action=details&id=101"
        );

        assert_eq!(records[1].seeders, 0);
    }

    #[test]
    fn test_skips_rows_without_title() {
        let html = r#"<div class="box_torrent"><div class="box_s2">5</div></div>"#;
        assert!(search_results(html, Category::HdHun, BASE).unwrap().is_empty());
    }

    #[test]
    fn test_finds_download_link() {
        let html = r#"<div class="download"><a href="torrents.php?action=download&amp;id=7&amp;key=abc">Letöltés</a></div>"#;
        assert_eq!(
            download_link(html).unwrap().as_deref(),
            Some("torrents.php?action=download&id=7&key=abc")
        );
        assert_eq!(download_link("<p>nothing</p>").unwrap(), None);
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(absolute_url(BASE, "/a.php"), "https://ncore.pro/a.php");
        assert_eq!(absolute_url("https://ncore.pro/", "a.php"), "https://ncore.pro/a.php");
        assert_eq!(absolute_url(BASE, "https://x.test/a"), "https://x.test/a");
    }
}
