//! Category fan-out search.
//!
//! Categories are queried one after another. A failing category is logged and
//! skipped; the search only fails when login fails or every category fails.

use tracing::{debug, info, warn};

use crate::config::SearchConfig;
use crate::site::{Credentials, SearchQuery, SortKey, SortOrder, TorrentRecord, TrackerSite};
use crate::{Error, Result};

/// Merged search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Best seeded records, at most `result_limit` of them.
    pub torrents: Vec<TorrentRecord>,
    /// Number of records collected before truncation.
    pub total: usize,
}

pub fn search_torrents<S: TrackerSite + ?Sized>(
    site: &mut S,
    credentials: &Credentials,
    pattern: &str,
    config: &SearchConfig,
) -> Result<SearchOutcome> {
    site.login(credentials)?;
    let collected = collect(site, pattern, config);
    if let Err(err) = site.logout() {
        debug!(error = %err, "logout failed");
    }

    let outcome = rank(collected?, config.result_limit);
    info!(pattern, total = outcome.total, kept = outcome.torrents.len(), "search finished");
    Ok(outcome)
}

fn collect<S: TrackerSite + ?Sized>(
    site: &mut S,
    pattern: &str,
    config: &SearchConfig,
) -> Result<Vec<TorrentRecord>> {
    let mut results = Vec::new();
    let mut failures = 0;
    let mut last_error = None;

    for &category in &config.categories {
        let query = SearchQuery {
            pattern,
            category,
            sort_by: SortKey::Seeders,
            order: SortOrder::Descending,
        };
        match site.search(&query) {
            Ok(found) => {
                debug!(%category, found = found.len(), "category searched");
                results.extend(found.into_iter().take(config.per_category_limit));
            }
            Err(err) => {
                warn!(%category, error = %err, "search failed for category, skipping");
                failures += 1;
                last_error = Some(err);
            }
        }
    }

    match last_error {
        Some(err) if failures == config.categories.len() => {
            Err(Error::AllCategoriesFailed(err.to_string()))
        }
        _ => Ok(results),
    }
}

/// Orders by seeders, highest first, keeping the collection order among ties,
/// then truncates to `limit`.
pub fn rank(mut results: Vec<TorrentRecord>, limit: usize) -> SearchOutcome {
    results.sort_by(|a, b| b.seeders.cmp(&a.seeders));
    let total = results.len();
    results.truncate(limit);
    SearchOutcome {
        torrents: results,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::Category;
    use crate::testing::{record, FakeSite};

    fn config() -> SearchConfig {
        SearchConfig::default()
    }

    fn seeders(outcome: &SearchOutcome) -> Vec<u64> {
        outcome.torrents.iter().map(|t| t.seeders).collect()
    }

    #[test]
    fn test_merges_and_sorts_by_seeders() {
        let mut site = FakeSite::default()
            .with_results(Category::HdHun, vec![record("a", 3), record("b", 1), record("c", 2)])
            .with_results(Category::HdEng, vec![record("d", 9)]);

        let outcome =
            search_torrents(&mut site, &FakeSite::credentials(), "movie", &config()).unwrap();

        assert_eq!(outcome.torrents[0].seeders, 9);
        assert_eq!(seeders(&outcome), vec![9, 3, 2, 1]);
        assert_eq!(outcome.total, 4);
        assert!(site.logged_out);
    }

    #[test]
    fn test_queries_every_category_in_order_by_seeders() {
        let mut site = FakeSite::default();
        search_torrents(&mut site, &FakeSite::credentials(), "movie", &config()).unwrap();

        assert_eq!(site.searched, config().categories);
        assert!(site
            .queries
            .iter()
            .all(|q| q.0 == "movie" && q.1 == SortKey::Seeders && q.2 == SortOrder::Descending));
    }

    #[test]
    fn test_caps_per_category_and_overall() {
        let many = |prefix: &str| -> Vec<TorrentRecord> {
            (0..8).map(|i| record(&format!("{prefix}{i}"), i)).collect()
        };
        let mut site = FakeSite::default()
            .with_results(Category::HdHun, many("a"))
            .with_results(Category::HdEng, many("b"))
            .with_results(Category::SdHun, many("c"))
            .with_results(Category::SdEng, many("d"));
        let config = SearchConfig {
            result_limit: 7,
            ..config()
        };

        let outcome = search_torrents(&mut site, &FakeSite::credentials(), "x", &config).unwrap();

        assert_eq!(outcome.total, 20);
        assert_eq!(outcome.torrents.len(), 7);
        // only the first five of each category (seeders 0..=4) were kept
        assert_eq!(seeders(&outcome), vec![4, 4, 4, 4, 3, 3, 3]);
    }

    #[test]
    fn test_ties_keep_collection_order() {
        let mut site = FakeSite::default()
            .with_results(Category::HdHun, vec![record("first", 5)])
            .with_results(Category::SdEng, vec![record("second", 5)]);
        let outcome = search_torrents(&mut site, &FakeSite::credentials(), "x", &config()).unwrap();
        let ids: Vec<_> = outcome.torrents.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn test_failing_category_is_skipped() {
        let mut site = FakeSite::default()
            .with_results(Category::HdHun, vec![record("a", 1)])
            .failing_search(Category::HdEng)
            .with_results(Category::SdHun, vec![record("c", 4)]);

        let outcome = search_torrents(&mut site, &FakeSite::credentials(), "x", &config()).unwrap();

        assert_eq!(seeders(&outcome), vec![4, 1]);
        assert_eq!(site.searched.len(), 4);
    }

    #[test]
    fn test_all_categories_failing_is_an_error() {
        let mut site = FakeSite::default();
        for category in config().categories {
            site = site.failing_search(category);
        }
        let err = search_torrents(&mut site, &FakeSite::credentials(), "x", &config()).unwrap_err();
        assert!(matches!(err, Error::AllCategoriesFailed(_)));
        assert!(site.logged_out);
    }

    #[test]
    fn test_login_failure_stops_before_searching() {
        let mut site = FakeSite::default().rejecting_login();
        let err = search_torrents(&mut site, &FakeSite::credentials(), "x", &config()).unwrap_err();
        assert!(matches!(err, Error::Auth(_)));
        assert!(site.searched.is_empty());
    }

    #[test]
    fn test_empty_results_succeed() {
        let mut site = FakeSite::default();
        let outcome = search_torrents(&mut site, &FakeSite::credentials(), "x", &config()).unwrap();
        assert!(outcome.torrents.is_empty());
        assert_eq!(outcome.total, 0);
    }
}
