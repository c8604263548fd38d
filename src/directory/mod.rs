/// Fuzzy name resolution.
pub mod matching;
/// Ranking-table and news-page extraction.
pub mod scrape;

use std::time::{Duration, Instant};

/// One row of the ranking table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    /// Canonical display name.
    pub name: String,
    /// Numeric rank from the source, or row order when the source has none.
    pub rank: u32,
    /// Stat column name -> raw string value, in source column order.
    pub stats: Vec<(String, String)>,
}

impl PlayerRecord {
    /// Look up a stat column, case-insensitively.
    pub fn stat(&self, column: &str) -> Option<&str> {
        self.stats
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .map(|(_, value)| value.as_str())
    }
}

/// An immutable snapshot of the ranked player pool.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    records: Vec<PlayerRecord>,
}

impl Directory {
    pub fn new(records: Vec<PlayerRecord>) -> Self {
        Directory { records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Records in ranking order.
    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    /// Player names in ranking order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }

    /// Resolve a user-typed name to a directory record.
    pub fn resolve(&self, query: &str) -> Option<&PlayerRecord> {
        let name = matching::resolve(query, self.names())?;
        self.records.iter().find(|r| r.name == name)
    }
}

/// The ranking snapshot plus its staleness clock.
///
/// Refreshes lazily on access once the TTL has elapsed (or while empty). A
/// failed refresh keeps serving the previous snapshot and retries on the
/// next access. Callers serialize access through a mutex, so the
/// double-refresh race the TTL design tolerates cannot occur here at all.
pub struct DirectoryCache {
    http: reqwest::Client,
    url: String,
    ttl: Duration,
    fetched_at: Option<Instant>,
    directory: Directory,
}

impl DirectoryCache {
    pub fn new(http: reqwest::Client, url: String, ttl: Duration) -> Self {
        DirectoryCache {
            http,
            url,
            ttl,
            fetched_at: None,
            directory: Directory::default(),
        }
    }

    fn is_stale(&self) -> bool {
        self.directory.is_empty()
            || self
                .fetched_at
                .map_or(true, |at| at.elapsed() >= self.ttl)
    }

    /// The current snapshot, refetched first when stale.
    pub async fn current(&mut self) -> &Directory {
        if self.is_stale() {
            log::info!("Refreshing player directory from {}", self.url);
            let records = scrape::fetch_rankings(&self.http, &self.url).await;
            if records.is_empty() {
                log::warn!("Player directory refresh produced no records");
            } else {
                self.store(records);
            }
        }
        &self.directory
    }

    /// Replace the snapshot and reset the staleness clock.
    pub fn store(&mut self, records: Vec<PlayerRecord>) {
        log::debug!("Stored {} player records", records.len());
        self.directory = Directory::new(records);
        self.fetched_at = Some(Instant::now());
    }
}
