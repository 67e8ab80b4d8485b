//! Best-effort acquisition of forecast maps from the CPC CFSv2 archive.
//!
//! Downloads the current generation cycle plus recent forecast history
//! into the local cache, skipping files that are already present, and
//! prunes cache entries whose forecast month has passed. Every download
//! failure is logged and swallowed; the rendering pipeline only ever sees
//! whatever landed on disk.

use chrono::{DateTime, Months, Utc};
use std::path::{Path, PathBuf};

use crate::config::FetchConfig;

/// Downloads and prunes the local map cache.
pub struct Fetcher {
    config: FetchConfig,
    client: reqwest::blocking::Client,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Self {
        Self {
            config,
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Bring the cache up to date for the generation time `now` and return
    /// the cache directory.
    ///
    /// Pulls every (variable, lead, member) map of the current cycle, then
    /// the past `history_months` cycles restricted to forecast months that
    /// are still ahead of `now`. Already-cached files are left alone.
    pub fn sync(&self, now: DateTime<Utc>) -> PathBuf {
        let generation_month = month_str(now);
        let generation_day = now.format("%d").to_string();

        for variable in &self.config.variables {
            for lead in 1..=self.config.max_lead {
                let forecast_month = month_str(add_months(now, lead));
                for member in &self.config.ensemble {
                    let url = current_url(&self.config.base_url, &variable.code, member, lead);
                    let save_path = self
                        .config
                        .cache_dir
                        .join(&variable.name)
                        .join(&forecast_month)
                        .join(format!("{generation_month}{generation_day}_{member}.png"));
                    self.ensure(&url, &save_path);
                }
            }
        }

        for history in 0..self.config.history_months {
            let history_date = sub_months(now, history);
            let history_month = month_str(history_date);
            for lead in 1..=self.config.max_lead {
                let forecast_month = month_str(add_months(history_date, lead - 1));
                // Only earlier cycles whose forecast month is still relevant
                if generation_month > forecast_month {
                    continue;
                }
                for member in &self.config.ensemble {
                    for variable in &self.config.variables {
                        let url = history_url(
                            &self.config.history_url,
                            &history_month,
                            &variable.code,
                            member,
                            lead,
                        );
                        let save_path = self
                            .config
                            .cache_dir
                            .join(&variable.name)
                            .join(&forecast_month)
                            .join(format!("{history_month}_{member}.png"));
                        self.ensure(&url, &save_path);
                    }
                }
            }
        }

        self.prune_stale(now);

        self.config.cache_dir.clone()
    }

    /// Download `url` to `path` unless the file is already cached.
    fn ensure(&self, url: &str, path: &Path) {
        if path.exists() {
            return;
        }
        match self.download(url, path) {
            Ok(()) => tracing::info!(url, path = %path.display(), "downloaded"),
            Err(e) => tracing::warn!(url, %e, "download failed, continuing"),
        }
    }

    fn download(&self, url: &str, path: &Path) -> Result<(), FetchError> {
        let response = self.client.get(url).send()?.error_for_status()?;
        let body = response.bytes()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &body)?;
        Ok(())
    }

    /// Delete cached forecast-month directories that lie in the past.
    ///
    /// A directory `<cache>/<variable>/<month>` is stale when `month` sorts
    /// before the current generation month. Deletion failures are logged
    /// and skipped like download failures.
    pub fn prune_stale(&self, now: DateTime<Utc>) {
        let current_month = month_str(now);

        for variable in &self.config.variables {
            let var_dir = self.config.cache_dir.join(&variable.name);
            let entries = match std::fs::read_dir(&var_dir) {
                Ok(entries) => entries,
                Err(_) => continue,
            };
            for entry in entries.filter_map(|e| e.ok()) {
                if !entry.path().is_dir() {
                    continue;
                }
                let forecast_month = entry.file_name().to_string_lossy().into_owned();
                if forecast_month < current_month {
                    let stale = entry.path();
                    tracing::info!(path = %stale.display(), "pruning stale forecast");
                    if let Err(e) = std::fs::remove_dir_all(&stale) {
                        tracing::warn!(path = %stale.display(), %e, "prune failed");
                    }
                }
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// URL of a current-cycle map.
pub fn current_url(base: &str, code: &str, member: &str, lead: u32) -> String {
    format!("{base}imagesInd{member}/{code}MonInd{lead}.gif")
}

/// URL of a map from the forecast-history archive.
pub fn history_url(base: &str, history_month: &str, code: &str, member: &str, lead: u32) -> String {
    format!("{base}{history_month}/imagesInd{member}/{code}MonInd{lead}.gif")
}

fn month_str(t: DateTime<Utc>) -> String {
    t.format("%Y%m").to_string()
}

fn add_months(t: DateTime<Utc>, n: u32) -> DateTime<Utc> {
    t.checked_add_months(Months::new(n)).unwrap_or(t)
}

fn sub_months(t: DateTime<Utc>, n: u32) -> DateTime<Utc> {
    t.checked_sub_months(Months::new(n)).unwrap_or(t)
}
