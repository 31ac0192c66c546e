/* This file is part of the ThumbGrid project
*
*  Copyright (C) 2026 ThumbGrid contributors
*
*  This program is free software: you can redistribute it and/or modify
*  it under the terms of the GNU Affero General Public License as published by
*  the Free Software Foundation, either version 3 of the License, or
*  (at your option) any later version.
*
*  This program is distributed in the hope that it will be useful,
*  but WITHOUT ANY WARRANTY; without even the implied warranty of
*  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
*  GNU Affero General Public License for more details.
*
*  You should have received a copy of the GNU Affero General Public License
*  along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/
use std::{process::Stdio, sync::Arc};

use cloneable_errors::{bail, ErrorContext, ResContext};
use futures::{future::BoxFuture, FutureExt};
use log::debug;
use serde::Deserialize;
use tokio::process::Command;

use crate::state::YtDlpConfig;

/// Something that can list the videos behind a playlist-like URL without
/// fetching per-video metadata.
pub trait MetadataExtractor: Send + Sync {
    fn extract_flat(&self, url: String) -> BoxFuture<'static, Result<FlatListing, ErrorContext>>;
}

/// The subset of a flat `--dump-single-json` result we care about
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatListing {
    pub entries: Option<Vec<FlatEntry>>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    pub id: String,
}

impl FlatListing {
    pub fn from_json(json: &[u8]) -> Result<FlatListing, ErrorContext> {
        serde_json::from_slice(json).context("Failed to decode the extractor output")
    }

    /// A listing without `entries` (no such tab, not a playlist) has no videos
    pub fn into_video_ids(self) -> Vec<String> {
        self.entries.unwrap_or_default()
            .into_iter()
            .map(|entry| entry.id)
            .collect()
    }
}

#[derive(Clone, Debug)]
pub struct YtDlpExtractor {
    executable_path: Arc<str>,
    socket_timeout: Arc<str>,
}

impl YtDlpExtractor {
    pub fn new(config: &YtDlpConfig) -> YtDlpExtractor {
        YtDlpExtractor {
            executable_path: config.executable_path.as_str().into(),
            socket_timeout: config.socket_timeout_secs.to_string().into(),
        }
    }

    async fn run(self, url: String) -> Result<FlatListing, ErrorContext> {
        debug!("Running {} for {url}", self.executable_path);
        let output = Command::new(&*self.executable_path)
            .args([
                "--ignore-config",
                "--flat-playlist",
                "--dump-single-json",
                "--quiet",
                "--no-warnings",
                "--socket-timeout",
                &*self.socket_timeout,
                "--",
                url.as_str(),
            ])
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("Failed to run {}", self.executable_path))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("{} failed for {} ({}): {}", self.executable_path, url, output.status, stderr.trim());
        }

        FlatListing::from_json(&output.stdout)
            .with_context(|| format!("{} returned an unexpected result for {url}", self.executable_path))
    }
}

impl MetadataExtractor for YtDlpExtractor {
    fn extract_flat(&self, url: String) -> BoxFuture<'static, Result<FlatListing, ErrorContext>> {
        self.clone().run(url).boxed()
    }
}

#[cfg(test)]
pub mod testing {
    use std::{collections::HashMap, sync::Mutex};

    use futures::future::ready;

    use super::*;

    /// Answers from a fixed table, unknown URLs get a listing without entries
    #[derive(Default)]
    pub struct FakeExtractor {
        listings: HashMap<String, Result<FlatListing, ErrorContext>>,
        pub requested: Mutex<Vec<String>>,
    }

    impl FakeExtractor {
        pub fn with_ids(mut self, url: &str, ids: &[&str]) -> Self {
            let entries = ids.iter().map(|id| FlatEntry { id: (*id).to_owned() }).collect();
            self.listings.insert(url.to_owned(), Ok(FlatListing { entries: Some(entries) }));
            self
        }

        pub fn with_error(mut self, url: &str, msg: &'static str) -> Self {
            self.listings.insert(url.to_owned(), Err(ErrorContext::new(msg)));
            self
        }
    }

    impl MetadataExtractor for FakeExtractor {
        fn extract_flat(&self, url: String) -> BoxFuture<'static, Result<FlatListing, ErrorContext>> {
            let result = self.listings.get(&url).cloned().unwrap_or_else(|| Ok(FlatListing::default()));
            self.requested.lock().unwrap().push(url);
            ready(result).boxed()
        }
    }
}
