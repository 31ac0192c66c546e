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
use actix_web::rt::spawn;
use cloneable_errors::{ErrContext, ErrorContext, ResContext};
use futures::{stream::FuturesUnordered, StreamExt};
use log::{debug, warn};
use thumbgrid_api::ThumbnailSet;

use crate::extractor::MetadataExtractor;

pub const CHANNEL_BASE_URL: &str = "https://www.youtube.com/channel";
/// Channel tabs that get listed, one worker each
pub const LISTING_TABS: [&str; 2] = ["videos", "shorts"];

pub fn channel_url(channel_id: &str) -> String {
    format!("{CHANNEL_BASE_URL}/{channel_id}")
}

pub fn listing_urls(channel_id: &str) -> [String; 2] {
    LISTING_TABS.map(|tab| format!("{CHANNEL_BASE_URL}/{channel_id}/{tab}"))
}

/// Lists the videos and shorts of a channel concurrently.
///
/// IDs are concatenated in the order the listings complete and are not deduplicated.
/// Both listings are awaited even when one of them fails, then the whole lookup fails.
pub async fn resolve_channel(extractor: &dyn MetadataExtractor, channel_id: &str) -> Result<Vec<String>, ErrorContext> {
    let workers: FuturesUnordered<_> = listing_urls(channel_id).into_iter()
        .map(|url| {
            let task = spawn(extractor.extract_flat(url.clone()));
            async move { (url, task.await) }
        })
        .collect();

    // every worker has to finish before any result is looked at
    let results: Vec<_> = workers.collect().await;

    let mut video_ids = Vec::new();
    for (url, result) in results {
        let listing = result.with_context(|| format!("Listing task for {url} panicked"))?
            .with_context(|| format!("Failed to list videos from {url}"))?;
        let ids = listing.into_video_ids();
        debug!("Found {} videos at {url}", ids.len());
        video_ids.extend(ids);
    }
    Ok(video_ids)
}

pub async fn channel_thumbnails(extractor: &dyn MetadataExtractor, channel_id: &str) -> Result<Vec<ThumbnailSet>, ErrorContext> {
    match resolve_channel(extractor, channel_id).await {
        Ok(video_ids) => Ok(video_ids.into_iter().map(ThumbnailSet::for_video).collect()),
        Err(err) => {
            warn!("Failed to resolve channel {channel_id}: {err}");
            Err(err.context("Failed to fetch the channel's videos"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::testing::FakeExtractor;

    const UCID: &str = "UC_x5XG1OV2P6uZZ5FSM9Ttw";

    fn urls() -> [String; 2] {
        listing_urls(UCID)
    }

    #[test]
    fn listing_urls_cover_videos_and_shorts() {
        assert_eq!(urls(), [
            "https://www.youtube.com/channel/UC_x5XG1OV2P6uZZ5FSM9Ttw/videos",
            "https://www.youtube.com/channel/UC_x5XG1OV2P6uZZ5FSM9Ttw/shorts",
        ]);
        // no escaping, the identifier is passed through as-is
        assert_eq!(listing_urls("a b/c")[0], "https://www.youtube.com/channel/a b/c/videos");
    }

    #[actix_web::test]
    async fn returns_videos_and_shorts() {
        let [videos, shorts] = urls();
        let extractor = FakeExtractor::default()
            .with_ids(&videos, &["v1", "v2", "v3"])
            .with_ids(&shorts, &["s1", "s2"]);

        let mut ids = resolve_channel(&extractor, UCID).await.unwrap();
        ids.sort();
        assert_eq!(ids, ["s1", "s2", "v1", "v2", "v3"]);

        let mut requested = extractor.requested.lock().unwrap().clone();
        requested.sort();
        assert_eq!(requested, [shorts, videos]);
    }

    #[actix_web::test]
    async fn overlapping_ids_are_kept() {
        let [videos, shorts] = urls();
        let extractor = FakeExtractor::default()
            .with_ids(&videos, &["a", "b"])
            .with_ids(&shorts, &["b", "c"]);

        let mut ids = resolve_channel(&extractor, UCID).await.unwrap();
        ids.sort();
        assert_eq!(ids, ["a", "b", "b", "c"]);
    }

    #[actix_web::test]
    async fn listing_without_entries_contributes_nothing() {
        let [videos, _] = urls();
        let extractor = FakeExtractor::default().with_ids(&videos, &["abc123"]);

        assert_eq!(resolve_channel(&extractor, UCID).await.unwrap(), ["abc123"]);
    }

    #[actix_web::test]
    async fn failing_listing_fails_everything() {
        let [videos, shorts] = urls();
        let extractor = FakeExtractor::default()
            .with_ids(&videos, &["abc123"])
            .with_error(&shorts, "This channel does not have a shorts tab");

        let err = resolve_channel(&extractor, UCID).await.unwrap_err();
        assert!(err.to_string().contains(&shorts));

        let err = channel_thumbnails(&extractor, UCID).await.unwrap_err();
        assert!(format!("{err:?}").contains("does not have a shorts tab"));
    }

    #[actix_web::test]
    async fn thumbnails_are_built_per_video() {
        let [videos, shorts] = urls();
        let extractor = FakeExtractor::default()
            .with_ids(&videos, &["abc123"])
            .with_ids(&shorts, &[]);

        let sets = channel_thumbnails(&extractor, UCID).await.unwrap();
        assert_eq!(sets, [ThumbnailSet::for_video("abc123")]);
    }

    mod concurrency {
        use std::{sync::{atomic::{AtomicUsize, Ordering}, Arc}, time::Duration};

        use actix_web::rt::time::{sleep, timeout};
        use futures::{future::BoxFuture, FutureExt};

        use super::*;
        use crate::extractor::{FlatEntry, FlatListing};

        /// Holds every listing back until both of them have started
        #[derive(Default)]
        struct GatedExtractor {
            arrived: Arc<AtomicUsize>,
            finished: Arc<AtomicUsize>,
            slow_url: Option<String>,
            failing_url: Option<String>,
        }

        impl MetadataExtractor for GatedExtractor {
            fn extract_flat(&self, url: String) -> BoxFuture<'static, Result<FlatListing, ErrorContext>> {
                let arrived = self.arrived.clone();
                let finished = self.finished.clone();
                let slow = self.slow_url.as_ref() == Some(&url);
                let fail = self.failing_url.as_ref() == Some(&url);
                async move {
                    arrived.fetch_add(1, Ordering::SeqCst);
                    while arrived.load(Ordering::SeqCst) < LISTING_TABS.len() {
                        sleep(Duration::from_millis(1)).await;
                    }
                    if slow {
                        sleep(Duration::from_millis(200)).await;
                    }
                    finished.fetch_add(1, Ordering::SeqCst);
                    if fail {
                        return Err(ErrorContext::new("listing blew up"));
                    }
                    let id = url.rsplit('/').next().unwrap_or_default().to_owned();
                    Ok(FlatListing { entries: Some(vec![FlatEntry { id }]) })
                }.boxed()
            }
        }

        #[actix_web::test]
        async fn both_listings_are_in_flight_together() {
            let extractor = GatedExtractor::default();

            // a sequential lookup would wait on the gate forever
            let mut ids = timeout(Duration::from_secs(5), resolve_channel(&extractor, UCID)).await
                .expect("listings should run concurrently")
                .unwrap();
            ids.sort();
            assert_eq!(ids, ["shorts", "videos"]);
            assert_eq!(extractor.finished.load(Ordering::SeqCst), 2);
        }

        #[actix_web::test]
        async fn failure_waits_for_the_other_listing() {
            let [videos, shorts] = urls();
            let extractor = GatedExtractor {
                slow_url: Some(shorts),
                failing_url: Some(videos.clone()),
                ..Default::default()
            };

            let err = timeout(Duration::from_secs(5), resolve_channel(&extractor, UCID)).await
                .expect("listings should run concurrently")
                .unwrap_err();
            assert!(err.to_string().contains(&videos));
            assert!(format!("{err:?}").contains("listing blew up"));
            // the slow listing has completed by the time the error comes back
            assert_eq!(extractor.finished.load(Ordering::SeqCst), 2);
        }
    }
}
