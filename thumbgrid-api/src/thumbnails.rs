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
use std::sync::Arc;

use serde::{Serialize, Deserialize};

pub const THUMBNAIL_BASE_URL: &str = "https://img.youtube.com/vi";

/// Uploaded thumbnail variants: maxres, 720p and standard definition
pub const MAIN_THUMBNAIL_NAMES: [&str; 3] = ["maxresdefault", "hq720", "sddefault"];
/// Frames picked automatically by youtube, three frames for each quality tier
pub const AUTO_THUMBNAIL_NAMES: [&str; 9] = [
    "hq1", "hq2", "hq3",
    "sd1", "sd2", "sd3",
    "mq1", "mq2", "mq3",
];

/// Candidate thumbnail URLs for a single video.
///
/// None of these are guaranteed to exist, it's up to the client to hide the broken ones.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct ThumbnailSet {
    pub video_id: Arc<str>,
    pub main: Vec<String>,
    pub auto: Vec<String>,
}

impl ThumbnailSet {
    pub fn for_video(video_id: impl Into<Arc<str>>) -> ThumbnailSet {
        let video_id: Arc<str> = video_id.into();
        ThumbnailSet {
            main: MAIN_THUMBNAIL_NAMES.iter().map(|name| thumbnail_url(&video_id, name)).collect(),
            auto: AUTO_THUMBNAIL_NAMES.iter().map(|name| thumbnail_url(&video_id, name)).collect(),
            video_id,
        }
    }
}

pub fn thumbnail_url(video_id: &str, name: &str) -> String {
    format!("{THUMBNAIL_BASE_URL}/{video_id}/{name}.jpg")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_has_fixed_shape() {
        for vid in ["abc123", "dQw4w9WgXcQ", "", "weird id/with?stuff"] {
            let set = ThumbnailSet::for_video(vid);
            assert_eq!(set.main.len(), 3);
            assert_eq!(set.auto.len(), 9);
            assert_eq!(&*set.video_id, vid);
            for url in set.main.iter().chain(set.auto.iter()) {
                assert!(url.starts_with(&format!("{THUMBNAIL_BASE_URL}/{vid}/")), "{url}");
                assert!(url.ends_with(".jpg"));
            }
        }
    }

    #[test]
    fn main_urls_follow_naming_convention() {
        let set = ThumbnailSet::for_video("abc123");
        assert_eq!(set.main, [
            "https://img.youtube.com/vi/abc123/maxresdefault.jpg",
            "https://img.youtube.com/vi/abc123/hq720.jpg",
            "https://img.youtube.com/vi/abc123/sddefault.jpg",
        ]);
    }

    #[test]
    fn auto_urls_are_tier_major() {
        let set = ThumbnailSet::for_video("abc123");
        assert_eq!(set.auto.first().map(String::as_str), Some("https://img.youtube.com/vi/abc123/hq1.jpg"));
        assert_eq!(set.auto.get(3).map(String::as_str), Some("https://img.youtube.com/vi/abc123/sd1.jpg"));
        assert_eq!(set.auto.last().map(String::as_str), Some("https://img.youtube.com/vi/abc123/mq3.jpg"));
    }

    #[test]
    fn serializes_with_expected_field_names() {
        let value = serde_json::to_value(ThumbnailSet::for_video("abc123")).unwrap();
        assert_eq!(value["video_id"], "abc123");
        assert_eq!(value["main"].as_array().map(Vec::len), Some(3));
        assert_eq!(value["auto"].as_array().map(Vec::len), Some(9));
    }
}
