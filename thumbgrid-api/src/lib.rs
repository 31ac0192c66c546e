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

mod thumbnails;

pub use thumbnails::*;

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct ChannelThumbnails {
    pub channel_id: Arc<str>,
    pub thumbnails: Vec<ThumbnailSet>,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Default)]
#[serde(default)]
pub struct StatusResponse {
    pub server_version: Option<Arc<str>>,
    pub server_startup_timestamp: Option<i64>,
    pub form_enabled: bool,
    pub json_api_enabled: bool,
    pub extractor_path: Option<Arc<str>>,
}
