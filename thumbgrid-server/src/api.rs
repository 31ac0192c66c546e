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
use actix_web::{get, web, HttpResponse};
use thumbgrid_api::{ChannelThumbnails, StatusResponse};

use crate::{errors, resolver, state::{AppConfig, ExtractorData}};

type JsonResult<T> = errors::Result<web::Json<T>>;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_channel_thumbnails)
       .service(get_status);
}

pub async fn disabled_route() -> HttpResponse {
    HttpResponse::NotFound().body("The JSON API is disabled on this instance.")
}

#[get("/thumbnails/{channel_id}")]
async fn get_channel_thumbnails(path: web::Path<String>, extractor: ExtractorData) -> JsonResult<ChannelThumbnails> {
    let channel_id = path.into_inner();
    let thumbnails = resolver::channel_thumbnails(extractor.get_ref(), &channel_id).await?;
    Ok(web::Json(ChannelThumbnails {
        channel_id: channel_id.into(),
        thumbnails,
    }))
}

#[get("/status")]
async fn get_status(config: web::Data<AppConfig>) -> web::Json<StatusResponse> {
    web::Json(StatusResponse {
        server_version: Some(env!("CARGO_PKG_VERSION").into()),
        server_startup_timestamp: Some(config.startup_timestamp.timestamp()),
        form_enabled: config.enable_form,
        json_api_enabled: config.enable_json_api,
        extractor_path: Some(config.ytdlp.executable_path.as_str().into()),
    })
}
