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
use actix_web::{get, http::header::{self, ContentType}, web, HttpResponse};
use cloneable_errors::ResContext;
use log::debug;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Deserialize;

use crate::{api, errors, resolver, state::{AppConfig, ExtractorData}, templates};

// same set a url path segment gets encoded with
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ').add(b'"').add(b'#').add(b'<').add(b'>').add(b'?')
    .add(b'`').add(b'{').add(b'}').add(b'/').add(b'%');

pub fn configure(app_config: web::Data<AppConfig>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(get_thumbnails_page);

        if app_config.enable_form {
            cfg.service(web::resource("/")
                .route(web::get().to(form_page))
                .route(web::post().to(submit_form))
            );
        }

        if app_config.enable_json_api {
            cfg.service(web::scope("/api").configure(api::configure));
        } else {
            cfg.service(web::scope("/api").default_service(web::to(api::disabled_route)));
        }
    }
}

/// Path of the results page for a channel, with the id encoded as a single path segment
pub fn thumbnails_path(channel_id: &str) -> String {
    format!("/thumbnails/{}", utf8_percent_encode(channel_id, PATH_SEGMENT))
}

#[get("/thumbnails/{channel_id}")]
async fn get_thumbnails_page(path: web::Path<String>, extractor: ExtractorData) -> errors::Result<HttpResponse> {
    let channel_id = path.into_inner();
    let thumbnails = resolver::channel_thumbnails(extractor.get_ref(), &channel_id).await?;
    debug!("Rendering {} thumbnail sets for {channel_id}", thumbnails.len());
    let page = templates::thumbnails_page(&channel_id, &thumbnails).context("Failed to render the thumbnails page")?;
    Ok(HttpResponse::Ok().content_type(ContentType::html()).body(page))
}

async fn form_page() -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(templates::FORM_PAGE)
}

#[derive(Deserialize)]
struct ChannelForm {
    channel_id: Option<String>,
}

async fn submit_form(form: Option<web::Form<ChannelForm>>) -> HttpResponse {
    let channel_id = form
        .and_then(|form| form.into_inner().channel_id)
        .filter(|channel_id| !channel_id.is_empty());

    match channel_id {
        Some(channel_id) => HttpResponse::Found()
            .insert_header((header::LOCATION, thumbnails_path(&channel_id)))
            .finish(),
        None => form_page().await,
    }
}
