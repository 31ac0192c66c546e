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
use std::{fs::{Permissions, set_permissions}, os::unix::prelude::PermissionsExt, path::Path, sync::Arc};
use actix_web::{HttpServer, App, web, middleware::NormalizePath};
use cloneable_errors::{ErrorContext, ResContext};
use env_logger::Env;
use log::info;

mod api;
mod errors;
mod extractor;
mod middleware;
mod resolver;
mod routes;
mod state;
mod templates;
use extractor::{MetadataExtractor, YtDlpExtractor};
use state::*;

const CONFIG_PATH: &str = "config.toml";


#[actix_web::main]
async fn main() -> Result<(), ErrorContext> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config: web::Data<AppConfig> = web::Data::new(AppConfig::load_or_create(Path::new(CONFIG_PATH))?);

    let extractor: ExtractorData = web::Data::from(Arc::new(YtDlpExtractor::new(&config.ytdlp)) as Arc<dyn MetadataExtractor>);
    info!("Listing channels with {}", config.ytdlp.executable_path);
    if !config.enable_form {
        info!("Channel id form is disabled");
    }

    let mut server = {
        let config = config.clone();
        HttpServer::new(move || {
            App::new()
                .wrap(middleware::Timings { send_header: config.enable_timings_header })
                .wrap(NormalizePath::trim())
                .app_data(config.clone())
                .app_data(extractor.clone())
                .configure(routes::configure(config.clone()))
        })
    };
    if let Some((ref ip, port)) = config.listen.tcp {
        let ip_str = ip.as_str();
        server = server.bind((ip_str, port)).with_context(|| format!("Failed to bind to tcp port {ip_str}:{port}"))?;
        info!("Listening on {ip_str}:{port}");
    }
    if let Some(ref path) = config.listen.unix {
        let path_str = path.as_str();
        server = server.bind_uds(path_str).with_context(|| format!("Failed to bind to unix socket {path_str}"))?;
        if let Some(mode) = config.listen.unix_mode {
            let perms = Permissions::from_mode(mode);
            set_permissions(path_str, perms).with_context(|| format!("Failed to change mode of unix socket {path_str} to {mode}"))?;
        }
        info!("Listening on {path_str}");
    }
    server.run()
        .await
        .context("Error while running the server")
}
