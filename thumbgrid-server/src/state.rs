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
use std::{fs::File, io::{self, Read, Write}, path::Path};

use actix_web::web;
use chrono::{DateTime, Utc};
use cloneable_errors::{bail, ErrContext, ErrorContext, ResContext};
use log::info;
use serde::{Serialize, Deserialize};

use crate::extractor::MetadataExtractor;

pub type ExtractorData = web::Data<dyn MetadataExtractor>;

#[derive(Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct AppConfig {
    pub listen: ListenConfig,
    pub ytdlp: YtDlpConfig,
    /// Serve the channel id submission form on `/`
    pub enable_form: bool,
    pub enable_json_api: bool,
    pub enable_timings_header: bool,
    #[serde(skip)]
    pub startup_timestamp: DateTime<Utc>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen: ListenConfig::default(),
            ytdlp: YtDlpConfig::default(),
            enable_form: true,
            enable_json_api: true,
            enable_timings_header: false,
            startup_timestamp: Utc::now(),
        }
    }
}

impl AppConfig {
    /// Reads the config file, writing out the default config if it doesn't exist yet
    pub fn load_or_create(path: &Path) -> Result<AppConfig, ErrorContext> {
        let cfg = match File::open(path) {
            Ok(mut file) => {
                let mut contents = String::new();
                file.read_to_string(&mut contents).with_context(|| format!("Failed to read {}", path.display()))?;
                toml::from_str(&contents).with_context(|| format!("Failed to deserialize contents of {}", path.display()))?
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let cfg = AppConfig::default();
                let serialized = toml::to_string(&cfg).context("Failed to serialize default AppConfig as TOML")?;
                let mut file = File::options().write(true).create_new(true).open(path).with_context(|| format!("Failed to create {}", path.display()))?;
                write!(file, "{serialized}").with_context(|| format!("Failed to write serialized default AppConfig to {}", path.display()))?;
                info!("Wrote default config to {}", path.display());
                cfg
            },
            Err(e) => return Err(e.context(format!("Failed to open {}", path.display()))),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ErrorContext> {
        if self.listen.tcp.is_none() && self.listen.unix.is_none() {
            bail!("Invalid configuration - no tcp port or unix socket path specified");
        }
        if self.ytdlp.executable_path.is_empty() {
            bail!("Invalid configuration - ytdlp.executable_path is empty");
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ListenConfig {
    pub tcp: Option<(String, u16)>,
    pub unix: Option<String>,
    pub unix_mode: Option<u32>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            tcp: Some(("0.0.0.0".to_owned(), 9393)),
            unix: None,
            unix_mode: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct YtDlpConfig {
    pub executable_path: String,
    pub socket_timeout_secs: u32,
}

impl Default for YtDlpConfig {
    fn default() -> Self {
        Self {
            executable_path: "yt-dlp".to_owned(),
            socket_timeout_secs: 15,
        }
    }
}
