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
use std::fmt::{self, Write};

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use thumbgrid_api::ThumbnailSet;

use crate::resolver::channel_url;

const STYLE: &str = "
        .thumbnail-container {
            display: flex;
            flex-wrap: wrap;
            gap: 10px;
        }
        .thumbnail-box {
            border: 1px solid #ddd;
            padding: 10px;
            text-align: center;
        }
        img {
            max-width: 320px;
            height: auto;
            display: block;
        }
";

// broken thumbnails are expected, the browser just hides them
const HIDE_ON_ERROR: &str = "this.style.display='none';";

pub const FORM_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Channel thumbnails</title>
</head>
<body>
    <h1>Channel thumbnails</h1>
    <form method="post" action="/">
        <label for="channel_id">Channel ID:</label>
        <input type="text" id="channel_id" name="channel_id" placeholder="UC...">
        <input type="submit" value="Show thumbnails">
    </form>
</body>
</html>
"#;

pub fn thumbnails_page(channel_id: &str, thumbnails: &[ThumbnailSet]) -> Result<String, fmt::Error> {
    let mut page = String::new();
    write!(page, r#"<!DOCTYPE html>
<html>
<head>
    <title>Thumbnails for {channel}</title>
    <style>{STYLE}    </style>
</head>
<body>
    <h1>Thumbnails for channel: {channel}</h1>
    <iframe src="{iframe_src}" width="100%" height="500"></iframe>
    <div class="thumbnail-container">
"#,
        channel = text(channel_id),
        iframe_src = attr(&channel_url(channel_id)),
    )?;
    for set in thumbnails {
        write_thumbnail_box(&mut page, set)?;
    }
    page.push_str("    </div>\n</body>\n</html>\n");
    Ok(page)
}

fn write_thumbnail_box(page: &mut String, set: &ThumbnailSet) -> fmt::Result {
    writeln!(page, r#"        <div class="thumbnail-box">"#)?;
    writeln!(page, "            <h3>Video ID: {}</h3>", text(&set.video_id))?;
    writeln!(page, "            <strong>Main Thumbnails:</strong><br>")?;
    write_images(page, &set.main, "Main Thumbnail")?;
    writeln!(page, "            <br>")?;
    writeln!(page, "            <strong>Auto Thumbnails:</strong><br>")?;
    write_images(page, &set.auto, "Auto Thumbnail")?;
    writeln!(page, "        </div>")
}

fn write_images(page: &mut String, urls: &[String], alt: &str) -> fmt::Result {
    for url in urls {
        writeln!(page, r#"            <img src="{}" onerror="{HIDE_ON_ERROR}" alt="{alt}">"#, attr(url))?;
    }
    Ok(())
}
