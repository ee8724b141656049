//! HTML email rendering for the trending report.

use std::fmt::Write;

use chrono::{DateTime, FixedOffset, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::config::{ConfigError, DEFAULT_LIMIT, DEFAULT_TRENDING_URL};
use crate::domain::{RenderedDocument, TrendingRecord};

pub const NO_DATA_TEXT: &str = "No trending repositories found.";

const FONT_STACK: &str =
    "ui-sans-serif,system-ui,-apple-system,Segoe UI,Roboto,Helvetica,Arial,sans-serif";

#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    /// Linked from the footer
    source_url: String,
    /// Advertised size of the report ("Top 10")
    limit: usize,
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_TRENDING_URL, DEFAULT_LIMIT)
    }
}

impl DocumentRenderer {
    pub fn new(source_url: impl Into<String>, limit: usize) -> Self {
        Self {
            source_url: source_url.into(),
            limit,
        }
    }

    pub fn subject(&self, date: &str) -> String {
        format!("GitHub Trending Daily Top {} ({date})", self.limit)
    }

    /// Render records into the email document. Total and deterministic.
    pub fn render(&self, records: &[TrendingRecord], date: &str) -> RenderedDocument {
        let mut body = String::new();

        let _ = write!(
            body,
            r#"<div style="font-family:{FONT_STACK};color:#111827;">
<h2 style="margin:0 0 8px 0;">GitHub Trending (Daily &middot; All Languages) Top {limit}</h2>
<div style="margin:0 0 16px 0;color:#6b7280;">Date: {date}</div>
"#,
            limit = self.limit,
            date = encode_text(date),
        );

        if records.is_empty() {
            let _ = writeln!(
                body,
                r#"<p class="no-data" style="color:#6b7280;">{NO_DATA_TEXT}</p>"#
            );
        } else {
            body.push_str("<ol style=\"padding-left:0;list-style:none;margin:0;\">\n");
            for (idx, record) in records.iter().enumerate() {
                render_item(&mut body, idx + 1, record);
            }
            body.push_str("</ol>\n");
        }

        let _ = write!(
            body,
            r#"<div style="margin-top:14px;color:#9ca3af;font-size:12px;">Source: <a href="{url}" style="color:#6b7280;text-decoration:none;">GitHub Trending</a></div>
</div>"#,
            url = encode_double_quoted_attribute(&self.source_url),
        );

        RenderedDocument {
            subject: self.subject(date),
            body_html: body,
        }
    }
}

fn render_item(body: &mut String, rank: usize, record: &TrendingRecord) {
    let description = if record.description.is_empty() {
        "&nbsp;".into()
    } else {
        encode_text(&record.description)
    };

    let _ = writeln!(
        body,
        r#"<li style="padding:10px 12px;border-bottom:1px solid #e5e7eb;">
<div style="font-weight:600;margin:0 0 6px 0;"><span class="rank">{rank}.</span> <a href="{url}" style="color:#2563eb;text-decoration:none;">{name}</a> <span class="stars" style="float:right;font-weight:400;">&#9733; {stars}</span></div>
<div style="color:#6b7280;line-height:1.5;">{description}</div>
</li>"#,
        url = encode_double_quoted_attribute(&record.url),
        name = encode_text(&record.name),
        stars = record.display_stars(),
    );
}

/// Calendar date of `now` at a fixed UTC offset, as `YYYY-MM-DD`.
pub fn report_date(now: DateTime<Utc>, utc_offset_hours: i32) -> Result<String, ConfigError> {
    let offset = utc_offset_hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or(ConfigError::InvalidOffset(utc_offset_hours))?;
    Ok(now.with_timezone(&offset).format("%Y-%m-%d").to_string())
}
