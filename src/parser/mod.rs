//! Trending page parsing.
//!
//! The layout of the listing page is the only contract with the upstream site,
//! so every selector lives here.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::app::{Result, TrendmailError};
use crate::config::DEFAULT_LIMIT;
use crate::domain::TrendingRecord;

pub const SITE_ORIGIN: &str = "https://github.com";

const ROW_SELECTOR: &str = "article.Box-row";
const TITLE_LINK_SELECTOR: &str = "h2 a[href]";
const STARS_SELECTOR: &str = r#"a[href$="/stargazers"]"#;
const DESCRIPTION_SELECTOR: &str = "p.col-9";

pub struct TrendingParser {
    origin: Url,
    row: Selector,
    title_link: Selector,
    stars: Selector,
    description: Selector,
}

impl TrendingParser {
    pub fn new() -> Result<Self> {
        Self::with_origin(SITE_ORIGIN)
    }

    /// Parser that resolves relative repository links against `origin`.
    pub fn with_origin(origin: &str) -> Result<Self> {
        Ok(Self {
            origin: Url::parse(origin)?,
            row: selector(ROW_SELECTOR)?,
            title_link: selector(TITLE_LINK_SELECTOR)?,
            stars: selector(STARS_SELECTOR)?,
            description: selector(DESCRIPTION_SELECTOR)?,
        })
    }

    /// Extract up to `limit` records in display order.
    ///
    /// Rows without a title link are skipped, as are rows repeating an earlier
    /// URL. Fails only when nothing at all could be extracted.
    pub fn parse(&self, markup: &str, limit: usize) -> Result<Vec<TrendingRecord>> {
        let document = Html::parse_document(markup);
        let mut records: Vec<TrendingRecord> = Vec::with_capacity(limit.min(DEFAULT_LIMIT));

        for row in document.select(&self.row) {
            if records.len() >= limit {
                break;
            }

            let Some(record) = self.parse_row(row) else {
                tracing::warn!("Skipping trending row without a repository link");
                continue;
            };

            if records.iter().any(|r| r.url == record.url) {
                tracing::debug!(url = %record.url, "Skipping duplicate trending row");
                continue;
            }

            tracing::debug!(name = %record.name, stars = record.stars, "Parsed trending row");
            records.push(record);
        }

        if records.is_empty() {
            return Err(TrendmailError::Parse(
                "no trending entries found; the page layout may have changed".into(),
            ));
        }

        Ok(records)
    }

    fn parse_row(&self, row: ElementRef<'_>) -> Option<TrendingRecord> {
        let link = row.select(&self.title_link).next()?;
        let href = link.value().attr("href")?.trim();
        let url = self.origin.join(href).ok()?;

        // "owner /\n repo" -> "owner/repo"
        let name: String = link.text().flat_map(str::split_whitespace).collect();
        if name.is_empty() {
            return None;
        }

        let stars = row
            .select(&self.stars)
            .next()
            .and_then(|el| parse_count(&el.text().collect::<String>()))
            .unwrap_or_else(|| {
                tracing::warn!(%name, "Missing or unreadable star count, using 0");
                0
            });

        let description = row
            .select(&self.description)
            .next()
            .map(|el| collapse_whitespace(el.text()))
            .unwrap_or_default();

        Some(
            TrendingRecord::new(name, url.to_string())
                .with_stars(stars)
                .with_description(description),
        )
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| TrendmailError::Parse(format!("invalid selector {css:?}: {e}")))
}

/// Digits-only integer parse: "12,345" -> 12345, "N/A" -> None
fn parse_count(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

fn collapse_whitespace<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
