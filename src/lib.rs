//! # trendmail
//!
//! Emails the top of the GitHub Trending page (daily, all languages) once per run.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → Parser → Renderer → Notifier
//! ```
//!
//! - [`fetcher`]: HTTP GET of the listing page with a bounded timeout
//! - [`parser`]: DOM-based extraction of the top N repositories
//! - [`renderer`]: HTML email document with escaped user text
//! - [`notifier`]: Resend email delivery with a restricted-send fallback policy
//! - [`pipeline`]: runs the stages in order, with a dry-run mode
//!
//! ## Quick Start
//!
//! ```bash
//! # Print the email without sending it
//! trendmail --dry-run
//!
//! # Send it
//! RESEND_API_KEY=re_... SENDER_EMAIL=bot@example.com \
//!   RECIPIENT_EMAIL="a@example.com, b@example.com" trendmail
//! ```
//!
//! Scheduling is left to cron or a CI schedule.

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) wires configuration into a ready
/// [`Pipeline`](pipeline::Pipeline).
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// TOML file and environment configuration.
pub mod config;

/// Core domain models.
///
/// - [`TrendingRecord`](domain::TrendingRecord): one repository entry
/// - [`RenderedDocument`](domain::RenderedDocument): subject and HTML body
pub mod domain;

/// HTTP fetching of the trending listing.
///
/// - [`PageFetcher`](fetcher::PageFetcher): async trait for page retrieval
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Email delivery.
pub mod notifier;

/// Trending page parsing.
pub mod parser;

/// Stage orchestration.
pub mod pipeline;

/// HTML email rendering.
pub mod renderer;

#[cfg(test)]
mod test_support;
