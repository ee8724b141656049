//! Fetch → parse → render → deliver, one pass per invocation.

use std::sync::Arc;

use crate::app::Result;
use crate::config::{ConfigError, DeliverySettings};
use crate::domain::RenderedDocument;
use crate::fetcher::PageFetcher;
use crate::notifier::{DeliveryReceipt, Notifier, OutboundMessage};
use crate::parser::TrendingParser;
use crate::renderer::DocumentRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Deliver,
    /// Fetch, parse and render only.
    DryRun,
}

#[derive(Debug)]
pub enum RunOutcome {
    Delivered {
        document: RenderedDocument,
        receipt: DeliveryReceipt,
    },
    DryRun {
        document: RenderedDocument,
    },
}

impl RunOutcome {
    pub fn document(&self) -> &RenderedDocument {
        match self {
            Self::Delivered { document, .. } | Self::DryRun { document } => document,
        }
    }
}

/// Notifier plus the addressing it sends with.
pub struct Delivery {
    notifier: Arc<dyn Notifier>,
    sender: String,
    recipients: Vec<String>,
}

impl Delivery {
    pub fn new(notifier: Arc<dyn Notifier>, settings: &DeliverySettings) -> Self {
        Self {
            notifier,
            sender: settings.sender.clone(),
            recipients: settings.recipients.clone(),
        }
    }
}

pub struct Pipeline {
    fetcher: Arc<dyn PageFetcher + Send + Sync>,
    parser: TrendingParser,
    renderer: DocumentRenderer,
    source_url: String,
    limit: usize,
    delivery: Option<Delivery>,
}

impl Pipeline {
    pub fn new(
        fetcher: Arc<dyn PageFetcher + Send + Sync>,
        parser: TrendingParser,
        source_url: impl Into<String>,
        limit: usize,
    ) -> Self {
        let source_url = source_url.into();
        Self {
            fetcher,
            parser,
            renderer: DocumentRenderer::new(source_url.clone(), limit),
            source_url,
            limit,
            delivery: None,
        }
    }

    pub fn with_delivery(mut self, delivery: Delivery) -> Self {
        self.delivery = Some(delivery);
        self
    }

    /// Run once. Fetch and parse failures abort before anything is sent.
    pub async fn run(&self, mode: RunMode, date: &str) -> Result<RunOutcome> {
        let markup = self.fetcher.fetch(&self.source_url).await?;
        tracing::info!(bytes = markup.len(), url = %self.source_url, "Fetched trending page");

        let records = self.parser.parse(&markup, self.limit)?;
        tracing::info!(count = records.len(), "Parsed trending records");

        let document = self.renderer.render(&records, date);
        tracing::info!(subject = %document.subject, "Rendered report");

        if mode == RunMode::DryRun {
            tracing::info!("Dry run, skipping delivery");
            return Ok(RunOutcome::DryRun { document });
        }

        let delivery = self.delivery.as_ref().ok_or(ConfigError::NoDelivery)?;
        let message = OutboundMessage {
            from: delivery.sender.clone(),
            to: delivery.recipients.clone(),
            subject: document.subject.clone(),
            html: document.body_html.clone(),
        };

        let receipt = delivery.notifier.send(&message).await?;
        tracing::info!(id = %receipt.id, recipients = receipt.recipients.len(), "Report delivered");

        Ok(RunOutcome::Delivered { document, receipt })
    }
}
