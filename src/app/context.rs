use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::app::Result;
use crate::config::Config;
use crate::fetcher::{HttpFetcher, PageFetcher};
use crate::notifier::{FallbackNotifier, Notifier, ResendNotifier};
use crate::parser::TrendingParser;
use crate::pipeline::{Delivery, Pipeline, RunMode};
use crate::renderer::report_date;

pub struct AppContext {
    pub config: Config,
    pub pipeline: Pipeline,
}

impl AppContext {
    /// Wire the pipeline from configuration.
    ///
    /// Delivery settings are validated only when the run will deliver, so a
    /// dry run works without credentials.
    pub fn new(config: Config, mode: RunMode) -> Result<Self> {
        config.validate()?;
        let fetcher: Arc<dyn PageFetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.fetch)?);
        let parser = TrendingParser::new()?;
        let mut pipeline = Pipeline::new(fetcher, parser, config.fetch.url.clone(), config.fetch.limit);

        if mode == RunMode::Deliver {
            let settings = config.delivery.settings()?;
            let resend = ResendNotifier::new(settings.api_key.clone(), &config.delivery)?;
            let notifier: Arc<dyn Notifier> =
                Arc::new(FallbackNotifier::new(resend, config.delivery.on_restricted()));
            pipeline = pipeline.with_delivery(Delivery::new(notifier, &settings));
        }

        Ok(Self { config, pipeline })
    }

    /// Report date for `now` in the configured offset.
    pub fn report_date(&self, now: DateTime<Utc>) -> Result<String> {
        Ok(report_date(now, self.config.report.utc_offset_hours)?)
    }
}
