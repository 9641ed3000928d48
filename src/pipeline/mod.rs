//! Fetch, convert, persist
//!
//! One [`Pipeline`] run produces one [`Observation`]: gold, silver, and the
//! USD to EGP rate are fetched one after another, converted, and optionally
//! handed to the [`Recorder`].

mod types;

pub use types::{PipelineError, PipelineState, RunOptions};

use crate::config::Config;
use crate::fetch::{HttpTransport, RetryingFetcher};
use crate::observation::Observation;
use crate::record::Recorder;
use crate::source::{FixedValueSource, Metal, NetworkSource, PriceSource, QuoteSource, RateSource};
use chrono::Utc;
use std::sync::Arc;

/// Single-shot price pipeline
pub struct Pipeline {
    gold: PriceSource,
    silver: PriceSource,
    rate: RateSource,
    recorder: Recorder,
    state: PipelineState,
}

impl Pipeline {
    /// Create a pipeline from explicit sources
    pub fn new(gold: PriceSource, silver: PriceSource, rate: RateSource, recorder: Recorder) -> Self {
        Self {
            gold,
            silver,
            rate,
            recorder,
            state: PipelineState::Init,
        }
    }

    /// Build network sources (or fixed mock values) from configuration
    ///
    /// All network sources share one HTTP client.
    pub fn from_config(config: &Config, mock: bool) -> Result<Self, PipelineError> {
        let recorder = Recorder::new(config.storage.recorder_config());

        if mock {
            tracing::info!("Using mock quote sources");
            let price = |metal: Metal| {
                PriceSource::new(
                    metal,
                    Box::new(FixedValueSource::new(
                        format!("mock-{}", metal.key()),
                        config.mock.price(metal),
                    )),
                )
            };
            let rate = RateSource::new(Box::new(FixedValueSource::new(
                "mock-usd_egp",
                config.mock.usd_to_egp,
            )));
            return Ok(Self::new(price(Metal::Gold), price(Metal::Silver), rate, recorder));
        }

        let transport = HttpTransport::with_config(&config.fetch.http_config())?;
        let fetcher = Arc::new(RetryingFetcher::new(
            Arc::new(transport),
            config.fetch.retry_policy(),
        ));

        let network = |endpoint| -> Box<dyn QuoteSource> {
            Box::new(NetworkSource::new(Arc::clone(&fetcher), endpoint))
        };
        let gold = PriceSource::new(
            Metal::Gold,
            network(config.sources.metal_endpoint(Metal::Gold)),
        );
        let silver = PriceSource::new(
            Metal::Silver,
            network(config.sources.metal_endpoint(Metal::Silver)),
        );
        let rate = RateSource::new(network(config.sources.rate_endpoint()));

        Ok(Self::new(gold, silver, rate, recorder))
    }

    /// Current state
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Recorder used for persistence
    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    /// Produce one observation
    ///
    /// With `auto_save` the observation is persisted and the pipeline ends in
    /// `Done`; otherwise it stops in `AwaitingConfirmation` and the caller
    /// decides whether to [`persist`](Self::persist).
    pub async fn run(&mut self, auto_save: bool) -> Result<Observation, PipelineError> {
        self.transition(PipelineState::Fetching);

        let gold = self.gold.spot_price().await.map_err(|e| self.fail(e))?;
        let silver = self.silver.spot_price().await.map_err(|e| self.fail(e))?;
        let rate = self.rate.rate().await.map_err(|e| self.fail(e))?;

        self.transition(PipelineState::Converting);
        let observation = Observation::from_quotes(Utc::now(), &gold, &silver, &rate)
            .map_err(|e| self.fail(e))?;

        if !auto_save {
            self.transition(PipelineState::AwaitingConfirmation);
            return Ok(observation);
        }

        self.persist(&observation)?;
        Ok(observation)
    }

    /// Persist an observation produced by [`run`](Self::run)
    ///
    /// Allowed from `AwaitingConfirmation`, or from `Persisting` to retry a
    /// failed save. On failure the pipeline stays in `Persisting` and the
    /// error carries the observation.
    pub fn persist(&mut self, observation: &Observation) -> Result<(), PipelineError> {
        match self.state {
            PipelineState::AwaitingConfirmation | PipelineState::Persisting => {}
            state => return Err(PipelineError::InvalidState { state }),
        }
        self.transition(PipelineState::Persisting);

        self.recorder
            .record(observation)
            .map_err(|source| PipelineError::Persistence {
                observation: Box::new(observation.clone()),
                source,
            })?;

        self.transition(PipelineState::Done);
        Ok(())
    }

    fn transition(&mut self, next: PipelineState) {
        tracing::debug!(from = %self.state, state = %next, "Pipeline transition");
        self.state = next;
    }

    fn fail(&mut self, error: impl Into<PipelineError>) -> PipelineError {
        let error = error.into();
        tracing::error!(state = %self.state, error = %error, "Pipeline failed");
        self.transition(PipelineState::Failed);
        error
    }
}

/// Build a pipeline from configuration and run it once
pub async fn run(config: &Config, options: RunOptions) -> Result<Observation, PipelineError> {
    let mut pipeline = Pipeline::from_config(config, options.mock)?;
    pipeline.run(options.auto_save).await
}
