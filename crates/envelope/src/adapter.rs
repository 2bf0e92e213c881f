//! Turns fallible futures and streams into futures of [`Envelope`].
//!
//! The returned futures never fail. Errors are classified with
//! [`Fault::classify`] and recovered into failure envelopes, recognized errors
//! first and everything else after.

use crate::config::EnvelopeConfig;
use crate::envelope::Envelope;
use crate::error::{Fault, RecognizedError};
use futures_util::{Stream, TryStreamExt};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

pub type RecognizedHandler<T> = Arc<dyn Fn(RecognizedError) -> Envelope<T> + Send + Sync>;
pub type FaultHandler<T> = Arc<dyn Fn(anyhow::Error) -> Envelope<T> + Send + Sync>;

/// Optional per-computation overrides for the two failure tiers.
pub struct RecoveryPolicy<T> {
    on_recognized: Option<RecognizedHandler<T>>,
    on_unrecognized: Option<FaultHandler<T>>,
}

impl<T> RecoveryPolicy<T> {
    pub fn new() -> Self {
        Self {
            on_recognized: None,
            on_unrecognized: None,
        }
    }

    pub fn on_recognized<F>(mut self, handler: F) -> Self
    where
        F: Fn(RecognizedError) -> Envelope<T> + Send + Sync + 'static,
    {
        self.on_recognized = Some(Arc::new(handler));
        self
    }

    pub fn on_unrecognized<F>(mut self, handler: F) -> Self
    where
        F: Fn(anyhow::Error) -> Envelope<T> + Send + Sync + 'static,
    {
        self.on_unrecognized = Some(Arc::new(handler));
        self
    }

    /// Builds the failure envelope for `error`.
    pub fn recover(&self, error: anyhow::Error, config: &EnvelopeConfig) -> Envelope<T> {
        match Fault::classify(error) {
            Fault::Recognized(recognized) => {
                debug!(
                    code = recognized.code(),
                    custom = self.on_recognized.is_some(),
                    "Recovering recognized error into failure envelope"
                );
                match &self.on_recognized {
                    Some(handler) => handler(recognized),
                    None => Envelope::from_recognized(&recognized),
                }
            }
            Fault::Unclassified(fault) => {
                warn!(
                    error = %fault,
                    custom = self.on_unrecognized.is_some(),
                    "Recovering unclassified fault into failure envelope"
                );
                match &self.on_unrecognized {
                    Some(handler) => handler(fault),
                    None => Envelope::from_fault_with_code(config.fault_code, &fault),
                }
            }
        }
    }
}

impl<T> Default for RecoveryPolicy<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RecoveryPolicy<T> {
    fn clone(&self) -> Self {
        Self {
            on_recognized: self.on_recognized.clone(),
            on_unrecognized: self.on_unrecognized.clone(),
        }
    }
}

impl<T> fmt::Debug for RecoveryPolicy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoveryPolicy")
            .field("on_recognized", &self.on_recognized.is_some())
            .field("on_unrecognized", &self.on_unrecognized.is_some())
            .finish()
    }
}

pub async fn adapt_future<F, T, E>(
    future: F,
    config: &EnvelopeConfig,
    policy: &RecoveryPolicy<T>,
) -> Envelope<T>
where
    F: Future<Output = Result<T, E>>,
    E: Into<anyhow::Error>,
{
    match future.await {
        Ok(data) => Envelope::success_with(
            config.success_code,
            config.success_message.as_str(),
            Some(data),
        ),
        Err(error) => policy.recover(error.into(), config),
    }
}

/// Collects `stream` in emission order. An error at any point discards the
/// items seen so far.
pub async fn adapt_stream<S, T, E>(
    stream: S,
    config: &EnvelopeConfig,
    policy: &RecoveryPolicy<Vec<T>>,
) -> Envelope<Vec<T>>
where
    S: Stream<Item = Result<T, E>>,
    E: Into<anyhow::Error>,
{
    adapt_future(stream.try_collect::<Vec<T>>(), config, policy).await
}

pub async fn wrap_future<F, T, E>(future: F) -> Envelope<T>
where
    F: Future<Output = Result<T, E>>,
    E: Into<anyhow::Error>,
{
    adapt_future(future, &EnvelopeConfig::default(), &RecoveryPolicy::new()).await
}

pub async fn wrap_stream<S, T, E>(stream: S) -> Envelope<Vec<T>>
where
    S: Stream<Item = Result<T, E>>,
    E: Into<anyhow::Error>,
{
    adapt_stream(stream, &EnvelopeConfig::default(), &RecoveryPolicy::new()).await
}
