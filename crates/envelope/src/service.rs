use crate::adapter::{adapt_future, adapt_stream, RecoveryPolicy};
use crate::builder::{EnvelopeBuilder, FutureSource, StreamSource};
use crate::config::{ConfigError, EnvelopeConfig};
use crate::envelope::Envelope;
use crate::error::RecognizedError;
use crate::unwrap;
use futures_util::Stream;
use std::future::Future;

/// Shareable façade over the adapter, the builder and the factory, holding one
/// [`EnvelopeConfig`].
///
/// Cheap to clone and `Send + Sync`, so it can live in application state or
/// behind an `Arc`; constructing it directly behaves the same.
#[derive(Debug, Clone, Default)]
pub struct EnvelopeService {
    config: EnvelopeConfig,
}

impl EnvelopeService {
    pub fn new(config: EnvelopeConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        EnvelopeConfig::from_env().map(Self::new)
    }

    pub fn config(&self) -> &EnvelopeConfig {
        &self.config
    }

    pub async fn wrap_future<F, T, E>(&self, future: F) -> Envelope<T>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<anyhow::Error>,
    {
        adapt_future(future, &self.config, &RecoveryPolicy::new()).await
    }

    pub async fn wrap_stream<S, T, E>(&self, stream: S) -> Envelope<Vec<T>>
    where
        S: Stream<Item = Result<T, E>>,
        E: Into<anyhow::Error>,
    {
        adapt_stream(stream, &self.config, &RecoveryPolicy::new()).await
    }

    /// Builder seeded with this service's config.
    pub fn from_future<F, T, E>(&self, future: F) -> EnvelopeBuilder<FutureSource<F>, T>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<anyhow::Error>,
    {
        EnvelopeBuilder::from_future(future).config(self.config.clone())
    }

    pub fn from_stream<S, T, E>(&self, stream: S) -> EnvelopeBuilder<StreamSource<S>, Vec<T>>
    where
        S: Stream<Item = Result<T, E>>,
        E: Into<anyhow::Error>,
    {
        EnvelopeBuilder::from_stream(stream).config(self.config.clone())
    }

    pub async fn unwrap<F, T>(&self, envelope: F) -> Result<Option<T>, RecognizedError>
    where
        F: Future<Output = Envelope<T>>,
    {
        unwrap::unwrap(envelope).await
    }

    pub async fn map_response<F, T, U, M>(&self, envelope: F, mapper: M) -> Envelope<U>
    where
        F: Future<Output = Envelope<T>>,
        M: FnOnce(T) -> U,
    {
        unwrap::map_response(envelope, mapper).await
    }

    pub fn success<T>(&self, data: T) -> Envelope<T> {
        Envelope::success_with(
            self.config.success_code,
            self.config.success_message.as_str(),
            Some(data),
        )
    }

    pub fn empty_success<T>(&self) -> Envelope<T> {
        Envelope::success_with(
            self.config.success_code,
            self.config.success_message.as_str(),
            None,
        )
    }

    pub fn failure<T>(&self, code: i32, message: impl Into<String>) -> Envelope<T> {
        Envelope::failure(code, message)
    }

    pub fn failure_message<T>(&self, message: impl Into<String>) -> Envelope<T> {
        Envelope::failure_message(message)
    }

    pub fn from_recognized<T>(&self, error: &RecognizedError) -> Envelope<T> {
        Envelope::from_recognized(error)
    }

    pub fn from_fault<T>(&self, fault: &anyhow::Error) -> Envelope<T> {
        Envelope::from_fault_with_code(self.config.fault_code, fault)
    }
}
