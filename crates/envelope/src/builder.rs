use crate::adapter::{adapt_future, adapt_stream, RecoveryPolicy};
use crate::config::EnvelopeConfig;
use crate::envelope::Envelope;
use crate::error::{EnvelopeError, RecognizedError, ResponseCode};
use futures_util::Stream;
use std::future::Future;

/// Source wrapper for a single-value future.
#[derive(Debug, Clone)]
pub struct FutureSource<F>(F);

/// Source wrapper for a multi-value stream.
#[derive(Debug, Clone)]
pub struct StreamSource<S>(S);

/// Fluent configuration around one future or stream.
///
/// `build` consumes the builder. A builder is `Clone` whenever its source
/// is, and every clone polls its own copy of the source; nothing is cached.
#[derive(Debug)]
pub struct EnvelopeBuilder<S, T> {
    source: S,
    config: EnvelopeConfig,
    policy: RecoveryPolicy<T>,
}

impl<S: Clone, T> Clone for EnvelopeBuilder<S, T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            config: self.config.clone(),
            policy: self.policy.clone(),
        }
    }
}

impl<F, T, E> EnvelopeBuilder<FutureSource<F>, T>
where
    F: Future<Output = Result<T, E>>,
    E: Into<anyhow::Error>,
{
    pub fn from_future(future: F) -> Self {
        Self::with_source(FutureSource(future))
    }

    pub async fn build(self) -> Envelope<T> {
        adapt_future(self.source.0, &self.config, &self.policy).await
    }
}

impl<St, T, E> EnvelopeBuilder<StreamSource<St>, Vec<T>>
where
    St: Stream<Item = Result<T, E>>,
    E: Into<anyhow::Error>,
{
    pub fn from_stream(stream: St) -> Self {
        Self::with_source(StreamSource(stream))
    }

    pub async fn build(self) -> Envelope<Vec<T>> {
        adapt_stream(self.source.0, &self.config, &self.policy).await
    }
}

impl<S, T> EnvelopeBuilder<S, T> {
    fn with_source(source: S) -> Self {
        Self {
            source,
            config: EnvelopeConfig::default(),
            policy: RecoveryPolicy::new(),
        }
    }

    /// Replaces every default at once, e.g. with a loaded [`EnvelopeConfig`].
    pub fn config(mut self, config: EnvelopeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn success_code(mut self, code: i32) -> Self {
        self.config.success_code = code;
        self
    }

    pub fn success_message(mut self, message: impl Into<String>) -> Self {
        self.config.success_message = message.into();
        self
    }

    pub fn fault_code(mut self, code: i32) -> Self {
        self.config.fault_code = code;
        self
    }

    pub fn on_recognized<H>(mut self, handler: H) -> Self
    where
        H: Fn(RecognizedError) -> Envelope<T> + Send + Sync + 'static,
    {
        self.policy = self.policy.on_recognized(handler);
        self
    }

    pub fn on_unrecognized<H>(mut self, handler: H) -> Self
    where
        H: Fn(anyhow::Error) -> Envelope<T> + Send + Sync + 'static,
    {
        self.policy = self.policy.on_unrecognized(handler);
        self
    }
}

/// Fluent construction of a single envelope value.
///
/// Starts from [`ResponseBuilder::success`] or [`ResponseBuilder::failure`]
/// defaults. `build` rejects a failure that carries data.
#[derive(Debug, Clone)]
pub struct ResponseBuilder<T> {
    ok: bool,
    code: i32,
    message: String,
    data: Option<T>,
}

impl<T> Default for ResponseBuilder<T> {
    fn default() -> Self {
        Self::success()
    }
}

impl<T> ResponseBuilder<T> {
    pub fn success() -> Self {
        Self::starting_from(true, ResponseCode::Success)
    }

    pub fn failure() -> Self {
        Self::starting_from(false, ResponseCode::Failure)
    }

    fn starting_from(ok: bool, code: ResponseCode) -> Self {
        Self {
            ok,
            code: code.code(),
            message: code.message().to_string(),
            data: None,
        }
    }

    pub fn ok(mut self, ok: bool) -> Self {
        self.ok = ok;
        self
    }

    pub fn code(mut self, code: i32) -> Self {
        self.code = code;
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    pub fn build(self) -> Result<Envelope<T>, EnvelopeError> {
        match (self.ok, self.data) {
            (true, data) => Ok(Envelope::success_with(self.code, self.message, data)),
            (false, Some(_)) => Err(EnvelopeError::DataOnFailure { code: self.code }),
            (false, None) => Ok(Envelope::failure(self.code, self.message)),
        }
    }
}

impl<T> Envelope<T> {
    pub fn builder() -> ResponseBuilder<T> {
        ResponseBuilder::success()
    }
}
