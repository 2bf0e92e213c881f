use crate::error::{EnvelopeError, RecognizedError, ResponseCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uniform success/failure record.
///
/// Fields are private so an envelope cannot change after construction. A
/// failure envelope never carries data; deserialization enforces the same.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "RawEnvelope<T>")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    ok: bool,
    code: i32,
    message: String,
    data: Option<T>,
    created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnvelope<T> {
    ok: bool,
    code: i32,
    message: String,
    data: Option<T>,
    created_at: DateTime<Utc>,
}

impl<T> TryFrom<RawEnvelope<T>> for Envelope<T> {
    type Error = EnvelopeError;

    fn try_from(raw: RawEnvelope<T>) -> Result<Self, Self::Error> {
        if !raw.ok && raw.data.is_some() {
            return Err(EnvelopeError::DataOnFailure { code: raw.code });
        }

        Ok(Self {
            ok: raw.ok,
            code: raw.code,
            message: raw.message,
            data: raw.data,
            created_at: raw.created_at,
        })
    }
}

impl<T> Envelope<T> {
    fn new(ok: bool, code: i32, message: String, data: Option<T>) -> Self {
        Self {
            ok,
            code,
            message,
            data,
            created_at: Utc::now(),
        }
    }

    pub fn success(data: T) -> Self {
        Self::success_with(
            ResponseCode::Success.code(),
            ResponseCode::Success.message(),
            Some(data),
        )
    }

    /// Success without a payload, e.g. a future that completed empty.
    pub fn empty_success() -> Self {
        Self::success_with(
            ResponseCode::Success.code(),
            ResponseCode::Success.message(),
            None,
        )
    }

    pub fn success_message(message: impl Into<String>, data: T) -> Self {
        Self::success_with(ResponseCode::Success.code(), message, Some(data))
    }

    pub fn success_with(code: i32, message: impl Into<String>, data: Option<T>) -> Self {
        Self::new(true, code, message.into(), data)
    }

    pub fn failure(code: i32, message: impl Into<String>) -> Self {
        Self::new(false, code, message.into(), None)
    }

    pub fn failure_message(message: impl Into<String>) -> Self {
        Self::failure(ResponseCode::Failure.code(), message)
    }

    pub fn from_code(code: ResponseCode) -> Self {
        Self::failure(code.code(), code.message())
    }

    pub fn from_recognized(error: &RecognizedError) -> Self {
        Self::failure(error.code(), error.message())
    }

    /// Catch-all failure using the conventional fault code.
    pub fn from_fault(fault: &anyhow::Error) -> Self {
        Self::from_fault_with_code(ResponseCode::Error.code(), fault)
    }

    /// Only the outermost description ends up in the message. Source chains
    /// and backtraces are never rendered.
    pub fn from_fault_with_code(code: i32, fault: &anyhow::Error) -> Self {
        let description = fault.to_string();
        if description.is_empty() {
            Self::failure(code, ResponseCode::Error.message())
        } else {
            Self::failure(code, description)
        }
    }

    /// Transforms the payload of a successful envelope.
    ///
    /// `f` runs only when the envelope is `ok` and holds data. Any other
    /// envelope becomes a failure with the same code and message.
    pub fn map_data<U, F>(self, f: F) -> Envelope<U>
    where
        F: FnOnce(T) -> U,
    {
        match (self.ok, self.data) {
            (true, Some(data)) => Envelope::success_with(self.code, self.message, Some(f(data))),
            _ => Envelope::failure(self.code, self.message),
        }
    }

    /// Reconstitutes the computation this envelope stands for.
    pub fn into_result(self) -> Result<Option<T>, RecognizedError> {
        if self.ok {
            Ok(self.data)
        } else {
            Err(RecognizedError::new(self.code, self.message))
        }
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
