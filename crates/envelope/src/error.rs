use thiserror::Error;

/// Conventional application codes.
///
/// `Success` and `Error` double as the default success and fault codes, but
/// nothing stops a [`RecognizedError`] from reusing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    Success,
    Failure,
    Unauthorized,
    Forbidden,
    NotFound,
    Error,
}

impl ResponseCode {
    pub fn code(&self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failure => 1000,
            Self::Unauthorized => 1001,
            Self::Forbidden => 1003,
            Self::NotFound => 1004,
            Self::Error => 9999,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "operation succeeded",
            Self::Failure => "operation failed",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "resource not found",
            Self::Error => "internal server error",
        }
    }
}

/// A failure raised on purpose by application code, carrying the code and
/// message the caller should see.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RecognizedError {
    code: i32,
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl RecognizedError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Generic failure ([`ResponseCode::Failure`]) with a custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self::new(ResponseCode::Failure.code(), message)
    }

    pub fn with_source<E>(code: i32, message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ResponseCode> for RecognizedError {
    fn from(code: ResponseCode) -> Self {
        Self::new(code.code(), code.message())
    }
}

/// Outcome of classifying an arbitrary failure.
#[derive(Debug)]
pub enum Fault {
    Recognized(RecognizedError),
    Unclassified(anyhow::Error),
}

impl Fault {
    /// Recognized errors are matched first; everything else is unclassified.
    ///
    /// The match is on the outermost error only. A recognized error wrapped
    /// with `.context(..)` or held as the source of another error is
    /// unclassified, and its message is the wrapper's description.
    pub fn classify(error: anyhow::Error) -> Self {
        let outermost = error.chain().next();
        if !outermost.is_some_and(|top| top.is::<RecognizedError>()) {
            return Self::Unclassified(error);
        }

        match error.downcast::<RecognizedError>() {
            Ok(recognized) => Self::Recognized(recognized),
            Err(other) => Self::Unclassified(other),
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, Self::Recognized(_))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("failure envelope (code {code}) must not carry data")]
    DataOnFailure { code: i32 },
}
