//! # Envelope
//!
//! Converts fallible futures and streams into a uniform result envelope
//! (`ok`, `code`, `message`, `data`, `createdAt`) and back again.
//!
//! The adapter never fails: a [`RecognizedError`] becomes a failure envelope
//! with its own code and message, and any other error becomes a failure with
//! the fault code (9999 unless configured otherwise). [`unwrap`] reverses the
//! process, turning failure envelopes back into recognized errors.
//!
//! ## Basic Usage
//!
//! ```rust
//! use envelope::*;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let envelope = wrap_future(async { Ok::<_, anyhow::Error>(42) }).await;
//! assert!(envelope.is_ok());
//! assert_eq!(envelope.data(), Some(&42));
//!
//! let envelope = wrap_future(async {
//!     Err::<i32, _>(RecognizedError::new(1003, "forbidden"))
//! })
//! .await;
//! assert_eq!(envelope.code(), 1003);
//!
//! let err = unwrap(async { envelope }).await.unwrap_err();
//! assert_eq!(err.code(), 1003);
//! # });
//! ```
//!
//! ## Builder Pattern
//!
//! ```rust
//! use envelope::*;
//! use futures_util::stream;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let envelope = EnvelopeBuilder::from_stream(stream::iter(vec![
//!     Ok::<_, anyhow::Error>("a"),
//!     Ok("b"),
//! ]))
//! .success_message("listed")
//! .on_unrecognized(|fault| Envelope::failure(5000, fault.to_string()))
//! .build()
//! .await;
//!
//! assert_eq!(envelope.message(), "listed");
//! assert_eq!(envelope.into_data(), Some(vec!["a", "b"]));
//! # });
//! ```

mod adapter;
mod builder;
mod config;
mod envelope;
mod error;
mod service;
mod unwrap;

pub use adapter::*;
pub use builder::*;
pub use config::*;
pub use envelope::*;
pub use error::*;
pub use service::*;
pub use unwrap::{map_response, unwrap};

// Re-export the derive macro
pub use envelope_derive::AsEnvelope;

pub trait AsEnvelope {
    fn into_envelope(self) -> Envelope<Self>
    where
        Self: Sized;

    /// Success envelope stamped with `config`'s code and message instead of
    /// the type's own.
    fn into_envelope_with(self, config: &EnvelopeConfig) -> Envelope<Self>
    where
        Self: Sized,
    {
        Envelope::success_with(
            config.success_code,
            config.success_message.as_str(),
            Some(self),
        )
    }
}
