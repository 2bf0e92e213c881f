use crate::envelope::Envelope;
use crate::error::RecognizedError;
use std::future::Future;

/// Inverse of the adapter.
///
/// A success yields its data (`None` for an empty success). A failure comes
/// back as a [`RecognizedError`] with the envelope's code and message, so the
/// same recovery protocol can run again further downstream.
pub async fn unwrap<F, T>(envelope: F) -> Result<Option<T>, RecognizedError>
where
    F: Future<Output = Envelope<T>>,
{
    envelope.await.into_result()
}

/// Applies [`Envelope::map_data`] once `envelope` resolves.
pub async fn map_response<F, T, U, M>(envelope: F, mapper: M) -> Envelope<U>
where
    F: Future<Output = Envelope<T>>,
    M: FnOnce(T) -> U,
{
    envelope.await.map_data(mapper)
}
