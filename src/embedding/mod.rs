//! Embedding provider interface.
//!
//! The model itself is an external collaborator: a black box mapping a
//! string to a fixed-length vector, deterministic for a fixed model version.
//! [`RemoteEmbedder`] talks to the deployed model service; [`StubEmbedder`]
//! is the deterministic test double.

pub mod error;
pub mod remote;

#[cfg(any(test, feature = "mock"))]
pub mod stub;

pub use error::EmbeddingError;
pub use remote::RemoteEmbedder;

#[cfg(any(test, feature = "mock"))]
pub use stub::StubEmbedder;

/// An embedding provider. Must be callable concurrently.
pub trait Embedder: Send + Sync {
    /// Embeds a single string into a `dim()`-length vector.
    fn embed(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Vec<f32>, EmbeddingError>> + Send;

    /// Fixed output dimensionality for this deployment.
    fn dim(&self) -> usize;
}
