use alloy_primitives::B256;
use async_trait::async_trait;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A key-custody service that signs digests with a key it never exposes.
///
/// Both calls are single request/response operations. Errors are returned to the caller of
/// [`crate::KeyVaultSigner`] unmodified.
#[async_trait]
pub trait RemoteSigner: Send + Sync {
    /// Returns the SEC1 uncompressed public key (`0x04 || x || y`) of the signing key.
    async fn public_key(&self) -> Result<Vec<u8>, BoxError>;

    /// Signs `digest` and returns the raw `r || s` signature.
    async fn sign_digest(&self, digest: &B256) -> Result<Vec<u8>, BoxError>;
}

#[async_trait]
impl<T: RemoteSigner + ?Sized> RemoteSigner for std::sync::Arc<T> {
    async fn public_key(&self) -> Result<Vec<u8>, BoxError> {
        (**self).public_key().await
    }

    async fn sign_digest(&self, digest: &B256) -> Result<Vec<u8>, BoxError> {
        (**self).sign_digest(digest).await
    }
}
