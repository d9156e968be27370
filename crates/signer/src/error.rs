use vaultsig_primitives::SignatureError;

use crate::remote::BoxError;

#[derive(Debug, thiserror::Error)]
pub enum KeyVaultError {
    #[error(transparent)]
    Credentials(#[from] account_utils::error::Error),
    /// Only bearer tokens obtained out of band can be used directly.
    #[error("Credential `{0}` needs an identity token exchange, configure an access token instead")]
    UnsupportedCredential(&'static str),
    #[error("Invalid key vault url: {0}")]
    InvalidUrl(String),
    #[error("Key vault request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Key vault returned {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },
    #[error("Unable to decode `{field}`: {reason}")]
    Decode { field: &'static str, reason: String },
    #[error("Unsupported key type {kty} on curve {crv}")]
    UnsupportedKey { kty: String, crv: String },
    #[error("Key vault signed result empty")]
    EmptySignature,
    #[error(transparent)]
    PublicKey(#[from] SignatureError),
}

#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    /// The remote signer failed; its error is passed through as is.
    #[error(transparent)]
    Remote(BoxError),
    #[error(transparent)]
    Signature(#[from] SignatureError),
}
