use thiserror::Error;

/// Which scalar of a signature was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    R,
    S,
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Component::R => f.write_str("r"),
            Component::S => f.write_str("s"),
        }
    }
}

/// Reasons a signature returned by the remote signer cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedSignature {
    /// The signature buffer is not `r || s`.
    #[error("expected a {expected}-byte signature, got {got} bytes")]
    InvalidLength { expected: usize, got: usize },
    /// The scalar is zero.
    #[error("signature component {0} is zero")]
    Zero(Component),
    /// The scalar is not reduced modulo the curve order.
    #[error("signature component {0} is not less than the curve order")]
    OutOfRange(Component),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// The signature bytes or scalars are not a valid secp256k1 signature.
    #[error("malformed signature: {0}")]
    MalformedSignature(#[from] MalformedSignature),
    /// Neither recovery identifier recovers the expected signer.
    #[error("no recovery identifier recovers the expected address {expected}")]
    RecoveryMismatch { expected: String },
    /// The public key is not a 65-byte uncompressed SEC1 key.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
}
