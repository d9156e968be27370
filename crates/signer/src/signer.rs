use account_utils::KeyVaultCredentials;
use alloy_primitives::{eip191_hash_message, Address, B256};
use tokio::sync::OnceCell;
use tracing::{debug, instrument};
use vaultsig_primitives::{
    address::ethereum_address, resolve_recovery_id, RawSignature, RecoverAddress,
    RecoveryIdConvention, ResolvedSignature, Secp256k1Recovery, SignatureError,
};

use crate::{
    error::{KeyVaultError, SignerError},
    key_vault::KeyVaultClient,
    remote::RemoteSigner,
};

/// Produces publication-ready `(r, s, v)` signatures from a [`RemoteSigner`].
///
/// The signer address is derived from the remote public key on first use and cached for the
/// lifetime of the instance.
pub struct KeyVaultSigner<S, R = Secp256k1Recovery> {
    remote: S,
    recoverer: R,
    convention: RecoveryIdConvention,
    address: OnceCell<Address>,
}

impl KeyVaultSigner<KeyVaultClient> {
    /// Connects a signer to the key described by `credentials`.
    pub fn from_credentials(credentials: &KeyVaultCredentials) -> Result<Self, KeyVaultError> {
        let client = KeyVaultClient::from_credentials(credentials)?;
        Ok(Self::new(client).with_convention(credentials.recovery_id_convention))
    }
}

impl<S: RemoteSigner> KeyVaultSigner<S> {
    pub fn new(remote: S) -> Self {
        Self {
            remote,
            recoverer: Secp256k1Recovery,
            convention: RecoveryIdConvention::default(),
            address: OnceCell::new(),
        }
    }
}

impl<S, R> KeyVaultSigner<S, R>
where
    S: RemoteSigner,
    R: RecoverAddress + Send + Sync,
{
    pub fn with_convention(mut self, convention: RecoveryIdConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Replaces the public-key recovery primitive.
    pub fn with_recoverer<R2: RecoverAddress + Send + Sync>(
        self,
        recoverer: R2,
    ) -> KeyVaultSigner<S, R2> {
        KeyVaultSigner {
            remote: self.remote,
            recoverer,
            convention: self.convention,
            address: self.address,
        }
    }

    pub fn convention(&self) -> RecoveryIdConvention {
        self.convention
    }

    /// Returns the address of the remote key.
    pub async fn address(&self) -> Result<Address, SignerError> {
        self.address
            .get_or_try_init(|| async {
                let public_key = self.remote.public_key().await.map_err(SignerError::Remote)?;
                let address = ethereum_address(&public_key)?;
                debug!(%address, "derived signer address");
                Ok::<_, SignerError>(address)
            })
            .await
            .copied()
    }

    /// Signs `digest` remotely and completes the signature with its recovery identifier.
    #[instrument(skip_all, fields(digest = %digest))]
    pub async fn sign_digest(&self, digest: &B256) -> Result<ResolvedSignature, SignerError> {
        let raw = self.remote.sign_digest(digest).await.map_err(SignerError::Remote)?;
        let canonical = RawSignature::from_slice(&raw)
            .and_then(|raw| raw.canonicalize())
            .map_err(SignatureError::from)?;

        let address = self.address().await?;
        let resolved = resolve_recovery_id(
            &self.recoverer,
            digest,
            &canonical,
            &address.to_string(),
            self.convention,
        )?;

        debug!(v = resolved.v(), "resolved recovery identifier");
        Ok(resolved)
    }

    /// Signs `message` as an EIP-191 personal message.
    pub async fn sign_message<T: AsRef<[u8]>>(
        &self,
        message: T,
    ) -> Result<ResolvedSignature, SignerError> {
        self.sign_digest(&eip191_hash_message(message)).await
    }
}
