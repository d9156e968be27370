//! Signing with secp256k1 keys that live in a remote key vault.
//!
//! The vault only hands out `r || s`. [`KeyVaultSigner`] turns that into a low-s signature with
//! the recovery identifier the vault left out.

pub mod error;
pub mod key_vault;
pub mod remote;
pub mod signer;

pub use self::error::{KeyVaultError, SignerError};
pub use self::key_vault::{KeyVaultClient, TokenSource};
pub use self::remote::{BoxError, RemoteSigner};
pub use self::signer::KeyVaultSigner;
