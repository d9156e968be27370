use account_utils::{Credential, KeyVaultCredentials, ZeroizeString};
use alloy_primitives::B256;
use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, trace};
use url::Url;
use vaultsig_primitives::{address::public_key_from_coordinates, consts::UNCOMPRESSED_PUBLIC_KEY_LENGTH};

use crate::{
    error::KeyVaultError,
    remote::{BoxError, RemoteSigner},
};

/// Key Vault REST API version used for every request.
pub const API_VERSION: &str = "7.4";

/// JWA name of ECDSA over secp256k1 with a pre-hashed input.
pub const SIGNING_ALGORITHM: &str = "ES256K";

/// Supplies the bearer token attached to key vault requests.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn token(&self) -> Result<ZeroizeString, KeyVaultError>;
}

#[async_trait]
impl TokenSource for Credential {
    async fn token(&self) -> Result<ZeroizeString, KeyVaultError> {
        match self {
            Credential::AccessToken(token) => Ok(token.clone()),
            other => Err(KeyVaultError::UnsupportedCredential(other.kind())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct KeyBundle {
    key: JsonWebKey,
}

#[derive(Clone, Debug, Deserialize)]
struct JsonWebKey {
    #[serde(default)]
    kid: Option<String>,
    kty: String,
    #[serde(default)]
    crv: Option<String>,
    #[serde(default)]
    x: Option<String>,
    #[serde(default)]
    y: Option<String>,
}

impl JsonWebKey {
    fn public_key(&self) -> Result<[u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH], KeyVaultError> {
        let crv = self.crv.clone().unwrap_or_default();
        let is_ec = matches!(self.kty.as_str(), "EC" | "EC-HSM");
        let is_secp256k1 = matches!(crv.as_str(), "P-256K" | "SECP256K1");
        if !is_ec || !is_secp256k1 {
            return Err(KeyVaultError::UnsupportedKey { kty: self.kty.clone(), crv });
        }

        let x = decode_base64url("x", self.x.as_deref())?;
        let y = decode_base64url("y", self.y.as_deref())?;
        Ok(public_key_from_coordinates(&x, &y)?)
    }

    /// The version segment of `kid`, `https://{vault}/keys/{name}/{version}`.
    fn version(&self) -> Option<String> {
        let kid = Url::parse(self.kid.as_deref()?).ok()?;
        let segments: Vec<_> = kid.path_segments()?.filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["keys", _, version] => Some(version.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
struct SignRequest<'a> {
    alg: &'a str,
    value: String,
}

#[derive(Debug, Deserialize)]
struct SignResponse {
    #[serde(default)]
    value: Option<String>,
}

impl SignResponse {
    fn signature(&self) -> Result<Vec<u8>, KeyVaultError> {
        match self.value.as_deref() {
            None | Some("") => Err(KeyVaultError::EmptySignature),
            value => decode_base64url("value", value),
        }
    }
}

fn decode_base64url(field: &'static str, value: Option<&str>) -> Result<Vec<u8>, KeyVaultError> {
    let value = value.ok_or(KeyVaultError::Decode { field, reason: "missing".to_string() })?;
    URL_SAFE_NO_PAD
        .decode(value.trim_end_matches('='))
        .map_err(|e| KeyVaultError::Decode { field, reason: e.to_string() })
}

/// HTTP client for a single secp256k1 key in an Azure-style key vault.
pub struct KeyVaultClient<T = Credential> {
    http: reqwest::Client,
    vault_url: Url,
    key_name: String,
    key_version: Option<String>,
    tokens: T,
    key: OnceCell<JsonWebKey>,
}

impl KeyVaultClient<Credential> {
    /// Builds a client from validated credentials, selecting the credential to use.
    pub fn from_credentials(credentials: &KeyVaultCredentials) -> Result<Self, KeyVaultError> {
        credentials.validate()?;
        let credential = credentials.credential()?;
        Ok(Self::new(
            credentials.vault_url()?,
            credentials.key_name.clone(),
            credentials.key_version.clone(),
            credential,
        ))
    }
}

impl<T: TokenSource> KeyVaultClient<T> {
    pub fn new(vault_url: Url, key_name: String, key_version: Option<String>, tokens: T) -> Self {
        Self {
            http: reqwest::Client::new(),
            vault_url,
            key_name,
            key_version: key_version.filter(|v| !v.is_empty()),
            tokens,
            key: OnceCell::new(),
        }
    }

    /// Returns the url of the key, or of `operation` on it.
    pub fn key_url(
        &self,
        version: Option<&str>,
        operation: Option<&str>,
    ) -> Result<Url, KeyVaultError> {
        let mut url = self.vault_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| KeyVaultError::InvalidUrl(self.vault_url.to_string()))?;
            segments.pop_if_empty().push("keys").push(&self.key_name);
            if let Some(version) = version {
                segments.push(version);
            }
            if let Some(operation) = operation {
                segments.push(operation);
            }
        }
        url.query_pairs_mut().append_pair("api-version", API_VERSION);
        Ok(url)
    }

    async fn key(&self) -> Result<&JsonWebKey, KeyVaultError> {
        self.key
            .get_or_try_init(|| async {
                let url = self.key_url(self.key_version.as_deref(), None)?;
                trace!(%url, "fetching key");

                let token = self.tokens.token().await?;
                let response = self.http.get(url).bearer_auth(token.as_str()).send().await?;
                let bundle: KeyBundle = check_status(response).await?.json().await?;

                debug!(kid = ?bundle.key.kid, "fetched key from vault");
                Ok::<_, KeyVaultError>(bundle.key)
            })
            .await
    }

    /// Fetches the key and returns its uncompressed public key.
    pub async fn fetch_public_key(
        &self,
    ) -> Result<[u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH], KeyVaultError> {
        self.key().await?.public_key()
    }

    /// Asks the vault to sign `digest` with ES256K.
    pub async fn sign(&self, digest: &B256) -> Result<Vec<u8>, KeyVaultError> {
        let version = match &self.key_version {
            Some(version) => Some(version.clone()),
            None => self.key().await?.version(),
        };
        let url = self.key_url(version.as_deref(), Some("sign"))?;
        trace!(%url, %digest, "requesting signature");

        let body = SignRequest { alg: SIGNING_ALGORITHM, value: URL_SAFE_NO_PAD.encode(digest) };
        let token = self.tokens.token().await?;
        let response =
            self.http.post(url).bearer_auth(token.as_str()).json(&body).send().await?;
        let signed: SignResponse = check_status(response).await?.json().await?;

        signed.signature()
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, KeyVaultError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(KeyVaultError::Status { status, body });
    }
    Ok(response)
}

#[async_trait]
impl<T: TokenSource> RemoteSigner for KeyVaultClient<T> {
    async fn public_key(&self) -> Result<Vec<u8>, BoxError> {
        Ok(self.fetch_public_key().await?.to_vec())
    }

    async fn sign_digest(&self, digest: &B256) -> Result<Vec<u8>, BoxError> {
        Ok(self.sign(digest).await?)
    }
}
