use std::path::PathBuf;

use tracing::debug;

use crate::{error::Error, helpers::read_secret_string, KeyVaultCredentials, ZeroizeString};

/// The way a caller authenticates against the key vault.
#[derive(Clone, Debug, PartialEq)]
pub enum Credential {
    /// An application registration authenticating with a client secret.
    ClientSecret { tenant_id: String, client_id: String, secret: ZeroizeString },
    /// An application registration authenticating with a certificate on disk.
    ClientCertificate { tenant_id: String, client_id: String, certificate_path: PathBuf },
    /// A bearer token obtained out of band.
    AccessToken(ZeroizeString),
}

impl Credential {
    pub fn kind(&self) -> &'static str {
        match self {
            Credential::ClientSecret { .. } => "client_secret",
            Credential::ClientCertificate { .. } => "client_certificate",
            Credential::AccessToken(_) => "access_token",
        }
    }
}

impl KeyVaultCredentials {
    /// Picks the credential to authenticate with.
    ///
    /// A client secret (inline, then from `client_secret_path`) wins over a client certificate,
    /// which wins over a static access token.
    pub fn credential(&self) -> Result<Credential, Error> {
        let credential = if let Some(secret) = self.client_secret.as_ref().filter(|s| !s.is_empty())
        {
            self.client_secret_credential(secret.clone())?
        } else if let Some(path) = &self.client_secret_path {
            let secret = read_secret_string(path).map_err(Error::UnableToReadClientSecret)?;
            self.client_secret_credential(secret)?
        } else if let Some(path) = &self.client_certificate_path {
            Credential::ClientCertificate {
                tenant_id: self.required(&self.tenant_id, "tenant_id")?,
                client_id: self.required(&self.client_id, "client_id")?,
                certificate_path: path.clone(),
            }
        } else if let Some(token) = self.access_token.as_ref().filter(|t| !t.is_empty()) {
            Credential::AccessToken(token.clone())
        } else {
            return Err(Error::CredentialsNotFound);
        };

        debug!(kind = credential.kind(), "selected key vault credential");
        Ok(credential)
    }

    fn client_secret_credential(&self, secret: ZeroizeString) -> Result<Credential, Error> {
        Ok(Credential::ClientSecret {
            tenant_id: self.required(&self.tenant_id, "tenant_id")?,
            client_id: self.required(&self.client_id, "client_id")?,
            secret,
        })
    }

    fn required(&self, value: &str, field: &'static str) -> Result<String, Error> {
        match value.trim().is_empty() {
            true => Err(Error::MissingField(field)),
            false => Ok(value.to_string()),
        }
    }
}
