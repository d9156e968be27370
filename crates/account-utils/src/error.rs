use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum FsError {
    #[error("The file could not be created: {0}")]
    /// The file could not be created
    UnableToCreateFile(io::Error),
    #[error("Failed to set permissions: {0}")]
    /// Failed to set permissions
    UnableToSetPermissions(io::Error),
    #[error("Failed to retrieve file metadata: {0}")]
    /// Failed to retrieve file metadata
    UnableToRetrieveMetadata(io::Error),
    #[error("Failed to write bytes to file: {0}")]
    /// Failed to write bytes to file
    UnableToWriteFile(io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The credentials file could not be opened.
    #[error("Unable to open credentials file {0:?}: {1}")]
    UnableToOpenFile(PathBuf, io::Error),
    /// The credentials file could not be parsed as YAML.
    #[error("Unable to parse credentials file: {0}")]
    UnableToParseFile(serde_yaml::Error),
    /// The credentials could not be serialized as YAML.
    #[error("Unable to encode credentials: {0}")]
    UnableToEncodeFile(serde_yaml::Error),
    /// The credentials file could not be written to the filesystem.
    #[error(transparent)]
    UnableToWriteFile(#[from] FsError),
    #[error("Unable to read client secret: {0}")]
    UnableToReadClientSecret(String),
    /// None of the supported credential kinds is configured.
    #[error("Credentials not found")]
    CredentialsNotFound,
    #[error("Invalid vault url {url}: {reason}")]
    InvalidVaultUrl { url: String, reason: String },
    #[error("Missing required field `{0}`")]
    MissingField(&'static str),
}
