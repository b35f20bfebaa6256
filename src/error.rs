//! Error types for citadel operations.
//!
//! Errors are grouped by concern and wrapped by the top-level [`Error`].
//! Precondition failures that the engine reports as a skip never reach
//! this module; the variants here are all fatal for the current command.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Cloud(#[from] CloudError),

    #[error(transparent)]
    Stack(#[from] StackError),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error(transparent)]
    Certificate(#[from] CertificateError),

    #[error("aborted by operator")]
    Aborted,

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Operator configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("missing required setting: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Config store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no record stored at {0}")]
    MissingRecord(String),

    #[error("malformed record at {key}: {reason}")]
    Malformed { key: String, reason: String },

    #[error("failed to read {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("store backend error: {0}")]
    Backend(#[from] CloudError),
}

/// An error returned by a cloud service.
///
/// Carries the provider's error code when one was returned so callers can
/// tell "not found" apart from every other failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{service} request failed: {message}")]
pub struct CloudError {
    service: &'static str,
    code: Option<String>,
    message: String,
}

impl CloudError {
    /// Create an error without a provider code.
    pub fn new(service: &'static str, message: impl Into<String>) -> Self {
        Self {
            service,
            code: None,
            message: message.into(),
        }
    }

    /// Attach the provider's error code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the provider reported exactly this error code.
    pub fn has_code(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }
}

/// Typed stack view errors.
#[derive(Error, Debug)]
pub enum StackError {
    #[error("{stack} stack is missing field {field}")]
    MissingField { stack: String, field: String },

    #[error("{stack} stack record is invalid: {reason}")]
    Invalid { stack: String, reason: String },
}

/// Raised when an operation's `run` is reached while its precondition does not hold.
#[derive(Error, Debug)]
pub enum PreconditionError {
    #[error("{0} is not present for this environment")]
    MissingSecret(&'static str),

    #[error("required file missing: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("{0}")]
    Unsatisfied(String),
}

/// Certificate issuance errors.
#[derive(Error, Debug)]
pub enum CertificateError {
    #[error("the certificate directory is not a directory or is not writable, path: {}", .path.display())]
    DirectoryNotWritable {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error(
        "compatibility mode mismatch: command requested {requested}, certificate authority client configured with {configured}"
    )]
    CompatibilityMismatch { requested: bool, configured: bool },

    #[error("failed to generate certificates: {0}")]
    GenerationFailed(#[source] AuthorityError),
}

/// An error from the certificate-authority client.
#[derive(Error, Debug)]
pub enum AuthorityError {
    #[error("acme client not found: {0}")]
    ClientNotFound(String),

    #[error("acme client exited with {status}: {stderr}")]
    ClientFailed { status: String, stderr: String },

    #[error("expected certificate output missing: {}", .0.display())]
    MissingOutput(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias using the top-level error.
pub type Result<T> = std::result::Result<T, Error>;
