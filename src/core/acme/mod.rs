//! Certificate-authority client.
//!
//! Issuance is delegated to an ACME client. Retries and rate-limit backoff
//! belong to that client; callers get one success or one error per request.

use crate::core::domain::CertificateRequest;
use crate::error::AuthorityError;

mod lego;

pub use lego::LegoClient;

/// Settings fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcmeSettings {
    /// ACME client binary name or path.
    pub binary: String,
    /// Let's Encrypt chain compatibility mode.
    ///
    /// Applies to every request this process makes, not only the next one.
    pub compatibility_mode: bool,
}

impl Default for AcmeSettings {
    fn default() -> Self {
        Self {
            binary: crate::core::constants::DEFAULT_ACME_BINARY.to_string(),
            compatibility_mode: false,
        }
    }
}

/// A client that obtains certificates and writes them to the request's directory.
pub trait CertificateAuthority {
    /// Whether the client was built with compatibility mode enabled.
    fn compatibility_mode(&self) -> bool;

    /// Obtain a certificate for the request's names and write the files.
    ///
    /// # Errors
    ///
    /// Returns `AuthorityError` for any network, validation, rate-limit or
    /// protocol failure reported by the client.
    fn generate_certificates(
        &self,
        request: &CertificateRequest,
    ) -> std::result::Result<(), AuthorityError>;
}
