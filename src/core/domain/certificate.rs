//! Certificate request inputs.

use std::collections::BTreeSet;
use std::path::PathBuf;

/// Host names a certificate is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateNames {
    pub common_name: String,
    /// Subject alternative names, deduplicated and sorted.
    pub alternative_names: BTreeSet<String>,
}

impl CertificateNames {
    /// Alternative names joined for display.
    pub fn alternative_names_display(&self) -> String {
        self.alternative_names
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Everything the certificate-authority client needs for one issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateRequest {
    pub names: CertificateNames,
    pub directory: PathBuf,
    pub authority_url: String,
    pub hosted_zone_id: String,
    pub contact_email: String,
    pub accept_terms: bool,
}

impl CertificateRequest {
    pub fn common_name(&self) -> &str {
        &self.names.common_name
    }

    pub fn alternative_names(&self) -> &BTreeSet<String> {
        &self.names.alternative_names
    }
}
