//! ACME issuance through the `lego` client.
//!
//! ## Requirements
//!
//! - `lego` must be installed and on `PATH` (or configured with `[acme] binary`)
//! - AWS credentials able to change records in the hosted zone, since the
//!   DNS-01 challenge is answered through Route 53
//!
//! lego keeps its account and raw output under `<cert-dir>/.lego`. After a
//! successful run the files are laid out as `cert.pem`, `key.pem`, `ca.pem`
//! and `full-chain.pem` in the certificate directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use super::{AcmeSettings, CertificateAuthority};
use crate::core::constants::{CA_FILE, CERT_FILE, FULL_CHAIN_FILE, KEY_FILE};
use crate::core::domain::CertificateRequest;
use crate::error::AuthorityError;

/// Chain lego is asked to prefer in compatibility mode.
const COMPATIBILITY_CHAIN: &str = "ISRG Root X1";

const STATE_DIR: &str = ".lego";

const END_CERTIFICATE: &str = "-----END CERTIFICATE-----";

/// Certificate authority client driving the `lego` binary.
#[derive(Debug, Clone)]
pub struct LegoClient {
    settings: AcmeSettings,
}

impl LegoClient {
    pub fn new(settings: AcmeSettings) -> Self {
        if settings.compatibility_mode {
            warn!(
                chain = COMPATIBILITY_CHAIN,
                "ACME compatibility mode enabled; it applies to every certificate request made by this process"
            );
        }
        Self { settings }
    }

    pub fn settings(&self) -> &AcmeSettings {
        &self.settings
    }

    /// Command-line arguments for one issuance.
    pub fn arguments(&self, request: &CertificateRequest) -> Vec<String> {
        let state_dir = request.directory.join(STATE_DIR);
        let mut args = vec![
            "--server".to_string(),
            request.authority_url.clone(),
            "--email".to_string(),
            request.contact_email.clone(),
            "--path".to_string(),
            state_dir.display().to_string(),
            "--dns".to_string(),
            "route53".to_string(),
            "--domains".to_string(),
            request.common_name().to_string(),
        ];
        for name in request.alternative_names() {
            if name != request.common_name() {
                args.push("--domains".to_string());
                args.push(name.clone());
            }
        }
        if request.accept_terms {
            args.push("--accept-tos".to_string());
        }

        args.push("run".to_string());
        if self.settings.compatibility_mode {
            args.push("--preferred-chain".to_string());
            args.push(COMPATIBILITY_CHAIN.to_string());
        }
        args
    }
}

impl CertificateAuthority for LegoClient {
    fn compatibility_mode(&self) -> bool {
        self.settings.compatibility_mode
    }

    fn generate_certificates(
        &self,
        request: &CertificateRequest,
    ) -> std::result::Result<(), AuthorityError> {
        let binary = which::which(&self.settings.binary)
            .map_err(|e| AuthorityError::ClientNotFound(format!("{}: {}", self.settings.binary, e)))?;

        let args = self.arguments(request);
        debug!(binary = %binary.display(), ?args, "running acme client");
        info!(
            common_name = request.common_name(),
            authority = %request.authority_url,
            "requesting certificate"
        );

        let output = Command::new(&binary)
            .args(&args)
            .env("AWS_HOSTED_ZONE_ID", &request.hosted_zone_id)
            .stdin(Stdio::null())
            .output()?;

        if !output.status.success() {
            return Err(AuthorityError::ClientFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        lay_out(&request.directory.join(STATE_DIR), request)
    }
}

/// Copy lego's output into the certificate directory under stable names.
fn lay_out(state_dir: &Path, request: &CertificateRequest) -> std::result::Result<(), AuthorityError> {
    let stem = request.common_name().replace('*', "_");
    let issued = state_dir.join("certificates");
    let read = |file: String| -> std::result::Result<String, AuthorityError> {
        let path: PathBuf = issued.join(file);
        fs::read_to_string(&path).map_err(|_| AuthorityError::MissingOutput(path))
    };

    let chain = read(format!("{}.crt", stem))?;
    let issuer = read(format!("{}.issuer.crt", stem))?;
    let key = read(format!("{}.key", stem))?;
    let leaf = leaf_certificate(&chain)
        .ok_or_else(|| AuthorityError::Other("issued certificate contains no PEM block".to_string()))?;

    let dir = &request.directory;
    fs::write(dir.join(CERT_FILE), leaf)?;
    fs::write(dir.join(CA_FILE), &issuer)?;
    fs::write(dir.join(FULL_CHAIN_FILE), &chain)?;
    write_private(&dir.join(KEY_FILE), &key)?;

    info!(directory = %dir.display(), "certificate files written");
    Ok(())
}

/// Write through a temporary file so the key is never readable by others.
///
/// `NamedTempFile` creates its file with mode 0600 on unix; `persist`
/// replaces any existing file along with its permissions.
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    use std::io::Write;

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// First certificate of a PEM bundle, including its trailing newline.
fn leaf_certificate(chain: &str) -> Option<String> {
    let end = chain.find(END_CERTIFICATE)? + END_CERTIFICATE.len();
    let mut leaf = chain[..end].trim_start().to_string();
    leaf.push('\n');
    Some(leaf)
}
