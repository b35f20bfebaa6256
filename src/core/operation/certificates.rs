//! Certificate issuance.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::{Operation, Readiness};
use crate::core::command::GenerateCertificateFilesArgs;
use crate::core::domain::{CertificateNames, CertificateRequest, Environment};
use crate::core::engine::Services;
use crate::core::prompt::Answer;
use crate::error::{CertificateError, Error, Result};

/// Names the certificate is issued for.
///
/// Every computed name can be replaced by an override; a blank override
/// counts as not given. The origin and load balancer names are always
/// alternative names, as is every extra name.
pub fn certificate_names(
    environment: &Environment,
    args: &GenerateCertificateFilesArgs,
) -> CertificateNames {
    let env = environment.name();
    let base = args.base_domain.trim();

    let common_name = given(&args.edge_domain_override)
        .unwrap_or_else(|| format!("{}.{}", env, base));
    let origin = given(&args.origin_domain_override)
        .unwrap_or_else(|| format!("origin.{}.{}", env, base));
    let load_balancer = given(&args.load_balancer_domain_override)
        .unwrap_or_else(|| format!("{}.{}.{}", env, environment.region(), base));

    let mut alternative_names = BTreeSet::from([origin, load_balancer]);
    alternative_names.extend(
        args.subject_alternative_names
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string),
    );

    CertificateNames {
        common_name,
        alternative_names,
    }
}

fn given(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Create the directory if needed and make sure files can be written to it.
fn prepare_directory(path: &Path) -> std::result::Result<(), CertificateError> {
    let not_writable = |source| CertificateError::DirectoryNotWritable {
        path: path.to_path_buf(),
        source,
    };

    fs::create_dir_all(path).map_err(|e| not_writable(Some(e)))?;
    if !path.is_dir() {
        return Err(not_writable(None));
    }
    tempfile::tempfile_in(path).map_err(|e| not_writable(Some(e)))?;

    debug!(path = %path.display(), "certificate directory ready");
    Ok(())
}

/// Obtains certificates from the ACME certificate authority.
pub struct GenerateCertificateFiles<'a> {
    services: &'a Services,
    args: &'a GenerateCertificateFilesArgs,
}

impl<'a> GenerateCertificateFiles<'a> {
    pub fn new(services: &'a Services, args: &'a GenerateCertificateFilesArgs) -> Self {
        Self { services, args }
    }

    fn interactive(&self) -> bool {
        self.services.interactive && !self.args.no_tty
    }

    fn request(&self) -> CertificateRequest {
        CertificateRequest {
            names: certificate_names(&self.services.environment, self.args),
            directory: self.args.cert_dir.clone(),
            authority_url: self
                .args
                .acme_url
                .clone()
                .unwrap_or_else(|| self.services.acme_directory.clone()),
            hosted_zone_id: self.args.hosted_zone_id.clone(),
            contact_email: self.args.contact_email.clone(),
            accept_terms: self.args.accept_acme_tos,
        }
    }
}

impl Operation for GenerateCertificateFiles<'_> {
    fn name(&self) -> &'static str {
        "generate-certificate-files"
    }

    fn is_runnable(&self) -> Result<Readiness> {
        Ok(Readiness::Ready)
    }

    fn run(&self) -> Result<()> {
        let configured = self.services.authority.compatibility_mode();
        if self.args.enable_le_certfix != configured {
            return Err(CertificateError::CompatibilityMismatch {
                requested: self.args.enable_le_certfix,
                configured,
            }
            .into());
        }

        let request = self.request();
        prepare_directory(&request.directory)?;

        let summary = format!(
            "Certificate will be created with common name: {}, directory: {}, alternative names: {}",
            request.common_name(),
            request.directory.display(),
            request.names.alternative_names_display()
        );

        if self.interactive() {
            let answer = self.services.prompt.ask_to_proceed(
                &format!("{}. Proceed?", summary),
                Answer::No,
            )?;
            if answer == Answer::No {
                return Err(Error::Aborted);
            }
        } else {
            info!("{}", summary);
        }

        info!(authority = %request.authority_url, "requesting certificates");
        self.services
            .authority
            .generate_certificates(&request)
            .map_err(CertificateError::GenerationFailed)?;
        info!(directory = %request.directory.display(), "certificates written");

        Ok(())
    }
}
