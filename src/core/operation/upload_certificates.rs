//! Certificate upload.

use std::fs;

use tracing::info;
use zeroize::Zeroizing;

use super::{Operation, Readiness};
use crate::core::command::UploadCertificateFilesArgs;
use crate::core::constants::CERTIFICATE_FILES;
use crate::core::engine::Services;
use crate::core::store::layout;
use crate::error::{PreconditionError, Result};

/// Puts the certificate files of a directory into the config store.
pub struct UploadCertificateFiles<'a> {
    services: &'a Services,
    args: &'a UploadCertificateFilesArgs,
}

impl<'a> UploadCertificateFiles<'a> {
    pub fn new(services: &'a Services, args: &'a UploadCertificateFilesArgs) -> Self {
        Self { services, args }
    }

    /// The directory and every expected file must exist.
    fn check_files(&self) -> Result<()> {
        if !self.args.cert_dir.is_dir() {
            return Err(PreconditionError::MissingFile(self.args.cert_dir.clone()).into());
        }
        match CERTIFICATE_FILES
            .iter()
            .map(|file| self.args.cert_dir.join(file))
            .find(|path| !path.is_file())
        {
            Some(path) => Err(PreconditionError::MissingFile(path).into()),
            None => Ok(()),
        }
    }
}

impl Operation for UploadCertificateFiles<'_> {
    fn name(&self) -> &'static str {
        "upload-certificate-files"
    }

    /// A missing directory or file is an error, never a skip.
    fn is_runnable(&self) -> Result<Readiness> {
        self.check_files()?;
        Ok(Readiness::Ready)
    }

    fn run(&self) -> Result<()> {
        self.check_files()?;

        for file in CERTIFICATE_FILES {
            let contents = Zeroizing::new(fs::read_to_string(self.args.cert_dir.join(file))?);
            self.services
                .store
                .put(&layout::certificate(file), contents.as_str())?;
            info!(file, "uploaded certificate file");
        }

        Ok(())
    }
}
