//! Provisioning commands.
//!
//! Each variant maps to exactly one operation (see `Engine::resolve`).

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::core::constants;
use crate::core::domain::StackKind;

/// A provisioning command and its parameters.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Derive the CMS environment configuration and upload it to the config store
    CreateCmsConfig(CreateCmsConfigArgs),

    /// Obtain TLS certificates for the environment from an ACME certificate authority
    GenerateCertificateFiles(GenerateCertificateFilesArgs),

    /// Upload certificate files from a directory to the config store
    UploadCertificateFiles(UploadCertificateFilesArgs),

    /// Generate the Vault ACL token for the storage tier
    CreateVaultAcl,

    /// Generate the CMS database password
    CreateCmsDatabasePassword,

    /// Import an SSH public key as an EC2 key pair
    ImportKeyPair(ImportKeyPairArgs),

    /// Verify a stack's AMI and record where its instances can be placed
    PreparePlacement(PreparePlacementArgs),
}

impl Command {
    /// Command name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateCmsConfig(_) => "create-cms-config",
            Self::GenerateCertificateFiles(_) => "generate-certificate-files",
            Self::UploadCertificateFiles(_) => "upload-certificate-files",
            Self::CreateVaultAcl => "create-vault-acl",
            Self::CreateCmsDatabasePassword => "create-cms-database-password",
            Self::ImportKeyPair(_) => "import-key-pair",
            Self::PreparePlacement(_) => "prepare-placement",
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct CreateCmsConfigArgs {
    /// Group whose members administer CMS
    #[arg(long)]
    pub admin_group: String,

    /// Additional property for the CMS environment (KEY=VALUE, repeatable)
    #[arg(long = "property", value_name = "KEY=VALUE", value_parser = parse_property)]
    pub properties: Vec<(String, String)>,
}

impl CreateCmsConfigArgs {
    /// Additional properties; a repeated key keeps its last value.
    pub fn additional_properties(&self) -> BTreeMap<String, String> {
        self.properties.iter().cloned().collect()
    }
}

#[derive(Debug, Clone, Args)]
pub struct GenerateCertificateFilesArgs {
    /// Base domain, e.g. example.com
    #[arg(long)]
    pub base_domain: String,

    /// Common name to use instead of <environment>.<base-domain>
    #[arg(long)]
    pub edge_domain_override: Option<String>,

    /// Origin name to use instead of origin.<environment>.<base-domain>
    #[arg(long)]
    pub origin_domain_override: Option<String>,

    /// Load balancer name to use instead of <environment>.<region>.<base-domain>
    #[arg(long)]
    pub load_balancer_domain_override: Option<String>,

    /// Additional subject alternative name (repeatable)
    #[arg(long = "san", value_name = "NAME")]
    pub subject_alternative_names: Vec<String>,

    /// Directory the certificate files are written to
    #[arg(long, default_value = constants::DEFAULT_CERT_DIR)]
    pub cert_dir: PathBuf,

    /// ACME directory URL (defaults to the configured directory)
    #[arg(long)]
    pub acme_url: Option<String>,

    /// Route 53 hosted zone used for DNS validation
    #[arg(long)]
    pub hosted_zone_id: String,

    /// Contact email registered with the certificate authority
    #[arg(long)]
    pub contact_email: String,

    /// Enable the Let's Encrypt chain compatibility mode (applies to the whole process)
    #[arg(long)]
    pub enable_le_certfix: bool,

    /// Accept the certificate authority's terms of service
    #[arg(long)]
    pub accept_acme_tos: bool,

    /// Never ask for confirmation
    #[arg(long)]
    pub no_tty: bool,
}

#[derive(Debug, Clone, Args)]
pub struct UploadCertificateFilesArgs {
    /// Directory that contains the certificate files
    #[arg(long = "cert-dir-path")]
    pub cert_dir: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct ImportKeyPairArgs {
    /// Key pair name
    #[arg(long)]
    pub key_name: String,

    /// File holding the OpenSSH public key
    #[arg(long)]
    pub public_key_file: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct PreparePlacementArgs {
    /// Stack the AMI is built for
    #[arg(long)]
    pub stack: StackKind,

    /// AMI id
    #[arg(long)]
    pub ami_id: String,
}

fn parse_property(value: &str) -> Result<(String, String), String> {
    let (key, val) = value
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", value))?;
    let key = key.trim();
    if key.is_empty() {
        return Err("property key cannot be empty".to_string());
    }
    Ok((key.to_string(), val.to_string()))
}
