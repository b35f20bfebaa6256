//! In-memory collaborators for library-level tests.
//!
//! Each fake is shared through `Rc` so a test can inspect it after the
//! engine has taken ownership of its services.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use citadel::core::acme::CertificateAuthority;
use citadel::core::cloud::{
    AvailabilityZone, CloudResult, ComputeClient, Filter, IdentityClient,
};
use citadel::core::domain::CertificateRequest;
use citadel::core::engine::{Engine, Services};
use citadel::core::prompt::{Answer, Prompt};
use citadel::core::store::{ConfigStore, MemoryStore};
use citadel::error::{AuthorityError, CloudError, Result};

use super::fixtures::{environment, ACCOUNT};

/// Identity client answering with a fixed account.
pub struct FakeIdentity {
    pub account: CloudResult<String>,
    pub calls: Cell<usize>,
}

impl Default for FakeIdentity {
    fn default() -> Self {
        Self {
            account: Ok(ACCOUNT.to_string()),
            calls: Cell::new(0),
        }
    }
}

/// Compute client with scripted answers.
#[derive(Default)]
pub struct FakeCompute {
    pub key_pairs: Option<CloudResult<Vec<String>>>,
    pub images: Option<CloudResult<Vec<String>>>,
    pub zones: Vec<AvailabilityZone>,
    pub imported: RefCell<Vec<(String, String)>>,
    pub image_filters: RefCell<Vec<Filter>>,
}

/// Certificate authority that records requests.
#[derive(Default)]
pub struct FakeAuthority {
    pub compatibility_mode: bool,
    pub failure: Option<String>,
    pub requests: RefCell<Vec<CertificateRequest>>,
}

impl FakeAuthority {
    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }
}

/// Prompt with a fixed answer that records what it was asked.
pub struct ScriptedPrompt {
    pub answer: Answer,
    pub asked: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn answering(answer: Answer) -> Self {
        Self {
            answer,
            asked: RefCell::new(Vec::new()),
        }
    }
}

/// Shares a fake between the test and the engine.
pub struct Shared<T>(pub Rc<T>);

impl ConfigStore for Shared<MemoryStore> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.0.get(key)
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.0.put(key, value)
    }
}

impl IdentityClient for Shared<FakeIdentity> {
    fn caller_account(&self) -> CloudResult<String> {
        self.0.calls.set(self.0.calls.get() + 1);
        self.0.account.clone()
    }
}

impl ComputeClient for Shared<FakeCompute> {
    fn import_key_pair(&self, name: &str, public_key: &str) -> CloudResult<String> {
        self.0
            .imported
            .borrow_mut()
            .push((name.to_string(), public_key.to_string()));
        Ok(name.to_string())
    }

    fn describe_key_pairs(&self, _name: &str) -> CloudResult<Vec<String>> {
        self.0.key_pairs.clone().unwrap_or_else(|| Ok(Vec::new()))
    }

    fn describe_images(&self, filters: &[Filter]) -> CloudResult<Vec<String>> {
        self.0.image_filters.borrow_mut().extend_from_slice(filters);
        self.0.images.clone().unwrap_or_else(|| Ok(Vec::new()))
    }

    fn describe_availability_zones(&self) -> CloudResult<Vec<AvailabilityZone>> {
        Ok(self.0.zones.clone())
    }
}

impl CertificateAuthority for Shared<FakeAuthority> {
    fn compatibility_mode(&self) -> bool {
        self.0.compatibility_mode
    }

    fn generate_certificates(
        &self,
        request: &CertificateRequest,
    ) -> std::result::Result<(), AuthorityError> {
        self.0.requests.borrow_mut().push(request.clone());
        match &self.0.failure {
            Some(message) => Err(AuthorityError::ClientFailed {
                status: "exit status: 1".to_string(),
                stderr: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl Prompt for Shared<ScriptedPrompt> {
    fn ask_to_proceed(&self, message: &str, _default: Answer) -> Result<Answer> {
        self.0.asked.borrow_mut().push(message.to_string());
        Ok(self.0.answer)
    }
}

/// Every collaborator of an engine, kept inspectable.
pub struct Fakes {
    pub store: Rc<MemoryStore>,
    pub identity: Rc<FakeIdentity>,
    pub compute: Rc<FakeCompute>,
    pub authority: Rc<FakeAuthority>,
    pub prompt: Rc<ScriptedPrompt>,
    pub interactive: bool,
}

impl Fakes {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            store: Rc::new(store),
            identity: Rc::new(FakeIdentity::default()),
            compute: Rc::new(FakeCompute::default()),
            authority: Rc::new(FakeAuthority::default()),
            prompt: Rc::new(ScriptedPrompt::answering(Answer::No)),
            interactive: false,
        }
    }

    pub fn with_identity(mut self, identity: FakeIdentity) -> Self {
        self.identity = Rc::new(identity);
        self
    }

    pub fn with_compute(mut self, compute: FakeCompute) -> Self {
        self.compute = Rc::new(compute);
        self
    }

    pub fn with_authority(mut self, authority: FakeAuthority) -> Self {
        self.authority = Rc::new(authority);
        self
    }

    /// Attach to a "terminal" whose operator gives `answer`.
    pub fn interactive(mut self, answer: Answer) -> Self {
        self.prompt = Rc::new(ScriptedPrompt::answering(answer));
        self.interactive = true;
        self
    }

    pub fn engine(&self) -> Engine {
        Engine::new(Services {
            environment: environment(),
            store: Box::new(Shared(self.store.clone())),
            identity: Box::new(Shared(self.identity.clone())),
            compute: Box::new(Shared(self.compute.clone())),
            authority: Box::new(Shared(self.authority.clone())),
            prompt: Box::new(Shared(self.prompt.clone())),
            interactive: self.interactive,
            acme_directory: "https://acme-staging.test/directory".to_string(),
        })
    }
}

/// A cloud error carrying a provider code.
pub fn cloud_error(code: &str, message: &str) -> CloudError {
    CloudError::new("ec2", message).with_code(code)
}
