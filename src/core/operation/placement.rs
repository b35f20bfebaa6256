//! Instance placement for a stack.
//!
//! Checks that the stack's image exists and is tagged for it, then records
//! the image and the zones its instances can be launched in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{Operation, Readiness};
use crate::core::cloud::Ec2Service;
use crate::core::command::PreparePlacementArgs;
use crate::core::constants::AMI_COMPONENT_TAG;
use crate::core::engine::Services;
use crate::core::store::layout;
use crate::error::{PreconditionError, Result};

/// Placement record stored for a stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub ami_id: String,
    pub availability_zones: Vec<String>,
    pub prepared_at: DateTime<Utc>,
}

struct Survey {
    ami_tagged: bool,
    zones: Vec<String>,
}

impl Survey {
    fn reasons(&self, args: &PreparePlacementArgs) -> Vec<String> {
        let mut reasons = Vec::new();
        if !self.ami_tagged {
            reasons.push(format!(
                "AMI {} with {}={} not found",
                args.ami_id, AMI_COMPONENT_TAG, args.stack
            ));
        }
        if self.zones.is_empty() {
            reasons.push("no availability zone is available in the region".to_string());
        }
        reasons
    }
}

/// Records where a stack's instances can be placed.
pub struct PreparePlacement<'a> {
    services: &'a Services,
    args: &'a PreparePlacementArgs,
}

impl<'a> PreparePlacement<'a> {
    pub fn new(services: &'a Services, args: &'a PreparePlacementArgs) -> Self {
        Self { services, args }
    }

    fn survey(&self) -> Result<Survey> {
        let ec2 = Ec2Service::new(self.services.compute.as_ref());
        let ami_tagged = ec2.is_ami_with_tag_present(
            &self.args.ami_id,
            AMI_COMPONENT_TAG,
            self.args.stack.as_str(),
        )?;
        let zones = ec2.availability_zones()?;
        Ok(Survey { ami_tagged, zones })
    }
}

impl Operation for PreparePlacement<'_> {
    fn name(&self) -> &'static str {
        "prepare-placement"
    }

    fn is_runnable(&self) -> Result<Readiness> {
        Ok(Readiness::from_reasons(self.survey()?.reasons(self.args)))
    }

    fn run(&self) -> Result<()> {
        let survey = self.survey()?;
        if let Some(reason) = survey.reasons(self.args).into_iter().next() {
            return Err(PreconditionError::Unsatisfied(reason).into());
        }

        let placement = Placement {
            ami_id: self.args.ami_id.clone(),
            availability_zones: survey.zones,
            prepared_at: Utc::now(),
        };
        let text = serde_json::to_string_pretty(&placement)?;
        self.services
            .store
            .put(&layout::placement(self.args.stack), &text)?;
        info!(
            stack = %self.args.stack,
            zones = placement.availability_zones.len(),
            "placement recorded"
        );
        Ok(())
    }
}
