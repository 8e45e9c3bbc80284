use crate::domain::user::value_objects::{Capability, UserId};
use std::collections::HashSet;

pub trait CapabilitySpecification {
    fn is_satisfied_by(&self, capabilities: &HashSet<Capability>) -> bool;
}

pub struct HasCapability<'a> {
    pub resource: &'a str,
    pub action: &'a str,
}

impl CapabilitySpecification for HasCapability<'_> {
    fn is_satisfied_by(&self, capabilities: &HashSet<Capability>) -> bool {
        capabilities
            .iter()
            .any(|cap| cap.matches(self.resource, self.action))
    }
}

/// True when an administrative action would lock the actor out of their own account.
pub fn is_self_lockout(actor: UserId, target: UserId, keeps_active: bool) -> bool {
    actor == target && !keeps_active
}
