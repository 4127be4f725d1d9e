//! # Identity Adapters
//!
//! Fixed identities for tests and the local node, where the caller is taken
//! from the invocation itself instead of a certificate.

use crate::domain::ContractError;
use crate::ports::outbound::IdentityProvider;

/// An already-authenticated caller identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticIdentity(String);

impl StaticIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl IdentityProvider for StaticIdentity {
    fn caller_id(&self) -> Result<String, ContractError> {
        if self.0.is_empty() {
            return Err(ContractError::Identity("empty caller identity".to_string()));
        }
        Ok(self.0.clone())
    }
}

/// Caller for read-only queries. Any identity lookup fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnonymousCaller;

impl IdentityProvider for AnonymousCaller {
    fn caller_id(&self) -> Result<String, ContractError> {
        Err(ContractError::Identity(
            "anonymous caller has no identity".to_string(),
        ))
    }
}
