//! # Asset Contract
//!
//! Stateless holder of the contract operations. Each operation receives an
//! explicit `InvocationContext` carrying the transaction's ledger stub and the
//! caller's identity provider; there is no ambient state.

use crate::domain::{ContractError, Record, RecordKind, UnixSeconds};
use crate::events::EventName;
use crate::ports::outbound::{IdentityProvider, LedgerStub};

/// Per-operation dependencies.
pub struct InvocationContext<'a> {
    pub stub: &'a mut dyn LedgerStub,
    pub identity: &'a dyn IdentityProvider,
}

impl<'a> InvocationContext<'a> {
    pub fn new(stub: &'a mut dyn LedgerStub, identity: &'a dyn IdentityProvider) -> Self {
        Self { stub, identity }
    }

    /// Authenticated identity of the caller.
    pub fn caller(&self) -> Result<String, ContractError> {
        self.identity.caller_id()
    }

    #[must_use]
    pub fn tx_id(&self) -> String {
        self.stub.tx_id().to_string()
    }

    #[must_use]
    pub fn timestamp(&self) -> UnixSeconds {
        self.stub.tx_timestamp()
    }

    /// Whether any record occupies `key`.
    pub(crate) fn exists(&mut self, key: &str) -> Result<bool, ContractError> {
        Ok(self.stub.get_state(key)?.is_some())
    }

    /// Read and decode a typed record, `NotFound` when absent.
    pub(crate) fn read<T: Record>(&mut self, key: &str, id: &str) -> Result<T, ContractError> {
        let bytes = self
            .stub
            .get_state(key)?
            .ok_or_else(|| ContractError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            })?;
        T::decode(key, &bytes)
    }

    /// Encode and stage a typed record at its own key.
    pub(crate) fn write<T: Record>(&mut self, record: &T) -> Result<(), ContractError> {
        let bytes = record.encode()?;
        self.stub.put_state(&record.key(), bytes)?;
        Ok(())
    }

    /// Fail with `AlreadyExists` if `key` is taken.
    pub(crate) fn ensure_vacant(
        &mut self,
        key: &str,
        kind: RecordKind,
    ) -> Result<(), ContractError> {
        if self.exists(key)? {
            return Err(ContractError::AlreadyExists {
                kind,
                id: key.to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn emit(&mut self, name: EventName, payload: Vec<u8>) -> Result<(), ContractError> {
        self.stub.set_event(name, payload)?;
        Ok(())
    }
}

/// The asset management contract.
///
/// Operations are implemented per component:
/// - `users.rs`: User Registry
/// - `assets.rs`: Asset Registry
/// - `transfers.rs`: Transfer Coordinator
#[derive(Clone, Copy, Debug, Default)]
pub struct AssetContract;

impl AssetContract {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}
