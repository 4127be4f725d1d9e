//! # Invocation Surface
//!
//! JSON envelope for driving the contract from outside the process:
//!
//! ```json
//! {"caller": "alice", "function": "CreateAsset",
//!  "args": {"id": "a1", "name": "Painting", "metaUrl": "ipfs://..", "views": ["public"]}}
//! ```
//!
//! Every call runs as one transaction through `ContractService::execute`.

use crate::adapters::StaticIdentity;
use crate::domain::{AssetStatus, ContractError, Record};
use crate::ports::outbound::{EventEmitter, IdentityProvider, WorldState};
use crate::service::{ContractService, Outcome};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One contract function with its arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "function", content = "args", rename_all_fields = "camelCase")]
pub enum ContractCall {
    CreateUser {
        id: String,
        #[serde(default)]
        name: String,
        #[serde(default)]
        role: String,
    },
    ReadUser {
        id: String,
    },
    UserExists {
        id: String,
    },
    CreateAsset {
        id: String,
        name: String,
        #[serde(default)]
        meta_url: String,
        #[serde(default)]
        views: Vec<String>,
    },
    ReadAsset {
        id: String,
    },
    AssetExists {
        id: String,
    },
    UpdateAsset {
        id: String,
        name: String,
        #[serde(default)]
        meta_url: String,
        #[serde(default)]
        status: AssetStatus,
        #[serde(default)]
        views: Vec<String>,
    },
    DeleteAsset {
        id: String,
    },
    GetAllAssets,
    InitiateTransfer {
        asset_id: String,
        buyer_wallet_id: String,
    },
    CompleteTransfer {
        asset_id: String,
    },
    RejectTransfer {
        asset_id: String,
    },
    CancelTransfer {
        asset_id: String,
    },
    ReadTransfer {
        asset_id: String,
    },
}

impl ContractCall {
    /// Wire name of the function.
    #[must_use]
    pub const fn function_name(&self) -> &'static str {
        match self {
            Self::CreateUser { .. } => "CreateUser",
            Self::ReadUser { .. } => "ReadUser",
            Self::UserExists { .. } => "UserExists",
            Self::CreateAsset { .. } => "CreateAsset",
            Self::ReadAsset { .. } => "ReadAsset",
            Self::AssetExists { .. } => "AssetExists",
            Self::UpdateAsset { .. } => "UpdateAsset",
            Self::DeleteAsset { .. } => "DeleteAsset",
            Self::GetAllAssets => "GetAllAssets",
            Self::InitiateTransfer { .. } => "InitiateTransfer",
            Self::CompleteTransfer { .. } => "CompleteTransfer",
            Self::RejectTransfer { .. } => "RejectTransfer",
            Self::CancelTransfer { .. } => "CancelTransfer",
            Self::ReadTransfer { .. } => "ReadTransfer",
        }
    }
}

/// A call made on behalf of an attested caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    #[serde(default)]
    pub caller: String,
    #[serde(flatten)]
    pub call: ContractCall,
}

/// Error half of a response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable code from `ContractError::kind`.
    pub code: String,
    pub message: String,
}

impl From<&ContractError> for ErrorBody {
    fn from(error: &ContractError) -> Self {
        Self {
            code: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

/// Reply to one `Invocation`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub ok: bool,
    /// Set when the transaction committed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl InvocationResponse {
    #[must_use]
    pub fn success(tx_id: String, result: Value) -> Self {
        Self {
            ok: true,
            tx_id: Some(tx_id),
            result: Some(result),
            error: None,
        }
    }

    #[must_use]
    pub fn failure(error: &ContractError) -> Self {
        Self {
            ok: false,
            tx_id: None,
            result: None,
            error: Some(error.into()),
        }
    }

    /// Response for input that is not a valid invocation.
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            tx_id: None,
            result: None,
            error: Some(ErrorBody {
                code: "BAD_REQUEST".to_string(),
                message: reason.into(),
            }),
        }
    }
}

fn record_json<T: Record + Serialize>(record: &T) -> Result<Value, ContractError> {
    serde_json::to_value(record).map_err(|e| ContractError::Encode {
        key: record.key(),
        kind: T::KIND,
        reason: e.to_string(),
    })
}

impl<S: WorldState, E: EventEmitter> ContractService<S, E> {
    /// Run `call` as one transaction and return its result as JSON.
    pub fn dispatch(
        &self,
        caller: &dyn IdentityProvider,
        call: ContractCall,
    ) -> Result<Value, ContractError> {
        self.dispatch_with_receipt(caller, call)
            .map(|outcome| outcome.value)
    }

    /// Like `dispatch`, keeping the commit receipt.
    pub fn dispatch_with_receipt(
        &self,
        caller: &dyn IdentityProvider,
        call: ContractCall,
    ) -> Result<Outcome<Value>, ContractError> {
        let operation = call.function_name();
        self.execute(operation, caller, move |c, ctx| match call {
            ContractCall::CreateUser { id, name, role } => {
                record_json(&c.create_user(ctx, &id, &name, &role)?)
            }
            ContractCall::ReadUser { id } => record_json(&c.read_user(ctx, &id)?),
            ContractCall::UserExists { id } => Ok(Value::Bool(c.user_exists(ctx, &id)?)),
            ContractCall::CreateAsset {
                id,
                name,
                meta_url,
                views,
            } => record_json(&c.create_asset(ctx, &id, &name, &meta_url, views)?),
            ContractCall::ReadAsset { id } => record_json(&c.read_asset(ctx, &id)?),
            ContractCall::AssetExists { id } => Ok(Value::Bool(c.asset_exists(ctx, &id)?)),
            ContractCall::UpdateAsset {
                id,
                name,
                meta_url,
                status,
                views,
            } => record_json(&c.update_asset(ctx, &id, &name, &meta_url, status, views)?),
            ContractCall::DeleteAsset { id } => {
                c.delete_asset(ctx, &id)?;
                Ok(Value::Null)
            }
            ContractCall::GetAllAssets => c
                .get_all_assets(ctx)?
                .iter()
                .map(record_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            ContractCall::InitiateTransfer {
                asset_id,
                buyer_wallet_id,
            } => record_json(&c.initiate_transfer(ctx, &asset_id, &buyer_wallet_id)?),
            ContractCall::CompleteTransfer { asset_id } => {
                record_json(&c.complete_transfer(ctx, &asset_id)?)
            }
            ContractCall::RejectTransfer { asset_id } => {
                record_json(&c.reject_transfer(ctx, &asset_id)?)
            }
            ContractCall::CancelTransfer { asset_id } => {
                record_json(&c.cancel_transfer(ctx, &asset_id)?)
            }
            ContractCall::ReadTransfer { asset_id } => {
                record_json(&c.read_transfer(ctx, &asset_id)?)
            }
        })
    }

    /// Handle a full invocation envelope.
    pub fn invoke(&self, invocation: Invocation) -> InvocationResponse {
        let identity = StaticIdentity::new(invocation.caller);
        match self.dispatch_with_receipt(&identity, invocation.call) {
            Ok(outcome) => InvocationResponse::success(outcome.receipt.tx_id, outcome.value),
            Err(e) => InvocationResponse::failure(&e),
        }
    }

    /// Parse and handle one JSON invocation.
    pub fn invoke_json(&self, line: &str) -> InvocationResponse {
        match serde_json::from_str::<Invocation>(line) {
            Ok(invocation) => self.invoke(invocation),
            Err(e) => InvocationResponse::malformed(e.to_string()),
        }
    }
}
