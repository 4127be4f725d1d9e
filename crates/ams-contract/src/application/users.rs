//! User Registry operations.

use super::contract::{AssetContract, InvocationContext};
use crate::domain::{ContractError, RecordKind, User};
use tracing::{debug, info};

impl AssetContract {
    /// Whether any record occupies `id`.
    pub fn user_exists(
        &self,
        ctx: &mut InvocationContext<'_>,
        id: &str,
    ) -> Result<bool, ContractError> {
        ctx.exists(id)
    }

    /// Register a user bound to the caller's identity.
    ///
    /// `name` is accepted for interface compatibility; the user record has no
    /// field for it.
    pub fn create_user(
        &self,
        ctx: &mut InvocationContext<'_>,
        id: &str,
        name: &str,
        role: &str,
    ) -> Result<User, ContractError> {
        ctx.ensure_vacant(id, RecordKind::User)?;
        let caller = ctx.caller()?;

        let user = User::new(id, caller, role, ctx.timestamp());
        ctx.write(&user)?;

        info!(user = %id, name = %name, role = %role, wallet = %user.wallet_id, "User created");
        Ok(user)
    }

    pub fn read_user(
        &self,
        ctx: &mut InvocationContext<'_>,
        id: &str,
    ) -> Result<User, ContractError> {
        let user: User = ctx.read(id, id)?;
        debug!(user = %id, "User read");
        Ok(user)
    }
}
