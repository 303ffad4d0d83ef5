//! Identity accounts and the role each one holds.
//!
//! An account holds at most one role. The role lives in an explicit
//! `primary_role` column rather than a many-to-many table, so "the user's
//! role" is a single value everywhere it is read or written.

use crate::ids::AccountId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, FromRow, Type,
    postgres::{PgTypeInfo, Postgres},
};
use std::fmt;
use utoipa::ToSchema;

/// Role labels that gate access to actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Every assignable role, in the order offered to administrators.
    pub const ALL: [Role; 2] = [Role::Admin, Role::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }

    /// Exact-match lookup; blank or unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Role> {
        match name.trim() {
            "Admin" => Some(Role::Admin),
            "User" => Some(Role::User),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Stored as its name in a VARCHAR column.
impl Type<Postgres> for Role {
    fn type_info() -> PgTypeInfo {
        <&str as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <&str as Type<Postgres>>::compatible(ty)
    }
}

impl<'q> Encode<'q, Postgres> for Role {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as Encode<'q, Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

impl<'r> Decode<'r, Postgres> for Role {
    fn decode(value: <Postgres as Database>::ValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let name = <&str as Decode<'r, Postgres>>::decode(value)?;
        Role::parse(name).ok_or_else(|| format!("unknown role: {name}").into())
    }
}

/// An account as exposed over the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub primary_role: Option<Role>,
    pub created_at: DateTime<Utc>,
}

/// An account row including its credential hash. Never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct AccountRecord {
    pub id: AccountId,
    pub email: String,
    pub password_hash: String,
    pub primary_role: Option<Role>,
    pub created_at: DateTime<Utc>,
}

impl From<AccountRecord> for Account {
    fn from(record: AccountRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            primary_role: record.primary_role,
            created_at: record.created_at,
        }
    }
}

/// The authenticated identity behind a request.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Principal {
    pub account_id: AccountId,
    pub email: String,
    pub role: Option<Role>,
}

impl Principal {
    pub fn has_role(&self, role: Role) -> bool {
        self.role == Some(role)
    }

    /// True when the principal holds any of `roles`.
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.role.is_some_and(|r| roles.contains(&r))
    }
}

impl From<Account> for Principal {
    fn from(account: Account) -> Self {
        Self {
            account_id: account.id,
            email: account.email,
            role: account.primary_role,
        }
    }
}

/// Body for replacing an account's role.
///
/// An empty or unrecognised `selected_role` clears the role.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateRoleRequest {
    #[serde(default, alias = "SelectedRole", alias = "selectedRole")]
    pub selected_role: Option<String>,
}

/// The manage-roles view for one account.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ManageRolesView {
    pub account: Account,
    pub current_role: Option<Role>,
    pub available_roles: Vec<Role>,
}

impl ManageRolesView {
    pub fn new(account: Account) -> Self {
        Self {
            current_role: account.primary_role,
            account,
            available_roles: Role::ALL.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: Option<Role>) -> Principal {
        Principal {
            account_id: AccountId::new(),
            email: "someone@example.com".into(),
            role,
        }
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("Admin"), Some(Role::Admin));
        assert_eq!(Role::parse("User"), Some(Role::User));
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse("Teacher"), None);
    }

    #[test]
    fn test_role_names_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
            assert_eq!(serde_json::to_string(&role).unwrap(), format!("\"{}\"", role));
        }
    }

    #[test]
    fn test_has_any_role() {
        assert!(principal(Some(Role::Admin)).has_any_role(&[Role::Admin, Role::User]));
        assert!(principal(Some(Role::User)).has_any_role(&[Role::User]));
        assert!(!principal(Some(Role::User)).has_any_role(&[Role::Admin]));
        assert!(!principal(None).has_any_role(&Role::ALL));
        assert!(principal(Some(Role::Admin)).has_role(Role::Admin));
    }

    #[test]
    fn test_update_role_request_aliases() {
        let req: UpdateRoleRequest = serde_json::from_str(r#"{"SelectedRole":"Admin"}"#).unwrap();
        assert_eq!(req.selected_role.as_deref(), Some("Admin"));

        let req: UpdateRoleRequest = serde_json::from_str("{}").unwrap();
        assert!(req.selected_role.is_none());
    }

    #[test]
    fn test_manage_roles_view_lists_all_roles() {
        let view = ManageRolesView::new(Account {
            id: AccountId::new(),
            email: "x@example.com".into(),
            primary_role: Some(Role::User),
            created_at: Utc::now(),
        });
        assert_eq!(view.current_role, Some(Role::User));
        assert_eq!(view.available_roles, vec![Role::Admin, Role::User]);
    }
}
