//! Bank account domain entity and related types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::AppError;

/// Account status label.
///
/// New accounts are always `Active`; any state may be set by an update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccountState {
    #[default]
    Active,
    Inactive,
    Blocked,
    Closed,
}

impl AccountState {
    /// All accepted state labels
    pub const ALL: [AccountState; 4] = [
        AccountState::Active,
        AccountState::Inactive,
        AccountState::Blocked,
        AccountState::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountState::Active => "active",
            AccountState::Inactive => "inactive",
            AccountState::Blocked => "blocked",
            AccountState::Closed => "closed",
        }
    }
}

impl FromStr for AccountState {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccountState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Invalid state '{}'. Must be one of: active, inactive, blocked, closed",
                    s
                ))
            })
    }
}

impl fmt::Display for AccountState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monetary amount in minor currency units (e.g. cents).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Balance(i64);

impl Balance {
    pub const ZERO: Balance = Balance(0);

    /// Build a balance from minor units. Negative amounts are rejected.
    pub fn from_minor_units(minor: i64) -> Option<Self> {
        (minor >= 0).then_some(Self(minor))
    }

    pub fn minor_units(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Bank account domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub name: String,
    pub balance: Balance,
    pub state: AccountState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BankAccount {
    /// Open a new account: zero balance, active state.
    pub fn open(id: Uuid, owner_user_id: Uuid, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner_user_id,
            name,
            balance: Balance::ZERO,
            state: AccountState::Active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Bank account response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BankAccountResponse {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[schema(example = "checking")]
    pub name: String,
    /// Balance in minor currency units
    #[schema(value_type = i64, example = 0)]
    pub balance: Balance,
    pub state: AccountState,
}

impl From<BankAccount> for BankAccountResponse {
    fn from(account: BankAccount) -> Self {
        Self {
            id: account.id,
            name: account.name,
            balance: account.balance,
            state: account.state,
        }
    }
}
