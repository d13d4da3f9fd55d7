//! Bank account database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::{AccountState, Balance, BankAccount};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bank_accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub name: String,
    /// Balance in minor currency units
    pub balance_minor: i64,
    pub state: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerUserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&BankAccount> for ActiveModel {
    fn from(account: &BankAccount) -> Self {
        ActiveModel {
            id: Set(account.id),
            owner_user_id: Set(account.owner_user_id),
            name: Set(account.name.clone()),
            balance_minor: Set(account.balance.minor_units()),
            state: Set(account.state.as_str().to_string()),
            created_at: Set(account.created_at),
            updated_at: Set(account.updated_at),
        }
    }
}

/// Convert database model to domain entity.
///
/// Fails only when the row holds a value the domain cannot represent.
impl TryFrom<Model> for BankAccount {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let balance = Balance::from_minor_units(model.balance_minor).ok_or_else(|| {
            AppError::internal(format!("Account {} has a negative balance", model.id))
        })?;
        let state = model.state.parse::<AccountState>().map_err(|_| {
            AppError::internal(format!(
                "Account {} has unknown state '{}'",
                model.id, model.state
            ))
        })?;

        Ok(BankAccount {
            id: model.id,
            owner_user_id: model.owner_user_id,
            name: model.name,
            balance,
            state,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
