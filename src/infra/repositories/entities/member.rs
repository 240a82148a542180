//! Member database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Member, MemberStatus};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub full_name: String,
    pub membership_type: String,
    pub status: String,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity.
///
/// A status outside the known set is a storage fault, not a client error.
impl TryFrom<Model> for Member {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let status = model.status.parse::<MemberStatus>().map_err(|e| {
            AppError::internal(format!("member {} has {}", model.id, e))
        })?;

        Ok(Member {
            id: model.id,
            full_name: model.full_name,
            membership_type: model.membership_type,
            status,
            start_date: model.start_date,
            end_date: model.end_date,
            created_at: model.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn model(status: &str) -> Model {
        Model {
            id: 3,
            full_name: "Jane Doe".to_string(),
            membership_type: "Premium".to_string(),
            status: status.to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_model_converts_to_member() {
        let member = Member::try_from(model("CANCELLED")).unwrap();

        assert_eq!(member.id, 3);
        assert_eq!(member.status, MemberStatus::Cancelled);
    }

    #[test]
    fn test_unknown_status_is_internal_error() {
        let err = Member::try_from(model("FROZEN")).unwrap_err();

        assert!(matches!(err, AppError::Internal(_)));
        assert!(err.is_server_error());
    }
}
