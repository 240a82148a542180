//! Member repository implementation.
//!
//! Queries are written once against [`ConnectionTrait`] and shared by the
//! pooled [`MemberStore`] and the transaction-scoped repository in
//! [`crate::infra::unit_of_work`].

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::member::{self, ActiveModel, Entity as MemberEntity};
use crate::domain::{Member, MemberDraft};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Member repository trait for dependency injection.
///
/// Covers the operations that need no transaction. Inserts and updates go
/// through [`crate::infra::UnitOfWork::transaction`].
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// All members, newest first
    async fn list(&self) -> AppResult<Vec<Member>>;

    /// Find member by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Member>>;

    /// Delete member by ID, returning whether a row was removed
    async fn delete(&self, id: i32) -> AppResult<bool>;
}

/// Concrete implementation of MemberRepository on the connection pool
pub struct MemberStore {
    db: DatabaseConnection,
}

impl MemberStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MemberRepository for MemberStore {
    async fn list(&self) -> AppResult<Vec<Member>> {
        list_members(&self.db).await
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Member>> {
        find_member(&self.db, id).await
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = MemberEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

pub(crate) async fn list_members<C: ConnectionTrait>(conn: &C) -> AppResult<Vec<Member>> {
    MemberEntity::find()
        .order_by_desc(member::Column::CreatedAt)
        .order_by_desc(member::Column::Id)
        .all(conn)
        .await?
        .into_iter()
        .map(Member::try_from)
        .collect()
}

pub(crate) async fn find_member<C: ConnectionTrait>(conn: &C, id: i32) -> AppResult<Option<Member>> {
    MemberEntity::find_by_id(id)
        .one(conn)
        .await?
        .map(Member::try_from)
        .transpose()
}

/// Insert a member and return its generated id.
pub(crate) async fn insert_member<C: ConnectionTrait>(conn: &C, draft: MemberDraft) -> AppResult<i32> {
    let active_model = ActiveModel {
        full_name: Set(draft.full_name),
        membership_type: Set(draft.membership_type),
        status: Set(draft.status.as_str().to_string()),
        start_date: Set(draft.start_date),
        end_date: Set(draft.end_date),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let result = MemberEntity::insert(active_model).exec(conn).await?;
    Ok(result.last_insert_id)
}

/// Overwrite every mutable column of one member.
///
/// `id` and `created_at` are never touched.
pub(crate) async fn update_member<C: ConnectionTrait>(
    conn: &C,
    id: i32,
    draft: MemberDraft,
) -> AppResult<()> {
    let changes = ActiveModel {
        full_name: Set(draft.full_name),
        membership_type: Set(draft.membership_type),
        status: Set(draft.status.as_str().to_string()),
        start_date: Set(draft.start_date),
        end_date: Set(draft.end_date),
        ..Default::default()
    };

    MemberEntity::update_many()
        .set(changes)
        .filter(member::Column::Id.eq(id))
        .exec(conn)
        .await?;

    Ok(())
}
