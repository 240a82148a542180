//! Integration tests for member persistence and the unit of work.

mod common;

use chrono::NaiveDate;

use gym_membership::domain::{MemberDraft, MemberStatus};
use gym_membership::errors::AppError;
use gym_membership::infra::{Persistence, UnitOfWork};
use gym_membership::with_transaction;

fn draft(name: &str) -> MemberDraft {
    MemberDraft {
        full_name: name.to_string(),
        membership_type: "Premium".to_string(),
        status: MemberStatus::Active,
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        end_date: None,
    }
}

async fn persistence() -> Persistence {
    let db = common::test_database().await;
    Persistence::new(db.get_connection())
}

#[tokio::test]
async fn test_committed_insert_is_visible() {
    let uow = persistence().await;

    let member = with_transaction!(uow, |ctx| {
        let members = ctx.members();
        let id = members.insert(draft("Jane Doe")).await?;
        members.find_by_id(id).await
    })
    .unwrap()
    .unwrap();

    assert_eq!(member.full_name, "Jane Doe");
    assert_eq!(member.status, MemberStatus::Active);

    let stored = uow.members().find_by_id(member.id).await.unwrap();
    assert_eq!(stored, Some(member));
}

#[tokio::test]
async fn test_failed_transaction_rolls_back() {
    let uow = persistence().await;

    let result: Result<(), AppError> = with_transaction!(uow, |ctx| {
        ctx.members().insert(draft("Ghost")).await?;
        Err(AppError::internal("abort"))
    });

    assert!(result.is_err());
    assert!(uow.members().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_overwrites_every_field() {
    let uow = persistence().await;

    let id = with_transaction!(uow, |ctx| ctx.members().insert(draft("Jane Doe")).await).unwrap();

    let replacement = MemberDraft {
        full_name: "Jane Smith".to_string(),
        membership_type: "Basic".to_string(),
        status: MemberStatus::Paused,
        start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 9, 30),
    };
    let expected = replacement.clone();
    with_transaction!(uow, |ctx| ctx.members().update(id, replacement).await).unwrap();

    let member = uow.members().find_by_id(id).await.unwrap().unwrap();
    assert_eq!(member.draft(), expected);
}

#[tokio::test]
async fn test_list_is_newest_first_and_delete_reports_rows() {
    let uow = persistence().await;

    for name in ["First", "Second", "Third"] {
        with_transaction!(uow, |ctx| ctx.members().insert(draft(name)).await).unwrap();
    }

    let names: Vec<String> = uow
        .members()
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.full_name)
        .collect();
    assert_eq!(names, vec!["Third", "Second", "First"]);

    let newest = uow.members().list().await.unwrap()[0].id;
    assert!(uow.members().delete(newest).await.unwrap());
    assert!(!uow.members().delete(newest).await.unwrap());
    assert_eq!(uow.members().list().await.unwrap().len(), 2);
}
