#![allow(clippy::unwrap_used)]

//! The in-process `BugsClientV1` over a migrated in-memory database.

mod common;

use bugs::{BugDraft, BugPatch, BugStatus, BugsConfig};
use bugs_sdk::{BugField, ErrorKind};
use uuid::Uuid;

fn draft() -> BugDraft {
    BugDraft {
        title: Some("Checkout button unresponsive".to_owned()),
        description: Some("Nothing happens on click".to_owned()),
        status: None,
        priority: Some("high".to_owned()),
        created_by: Some("Lin".to_owned()),
    }
}

#[tokio::test]
async fn full_lifecycle_through_local_client() {
    let client = common::module(BugsConfig::default()).await.client();

    let created = client.create_bug(draft()).await.unwrap();
    assert_eq!(created.status, BugStatus::Open);

    let updated = client
        .update_bug(
            created.id,
            BugPatch {
                status: Some("resolved".to_owned()),
                ..BugPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, BugStatus::Resolved);
    assert_eq!(updated.title, created.title);

    assert_eq!(client.list_bugs().await.unwrap(), vec![updated.clone()]);
    assert_eq!(client.get_bug(created.id).await.unwrap(), updated);

    client.delete_bug(created.id).await.unwrap();
    assert!(client.list_bugs().await.unwrap().is_empty());
}

#[tokio::test]
async fn errors_use_the_public_taxonomy() {
    let client = common::module(BugsConfig::default()).await.client();

    let err = client.get_bug(Uuid::nil()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(
        err.message(),
        format!("Bug not found with id of {}", Uuid::nil())
    );

    let err = client
        .create_bug(BugDraft {
            description: Some("x".repeat(501)),
            ..draft()
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadRequest);
    assert_eq!(
        err.validation_report().unwrap().fields(),
        vec![BugField::Description]
    );
}
