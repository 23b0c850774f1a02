/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use common::{Harness, ALICE, BOB, CAROL};
use fedi3_inbox::protocol::ApType;
use fedi3_inbox::{Model, Store};
use http::StatusCode;
use serde_json::{json, Value};

fn follow(id: &str, actor: &str, object: &str) -> Value {
    json!({
        "@context": "https://www.w3.org/ns/activitystreams",
        "id": id,
        "type": "Follow",
        "actor": actor,
        "object": object,
    })
}

#[tokio::test]
async fn follow_is_stored_as_request_and_dispatched() -> anyhow::Result<()> {
    let mut h = Harness::new().await?;
    h.deliver(follow("https://remote.example/follows/1", BOB, ALICE), &h.bob)
        .await?;

    let fr = h
        .db
        .get_follow_request_by_uri("https://remote.example/follows/1")
        .await?
        .expect("follow request stored");
    assert_eq!(fr.account_id, h.bob.id);
    assert_eq!(fr.target_account_id, h.alice.id);

    let msgs = h.drain();
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].ap_activity_type, ApType::Create);
    assert_eq!(msgs[0].ap_object_type, ApType::Follow);
    assert!(matches!(msgs[0].model, Some(Model::FollowRequest(_))));
    assert_eq!(msgs[0].requesting.uri, BOB);
    Ok(())
}

#[tokio::test]
async fn redelivery_is_a_no_op() -> anyhow::Result<()> {
    let mut h = Harness::new().await?;
    let activity = follow("https://remote.example/follows/1", BOB, ALICE);
    h.deliver(activity.clone(), &h.bob).await?;
    let after_first = h.counts();
    h.deliver(activity, &h.bob).await?;

    assert_eq!(h.counts(), after_first);
    assert_eq!(h.drain().len(), 1);
    Ok(())
}

#[tokio::test]
async fn follow_of_another_account_is_forbidden() -> anyhow::Result<()> {
    let mut h = Harness::new().await?;
    let before = h.counts();
    let activity = follow("https://remote.example/follows/1", BOB, CAROL);

    let err = h.deliver(activity.clone(), &h.bob).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
    assert!(!err.is_retryable());
    assert_eq!(h.counts(), before);
    assert!(h.drain().is_empty());

    // A failed delivery is not remembered, so the retry is evaluated again.
    let err = h.deliver(activity, &h.bob).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn follow_actor_must_be_the_signer() -> anyhow::Result<()> {
    let h = Harness::new().await?;
    let before = h.counts();
    let err = h
        .deliver(follow("https://remote.example/follows/1", CAROL, ALICE), &h.bob)
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
    assert_eq!(h.counts(), before);
    Ok(())
}

#[tokio::test]
async fn follow_without_id_is_malformed() -> anyhow::Result<()> {
    let h = Harness::new().await?;
    let err = h
        .deliver(json!({"type": "Follow", "actor": BOB, "object": ALICE}), &h.bob)
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(h.count("follow_requests"), 0);
    Ok(())
}

fn block(object: &str) -> Value {
    json!({
        "id": "https://remote.example/blocks/1",
        "type": "Block",
        "actor": BOB,
        "object": object,
    })
}

#[tokio::test]
async fn block_is_stored_and_dispatched() -> anyhow::Result<()> {
    let mut h = Harness::new().await?;
    h.deliver(block(ALICE), &h.bob).await?;

    let block = h
        .db
        .get_block_by_uri("https://remote.example/blocks/1")
        .await?
        .expect("block stored");
    assert_eq!(block.account_id, h.bob.id);
    assert_eq!(block.target_account_id, h.alice.id);
    let msgs = h.drain();
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].ap_object_type, ApType::Block);
    Ok(())
}

#[tokio::test]
async fn block_of_another_account_is_forbidden() -> anyhow::Result<()> {
    let mut h = Harness::new().await?;
    let before = h.counts();
    let err = h
        .deliver(block(CAROL), &h.bob)
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
    assert_eq!(h.counts(), before);
    assert!(h.drain().is_empty());
    Ok(())
}

#[tokio::test]
async fn flag_from_instance_actor_is_reported() -> anyhow::Result<()> {
    let mut h = Harness::new().await?;
    let own = h.status(&h.alice, 1).await;
    let foreign = h.status(&h.carol, 1).await;

    h.deliver(
        json!({
            "id": "https://remote.example/flags/1",
            "type": "Flag",
            "actor": "https://remote.example/actor",
            "object": [
                ALICE,
                own.uri,
                foreign.uri,
                "https://local.example/users/alice/statuses/404",
            ],
            "content": "spam",
        }),
        &h.bob,
    )
    .await?;

    let report = h
        .db
        .get_report_by_uri("https://remote.example/flags/1")?
        .expect("report stored");
    assert_eq!(report.account_id, h.bob.id);
    assert_eq!(report.target_account_id, h.alice.id);
    assert_eq!(report.status_ids, vec![own.id]);
    assert_eq!(report.comment, "spam");

    let msgs = h.drain();
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].ap_object_type, ApType::Flag);
    Ok(())
}

#[tokio::test]
async fn flag_from_unrelated_domain_is_forbidden() -> anyhow::Result<()> {
    let h = Harness::new().await?;
    let err = h
        .deliver(
            json!({
                "id": "https://elsewhere.example/flags/1",
                "type": "Flag",
                "actor": "https://elsewhere.example/actor",
                "object": ALICE,
            }),
            &h.bob,
        )
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
    assert_eq!(h.count("reports"), 0);
    Ok(())
}

#[tokio::test]
async fn flag_of_another_account_is_forbidden() -> anyhow::Result<()> {
    let h = Harness::new().await?;
    let err = h
        .deliver(
            json!({
                "id": "https://remote.example/flags/1",
                "type": "Flag",
                "actor": "https://remote.example/actor",
                "object": CAROL,
            }),
            &h.bob,
        )
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
    assert_eq!(h.count("reports"), 0);
    Ok(())
}
