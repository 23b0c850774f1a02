/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use common::{drain, FailingPolicy, Harness, ALICE, BOB, CAROL};
use fedi3_inbox::protocol::{Activity, ApType};
use fedi3_inbox::{
    InboxError, InteractionRequest, InteractionType, Model, PolicyResult, RequestState,
    StaticPolicy, Status, StatusFave, Store,
};
use http::StatusCode;
use serde_json::{json, Value};

const LIKE: &str = "https://remote.example/likes/1";
const LIKE_REQUEST: &str = "https://remote.example/like_requests/1";
const BOOST: &str = "https://remote.example/boosts/1";

fn like(object: &str) -> Value {
    json!({"id": LIKE, "type": "Like", "actor": BOB, "object": object})
}

fn like_request(object: &str) -> Value {
    json!({
        "id": LIKE_REQUEST,
        "type": "LikeRequest",
        "actor": BOB,
        "object": object,
        "instrument": {"id": LIKE, "type": "Like", "actor": BOB, "object": object},
    })
}

async fn request_of(h: &Harness, uri: &str) -> anyhow::Result<InteractionRequest> {
    Ok(h
        .db
        .get_interaction_request_by_interaction_uri(uri)
        .await?
        .expect("interaction request stored"))
}

// ── Bare likes ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn permitted_like_is_stored_without_request() -> anyhow::Result<()> {
    let mut h = Harness::new().await?;
    let status = h.status(&h.alice, 1).await;
    h.deliver(like(&status.uri), &h.bob).await?;

    let fave = h.db.get_status_fave_by_uri(LIKE).await?.expect("fave stored");
    assert_eq!(fave.status_id, status.id);
    assert!(!fave.pending_approval);
    assert!(h.db.get_interaction_request_by_interaction_uri(LIKE).await?.is_none());

    let msgs = h.drain();
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].ap_object_type, ApType::Like);
    let approval = msgs[0].approval.expect("approval flags");
    assert!(!approval.pending_approval);
    Ok(())
}

#[tokio::test]
async fn like_needing_approval_gets_an_impolite_request() -> anyhow::Result<()> {
    let h = Harness::with_policy(StaticPolicy(PolicyResult::RequiresApproval)).await?;
    let status = h.status(&h.alice, 1).await;
    h.deliver(like(&status.uri), &h.bob).await?;

    let fave = h.db.get_status_fave_by_uri(LIKE).await?.expect("fave stored");
    assert!(fave.pending_approval);
    let ir = h
        .db
        .get_interaction_request_by_interaction_uri(LIKE)
        .await?
        .expect("interaction request stored");
    assert_eq!(ir.state(), RequestState::Pending);
    assert_eq!(ir.interaction_type, InteractionType::Like);
    assert!(!ir.polite);
    Ok(())
}

#[tokio::test]
async fn forbidden_like_stores_nothing() -> anyhow::Result<()> {
    let mut h = Harness::with_policy(StaticPolicy(PolicyResult::Forbidden)).await?;
    let status = h.status(&h.alice, 1).await;
    let before = h.counts();

    let err = h.deliver(like(&status.uri), &h.bob).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
    assert_eq!(h.counts(), before);
    assert!(h.drain().is_empty());
    Ok(())
}

#[tokio::test]
async fn like_of_status_owned_by_someone_else_is_forbidden() -> anyhow::Result<()> {
    let mut h = Harness::new().await?;
    let status = h.status(&h.carol, 1).await;
    let before = h.counts();

    let err = h.deliver(like(&status.uri), &h.bob).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
    assert_eq!(h.counts(), before);
    assert!(h.drain().is_empty());
    Ok(())
}

#[tokio::test]
async fn like_of_unknown_status_is_dropped() -> anyhow::Result<()> {
    let mut h = Harness::new().await?;
    h.deliver(like("https://local.example/users/alice/statuses/404"), &h.bob)
        .await?;
    assert_eq!(h.count("status_faves"), 0);
    assert!(h.drain().is_empty());
    Ok(())
}

#[tokio::test]
async fn policy_failure_is_retryable() -> anyhow::Result<()> {
    let h = Harness::with_policy(FailingPolicy).await?;
    let status = h.status(&h.alice, 1).await;

    let err = h.deliver(like(&status.uri), &h.bob).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(err.is_retryable());
    assert_eq!(h.count("status_faves"), 0);
    Ok(())
}

// ── Polite requests ─────────────────────────────────────────────────────────

#[tokio::test]
async fn like_request_maps_policy_onto_fave_flags() -> anyhow::Result<()> {
    let cases = [
        (PolicyResult::Permitted, false, false),
        (PolicyResult::RequiresApproval, true, false),
        (PolicyResult::RequiresApprovalMatchedCollection, true, true),
    ];
    for (policy, pending, pre_approved) in cases {
        let mut h = Harness::with_policy(StaticPolicy(policy)).await?;
        let status = h.status(&h.alice, 1).await;
        h.deliver(like_request(&status.uri), &h.bob).await?;

        let fave = h.db.get_status_fave_by_uri(LIKE).await?.expect("fave stored");
        assert_eq!(fave.pending_approval, pending, "{policy:?}");
        assert_eq!(fave.pre_approved, pre_approved, "{policy:?}");

        let ir = h
            .db
            .get_interaction_request_by_interaction_uri(LIKE)
            .await?
            .expect("interaction request stored");
        assert!(ir.polite);
        assert_eq!(ir.interaction_request_uri, LIKE_REQUEST);
        assert_eq!(ir.state(), RequestState::Pending);

        let msgs = h.drain();
        assert_eq!(msgs.len(), 1, "{policy:?}");
        assert_eq!(msgs[0].ap_object_type, ApType::LikeRequest);
        assert!(matches!(msgs[0].model, Some(Model::StatusFave(_))));
    }
    Ok(())
}

#[tokio::test]
async fn forbidden_like_request_stores_nothing() -> anyhow::Result<()> {
    let mut h = Harness::with_policy(StaticPolicy(PolicyResult::Forbidden)).await?;
    let status = h.status(&h.alice, 1).await;
    let before = h.counts();

    let err = h.deliver(like_request(&status.uri), &h.bob).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
    assert_eq!(h.counts(), before);
    assert!(h.drain().is_empty());
    Ok(())
}

#[tokio::test]
async fn malformed_polite_requests_are_rejected() -> anyhow::Result<()> {
    let h = Harness::new().await?;
    let status = h.status(&h.alice, 1).await;
    let before = h.counts();

    let mut approved = like_request(&status.uri);
    approved["id"] = json!("https://remote.example/like_requests/2");
    approved["instrument"]["approvedBy"] =
        json!("https://local.example/users/alice/approvals/1");

    let mut bare_instrument = like_request(&status.uri);
    bare_instrument["id"] = json!("https://remote.example/like_requests/3");
    bare_instrument["instrument"] = json!(LIKE);

    let mut two_instruments = like_request(&status.uri);
    two_instruments["id"] = json!("https://remote.example/like_requests/4");
    let inner = two_instruments["instrument"].clone();
    two_instruments["instrument"] = json!([inner.clone(), inner]);

    let mut two_objects = like_request(&status.uri);
    two_objects["id"] = json!("https://remote.example/like_requests/5");
    two_objects["object"] = json!([status.uri, "https://local.example/users/alice/statuses/2"]);

    let mut approved_object = like_request(&status.uri);
    approved_object["id"] = json!("https://remote.example/like_requests/6");
    approved_object["instrument"]["approvedBy"] = json!({
        "id": "https://local.example/users/alice/approvals/1",
        "type": "LikeAuthorization",
    });

    let cases = [
        approved,
        approved_object,
        bare_instrument,
        two_instruments,
        two_objects,
    ];
    for activity in cases {
        let err = h.deliver(activity.clone(), &h.bob).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST, "{activity}");
    }
    assert_eq!(h.counts(), before);
    Ok(())
}

#[tokio::test]
async fn reply_request_from_someone_else_is_malformed() -> anyhow::Result<()> {
    let h = Harness::new().await?;
    let status = h.status(&h.alice, 1).await;
    let before = h.counts();

    let err = h
        .deliver(
            json!({
                "id": "https://remote.example/reply_requests/1",
                "type": "ReplyRequest",
                "actor": BOB,
                "object": status.uri,
                "instrument": {
                    "id": "https://other.example/users/carol/statuses/9",
                    "type": "Note",
                    "attributedTo": CAROL,
                    "inReplyTo": status.uri,
                    "content": "hi",
                },
            }),
            &h.bob,
        )
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(h.counts(), before);
    Ok(())
}

#[tokio::test]
async fn reply_request_stores_only_the_request() -> anyhow::Result<()> {
    let mut h = Harness::with_policy(StaticPolicy(PolicyResult::RequiresApproval)).await?;
    let status = h.status(&h.alice, 1).await;
    let reply_uri = "https://remote.example/users/bob/statuses/9";

    h.deliver(
        json!({
            "id": "https://remote.example/reply_requests/1",
            "type": "ReplyRequest",
            "actor": BOB,
            "object": status.uri,
            "instrument": {
                "id": reply_uri,
                "type": "Note",
                "attributedTo": BOB,
                "inReplyTo": status.uri,
                "content": "may I?",
            },
        }),
        &h.bob,
    )
    .await?;

    let ir = h
        .db
        .get_interaction_request_by_interaction_uri(reply_uri)
        .await?
        .expect("interaction request stored");
    assert_eq!(ir.interaction_type, InteractionType::Reply);
    assert_eq!(ir.target_status_id, status.id);
    assert!(h.db.get_status_by_uri(reply_uri).await?.is_none());

    let msgs = h.drain();
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].ap_object_type, ApType::ReplyRequest);
    let raw = msgs[0].raw.as_ref().expect("instrument forwarded");
    assert_eq!(raw["content"], "may I?");
    Ok(())
}

#[tokio::test]
async fn announce_request_stores_pending_boost() -> anyhow::Result<()> {
    let mut h = Harness::with_policy(StaticPolicy(PolicyResult::RequiresApproval)).await?;
    let status = h.status(&h.alice, 1).await;
    let boost_uri = BOOST;

    h.deliver(
        json!({
            "id": "https://remote.example/announce_requests/1",
            "type": "AnnounceRequest",
            "actor": BOB,
            "object": status.uri,
            "instrument": {"id": boost_uri, "type": "Announce", "actor": BOB, "object": status.uri},
        }),
        &h.bob,
    )
    .await?;

    let boost = h.db.get_status_by_uri(boost_uri).await?.expect("boost stored");
    assert_eq!(boost.boost_of_uri, status.uri);
    assert!(boost.pending_approval);
    let ir = h
        .db
        .get_interaction_request_by_interaction_uri(boost_uri)
        .await?
        .expect("interaction request stored");
    assert_eq!(ir.interaction_type, InteractionType::Announce);
    assert!(ir.polite);

    let msgs = h.drain();
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].ap_object_type, ApType::AnnounceRequest);
    Ok(())
}

// ── Announce and Create ─────────────────────────────────────────────────────

fn announce(object: &str) -> Value {
    json!({"id": BOOST, "type": "Announce", "actor": BOB, "object": object})
}

#[tokio::test]
async fn announce_of_unknown_status_is_dropped() -> anyhow::Result<()> {
    let mut h = Harness::new().await?;
    h.deliver(announce("https://local.example/users/alice/statuses/404"), &h.bob)
        .await?;

    assert_eq!(h.count("statuses"), 0);
    assert!(h.drain().is_empty());
    Ok(())
}

#[tokio::test]
async fn announce_of_status_owned_by_someone_else_is_malformed() -> anyhow::Result<()> {
    let mut h = Harness::new().await?;
    let status = h.status(&h.carol, 1).await;
    let before = h.counts();

    let err = h.deliver(announce(&status.uri), &h.bob).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(h.counts(), before);
    assert!(h.drain().is_empty());
    Ok(())
}

#[tokio::test]
async fn announce_needing_approval_gets_an_impolite_request() -> anyhow::Result<()> {
    let mut h = Harness::with_policy(StaticPolicy(PolicyResult::RequiresApproval)).await?;
    let status = h.status(&h.alice, 1).await;
    h.deliver(announce(&status.uri), &h.bob).await?;

    let boost = h.db.get_status_by_uri(BOOST).await?.expect("boost stored");
    assert_eq!(boost.boost_of_uri, status.uri);
    assert!(boost.pending_approval);
    let ir = request_of(&h, BOOST).await?;
    assert_eq!(ir.interaction_type, InteractionType::Announce);
    assert!(!ir.polite);

    let msgs = h.drain();
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].ap_object_type, ApType::Announce);
    assert!(matches!(msgs[0].model, Some(Model::Status(_))));
    Ok(())
}

#[tokio::test]
async fn reply_needing_approval_is_stored_pending() -> anyhow::Result<()> {
    let mut h = Harness::with_policy(StaticPolicy(PolicyResult::RequiresApproval)).await?;
    let parent = h.status(&h.alice, 1).await;
    let reply_uri = "https://remote.example/users/bob/statuses/5";

    h.deliver(
        json!({
            "id": "https://remote.example/creates/5",
            "type": "Create",
            "actor": BOB,
            "object": {
                "id": reply_uri,
                "type": "Note",
                "attributedTo": BOB,
                "inReplyTo": parent.uri,
                "content": "hello",
                "tag": [{"type": "Mention", "href": ALICE}],
            },
        }),
        &h.bob,
    )
    .await?;

    let reply = h.db.get_status_by_uri(reply_uri).await?.expect("reply stored");
    assert_eq!(reply.in_reply_to_uri, parent.uri);
    assert!(reply.pending_approval);
    assert!(reply.mentions_account(ALICE));
    let ir = h
        .db
        .get_interaction_request_by_interaction_uri(reply_uri)
        .await?
        .expect("interaction request stored");
    assert_eq!(ir.interaction_type, InteractionType::Reply);
    assert!(!ir.polite);

    let msgs = h.drain();
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].ap_activity_type, ApType::Create);
    assert_eq!(msgs[0].ap_object_type, ApType::Note);
    Ok(())
}

#[tokio::test]
async fn forwarded_note_is_not_stored() -> anyhow::Result<()> {
    let mut h = Harness::new().await?;
    let note_uri = "https://other.example/users/carol/statuses/3";
    h.deliver(
        json!({
            "id": "https://remote.example/creates/7",
            "type": "Create",
            "actor": BOB,
            "object": {"id": note_uri, "type": "Note", "attributedTo": CAROL, "content": "fwd"},
        }),
        &h.bob,
    )
    .await?;

    assert_eq!(h.count("statuses"), 0);
    let msgs = h.drain();
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].iri.as_deref(), Some(note_uri));
    Ok(())
}

#[tokio::test]
async fn create_keeps_good_objects_and_reports_every_failure() -> anyhow::Result<()> {
    let mut h = Harness::new().await?;
    let good = "https://remote.example/users/bob/statuses/1";

    let err = h
        .deliver(
            json!({
                "id": "https://remote.example/creates/mixed",
                "type": "Create",
                "actor": BOB,
                "object": [
                    {"id": good, "type": "Note", "attributedTo": BOB, "content": "ok"},
                    {"id": "https://remote.example/users/bob/statuses/2", "type": "Note"},
                    {
                        "id": "https://remote.example/users/bob/statuses/3",
                        "type": "Note",
                        "attributedTo": BOB,
                        "inReplyTo": [
                            "https://local.example/users/alice/statuses/1",
                            "https://local.example/users/alice/statuses/2",
                        ],
                        "content": "two parents",
                    },
                ],
            }),
            &h.bob,
        )
        .await
        .unwrap_err();

    let InboxError::Multiple(ref errs) = err else {
        panic!("expected aggregated errors, got {err}");
    };
    assert_eq!(errs.errors().len(), 2);
    assert!(errs.errors().iter().all(|e| e.status() == StatusCode::BAD_REQUEST));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert!(!err.is_retryable());

    assert!(h.db.get_status_by_uri(good).await?.is_some());
    assert_eq!(h.count("statuses"), 1);
    let msgs = h.drain();
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].ap_object_type, ApType::Note);
    Ok(())
}

// ── Poll votes ──────────────────────────────────────────────────────────────

async fn poll(h: &Harness) -> Status {
    h.put_status(Status {
        id: "poll-1".to_string(),
        uri: "https://local.example/users/alice/statuses/poll".to_string(),
        account_id: h.alice.id.clone(),
        account_uri: h.alice.uri.clone(),
        poll_options: vec!["yes".to_string(), "no".to_string()],
        ..Default::default()
    })
    .await
}

fn vote(n: u32, poll_uri: &str, name: &str) -> Value {
    json!({
        "id": format!("https://remote.example/users/bob/votes/{n}"),
        "type": "Note",
        "attributedTo": BOB,
        "inReplyTo": poll_uri,
        "name": name,
    })
}

#[tokio::test]
async fn poll_votes_are_recorded_together() -> anyhow::Result<()> {
    let mut h = Harness::new().await?;
    let poll = poll(&h).await;

    h.deliver(
        json!({
            "id": "https://remote.example/creates/votes",
            "type": "Create",
            "actor": BOB,
            "object": [vote(1, &poll.uri, "no"), vote(2, &poll.uri, "yes")],
        }),
        &h.bob,
    )
    .await?;

    let recorded = h.db.get_poll_vote(&h.bob.id, &poll.id)?.expect("vote stored");
    assert_eq!(recorded.choices, vec![0, 1]);
    let msgs = h.drain();
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].ap_object_type, ApType::Question);
    Ok(())
}

#[tokio::test]
async fn vote_for_unknown_option_is_malformed() -> anyhow::Result<()> {
    let h = Harness::new().await?;
    let poll = poll(&h).await;

    let err = h
        .deliver(
            json!({
                "id": "https://remote.example/creates/votes",
                "type": "Create",
                "actor": BOB,
                "object": vote(1, &poll.uri, "maybe"),
            }),
            &h.bob,
        )
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(h.count("poll_votes"), 0);
    Ok(())
}

#[tokio::test]
async fn votes_on_different_polls_are_malformed() -> anyhow::Result<()> {
    let h = Harness::new().await?;
    let poll = poll(&h).await;

    let err = h
        .deliver(
            json!({
                "id": "https://remote.example/creates/votes",
                "type": "Create",
                "actor": BOB,
                "object": [
                    vote(1, &poll.uri, "yes"),
                    vote(2, "https://local.example/users/alice/statuses/other-poll", "yes"),
                ],
            }),
            &h.bob,
        )
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(h.count("poll_votes"), 0);
    Ok(())
}

// ── Retries after partial writes ────────────────────────────────────────────

#[tokio::test]
async fn like_request_retry_stores_the_missing_fave() -> anyhow::Result<()> {
    let mut h = Harness::new().await?;
    let status = h.status(&h.alice, 1).await;
    let ir = InteractionRequest::pending(InteractionType::Like, LIKE, &status, &h.bob.id)
        .polite(LIKE_REQUEST);
    h.db.put_interaction_request(&ir).await?;

    h.deliver(like_request(&status.uri), &h.bob).await?;

    let fave = h.db.get_status_fave_by_uri(LIKE).await?.expect("fave stored");
    assert_eq!(fave.status_id, status.id);
    assert_eq!(request_of(&h, LIKE).await?.id, ir.id);
    let msgs = h.drain();
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].ap_object_type, ApType::LikeRequest);
    Ok(())
}

#[tokio::test]
async fn like_retry_stores_the_missing_request() -> anyhow::Result<()> {
    let mut h = Harness::with_policy(StaticPolicy(PolicyResult::RequiresApproval)).await?;
    let status = h.status(&h.alice, 1).await;
    h.db.put_status_fave(&StatusFave {
        id: "fave-1".to_string(),
        uri: LIKE.to_string(),
        account_id: h.bob.id.clone(),
        target_account_id: h.alice.id.clone(),
        status_id: status.id.clone(),
        pending_approval: true,
        pre_approved: false,
        approved_by_uri: String::new(),
    })
    .await?;

    h.deliver(like(&status.uri), &h.bob).await?;

    assert_eq!(request_of(&h, LIKE).await?.state(), RequestState::Pending);
    assert_eq!(h.count("status_faves"), 1);
    assert_eq!(h.drain().len(), 1);
    Ok(())
}

#[tokio::test]
async fn redelivered_like_is_not_dispatched_again() -> anyhow::Result<()> {
    let mut h = Harness::new().await?;
    let status = h.status(&h.alice, 1).await;
    h.deliver(like(&status.uri), &h.bob).await?;
    assert_eq!(h.drain().len(), 1);

    let (processor, mut rx) = h.fresh_processor();
    let activity = Activity::from_value(&like(&status.uri))?;
    processor.process(&activity, &h.bob, &h.alice).await?;
    assert!(drain(&mut rx).is_empty());
    assert_eq!(h.count("status_faves"), 1);
    Ok(())
}

#[tokio::test]
async fn announce_retry_stores_the_missing_request() -> anyhow::Result<()> {
    let mut h = Harness::with_policy(StaticPolicy(PolicyResult::RequiresApproval)).await?;
    let status = h.status(&h.alice, 1).await;
    h.put_status(Status {
        id: "bob-boost".to_string(),
        uri: BOOST.to_string(),
        account_id: h.bob.id.clone(),
        account_uri: h.bob.uri.clone(),
        boost_of_uri: status.uri.clone(),
        pending_approval: true,
        ..Default::default()
    })
    .await;

    h.deliver(announce(&status.uri), &h.bob).await?;

    let ir = request_of(&h, BOOST).await?;
    assert_eq!(ir.interaction_type, InteractionType::Announce);
    assert_eq!(ir.target_status_id, status.id);
    assert_eq!(h.drain().len(), 1);
    Ok(())
}

#[tokio::test]
async fn announce_request_retry_stores_the_missing_boost() -> anyhow::Result<()> {
    let mut h = Harness::new().await?;
    let status = h.status(&h.alice, 1).await;
    let request_uri = "https://remote.example/announce_requests/1";
    let ir = InteractionRequest::pending(InteractionType::Announce, BOOST, &status, &h.bob.id)
        .polite(request_uri);
    h.db.put_interaction_request(&ir).await?;

    h.deliver(
        json!({
            "id": request_uri,
            "type": "AnnounceRequest",
            "actor": BOB,
            "object": status.uri,
            "instrument": {"id": BOOST, "type": "Announce", "actor": BOB, "object": status.uri},
        }),
        &h.bob,
    )
    .await?;

    let boost = h.db.get_status_by_uri(BOOST).await?.expect("boost stored");
    assert_eq!(boost.boost_of_uri, status.uri);
    let msgs = h.drain();
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].ap_object_type, ApType::AnnounceRequest);
    Ok(())
}

#[tokio::test]
async fn reply_retry_stores_the_missing_request() -> anyhow::Result<()> {
    let mut h = Harness::with_policy(StaticPolicy(PolicyResult::RequiresApproval)).await?;
    let parent = h.status(&h.alice, 1).await;
    let reply_uri = "https://remote.example/users/bob/statuses/5";
    h.put_status(Status {
        id: "bob-reply".to_string(),
        uri: reply_uri.to_string(),
        account_id: h.bob.id.clone(),
        account_uri: h.bob.uri.clone(),
        in_reply_to_uri: parent.uri.clone(),
        pending_approval: true,
        ..Default::default()
    })
    .await;

    h.deliver(
        json!({
            "id": "https://remote.example/creates/5",
            "type": "Create",
            "actor": BOB,
            "object": {
                "id": reply_uri,
                "type": "Note",
                "attributedTo": BOB,
                "inReplyTo": parent.uri,
                "content": "hello",
            },
        }),
        &h.bob,
    )
    .await?;

    let ir = request_of(&h, reply_uri).await?;
    assert_eq!(ir.interaction_type, InteractionType::Reply);
    assert_eq!(h.count("statuses"), 2);
    assert_eq!(h.drain().len(), 1);
    Ok(())
}
