/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use fedi3_inbox::protocol::Activity;
use fedi3_inbox::{
    Account, ChannelQueue, FediMessage, InboxConfig, InboxError, InboxProcessor, InteractionType,
    PolicyEvaluator, PolicyResult, SocialDb, StaticPolicy, Status, Store,
};
use serde_json::Value;
use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedReceiver;

pub const ALICE: &str = "https://local.example/users/alice";
pub const BOB: &str = "https://remote.example/users/bob";
pub const CAROL: &str = "https://other.example/users/carol";

// ── Test context ────────────────────────────────────────────────────────────

/// Local `alice` owns the inbox; remote `bob` and `carol` send to it.
pub struct Harness {
    pub db: SocialDb,
    pub processor: InboxProcessor,
    pub rx: UnboundedReceiver<FediMessage>,
    pub alice: Account,
    pub bob: Account,
    pub carol: Account,
    policy: Arc<dyn PolicyEvaluator>,
    _dir: TempDir,
}

fn account(id: &str, uri: &str, username: &str, domain: &str) -> Account {
    Account {
        id: id.to_string(),
        uri: uri.to_string(),
        username: username.to_string(),
        domain: domain.to_string(),
        followers_uri: format!("{uri}/followers"),
        ..Default::default()
    }
}

impl Harness {
    pub async fn new() -> anyhow::Result<Self> {
        Self::with_policy(StaticPolicy(PolicyResult::Permitted)).await
    }

    pub async fn with_policy(policy: impl PolicyEvaluator + 'static) -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let db = SocialDb::open(dir.path().join("inbox.db"))?;
        let alice = account("alice-id", ALICE, "alice", "");
        let bob = account("bob-id", BOB, "bob", "remote.example");
        let carol = account("carol-id", CAROL, "carol", "other.example");
        for a in [&alice, &bob, &carol] {
            db.upsert_account(a)?;
        }
        let policy: Arc<dyn PolicyEvaluator> = Arc::new(policy);
        let (processor, rx) = build_processor(&db, policy.clone());
        Ok(Self {
            db,
            processor,
            rx,
            alice,
            bob,
            carol,
            policy,
            _dir: dir,
        })
    }

    /// Second processor on the same database, with an empty activity cache.
    pub fn fresh_processor(&self) -> (InboxProcessor, UnboundedReceiver<FediMessage>) {
        build_processor(&self.db, self.policy.clone())
    }

    /// Delivers `activity` to alice's inbox, signed by `from`.
    pub async fn deliver(&self, activity: Value, from: &Account) -> Result<(), InboxError> {
        let activity = Activity::from_value(&activity).expect("activity decodes");
        self.processor.process(&activity, from, &self.alice).await
    }

    pub fn drain(&mut self) -> Vec<FediMessage> {
        drain(&mut self.rx)
    }

    pub fn counts(&self) -> Vec<(&'static str, i64)> {
        self.db.table_counts().expect("table counts")
    }

    pub fn count(&self, table: &str) -> i64 {
        self.counts()
            .into_iter()
            .find(|(t, _)| *t == table)
            .map(|(_, n)| n)
            .expect("known table")
    }

    /// Stores a plain status by `owner` at `{owner}/statuses/{n}`.
    pub async fn status(&self, owner: &Account, n: u32) -> Status {
        self.put_status(Status {
            id: format!("{}-status-{n}", owner.username),
            uri: format!("{}/statuses/{n}", owner.uri),
            account_id: owner.id.clone(),
            account_uri: owner.uri.clone(),
            ..Default::default()
        })
        .await
    }

    pub async fn put_status(&self, status: Status) -> Status {
        self.db.put_status(&status).await.expect("put status");
        status
    }
}

fn build_processor(
    db: &SocialDb,
    policy: Arc<dyn PolicyEvaluator>,
) -> (InboxProcessor, UnboundedReceiver<FediMessage>) {
    let (queue, rx) = ChannelQueue::new();
    let processor = InboxProcessor::new(
        Arc::new(db.clone()),
        policy,
        Arc::new(queue),
        &InboxConfig::default(),
    );
    (processor, rx)
}

pub fn drain(rx: &mut UnboundedReceiver<FediMessage>) -> Vec<FediMessage> {
    let mut out = Vec::new();
    while let Ok(msg) = rx.try_recv() {
        out.push(msg);
    }
    out
}

/// Policy backend that is always unavailable.
pub struct FailingPolicy;

#[async_trait]
impl PolicyEvaluator for FailingPolicy {
    async fn evaluate(
        &self,
        _: &Account,
        _: &Status,
        _: InteractionType,
    ) -> anyhow::Result<PolicyResult> {
        anyhow::bail!("policy backend unavailable")
    }
}
