/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::model::{
    Account, Block, Follow, FollowRequest, InteractionRequest, Move, PollVote, Report, Status,
    StatusFave,
};
use crate::policy::ApprovalFlags;
use fedi3_protocol::ApType;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::warn;

/// Record a side-effect message refers to.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum Model {
    Status(Status),
    FollowRequest(FollowRequest),
    Follow(Follow),
    Block(Block),
    Report(Report),
    StatusFave(StatusFave),
    InteractionRequest(InteractionRequest),
    Move(Move),
    PollVote(PollVote),
}

/// Work handed to the federation workers once an activity is admitted.
#[derive(Debug, Clone, Serialize)]
pub struct FediMessage {
    pub ap_activity_type: ApType,
    pub ap_object_type: ApType,
    pub model: Option<Model>,
    pub raw: Option<Value>,
    /// Set when the worker must dereference the object itself.
    pub iri: Option<String>,
    pub approval: Option<ApprovalFlags>,
    pub receiving: Account,
    pub requesting: Account,
}

impl FediMessage {
    pub fn new(
        activity: ApType,
        object: ApType,
        receiving: &Account,
        requesting: &Account,
    ) -> Self {
        Self {
            ap_activity_type: activity,
            ap_object_type: object,
            model: None,
            raw: None,
            iri: None,
            approval: None,
            receiving: receiving.clone(),
            requesting: requesting.clone(),
        }
    }

    pub fn model(mut self, model: Model) -> Self {
        self.model = Some(model);
        self
    }

    pub fn raw(mut self, raw: &Value) -> Self {
        self.raw = Some(raw.clone());
        self
    }

    pub fn iri(mut self, iri: &str) -> Self {
        self.iri = Some(iri.to_string());
        self
    }

    pub fn approval(mut self, flags: ApprovalFlags) -> Self {
        self.approval = Some(flags);
        self
    }
}

/// Fire-and-forget hand-off to the worker pool.
pub trait FediQueue: Send + Sync {
    fn push(&self, msg: FediMessage);
}

#[derive(Clone)]
pub struct ChannelQueue {
    tx: mpsc::UnboundedSender<FediMessage>,
}

impl ChannelQueue {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<FediMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl FediQueue for ChannelQueue {
    fn push(&self, msg: FediMessage) {
        let activity = msg.ap_activity_type.clone();
        let object = msg.ap_object_type.clone();
        if self.tx.send(msg).is_err() {
            warn!(%activity, %object, "fedi queue closed, dropping message");
        }
    }
}
