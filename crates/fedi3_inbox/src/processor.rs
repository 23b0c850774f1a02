/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::accept_reject::Verdict;
use crate::activity_ids::{activity_dedup_id, ActivityIds, SeenGuard};
use crate::config::InboxConfig;
use crate::error::{InboxError, StoreError};
use crate::fedi_queue::{FediMessage, FediQueue};
use crate::locks::ResourceLocks;
use crate::model::{Account, InteractionType, Status};
use crate::policy::{ApprovalFlags, PolicyEvaluator};
use crate::store::Store;
use fedi3_protocol::{Activity, ApType};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// One delivery: the activity plus the two accounts it was authenticated
/// for. `requesting` signed the request, `receiving` owns the inbox.
#[derive(Clone, Copy)]
pub(crate) struct Inbound<'a> {
    pub activity: &'a Activity,
    pub requesting: &'a Account,
    pub receiving: &'a Account,
}

impl<'a> Inbound<'a> {
    pub fn message(&self, activity: ApType, object: ApType) -> FediMessage {
        FediMessage::new(activity, object, self.receiving, self.requesting)
    }

    /// The activity id, required for anything that is stored by URI.
    pub fn activity_id(&self) -> Result<&'a str, InboxError> {
        self.activity
            .id
            .as_deref()
            .ok_or_else(|| InboxError::malformed(format!("{} has no id", self.activity.kind)))
    }

    /// Checks that the activity has a single actor and that it is the signer.
    pub fn require_actor_is_requester(&self) -> Result<(), InboxError> {
        let actors = self.activity.actor_iris();
        match actors.as_slice() {
            [actor] if *actor == self.requesting.uri => Ok(()),
            [actor] => Err(InboxError::forbidden(format!(
                "{} actor {actor} is not the requesting account {}",
                self.activity.kind, self.requesting.uri
            ))),
            _ => Err(InboxError::malformed(format!(
                "{} must have exactly one actor, has {}",
                self.activity.kind,
                actors.len()
            ))),
        }
    }
}

pub struct InboxProcessor {
    pub(crate) store: Arc<dyn Store>,
    policy: Arc<dyn PolicyEvaluator>,
    queue: Arc<dyn FediQueue>,
    pub(crate) locks: ResourceLocks,
    seen: ActivityIds,
}

impl InboxProcessor {
    pub fn new(
        store: Arc<dyn Store>,
        policy: Arc<dyn PolicyEvaluator>,
        queue: Arc<dyn FediQueue>,
        cfg: &InboxConfig,
    ) -> Self {
        Self::with_activity_cache(
            store,
            policy,
            queue,
            cfg.activity_cache_capacity,
            cfg.activity_cache_ttl(),
        )
    }

    pub fn with_activity_cache(
        store: Arc<dyn Store>,
        policy: Arc<dyn PolicyEvaluator>,
        queue: Arc<dyn FediQueue>,
        capacity: u64,
        ttl: Duration,
    ) -> Self {
        Self {
            store,
            policy,
            queue,
            locks: ResourceLocks::new(),
            seen: ActivityIds::new(capacity, ttl),
        }
    }

    /// Admits one inbound activity.
    ///
    /// A delivery whose id was already handled returns `Ok` without doing
    /// anything. A failed or cancelled delivery is forgotten again so the
    /// sender's retry gets processed.
    pub async fn process(
        &self,
        activity: &Activity,
        requesting: &Account,
        receiving: &Account,
    ) -> Result<(), InboxError> {
        let dedup_id = activity_dedup_id(activity);
        let Some(seen) = SeenGuard::register(&self.seen, dedup_id.clone()) else {
            debug!(id = %dedup_id, kind = %activity.kind, "duplicate delivery");
            return Ok(());
        };
        let inbound = Inbound {
            activity,
            requesting,
            receiving,
        };
        match self.route(inbound).await {
            Ok(()) => {
                seen.commit();
                Ok(())
            }
            Err(e) => {
                debug!(
                    id = %dedup_id,
                    kind = %activity.kind,
                    status = %e.status(),
                    "inbox activity failed: {e}"
                );
                Err(e)
            }
        }
    }

    async fn route(&self, inbound: Inbound<'_>) -> Result<(), InboxError> {
        match &inbound.activity.kind {
            ApType::Follow => self.handle_follow(inbound).await,
            ApType::Block => self.handle_block(inbound).await,
            ApType::Flag => self.handle_flag(inbound).await,
            ApType::Like => self.handle_like(inbound).await,
            ApType::Announce => self.handle_announce(inbound).await,
            ApType::Create => self.handle_create(inbound).await,
            ApType::LikeRequest => self.handle_like_request(inbound).await,
            ApType::ReplyRequest => self.handle_reply_request(inbound).await,
            ApType::AnnounceRequest => self.handle_announce_request(inbound).await,
            ApType::Accept => self.handle_verdict(inbound, Verdict::Accept).await,
            ApType::Reject => self.handle_verdict(inbound, Verdict::Reject).await,
            ApType::Undo => self.handle_undo(inbound).await,
            ApType::Update => self.handle_update(inbound).await,
            ApType::Move => self.handle_move(inbound).await,
            other => {
                debug!(kind = %other, "ignoring unsupported activity type");
                Ok(())
            }
        }
    }

    /// Runs the policy and maps a Forbidden answer to an error.
    pub(crate) async fn approval_for(
        &self,
        interacting: &Account,
        target: &Status,
        interaction: InteractionType,
    ) -> Result<ApprovalFlags, InboxError> {
        let result = self
            .policy
            .evaluate(interacting, target, interaction)
            .await
            .map_err(InboxError::Policy)?;
        result.approval_flags().ok_or_else(|| {
            InboxError::forbidden(format!(
                "{} by {} on {} is not permitted",
                interaction.as_str(),
                interacting.uri,
                target.uri
            ))
        })
    }

    pub(crate) fn dispatch(&self, msg: FediMessage) {
        self.queue.push(msg);
    }
}

/// Maps a store write to "did insert", treating a duplicate as benign.
pub(crate) fn inserted(
    res: Result<(), StoreError>,
    what: &str,
    uri: &str,
) -> Result<bool, InboxError> {
    match res {
        Ok(()) => Ok(true),
        Err(StoreError::AlreadyExists) => {
            warn!(%uri, "{what} already exists");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Single IRI of a property that must hold exactly one value.
pub(crate) fn exactly_one<'a, S: AsRef<str>>(
    values: &'a [S],
    what: &str,
) -> Result<&'a str, InboxError> {
    match values {
        [one] => Ok(one.as_ref()),
        _ => Err(InboxError::malformed(format!(
            "{what} must have exactly one value, has {}",
            values.len()
        ))),
    }
}
