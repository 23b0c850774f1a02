/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Accept and Reject of interactions the receiving account sent out:
//! follows, likes, replies and boosts.
//!
//! Whichever of Accept and Reject is applied last decides the final state.
//! Repeating the current decision only moves `response_uri`.

use crate::error::{InboxError, MultiError};
use crate::fedi_queue::Model;
use crate::model::{now_ms, Follow, InteractionRequest, InteractionType};
use crate::processor::{inserted, InboxProcessor, Inbound};
use fedi3_protocol::uris::{parse_local_path, LocalPath};
use fedi3_protocol::{ApType, ObjectRef};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verdict {
    Accept,
    Reject,
}

impl Verdict {
    fn ap_type(self) -> ApType {
        match self {
            Self::Accept => ApType::Accept,
            Self::Reject => ApType::Reject,
        }
    }

    /// Returns whether the state changed.
    fn apply(self, ir: &mut InteractionRequest, response_uri: &str) -> bool {
        match self {
            Self::Accept => ir.accept(response_uri, now_ms()),
            Self::Reject => ir.reject(response_uri, now_ms()),
        }
    }
}

enum Target<'a> {
    Follow(&'a str),
    Like(&'a str),
    Status(&'a str),
}

fn target_of(obj: &ObjectRef) -> Option<Target<'_>> {
    match obj {
        ObjectRef::Object(o) => {
            let id = o.id.as_deref()?;
            match &o.kind {
                ApType::Follow => Some(Target::Follow(id)),
                ApType::Like => Some(Target::Like(id)),
                ApType::Announce => Some(Target::Status(id)),
                k if k.is_statusable() => Some(Target::Status(id)),
                _ => None,
            }
        }
        ObjectRef::Iri(iri) => match parse_local_path(iri)?.kind {
            LocalPath::Follow => Some(Target::Follow(iri)),
            LocalPath::Like => Some(Target::Like(iri)),
            LocalPath::Status => Some(Target::Status(iri)),
        },
    }
}

impl InboxProcessor {
    pub(crate) async fn handle_verdict(
        &self,
        inbound: Inbound<'_>,
        verdict: Verdict,
    ) -> Result<(), InboxError> {
        let response_uri = inbound.activity_id()?;
        inbound.require_actor_is_requester()?;
        let mut errs = MultiError::new();
        for obj in &inbound.activity.object {
            let res = match target_of(obj) {
                Some(Target::Follow(uri)) => self.follow_verdict(inbound, verdict, uri).await,
                Some(Target::Like(uri)) => {
                    self.like_verdict(inbound, verdict, response_uri, uri).await
                }
                Some(Target::Status(uri)) => {
                    self.status_verdict(inbound, verdict, response_uri, uri).await
                }
                None => {
                    debug!(
                        object = ?obj.id(),
                        kind = %inbound.activity.kind,
                        "ignoring unmatched object"
                    );
                    Ok(())
                }
            };
            errs.record(res);
        }
        errs.into_result()
    }

    async fn follow_verdict(
        &self,
        inbound: Inbound<'_>,
        verdict: Verdict,
        uri: &str,
    ) -> Result<(), InboxError> {
        let _guard = self.locks.lock(uri).await;
        let request = self.store.get_follow_request_by_uri(uri).await?;
        let follow = self.store.get_follow_by_uri(uri).await?;
        let (account_id, target_account_id) = match (&request, &follow) {
            (Some(fr), _) => (&fr.account_id, &fr.target_account_id),
            (None, Some(f)) => (&f.account_id, &f.target_account_id),
            (None, None) => {
                debug!(%uri, "verdict on unknown follow");
                return Ok(());
            }
        };
        if *account_id != inbound.receiving.id || *target_account_id != inbound.requesting.id {
            return Err(InboxError::forbidden(format!(
                "follow {uri} is not from the receiving account to the requesting account"
            )));
        }

        match verdict {
            Verdict::Accept => {
                let Some(fr) = request else {
                    debug!(%uri, "follow already accepted");
                    return Ok(());
                };
                let follow = Follow::from(&fr);
                inserted(self.store.put_follow(&follow).await, "follow", uri)?;
                self.store.delete_follow_request_by_uri(uri).await?;
                info!(%uri, "follow accepted");
                self.dispatch(
                    inbound
                        .message(ApType::Accept, ApType::Follow)
                        .model(Model::Follow(follow)),
                );
            }
            Verdict::Reject => {
                self.store.delete_follow_request_by_uri(uri).await?;
                self.store.delete_follow_by_uri(uri).await?;
                info!(%uri, "follow rejected");
            }
        }
        Ok(())
    }

    async fn like_verdict(
        &self,
        inbound: Inbound<'_>,
        verdict: Verdict,
        response_uri: &str,
        uri: &str,
    ) -> Result<(), InboxError> {
        let _guard = self.locks.lock(uri).await;
        let Some(mut fave) = self.store.get_status_fave_by_uri(uri).await? else {
            debug!(%uri, "verdict on unknown like");
            return Ok(());
        };
        if fave.account_id != inbound.receiving.id
            || fave.target_account_id != inbound.requesting.id
        {
            return Err(InboxError::forbidden(format!(
                "like {uri} is not by the receiving account on a status of the requesting account"
            )));
        }

        // Before the interaction request, which decides whether side effects are due.
        if verdict == Verdict::Accept {
            fave.pending_approval = false;
            fave.approved_by_uri = response_uri.to_string();
            self.store.update_status_fave(&fave).await?;
        }
        let existing = self.store.get_interaction_request_by_interaction_uri(uri).await?;
        let Some(ir) = self
            .apply_verdict(verdict, response_uri, existing, || {
                InteractionRequest::for_fave(&fave)
            })
            .await?
        else {
            return Ok(());
        };
        info!(%uri, ?verdict, "like verdict applied");
        self.dispatch(
            inbound
                .message(verdict.ap_type(), ApType::Like)
                .model(Model::InteractionRequest(ir)),
        );
        Ok(())
    }

    /// A reply or boost by the receiving account, decided by the author of
    /// the status it interacts with.
    async fn status_verdict(
        &self,
        inbound: Inbound<'_>,
        verdict: Verdict,
        response_uri: &str,
        uri: &str,
    ) -> Result<(), InboxError> {
        let _guard = self.locks.lock(uri).await;
        let Some(status) = self.store.get_status_by_uri(uri).await? else {
            debug!(%uri, "verdict on unknown status");
            return Ok(());
        };
        if status.account_id != inbound.receiving.id {
            return Err(InboxError::forbidden(format!(
                "status {uri} is not owned by the receiving account"
            )));
        }
        let (kind, object_type, target_uri) = if status.is_boost() {
            (InteractionType::Announce, ApType::Announce, status.boost_of_uri.as_str())
        } else if status.is_reply() {
            (InteractionType::Reply, ApType::Note, status.in_reply_to_uri.as_str())
        } else {
            return Err(InboxError::malformed(format!(
                "status {uri} is neither a reply nor a boost"
            )));
        };
        let Some(target) = self.store.get_status_by_uri(target_uri).await? else {
            debug!(%uri, %target_uri, "verdict on interaction with unknown status");
            return Ok(());
        };
        if target.account_id != inbound.requesting.id {
            return Err(InboxError::forbidden(format!(
                "{target_uri} is not owned by the requesting account"
            )));
        }
        if verdict == Verdict::Reject
            && kind == InteractionType::Reply
            && target.mentions_account(&inbound.receiving.uri)
        {
            return Err(InboxError::forbidden(format!(
                "{target_uri} mentions the receiving account, its replies cannot be rejected"
            )));
        }

        if verdict == Verdict::Accept {
            self.store.update_status_approval(&status.id, response_uri).await?;
        }
        let existing = self.store.get_interaction_request_by_interaction_uri(uri).await?;
        let Some(ir) = self
            .apply_verdict(verdict, response_uri, existing, || {
                InteractionRequest::pending(kind, uri, &target, &inbound.receiving.id)
            })
            .await?
        else {
            return Ok(());
        };
        info!(%uri, ?verdict, kind = kind.as_str(), "status verdict applied");
        self.dispatch(
            inbound
                .message(verdict.ap_type(), object_type)
                .model(Model::InteractionRequest(ir)),
        );
        Ok(())
    }

    /// Moves the interaction request to the verdict's state, creating it if
    /// the interaction never went through a request. Returns the record
    /// only when side effects are due.
    async fn apply_verdict(
        &self,
        verdict: Verdict,
        response_uri: &str,
        existing: Option<InteractionRequest>,
        create: impl FnOnce() -> InteractionRequest,
    ) -> Result<Option<InteractionRequest>, InboxError> {
        match existing {
            Some(mut ir) => {
                let changed = verdict.apply(&mut ir, response_uri);
                self.store.update_interaction_request(&ir).await?;
                if !changed {
                    debug!(uri = %ir.interaction_uri, ?verdict, "verdict already applied");
                    return Ok(None);
                }
                Ok(Some(ir))
            }
            None => {
                let mut ir = create();
                verdict.apply(&mut ir, response_uri);
                if !inserted(
                    self.store.put_interaction_request(&ir).await,
                    "interaction request",
                    &ir.interaction_uri,
                )? {
                    return Ok(None);
                }
                Ok(Some(ir))
            }
        }
    }
}
