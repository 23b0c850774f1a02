/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Polite interaction requests: LikeRequest, ReplyRequest and
//! AnnounceRequest. Each wraps the interaction it asks approval for in
//! `instrument`, and the object is the status being interacted with.

use crate::error::InboxError;
use crate::fedi_queue::Model;
use crate::model::{new_id, InteractionRequest, InteractionType, Status, StatusFave};
use crate::processor::{exactly_one, inserted, InboxProcessor, Inbound};
use fedi3_protocol::{ApObject, ApType};
use tracing::{debug, info, warn};

struct PoliteRequest<'a> {
    uri: &'a str,
    /// The status the interaction targets.
    object: &'a str,
    instrument: &'a ApObject,
}

/// Checks shared by the three request kinds. `Ok(None)` means the request
/// is ignored.
fn parse_polite<'a>(inbound: &Inbound<'a>) -> Result<Option<PoliteRequest<'a>>, InboxError> {
    let act = inbound.activity;
    if inbound.requesting.moving || inbound.receiving.moving {
        debug!(kind = %act.kind, "ignoring interaction request involving a moving account");
        return Ok(None);
    }
    let uri = inbound.activity_id()?;
    let object = match act.object.as_slice() {
        [one] => one
            .id()
            .ok_or_else(|| InboxError::malformed(format!("{} object has no id", act.kind)))?,
        other => {
            return Err(InboxError::malformed(format!(
                "invalid object len {}, wanted 1",
                other.len()
            )))
        }
    };
    let instrument = match act.instrument.as_slice() {
        [one] => one
            .as_object()
            .ok_or_else(|| InboxError::malformed("instrument must be an embedded object"))?,
        other => {
            return Err(InboxError::malformed(format!(
                "invalid instrument len {}, wanted 1",
                other.len()
            )))
        }
    };
    if let Some(approved_by) = instrument.approved_by.as_deref() {
        return Err(InboxError::malformed(format!(
            "instrument claims to already be approved by {approved_by}"
        )));
    }
    Ok(Some(PoliteRequest {
        uri,
        object,
        instrument,
    }))
}

fn instrument_id<'a>(instrument: &'a ApObject) -> Result<&'a str, InboxError> {
    instrument
        .id
        .as_deref()
        .ok_or_else(|| InboxError::malformed(format!("{} instrument has no id", instrument.kind)))
}

impl InboxProcessor {
    pub(crate) async fn handle_like_request(&self, inbound: Inbound<'_>) -> Result<(), InboxError> {
        let Some(req) = parse_polite(&inbound)? else {
            return Ok(());
        };
        let like = req.instrument;
        if like.kind != ApType::Like {
            return Err(InboxError::malformed(format!(
                "LikeRequest instrument is a {}",
                like.kind
            )));
        }
        let like_uri = instrument_id(like)?;
        let like_actor = exactly_one(&like.actor, "Like actor")?;
        if like_actor != inbound.requesting.uri {
            return Err(InboxError::forbidden(format!(
                "requester {} is not expected actor {like_actor}",
                inbound.requesting.uri
            )));
        }
        let like_objects = like.object_iris();
        if exactly_one(&like_objects, "Like object")? != req.object {
            return Err(InboxError::malformed("Like object does not match the request object"));
        }

        let _guard = self.locks.lock(like_uri).await;
        let Some(status) = self.store.get_status_by_uri(req.object).await? else {
            warn!(object = %req.object, "LikeRequest for unknown status");
            return Ok(());
        };
        if status.account_id != inbound.receiving.id {
            return Err(InboxError::forbidden(format!(
                "receiver {} is not owner of the requested status",
                inbound.receiving.uri
            )));
        }
        let flags = self
            .approval_for(inbound.requesting, &status, InteractionType::Like)
            .await?;

        let liker = &inbound.requesting.id;
        let ir = InteractionRequest::pending(InteractionType::Like, like_uri, &status, liker)
            .polite(req.uri);
        // Stored on an earlier attempt is fine; the fave below decides.
        inserted(
            self.store.put_interaction_request(&ir).await,
            "interaction request",
            req.uri,
        )?;
        let fave = StatusFave {
            id: new_id(),
            uri: like_uri.to_string(),
            account_id: inbound.requesting.id.clone(),
            target_account_id: status.account_id.clone(),
            status_id: status.id.clone(),
            pending_approval: flags.pending_approval,
            pre_approved: flags.pre_approved,
            approved_by_uri: String::new(),
        };
        if !inserted(self.store.put_status_fave(&fave).await, "status fave", like_uri)? {
            return Ok(());
        }
        info!(
            uri = %req.uri,
            like = %like_uri,
            pending = flags.pending_approval,
            "like request stored"
        );
        self.dispatch(
            inbound
                .message(ApType::Create, ApType::LikeRequest)
                .model(Model::StatusFave(fave))
                .approval(flags),
        );
        Ok(())
    }

    pub(crate) async fn handle_reply_request(
        &self,
        inbound: Inbound<'_>,
    ) -> Result<(), InboxError> {
        let Some(req) = parse_polite(&inbound)? else {
            return Ok(());
        };
        let reply = req.instrument;
        if !reply.kind.is_statusable() {
            return Err(InboxError::malformed(format!(
                "ReplyRequest instrument is a {}",
                reply.kind
            )));
        }
        let reply_uri = instrument_id(reply)?;
        let parent_uri = exactly_one(&reply.in_reply_to, "inReplyTo")?;
        if parent_uri != req.object {
            return Err(InboxError::malformed("inReplyTo does not match the request object"));
        }
        let author = exactly_one(&reply.attributed_to, "attributedTo")?;
        if author != inbound.requesting.uri {
            return Err(InboxError::malformed(format!(
                "status attributedTo {author} not requesting account {}",
                inbound.requesting.uri
            )));
        }

        let _guard = self.locks.lock(reply_uri).await;
        let Some(parent) = self.store.get_status_by_uri(parent_uri).await? else {
            warn!(%parent_uri, "ReplyRequest for unknown status");
            return Ok(());
        };
        if parent.account_id != inbound.receiving.id {
            return Err(InboxError::malformed(format!(
                "inReplyTo status {parent_uri} not owned by receiving account {}",
                inbound.receiving.uri
            )));
        }
        let flags = self
            .approval_for(inbound.requesting, &parent, InteractionType::Reply)
            .await?;

        let author = &inbound.requesting.id;
        let ir = InteractionRequest::pending(InteractionType::Reply, reply_uri, &parent, author)
            .polite(req.uri);
        if !inserted(
            self.store.put_interaction_request(&ir).await,
            "interaction request",
            req.uri,
        )? {
            return Ok(());
        }
        info!(
            uri = %req.uri,
            reply = %reply_uri,
            pending = flags.pending_approval,
            "reply request stored"
        );
        self.dispatch(
            inbound
                .message(ApType::Create, ApType::ReplyRequest)
                .model(Model::InteractionRequest(ir))
                .raw(&reply.raw)
                .approval(flags),
        );
        Ok(())
    }

    pub(crate) async fn handle_announce_request(
        &self,
        inbound: Inbound<'_>,
    ) -> Result<(), InboxError> {
        let Some(req) = parse_polite(&inbound)? else {
            return Ok(());
        };
        let announce = req.instrument;
        if announce.kind != ApType::Announce {
            return Err(InboxError::malformed(format!(
                "AnnounceRequest instrument is a {}",
                announce.kind
            )));
        }
        let boost_uri = instrument_id(announce)?;
        let boosted_objects = announce.object_iris();
        let boosted_uri = exactly_one(&boosted_objects, "Announce object")?;
        if boosted_uri != req.object {
            return Err(InboxError::malformed(
                "Announce object does not match the request object",
            ));
        }

        let _guard = self.locks.lock(boost_uri).await;
        if self.store.get_status_by_uri(boost_uri).await?.is_some() {
            warn!(%boost_uri, "AnnounceRequest for existing announce");
            return Ok(());
        }
        let Some(boosted) = self.store.get_status_by_uri(boosted_uri).await? else {
            warn!(%boosted_uri, "AnnounceRequest for unknown status");
            return Ok(());
        };
        if boosted.account_id != inbound.receiving.id {
            return Err(InboxError::malformed(format!(
                "announce object {boosted_uri} not owned by receiving account {}",
                inbound.receiving.uri
            )));
        }
        let booster = exactly_one(&announce.actor, "Announce actor")?;
        if booster != inbound.requesting.uri {
            return Err(InboxError::forbidden(format!(
                "requester {} is not expected actor {booster}",
                inbound.requesting.uri
            )));
        }
        let flags = self
            .approval_for(inbound.requesting, &boosted, InteractionType::Announce)
            .await?;

        let booster = &inbound.requesting.id;
        let kind = InteractionType::Announce;
        let ir = InteractionRequest::pending(kind, boost_uri, &boosted, booster).polite(req.uri);
        // Stored on an earlier attempt is fine; the boost below decides.
        inserted(
            self.store.put_interaction_request(&ir).await,
            "interaction request",
            req.uri,
        )?;
        let boost = Status {
            id: new_id(),
            uri: boost_uri.to_string(),
            account_id: inbound.requesting.id.clone(),
            account_uri: inbound.requesting.uri.clone(),
            boost_of_uri: boosted.uri.clone(),
            pending_approval: flags.pending_approval,
            ..Default::default()
        };
        if !inserted(self.store.put_status(&boost).await, "boost", boost_uri)? {
            return Ok(());
        }
        info!(
            uri = %req.uri,
            boost = %boost_uri,
            pending = flags.pending_approval,
            "announce request stored"
        );
        self.dispatch(
            inbound
                .message(ApType::Create, ApType::AnnounceRequest)
                .model(Model::Status(boost))
                .approval(flags),
        );
        Ok(())
    }
}
