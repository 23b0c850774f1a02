/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::{InboxError, MultiError};
use crate::fedi_queue::Model;
use crate::processor::{InboxProcessor, Inbound};
use fedi3_protocol::{ApObject, ApType, ObjectRef};
use tracing::{debug, info};

impl InboxProcessor {
    pub(crate) async fn handle_undo(&self, inbound: Inbound<'_>) -> Result<(), InboxError> {
        inbound.require_actor_is_requester()?;
        let mut errs = MultiError::new();
        for obj in &inbound.activity.object {
            let res = match obj {
                ObjectRef::Object(o) => self.undo_object(inbound, o).await,
                ObjectRef::Iri(iri) => self.undo_iri(inbound, iri).await,
            };
            errs.record(res);
        }
        errs.into_result()
    }

    async fn undo_object(&self, inbound: Inbound<'_>, obj: &ApObject) -> Result<(), InboxError> {
        let Some(uri) = obj.id.as_deref() else {
            return Err(InboxError::malformed(format!("undone {} has no id", obj.kind)));
        };
        // An embedded object names its own actor, which must be the signer too.
        if let Some(actor) = obj.actor.first() {
            if *actor != inbound.requesting.uri {
                return Err(InboxError::forbidden(format!(
                    "undone {} was not sent by the requesting account",
                    obj.kind
                )));
            }
        }
        match obj.kind {
            ApType::Follow => {
                if obj.object_iris() != [inbound.receiving.uri.as_str()] {
                    return Err(InboxError::forbidden(
                        "undone follow does not target the receiving account",
                    ));
                }
                self.undo_follow(inbound, uri).await
            }
            ApType::Like => self.undo_like(inbound, uri).await,
            ApType::Block => self.undo_block(inbound, uri).await,
            ApType::Announce => self.undo_announce(inbound, uri).await,
            ref other => {
                debug!(kind = %other, "ignoring Undo of unsupported object");
                Ok(())
            }
        }
    }

    /// Bare IRIs carry no type, so try each kind of record in turn.
    async fn undo_iri(&self, inbound: Inbound<'_>, uri: &str) -> Result<(), InboxError> {
        if self.store.get_follow_by_uri(uri).await?.is_some()
            || self.store.get_follow_request_by_uri(uri).await?.is_some()
        {
            return self.undo_follow(inbound, uri).await;
        }
        if self.store.get_status_fave_by_uri(uri).await?.is_some() {
            return self.undo_like(inbound, uri).await;
        }
        if self.store.get_block_by_uri(uri).await?.is_some() {
            return self.undo_block(inbound, uri).await;
        }
        if let Some(status) = self.store.get_status_by_uri(uri).await? {
            if status.is_boost() {
                return self.undo_announce(inbound, uri).await;
            }
        }
        debug!(%uri, "undo of unknown object");
        Ok(())
    }

    async fn undo_follow(&self, inbound: Inbound<'_>, uri: &str) -> Result<(), InboxError> {
        let _guard = self.locks.lock(uri).await;
        let follow = self.store.get_follow_by_uri(uri).await?;
        let request = self.store.get_follow_request_by_uri(uri).await?;
        let (account_id, target_account_id) = match (&follow, &request) {
            (Some(f), _) => (&f.account_id, &f.target_account_id),
            (None, Some(fr)) => (&fr.account_id, &fr.target_account_id),
            (None, None) => {
                debug!(%uri, "undo of unknown follow");
                return Ok(());
            }
        };
        if *account_id != inbound.requesting.id || *target_account_id != inbound.receiving.id {
            return Err(InboxError::forbidden(format!(
                "follow {uri} is not from the requesting account to the receiving account"
            )));
        }
        self.store.delete_follow_by_uri(uri).await?;
        self.store.delete_follow_request_by_uri(uri).await?;
        info!(%uri, "follow undone");
        Ok(())
    }

    async fn undo_like(&self, inbound: Inbound<'_>, uri: &str) -> Result<(), InboxError> {
        let _guard = self.locks.lock(uri).await;
        let Some(fave) = self.store.get_status_fave_by_uri(uri).await? else {
            debug!(%uri, "undo of unknown like");
            return Ok(());
        };
        if fave.account_id != inbound.requesting.id {
            return Err(InboxError::forbidden(format!(
                "like {uri} is not by the requesting account"
            )));
        }
        self.store.delete_status_fave_by_uri(uri).await?;
        info!(%uri, "like undone");
        self.dispatch(
            inbound
                .message(ApType::Undo, ApType::Like)
                .model(Model::StatusFave(fave)),
        );
        Ok(())
    }

    async fn undo_block(&self, inbound: Inbound<'_>, uri: &str) -> Result<(), InboxError> {
        let _guard = self.locks.lock(uri).await;
        let Some(block) = self.store.get_block_by_uri(uri).await? else {
            debug!(%uri, "undo of unknown block");
            return Ok(());
        };
        if block.account_id != inbound.requesting.id {
            return Err(InboxError::forbidden(format!(
                "block {uri} is not by the requesting account"
            )));
        }
        self.store.delete_block_by_uri(uri).await?;
        info!(%uri, "block undone");
        self.dispatch(
            inbound
                .message(ApType::Undo, ApType::Block)
                .model(Model::Block(block)),
        );
        Ok(())
    }

    async fn undo_announce(&self, inbound: Inbound<'_>, uri: &str) -> Result<(), InboxError> {
        let mut msg = inbound.message(ApType::Undo, ApType::Announce).iri(uri);
        if let Some(boost) = self.store.get_status_by_uri(uri).await? {
            if boost.account_id != inbound.requesting.id {
                return Err(InboxError::forbidden(format!(
                    "boost {uri} is not by the requesting account"
                )));
            }
            msg = msg.model(Model::Status(boost));
        }
        info!(%uri, "boost undone");
        self.dispatch(msg);
        Ok(())
    }
}
