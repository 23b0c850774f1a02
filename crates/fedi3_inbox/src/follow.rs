/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::InboxError;
use crate::fedi_queue::Model;
use crate::model::{new_id, Block, FollowRequest};
use crate::processor::{exactly_one, inserted, InboxProcessor, Inbound};
use fedi3_protocol::ApType;
use tracing::{debug, info};

impl InboxProcessor {
    pub(crate) async fn handle_follow(&self, inbound: Inbound<'_>) -> Result<(), InboxError> {
        let uri = inbound.activity_id()?;
        let objects = inbound.activity.object_iris();
        let object = exactly_one(&objects, "Follow object")?;
        inbound.require_actor_is_requester()?;
        if object != inbound.receiving.uri {
            return Err(InboxError::forbidden(format!(
                "follow target {object} is not the receiving account"
            )));
        }

        let _guard = self.locks.lock(uri).await;
        if self.store.get_follow_by_uri(uri).await?.is_some() {
            debug!(%uri, "follow already accepted");
            return Ok(());
        }
        let fr = FollowRequest {
            id: new_id(),
            uri: uri.to_string(),
            account_id: inbound.requesting.id.clone(),
            target_account_id: inbound.receiving.id.clone(),
        };
        if !inserted(self.store.put_follow_request(&fr).await, "follow request", uri)? {
            return Ok(());
        }
        info!(%uri, from = %inbound.requesting.uri, "follow request stored");
        self.dispatch(
            inbound
                .message(ApType::Create, ApType::Follow)
                .model(Model::FollowRequest(fr)),
        );
        Ok(())
    }

    pub(crate) async fn handle_block(&self, inbound: Inbound<'_>) -> Result<(), InboxError> {
        let uri = inbound.activity_id()?;
        let objects = inbound.activity.object_iris();
        let object = exactly_one(&objects, "Block object")?;
        inbound.require_actor_is_requester()?;
        if object != inbound.receiving.uri {
            return Err(InboxError::forbidden(format!(
                "block target {object} is not the receiving account"
            )));
        }

        let _guard = self.locks.lock(uri).await;
        let block = Block {
            id: new_id(),
            uri: uri.to_string(),
            account_id: inbound.requesting.id.clone(),
            target_account_id: inbound.receiving.id.clone(),
        };
        if !inserted(self.store.put_block(&block).await, "block", uri)? {
            return Ok(());
        }
        info!(%uri, from = %inbound.requesting.uri, "block stored");
        self.dispatch(inbound.message(ApType::Create, ApType::Block).model(Model::Block(block)));
        Ok(())
    }
}
