/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::InboxError;
use crate::fedi_queue::Model;
use crate::model::{new_id, InteractionRequest, InteractionType, Status, StatusFave};
use crate::processor::{exactly_one, inserted, InboxProcessor, Inbound};
use fedi3_protocol::ApType;
use tracing::{debug, info};

impl InboxProcessor {
    /// A Like sent without asking first. The fave is stored straight away,
    /// pending if the policy wants approval.
    pub(crate) async fn handle_like(&self, inbound: Inbound<'_>) -> Result<(), InboxError> {
        let uri = inbound.activity_id()?;
        inbound.require_actor_is_requester()?;
        let objects = inbound.activity.object_iris();
        let object = exactly_one(&objects, "Like object")?;

        let _guard = self.locks.lock(uri).await;
        let Some(status) = self.store.get_status_by_uri(object).await? else {
            debug!(%object, "like of unknown status");
            return Ok(());
        };
        if status.account_id != inbound.receiving.id {
            return Err(InboxError::forbidden(format!(
                "receiver {} is not owner of liked status {object}",
                inbound.receiving.uri
            )));
        }
        let flags = self
            .approval_for(inbound.requesting, &status, InteractionType::Like)
            .await?;

        let fave = StatusFave {
            id: new_id(),
            uri: uri.to_string(),
            account_id: inbound.requesting.id.clone(),
            target_account_id: status.account_id.clone(),
            status_id: status.id.clone(),
            pending_approval: flags.pending_approval,
            pre_approved: flags.pre_approved,
            approved_by_uri: String::new(),
        };
        // Only the last write decides whether this delivery is new.
        let mut fresh = inserted(self.store.put_status_fave(&fave).await, "status fave", uri)?;
        if flags.pending_approval {
            fresh = self
                .store_impolite_request(InteractionType::Like, uri, &status, &inbound.requesting.id)
                .await?;
        }
        if !fresh {
            debug!(%uri, "like already stored");
            return Ok(());
        }
        info!(%uri, pending = flags.pending_approval, "like stored");
        self.dispatch(
            inbound
                .message(ApType::Create, ApType::Like)
                .model(Model::StatusFave(fave))
                .approval(flags),
        );
        Ok(())
    }

    /// Bookkeeping record for a bare interaction that still needs an Accept,
    /// so a later Accept or Reject finds it. Returns false when it was
    /// already stored.
    pub(crate) async fn store_impolite_request(
        &self,
        kind: InteractionType,
        interaction_uri: &str,
        target: &Status,
        interacting_account_id: &str,
    ) -> Result<bool, InboxError> {
        let ir = InteractionRequest::pending(kind, interaction_uri, target, interacting_account_id);
        inserted(
            self.store.put_interaction_request(&ir).await,
            "interaction request",
            interaction_uri,
        )
    }
}
