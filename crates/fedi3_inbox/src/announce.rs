/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::InboxError;
use crate::fedi_queue::Model;
use crate::model::{new_id, InteractionType, Status};
use crate::processor::{exactly_one, inserted, InboxProcessor, Inbound};
use fedi3_protocol::ApType;
use tracing::{debug, info};

impl InboxProcessor {
    /// A boost of one of the receiving account's statuses.
    pub(crate) async fn handle_announce(&self, inbound: Inbound<'_>) -> Result<(), InboxError> {
        let uri = inbound.activity_id()?;
        inbound.require_actor_is_requester()?;
        let objects = inbound.activity.object_iris();
        let boosted_uri = exactly_one(&objects, "Announce object")?;

        let _guard = self.locks.lock(uri).await;
        let Some(boosted) = self.store.get_status_by_uri(boosted_uri).await? else {
            debug!(%uri, %boosted_uri, "announce of unknown status");
            return Ok(());
        };
        if boosted.account_id != inbound.receiving.id {
            return Err(InboxError::malformed(format!(
                "announce object {boosted_uri} not owned by receiving account {}",
                inbound.receiving.uri
            )));
        }
        let flags = self
            .approval_for(inbound.requesting, &boosted, InteractionType::Announce)
            .await?;

        let boost = Status {
            id: new_id(),
            uri: uri.to_string(),
            account_id: inbound.requesting.id.clone(),
            account_uri: inbound.requesting.uri.clone(),
            boost_of_uri: boosted.uri.clone(),
            pending_approval: flags.pending_approval,
            ..Default::default()
        };
        let mut fresh = inserted(self.store.put_status(&boost).await, "boost", uri)?;
        if flags.pending_approval {
            let booster = &inbound.requesting.id;
            fresh = self
                .store_impolite_request(InteractionType::Announce, uri, &boosted, booster)
                .await?;
        }
        if !fresh {
            debug!(%uri, "announce already stored");
            return Ok(());
        }
        info!(%uri, boosted = %boosted.uri, pending = flags.pending_approval, "boost stored");
        self.dispatch(
            inbound
                .message(ApType::Create, ApType::Announce)
                .model(Model::Status(boost))
                .approval(flags),
        );
        Ok(())
    }
}
