/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::InboxError;
use crate::fedi_queue::Model;
use crate::model::{new_id, now_ms, Move};
use crate::processor::{exactly_one, inserted, InboxProcessor, Inbound};
use fedi3_protocol::ApType;
use tracing::{debug, info};

impl InboxProcessor {
    /// Account migration announced by the origin account.
    ///
    /// The worker resolves the target and re-points follows; here we only
    /// validate and record. One record is kept per origin and target; a
    /// retry under a fresh activity URI moves that record to the new URI.
    /// Every valid Move is dispatched.
    pub(crate) async fn handle_move(&self, inbound: Inbound<'_>) -> Result<(), InboxError> {
        let requesting = inbound.requesting;
        if requesting.is_local() {
            debug!(account = %requesting.uri, "ignoring Move from local account");
            return Ok(());
        }
        let uri = inbound.activity_id()?;
        let objects = inbound.activity.object_iris();
        let origin = exactly_one(&objects, "Move object")?;
        let actors = inbound.activity.actor_iris();
        let actor = exactly_one(&actors, "Move actor")?;
        let target = exactly_one(&inbound.activity.target, "Move target")?;

        if origin != actor || actor != requesting.uri {
            return Err(InboxError::malformed(format!(
                "Move object {origin} and actor {actor} must both be {}",
                requesting.uri
            )));
        }
        if target == requesting.uri {
            return Err(InboxError::malformed("Move target is the moving account itself"));
        }

        let _guard = self.locks.lock(uri).await;
        let mv = match self.store.get_move_by_uri(uri).await? {
            Some(stored) if stored.origin_uri != origin || stored.target_uri != target => {
                return Err(InboxError::unprocessable(format!(
                    "Move {uri} already recorded as {} -> {}",
                    stored.origin_uri, stored.target_uri
                )));
            }
            Some(stored) => stored,
            None => {
                if !requesting.moved_to_uri.is_empty() && requesting.moved_to_uri != target {
                    return Err(InboxError::unprocessable(format!(
                        "{} already moved to {}",
                        requesting.uri, requesting.moved_to_uri
                    )));
                }
                match self.store.get_move_by_origin_target(origin, target).await? {
                    // Same migration retried under a fresh activity URI.
                    Some(mut stored) => {
                        self.store.update_move_uri(&stored.id, uri).await?;
                        stored.uri = uri.to_string();
                        stored
                    }
                    None => {
                        let mv = Move {
                            id: new_id(),
                            uri: uri.to_string(),
                            origin_uri: origin.to_string(),
                            target_uri: target.to_string(),
                            created_at_ms: now_ms(),
                        };
                        inserted(self.store.put_move(&mv).await, "move", uri)?;
                        mv
                    }
                }
            }
        };
        info!(%uri, origin = %mv.origin_uri, target = %mv.target_uri, "move recorded");
        self.dispatch(
            inbound
                .message(ApType::Move, ApType::Profile)
                .model(Model::Move(mv)),
        );
        Ok(())
    }
}
