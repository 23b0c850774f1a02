/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::InboxError;
use crate::fedi_queue::Model;
use crate::model::{new_id, Account, Report};
use crate::processor::{exactly_one, inserted, InboxProcessor, Inbound};
use fedi3_protocol::uris::{host_of, is_same_or_subdomain};
use fedi3_protocol::ApType;
use tracing::{debug, info};

impl InboxProcessor {
    /// Reports usually come from an instance actor rather than a person, so
    /// the signer is matched by domain instead of by URI.
    pub(crate) async fn handle_flag(&self, inbound: Inbound<'_>) -> Result<(), InboxError> {
        let uri = inbound.activity_id()?;
        let actors = inbound.activity.actor_iris();
        let actor = exactly_one(&actors, "Flag actor")?;
        let actor_host = host_of(actor)
            .ok_or_else(|| InboxError::malformed(format!("flag actor {actor} has no host")))?;
        if !is_same_or_subdomain(&inbound.requesting.domain, &actor_host) {
            return Err(InboxError::forbidden(format!(
                "requesting domain {} does not belong to flag actor host {actor_host}",
                inbound.requesting.domain
            )));
        }

        let mut reported: Option<Account> = None;
        let mut statuses = Vec::new();
        for object in inbound.activity.object_iris() {
            if object == inbound.receiving.uri {
                if reported.is_none() {
                    reported = Some(inbound.receiving.clone());
                }
                continue;
            }
            if let Some(account) = self.store.get_account_by_uri(object).await? {
                if reported.is_none() {
                    reported = Some(account);
                }
                continue;
            }
            match self.store.get_status_by_uri(object).await? {
                Some(status) => statuses.push(status),
                None => debug!(%object, "flag references unknown object"),
            }
        }
        let reported =
            reported.ok_or_else(|| InboxError::malformed("flag names no known account"))?;
        if reported.id != inbound.receiving.id {
            return Err(InboxError::forbidden(format!(
                "flagged account {} is not the receiving account",
                reported.uri
            )));
        }
        let status_ids = statuses
            .into_iter()
            .filter(|s| s.account_id == reported.id)
            .map(|s| s.id)
            .collect();

        let _guard = self.locks.lock(uri).await;
        let report = Report {
            id: new_id(),
            uri: uri.to_string(),
            account_id: inbound.requesting.id.clone(),
            target_account_id: reported.id,
            status_ids,
            comment: inbound.activity.content.clone().unwrap_or_default(),
        };
        if !inserted(self.store.put_report(&report).await, "report", uri)? {
            return Ok(());
        }
        info!(%uri, from = %inbound.requesting.uri, "report stored");
        self.dispatch(inbound.message(ApType::Create, ApType::Flag).model(Model::Report(report)));
        Ok(())
    }
}
