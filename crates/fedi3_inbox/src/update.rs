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
    /// Profile and status edits. Nothing is written here: the worker
    /// applies the new representation carried in `raw`.
    pub(crate) async fn handle_update(&self, inbound: Inbound<'_>) -> Result<(), InboxError> {
        if inbound.requesting.is_local() {
            debug!(account = %inbound.requesting.uri, "ignoring Update from local account");
            return Ok(());
        }
        inbound.require_actor_is_requester()?;
        let mut errs = MultiError::new();
        for obj in &inbound.activity.object {
            match obj {
                ObjectRef::Object(o) if o.kind.is_actor() => {
                    errs.record(self.update_profile(inbound, o));
                }
                ObjectRef::Object(o) if o.kind.is_statusable() => {
                    errs.record(self.update_status(inbound, o).await);
                }
                ObjectRef::Object(o) => {
                    debug!(kind = %o.kind, "ignoring Update of unsupported object")
                }
                ObjectRef::Iri(iri) => debug!(%iri, "ignoring Update of bare IRI"),
            }
        }
        errs.into_result()
    }

    fn update_profile(&self, inbound: Inbound<'_>, actor: &ApObject) -> Result<(), InboxError> {
        let uri = actor.id.as_deref().unwrap_or_default();
        if uri != inbound.requesting.uri {
            return Err(InboxError::forbidden(format!(
                "update for account {uri:?} was requested by {}",
                inbound.requesting.uri
            )));
        }
        info!(%uri, "profile update");
        self.dispatch(inbound.message(ApType::Update, ApType::Profile).raw(&actor.raw));
        Ok(())
    }

    async fn update_status(&self, inbound: Inbound<'_>, note: &ApObject) -> Result<(), InboxError> {
        let uri = note
            .id
            .as_deref()
            .ok_or_else(|| InboxError::malformed(format!("updated {} has no id", note.kind)))?;
        if !note.attributed_to.iter().any(|a| *a == inbound.requesting.uri) {
            // Forwarded edit; the worker fetches the current version from its origin.
            self.dispatch(inbound.message(ApType::Update, ApType::Note).iri(uri));
            return Ok(());
        }

        let Some(status) = self.store.get_status_by_uri(uri).await? else {
            debug!(%uri, "update of unknown status");
            return Ok(());
        };
        if status.account_id != inbound.requesting.id {
            return Err(InboxError::forbidden(format!(
                "status {uri} is not owned by the requesting account"
            )));
        }
        info!(%uri, "status update");
        self.dispatch(
            inbound
                .message(ApType::Update, note.kind.clone())
                .model(Model::Status(status))
                .raw(&note.raw),
        );
        Ok(())
    }
}
