/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::{InboxError, MultiError};
use crate::fedi_queue::Model;
use crate::model::{new_id, InteractionType, PollVote, Status};
use crate::processor::{exactly_one, inserted, InboxProcessor, Inbound};
use fedi3_protocol::{ApObject, ApType, ObjectRef};
use tracing::{debug, info};

/// Poll answers arrive as Notes carrying only a `name` (the chosen option)
/// and replying to the poll.
fn is_poll_vote(obj: &ApObject) -> bool {
    obj.kind == ApType::Note
        && obj.name.is_some()
        && obj.content.is_none()
        && obj.in_reply_to.len() == 1
}

fn poll_options(obj: &ApObject) -> Vec<String> {
    if obj.kind != ApType::Question {
        return Vec::new();
    }
    ["oneOf", "anyOf"]
        .iter()
        .filter_map(|k| obj.raw.get(*k).and_then(|v| v.as_array()))
        .flatten()
        .filter_map(|opt| opt.get("name").and_then(|v| v.as_str()))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl InboxProcessor {
    pub(crate) async fn handle_create(&self, inbound: Inbound<'_>) -> Result<(), InboxError> {
        let mut votes = Vec::new();
        let mut errs = MultiError::new();
        for obj in &inbound.activity.object {
            match obj {
                ObjectRef::Object(o) if is_poll_vote(o) => votes.push(&**o),
                ObjectRef::Object(o) if o.kind.is_statusable() => {
                    errs.record(self.create_status(inbound, o).await)
                }
                ObjectRef::Object(o) => {
                    debug!(kind = %o.kind, "ignoring Create of unsupported object")
                }
                ObjectRef::Iri(iri) => {
                    self.dispatch(inbound.message(ApType::Create, ApType::Note).iri(iri));
                }
            }
        }
        if !votes.is_empty() {
            errs.record(self.create_poll_votes(inbound, &votes).await);
        }
        errs.into_result()
    }

    async fn create_status(&self, inbound: Inbound<'_>, note: &ApObject) -> Result<(), InboxError> {
        let uri = note
            .id
            .as_deref()
            .ok_or_else(|| InboxError::malformed(format!("created {} has no id", note.kind)))?;
        let author = exactly_one(&note.attributed_to, "attributedTo")?;
        if author != inbound.requesting.uri {
            // Forwarded by someone else; the worker fetches it from its origin.
            self.dispatch(inbound.message(ApType::Create, note.kind.clone()).iri(uri));
            return Ok(());
        }

        let _guard = self.locks.lock(uri).await;
        let parent = match note.in_reply_to.as_slice() {
            [] => None,
            [parent_uri] => match self.store.get_status_by_uri(parent_uri).await? {
                Some(parent) => Some(parent),
                None => {
                    debug!(%uri, %parent_uri, "reply to unknown status");
                    return Ok(());
                }
            },
            many => {
                return Err(InboxError::malformed(format!(
                    "expected inReplyTo length 1, got {}",
                    many.len()
                )))
            }
        };
        let flags = match &parent {
            Some(parent) => Some(
                self.approval_for(inbound.requesting, parent, InteractionType::Reply)
                    .await?,
            ),
            None => None,
        };

        let status = Status {
            id: new_id(),
            uri: uri.to_string(),
            account_id: inbound.requesting.id.clone(),
            account_uri: inbound.requesting.uri.clone(),
            in_reply_to_uri: parent.as_ref().map(|p| p.uri.clone()).unwrap_or_default(),
            boost_of_uri: String::new(),
            mentions: note.mentions.clone(),
            poll_options: poll_options(note),
            pending_approval: flags.is_some_and(|f| f.pending_approval),
            approved_by_uri: String::new(),
        };
        let mut fresh = inserted(self.store.put_status(&status).await, "status", uri)?;
        if let (Some(parent), Some(flags)) = (&parent, flags) {
            if flags.pending_approval && parent.account_id == inbound.receiving.id {
                let author = &inbound.requesting.id;
                fresh = self
                    .store_impolite_request(InteractionType::Reply, uri, parent, author)
                    .await?;
            }
        }
        if !fresh {
            debug!(%uri, "status already stored");
            return Ok(());
        }
        info!(%uri, reply = parent.is_some(), pending = status.pending_approval, "status stored");
        let mut msg = inbound
            .message(ApType::Create, note.kind.clone())
            .model(Model::Status(status))
            .raw(&note.raw);
        if let Some(flags) = flags {
            msg = msg.approval(flags);
        }
        self.dispatch(msg);
        Ok(())
    }

    async fn create_poll_votes(
        &self,
        inbound: Inbound<'_>,
        votes: &[&ApObject],
    ) -> Result<(), InboxError> {
        let poll_uri = votes[0].in_reply_to[0].as_str();
        if votes.iter().any(|v| v.in_reply_to[0] != poll_uri) {
            return Err(InboxError::malformed("poll votes in one Create target different polls"));
        }
        for vote in votes {
            let author = exactly_one(&vote.attributed_to, "attributedTo")?;
            if author != inbound.requesting.uri {
                return Err(InboxError::forbidden(format!(
                    "poll vote attributed to {author}, not the requesting account"
                )));
            }
        }

        let _guard = self.locks.lock(poll_uri).await;
        let Some(poll) = self.store.get_status_by_uri(poll_uri).await? else {
            debug!(%poll_uri, "vote on unknown poll");
            return Ok(());
        };
        if poll.poll_options.is_empty() {
            return Err(InboxError::malformed(format!("{poll_uri} is not a poll")));
        }
        if poll.account_id != inbound.receiving.id {
            return Err(InboxError::forbidden(format!(
                "poll {poll_uri} is not owned by the receiving account"
            )));
        }
        let mut choices = Vec::with_capacity(votes.len());
        for vote in votes {
            let name = vote.name.as_deref().unwrap_or_default();
            let idx = poll
                .poll_options
                .iter()
                .position(|opt| opt == name)
                .ok_or_else(|| {
                    InboxError::malformed(format!("{name:?} is not an option of {poll_uri}"))
                })?;
            choices.push(idx);
        }
        choices.sort_unstable();
        choices.dedup();

        let vote = PollVote {
            id: new_id(),
            account_id: inbound.requesting.id.clone(),
            status_id: poll.id.clone(),
            choices,
        };
        if !inserted(self.store.put_poll_vote(&vote).await, "poll vote", poll_uri)? {
            return Ok(());
        }
        info!(%poll_uri, choices = ?vote.choices, "poll vote stored");
        self.dispatch(
            inbound
                .message(ApType::Create, ApType::Question)
                .model(Model::PollVote(vote)),
        );
        Ok(())
    }
}
