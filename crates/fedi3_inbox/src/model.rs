/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};

pub(crate) fn now_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

pub fn new_id() -> String {
    let mut b = [0u8; 16];
    OsRng.fill_bytes(&mut b);
    hex::encode(b)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub uri: String,
    pub username: String,
    /// Empty for local accounts.
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub followers_uri: String,
    #[serde(default)]
    pub moving: bool,
    #[serde(default)]
    pub moved_to_uri: String,
}

impl Account {
    pub fn is_local(&self) -> bool {
        self.domain.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub id: String,
    pub uri: String,
    pub account_id: String,
    pub account_uri: String,
    #[serde(default)]
    pub in_reply_to_uri: String,
    #[serde(default)]
    pub boost_of_uri: String,
    #[serde(default)]
    pub mentions: Vec<String>,
    #[serde(default)]
    pub poll_options: Vec<String>,
    #[serde(default)]
    pub pending_approval: bool,
    #[serde(default)]
    pub approved_by_uri: String,
}

impl Status {
    pub fn is_boost(&self) -> bool {
        !self.boost_of_uri.is_empty()
    }

    pub fn is_reply(&self) -> bool {
        !self.in_reply_to_uri.is_empty()
    }

    pub fn mentions_account(&self, account_uri: &str) -> bool {
        self.mentions.iter().any(|m| m == account_uri)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowRequest {
    pub id: String,
    pub uri: String,
    pub account_id: String,
    pub target_account_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Follow {
    pub id: String,
    pub uri: String,
    pub account_id: String,
    pub target_account_id: String,
}

impl From<&FollowRequest> for Follow {
    fn from(fr: &FollowRequest) -> Self {
        Self {
            id: fr.id.clone(),
            uri: fr.uri.clone(),
            account_id: fr.account_id.clone(),
            target_account_id: fr.target_account_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub id: String,
    pub uri: String,
    pub account_id: String,
    pub target_account_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub id: String,
    pub uri: String,
    pub account_id: String,
    pub target_account_id: String,
    pub status_ids: Vec<String>,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusFave {
    pub id: String,
    pub uri: String,
    pub account_id: String,
    pub target_account_id: String,
    pub status_id: String,
    pub pending_approval: bool,
    pub pre_approved: bool,
    pub approved_by_uri: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    Like,
    Reply,
    Announce,
}

impl InteractionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Reply => "reply",
            Self::Announce => "announce",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "like" => Some(Self::Like),
            "reply" => Some(Self::Reply),
            "announce" => Some(Self::Announce),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionRequest {
    pub id: String,
    /// Empty unless the interaction arrived as a *Request activity.
    pub interaction_request_uri: String,
    pub interaction_uri: String,
    pub interaction_type: InteractionType,
    pub target_status_id: String,
    pub target_account_id: String,
    pub interacting_account_id: String,
    pub accepted_at_ms: i64,
    pub rejected_at_ms: i64,
    /// URI of the Accept or Reject that last decided this request.
    pub response_uri: String,
    pub polite: bool,
    pub created_at_ms: i64,
}

impl InteractionRequest {
    pub fn pending(
        interaction_type: InteractionType,
        interaction_uri: &str,
        target: &Status,
        interacting_account_id: &str,
    ) -> Self {
        Self::new_pending(
            interaction_type,
            interaction_uri,
            &target.id,
            &target.account_id,
            interacting_account_id,
        )
    }

    pub fn for_fave(fave: &StatusFave) -> Self {
        Self::new_pending(
            InteractionType::Like,
            &fave.uri,
            &fave.status_id,
            &fave.target_account_id,
            &fave.account_id,
        )
    }

    fn new_pending(
        interaction_type: InteractionType,
        interaction_uri: &str,
        target_status_id: &str,
        target_account_id: &str,
        interacting_account_id: &str,
    ) -> Self {
        Self {
            id: new_id(),
            interaction_request_uri: String::new(),
            interaction_uri: interaction_uri.to_string(),
            interaction_type,
            target_status_id: target_status_id.to_string(),
            target_account_id: target_account_id.to_string(),
            interacting_account_id: interacting_account_id.to_string(),
            accepted_at_ms: 0,
            rejected_at_ms: 0,
            response_uri: String::new(),
            polite: false,
            created_at_ms: now_ms(),
        }
    }

    pub fn polite(mut self, request_uri: &str) -> Self {
        self.interaction_request_uri = request_uri.to_string();
        self.polite = true;
        self
    }

    pub fn state(&self) -> RequestState {
        if self.rejected_at_ms != 0 {
            RequestState::Rejected
        } else if self.accepted_at_ms != 0 {
            RequestState::Accepted
        } else {
            RequestState::Pending
        }
    }

    /// Applies an Accept. Returns false when the request was already
    /// accepted, in which case only `response_uri` changes.
    pub fn accept(&mut self, response_uri: &str, at_ms: i64) -> bool {
        self.response_uri = response_uri.to_string();
        if self.state() == RequestState::Accepted {
            return false;
        }
        self.accepted_at_ms = at_ms.max(1);
        self.rejected_at_ms = 0;
        true
    }

    /// Applies a Reject. Returns false when the request was already
    /// rejected, in which case only `response_uri` changes.
    pub fn reject(&mut self, response_uri: &str, at_ms: i64) -> bool {
        self.response_uri = response_uri.to_string();
        if self.state() == RequestState::Rejected {
            return false;
        }
        self.rejected_at_ms = at_ms.max(1);
        self.accepted_at_ms = 0;
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Move {
    pub id: String,
    pub uri: String,
    pub origin_uri: String,
    pub target_uri: String,
    pub created_at_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollVote {
    pub id: String,
    pub account_id: String,
    pub status_id: String,
    pub choices: Vec<usize>,
}
