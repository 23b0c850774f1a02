/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::model::{Account, InteractionType, Status};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyResult {
    Forbidden,
    Permitted,
    RequiresApproval,
    /// Approval is still required on the wire, but the interacting account
    /// matched a collection (followers, mentioned) the owner allows.
    RequiresApprovalMatchedCollection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApprovalFlags {
    pub pending_approval: bool,
    pub pre_approved: bool,
}

impl PolicyResult {
    /// `None` means the interaction must be refused and nothing stored.
    pub fn approval_flags(self) -> Option<ApprovalFlags> {
        let (pending_approval, pre_approved) = match self {
            Self::Forbidden => return None,
            Self::Permitted => (false, false),
            Self::RequiresApproval => (true, false),
            Self::RequiresApprovalMatchedCollection => (true, true),
        };
        Some(ApprovalFlags {
            pending_approval,
            pre_approved,
        })
    }
}

#[async_trait]
pub trait PolicyEvaluator: Send + Sync {
    async fn evaluate(
        &self,
        interacting: &Account,
        target: &Status,
        interaction: InteractionType,
    ) -> Result<PolicyResult>;
}

/// Answers the same result for every interaction.
#[derive(Debug, Clone, Copy)]
pub struct StaticPolicy(pub PolicyResult);

#[async_trait]
impl PolicyEvaluator for StaticPolicy {
    async fn evaluate(&self, _: &Account, _: &Status, _: InteractionType) -> Result<PolicyResult> {
        Ok(self.0)
    }
}
