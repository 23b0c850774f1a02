/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::StoreResult;
use crate::model::{
    Account, Block, Follow, FollowRequest, InteractionRequest, Move, PollVote, Report, Status,
    StatusFave,
};
use async_trait::async_trait;

/// Read/write contract the inbox needs from the datastore.
///
/// Each write is atomic on its own. Inserts of a record whose URI (or, for
/// poll votes, whose voter and poll) is already present fail with
/// `StoreError::AlreadyExists`.
#[async_trait]
pub trait Store: Send + Sync {
    async fn get_account_by_uri(&self, uri: &str) -> StoreResult<Option<Account>>;

    async fn get_status_by_uri(&self, uri: &str) -> StoreResult<Option<Status>>;
    async fn put_status(&self, status: &Status) -> StoreResult<()>;
    /// Clears `pending_approval` and records the approving activity.
    async fn update_status_approval(
        &self,
        status_id: &str,
        approved_by_uri: &str,
    ) -> StoreResult<()>;

    async fn get_follow_request_by_uri(&self, uri: &str) -> StoreResult<Option<FollowRequest>>;
    async fn put_follow_request(&self, fr: &FollowRequest) -> StoreResult<()>;
    async fn delete_follow_request_by_uri(&self, uri: &str) -> StoreResult<()>;

    async fn get_follow_by_uri(&self, uri: &str) -> StoreResult<Option<Follow>>;
    async fn put_follow(&self, follow: &Follow) -> StoreResult<()>;
    async fn delete_follow_by_uri(&self, uri: &str) -> StoreResult<()>;

    async fn get_interaction_request_by_interaction_uri(
        &self,
        uri: &str,
    ) -> StoreResult<Option<InteractionRequest>>;
    async fn put_interaction_request(&self, req: &InteractionRequest) -> StoreResult<()>;
    async fn update_interaction_request(&self, req: &InteractionRequest) -> StoreResult<()>;

    async fn get_status_fave_by_uri(&self, uri: &str) -> StoreResult<Option<StatusFave>>;
    async fn put_status_fave(&self, fave: &StatusFave) -> StoreResult<()>;
    async fn update_status_fave(&self, fave: &StatusFave) -> StoreResult<()>;
    async fn delete_status_fave_by_uri(&self, uri: &str) -> StoreResult<()>;

    async fn get_block_by_uri(&self, uri: &str) -> StoreResult<Option<Block>>;
    async fn put_block(&self, block: &Block) -> StoreResult<()>;
    async fn delete_block_by_uri(&self, uri: &str) -> StoreResult<()>;

    async fn put_report(&self, report: &Report) -> StoreResult<()>;

    async fn get_move_by_uri(&self, uri: &str) -> StoreResult<Option<Move>>;
    /// Latest Move recorded between the two accounts, under any URI.
    async fn get_move_by_origin_target(
        &self,
        origin_uri: &str,
        target_uri: &str,
    ) -> StoreResult<Option<Move>>;
    async fn put_move(&self, mv: &Move) -> StoreResult<()>;
    async fn update_move_uri(&self, id: &str, uri: &str) -> StoreResult<()>;

    async fn put_poll_vote(&self, vote: &PollVote) -> StoreResult<()>;
}
