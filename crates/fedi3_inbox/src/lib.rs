/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Inbound ActivityPub processing for Fedi3.
//!
//! [`InboxProcessor`] takes an activity that already passed HTTP signature
//! checks, validates who may do what, records the result through a
//! [`Store`] and hands follow-up work to a [`FediQueue`].

mod accept_reject;
mod activity_ids;
mod announce;
pub mod config;
mod create;
pub mod error;
pub mod fedi_queue;
mod flag;
mod follow;
mod interaction_request;
mod like;
mod locks;
pub mod model;
mod moves;
pub mod policy;
mod processor;
pub mod social_db;
pub mod store;
mod undo;
mod update;

pub use activity_ids::{activity_dedup_id, ActivityIds};
pub use config::InboxConfig;
pub use error::{InboxError, MultiError, StoreError, StoreResult};
pub use fedi_queue::{ChannelQueue, FediMessage, FediQueue, Model};
pub use locks::{ResourceGuard, ResourceLocks};
pub use model::{
    Account, Block, Follow, FollowRequest, InteractionRequest, InteractionType, Move, PollVote,
    Report, RequestState, Status, StatusFave,
};
pub use policy::{ApprovalFlags, PolicyEvaluator, PolicyResult, StaticPolicy};
pub use processor::InboxProcessor;
pub use social_db::SocialDb;
pub use store::Store;

pub use fedi3_protocol as protocol;
