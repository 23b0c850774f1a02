/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Decoded ActivityPub vocabulary shared by the Fedi3 crates.
//!
//! Only the fields the inbox engine inspects are lifted out of the JSON; the
//! raw value is kept alongside so workers can still see everything else.

mod activity;
pub mod uris;

pub use activity::{Activity, ApObject, ApType, DecodeError, ObjectRef};
