/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per resource URI.
///
/// Entries only live while someone holds or waits on them.
#[derive(Default)]
pub struct ResourceLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

pub struct ResourceGuard<'a> {
    table: &'a ResourceLocks,
    uri: String,
    held: Option<OwnedMutexGuard<()>>,
}

impl ResourceLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, uri: &str) -> ResourceGuard<'_> {
        let mutex = self
            .locks
            .entry(uri.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone();
        let mut guard = ResourceGuard {
            table: self,
            uri: uri.to_string(),
            held: None,
        };
        guard.held = Some(mutex.lock_owned().await);
        guard
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

impl Drop for ResourceGuard<'_> {
    fn drop(&mut self) {
        drop(self.held.take());
        // The map's own reference is the last one: nobody holds or waits.
        self.table
            .locks
            .remove_if(&self.uri, |_, m| Arc::strong_count(m) == 1);
    }
}
