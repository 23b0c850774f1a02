/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use fedi3_protocol::Activity;
use moka::sync::Cache;
use serde_json::Value;
use sha2::Digest as _;
use std::time::Duration;

/// Bounded set of activity ids already handled by this process.
#[derive(Clone)]
pub struct ActivityIds {
    seen: Cache<String, ()>,
}

impl ActivityIds {
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            seen: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Records `id`; returns false when it was already present.
    pub fn register(&self, id: &str) -> bool {
        self.seen.entry(id.to_string()).or_insert(()).is_fresh()
    }

    pub fn forget(&self, id: &str) {
        self.seen.invalidate(id);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains_key(id)
    }
}

/// Registration that is rolled back unless the activity was handled.
pub(crate) struct SeenGuard<'a> {
    ids: &'a ActivityIds,
    id: String,
    armed: bool,
}

impl<'a> SeenGuard<'a> {
    pub(crate) fn register(ids: &'a ActivityIds, id: String) -> Option<Self> {
        ids.register(&id).then_some(Self { ids, id, armed: true })
    }

    pub(crate) fn commit(mut self) {
        self.armed = false;
    }
}

impl Drop for SeenGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.ids.forget(&self.id);
        }
    }
}

/// The activity id, or a content hash for activities that carry none.
pub fn activity_dedup_id(activity: &Activity) -> String {
    if let Some(id) = activity.id.as_deref() {
        return id.to_string();
    }
    let bytes = serde_json::to_vec(&canonicalize_json(&activity.raw)).unwrap_or_default();
    let mut hasher = sha2::Sha256::new();
    hasher.update(&bytes);
    format!("urn:fedi3:inbox:{}", hex::encode(hasher.finalize()))
}

fn canonicalize_json(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut keys = map.keys().cloned().collect::<Vec<_>>();
            keys.sort();
            let mut out = serde_json::Map::new();
            for k in keys {
                if let Some(val) = map.get(&k) {
                    out.insert(k, canonicalize_json(val));
                }
            }
            Value::Object(out)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(canonicalize_json).collect()),
        _ => v.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn second_registration_is_a_duplicate() {
        let ids = ActivityIds::new(100, Duration::from_secs(60));
        assert!(ids.register("https://remote.example/activities/1"));
        assert!(!ids.register("https://remote.example/activities/1"));
        ids.forget("https://remote.example/activities/1");
        assert!(ids.register("https://remote.example/activities/1"));
    }

    #[test]
    fn guard_rolls_back_unless_committed() {
        let ids = ActivityIds::new(100, Duration::from_secs(60));
        {
            let g = SeenGuard::register(&ids, "a".to_string()).unwrap();
            assert!(SeenGuard::register(&ids, "a".to_string()).is_none());
            drop(g);
        }
        assert!(!ids.contains("a"));
        SeenGuard::register(&ids, "b".to_string()).unwrap().commit();
        assert!(ids.contains("b"));
    }

    #[test]
    fn id_less_activities_hash_by_content() {
        let decode = |v: Value| Activity::from_value(&v).unwrap();
        let a = decode(json!({"type": "Like", "actor": "x", "object": "y"}));
        let b = decode(json!({"object": "y", "actor": "x", "type": "Like"}));
        let c = decode(json!({"type": "Like", "actor": "x", "object": "z"}));
        assert_eq!(activity_dedup_id(&a), activity_dedup_id(&b));
        assert_ne!(activity_dedup_id(&a), activity_dedup_id(&c));
        assert!(activity_dedup_id(&a).starts_with("urn:fedi3:inbox:"));

        let with_id = Activity::from_value(&json!({"type": "Like", "id": "https://r/1"})).unwrap();
        assert_eq!(activity_dedup_id(&with_id), "https://r/1");
    }
}
