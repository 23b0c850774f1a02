/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Host helpers and the local URI layout (`/users/{username}/{kind}/{id}`).

use http::Uri;

pub fn host_of(uri: &str) -> Option<String> {
    let uri: Uri = uri.trim().parse().ok()?;
    uri.host().map(|h| h.to_ascii_lowercase())
}

/// True when `host` equals `parent` or is one of its subdomains.
pub fn is_same_or_subdomain(host: &str, parent: &str) -> bool {
    let host = host.trim().trim_end_matches('.').to_ascii_lowercase();
    let parent = parent.trim().trim_end_matches('.').to_ascii_lowercase();
    if host.is_empty() || parent.is_empty() {
        return false;
    }
    host == parent || host.ends_with(&format!(".{parent}"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalPath {
    Follow,
    Like,
    Status,
}

impl LocalPath {
    fn segment(self) -> &'static str {
        match self {
            Self::Follow => "follow",
            Self::Like => "liked",
            Self::Status => "statuses",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalUri {
    pub kind: LocalPath,
    pub username: String,
    pub id: String,
}

/// Matches `/users/{username}/{follow|liked|statuses}/{id}` and nothing else.
pub fn parse_local_path(uri: &str) -> Option<LocalUri> {
    let uri: Uri = uri.trim().parse().ok()?;
    let segs: Vec<&str> = uri.path().trim_matches('/').split('/').collect();
    let [users, username, kind, id] = segs.as_slice() else {
        return None;
    };
    if *users != "users" || username.is_empty() || id.is_empty() {
        return None;
    }
    let kind = match *kind {
        "follow" => LocalPath::Follow,
        "liked" => LocalPath::Like,
        "statuses" => LocalPath::Status,
        _ => return None,
    };
    Some(LocalUri {
        kind,
        username: username.to_string(),
        id: id.to_string(),
    })
}

pub fn user_uri(base: &str, username: &str) -> String {
    format!("{}/users/{username}", base.trim_end_matches('/'))
}

pub fn local_uri(base: &str, username: &str, kind: LocalPath, id: &str) -> String {
    format!("{}/{}/{id}", user_uri(base, username), kind.segment())
}
