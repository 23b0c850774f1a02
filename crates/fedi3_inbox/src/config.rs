/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::policy::PolicyResult;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct InboxConfig {
    /// Public host of this instance, e.g. `social.example`.
    #[serde(default)]
    pub host: String,
    /// Domain used in account handles when it differs from `host`.
    #[serde(default)]
    pub account_domain: Option<String>,
    #[serde(default = "default_activity_cache_capacity")]
    pub activity_cache_capacity: u64,
    #[serde(default = "default_activity_cache_ttl_secs")]
    pub activity_cache_ttl_secs: u64,
    #[serde(default)]
    pub data_dir: Option<String>,
    /// Answer given by the built-in static policy (dev tooling only).
    #[serde(default = "default_policy")]
    pub default_policy: PolicyResult,
}

fn default_activity_cache_capacity() -> u64 {
    100_000
}

fn default_activity_cache_ttl_secs() -> u64 {
    3600
}

fn default_policy() -> PolicyResult {
    PolicyResult::Permitted
}

impl Default for InboxConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            account_domain: None,
            activity_cache_capacity: default_activity_cache_capacity(),
            activity_cache_ttl_secs: default_activity_cache_ttl_secs(),
            data_dir: None,
            default_policy: default_policy(),
        }
    }
}

impl InboxConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read config: {}", path.display()))?;
        let cfg: Self = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse config: {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            anyhow::bail!("config: host is required");
        }
        if self.host.contains('/') {
            anyhow::bail!("config: host must be a bare hostname, got {}", self.host);
        }
        if self.activity_cache_capacity == 0 {
            anyhow::bail!("config: activity_cache_capacity must be > 0");
        }
        if self.activity_cache_ttl_secs == 0 {
            anyhow::bail!("config: activity_cache_ttl_secs must be > 0");
        }
        Ok(())
    }

    pub fn account_domain(&self) -> &str {
        self.account_domain
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(self.host.trim())
    }

    pub fn public_base_url(&self) -> String {
        format!("https://{}", self.host.trim())
    }

    pub fn activity_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.activity_cache_ttl_secs)
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        match self.data_dir.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => default_data_dir(),
        }
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("inbox.db"))
    }
}

pub fn default_data_dir() -> Result<PathBuf> {
    if let Ok(v) = std::env::var("FEDI3_DATA_DIR") {
        return Ok(PathBuf::from(v));
    }
    let proj = ProjectDirs::from("net", "fedi3", "Fedi3")
        .context("unable to determine platform data dir")?;
    Ok(proj.data_local_dir().to_path_buf())
}
