/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use anyhow::Context;
use fedi3_inbox::protocol::uris::user_uri;
use fedi3_inbox::protocol::Activity;
use fedi3_inbox::{
    Account, ChannelQueue, InboxConfig, InboxProcessor, SocialDb, StaticPolicy, Store,
};
use std::env;
use std::sync::Arc;

const USAGE: &str = "usage: inbox_replay <config.json> <activity.json> <requesting_uri> \
                     <receiving_uri|local_username> [accounts.json]";

/// Bare usernames name local accounts on the configured host.
fn account_uri(cfg: &InboxConfig, arg: &str) -> String {
    if arg.contains("://") {
        arg.to_string()
    } else {
        user_uri(&cfg.public_base_url(), arg.trim_start_matches('@'))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 4 {
        anyhow::bail!(USAGE);
    }

    let cfg = InboxConfig::load(&args[0])?;
    cfg.validate()?;
    let db_path = cfg.db_path()?;
    if let Some(dir) = db_path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create data dir: {}", dir.display()))?;
    }
    let db = SocialDb::open(&db_path)?;

    if let Some(path) = args.get(4) {
        let bytes = std::fs::read(path).with_context(|| format!("read accounts: {path}"))?;
        let accounts: Vec<Account> = serde_json::from_slice(&bytes).context("parse accounts")?;
        for a in &accounts {
            db.upsert_account(a)?;
        }
        tracing::info!(count = accounts.len(), "accounts seeded");
    }

    let bytes = std::fs::read(&args[1]).with_context(|| format!("read activity: {}", args[1]))?;
    let activity = Activity::from_slice(&bytes).context("decode activity")?;
    let requesting = db
        .get_account_by_uri(&args[2])
        .await?
        .with_context(|| format!("unknown requesting account: {}", args[2]))?;
    let receiving_uri = account_uri(&cfg, &args[3]);
    let receiving = db
        .get_account_by_uri(&receiving_uri)
        .await?
        .with_context(|| format!("unknown receiving account: {receiving_uri}"))?;
    tracing::info!(
        domain = cfg.account_domain(),
        receiving = %receiving.uri,
        kind = %activity.kind,
        "replaying activity"
    );

    let (queue, mut rx) = ChannelQueue::new();
    let processor = InboxProcessor::new(
        Arc::new(db),
        Arc::new(StaticPolicy(cfg.default_policy)),
        Arc::new(queue),
        &cfg,
    );

    if let Err(e) = processor.process(&activity, &requesting, &receiving).await {
        println!("status={} error={e}", e.status().as_u16());
    } else {
        println!("status=202");
    }
    while let Ok(msg) = rx.try_recv() {
        println!("{}", serde_json::to_string_pretty(&msg)?);
    }
    Ok(())
}
