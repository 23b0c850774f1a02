/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::error::{StoreError, StoreResult};
use crate::model::{
    now_ms, Account, Block, Follow, FollowRequest, InteractionRequest, InteractionType, Move,
    PollVote, Report, Status, StatusFave,
};
use crate::store::Store;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// SQLite-backed [`Store`].
#[derive(Clone)]
pub struct SocialDb {
    path: PathBuf,
}

impl SocialDb {
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();
        let conn = Connection::open(&path).with_context(|| format!("open db: {}", path.display()))?;
        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            CREATE TABLE IF NOT EXISTS accounts (
              id TEXT PRIMARY KEY,
              uri TEXT NOT NULL UNIQUE,
              username TEXT NOT NULL,
              domain TEXT NOT NULL DEFAULT '',
              followers_uri TEXT NOT NULL DEFAULT '',
              moving INTEGER NOT NULL DEFAULT 0,
              moved_to_uri TEXT NOT NULL DEFAULT ''
            );

            CREATE TABLE IF NOT EXISTS statuses (
              id TEXT PRIMARY KEY,
              uri TEXT NOT NULL UNIQUE,
              account_id TEXT NOT NULL,
              account_uri TEXT NOT NULL,
              in_reply_to_uri TEXT NOT NULL DEFAULT '',
              boost_of_uri TEXT NOT NULL DEFAULT '',
              mentions_json TEXT NOT NULL DEFAULT '[]',
              poll_options_json TEXT NOT NULL DEFAULT '[]',
              pending_approval INTEGER NOT NULL DEFAULT 0,
              approved_by_uri TEXT NOT NULL DEFAULT ''
            );
            CREATE INDEX IF NOT EXISTS idx_statuses_account ON statuses(account_id);

            CREATE TABLE IF NOT EXISTS follow_requests (
              id TEXT PRIMARY KEY,
              uri TEXT NOT NULL UNIQUE,
              account_id TEXT NOT NULL,
              target_account_id TEXT NOT NULL,
              created_at_ms INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS follows (
              id TEXT PRIMARY KEY,
              uri TEXT NOT NULL UNIQUE,
              account_id TEXT NOT NULL,
              target_account_id TEXT NOT NULL,
              created_at_ms INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS interaction_requests (
              id TEXT PRIMARY KEY,
              interaction_request_uri TEXT NOT NULL DEFAULT '',
              interaction_uri TEXT NOT NULL UNIQUE,
              interaction_type TEXT NOT NULL,
              target_status_id TEXT NOT NULL,
              target_account_id TEXT NOT NULL,
              interacting_account_id TEXT NOT NULL,
              accepted_at_ms INTEGER NOT NULL DEFAULT 0,
              rejected_at_ms INTEGER NOT NULL DEFAULT 0,
              response_uri TEXT NOT NULL DEFAULT '',
              polite INTEGER NOT NULL DEFAULT 0,
              created_at_ms INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS status_faves (
              id TEXT PRIMARY KEY,
              uri TEXT NOT NULL UNIQUE,
              account_id TEXT NOT NULL,
              target_account_id TEXT NOT NULL,
              status_id TEXT NOT NULL,
              pending_approval INTEGER NOT NULL DEFAULT 0,
              pre_approved INTEGER NOT NULL DEFAULT 0,
              approved_by_uri TEXT NOT NULL DEFAULT ''
            );

            CREATE TABLE IF NOT EXISTS blocks (
              id TEXT PRIMARY KEY,
              uri TEXT NOT NULL UNIQUE,
              account_id TEXT NOT NULL,
              target_account_id TEXT NOT NULL,
              created_at_ms INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS reports (
              id TEXT PRIMARY KEY,
              uri TEXT NOT NULL UNIQUE,
              account_id TEXT NOT NULL,
              target_account_id TEXT NOT NULL,
              status_ids_json TEXT NOT NULL DEFAULT '[]',
              comment TEXT NOT NULL DEFAULT '',
              created_at_ms INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS moves (
              id TEXT PRIMARY KEY,
              uri TEXT NOT NULL UNIQUE,
              origin_uri TEXT NOT NULL,
              target_uri TEXT NOT NULL,
              created_at_ms INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_moves_origin_target ON moves(origin_uri, target_uri);

            CREATE TABLE IF NOT EXISTS poll_votes (
              id TEXT PRIMARY KEY,
              account_id TEXT NOT NULL,
              status_id TEXT NOT NULL,
              choices_json TEXT NOT NULL,
              created_at_ms INTEGER NOT NULL,
              UNIQUE(account_id, status_id)
            );
            "#,
        )?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Accounts are owned by the actor resolver; this exists for seeding.
    pub fn upsert_account(&self, account: &Account) -> Result<()> {
        let conn = Connection::open(&self.path)?;
        conn.execute(
            r#"
            INSERT INTO accounts(id, uri, username, domain, followers_uri, moving, moved_to_uri)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(uri) DO UPDATE SET
              username=excluded.username,
              domain=excluded.domain,
              followers_uri=excluded.followers_uri,
              moving=excluded.moving,
              moved_to_uri=excluded.moved_to_uri
            "#,
            params![
                account.id,
                account.uri,
                account.username,
                account.domain,
                account.followers_uri,
                account.moving,
                account.moved_to_uri
            ],
        )?;
        Ok(())
    }

    pub fn get_report_by_uri(&self, uri: &str) -> Result<Option<Report>> {
        let conn = Connection::open(&self.path)?;
        let row = conn
            .query_row(
                r#"
                SELECT id, uri, account_id, target_account_id, status_ids_json, comment
                FROM reports WHERE uri=?1
                "#,
                params![uri],
                |r| {
                    Ok((
                        r.get::<_, String>(0)?,
                        r.get::<_, String>(1)?,
                        r.get::<_, String>(2)?,
                        r.get::<_, String>(3)?,
                        r.get::<_, String>(4)?,
                        r.get::<_, String>(5)?,
                    ))
                },
            )
            .optional()?;
        Ok(row.map(|(id, uri, account_id, target_account_id, status_ids, comment)| Report {
            id,
            uri,
            account_id,
            target_account_id,
            status_ids: serde_json::from_str(&status_ids).unwrap_or_default(),
            comment,
        }))
    }

    pub fn get_poll_vote(&self, account_id: &str, status_id: &str) -> Result<Option<PollVote>> {
        let conn = Connection::open(&self.path)?;
        let row = conn
            .query_row(
                "SELECT id, choices_json FROM poll_votes WHERE account_id=?1 AND status_id=?2",
                params![account_id, status_id],
                |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)),
            )
            .optional()?;
        Ok(row.map(|(id, choices)| PollVote {
            id,
            account_id: account_id.to_string(),
            status_id: status_id.to_string(),
            choices: serde_json::from_str(&choices).unwrap_or_default(),
        }))
    }

    /// Row counts of every engine-written table, in a fixed order.
    pub fn table_counts(&self) -> Result<Vec<(&'static str, i64)>> {
        const TABLES: [&str; 9] = [
            "statuses",
            "follow_requests",
            "follows",
            "interaction_requests",
            "status_faves",
            "blocks",
            "reports",
            "moves",
            "poll_votes",
        ];
        let conn = Connection::open(&self.path)?;
        let mut out = Vec::with_capacity(TABLES.len());
        for table in TABLES {
            let sql = format!("SELECT COUNT(*) FROM {table}");
            let n: i64 = conn.query_row(&sql, [], |r| r.get(0))?;
            out.push((table, n));
        }
        Ok(out)
    }

    async fn run<T, F>(&self, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || -> StoreResult<T> {
            let conn = Connection::open(&path)
                .with_context(|| format!("open db: {}", path.display()))?;
            conn.busy_timeout(Duration::from_secs(5))
                .context("set busy timeout")?;
            f(&conn).map_err(db_err)
        })
        .await
        .context("store task failed")?
    }
}

fn db_err(e: rusqlite::Error) -> StoreError {
    match &e {
        rusqlite::Error::SqliteFailure(f, _)
            if f.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            StoreError::AlreadyExists
        }
        _ => StoreError::Other(e.into()),
    }
}

fn encode_list<T: serde::Serialize>(v: &[T]) -> StoreResult<String> {
    Ok(serde_json::to_string(v).context("encode list column")?)
}

fn decode_list<T: serde::de::DeserializeOwned>(s: &str) -> Vec<T> {
    serde_json::from_str(s).unwrap_or_default()
}

const STATUS_COLUMNS: &str = "id, uri, account_id, account_uri, in_reply_to_uri, boost_of_uri, \
    mentions_json, poll_options_json, pending_approval, approved_by_uri";

fn status_from_row(r: &Row<'_>) -> rusqlite::Result<Status> {
    let mentions: String = r.get(6)?;
    let poll_options: String = r.get(7)?;
    Ok(Status {
        id: r.get(0)?,
        uri: r.get(1)?,
        account_id: r.get(2)?,
        account_uri: r.get(3)?,
        in_reply_to_uri: r.get(4)?,
        boost_of_uri: r.get(5)?,
        mentions: decode_list(&mentions),
        poll_options: decode_list(&poll_options),
        pending_approval: r.get(8)?,
        approved_by_uri: r.get(9)?,
    })
}

const IR_COLUMNS: &str = "id, interaction_request_uri, interaction_uri, interaction_type, \
    target_status_id, target_account_id, interacting_account_id, accepted_at_ms, rejected_at_ms, \
    response_uri, polite, created_at_ms";

fn interaction_request_from_row(r: &Row<'_>) -> rusqlite::Result<InteractionRequest> {
    let kind: String = r.get(3)?;
    let interaction_type = InteractionType::parse(&kind).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("unknown interaction type: {kind}").into(),
        )
    })?;
    Ok(InteractionRequest {
        id: r.get(0)?,
        interaction_request_uri: r.get(1)?,
        interaction_uri: r.get(2)?,
        interaction_type,
        target_status_id: r.get(4)?,
        target_account_id: r.get(5)?,
        interacting_account_id: r.get(6)?,
        accepted_at_ms: r.get(7)?,
        rejected_at_ms: r.get(8)?,
        response_uri: r.get(9)?,
        polite: r.get(10)?,
        created_at_ms: r.get(11)?,
    })
}

fn fave_from_row(r: &Row<'_>) -> rusqlite::Result<StatusFave> {
    Ok(StatusFave {
        id: r.get(0)?,
        uri: r.get(1)?,
        account_id: r.get(2)?,
        target_account_id: r.get(3)?,
        status_id: r.get(4)?,
        pending_approval: r.get(5)?,
        pre_approved: r.get(6)?,
        approved_by_uri: r.get(7)?,
    })
}

const MOVE_COLUMNS: &str = "id, uri, origin_uri, target_uri, created_at_ms";

fn move_from_row(r: &Row<'_>) -> rusqlite::Result<Move> {
    Ok(Move {
        id: r.get(0)?,
        uri: r.get(1)?,
        origin_uri: r.get(2)?,
        target_uri: r.get(3)?,
        created_at_ms: r.get(4)?,
    })
}

/// (id, uri, account_id, target_account_id) rows shared by follows,
/// follow requests and blocks.
fn edge_from_row(r: &Row<'_>) -> rusqlite::Result<(String, String, String, String)> {
    Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?))
}

fn get_edge(
    conn: &Connection,
    table: &str,
    uri: &str,
) -> rusqlite::Result<Option<(String, String, String, String)>> {
    conn.query_row(
        &format!("SELECT id, uri, account_id, target_account_id FROM {table} WHERE uri=?1"),
        params![uri],
        edge_from_row,
    )
    .optional()
}

fn put_edge(
    conn: &Connection,
    table: &str,
    id: &str,
    uri: &str,
    account_id: &str,
    target_account_id: &str,
) -> rusqlite::Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO {table}(id, uri, account_id, target_account_id, created_at_ms) \
             VALUES (?1, ?2, ?3, ?4, ?5)"
        ),
        params![id, uri, account_id, target_account_id, now_ms()],
    )?;
    Ok(())
}

fn delete_edge(conn: &Connection, table: &str, uri: &str) -> rusqlite::Result<()> {
    conn.execute(&format!("DELETE FROM {table} WHERE uri=?1"), params![uri])?;
    Ok(())
}

#[async_trait]
impl Store for SocialDb {
    async fn get_account_by_uri(&self, uri: &str) -> StoreResult<Option<Account>> {
        let uri = uri.to_string();
        self.run(move |conn| {
            conn.query_row(
                r#"
                SELECT id, uri, username, domain, followers_uri, moving, moved_to_uri
                FROM accounts WHERE uri=?1
                "#,
                params![uri],
                |r| {
                    Ok(Account {
                        id: r.get(0)?,
                        uri: r.get(1)?,
                        username: r.get(2)?,
                        domain: r.get(3)?,
                        followers_uri: r.get(4)?,
                        moving: r.get(5)?,
                        moved_to_uri: r.get(6)?,
                    })
                },
            )
            .optional()
        })
        .await
    }

    async fn get_status_by_uri(&self, uri: &str) -> StoreResult<Option<Status>> {
        let uri = uri.to_string();
        self.run(move |conn| {
            conn.query_row(
                &format!("SELECT {STATUS_COLUMNS} FROM statuses WHERE uri=?1"),
                params![uri],
                status_from_row,
            )
            .optional()
        })
        .await
    }

    async fn put_status(&self, status: &Status) -> StoreResult<()> {
        let mentions = encode_list(&status.mentions)?;
        let poll_options = encode_list(&status.poll_options)?;
        let s = status.clone();
        self.run(move |conn| {
            conn.execute(
                &format!(
                    "INSERT INTO statuses({STATUS_COLUMNS}) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
                ),
                params![
                    s.id,
                    s.uri,
                    s.account_id,
                    s.account_uri,
                    s.in_reply_to_uri,
                    s.boost_of_uri,
                    mentions,
                    poll_options,
                    s.pending_approval,
                    s.approved_by_uri
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn update_status_approval(
        &self,
        status_id: &str,
        approved_by_uri: &str,
    ) -> StoreResult<()> {
        let status_id = status_id.to_string();
        let approved_by_uri = approved_by_uri.to_string();
        self.run(move |conn| {
            conn.execute(
                "UPDATE statuses SET pending_approval=0, approved_by_uri=?2 WHERE id=?1",
                params![status_id, approved_by_uri],
            )?;
            Ok(())
        })
        .await
    }

    async fn get_follow_request_by_uri(&self, uri: &str) -> StoreResult<Option<FollowRequest>> {
        let uri = uri.to_string();
        let row = self.run(move |conn| get_edge(conn, "follow_requests", &uri)).await?;
        Ok(row.map(|(id, uri, account_id, target_account_id)| FollowRequest {
            id,
            uri,
            account_id,
            target_account_id,
        }))
    }

    async fn put_follow_request(&self, fr: &FollowRequest) -> StoreResult<()> {
        let fr = fr.clone();
        self.run(move |conn| {
            let (id, uri) = (&fr.id, &fr.uri);
            put_edge(conn, "follow_requests", id, uri, &fr.account_id, &fr.target_account_id)
        })
        .await
    }

    async fn delete_follow_request_by_uri(&self, uri: &str) -> StoreResult<()> {
        let uri = uri.to_string();
        self.run(move |conn| delete_edge(conn, "follow_requests", &uri)).await
    }

    async fn get_follow_by_uri(&self, uri: &str) -> StoreResult<Option<Follow>> {
        let uri = uri.to_string();
        let row = self.run(move |conn| get_edge(conn, "follows", &uri)).await?;
        Ok(row.map(|(id, uri, account_id, target_account_id)| Follow {
            id,
            uri,
            account_id,
            target_account_id,
        }))
    }

    async fn put_follow(&self, follow: &Follow) -> StoreResult<()> {
        let f = follow.clone();
        self.run(move |conn| {
            put_edge(conn, "follows", &f.id, &f.uri, &f.account_id, &f.target_account_id)
        })
        .await
    }

    async fn delete_follow_by_uri(&self, uri: &str) -> StoreResult<()> {
        let uri = uri.to_string();
        self.run(move |conn| delete_edge(conn, "follows", &uri)).await
    }

    async fn get_interaction_request_by_interaction_uri(
        &self,
        uri: &str,
    ) -> StoreResult<Option<InteractionRequest>> {
        let uri = uri.to_string();
        self.run(move |conn| {
            conn.query_row(
                &format!("SELECT {IR_COLUMNS} FROM interaction_requests WHERE interaction_uri=?1"),
                params![uri],
                interaction_request_from_row,
            )
            .optional()
        })
        .await
    }

    async fn put_interaction_request(&self, req: &InteractionRequest) -> StoreResult<()> {
        let q = req.clone();
        self.run(move |conn| {
            conn.execute(
                &format!(
                    "INSERT INTO interaction_requests({IR_COLUMNS}) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
                ),
                params![
                    q.id,
                    q.interaction_request_uri,
                    q.interaction_uri,
                    q.interaction_type.as_str(),
                    q.target_status_id,
                    q.target_account_id,
                    q.interacting_account_id,
                    q.accepted_at_ms,
                    q.rejected_at_ms,
                    q.response_uri,
                    q.polite,
                    q.created_at_ms
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn update_interaction_request(&self, req: &InteractionRequest) -> StoreResult<()> {
        let q = req.clone();
        self.run(move |conn| {
            // Both timestamps go in one statement so a reject-after-accept
            // never leaves them both set.
            conn.execute(
                r#"
                UPDATE interaction_requests SET
                  interaction_request_uri=?2,
                  accepted_at_ms=?3,
                  rejected_at_ms=?4,
                  response_uri=?5,
                  polite=?6
                WHERE id=?1
                "#,
                params![
                    q.id,
                    q.interaction_request_uri,
                    q.accepted_at_ms,
                    q.rejected_at_ms,
                    q.response_uri,
                    q.polite
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn get_status_fave_by_uri(&self, uri: &str) -> StoreResult<Option<StatusFave>> {
        let uri = uri.to_string();
        self.run(move |conn| {
            conn.query_row(
                r#"
                SELECT id, uri, account_id, target_account_id, status_id,
                       pending_approval, pre_approved, approved_by_uri
                FROM status_faves WHERE uri=?1
                "#,
                params![uri],
                fave_from_row,
            )
            .optional()
        })
        .await
    }

    async fn put_status_fave(&self, fave: &StatusFave) -> StoreResult<()> {
        let f = fave.clone();
        self.run(move |conn| {
            conn.execute(
                r#"
                INSERT INTO status_faves(id, uri, account_id, target_account_id, status_id,
                                         pending_approval, pre_approved, approved_by_uri)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
                params![
                    f.id,
                    f.uri,
                    f.account_id,
                    f.target_account_id,
                    f.status_id,
                    f.pending_approval,
                    f.pre_approved,
                    f.approved_by_uri
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn update_status_fave(&self, fave: &StatusFave) -> StoreResult<()> {
        let f = fave.clone();
        self.run(move |conn| {
            conn.execute(
                r#"
                UPDATE status_faves SET pending_approval=?2, pre_approved=?3, approved_by_uri=?4
                WHERE id=?1
                "#,
                params![f.id, f.pending_approval, f.pre_approved, f.approved_by_uri],
            )?;
            Ok(())
        })
        .await
    }

    async fn delete_status_fave_by_uri(&self, uri: &str) -> StoreResult<()> {
        let uri = uri.to_string();
        self.run(move |conn| {
            conn.execute("DELETE FROM status_faves WHERE uri=?1", params![uri])?;
            Ok(())
        })
        .await
    }

    async fn get_block_by_uri(&self, uri: &str) -> StoreResult<Option<Block>> {
        let uri = uri.to_string();
        let row = self.run(move |conn| get_edge(conn, "blocks", &uri)).await?;
        Ok(row.map(|(id, uri, account_id, target_account_id)| Block {
            id,
            uri,
            account_id,
            target_account_id,
        }))
    }

    async fn put_block(&self, block: &Block) -> StoreResult<()> {
        let b = block.clone();
        self.run(move |conn| {
            put_edge(conn, "blocks", &b.id, &b.uri, &b.account_id, &b.target_account_id)
        })
        .await
    }

    async fn delete_block_by_uri(&self, uri: &str) -> StoreResult<()> {
        let uri = uri.to_string();
        self.run(move |conn| delete_edge(conn, "blocks", &uri)).await
    }

    async fn put_report(&self, report: &Report) -> StoreResult<()> {
        let status_ids = encode_list(&report.status_ids)?;
        let r = report.clone();
        self.run(move |conn| {
            conn.execute(
                r#"
                INSERT INTO reports(id, uri, account_id, target_account_id, status_ids_json,
                                    comment, created_at_ms)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
                params![
                    r.id,
                    r.uri,
                    r.account_id,
                    r.target_account_id,
                    status_ids,
                    r.comment,
                    now_ms()
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn get_move_by_uri(&self, uri: &str) -> StoreResult<Option<Move>> {
        let uri = uri.to_string();
        self.run(move |conn| {
            conn.query_row(
                &format!("SELECT {MOVE_COLUMNS} FROM moves WHERE uri=?1"),
                params![uri],
                move_from_row,
            )
            .optional()
        })
        .await
    }

    async fn get_move_by_origin_target(
        &self,
        origin_uri: &str,
        target_uri: &str,
    ) -> StoreResult<Option<Move>> {
        let origin = origin_uri.to_string();
        let target = target_uri.to_string();
        self.run(move |conn| {
            conn.query_row(
                &format!(
                    "SELECT {MOVE_COLUMNS} FROM moves WHERE origin_uri=?1 AND target_uri=?2 \
                     ORDER BY created_at_ms DESC LIMIT 1"
                ),
                params![origin, target],
                move_from_row,
            )
            .optional()
        })
        .await
    }

    async fn put_move(&self, mv: &Move) -> StoreResult<()> {
        let m = mv.clone();
        self.run(move |conn| {
            conn.execute(
                &format!("INSERT INTO moves({MOVE_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
                params![m.id, m.uri, m.origin_uri, m.target_uri, m.created_at_ms],
            )?;
            Ok(())
        })
        .await
    }

    async fn update_move_uri(&self, id: &str, uri: &str) -> StoreResult<()> {
        let id = id.to_string();
        let uri = uri.to_string();
        self.run(move |conn| {
            conn.execute("UPDATE moves SET uri=?2 WHERE id=?1", params![id, uri])?;
            Ok(())
        })
        .await
    }

    async fn put_poll_vote(&self, vote: &PollVote) -> StoreResult<()> {
        let choices = encode_list(&vote.choices)?;
        let v = vote.clone();
        self.run(move |conn| {
            conn.execute(
                r#"
                INSERT INTO poll_votes(id, account_id, status_id, choices_json, created_at_ms)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![v.id, v.account_id, v.status_id, choices, now_ms()],
            )?;
            Ok(())
        })
        .await
    }
}
