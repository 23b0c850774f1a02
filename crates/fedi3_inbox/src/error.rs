/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use http::StatusCode;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record already exists")]
    AlreadyExists,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure while processing one inbound activity.
///
/// Each variant maps onto the status code the inbox endpoint answers with;
/// only `Store` and `Policy` are worth a redelivery.
#[derive(Debug, Error)]
pub enum InboxError {
    #[error("malformed activity: {0}")]
    Malformed(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("unprocessable activity: {0}")]
    Unprocessable(String),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("policy evaluation failed: {0:#}")]
    Policy(anyhow::Error),
    #[error(transparent)]
    Multiple(MultiError),
}

impl InboxError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self::Unprocessable(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Malformed(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Store(_) | Self::Policy(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Multiple(m) => m.status(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Store(_) | Self::Policy(_) => true,
            Self::Multiple(m) => m.errors.iter().any(InboxError::is_retryable),
            _ => false,
        }
    }

    fn severity(&self) -> u8 {
        match self {
            Self::Malformed(_) => 1,
            Self::Forbidden(_) => 2,
            Self::Unprocessable(_) => 3,
            Self::Store(_) | Self::Policy(_) => 4,
            Self::Multiple(m) => m.errors.iter().map(InboxError::severity).max().unwrap_or(0),
        }
    }
}

/// Errors collected while walking the objects of a composite activity.
#[derive(Debug, Default)]
pub struct MultiError {
    errors: Vec<InboxError>,
}

impl MultiError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, res: Result<(), InboxError>) {
        if let Err(e) = res {
            self.errors.push(e);
        }
    }

    pub fn errors(&self) -> &[InboxError] {
        &self.errors
    }

    pub fn status(&self) -> StatusCode {
        self.errors
            .iter()
            .max_by_key(|e| e.severity())
            .map(InboxError::status)
            .unwrap_or(StatusCode::OK)
    }

    pub fn into_result(mut self) -> Result<(), InboxError> {
        match self.errors.len() {
            0 => Ok(()),
            1 => Err(self.errors.remove(0)),
            _ => Err(InboxError::Multiple(self)),
        }
    }
}

impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} errors: ", self.errors.len())?;
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for MultiError {}
