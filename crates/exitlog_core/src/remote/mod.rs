//! Remote demo integrations.
//!
//! # Responsibility
//! - Notify an external endpoint about created records (fire-and-forget).
//! - Fetch a demo user profile and recent posts for the info panel.
//!
//! # Invariants
//! - Remote failures never affect local store state.
//! - Notifications are never retried and never block the caller.

use crate::model::record::Record;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod http;

pub use http::HttpRemoteSync;

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Remote call failure.
#[derive(Debug)]
pub enum RemoteError {
    /// Transport-level failure (DNS, connect, timeout, body decode).
    Transport(reqwest::Error),
    /// Server answered with a non-success status.
    Status(u16),
    /// Remote integrations are turned off by configuration.
    Disabled,
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "remote transport error: {err}"),
            Self::Status(status) => write!(f, "remote returned HTTP status {status}"),
            Self::Disabled => write!(f, "remote integration disabled"),
        }
    }
}

impl Error for RemoteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Status(_) | Self::Disabled => None,
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

/// Demo user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteUser {
    pub name: String,
    pub email: String,
}

/// Demo post; only the title is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePost {
    pub title: String,
}

/// Data shown in the demo info panel after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoInfo {
    pub user: RemoteUser,
    pub posts: Vec<RemotePost>,
}

/// External service collaborator.
pub trait RemoteSync {
    /// Submits a newly created record. Must return without waiting for the
    /// remote side; failures are logged by the implementation.
    fn notify_created(&self, record: &Record);
    fn fetch_user(&self, id: u32) -> RemoteResult<RemoteUser>;
    fn fetch_recent_posts(&self, limit: u32) -> RemoteResult<Vec<RemotePost>>;
}

impl<R: RemoteSync + ?Sized> RemoteSync for &R {
    fn notify_created(&self, record: &Record) {
        (**self).notify_created(record)
    }

    fn fetch_user(&self, id: u32) -> RemoteResult<RemoteUser> {
        (**self).fetch_user(id)
    }

    fn fetch_recent_posts(&self, limit: u32) -> RemoteResult<Vec<RemotePost>> {
        (**self).fetch_recent_posts(limit)
    }
}

/// Remote implementation used when integrations are turned off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledRemoteSync;

impl RemoteSync for DisabledRemoteSync {
    fn notify_created(&self, _record: &Record) {}

    fn fetch_user(&self, _id: u32) -> RemoteResult<RemoteUser> {
        Err(RemoteError::Disabled)
    }

    fn fetch_recent_posts(&self, _limit: u32) -> RemoteResult<Vec<RemotePost>> {
        Err(RemoteError::Disabled)
    }
}
