//! HTTP implementation of [`RemoteSync`] over a JSON placeholder-style API.
//!
//! # Invariants
//! - Notifications run on background threads; `notify_created` never waits.
//! - Pending notifications are joined only by an explicit [`HttpRemoteSync::flush`].
//! - Non-2xx statuses surface as [`RemoteError::Status`].

use super::{RemoteError, RemotePost, RemoteResult, RemoteSync, RemoteUser};
use crate::model::record::Record;
use log::{info, warn};
use reqwest::blocking::{Client, Response};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Blocking HTTP client for the demo endpoints.
#[derive(Debug, Clone)]
pub struct HttpRemoteSync {
    client: Client,
    base_url: String,
    pending: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl HttpRemoteSync {
    /// Builds a client for `base_url` with a per-request `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> RemoteResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Wraps a preconfigured client (proxy, TLS or timeout settings).
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            pending: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Number of notifications whose thread has not been joined yet.
    pub fn pending_notifications(&self) -> usize {
        self.lock_pending().len()
    }

    /// Waits for every in-flight notification to finish.
    ///
    /// Each one is bounded by the client timeout. Process owners call this
    /// before exiting so queued POSTs are not cut off.
    pub fn flush(&self) {
        let handles = std::mem::take(&mut *self.lock_pending());
        let count = handles.len();
        for handle in handles {
            if handle.join().is_err() {
                warn!("event=remote_flush module=remote status=error error_code=notify_panicked");
            }
        }
        if count > 0 {
            info!("event=remote_flush module=remote status=ok joined={count}");
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn lock_pending(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn post_record(client: &Client, url: &str, record: &Record) -> RemoteResult<()> {
        let response = client.post(url).json(record).send()?;
        ensure_success(response)?;
        Ok(())
    }
}

impl RemoteSync for HttpRemoteSync {
    fn notify_created(&self, record: &Record) {
        let client = self.client.clone();
        let url = self.url("/posts");
        let record = record.clone();

        let spawned = thread::Builder::new()
            .name("exitlog-remote-notify".to_string())
            .spawn(move || match Self::post_record(&client, url.as_str(), &record) {
                Ok(()) => info!(
                    "event=remote_notify module=remote status=ok record_id={}",
                    record.id
                ),
                Err(err) => warn!(
                    "event=remote_notify module=remote status=error record_id={} error={}",
                    record.id, err
                ),
            });

        match spawned {
            Ok(handle) => {
                let mut pending = self.lock_pending();
                pending.retain(|handle| !handle.is_finished());
                pending.push(handle);
            }
            Err(err) => warn!(
                "event=remote_notify module=remote status=error error_code=spawn_failed error={}",
                err
            ),
        }
    }

    fn fetch_user(&self, id: u32) -> RemoteResult<RemoteUser> {
        let response = self.client.get(self.url(&format!("/users/{id}"))).send()?;
        let user = ensure_success(response)?.json::<RemoteUser>()?;
        Ok(user)
    }

    fn fetch_recent_posts(&self, limit: u32) -> RemoteResult<Vec<RemotePost>> {
        let response = self
            .client
            .get(self.url("/posts"))
            .query(&[("_limit", limit)])
            .send()?;
        let posts = ensure_success(response)?.json::<Vec<RemotePost>>()?;
        Ok(posts)
    }
}

fn ensure_success(response: Response) -> RemoteResult<Response> {
    let status = response.status();
    if !status.is_success() {
        return Err(RemoteError::Status(status.as_u16()));
    }
    Ok(response)
}
