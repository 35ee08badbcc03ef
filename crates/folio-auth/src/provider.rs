use std::sync::{Mutex, RwLock};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use folio_schema::{Identity, Session};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// Identity provider boundary. Change notifications are delivered in the
/// order the provider emits them, starting after the initial fetch.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the current session. A missing or rejected credential is the
    /// anonymous session, not an error; errors mean the provider itself was
    /// unreachable.
    async fn fetch_session(&self) -> Result<Session>;

    /// Observe future session changes. Dropping the receiver unsubscribes.
    fn subscribe(&self) -> mpsc::Receiver<Session>;

    /// Request provider-side sign-out. On success a change notification
    /// carrying the anonymous session follows on every subscription.
    async fn sign_out(&self) -> Result<()>;
}

/// Hosted auth service client (GoTrue-style REST under `/auth/v1`).
pub struct HostedIdentity {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
    access_token: RwLock<Option<String>>,
    subscribers: Mutex<Vec<mpsc::Sender<Session>>>,
}

impl HostedIdentity {
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        access_token: Option<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            access_token: RwLock::new(access_token),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    fn token(&self) -> Option<String> {
        self.access_token
            .read()
            .ok()
            .and_then(|guard| guard.clone())
    }

    fn emit(&self, session: Session) {
        let mut subs = match self.subscribers.lock() {
            Ok(subs) => subs,
            Err(_) => return,
        };
        subs.retain(|tx| !tx.is_closed());
        for tx in subs.iter() {
            let _ = tx.try_send(session.clone());
        }
    }
}

#[async_trait]
impl IdentityProvider for HostedIdentity {
    async fn fetch_session(&self) -> Result<Session> {
        let Some(token) = self.token() else {
            return Ok(Session::anonymous());
        };

        let url = format!("{}/auth/v1/user", self.base_url);
        let resp = self
            .client
            .get(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&token)
            .send()
            .await?;

        let status = resp.status();
        match status {
            StatusCode::OK => {
                let user: ApiUser = resp.json().await?;
                Ok(Session {
                    identity: Some(Identity {
                        id: user.id,
                        email: user.email,
                    }),
                })
            }
            // A stale or revoked token is an anonymous session, not a fault.
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(Session::anonymous()),
            _ => {
                let text = resp.text().await?;
                let parsed = serde_json::from_str::<ApiError>(&text).ok();
                Err(format_api_error(status, parsed))
            }
        }
    }

    fn subscribe(&self) -> mpsc::Receiver<Session> {
        let (tx, rx) = mpsc::channel(CHANGE_CHANNEL_CAPACITY);
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }
        rx
    }

    async fn sign_out(&self) -> Result<()> {
        let Some(token) = self.token() else {
            // Nothing to revoke; report the (unchanged) anonymous state.
            self.emit(Session::anonymous());
            return Ok(());
        };

        let url = format!("{}/auth/v1/logout", self.base_url);
        let resp = self
            .client
            .post(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await?;
            let parsed = serde_json::from_str::<ApiError>(&text).ok();
            return Err(format_api_error(status, parsed));
        }

        if let Ok(mut guard) = self.access_token.write() {
            *guard = None;
        }
        self.emit(Session::anonymous());
        Ok(())
    }
}

fn format_api_error(status: StatusCode, parsed: Option<ApiError>) -> anyhow::Error {
    if let Some(api_error) = parsed {
        anyhow!("auth api error ({status}): {}", api_error.message())
    } else {
        anyhow!("auth api error ({status})")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ApiUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ApiError {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl ApiError {
    fn message(&self) -> &str {
        self.msg
            .as_deref()
            .or(self.message.as_deref())
            .or(self.error_description.as_deref())
            .unwrap_or("unknown error")
    }
}

/// Provider for contexts with no auth backend configured: resolves to the
/// anonymous session immediately and sign-out is a no-op change emission.
#[derive(Default)]
pub struct AnonymousIdentity {
    subscribers: Mutex<Vec<mpsc::Sender<Session>>>,
}

impl AnonymousIdentity {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityProvider for AnonymousIdentity {
    async fn fetch_session(&self) -> Result<Session> {
        Ok(Session::anonymous())
    }

    fn subscribe(&self) -> mpsc::Receiver<Session> {
        let (tx, rx) = mpsc::channel(CHANGE_CHANNEL_CAPACITY);
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }
        rx
    }

    async fn sign_out(&self) -> Result<()> {
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.retain(|tx| !tx.is_closed());
            for tx in subs.iter() {
                let _ = tx.try_send(Session::anonymous());
            }
        }
        Ok(())
    }
}
