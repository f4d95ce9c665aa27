//! Transmission RPC torrent client implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::TransmissionConfig;

use super::{TorrentClient, TorrentClientError, Transfer, TransferFile};

/// Header carrying Transmission's CSRF session token.
const SESSION_HEADER: &str = "X-Transmission-Session-Id";

/// Fields requested for every `torrent-get` call.
const TRANSFER_FIELDS: &[&str] = &["id", "name", "percentDone", "files"];

/// Transmission client implementation.
pub struct TransmissionClient {
    client: Client,
    config: TransmissionConfig,
    url: String,
    /// Session token (refreshed whenever the daemon answers 409).
    session_id: RwLock<Option<String>>,
}

impl TransmissionClient {
    /// Create a new Transmission client.
    pub fn new(config: TransmissionConfig) -> Result<Self, TorrentClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| TorrentClientError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            url: config.rpc_url(),
            config,
            session_id: RwLock::new(None),
        })
    }

    /// Issue a cheap call to verify the daemon is reachable and obtain a session token.
    pub async fn check_session(&self) -> Result<(), TorrentClientError> {
        let response: RpcResponse<Value> = self.call("session-get", json!({})).await?;
        response.into_arguments().map(|_| ())
    }

    fn map_send_error(e: reqwest::Error) -> TorrentClientError {
        if e.is_timeout() {
            TorrentClientError::Timeout
        } else if e.is_connect() {
            TorrentClientError::ConnectionFailed(e.to_string())
        } else {
            TorrentClientError::ApiError(e.to_string())
        }
    }

    async fn send(&self, body: &Value) -> Result<reqwest::Response, TorrentClientError> {
        let mut request = self.client.post(&self.url).json(body);
        if let Some(username) = &self.config.username {
            request = request.basic_auth(username, self.config.password.as_deref());
        }
        if let Some(session_id) = self.session_id.read().await.as_ref() {
            request = request.header(SESSION_HEADER, session_id);
        }
        request.send().await.map_err(Self::map_send_error)
    }

    /// Make an RPC call, renewing the session token once if it is stale.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        arguments: Value,
    ) -> Result<RpcResponse<T>, TorrentClientError> {
        let body = json!({ "method": method, "arguments": arguments });

        let mut response = self.send(&body).await?;
        if response.status() == StatusCode::CONFLICT {
            let session_id = response
                .headers()
                .get(SESSION_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
                .ok_or_else(|| {
                    TorrentClientError::ApiError("409 without session id".to_string())
                })?;
            debug!("Transmission session renewed");
            *self.session_id.write().await = Some(session_id);
            response = self.send(&body).await?;
        }

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(TorrentClientError::AuthenticationFailed(format!(
                "HTTP {}",
                status
            )));
        }
        if !status.is_success() {
            return Err(TorrentClientError::ApiError(format!("HTTP {}", status)));
        }

        response
            .json::<RpcResponse<T>>()
            .await
            .map_err(|e| TorrentClientError::ApiError(format!("Failed to parse response: {}", e)))
    }

    async fn get_transfers(&self, ids: Option<Vec<i64>>) -> Result<Vec<Transfer>, TorrentClientError> {
        let mut arguments = json!({ "fields": TRANSFER_FIELDS });
        if let Some(ids) = ids {
            arguments["ids"] = json!(ids);
        }

        let response: RpcResponse<TorrentGetArguments> = self.call("torrent-get", arguments).await?;
        Ok(response
            .into_arguments()?
            .torrents
            .into_iter()
            .map(TransmissionTorrent::into_transfer)
            .collect())
    }
}

/// Envelope of every RPC response.
#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: String,
    arguments: Option<T>,
}

impl<T> RpcResponse<T> {
    fn is_success(&self) -> bool {
        self.result == "success"
    }

    fn into_arguments(self) -> Result<T, TorrentClientError> {
        if !self.is_success() {
            return Err(TorrentClientError::ApiError(self.result));
        }
        self.arguments
            .ok_or_else(|| TorrentClientError::ApiError("missing arguments".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct TorrentGetArguments {
    torrents: Vec<TransmissionTorrent>,
}

#[derive(Debug, Deserialize)]
struct TorrentAddArguments {
    #[serde(rename = "torrent-added")]
    added: Option<AddedTorrent>,
    #[serde(rename = "torrent-duplicate")]
    duplicate: Option<AddedTorrent>,
}

#[derive(Debug, Deserialize)]
struct AddedTorrent {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct TransmissionTorrent {
    id: i64,
    #[serde(default)]
    name: String,
    #[serde(rename = "percentDone", default)]
    percent_done: f64,
    #[serde(default)]
    files: Vec<TransmissionFile>,
}

#[derive(Debug, Deserialize)]
struct TransmissionFile {
    name: String,
    length: i64,
    #[serde(rename = "bytesCompleted")]
    bytes_completed: i64,
}

impl TransmissionTorrent {
    fn into_transfer(self) -> Transfer {
        Transfer {
            id: self.id.to_string(),
            name: self.name,
            progress: self.percent_done,
            files: self
                .files
                .into_iter()
                .map(|f| TransferFile {
                    name: f.name,
                    size: f.length.max(0) as u64,
                    completed: f.bytes_completed.max(0) as u64,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl TorrentClient for TransmissionClient {
    fn name(&self) -> &str {
        "transmission"
    }

    async fn submit(&self, link: &str) -> Result<String, TorrentClientError> {
        let response: RpcResponse<TorrentAddArguments> = self
            .call("torrent-add", json!({ "filename": link }))
            .await?;

        if !response.is_success() {
            warn!(result = %response.result, "Transmission rejected link");
            return Err(TorrentClientError::Rejected(response.result));
        }

        let arguments = response.into_arguments()?;
        arguments
            .added
            .or(arguments.duplicate)
            .map(|t| t.id.to_string())
            .ok_or_else(|| TorrentClientError::ApiError("torrent-add returned no torrent".to_string()))
    }

    async fn fetch(&self, id: &str) -> Result<Transfer, TorrentClientError> {
        let numeric_id: i64 = id
            .parse()
            .map_err(|_| TorrentClientError::TransferNotFound(id.to_string()))?;

        self.get_transfers(Some(vec![numeric_id]))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| TorrentClientError::TransferNotFound(id.to_string()))
    }

    async fn list_transfers(&self) -> Result<Vec<Transfer>, TorrentClientError> {
        self.get_transfers(None).await
    }
}
