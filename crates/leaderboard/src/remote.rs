//! TCP client for the score store server.
//!
//! Each request opens its own connection, writes one line and reads one line
//! back. The whole exchange runs under the configured deadline.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::protocol::{self, Request, Response};
use crate::record::{NewScoreRecord, RecordId, ScoreRecord};
use crate::store::ScoreStore;

#[derive(Debug)]
pub struct RemoteStore {
    addr: String,
    timeout: Duration,
    next_seq: AtomicU64,
}

impl RemoteStore {
    pub fn new(addr: impl Into<String>, timeout: Duration) -> Self {
        Self {
            addr: addr.into(),
            timeout,
            next_seq: AtomicU64::new(1),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.addr(), config.io_timeout())
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    fn next_seq(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::Relaxed)
    }

    async fn exchange(&self, request: &Request) -> Result<Response, StoreError> {
        let mut line = serde_json::to_vec(request)?;
        line.push(b'\n');

        let stream = TcpStream::connect(&self.addr).await?;
        let (reader, mut writer) = tokio::io::split(stream);
        writer.write_all(&line).await?;
        writer.flush().await?;

        let mut reader = BufReader::new(reader);
        let mut reply = String::new();
        if reader.read_line(&mut reply).await? == 0 {
            return Err(StoreError::Disconnected);
        }
        let response = protocol::parse_response(reply.trim_end())?;
        if response.seq() != request.seq() {
            return Err(StoreError::UnexpectedResponse);
        }
        Ok(response)
    }

    async fn request(&self, request: Request) -> Result<Response, StoreError> {
        let deadline_ms = self.timeout.as_millis() as u64;
        let response = tokio::time::timeout(self.timeout, self.exchange(&request))
            .await
            .map_err(|_| StoreError::Timeout(deadline_ms))??;
        match response {
            Response::Error { code, message, .. } => Err(StoreError::Rejected { code, message }),
            other => Ok(other),
        }
    }
}

impl ScoreStore for RemoteStore {
    async fn create(&self, collection: &str, record: NewScoreRecord) -> Result<RecordId, StoreError> {
        let req = protocol::create_request(self.next_seq(), collection, record);
        match self.request(req).await? {
            Response::Created { id, .. } => Ok(id),
            _ => Err(StoreError::UnexpectedResponse),
        }
    }

    async fn top_scores(&self, collection: &str, limit: usize) -> Result<Vec<ScoreRecord>, StoreError> {
        let req = protocol::top_scores_request(self.next_seq(), collection, limit);
        match self.request(req).await? {
            Response::Records { records, .. } => Ok(records),
            _ => Err(StoreError::UnexpectedResponse),
        }
    }
}
