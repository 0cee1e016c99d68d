//! Protocol module - line-delimited JSON messages of the score store
//!
//! Every message is one JSON object per line and carries `type` and `seq`.
//! The server echoes the request `seq` in its response.
//!
//! ```text
//! Client -> Server: {"type":"create","seq":1,"collection":"scores","record":{"player_name":"Ana","score":120,"timestamp":"2026-10-18T12:00:00Z"}}
//! Server -> Client: {"type":"created","seq":1,"id":"5d0c..."}
//! Client -> Server: {"type":"query","seq":2,"collection":"scores","order_by":"score","direction":"desc","limit":10}
//! Server -> Client: {"type":"records","seq":2,"records":[{"id":"5d0c...","player_name":"Ana","score":120,"timestamp":"..."}]}
//! Server -> Client: {"type":"error","seq":3,"code":"invalid_request","message":"..."}
//! ```

use serde::{Deserialize, Serialize};

use crate::record::{NewScoreRecord, RecordId, ScoreRecord};

/// Only field the store can order by.
pub const ORDER_BY_SCORE: &str = "score";

/// Upper bound on `limit` accepted by the server.
pub const MAX_QUERY_LIMIT: usize = 100;

/// Longest request line the server reads, newline excluded.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidRequest,
    InvalidCollection,
    UnsupportedOrder,
    Storage,
}

/// Client -> store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    Create {
        seq: u64,
        collection: String,
        record: NewScoreRecord,
    },
    Query {
        seq: u64,
        collection: String,
        order_by: String,
        direction: Direction,
        limit: usize,
    },
}

impl Request {
    pub fn seq(&self) -> u64 {
        match self {
            Request::Create { seq, .. } | Request::Query { seq, .. } => *seq,
        }
    }
}

/// Store -> client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Created {
        seq: u64,
        id: RecordId,
    },
    Records {
        seq: u64,
        records: Vec<ScoreRecord>,
    },
    Error {
        seq: u64,
        code: ErrorCode,
        message: String,
    },
}

impl Response {
    pub fn seq(&self) -> u64 {
        match self {
            Response::Created { seq, .. }
            | Response::Records { seq, .. }
            | Response::Error { seq, .. } => *seq,
        }
    }
}

pub fn parse_request(line: &str) -> Result<Request, serde_json::Error> {
    serde_json::from_str(line)
}

pub fn parse_response(line: &str) -> Result<Response, serde_json::Error> {
    serde_json::from_str(line)
}

pub fn create_request(seq: u64, collection: &str, record: NewScoreRecord) -> Request {
    Request::Create {
        seq,
        collection: collection.to_string(),
        record,
    }
}

pub fn top_scores_request(seq: u64, collection: &str, limit: usize) -> Request {
    Request::Query {
        seq,
        collection: collection.to_string(),
        order_by: ORDER_BY_SCORE.to_string(),
        direction: Direction::Desc,
        limit,
    }
}

pub fn create_error(seq: u64, code: ErrorCode, message: &str) -> Response {
    Response::Error {
        seq,
        code,
        message: message.to_string(),
    }
}

/// Pull `seq` out of a line that failed to parse, so the error can still echo it.
pub fn extract_seq_best_effort(s: &str) -> Option<u64> {
    let start = s.find("\"seq\"")?;
    let after_key = &s[start + 5..];
    let colon = after_key.find(':')?;
    let rest = after_key[colon + 1..].trim_start();
    let end = rest
        .as_bytes()
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if end == 0 {
        return None;
    }
    rest[..end].parse::<u64>().ok()
}
