//! Score store TCP server.
//!
//! Serves any [`ScoreStore`] over the line protocol in [`crate::protocol`].
//! Each connection gets its own task and may send any number of requests.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

use crate::config::StoreConfig;
use crate::protocol::{self, Direction, ErrorCode, Request, Response};
use crate::store::ScoreStore;

/// Accept connections until the listener fails.
///
/// `ready_tx` receives the bound address, which is how callers binding
/// port 0 learn the real port.
pub async fn run_store_server<S: ScoreStore>(
    config: StoreConfig,
    store: Arc<S>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.addr()).await?;
    let bound = listener.local_addr()?;
    tracing::info!(%bound, "score store listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let mut client_id_counter = 0usize;
    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;
        tracing::debug!(client_id, %addr, "client connected");

        let store = Arc::clone(&store);
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, store).await {
                tracing::warn!(client_id, error = %e, "client error");
            }
            tracing::debug!(client_id, "client disconnected");
        });
    }
}

async fn handle_client<S: ScoreStore>(socket: TcpStream, store: Arc<S>) -> anyhow::Result<()> {
    let (reader, mut writer) = tokio::io::split(socket);
    let mut reader = BufReader::new(reader);
    let mut line = String::new();
    let mut buf: Vec<u8> = Vec::with_capacity(1024);

    loop {
        line.clear();
        let limit = protocol::MAX_LINE_BYTES as u64 + 1;
        let n = (&mut reader).take(limit).read_line(&mut line).await?;
        if n == 0 {
            return Ok(());
        }
        if n > protocol::MAX_LINE_BYTES && !line.ends_with('\n') {
            tracing::warn!(bytes = n, "request line too long, skipping");
            skip_line(&mut reader).await?;
            let response = protocol::create_error(
                protocol::extract_seq_best_effort(&line).unwrap_or(0),
                ErrorCode::InvalidRequest,
                "request line too long",
            );
            write_response(&mut writer, &mut buf, &response).await?;
            continue;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response = match protocol::parse_request(trimmed) {
            Ok(request) => handle_request(store.as_ref(), request).await,
            Err(e) => protocol::create_error(
                protocol::extract_seq_best_effort(trimmed).unwrap_or(0),
                ErrorCode::InvalidRequest,
                &e.to_string(),
            ),
        };
        write_response(&mut writer, &mut buf, &response).await?;
    }
}

/// Discard input up to and including the next newline.
async fn skip_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> std::io::Result<()> {
    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            return Ok(());
        }
        match available.iter().position(|b| *b == b'\n') {
            Some(i) => {
                reader.consume(i + 1);
                return Ok(());
            }
            None => {
                let len = available.len();
                reader.consume(len);
            }
        }
    }
}

async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    buf: &mut Vec<u8>,
    response: &Response,
) -> anyhow::Result<()> {
    buf.clear();
    serde_json::to_writer(&mut *buf, response)?;
    buf.push(b'\n');
    writer.write_all(buf).await?;
    writer.flush().await?;
    Ok(())
}

/// Execute one request against the store.
pub async fn handle_request<S: ScoreStore>(store: &S, request: Request) -> Response {
    match request {
        Request::Create {
            seq,
            collection,
            record,
        } => match store.create(&collection, record).await {
            Ok(id) => Response::Created { seq, id },
            Err(e) => {
                tracing::warn!(seq, collection = %collection, error = %e, "create failed");
                protocol::create_error(seq, e.code(), &e.to_string())
            }
        },
        Request::Query {
            seq,
            collection,
            order_by,
            direction,
            limit,
        } => {
            if order_by != protocol::ORDER_BY_SCORE || direction != Direction::Desc {
                return protocol::create_error(
                    seq,
                    ErrorCode::UnsupportedOrder,
                    "only score descending is supported",
                );
            }
            let limit = limit.min(protocol::MAX_QUERY_LIMIT);
            match store.top_scores(&collection, limit).await {
                Ok(records) => Response::Records { seq, records },
                Err(e) => {
                    tracing::warn!(seq, collection = %collection, error = %e, "query failed");
                    protocol::create_error(seq, e.code(), &e.to_string())
                }
            }
        }
    }
}
