//! Store server end to end over TCP: remote client, raw protocol lines and
//! the file backend.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

use lane_dodge::leaderboard::{
    run_store_server, FileStore, MemoryStore, NewScoreRecord, RemoteStore, ScoreStore, StoreConfig,
    StoreError,
};
use lane_dodge::types::{PlayerName, LEADERBOARD_LIMIT, SCORES_COLLECTION};

async fn spawn_server<S: ScoreStore>(store: S) -> SocketAddr {
    let config = StoreConfig {
        port: 0,
        ..StoreConfig::default()
    };
    let (ready_tx, ready_rx) = oneshot::channel();
    tokio::spawn(async move {
        let _ = run_store_server(config, Arc::new(store), Some(ready_tx)).await;
    });
    ready_rx.await.unwrap()
}

fn client(addr: SocketAddr) -> RemoteStore {
    RemoteStore::new(addr.to_string(), Duration::from_secs(5))
}

fn record(name: &str, score: u32) -> NewScoreRecord {
    NewScoreRecord::now(&PlayerName::parse(name).unwrap(), score)
}

#[tokio::test]
async fn submitted_score_shows_up_in_top_ten() {
    let addr = spawn_server(MemoryStore::new()).await;
    let store = client(addr);

    for (i, score) in [10u32, 500, 30, 70].into_iter().enumerate() {
        store
            .create(SCORES_COLLECTION, record(&format!("p{i}"), score))
            .await
            .unwrap();
    }
    let id = store.create(SCORES_COLLECTION, record("Ana", 120)).await.unwrap();

    let top = store.top_scores(SCORES_COLLECTION, LEADERBOARD_LIMIT).await.unwrap();
    let scores: Vec<u32> = top.iter().map(|r| r.score).collect();
    assert_eq!(scores, vec![500, 120, 70, 30, 10]);
    let ana = top.iter().find(|r| r.player_name == "Ana").unwrap();
    assert_eq!(ana.id, id);
    assert_eq!(ana.score, 120);
}

#[tokio::test]
async fn top_ten_is_capped() {
    let addr = spawn_server(MemoryStore::new()).await;
    let store = client(addr);
    for score in 0..15 {
        store.create(SCORES_COLLECTION, record("p", score * 10)).await.unwrap();
    }
    let top = store.top_scores(SCORES_COLLECTION, LEADERBOARD_LIMIT).await.unwrap();
    assert_eq!(top.len(), LEADERBOARD_LIMIT);
    assert_eq!(top[0].score, 140);
    assert_eq!(top[9].score, 50);
}

#[tokio::test]
async fn invalid_collection_is_rejected_with_code() {
    let addr = spawn_server(MemoryStore::new()).await;
    let err = client(addr)
        .create("../scores", record("Ana", 1))
        .await
        .unwrap_err();
    match err {
        StoreError::Rejected { code, .. } => {
            assert_eq!(code, lane_dodge::leaderboard::protocol::ErrorCode::InvalidCollection)
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn raw_protocol_lines_on_one_connection() {
    let addr = spawn_server(MemoryStore::new()).await;
    let stream = TcpStream::connect(addr).await.unwrap();
    let (reader, mut writer) = tokio::io::split(stream);
    let mut lines = BufReader::new(reader).lines();

    let create = serde_json::json!({
        "type": "create",
        "seq": 1,
        "collection": "scores",
        "record": { "player_name": "Ana", "score": 120, "timestamp": Utc::now() },
    });
    writer.write_all(format!("{create}\n").as_bytes()).await.unwrap();
    let v: Value = serde_json::from_str(&lines.next_line().await.unwrap().unwrap()).unwrap();
    assert_eq!(v["type"], "created");
    assert_eq!(v["seq"], 1);
    assert!(v["id"].as_str().is_some_and(|s| !s.is_empty()));

    writer
        .write_all(b"{\"type\":\"query\",\"seq\":2,\"collection\":\"scores\",\"order_by\":\"score\",\"direction\":\"desc\",\"limit\":10}\n")
        .await
        .unwrap();
    let v: Value = serde_json::from_str(&lines.next_line().await.unwrap().unwrap()).unwrap();
    assert_eq!(v["type"], "records");
    assert_eq!(v["seq"], 2);
    assert_eq!(v["records"][0]["player_name"], "Ana");
    assert_eq!(v["records"][0]["score"], 120);

    writer.write_all(b"{\"seq\": 3, \"type\": \"nope\"}\n").await.unwrap();
    let v: Value = serde_json::from_str(&lines.next_line().await.unwrap().unwrap()).unwrap();
    assert_eq!(v["type"], "error");
    assert_eq!(v["seq"], 3);
    assert_eq!(v["code"], "invalid_request");

    writer
        .write_all(b"{\"type\":\"query\",\"seq\":4,\"collection\":\"scores\",\"order_by\":\"score\",\"direction\":\"asc\",\"limit\":10}\n")
        .await
        .unwrap();
    let v: Value = serde_json::from_str(&lines.next_line().await.unwrap().unwrap()).unwrap();
    assert_eq!(v["code"], "unsupported_order");
}

#[tokio::test]
async fn overlong_line_is_rejected_and_connection_recovers() {
    use lane_dodge::leaderboard::protocol::MAX_LINE_BYTES;

    let addr = spawn_server(MemoryStore::new()).await;
    let stream = TcpStream::connect(addr).await.unwrap();
    let (reader, mut writer) = tokio::io::split(stream);
    let mut lines = BufReader::new(reader).lines();

    let mut flood = vec![b'x'; MAX_LINE_BYTES + 10];
    flood.push(b'\n');
    writer.write_all(&flood).await.unwrap();
    let v: Value = serde_json::from_str(&lines.next_line().await.unwrap().unwrap()).unwrap();
    assert_eq!(v["type"], "error");
    assert_eq!(v["code"], "invalid_request");

    writer
        .write_all(b"{\"type\":\"query\",\"seq\":7,\"collection\":\"scores\",\"order_by\":\"score\",\"direction\":\"desc\",\"limit\":10}\n")
        .await
        .unwrap();
    let v: Value = serde_json::from_str(&lines.next_line().await.unwrap().unwrap()).unwrap();
    assert_eq!(v["type"], "records");
    assert_eq!(v["seq"], 7);
}

#[tokio::test]
async fn file_backed_server_keeps_scores_across_restarts() {
    let dir = tempfile::tempdir().unwrap();

    let addr = spawn_server(FileStore::open(dir.path()).await.unwrap()).await;
    client(addr)
        .create(SCORES_COLLECTION, record("Ana", 120))
        .await
        .unwrap();

    // A second server over the same directory sees the record.
    let addr = spawn_server(FileStore::open(dir.path()).await.unwrap()).await;
    let top = client(addr)
        .top_scores(SCORES_COLLECTION, LEADERBOARD_LIMIT)
        .await
        .unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].player_name, "Ana");
}
