//! Leaderboard crate - score records and where they live.
//!
//! - [`store`]: the [`ScoreStore`] trait with memory and file backends
//! - [`protocol`] / [`server`] / [`remote`]: the line-delimited JSON store
//!   server and its client
//! - [`worker`]: [`Persistence`], the fire-and-forget bridge used by the game
//! - [`view`]: [`LeaderboardView`], the top-10 list

pub mod config;
pub mod error;
pub mod protocol;
pub mod record;
pub mod remote;
pub mod server;
pub mod store;
pub mod view;
pub mod worker;

pub use lane_dodge_types as types;

pub use config::StoreConfig;
pub use error::StoreError;
pub use record::{rank_records, NewScoreRecord, RecordId, ScoreRecord};
pub use remote::RemoteStore;
pub use server::run_store_server;
pub use store::{FileStore, MemoryStore, ScoreStore};
pub use view::LeaderboardView;
pub use worker::{read_leaderboard, submit_score, PersistEvent, PersistJob, Persistence};
