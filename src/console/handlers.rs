//! Console Handlers
//!
//! Executes parsed commands against a shared cache.

use crate::models::{Command, Reply, StatsResponse};
use crate::shared::SharedCache;

/// Runs one command and builds its reply.
///
/// `Quit` is handled by the session loop and answers `Ok` here.
pub async fn execute(cache: &SharedCache<String>, command: Command) -> Reply {
    match command {
        Command::Set { key, value } => {
            if cache.set(key, value).await {
                Reply::Ok
            } else {
                Reply::Rejected
            }
        }
        Command::Get { key } => match cache.get(&key).await {
            Some(value) => Reply::Value(value),
            None => Reply::Nil,
        },
        Command::Del { key } => {
            cache.remove(&key).await;
            Reply::Ok
        }
        Command::Evict => {
            cache.remove_oldest().await;
            Reply::Ok
        }
        Command::Len => Reply::Integer(cache.len().await),
        Command::Stats => {
            let stats = StatsResponse::from(cache.stats().await);
            match serde_json::to_string(&stats) {
                Ok(json) => Reply::Stats(json),
                Err(err) => Reply::Error(err.to_string()),
            }
        }
        Command::Quit => Reply::Ok,
    }
}
