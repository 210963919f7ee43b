//! Console Module
//!
//! Line-oriented command session over any async reader and writer.

pub mod handlers;

pub use handlers::execute;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::models::{Command, Reply};
use crate::shared::SharedCache;

/// Reads commands line by line and writes one reply line per command.
///
/// Blank lines are skipped. The session ends at end of input or on `QUIT`.
pub async fn run_session<R, W>(
    cache: &SharedCache<String>,
    reader: R,
    mut writer: W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let reply = match Command::parse(&line) {
            Ok(Command::Quit) => {
                debug!("session closed by QUIT");
                break;
            }
            Ok(command) => execute(cache, command).await,
            Err(err) => Reply::Error(err.to_string()),
        };

        writer.write_all(format!("{}\n", reply).as_bytes()).await?;
        writer.flush().await?;
    }

    Ok(())
}
