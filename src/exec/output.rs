// src/exec/output.rs

//! Forwarding of captured child output for `output = "log"`.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{debug, info};

/// Which child stream a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    fn as_str(self) -> &'static str {
        match self {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        }
    }
}

/// Spawn a task that logs every line read from `reader` until EOF.
pub fn forward_lines<R>(process: String, stream: Stream, reader: R)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let reader = BufReader::new(reader);
        let mut lines = reader.lines();

        while let Ok(Some(line)) = lines.next_line().await {
            info!(process = %process, stream = stream.as_str(), "{}", line);
        }

        debug!(process = %process, stream = stream.as_str(), "output stream closed");
    });
}
