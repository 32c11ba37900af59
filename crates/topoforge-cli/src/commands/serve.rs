//! Serve tool calls over stdio
//!
//! Reads one JSON request per line from stdin and writes one JSON response
//! per line to stdout. Requests are handled strictly one at a time.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use super::Context;
use crate::session::Session;

/// Run the serve command until stdin closes
pub async fn run(ctx: Context) -> Result<()> {
    let session = Session::new(
        ctx.catalog,
        ctx.config.project.validation,
        ctx.config.project.generate.validate,
    );

    tracing::info!("Serving tool calls on stdio");

    let mut reader = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }

        // Raw bytes: a line that is not UTF-8 gets its own error response
        let request = line.trim_ascii();
        if request.is_empty() {
            continue;
        }

        let mut response = session.handle_bytes(request).to_string();
        response.push('\n');
        stdout.write_all(response.as_bytes()).await?;
        stdout.flush().await?;
    }

    tracing::info!("stdin closed, session ended");
    Ok(())
}
