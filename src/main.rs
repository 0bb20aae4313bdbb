use std::io::{self, BufWriter, Read, Write};

use anyhow::{Context, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let mut msg = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut msg)
        .context("reading message from stdin")?;
    debug!(bytes = msg.len(), "read message");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    // flush what was rendered even when the message turns out malformed
    let rendered = dns_dig_report::render(&msg, &mut out);
    out.flush().context("writing report")?;

    rendered.context("rendering DNS message")
}
