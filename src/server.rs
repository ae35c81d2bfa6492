//! Synchronous TCP transport: one request and one response per connection,
//! every query run to completion before the next connection is accepted.

use std::{
    io::{Read, Write},
    net::{TcpListener, TcpStream},
};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::{buffer::ResponseBuffer, builder, catalog::Catalog, similarity};

/// Control message that stops the accept loop; checked before query parsing.
pub const KILL_MESSAGE: &str = "kill";

const MAX_REQUEST_BYTES: u64 = 4096;

pub fn serve(catalog: &Catalog, port: u16) -> Result<()> {
    let listener =
        TcpListener::bind(("0.0.0.0", port)).with_context(|| format!("Binding TCP port {port}"))?;
    info!("Listening on port {port}");
    serve_on(catalog, listener)
}

// Split out from serve() so tests can bind an ephemeral port.
pub fn serve_on(catalog: &Catalog, listener: TcpListener) -> Result<()> {
    for stream in listener.incoming() {
        let stream = match stream {
            Ok(stream) => stream,
            Err(err) => {
                warn!("accept failed: {err}");
                continue;
            }
        };
        match handle_connection(stream, catalog) {
            Ok(true) => {}
            Ok(false) => {
                info!("kill message received; no longer accepting connections");
                break;
            }
            Err(err) => warn!("connection failed: {err:#}"),
        }
    }
    Ok(())
}

// Returns false when the service should stop accepting connections.
fn handle_connection(mut stream: TcpStream, catalog: &Catalog) -> Result<bool> {
    let mut message = String::new();
    (&stream)
        .take(MAX_REQUEST_BYTES)
        .read_to_string(&mut message)
        .context("Reading request")?;
    let message = message.trim();
    if message == KILL_MESSAGE {
        return Ok(false);
    }
    info!("query: {message}");

    let query = builder::swap_from_query(message).context("Parsing query message")?;
    let mut response = ResponseBuffer::new();
    if let Some(nearest) = similarity::nearest(&query, catalog) {
        nearest
            .to_wire(&mut response)
            .context("Serializing response")?;
    } else {
        warn!("catalog is empty; sending empty response");
    }
    stream
        .write_all(response.as_str().as_bytes())
        .context("Writing response")?;
    Ok(true)
}
