//! Blocking client for a remote shard.

use std::io::{BufReader, BufWriter, Write};
use std::net::{TcpStream, ToSocketAddrs};

use tracing::debug;

use crate::codec::{read_response, write_request};
use crate::error::ShardError;
use crate::service::{ShardRequest, ShardResponse};

/// One connection to a [`ShardServer`](crate::ShardServer).
///
/// Calls are sequential on the connection. Failures are returned as-is;
/// the client never retries.
#[derive(Debug)]
pub struct ShardClient {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl ShardClient {
    /// Connect to a shard.
    pub fn connect(addr: impl ToSocketAddrs) -> Result<Self, ShardError> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;
        Ok(Self {
            reader: BufReader::new(stream.try_clone()?),
            writer: BufWriter::new(stream),
        })
    }

    /// Send `request` and wait for the result.
    pub fn execute(&mut self, request: &ShardRequest) -> Result<ShardResponse, ShardError> {
        let (width, height) = (request.grid.width(), request.grid.height());
        write_request(&mut self.writer, request)?;
        self.writer.flush()?;
        let response = read_response(&mut self.reader, width, height)?;
        debug!(
            target: "lifegrid::shard",
            width,
            height,
            turns = response.turns,
            "remote call returned"
        );
        Ok(response)
    }
}
