//! TCP front end for [`ComputeShard`].
//!
//! Each accepted connection gets its own thread and serves
//! request/response pairs until the peer closes. Invalid requests are
//! answered with an error response; undecodable frames close the
//! connection.

use std::io::{BufReader, BufWriter, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::codec::{read_request, write_error_response, write_response};
use crate::error::ShardError;
use crate::service::ComputeShard;
use crate::status;

/// A bound shard listener.
#[derive(Debug)]
pub struct ShardServer {
    listener: TcpListener,
    shard: ComputeShard,
}

impl ShardServer {
    /// Bind to `addr`.
    pub fn bind(addr: impl ToSocketAddrs) -> Result<Self, ShardError> {
        let listener = TcpListener::bind(addr)?;
        Ok(Self {
            listener,
            shard: ComputeShard::new(),
        })
    }

    /// The address actually bound, useful after binding port 0.
    pub fn local_addr(&self) -> Result<SocketAddr, ShardError> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections forever.
    ///
    /// Returns only if the bound address cannot be read. Accept and
    /// per-connection failures are logged and do not stop the server.
    pub fn serve(&self) -> Result<(), ShardError> {
        let local = self.local_addr()?;
        info!(target: "lifegrid::shard", addr = %local, "shard listening");
        loop {
            match self.listener.accept() {
                Ok((stream, peer)) => {
                    info!(target: "lifegrid::shard", %peer, "client connected");
                    let shard = self.shard;
                    let spawned = thread::Builder::new()
                        .name(format!("lifegrid-shard-{peer}"))
                        .spawn(move || {
                            if let Err(e) = handle_connection(stream, shard) {
                                warn!(target: "lifegrid::shard", %peer, error = %e, "connection failed");
                            }
                        });
                    if let Err(e) = spawned {
                        warn!(target: "lifegrid::shard", %peer, error = %e, "failed to spawn connection thread");
                    }
                }
                Err(e) => {
                    warn!(target: "lifegrid::shard", addr = %local, error = %e, "accept failed");
                    thread::sleep(Duration::from_millis(200));
                }
            }
        }
    }

    /// Serve on a background thread.
    pub fn spawn(self) -> Result<thread::JoinHandle<Result<(), ShardError>>, ShardError> {
        let name = format!("lifegrid-shard-{}", self.local_addr()?);
        Ok(thread::Builder::new().name(name).spawn(move || self.serve())?)
    }
}

/// Serve request/response pairs on one connection until the peer closes.
pub fn handle_connection(stream: TcpStream, shard: ComputeShard) -> Result<(), ShardError> {
    let peer = stream.peer_addr()?;
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut writer = BufWriter::new(stream);
    let mut calls = 0u64;
    loop {
        let outcome = match read_request(&mut reader) {
            Ok(Some(request)) => {
                let turns = request.turns;
                let (start, end) = (request.start_column, request.end_column);
                shard.execute(request).map(|resp| (resp, turns, start, end))
            }
            Ok(None) => {
                debug!(target: "lifegrid::shard", %peer, calls, "client disconnected");
                return Ok(());
            }
            Err(e) if e.is_invalid_request() => Err(e),
            Err(e) => return Err(e),
        };
        calls += 1;
        match outcome {
            Ok((response, turns, start, end)) => {
                info!(
                    target: "lifegrid::shard",
                    %peer,
                    turns,
                    start_column = start,
                    end_column = end,
                    "call served"
                );
                write_response(&mut writer, &response)?;
            }
            Err(e) if e.is_invalid_request() => {
                warn!(target: "lifegrid::shard", %peer, error = %e, "rejected request");
                write_error_response(&mut writer, status::INVALID_REQUEST, &e.to_string())?;
            }
            Err(e) => return Err(e),
        }
        writer.flush()?;
    }
}
