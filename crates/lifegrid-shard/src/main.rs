//! `lifegrid-shard`: serve partitioned compute on one or more ports.
//!
//! Usage: `lifegrid-shard [PORT...]`. Without arguments the shard listens
//! on 10001 through 10008. Log verbosity follows `RUST_LOG`, defaulting
//! to `info`.

use std::process::ExitCode;

use lifegrid_shard::{ShardServer, DEFAULT_PORTS};
use tracing::{error, info};
use tracing_subscriber::prelude::*;

fn parse_ports(args: impl Iterator<Item = String>) -> Result<Vec<u16>, String> {
    let ports = args
        .map(|arg| {
            arg.parse::<u16>()
                .map_err(|e| format!("invalid port {arg:?}: {e}"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if ports.is_empty() {
        Ok(DEFAULT_PORTS.to_vec())
    } else {
        Ok(ports)
    }
}

fn main() -> ExitCode {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let ports = match parse_ports(std::env::args().skip(1)) {
        Ok(ports) => ports,
        Err(e) => {
            error!(target: "lifegrid::shard", error = %e, "bad arguments");
            return ExitCode::FAILURE;
        }
    };

    let mut handles = Vec::with_capacity(ports.len());
    for port in &ports {
        let server = match ShardServer::bind(("0.0.0.0", *port)) {
            Ok(server) => server,
            Err(e) => {
                error!(target: "lifegrid::shard", port, error = %e, "bind failed");
                return ExitCode::FAILURE;
            }
        };
        match server.spawn() {
            Ok(handle) => handles.push(handle),
            Err(e) => {
                error!(target: "lifegrid::shard", port, error = %e, "failed to start listener");
                return ExitCode::FAILURE;
            }
        }
    }
    info!(target: "lifegrid::shard", ?ports, "shard ready");

    let mut status = ExitCode::SUCCESS;
    for handle in handles {
        match handle.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                error!(target: "lifegrid::shard", error = %e, "listener stopped");
                status = ExitCode::FAILURE;
            }
            Err(_) => {
                error!(target: "lifegrid::shard", "listener thread panicked");
                status = ExitCode::FAILURE;
            }
        }
    }
    status
}
