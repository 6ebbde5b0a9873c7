//! Integration test: shard server and client over loopback TCP.
//!
//! Binds an ephemeral port, then checks that remote results match the
//! local engine, that invalid requests get an error response without
//! dropping the connection, and that independent clients can run
//! concurrently.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::thread;

use lifegrid_core::{Grid, GridError};
use lifegrid_engine::SimulationEngine;
use lifegrid_shard::{status, ShardClient, ShardError, ShardRequest, ShardServer};
use lifegrid_test_utils::{glider, place, random_grid};

fn start_server() -> SocketAddr {
    let server = ShardServer::bind("127.0.0.1:0").unwrap();
    let addr = server.local_addr().unwrap();
    // The listener thread runs until the test process exits.
    let _handle = server.spawn().unwrap();
    addr
}

fn full_request(grid: Grid, workers: usize, turns: u64) -> ShardRequest {
    let end = grid.width() - 1;
    ShardRequest {
        grid,
        workers,
        turns,
        start_column: 0,
        end_column: end,
    }
}

#[test]
fn remote_matches_local_engine() {
    let addr = start_server();
    let grid = random_grid(32, 24, 8, 0.35);

    let mut local = SimulationEngine::with_grid(grid.clone(), 2).unwrap();
    for _ in 0..10 {
        local.step();
    }

    let mut client = ShardClient::connect(addr).unwrap();
    let out = client.execute(&full_request(grid, 4, 10)).unwrap();
    assert_eq!(out.turns, 10);
    assert_eq!(&out.grid, local.grid());
}

#[test]
fn split_across_two_calls_per_turn() {
    // Two halves computed remotely and stitched together each turn
    // equal one full local step.
    let addr = start_server();
    let mut grid = Grid::new(20, 20).unwrap();
    place(&mut grid, &glider(), 7, 3);

    let mut left = ShardClient::connect(addr).unwrap();
    let mut right = ShardClient::connect(addr).unwrap();
    let mut local = SimulationEngine::with_grid(grid.clone(), 1).unwrap();

    for _ in 0..12 {
        let a = left
            .execute(&ShardRequest {
                grid: grid.clone(),
                workers: 2,
                turns: 1,
                start_column: 0,
                end_column: 9,
            })
            .unwrap();
        let b = right
            .execute(&ShardRequest {
                grid: grid.clone(),
                workers: 3,
                turns: 1,
                start_column: 10,
                end_column: 19,
            })
            .unwrap();
        let mut next = a.grid;
        next.copy_columns_from(&b.grid, 10..20);
        grid = next;
        local.step();
        assert_eq!(&grid, local.grid());
    }
}

#[test]
fn invalid_request_keeps_connection_open() {
    let addr = start_server();
    let mut client = ShardClient::connect(addr).unwrap();

    let mut bad = full_request(random_grid(8, 8, 3, 0.5), 2, 1);
    bad.end_column = 8;
    match client.execute(&bad) {
        Err(ShardError::Remote { status: code, message }) => {
            assert_eq!(code, status::INVALID_REQUEST);
            assert!(message.contains("partition"), "{message}");
        }
        other => panic!("expected remote error, got {other:?}"),
    }

    let mut zero = full_request(random_grid(8, 8, 3, 0.5), 0, 1);
    zero.end_column = 7;
    assert!(matches!(
        client.execute(&zero),
        Err(ShardError::Remote { .. })
    ));

    let ok = client.execute(&full_request(random_grid(8, 8, 3, 0.5), 2, 1));
    assert!(ok.is_ok());
}

#[test]
fn garbage_frame_closes_connection() {
    let addr = start_server();
    let mut raw = TcpStream::connect(addr).unwrap();
    raw.write_all(b"NOPE and then some").unwrap();
    raw.flush().unwrap();

    // The server drops the bad connection but keeps serving others.
    let mut client = ShardClient::connect(addr).unwrap();
    assert!(client
        .execute(&full_request(random_grid(4, 4, 1, 0.5), 1, 1))
        .is_ok());
    let mut buf = [0u8; 1];
    assert_eq!(raw.read(&mut buf).unwrap_or(0), 0);
}

#[test]
fn concurrent_clients_are_independent() {
    let addr = start_server();
    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            thread::spawn(move || {
                let grid = random_grid(16, 16, seed, 0.4);
                let mut local = SimulationEngine::with_grid(grid.clone(), 1).unwrap();
                for _ in 0..5 {
                    local.step();
                }
                let mut client = ShardClient::connect(addr).unwrap();
                let out = client.execute(&full_request(grid, 3, 5)).unwrap();
                assert_eq!(&out.grid, local.grid());
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
}

#[test]
fn grid_error_is_reported_by_server() {
    // A mismatched pixel payload is caught by the server's decoder.
    let addr = start_server();
    let mut raw = TcpStream::connect(addr).unwrap();
    let mut frame = Vec::new();
    frame.extend_from_slice(b"LGSH");
    frame.push(lifegrid_shard::PROTOCOL_VERSION);
    for v in [4u32, 4, 1] {
        frame.extend_from_slice(&v.to_le_bytes());
    }
    frame.extend_from_slice(&1u64.to_le_bytes());
    for v in [0u32, 3, 3] {
        frame.extend_from_slice(&v.to_le_bytes());
    }
    frame.extend_from_slice(&[0, 0, 0]);
    raw.write_all(&frame).unwrap();

    let mut reader = std::io::BufReader::new(raw);
    let err = lifegrid_shard::codec::read_response(&mut reader, 4, 4).unwrap_err();
    let expected = ShardError::Grid(GridError::PixelCountMismatch {
        expected: 16,
        found: 3,
    })
    .to_string();
    assert!(matches!(
        err,
        ShardError::Remote { ref message, .. } if *message == expected
    ));
}

#[test]
fn oversized_dimensions_get_error_response() {
    let addr = start_server();
    let mut raw = TcpStream::connect(addr).unwrap();
    let mut frame = Vec::new();
    frame.extend_from_slice(b"LGSH");
    frame.push(lifegrid_shard::PROTOCOL_VERSION);
    for v in [1u32 << 31, 1 << 31, 1] {
        frame.extend_from_slice(&v.to_le_bytes());
    }
    frame.extend_from_slice(&1u64.to_le_bytes());
    for v in [0u32, 0, 0] {
        frame.extend_from_slice(&v.to_le_bytes());
    }
    raw.write_all(&frame).unwrap();

    let mut reader = std::io::BufReader::new(raw);
    let err = lifegrid_shard::codec::read_response(&mut reader, 1, 1).unwrap_err();
    assert!(matches!(
        err,
        ShardError::Remote { status: code, ref message }
            if code == status::INVALID_REQUEST && message.contains("cells")
    ));

    // The process survived and still serves new clients.
    let mut client = ShardClient::connect(addr).unwrap();
    assert!(client
        .execute(&full_request(random_grid(4, 4, 2, 0.5), 1, 1))
        .is_ok());
}
