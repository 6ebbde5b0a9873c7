//! Binary encode/decode for shard requests and responses.
//!
//! All integers are little-endian. Byte arrays and strings are
//! length-prefixed with a `u32` length. Pixels are row-major, 255 for
//! alive and 0 for dead.
//!
//! ```text
//! request:  "LGSH" ver:u8 width:u32 height:u32 workers:u32 turns:u64
//!           start:u32 end:u32 pixels:bytes
//! response: "LGSH" ver:u8 status:u8 turns:u64 (pixels:bytes | message:str)
//! ```

use std::io::{self, Read, Write};

use lifegrid_core::Grid;

use crate::error::ShardError;
use crate::service::{ShardRequest, ShardResponse};
use crate::{status, MAGIC, MAX_CELLS, MAX_TURNS, MAX_WORKERS, PROTOCOL_VERSION};

// ── Primitive writers ───────────────────────────────────────────

/// Write a single byte.
pub fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), ShardError> {
    w.write_all(&[v])?;
    Ok(())
}

/// Write a little-endian u32.
pub fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), ShardError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian u64.
pub fn write_u64_le(w: &mut dyn Write, v: u64) -> Result<(), ShardError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a length-prefixed byte array (u32 length + bytes).
pub fn write_length_prefixed_bytes(w: &mut dyn Write, b: &[u8]) -> Result<(), ShardError> {
    let len = u32::try_from(b.len()).map_err(|_| ShardError::Malformed {
        detail: format!("byte array of {} bytes exceeds u32 length", b.len()),
    })?;
    write_u32_le(w, len)?;
    w.write_all(b)?;
    Ok(())
}

/// Write a length-prefixed UTF-8 string.
pub fn write_length_prefixed_str(w: &mut dyn Write, s: &str) -> Result<(), ShardError> {
    write_length_prefixed_bytes(w, s.as_bytes())
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a single byte.
pub fn read_u8(r: &mut dyn Read) -> Result<u8, ShardError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a little-endian u32.
pub fn read_u32_le(r: &mut dyn Read) -> Result<u32, ShardError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read a little-endian u64.
pub fn read_u64_le(r: &mut dyn Read) -> Result<u64, ShardError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Read a length-prefixed UTF-8 string of at most `max` bytes.
pub fn read_length_prefixed_str(r: &mut dyn Read, max: usize) -> Result<String, ShardError> {
    let len = read_u32_le(r)? as usize;
    if len > max {
        return Err(ShardError::Malformed {
            detail: format!("string length {len} exceeds {max}"),
        });
    }
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    String::from_utf8(buf).map_err(|e| ShardError::Malformed {
        detail: format!("invalid UTF-8 string: {e}"),
    })
}

/// Longest error message a response may carry.
const MAX_MESSAGE_LEN: usize = 64 * 1024;

// ── Header ──────────────────────────────────────────────────────

fn write_header(w: &mut dyn Write) -> Result<(), ShardError> {
    w.write_all(&MAGIC)?;
    write_u8(w, PROTOCOL_VERSION)
}

fn check_header_rest(r: &mut dyn Read, first: u8) -> Result<(), ShardError> {
    let mut rest = [0u8; 3];
    r.read_exact(&mut rest)?;
    if [first, rest[0], rest[1], rest[2]] != MAGIC {
        return Err(ShardError::InvalidMagic);
    }
    let version = read_u8(r)?;
    if version != PROTOCOL_VERSION {
        return Err(ShardError::UnsupportedVersion { found: version });
    }
    Ok(())
}

/// Read the first byte of a frame, or `None` on a clean end of stream.
fn read_frame_start(r: &mut dyn Read) -> Result<Option<u8>, ShardError> {
    let mut buf = [0u8; 1];
    loop {
        match r.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

// ── Requests ────────────────────────────────────────────────────

/// Encode a request frame.
pub fn write_request(w: &mut dyn Write, req: &ShardRequest) -> Result<(), ShardError> {
    let workers = u32::try_from(req.workers).map_err(|_| ShardError::LimitExceeded {
        what: "workers",
        value: req.workers as u64,
        max: u32::MAX as u64,
    })?;
    write_header(w)?;
    write_u32_le(w, req.grid.width())?;
    write_u32_le(w, req.grid.height())?;
    write_u32_le(w, workers)?;
    write_u64_le(w, req.turns)?;
    write_u32_le(w, req.start_column)?;
    write_u32_le(w, req.end_column)?;
    write_length_prefixed_bytes(w, &req.grid.to_pixels())
}

/// Decode a request frame.
///
/// Returns `Ok(None)` if the stream ends cleanly before a frame starts.
/// When a frame is fully consumed but describes an invalid request, the
/// error satisfies [`ShardError::is_invalid_request`] and the stream is
/// positioned at the next frame.
pub fn read_request(r: &mut dyn Read) -> Result<Option<ShardRequest>, ShardError> {
    let Some(first) = read_frame_start(r)? else {
        return Ok(None);
    };
    check_header_rest(r, first)?;
    let width = read_u32_le(r)?;
    let height = read_u32_le(r)?;
    let workers = read_u32_le(r)?;
    let turns = read_u64_le(r)?;
    let start_column = read_u32_le(r)?;
    let end_column = read_u32_le(r)?;
    let len = read_u32_le(r)? as u64;

    if len > MAX_CELLS {
        return Err(ShardError::Malformed {
            detail: format!("pixel payload of {len} bytes exceeds {MAX_CELLS}"),
        });
    }
    let mut pixels = vec![0u8; len as usize];
    r.read_exact(&mut pixels)?;

    let cells = width as u64 * height as u64;
    if cells > MAX_CELLS {
        return Err(ShardError::LimitExceeded {
            what: "cells",
            value: cells,
            max: MAX_CELLS,
        });
    }
    if workers > MAX_WORKERS {
        return Err(ShardError::LimitExceeded {
            what: "workers",
            value: workers as u64,
            max: MAX_WORKERS as u64,
        });
    }
    if turns > MAX_TURNS {
        return Err(ShardError::LimitExceeded {
            what: "turns",
            value: turns,
            max: MAX_TURNS,
        });
    }
    let grid = Grid::from_pixels(width, height, &pixels)?;
    Ok(Some(ShardRequest {
        grid,
        workers: workers as usize,
        turns,
        start_column,
        end_column,
    }))
}

// ── Responses ───────────────────────────────────────────────────

/// Encode a successful response.
pub fn write_response(w: &mut dyn Write, resp: &ShardResponse) -> Result<(), ShardError> {
    write_header(w)?;
    write_u8(w, status::OK)?;
    write_u64_le(w, resp.turns)?;
    write_length_prefixed_bytes(w, &resp.grid.to_pixels())
}

/// Encode an error response carrying a non-zero `code`.
pub fn write_error_response(w: &mut dyn Write, code: u8, message: &str) -> Result<(), ShardError> {
    debug_assert_ne!(code, status::OK);
    let mut message = message;
    if message.len() > MAX_MESSAGE_LEN {
        let mut end = MAX_MESSAGE_LEN;
        while !message.is_char_boundary(end) {
            end -= 1;
        }
        message = &message[..end];
    }
    write_header(w)?;
    write_u8(w, code)?;
    write_u64_le(w, 0)?;
    write_length_prefixed_str(w, message)
}

/// Decode a response to a request for a `width x height` grid.
///
/// A non-zero status is returned as [`ShardError::Remote`].
pub fn read_response(r: &mut dyn Read, width: u32, height: u32) -> Result<ShardResponse, ShardError> {
    let first = read_frame_start(r)?.ok_or_else(|| {
        ShardError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "connection closed before response",
        ))
    })?;
    check_header_rest(r, first)?;
    let code = read_u8(r)?;
    let turns = read_u64_le(r)?;
    if code != status::OK {
        let message = read_length_prefixed_str(r, MAX_MESSAGE_LEN)?;
        return Err(ShardError::Remote {
            status: code,
            message,
        });
    }
    let len = read_u32_le(r)? as u64;
    let expected = width as u64 * height as u64;
    if len != expected {
        return Err(ShardError::Malformed {
            detail: format!("response carries {len} pixels, expected {expected}"),
        });
    }
    let mut pixels = vec![0u8; len as usize];
    r.read_exact(&mut pixels)?;
    let grid = Grid::from_pixels(width, height, &pixels).map_err(|e| ShardError::Malformed {
        detail: e.to_string(),
    })?;
    Ok(ShardResponse { grid, turns })
}
