//! Grid load/save drivers.
//!
//! [`GridStore`] is the seam to whatever persists images. Images are
//! row-major pixel buffers where 255 is alive and 0 is dead. Names follow
//! `"{height}x{width}"` for the initial image and
//! `"{height}x{width}x{turn}"` for snapshots.
//!
//! Failures are returned to the caller; no driver retries internally.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use lifegrid_core::{Grid, GridError};

// ── StoreError ─────────────────────────────────────────────────────

/// Errors from loading or saving images.
#[derive(Debug)]
pub enum StoreError {
    /// An I/O error from the underlying medium.
    Io(io::Error),
    /// No image exists under the requested name.
    NotFound {
        /// The requested name.
        name: String,
    },
    /// The stored image could not be decoded.
    Malformed {
        /// The image name.
        name: String,
        /// What went wrong.
        detail: String,
    },
    /// The pixels do not describe a grid of the expected size.
    Grid(GridError),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::NotFound { name } => write!(f, "image '{name}' not found"),
            Self::Malformed { name, detail } => write!(f, "image '{name}' malformed: {detail}"),
            Self::Grid(e) => write!(f, "grid: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<GridError> for StoreError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

// ── GridStore ──────────────────────────────────────────────────────

/// Persistence driver for grid images.
pub trait GridStore: Send {
    /// Load the pixels stored under `name`.
    fn load(&mut self, name: &str) -> Result<Vec<u8>, StoreError>;

    /// Store a `width x height` image under `name`.
    fn save(&mut self, name: &str, width: u32, height: u32, pixels: &[u8])
        -> Result<(), StoreError>;

    /// Block until every previous save is durable.
    fn wait_idle(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Name of the initial image for a grid.
pub fn initial_name(width: u32, height: u32) -> String {
    format!("{height}x{width}")
}

/// Name of the snapshot taken at `turn`.
pub fn snapshot_name(width: u32, height: u32, turn: u64) -> String {
    format!("{height}x{width}x{turn}")
}

/// Load the initial image for a `width x height` grid.
pub fn load_initial(
    store: &mut dyn GridStore,
    width: u32,
    height: u32,
) -> Result<Grid, StoreError> {
    let pixels = store.load(&initial_name(width, height))?;
    Ok(Grid::from_pixels(width, height, &pixels)?)
}

/// Save `grid` as the snapshot for `turn`, returning the name used.
pub fn save_snapshot(
    store: &mut dyn GridStore,
    grid: &Grid,
    turn: u64,
) -> Result<String, StoreError> {
    let name = snapshot_name(grid.width(), grid.height(), turn);
    store.save(&name, grid.width(), grid.height(), &grid.to_pixels())?;
    Ok(name)
}

// ── MemoryStore ────────────────────────────────────────────────────

/// In-memory image map.
///
/// Clones share the same map, so a caller can keep a handle while the
/// scheduler owns another.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    images: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an image.
    pub fn insert(&self, name: impl Into<String>, pixels: Vec<u8>) {
        self.lock().insert(name.into(), pixels);
    }

    /// Copy of the image stored under `name`, if any.
    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.lock().get(name).cloned()
    }

    /// All stored names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().keys().cloned().collect();
        names.sort();
        names
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.images.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl GridStore for MemoryStore {
    fn load(&mut self, name: &str) -> Result<Vec<u8>, StoreError> {
        self.get(name).ok_or_else(|| StoreError::NotFound {
            name: name.to_string(),
        })
    }

    fn save(
        &mut self,
        name: &str,
        _width: u32,
        _height: u32,
        pixels: &[u8],
    ) -> Result<(), StoreError> {
        self.insert(name, pixels.to_vec());
        Ok(())
    }
}

// ── PgmStore ───────────────────────────────────────────────────────

/// Binary PGM (`P5`, maxval 255) files, one per image, stored as
/// `{dir}/{name}.pgm`.
#[derive(Clone, Debug)]
pub struct PgmStore {
    dir: PathBuf,
}

impl PgmStore {
    /// Store images under `dir`. The directory is not created.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the images.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.pgm"))
    }
}

impl GridStore for PgmStore {
    fn load(&mut self, name: &str) -> Result<Vec<u8>, StoreError> {
        let bytes = fs::read(self.path(name)).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound {
                name: name.to_string(),
            },
            _ => StoreError::Io(e),
        })?;
        decode_pgm(&bytes).map_err(|detail| StoreError::Malformed {
            name: name.to_string(),
            detail,
        })
    }

    fn save(
        &mut self,
        name: &str,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<(), StoreError> {
        let mut out = format!("P5\n{width} {height}\n255\n").into_bytes();
        out.extend_from_slice(pixels);
        fs::write(self.path(name), out)?;
        Ok(())
    }
}

/// Decode a binary PGM, returning its pixels.
fn decode_pgm(bytes: &[u8]) -> Result<Vec<u8>, String> {
    if !bytes.starts_with(b"P5") {
        return Err("missing P5 magic".into());
    }
    let mut pos = 2;
    let mut header = [0u64; 3];
    for value in header.iter_mut() {
        // Whitespace and `#` comments may precede each header field.
        loop {
            match bytes.get(pos) {
                Some(b) if b.is_ascii_whitespace() => pos += 1,
                Some(b'#') => {
                    while bytes.get(pos).is_some_and(|&b| b != b'\n') {
                        pos += 1;
                    }
                }
                _ => break,
            }
        }
        let digits_start = pos;
        while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
            pos += 1;
        }
        if pos == digits_start {
            return Err(format!("expected header number at byte {pos}"));
        }
        let text = std::str::from_utf8(&bytes[digits_start..pos]).map_err(|e| e.to_string())?;
        *value = text.parse().map_err(|e| format!("header number {text:?}: {e}"))?;
    }
    let [width, height, maxval] = header;
    if maxval != 255 {
        return Err(format!("unsupported maxval {maxval}"));
    }
    if !bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
        return Err("missing whitespace after header".into());
    }
    let data = &bytes[pos + 1..];
    let expected = width.saturating_mul(height);
    if data.len() as u64 != expected {
        return Err(format!(
            "expected {expected} pixels for {width}x{height}, found {}",
            data.len()
        ));
    }
    Ok(data.to_vec())
}
