//! Durable primary→fallback append.
//!
//! Each call opens the target fresh in append mode and writes the complete
//! line (terminator included) with one write call, so concurrent writers
//! targeting the same file never interleave within a line. There is no
//! locking, no retry, and no state kept between calls; a request either
//! lands one whole line in the primary, one whole line in the fallback, or
//! nothing at all.

use portalog_core::{PortalogError, SinkConfig};
use std::fs::{DirBuilder, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// Terminal `Done` payload of an append: which location took the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Primary,
    Fallback,
}

/// Append one serialized record line to the profile's primary path, falling
/// back to its fallback path.
///
/// No separate writability precheck: an unwritable file, an unwritable
/// parent, or a missing parent all fail the primary open and select the
/// fallback. The fallback's parent directory is created owner-only (`0700`
/// on Unix) when missing. A fallback failure is terminal; both attempt
/// errors come back in [`PortalogError::WriteFailure`].
pub fn append_line(cfg: &SinkConfig, line: &str) -> Result<Destination, PortalogError> {
    let primary_err = match try_append(&cfg.primary_path, line) {
        Ok(()) => return Ok(Destination::Primary),
        Err(e) => e,
    };
    debug!(
        path = %cfg.primary_path.display(),
        error = %primary_err,
        "Primary append unavailable, trying fallback"
    );

    let fallback_err = match ensure_parent_dir(&cfg.fallback_path) {
        Ok(()) => match try_append(&cfg.fallback_path, line) {
            Ok(()) => return Ok(Destination::Fallback),
            Err(e) => e,
        },
        Err(e) => e,
    };

    Err(PortalogError::WriteFailure {
        primary: primary_err.to_string(),
        fallback: fallback_err.to_string(),
    })
}

/// Open `path` for append (creating it if absent) and write `line` plus the
/// terminator as a single write.
fn try_append(path: &Path, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut buf = Vec::with_capacity(line.len() + 1);
    buf.extend_from_slice(line.as_bytes());
    buf.push(b'\n');
    file.write_all(&buf)
}

/// Create the missing parent directory of `path`, owner-only on Unix.
fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    let Some(dir) = path.parent() else {
        return Ok(());
    };
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(dir)
}
