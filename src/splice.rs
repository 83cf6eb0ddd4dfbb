use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::SpliceConfig;
use crate::file::{self, FileError};
use crate::range::{LineRange, RangeError, RangePolicy};

/// Lines produced by an in-memory splice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceOutcome {
    /// Prefix, inserted block, suffix
    pub lines: Vec<String>,
    /// Original lines that were dropped
    pub removed_count: usize,
    /// Lines the inserted block spans
    pub inserted_count: usize,
}

/// Result of splicing a file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceReport {
    /// File that was rewritten
    pub path: PathBuf,
    /// Where the original bytes were copied
    pub backup_path: PathBuf,
    /// Requested range
    pub range: LineRange,
    /// Line count before the splice
    pub original_line_count: usize,
    pub removed_count: usize,
    pub inserted_count: usize,
    /// Checksum of the original (and therefore of the backup)
    pub original_checksum: String,
    /// Checksum of the rewritten file
    pub new_checksum: String,
    /// Byte length change (positive = content grew, negative = shrank)
    pub byte_shift: i64,
}

/// Error types for splice operations
#[derive(Debug)]
pub enum SpliceError {
    /// Reading the target failed
    File(FileError),
    /// Line range rejected
    Range(RangeError),
    /// File content does not match the expected checksum
    ChecksumMismatch {
        expected: String,
        actual: String,
    },
    /// Copying the original to its backup location failed
    Backup {
        backup_path: PathBuf,
        error: String,
    },
    /// Writing the spliced content failed after the backup was taken
    Write {
        path: PathBuf,
        backup_path: PathBuf,
        error: String,
    },
}

impl std::fmt::Display for SpliceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpliceError::File(e) => write!(f, "{}", e),
            SpliceError::Range(e) => write!(f, "{}", e),
            SpliceError::ChecksumMismatch { expected, actual } => {
                write!(f, "Checksum mismatch: expected {}, got {}", expected, actual)
            }
            SpliceError::Backup { backup_path, error } => {
                write!(f, "Failed to create backup '{}': {}", backup_path.display(), error)
            }
            SpliceError::Write { path, backup_path, error } => write!(
                f,
                "Failed to write '{}': {} (original content is in '{}')",
                path.display(),
                error,
                backup_path.display()
            ),
        }
    }
}

impl std::error::Error for SpliceError {}

impl From<FileError> for SpliceError {
    fn from(err: FileError) -> Self {
        SpliceError::File(err)
    }
}

impl From<RangeError> for SpliceError {
    fn from(err: RangeError) -> Self {
        SpliceError::Range(err)
    }
}

/// Line terminator of a document: that of its first terminated line, `\n` if none
pub fn document_newline(lines: &[String]) -> &str {
    lines
        .iter()
        .map(|line| file::line_terminator(line))
        .find(|terminator| !terminator.is_empty())
        .unwrap_or("\n")
}

/// The text actually inserted: the replacement followed by one newline
///
/// Every line end inside the replacement is rewritten to `newline`, so the
/// block matches the document it lands in.
///
/// # Example
/// ```
/// use line_splice::inserted_block;
/// assert_eq!(inserted_block("X\n", "\n"), "X\n\n");
/// assert_eq!(inserted_block("X\nY", "\r\n"), "X\r\nY\r\n");
/// ```
pub fn inserted_block(replacement: &str, newline: &str) -> String {
    let mut block = String::with_capacity(replacement.len() + newline.len());
    for line in file::split_lines(replacement) {
        let terminator = file::line_terminator(&line);
        block.push_str(&line[..line.len() - terminator.len()]);
        if !terminator.is_empty() {
            block.push_str(newline);
        }
    }
    block.push_str(newline);
    block
}

/// Replace a 1-based inclusive line range with a replacement block
///
/// The result is `lines[..start_line - 1]`, then the replacement plus one
/// newline as a single entry, then `lines[end_line..]`. The block uses the
/// document's own terminator (see [`document_newline`]). How bounds outside
/// the document behave depends on `policy`, see [`LineRange::slice_bounds`].
///
/// # Arguments
/// * `lines` - Document lines, terminators attached
/// * `range` - Lines to remove
/// * `replacement` - Text to insert
/// * `policy` - Out-of-range handling
///
/// # Returns
/// * `Ok(SpliceOutcome)` - New lines and counts
/// * `Err(RangeError)` - Range rejected by the policy
pub fn splice_lines(
    lines: &[String],
    range: LineRange,
    replacement: &str,
    policy: RangePolicy,
) -> Result<SpliceOutcome, RangeError> {
    let bounds = range.slice_bounds(lines.len(), policy)?;
    let block = inserted_block(replacement, document_newline(lines));
    let inserted_count = file::split_lines(&block).len();

    let prefix = &lines[..bounds.prefix_end];
    let suffix = &lines[bounds.suffix_start..];

    let mut spliced = Vec::with_capacity(prefix.len() + 1 + suffix.len());
    spliced.extend_from_slice(prefix);
    spliced.push(block);
    spliced.extend_from_slice(suffix);

    Ok(SpliceOutcome {
        lines: spliced,
        removed_count: bounds.removed_count(),
        inserted_count,
    })
}

/// Verify that content matches the expected checksum
///
/// # Returns
/// * `Ok(())` if checksums match
/// * `Err(SpliceError::ChecksumMismatch)` if they don't
pub fn verify_checksum(actual: &str, expected: &str) -> Result<(), SpliceError> {
    if actual.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(SpliceError::ChecksumMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

/// Splice the file named by `config` in place
///
/// This function:
/// 1. Reads the target and splits it into lines
/// 2. Checks the optional expected checksum
/// 3. Computes the spliced lines in memory
/// 4. Copies the original to `<path>.bak` (first commit point)
/// 5. Overwrites the original (second commit point)
///
/// Nothing touches the disk before step 4, so read, checksum and range
/// failures leave both the target and any previous backup as they were. If
/// step 5 fails the target may be truncated and the backup is the only
/// copy of the original.
///
/// The run is not idempotent: a second run on the rewritten file removes
/// whatever now sits at the same line numbers. Concurrent runs against the
/// same file are unsupported; there is no locking.
///
/// # Returns
/// * `Ok(SpliceReport)` - What was changed
/// * `Err(SpliceError)` - The step that failed
pub fn splice_file(config: &SpliceConfig) -> Result<SpliceReport, SpliceError> {
    splice_file_with(config, |path, lines| file::write_lines(path, lines))
}

/// [`splice_file`] with the final write step supplied by the caller
fn splice_file_with<W>(config: &SpliceConfig, write: W) -> Result<SpliceReport, SpliceError>
where
    W: FnOnce(&Path, &[String]) -> io::Result<()>,
{
    let range = config.range();
    debug!(path = %config.target_path.display(), %range, "reading target");

    let original = file::read_file(&config.target_path)?;
    debug!(
        lines = original.line_count(),
        bytes = original.len,
        checksum = %original.checksum,
        "target loaded"
    );

    if let Some(expected) = &config.expected_checksum {
        verify_checksum(&original.checksum, expected)?;
    }

    let outcome = splice_lines(
        &original.lines,
        range,
        &config.replacement,
        config.range_policy,
    )?;

    if outcome.removed_count == 0 {
        warn!(%range, lines = original.line_count(), "range removes no lines");
    } else if range.end_line > original.line_count() {
        warn!(%range, lines = original.line_count(), "range extends past end of file");
    }

    let backup_path = file::create_backup(&original.path).map_err(|e| SpliceError::Backup {
        backup_path: file::backup_path(&original.path),
        error: e.to_string(),
    })?;
    info!(backup = %backup_path.display(), "backup written");

    write(&original.path, &outcome.lines).map_err(|e| SpliceError::Write {
        path: original.path.clone(),
        backup_path: backup_path.clone(),
        error: e.to_string(),
    })?;

    let new_content = outcome.lines.concat();
    let new_checksum = file::checksum(new_content.as_bytes());
    let byte_shift = new_content.len() as i64 - original.len as i64;

    info!(
        path = %original.path.display(),
        removed = outcome.removed_count,
        inserted = outcome.inserted_count,
        byte_shift,
        "splice written"
    );

    Ok(SpliceReport {
        path: original.path,
        backup_path,
        range,
        original_line_count: original.lines.len(),
        removed_count: outcome.removed_count,
        inserted_count: outcome.inserted_count,
        original_checksum: original.checksum,
        new_checksum,
        byte_shift,
    })
}
