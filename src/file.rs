use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Suffix appended to the full file name of a backup copy
pub const BACKUP_SUFFIX: &str = ".bak";

/// Content of a file read into memory, split into lines
#[derive(Debug, Clone)]
pub struct FileContent {
    /// Path the file was read from
    pub path: PathBuf,
    /// Lines in order, each keeping its original terminator
    pub lines: Vec<String>,
    /// Byte length of the content
    pub len: usize,
    /// BLAKE3 hash of the content (hex-encoded)
    pub checksum: String,
}

impl FileContent {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Error types for file operations
#[derive(Debug)]
pub enum FileError {
    NotFound(String),
    IoError(String),
    InvalidUtf8(String),
}

impl std::fmt::Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileError::NotFound(p) => write!(f, "File not found: {}", p),
            FileError::IoError(e) => write!(f, "I/O error: {}", e),
            FileError::InvalidUtf8(p) => write!(f, "Invalid UTF-8 in file: {}", p),
        }
    }
}

impl std::error::Error for FileError {}

impl From<io::Error> for FileError {
    fn from(err: io::Error) -> Self {
        FileError::IoError(err.to_string())
    }
}

/// Hex-encoded BLAKE3 digest of some bytes
pub fn checksum(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

/// Split text into lines, keeping `\n`, `\r\n` or lone `\r` terminators attached
///
/// A trailing line without terminator is kept as its own entry; empty input
/// yields no lines.
pub fn split_lines(content: &str) -> Vec<String> {
    let bytes = content.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(content[start..=i].to_string());
                start = i + 1;
            }
            b'\r' if bytes.get(i + 1) != Some(&b'\n') => {
                lines.push(content[start..=i].to_string());
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    if start < bytes.len() {
        lines.push(content[start..].to_string());
    }
    lines
}

/// The terminator a line ends with, or `""` for an unterminated last line
pub fn line_terminator(line: &str) -> &str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else if line.ends_with('\r') {
        "\r"
    } else {
        ""
    }
}

/// Read a file from disk with UTF-8 validation
///
/// # Arguments
/// * `path` - Path to the file to read
///
/// # Returns
/// * `Ok(FileContent)` - Lines of the file with metadata
/// * `Err(FileError)` - File not found, I/O error, or invalid UTF-8
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<FileContent, FileError> {
    let path_ref = path.as_ref();

    let bytes = match fs::read(path_ref) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(FileError::NotFound(path_ref.display().to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let checksum = checksum(&bytes);

    let content = String::from_utf8(bytes)
        .map_err(|_| FileError::InvalidUtf8(path_ref.display().to_string()))?;

    Ok(FileContent {
        path: path_ref.to_path_buf(),
        len: content.len(),
        lines: split_lines(&content),
        checksum,
    })
}

/// Path of the backup copy for `path`: the same path with `.bak` appended
///
/// # Example
/// ```
/// use line_splice::backup_path;
/// assert_eq!(backup_path("server/server.js").to_str(), Some("server/server.js.bak"));
/// ```
pub fn backup_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut name = path.as_ref().as_os_str().to_os_string();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Copy `path` byte-for-byte to its backup location, replacing any old backup
///
/// # Returns
/// * `Ok(PathBuf)` - Where the backup was written
/// * `Err(io::Error)` - The copy failed; the original is untouched
pub fn create_backup<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let target = backup_path(&path);
    fs::copy(path.as_ref(), &target)?;
    Ok(target)
}

/// Overwrite `path` with the concatenation of `lines`
pub fn write_lines<P: AsRef<Path>>(path: P, lines: &[String]) -> io::Result<()> {
    fs::write(path, lines.concat())
}
