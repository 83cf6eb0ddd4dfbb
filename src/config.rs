use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::range::{LineRange, RangePolicy};

/// Target of the built-in splice
pub const DEFAULT_TARGET_PATH: &str = "d:/AI_Autmation/mandanten-portal/server/server.js";

/// First line replaced by the built-in splice
pub const DEFAULT_START_LINE: usize = 4001;

/// Last line replaced by the built-in splice
pub const DEFAULT_END_LINE: usize = 5060;

/// Block inserted by the built-in splice (trailing spaces are part of it)
pub const DEFAULT_REPLACEMENT: &str = concat!(
    "\n",
    "// Test & Simulation Routes\n",
    "const createAdminTestRouter = require('./routes/admin-test');\n",
    "app.use('/api', createAdminTestRouter({ \n",
    "  clientsData, \n",
    "  debtAmountExtractor, \n",
    "  creditorContactService, \n",
    "  garnishmentCalculator,\n",
    "  testDataService\n",
    "}));\n",
);

/// What the confirmation message says the range was replaced with
pub const DEFAULT_LABEL: &str = "new router mount";

/// Everything one splice run needs
///
/// Every field has a default, so a JSON config only has to name what it
/// changes. Unknown keys are rejected so a misspelled field cannot fall
/// back to the built-in range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpliceConfig {
    /// File to splice
    pub target_path: PathBuf,
    /// First line to remove (1-indexed)
    pub start_line: usize,
    /// Last line to remove (1-indexed, inclusive)
    pub end_line: usize,
    /// Text inserted in place of the removed lines
    pub replacement: String,
    /// Used in the confirmation message
    pub label: String,
    /// Out-of-range handling
    pub range_policy: RangePolicy,
    /// BLAKE3 checksum the file must have before the splice (hex-encoded)
    pub expected_checksum: Option<String>,
}

impl Default for SpliceConfig {
    fn default() -> Self {
        Self {
            target_path: PathBuf::from(DEFAULT_TARGET_PATH),
            start_line: DEFAULT_START_LINE,
            end_line: DEFAULT_END_LINE,
            replacement: DEFAULT_REPLACEMENT.to_string(),
            label: DEFAULT_LABEL.to_string(),
            range_policy: RangePolicy::default(),
            expected_checksum: None,
        }
    }
}

impl SpliceConfig {
    pub fn range(&self) -> LineRange {
        LineRange::new(self.start_line, self.end_line)
    }

    /// The line printed after a successful run
    ///
    /// # Example
    /// ```
    /// use line_splice::SpliceConfig;
    /// assert_eq!(
    ///     SpliceConfig::default().success_message(),
    ///     "Successfully replaced lines 4001-5060 with new router mount."
    /// );
    /// ```
    pub fn success_message(&self) -> String {
        format!(
            "Successfully replaced lines {}-{} with {}.",
            self.start_line, self.end_line, self.label
        )
    }
}

/// Error types for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    Io { source: String, error: String },
    Parse { source: String, error: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { source, error } => {
                write!(f, "Failed to read config '{}': {}", source, error)
            }
            ConfigError::Parse { source, error } => {
                write!(f, "Invalid config '{}': {}", source, error)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse a JSON config, filling omitted fields from the defaults
pub fn parse_config(json: &str, source: &str) -> Result<SpliceConfig, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::Parse {
        source: source.to_string(),
        error: e.to_string(),
    })
}

/// Load a JSON config from a file, or from stdin when `path` is `-`
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SpliceConfig, ConfigError> {
    let path_ref = path.as_ref();
    let source = path_ref.display().to_string();

    let io_err = |e: io::Error| ConfigError::Io {
        source: source.clone(),
        error: e.to_string(),
    };

    let json = if path_ref == Path::new("-") {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).map_err(io_err)?;
        buffer
    } else {
        fs::read_to_string(path_ref).map_err(io_err)?
    };

    parse_config(&json, &source)
}
