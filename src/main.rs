use clap::{ArgAction, Parser};
use line_splice::{
    RangePolicy, SpliceConfig, SpliceResponse, generate_execution_id, load_config,
    logging::init_logging, splice_file,
};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Replace a line range in a file with a fixed block, keeping a .bak copy
///
/// With no arguments the built-in splice runs unchanged.
#[derive(Parser, Debug)]
#[command(name = "line-splice")]
#[command(version = "0.1.0")]
#[command(about = "Replace a line range in a file, backing up the original", long_about = None)]
struct Args {
    /// JSON file with splice settings ("-" reads stdin)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// File to splice
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// First line to replace (1-indexed)
    #[arg(short, long)]
    start: Option<usize>,

    /// Last line to replace (1-indexed, inclusive)
    #[arg(short, long)]
    end: Option<usize>,

    /// Read the replacement block from this file
    #[arg(short, long)]
    replacement_file: Option<PathBuf>,

    /// Text naming the replacement in the confirmation message
    #[arg(short, long)]
    label: Option<String>,

    /// How ranges outside the file are handled
    #[arg(long, value_enum)]
    range_policy: Option<RangePolicy>,

    /// Shorthand for --range-policy strict
    #[arg(long, conflicts_with = "range_policy")]
    strict: bool,

    /// Refuse to splice unless the file has this BLAKE3 checksum
    #[arg(long)]
    expected_checksum: Option<String>,

    /// Output structured JSON instead of human-readable
    #[arg(short, long)]
    json: bool,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Layer command-line overrides over the config file and built-in defaults
fn build_config(args: &Args) -> Result<SpliceConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SpliceConfig::default(),
    };

    if let Some(file) = &args.file {
        config.target_path = file.clone();
    }
    if let Some(start) = args.start {
        config.start_line = start;
    }
    if let Some(end) = args.end {
        config.end_line = end;
    }
    if let Some(path) = &args.replacement_file {
        config.replacement = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read replacement '{}': {}", path.display(), e))?;
    }
    if let Some(label) = &args.label {
        config.label = label.clone();
    }
    if let Some(policy) = args.range_policy {
        config.range_policy = policy;
    }
    if args.strict {
        config.range_policy = RangePolicy::Strict;
    }
    if let Some(checksum) = &args.expected_checksum {
        config.expected_checksum = Some(checksum.clone());
    }

    Ok(config)
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let execution_id = generate_execution_id();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error reading configuration: {}", e);
            std::process::exit(1);
        }
    };
    debug!(execution_id = %execution_id, ?config, "configuration resolved");

    let response = match splice_file(&config) {
        Ok(report) => SpliceResponse::success(execution_id, &report, config.success_message()),
        Err(e) => SpliceResponse::failure(
            execution_id,
            config.target_path.display().to_string(),
            config.start_line,
            config.end_line,
            e.to_string(),
        ),
    };

    output_response(&response, args.json, args.output.as_ref());

    if !response.success {
        std::process::exit(1);
    }
}

/// Format and output the response
fn output_response(response: &SpliceResponse, json_mode: bool, output_path: Option<&PathBuf>) {
    let output = if json_mode {
        serde_json::to_string_pretty(response).unwrap_or_else(|_| {
            r#"{"error": "Failed to serialize response"}"#.to_string()
        })
    } else if response.success {
        response.message.clone().unwrap_or_default()
    } else {
        // Human-readable failures go to stderr only
        eprintln!("Error: {}", response.error.as_deref().unwrap_or("Unknown error"));
        return;
    };

    if let Some(path) = output_path {
        if let Err(e) = fs::write(path, &output) {
            eprintln!("Failed to write output to '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    } else {
        println!("{}", output);
    }
}
