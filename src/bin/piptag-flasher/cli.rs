use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "piptag-flasher")]
#[command(about = "Patch per-tag ids and calibration into PIP firmware, then flash via mspdebug")]
#[command(version)]
pub struct Cli {
    /// Template binary image (CCS build output) carrying the placeholder words.
    pub pip_image: PathBuf,

    /// CSV calibration table with `id,slope,offset` rows.
    pub temp_file: PathBuf,

    /// First PIP id to flash.
    pub start: u32,

    /// Last PIP id to flash (inclusive).
    pub end: u32,

    /// Binary patch tool.
    #[arg(long, default_value = "bbe")]
    pub bbe: PathBuf,

    /// Float helper: prints the 8-hex-digit IEEE-754 encoding of its argument.
    #[arg(long, default_value = "./fc")]
    pub float_helper: PathBuf,

    /// Device programmer.
    #[arg(long, default_value = "mspdebug")]
    pub mspdebug: PathBuf,

    /// mspdebug driver.
    #[arg(long, default_value = "rf2500")]
    pub driver: String,

    /// Directory for scratch images (default: current directory).
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// Keep scratch images after a successful flash.
    #[arg(long)]
    pub keep_artifacts: bool,

    /// Emit JSON line events to stdout. Prompts become `prompt`/`await_retry`
    /// events; answers are still read from stdin.
    #[arg(long)]
    pub json: bool,

    /// Include monotonic timestamps in JSON events (milliseconds since process start).
    #[arg(long, requires = "json")]
    pub json_timestamps: bool,

    /// More output.
    #[arg(long, short)]
    pub verbose: bool,
}

/// Printed to stdout on any malformed invocation.
pub fn print_usage() {
    println!("Parameters: PIP_IMAGE TEMP_FILE START END");
    println!("  PIP_IMAGE - Binary output file from CCS");
    println!("  TEMP_FILE - CSV containing temperature data");
    println!("  START - First PIP ID");
    println!("  END - Last PIP ID");
}
