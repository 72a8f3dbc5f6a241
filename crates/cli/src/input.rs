//! Command-line and stdin handling for the file list.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Prefetch these files.
    Files(Vec<String>),
    /// Read the file list from stdin, one path per line.
    Stdin,
    Help,
    Version,
}

pub const USAGE: &str = "\
Usage: objfs-prefetch [FILE]...
       objfs-prefetch - < file-list.txt

Asks objfsutil to prefetch FILEs (and their .metadata.json sidecars) in the
background. With no FILE, or when FILE is -, reads newline-separated paths
from stdin.

Environment:
  OBJFS_PREFETCH_CONFIG          path to a TOML config file
  OBJFS_PREFETCH_<KEY>           config overrides, nested keys split by __
  OBJFS_PREFETCH_PRINT_METRICS   print metrics to stderr on exit
  RUST_LOG                       log filter (default: info)";

/// Parses arguments, excluding the program name.
pub fn parse_args<I>(args: I) -> Request
where
    I: IntoIterator<Item = String>,
{
    let mut files = Vec::new();
    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Request::Help,
            "-V" | "--version" => return Request::Version,
            "-" => return Request::Stdin,
            _ => files.push(arg),
        }
    }

    if files.is_empty() {
        Request::Stdin
    } else {
        Request::Files(files)
    }
}

/// Reads one path per line, skipping blank lines.
pub async fn read_file_list<R>(reader: R) -> std::io::Result<Vec<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut files = Vec::new();
    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim_end_matches('\r');
        if !trimmed.trim().is_empty() {
            files.push(trimmed.to_string());
        }
    }
    Ok(files)
}
