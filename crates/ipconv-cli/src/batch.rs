//! Parallel batch conversion using Rayon
//!
//! Converts many `address/cidr` lines with:
//! - Configurable thread pool
//! - Individual error handling (a bad line never aborts the batch)
//! - Progress reporting
//! - Input order preserved in the output

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

use ipconv_cidr::{assemble, ConversionResult};
use ipconv_validator::parse_combined;

/// Number of CPU cores available
fn num_cpus_get() -> usize {
    num_cpus::get()
}

/// Batch processing result
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub input: String,
    pub result: Result<ConversionResult, String>,
}

/// Serializable view of a [`BatchResult`]
#[derive(Serialize)]
pub struct BatchRecord<'a> {
    pub input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<&'a ConversionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
}

impl BatchResult {
    pub fn record(&self) -> BatchRecord<'_> {
        BatchRecord {
            input: &self.input,
            result: self.result.as_ref().ok(),
            error: self.result.as_ref().err().map(String::as_str),
        }
    }
}

/// Batch processor with parallel execution
pub struct BatchProcessor {
    thread_pool: rayon::ThreadPool,
}

impl BatchProcessor {
    /// Create a new batch processor
    ///
    /// # Arguments
    ///
    /// * `num_threads` - Number of threads (default: CPU cores * 2)
    pub fn new(num_threads: Option<usize>) -> Result<Self> {
        let num_threads = num_threads.unwrap_or_else(|| num_cpus_get() * 2);

        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()?;

        Ok(Self { thread_pool })
    }

    /// Convert a batch of combined inputs in parallel
    ///
    /// # Arguments
    ///
    /// * `lines` - `address/cidr` strings (CIDR optional)
    pub fn process_lines(&self, lines: Vec<String>) -> Vec<BatchResult> {
        let total = lines.len();
        let processed = AtomicUsize::new(0);

        self.thread_pool.install(|| {
            lines
                .into_par_iter()
                .map(|line| {
                    let result = convert_line(&line);

                    let count = processed.fetch_add(1, Ordering::Relaxed) + 1;
                    if count % 1000 == 0 || count == total {
                        info!(processed = count, total, "batch progress");
                    }

                    BatchResult {
                        input: line,
                        result,
                    }
                })
                .collect()
        })
    }

    /// Get thread pool info
    pub fn thread_count(&self) -> usize {
        self.thread_pool.current_num_threads()
    }
}

/// Convert one combined input
fn convert_line(line: &str) -> Result<ConversionResult, String> {
    let input = parse_combined(line).map_err(|e| e.to_string())?;
    Ok(assemble(input.address, input.cidr))
}

/// Read batch input lines from a file, or stdin for `None` / `-`
///
/// Blank lines and `#` comments are skipped; surrounding whitespace is trimmed.
pub fn read_lines(path: Option<&str>) -> Result<Vec<String>> {
    match path {
        None | Some("-") => collect_lines(io::stdin().lock()),
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open {}", path))?;
            collect_lines(BufReader::new(file))
        }
    }
}

fn collect_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        lines.push(line.to_string());
    }
    Ok(lines)
}
