//! Host introspection: core count and L1 data cache size.

use std::fs;
use std::path::Path;
use std::thread;

use matrix_mul::block_size_from_hint;
use tracing::debug;

const SYSFS_CACHE_DIR: &str = "/sys/devices/system/cpu/cpu0/cache";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareInfo {
    pub logical_cores: usize,
    /// L1 data cache in bytes, if it could be read.
    pub l1_data_cache: Option<usize>,
}

impl HardwareInfo {
    pub fn detect() -> Self {
        let logical_cores = thread::available_parallelism().map_or(1, |n| n.get());
        let l1_data_cache = read_l1_data_cache(Path::new(SYSFS_CACHE_DIR));
        debug!(logical_cores, ?l1_data_cache, "hardware detected");
        Self {
            logical_cores,
            l1_data_cache,
        }
    }

    /// Tile edge such that one tile each of A, B and C fits in L1 together,
    /// clamped to the engine's accepted range.
    pub fn optimal_block_size(&self) -> usize {
        block_size_from_hint(self.l1_data_cache.map(block_edge_for_cache))
    }
}

/// `sqrt(cache_bytes / (3 * size_of::<f64>()))`.
pub fn block_edge_for_cache(cache_bytes: usize) -> usize {
    let elements = cache_bytes as f64 / (3 * std::mem::size_of::<f64>()) as f64;
    elements.sqrt() as usize
}

/// Parses sysfs cache sizes such as `32K`, `1M` or `48`. A bare number is
/// taken as KiB, which is what sysfs reports.
pub fn parse_cache_size(raw: &str) -> Option<usize> {
    let raw = raw.trim();
    let digits_end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    let value: usize = raw[..digits_end].parse().ok()?;
    let multiplier = match raw[digits_end..].trim() {
        "" | "K" | "KB" => 1024,
        "M" | "MB" => 1024 * 1024,
        "G" | "GB" => 1024 * 1024 * 1024,
        _ => return None,
    };
    Some(value * multiplier)
}

/// Looks through `cache_dir/index*` for the level-1 data (or unified) cache.
fn read_l1_data_cache(cache_dir: &Path) -> Option<usize> {
    let entries = fs::read_dir(cache_dir).ok()?;
    for entry in entries.flatten() {
        let name = entry.file_name();
        if !name.to_string_lossy().starts_with("index") {
            continue;
        }
        let dir = entry.path();
        let level = fs::read_to_string(dir.join("level")).ok();
        let kind = fs::read_to_string(dir.join("type")).ok();
        let is_l1_data = level.as_deref().map(str::trim) == Some("1")
            && matches!(kind.as_deref().map(str::trim), Some("Data") | Some("Unified"));
        if !is_l1_data {
            continue;
        }
        match fs::read_to_string(dir.join("size")).ok().as_deref().and_then(parse_cache_size) {
            Some(bytes) => return Some(bytes),
            None => debug!(index = %dir.display(), "unreadable L1 data cache size"),
        }
    }
    None
}
