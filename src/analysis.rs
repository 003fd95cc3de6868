//! Current-value analysis shown before each tag is edited.
//!
//! Groups the batch by the values a tag currently holds so the user can see
//! how consistent a directory already is before deciding on a global edit.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::tags::{CanonicalTag, TrackHandle};

/// Placeholder bucket for files where a tag has no value.
pub const NOT_SET: &str = "[Not Set]";

/// value -> filenames holding it, per tag. `NOT_SET` collects the absent ones.
pub type TagDistribution = BTreeMap<String, Vec<String>>;

/// Read `tags` across all `files`, grouping filenames by current value.
///
/// Unreadable files are simply skipped here; the edit loop reports them
/// when it tries to write.
pub fn analyze_metadata(
    files: &[PathBuf],
    tags: &[CanonicalTag],
) -> BTreeMap<CanonicalTag, TagDistribution> {
    let mut map: BTreeMap<CanonicalTag, TagDistribution> = BTreeMap::new();

    for path in files {
        let handle = match TrackHandle::load(path) {
            Ok(h) => h,
            Err(_) => continue,
        };
        let filename = display_name(path);
        for &tag in tags {
            let value = handle.get(tag).unwrap_or_else(|| NOT_SET.to_string());
            map.entry(tag)
                .or_default()
                .entry(value)
                .or_default()
                .push(filename.clone());
        }
    }

    map
}

/// Buckets for one tag, sorted by value with `NOT_SET` last.
pub fn sorted_buckets(distribution: &TagDistribution) -> Vec<(&str, &[String])> {
    let mut buckets: Vec<(&str, &[String])> = distribution
        .iter()
        .map(|(value, files)| (value.as_str(), files.as_slice()))
        .collect();
    buckets.sort_by_key(|&(value, _)| (value == NOT_SET, value));
    buckets
}

/// Print one tag's distribution in the interactive session.
pub fn display_distribution(
    distribution: Option<&TagDistribution>,
    tag: CanonicalTag,
    total_files: usize,
) {
    eprintln!("\nCurrent {} values:", tag.name());
    eprintln!("{}", "-".repeat(60));

    let Some(distribution) = distribution.filter(|d| !d.is_empty()) else {
        eprintln!("  No metadata found");
        return;
    };

    for (value, files) in sorted_buckets(distribution) {
        let count = files.len();
        let percentage = if total_files > 0 {
            count as f64 / total_files as f64 * 100.0
        } else {
            0.0
        };
        eprintln!("  '{value}' - {count} file(s) ({percentage:.1}%)");
        if count <= 3 {
            for f in files {
                eprintln!("    - {f}");
            }
        } else {
            for f in &files[..2] {
                eprintln!("    - {f}");
            }
            eprintln!("    ... and {} more", count - 2);
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
