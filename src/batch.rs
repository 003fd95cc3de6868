//! Sequential batch editing over a scanned file list.
//!
//! Files are processed strictly one at a time; a quit request takes effect
//! at the next file boundary, never mid-write.

use std::io;
use std::path::PathBuf;

use crate::prompt::{self, EditPlan};
use crate::tags::{CanonicalTag, TrackHandle};

/// Progress counters for one batch run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Per-file action in the interactive loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Edit,
    Skip,
    Quit,
}

/// Anything other than `s` or `q` means "edit this file".
pub fn parse_file_action(input: &str) -> FileAction {
    match input.trim().to_lowercase().as_str() {
        "s" => FileAction::Skip,
        "q" => FileAction::Quit,
        _ => FileAction::Edit,
    }
}

/// Apply uniform tag values to every file in the batch.
///
/// Load and save failures are reported per file and counted; the batch
/// always runs to the end. A file is saved as long as at least one of its
/// sets succeeded.
pub fn apply_global_values(
    files: &[PathBuf],
    global_values: &[(CanonicalTag, String)],
) -> (usize, usize) {
    if global_values.is_empty() {
        return (0, 0);
    }

    let mut applied = 0;
    let mut failed = 0;

    for path in files {
        let mut handle = match TrackHandle::load(path) {
            Ok(h) => h,
            Err(e) => {
                eprintln!("  SKIP {}: {e}", path.display());
                failed += 1;
                continue;
            }
        };

        let mut any_set = false;
        for (tag, value) in global_values {
            if handle.set(*tag, value) {
                any_set = true;
            }
        }

        if !any_set {
            failed += 1;
            continue;
        }

        match handle.save() {
            Ok(()) => applied += 1,
            Err(e) => {
                eprintln!("  FAIL {}: {e}", path.display());
                failed += 1;
            }
        }
    }

    (applied, failed)
}

/// The interactive per-file pass: show current values, then edit, skip, or
/// quit. Returns the counters for the summary.
pub fn run_per_file_edits(files: &[PathBuf], per_file_tags: &[CanonicalTag]) -> BatchStats {
    let mut stats = BatchStats::default();
    let total = files.len();

    for (i, path) in files.iter().enumerate() {
        let idx = i + 1;
        let mut handle = match TrackHandle::load(path) {
            Ok(h) => h,
            Err(e) => {
                eprintln!("[{idx}/{total}] SKIP {}: {e}", path.display());
                stats.failed += 1;
                continue;
            }
        };

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        eprintln!("\n[{idx}/{total}] File: {filename}");
        for &tag in per_file_tags {
            let current = handle
                .get(tag)
                .unwrap_or_else(|| crate::analysis::NOT_SET.to_string());
            eprintln!("  {}: {current}", tag.name());
        }

        eprintln!("Options: [Enter] to edit | [s] skip | [q] quit");
        let action = match prompt::prompt_line("Action: ") {
            Ok(input) => parse_file_action(&input),
            // stdin closed: wind down at the file boundary.
            Err(_) => FileAction::Quit,
        };
        match action {
            FileAction::Quit => break,
            FileAction::Skip => {
                stats.skipped += 1;
                continue;
            }
            FileAction::Edit => {}
        }

        let mut modified = false;
        for &tag in per_file_tags {
            let current = handle.get(tag);
            let shown = match &current {
                Some(v) => format!("[{v}]"),
                None => crate::analysis::NOT_SET.to_string(),
            };
            let new_value = match prompt::prompt_line(&format!("  {} {shown}: ", tag.name())) {
                Ok(v) => v,
                Err(_) => break,
            };
            if !new_value.is_empty() && handle.set(tag, &new_value) {
                modified = true;
            }
        }

        if modified {
            match handle.save() {
                Ok(()) => stats.processed += 1,
                Err(e) => {
                    eprintln!("  FAIL {}: {e}", handle.path().display());
                    stats.failed += 1;
                }
            }
        } else {
            stats.skipped += 1;
        }
    }

    stats
}

/// Run a full edit plan: global values first, then per-file prompts, then
/// the summary.
pub fn edit_audio_files(files: &[PathBuf], plan: &EditPlan) -> io::Result<()> {
    if files.is_empty() {
        eprintln!("\nNo audio files found.");
        return Ok(());
    }

    let (applied, global_failed) = apply_global_values(files, &plan.global_values);
    if !plan.global_values.is_empty() {
        eprintln!("\nGlobal edits applied to {applied} file(s) ({global_failed} failed)");
    }

    if plan.per_file.is_empty() {
        if plan.global_values.is_empty() {
            eprintln!("\nNothing selected for editing.");
        }
        return Ok(());
    }

    let stats = run_per_file_edits(files, &plan.per_file);

    eprintln!("\nBatch summary");
    eprintln!("  Per-file processed: {}", stats.processed);
    eprintln!("  Per-file skipped:   {}", stats.skipped);
    eprintln!("  Failed:             {}", stats.failed);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{write_m4a, write_mp3, write_wav};

    #[test]
    fn file_action_defaults_to_edit() {
        assert_eq!(parse_file_action(""), FileAction::Edit);
        assert_eq!(parse_file_action("anything"), FileAction::Edit);
        assert_eq!(parse_file_action("s"), FileAction::Skip);
        assert_eq!(parse_file_action(" S "), FileAction::Skip);
        assert_eq!(parse_file_action("q"), FileAction::Quit);
    }

    #[test]
    fn global_values_reach_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.wav");
        let b = dir.path().join("b.wav");
        write_wav(&a);
        write_wav(&b);

        let files = vec![a.clone(), b.clone()];
        let globals = vec![(CanonicalTag::Artist, "Test Artist".to_string())];
        let (applied, failed) = apply_global_values(&files, &globals);
        assert_eq!(applied, 2);
        assert_eq!(failed, 0);

        for path in [&a, &b] {
            let handle = TrackHandle::load(path).unwrap();
            assert_eq!(
                handle.get(CanonicalTag::Artist),
                Some("Test Artist".to_string())
            );
        }
    }

    #[test]
    fn unreadable_file_counts_as_failed_and_batch_continues() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.wav");
        write_wav(&good);
        let missing = dir.path().join("missing.mp3");

        let files = vec![missing, good.clone()];
        let globals = vec![(CanonicalTag::Album, "X".to_string())];
        let (applied, failed) = apply_global_values(&files, &globals);
        assert_eq!(applied, 1);
        assert_eq!(failed, 1);

        let handle = TrackHandle::load(&good).unwrap();
        assert_eq!(handle.get(CanonicalTag::Album), Some("X".to_string()));
    }

    #[test]
    fn no_globals_is_a_no_op() {
        let files = vec![PathBuf::from("/does/not/matter.mp3")];
        assert_eq!(apply_global_values(&files, &[]), (0, 0));
    }

    #[test]
    fn end_to_end_global_artist_and_per_file_titles() {
        let dir = tempfile::tempdir().unwrap();
        let mp3 = dir.path().join("01 song a.mp3");
        let m4a = dir.path().join("02 song b.m4a");
        write_mp3(&mp3);
        write_m4a(&m4a);
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();

        // The .txt neighbour never enters the batch.
        let files = crate::scan::find_audio_files(dir.path(), None).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("01 song a.mp3"));
        assert!(files[1].ends_with("02 song b.m4a"));

        let globals = vec![(CanonicalTag::Artist, "Test Artist".to_string())];
        assert_eq!(apply_global_values(&files, &globals), (2, 0));

        // Per-file title edits, as the interactive pass applies them.
        for (path, title) in files.iter().zip(["Song A", "Song B"]) {
            let mut handle = TrackHandle::load(path).unwrap();
            assert!(handle.set(CanonicalTag::Title, title));
            handle.save().unwrap();
        }

        for (path, title) in files.iter().zip(["Song A", "Song B"]) {
            let handle = TrackHandle::load(path).unwrap();
            assert_eq!(
                handle.get(CanonicalTag::Artist),
                Some("Test Artist".to_string())
            );
            assert_eq!(handle.get(CanonicalTag::Title), Some(title.to_string()));
        }
    }
}
