//! Interactive menus for the edit session.
//!
//! All parsing is split out from the terminal I/O so it can be tested
//! without a live stdin.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::analysis;
use crate::tags::CanonicalTag;

/// One selectable entry in the setup menu. Cover art is its own entry since
/// it bypasses the scalar tag path entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Cover,
    Tag(CanonicalTag),
}

/// What to do with a globally-editable tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalChoice {
    Global,
    Individual,
    Skip,
}

/// The outcome of the setup menu.
pub struct EditPlan {
    /// Whether cover art was selected for embedding.
    pub cover: bool,
    /// Uniform values applied to every file.
    pub global_values: Vec<(CanonicalTag, String)>,
    /// Tags prompted for per file.
    pub per_file: Vec<CanonicalTag>,
}

/// Menu entries in display order: cover art first, then the canonical tags.
pub fn menu_entries() -> Vec<(usize, EditField)> {
    let mut entries = vec![(1, EditField::Cover)];
    entries.extend(
        CanonicalTag::ALL
            .into_iter()
            .enumerate()
            .map(|(i, tag)| (i + 2, EditField::Tag(tag))),
    );
    entries
}

/// Parse a whitespace-separated list of menu numbers. Unknown numbers and
/// junk are dropped; duplicates keep their first position.
pub fn parse_tag_selection(input: &str) -> Vec<EditField> {
    let entries = menu_entries();
    let mut selected = Vec::new();
    for token in input.split_whitespace() {
        let Ok(number) = token.parse::<usize>() else {
            continue;
        };
        let Some(&(_, field)) = entries.iter().find(|(n, _)| *n == number) else {
            continue;
        };
        if !selected.contains(&field) {
            selected.push(field);
        }
    }
    selected
}

/// Parse a g/i/s answer for a globally-editable tag.
pub fn parse_global_choice(input: &str) -> Option<GlobalChoice> {
    match input.trim().to_lowercase().as_str() {
        "g" => Some(GlobalChoice::Global),
        "i" => Some(GlobalChoice::Individual),
        "s" => Some(GlobalChoice::Skip),
        _ => None,
    }
}

/// Print `prompt` and read one trimmed line from stdin. EOF is an error so
/// callers can wind down cleanly when input runs out.
pub fn prompt_line(prompt: &str) -> io::Result<String> {
    eprint!("{prompt}");
    io::stderr().flush()?;
    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
    }
    Ok(line.trim().to_string())
}

/// The setup menu: pick fields, then decide global/individual/skip for each
/// globally-editable tag, previewing current values along the way.
pub fn setup_menu(files: &[PathBuf]) -> io::Result<EditPlan> {
    eprintln!("\n{}", "=".repeat(60));
    eprintln!("Setup: select metadata fields to edit");
    eprintln!("{}", "=".repeat(60));
    for (number, field) in menu_entries() {
        let label = match field {
            EditField::Cover => "cover",
            EditField::Tag(tag) => tag.name(),
        };
        eprintln!("  [{number}] {label}");
    }
    eprintln!("\nEnter numbers separated by spaces, e.g. 1 2 4");

    let selected = loop {
        let input = prompt_line("\nYour selection: ")?;
        let selected = parse_tag_selection(&input);
        if !selected.is_empty() {
            break selected;
        }
        eprintln!("No valid fields selected. Try again.");
    };

    let scalar_tags: Vec<CanonicalTag> = selected
        .iter()
        .filter_map(|field| match field {
            EditField::Tag(tag) => Some(*tag),
            EditField::Cover => None,
        })
        .collect();

    let metadata = analysis::analyze_metadata(files, &scalar_tags);

    let mut global_values = Vec::new();
    let mut per_file = Vec::new();

    for tag in scalar_tags {
        analysis::display_distribution(metadata.get(&tag), tag, files.len());

        if !tag.is_global() {
            per_file.push(tag);
            continue;
        }

        eprintln!("\nOptions for {}: [g]lobal / [i]ndividual / [s]kip", tag.name());
        let choice = loop {
            let input = prompt_line("Choice: ")?;
            if let Some(choice) = parse_global_choice(&input) {
                break choice;
            }
        };

        match choice {
            GlobalChoice::Global => {
                let value = prompt_line(&format!("New {} value: ", tag.name()))?;
                if !value.is_empty() {
                    global_values.push((tag, value));
                }
            }
            GlobalChoice::Individual => per_file.push(tag),
            GlobalChoice::Skip => {}
        }
    }

    Ok(EditPlan {
        cover: selected.contains(&EditField::Cover),
        global_values,
        per_file,
    })
}
