use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::tags::{CanonicalTag, FileReadResult};
use crate::{batch, cover, prompt, scan, tags};

#[derive(Parser)]
#[command(name = "tagfix", version, about = "Batch audio metadata editor")]
enum Cli {
    /// Interactive batch tag editing session
    Edit(EditArgs),
    /// Read tags and print a JSON report
    Read(ReadArgs),
    /// Embed an album cover across a directory
    Cover(CoverArgs),
}

#[derive(clap::Args)]
struct EditArgs {
    /// Directory to edit; prompted for when omitted
    directory: Option<PathBuf>,
}

#[derive(clap::Args)]
struct ReadArgs {
    /// Directory to scan (recursive)
    directory: PathBuf,
    /// Only these canonical fields, comma-separated
    #[arg(long, value_delimiter = ',')]
    fields: Vec<String>,
    /// Filename glob filter, e.g. "*.flac"
    #[arg(long)]
    glob: Option<String>,
    /// Include cover art metadata
    #[arg(long)]
    cover_art: bool,
}

#[derive(clap::Args)]
struct CoverArgs {
    /// Directory whose files receive the cover
    directory: PathBuf,
    /// Local image file to embed
    #[arg(long, conflicts_with = "online")]
    image: Option<PathBuf>,
    /// Search MusicBrainz using the first file's artist/album tags
    #[arg(long)]
    online: bool,
    /// Skip the confirmation prompt
    #[arg(long)]
    yes: bool,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    match Cli::parse() {
        Cli::Edit(args) => edit(args),
        Cli::Read(args) => read(args),
        Cli::Cover(args) => cover_cmd(args),
    }
}

/// One full session over a directory: scan, setup menu, cover, edits.
fn edit_session(dir: &Path) -> Result<(), Box<dyn Error>> {
    let files = match scan::find_audio_files(dir, None) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("{e}");
            return Ok(());
        }
    };
    if files.is_empty() {
        eprintln!("No audio files found in folder.");
        return Ok(());
    }
    eprintln!("Found {} audio file(s).", files.len());

    let plan = prompt::setup_menu(&files)?;
    if plan.cover {
        cover::process_album_cover(&files)?;
    }
    batch::edit_audio_files(&files, &plan)?;
    Ok(())
}

fn edit(args: EditArgs) -> Result<(), Box<dyn Error>> {
    if let Some(dir) = args.directory {
        return edit_session(&dir);
    }

    eprintln!("{}", "=".repeat(60));
    eprintln!("tagfix - batch audio metadata editor");
    eprintln!("Supported formats: {}", tags::SUPPORTED_EXTENSIONS.join(" "));
    eprintln!("{}", "=".repeat(60));

    loop {
        eprintln!("\nEnter directory path to begin (or 0 to exit)");
        let input = match prompt::prompt_line("Directory: ") {
            Ok(input) => input,
            Err(_) => break,
        };
        if input == "0" {
            break;
        }
        if input.is_empty() {
            continue;
        }
        edit_session(Path::new(&input))?;
    }
    Ok(())
}

fn read(args: ReadArgs) -> Result<(), Box<dyn Error>> {
    let fields = if args.fields.is_empty() {
        None
    } else {
        let mut selected = Vec::with_capacity(args.fields.len());
        for name in &args.fields {
            let tag = CanonicalTag::from_name(name)
                .ok_or_else(|| format!("Unknown field \"{name}\""))?;
            selected.push(tag);
        }
        Some(selected)
    };

    let files = scan::find_audio_files(&args.directory, args.glob.as_deref())?;

    let mut results = Vec::with_capacity(files.len());
    let mut files_read = 0usize;
    let mut files_failed = 0usize;

    for path in &files {
        let result = tags::read_report(path, fields.as_deref(), args.cover_art);
        match &result {
            FileReadResult::Ok { .. } => files_read += 1,
            FileReadResult::Error { .. } => files_failed += 1,
        }
        results.push(result);
    }

    let output = serde_json::json!({
        "summary": {
            "files_read": files_read,
            "files_failed": files_failed,
        },
        "results": results,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn cover_cmd(args: CoverArgs) -> Result<(), Box<dyn Error>> {
    let files = scan::find_audio_files(&args.directory, None)?;
    if files.is_empty() {
        eprintln!("No audio files found.");
        return Ok(());
    }

    // Without an explicit source, fall back to the interactive flow.
    if !args.online && args.image.is_none() {
        return cover::process_album_cover(&files).map_err(Into::into);
    }

    let cover_path = if let Some(image) = args.image {
        cover::validate_local_image(image.to_str().ok_or("Image path is not valid UTF-8")?)?
    } else {
        let (artist, album) = cover::detect_artist_album(&files);
        eprintln!("Searching cover for \"{artist}\" / \"{album}\"...");
        cover::fetch_cover_online(&artist, &album)?
    };

    if !args.yes && !cover::confirm_cover(&cover_path)? {
        eprintln!("Album cover embedding skipped.");
        return Ok(());
    }

    let (embedded, failed) = cover::embed_cover(&files, &cover_path);
    eprintln!("Album cover embedded into {embedded} file(s) ({failed} failed).");
    Ok(())
}
