//! readflow CLI - paragraph and boilerplate analysis for per-word PDF layout

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use readflow::{
    pipeline, read_source_words, ChunkOptions, JsonFormat, PatternKind, ProcessOptions,
    ProcessResult,
};

#[derive(Parser)]
#[command(name = "readflow")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rebuild reading order from per-word PDF layout data", long_about = None)]
struct Cli {
    /// Options file (JSON, any subset of the processing options)
    #[arg(long, global = true, value_name = "FILE", env = "READFLOW_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment paragraphs and write the tagged word stream as JSON
    Process {
        /// Input words (JSON array, stdin if not specified or "-")
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Remove headers, footers and page numbers
        #[arg(short, long)]
        skip_patterns: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Report detected headers, footers, page numbers and repeats
    Patterns {
        /// Input words (JSON array, stdin if not specified or "-")
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Write the reading text, one paragraph per block
    Text {
        /// Input words (JSON array, stdin if not specified or "-")
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Remove headers, footers and page numbers
        #[arg(short, long)]
        skip_patterns: bool,
    },

    /// Split the reading text into speakable chunks (JSON)
    Chunks {
        /// Input words (JSON array, stdin if not specified or "-")
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Remove headers, footers and page numbers
        #[arg(short, long)]
        skip_patterns: bool,

        /// Maximum words per chunk
        #[arg(long, default_value = "100")]
        max_words: usize,

        /// Allow chunks to span paragraph boundaries
        #[arg(long)]
        no_paragraph_breaks: bool,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = load_options(cli.config.as_deref()).and_then(|options| match cli.command {
        Commands::Process {
            input,
            output,
            skip_patterns,
            compact,
        } => cmd_process(
            input.as_deref(),
            output.as_deref(),
            options.with_skip_patterns(skip_patterns),
            compact,
        ),
        Commands::Patterns { input, json } => cmd_patterns(input.as_deref(), options, json),
        Commands::Text {
            input,
            output,
            skip_patterns,
        } => cmd_text(
            input.as_deref(),
            output.as_deref(),
            options.with_skip_patterns(skip_patterns),
        ),
        Commands::Chunks {
            input,
            output,
            skip_patterns,
            max_words,
            no_paragraph_breaks,
        } => {
            let chunk_options = ChunkOptions::new()
                .with_max_words(max_words)
                .with_paragraph_breaks(!no_paragraph_breaks);
            cmd_chunks(
                input.as_deref(),
                output.as_deref(),
                options.with_skip_patterns(skip_patterns),
                &chunk_options,
            )
        }
    });

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_options(path: Option<&Path>) -> Result<ProcessOptions, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            let options: ProcessOptions = serde_json::from_str(&content)
                .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?;
            Ok(options)
        }
        None => Ok(ProcessOptions::default()),
    }
}

fn run(
    input: Option<&Path>,
    options: &ProcessOptions,
) -> Result<ProcessResult, Box<dyn std::error::Error>> {
    let words = match input {
        Some(path) if path != Path::new("-") => read_source_words(fs::File::open(path)?)?,
        _ => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            read_source_words(buffer.as_slice())?
        }
    };

    Ok(pipeline::process_words(words, options)?)
}

fn emit(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        eprintln!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_process(
    input: Option<&Path>,
    output: Option<&Path>,
    options: ProcessOptions,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = run(input, &options)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    emit(output, &result.to_json(format)?)?;

    let stats = &result.stats;
    eprintln!(
        "{} {} pages, {} paragraphs, {} words ({} removed)",
        "Processed".green().bold(),
        stats.page_count,
        stats.paragraph_count,
        stats.output_words,
        stats.removed_words
    );

    Ok(())
}

fn cmd_patterns(
    input: Option<&Path>,
    options: ProcessOptions,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = run(input, &options.with_skip_patterns(true))?;
    let patterns = &result.patterns;

    if json {
        println!("{}", readflow::render::to_json(patterns, JsonFormat::Pretty)?);
        return Ok(());
    }

    println!("{}", "Detected Patterns".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for (label, kind) in [
        ("Headers", PatternKind::Header),
        ("Footers", PatternKind::Footer),
        ("Page numbers", PatternKind::PageNumber),
        ("Other repeats", PatternKind::OtherRepeat),
    ] {
        let found: Vec<_> = patterns.iter().filter(|o| o.kind == kind).collect();
        println!("{}: {}", label.bold(), found.len());
        for occurrence in found {
            println!(
                "  {} p{} {}",
                "├─".dimmed(),
                occurrence.page,
                occurrence.text
            );
        }
    }

    println!();
    println!(
        "{}: {} of {}",
        "Words removed".bold(),
        result.stats.removed_words,
        result.stats.input_words
    );

    Ok(())
}

fn cmd_text(
    input: Option<&Path>,
    output: Option<&Path>,
    options: ProcessOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = run(input, &options)?;
    emit(output, &result.to_text())
}

fn cmd_chunks(
    input: Option<&Path>,
    output: Option<&Path>,
    options: ProcessOptions,
    chunk_options: &ChunkOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = run(input, &options)?;
    let chunks = result.chunks(chunk_options);
    log::debug!("Built {} chunks", chunks.len());

    emit(output, &readflow::render::to_json(&chunks, JsonFormat::Pretty)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_options_default() {
        let options = load_options(None).unwrap();
        assert_eq!(options, ProcessOptions::default());
    }

    #[test]
    fn test_load_options_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"skip_patterns": true, "layout": {{"line_tolerance": 4.5}}}}"#).unwrap();

        let options = load_options(Some(file.path())).unwrap();
        assert!(options.skip_patterns);
        assert_eq!(options.layout.line_tolerance, 4.5);
        assert_eq!(options.patterns.min_words, 50);
    }

    #[test]
    fn test_load_options_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(load_options(Some(file.path())).is_err());
    }

    #[test]
    fn test_run_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"text": "Hello", "page": 1, "x0": 72, "top": 100, "x1": 102, "bottom": 112}},
                {{"text": "world.", "page": 1, "x0": 106, "top": 100, "x1": 142, "bottom": 112}}]"#
        )
        .unwrap();

        let result = run(Some(file.path()), &ProcessOptions::default()).unwrap();
        assert_eq!(result.to_text(), "Hello world.");
    }

    #[test]
    fn test_emit_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        emit(Some(&path), "content").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "content");
    }
}
