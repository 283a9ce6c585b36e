//! resume-layout CLI - structured resume extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use resume_layout::parser::detect_subsections;
use resume_layout::{
    fragments_from_path, render, FeatureRegistry, JsonFormat, ParseOptions, RawFragment,
    ResumeParser, SectionKeywords, SectionPolicy,
};

#[derive(Parser)]
#[command(name = "resume-layout")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Turn resume text fragments into structured JSON", long_about = None)]
struct Cli {
    /// Input fragment file (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    parser: ParserArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse fragments into a JSON record
    Parse {
        /// Input fragment file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        parser: ParserArgs,
    },

    /// Parse fragments into a plain text outline
    Text {
        /// Input fragment file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        parser: ParserArgs,
    },

    /// Show the detected layout: statistics and sections
    Sections {
        /// Input fragment file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        parser: ParserArgs,
    },

    /// Parse many fragment files into a directory of JSON records
    Batch {
        /// Input fragment files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        parser: ParserArgs,
    },

    /// Show version information
    Version,
}

/// Options shared by every parsing command.
#[derive(Args, Clone, Default)]
struct ParserArgs {
    /// Profile scoring rules (JSON) replacing the built-in English set
    #[arg(long, value_name = "FILE", env = "RESUME_LAYOUT_RULES")]
    rules: Option<PathBuf>,

    /// Section keywords (JSON) replacing the built-in English set
    #[arg(long, value_name = "FILE", env = "RESUME_LAYOUT_KEYWORDS")]
    keywords: Option<PathBuf>,

    /// Skip malformed fragments instead of failing
    #[arg(long)]
    lenient: bool,

    /// Merge repeated section titles instead of restarting them
    #[arg(long)]
    append_duplicates: bool,
}

impl ParserArgs {
    fn options(&self) -> ParseOptions {
        let mut options = ParseOptions::new();
        if self.lenient {
            options = options.lenient();
        }
        if self.append_duplicates {
            options = options.with_section_policy(SectionPolicy::Append);
        }
        options
    }

    fn build(&self) -> Result<ResumeParser, Box<dyn std::error::Error>> {
        let mut parser = ResumeParser::with_options(self.options());
        if let Some(path) = &self.rules {
            let json = fs::read_to_string(path)?;
            parser = parser.with_features(FeatureRegistry::from_json(&json)?);
            log::info!("Loaded profile rules from {}", path.display());
        }
        if let Some(path) = &self.keywords {
            let json = fs::read_to_string(path)?;
            parser = parser.with_keywords(SectionKeywords::from_json(&json)?);
            log::info!("Loaded section keywords from {}", path.display());
        }
        Ok(parser)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Parse {
            input,
            output,
            compact,
            parser,
        }) => cmd_parse(&input, output.as_deref(), compact, &parser),
        Some(Commands::Text {
            input,
            output,
            parser,
        }) => cmd_text(&input, output.as_deref(), &parser),
        Some(Commands::Sections { input, parser }) => cmd_sections(&input, &parser),
        Some(Commands::Batch {
            inputs,
            output,
            compact,
            parser,
        }) => cmd_batch(&inputs, output.as_deref(), compact, &parser),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: parse if input is provided
            if let Some(input) = cli.input {
                cmd_parse(&input, cli.output.as_deref(), false, &cli.parser)
            } else {
                println!("{}", "Usage: resume-layout <FILE> [OUTPUT]".yellow());
                println!("       resume-layout --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

/// `<dir>/<stem>.json` for one batch input.
fn batch_output_path(dir: &Path, input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    dir.join(format!("{}.json", stem))
}

fn cmd_parse(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    args: &ParserArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let parser = args.build()?;
    let fragments = fragments_from_path(input)?;
    let record = parser.parse(&fragments)?;

    let json = render::to_json(&record, json_format(compact))?;
    write_or_print(output, &json)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    args: &ParserArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let parser = args.build()?;
    let fragments = fragments_from_path(input)?;
    let record = parser.parse(&fragments)?;

    write_or_print(output, &render::to_text(&record))
}

fn cmd_sections(input: &Path, args: &ParserArgs) -> Result<(), Box<dyn std::error::Error>> {
    let parser = args.build()?;
    let fragments = fragments_from_path(input)?;
    let layout = parser.analyze(&fragments)?;

    println!("{}", "Layout Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Fragments".bold(), fragments.len());
    println!("{}: {}", "Spans".bold(), layout.spans().count());
    println!("{}: {}", "Lines".bold(), layout.lines.len());
    match layout.statistics.typical_line_gap {
        Some(gap) => println!("{}: {:.2}", "Typical line gap".bold(), gap),
        None => println!("{}: n/a", "Typical line gap".bold()),
    }
    match layout.statistics.average_char_width {
        Some(width) => println!("{}: {:.2}", "Average char width".bold(), width),
        None => println!("{}: n/a", "Average char width".bold()),
    }

    println!();
    println!("{}", "Sections".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let gap_factor = parser.options().subsection_gap_factor;
    for (name, section) in &layout.sections {
        let kind = if section.is_profile() {
            "profile".to_string()
        } else {
            parser.keywords().classify(name).to_string()
        };
        let subsections = detect_subsections(section, layout.line_gap(), gap_factor);
        println!(
            "{} {} ({}, {} lines, {} subsections)",
            "├─".dimmed(),
            name.bold(),
            kind.green(),
            section.len(),
            subsections.len()
        );
    }

    Ok(())
}

/// Load every batch input, collecting unreadable files as failures.
///
/// Returns the readable paths and their fragments in input order, plus one
/// message per file that could not be read.
fn read_documents<'a>(
    inputs: &'a [PathBuf],
    mut on_read: impl FnMut(),
) -> (Vec<&'a Path>, Vec<Vec<RawFragment>>, Vec<String>) {
    let mut readable = Vec::with_capacity(inputs.len());
    let mut documents = Vec::with_capacity(inputs.len());
    let mut failed = Vec::new();

    for input in inputs {
        match fragments_from_path(input) {
            Ok(fragments) => {
                readable.push(input.as_path());
                documents.push(fragments);
            }
            Err(e) => {
                log::warn!("Skipping {}: {}", input.display(), e);
                failed.push(format!("{}: {}", input.display(), e));
            }
        }
        on_read();
    }

    (readable, documents, failed)
}

fn cmd_batch(
    inputs: &[PathBuf],
    output: Option<&Path>,
    compact: bool,
    args: &ParserArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let parser = args.build()?;
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64 * 2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Reading fragments...");
    let (readable, documents, mut failed) = read_documents(inputs, || pb.inc(1));

    pb.set_message("Parsing...");
    let results = parser.parse_batch(&documents);

    let mut written = 0;
    for (input, result) in readable.into_iter().zip(results) {
        match result {
            Ok(record) => {
                let json = render::to_json(&record, json_format(compact))?;
                fs::write(batch_output_path(&output_dir, input), json)?;
                written += 1;
            }
            Err(e) => failed.push(format!("{}: {}", input.display(), e)),
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    for failure in &failed {
        eprintln!("{} {}", "Failed".red(), failure);
    }
    println!(
        "\n{} {} records written to {}",
        "Done!".green().bold(),
        written,
        output_dir.display()
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "resume-layout".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Layout-driven resume parser");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_output_path() {
        let path = batch_output_path(Path::new("out"), Path::new("in/jane.fragments.json"));
        assert_eq!(path, PathBuf::from("out/jane.fragments.json"));
        let path = batch_output_path(Path::new("out"), Path::new("bob"));
        assert_eq!(path, PathBuf::from("out/bob.json"));
    }

    #[test]
    fn test_read_documents_keeps_going_past_unreadable_files() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        fs::write(
            &good,
            r#"[{"font_name": "Arial", "text": "Jane", "bbox": [0, 0, 20, 10], "font_size": 10}]"#,
        )
        .unwrap();
        let bad = dir.path().join("bad.json");
        fs::write(&bad, "not json").unwrap();
        let missing = dir.path().join("missing.json");

        let inputs = vec![missing, good.clone(), bad];
        let mut reads = 0;
        let (readable, documents, failed) = read_documents(&inputs, || reads += 1);

        assert_eq!(reads, 3);
        assert_eq!(readable, vec![good.as_path()]);
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0][0].text, "Jane");
        assert_eq!(failed.len(), 2);
        assert!(failed[0].contains("missing.json"));
        assert!(failed[1].contains("bad.json"));
    }

    #[test]
    fn test_parser_args_options() {
        let args = ParserArgs {
            lenient: true,
            append_duplicates: true,
            ..Default::default()
        };
        let options = args.options();
        assert_eq!(options.section_policy, SectionPolicy::Append);
        assert!(matches!(options.error_mode, resume_layout::ErrorMode::Lenient));
    }

    #[test]
    fn test_parser_args_loads_keywords() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keywords.json");
        fs::write(&path, r#"{"skills": ["tooling"]}"#).unwrap();

        let args = ParserArgs {
            keywords: Some(path),
            ..Default::default()
        };
        let parser = args.build().unwrap();
        assert_eq!(
            parser.keywords().classify("TOOLING"),
            resume_layout::SectionType::Skills
        );
    }

    #[test]
    fn test_parser_args_rejects_bad_rules() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        fs::write(&path, "not json").unwrap();

        let args = ParserArgs {
            rules: Some(path),
            ..Default::default()
        };
        assert!(args.build().is_err());
    }
}
