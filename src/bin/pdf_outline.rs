//! CLI tool for extracting PDF outlines to JSON

use clap::Parser;
use pdf_outline::batch::{list_pdfs, process_directory, process_files, BatchSummary};
use pdf_outline::{extract_outline_with_config, to_json, OutlineConfig};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "pdf-outline")]
#[command(about = "Extract the title and H1/H2/H3 headings of PDF files as JSON")]
struct Args {
    /// PDF files to process
    files: Vec<PathBuf>,

    /// Process every PDF in this directory
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Write JSON files here instead of next to each PDF
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Include the text under each heading
    #[arg(short = 't', long)]
    include_text: bool,

    /// Print JSON to stdout instead of writing files
    #[arg(long, conflicts_with = "tree")]
    stdout: bool,

    /// Print a readable outline tree to stdout instead of writing files
    #[arg(long)]
    tree: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = OutlineConfig {
        include_text: args.include_text,
        ..OutlineConfig::default()
    };

    if args.files.is_empty() && args.input_dir.is_none() {
        eprintln!("Error: give one or more PDF files or --input-dir");
        process::exit(1);
    }

    if args.stdout || args.tree {
        let mut inputs = args.files.clone();
        if let Some(input_dir) = &args.input_dir {
            match list_pdfs(input_dir) {
                Ok(found) => inputs.extend(found),
                Err(e) => {
                    eprintln!("Error: {}: {}", input_dir.display(), e);
                    process::exit(1);
                }
            }
        }

        let mut failed = false;
        for path in &inputs {
            match extract_outline_with_config(path, &config) {
                Ok(outline) if args.tree => print!("{}", outline.to_tree()),
                Ok(outline) => match to_json(&outline) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error: {}: {}", path.display(), e);
                        failed = true;
                    }
                },
                Err(e) => {
                    eprintln!("Error: {}: {}", path.display(), e);
                    failed = true;
                }
            }
        }
        process::exit(if failed { 1 } else { 0 });
    }

    let mut summary = BatchSummary::default();

    if let Some(input_dir) = &args.input_dir {
        let output_dir = args.output_dir.clone().unwrap_or_else(|| input_dir.clone());
        match process_directory(input_dir, &output_dir, &config) {
            Ok(dir_summary) => summary.outcomes.extend(dir_summary.outcomes),
            Err(e) => {
                eprintln!("Error: {}: {}", input_dir.display(), e);
                process::exit(1);
            }
        }
    }

    if !args.files.is_empty() {
        if let Some(dir) = &args.output_dir {
            if let Err(e) = std::fs::create_dir_all(dir) {
                eprintln!("Error: {}: {}", dir.display(), e);
                process::exit(1);
            }
        }
        let file_summary = process_files(&args.files, args.output_dir.as_deref(), &config);
        summary.outcomes.extend(file_summary.outcomes);
    }

    println!(
        "Processed {}/{} files",
        summary.succeeded(),
        summary.outcomes.len()
    );
    if summary.failed() > 0 {
        process::exit(1);
    }
}
