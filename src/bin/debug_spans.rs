//! Dump extracted spans with their filter classification

use pdf_outline::extract_pages;
use pdf_outline::filter::{in_page_margin, is_decorative, DEFAULT_MARGIN_RATIO};
use pdf_outline::normalize::DEFAULT_BOLD_BONUS;
use std::env;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: debug-spans <pdf_path> [max_page | min-max]");
        std::process::exit(1);
    }

    let range = args.get(2).map(|s| s.as_str()).unwrap_or("1-3");
    let (min_page, max_page) = if let Some((a, b)) = range.split_once('-') {
        (a.parse().unwrap_or(1), b.parse().unwrap_or(3))
    } else {
        (1, range.parse().unwrap_or(3))
    };

    let pages = match extract_pages(&args[1]) {
        Ok(pages) => pages,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    for page in pages
        .iter()
        .filter(|p| p.number >= min_page && p.number <= max_page)
    {
        println!(
            "=== PAGE {} ({} spans, height {:.1}) ===",
            page.number,
            page.spans.len(),
            page.height
        );
        for span in &page.spans {
            let flag = if in_page_margin(span.y, page.height, DEFAULT_MARGIN_RATIO) {
                "margin"
            } else if is_decorative(&span.text) {
                "noise"
            } else if span.is_bold {
                "bold"
            } else {
                ""
            };
            let adjusted = span.size + if span.is_bold { DEFAULT_BOLD_BONUS } else { 0.0 };
            println!(
                "  x={:7.1} y={:7.1} fs={:5.1} adj={:5.1} {:6} font={:<24} text={:?}",
                span.x, span.y, span.size, adjusted, flag, span.font, span.text
            );
        }
        println!();
    }
}
