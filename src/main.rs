//! sheet – builds a thumbnail contact sheet PDF.
//!
//! Usage:
//!   sheet
//!
//! Reads every image under `image/`, writes `{name}_thumbnail.jpg` files to
//! `output_images/` and the grid PDF to `pdf/bukbir.pdf`. Set `RUST_LOG` for
//! progress output.

use std::{env, process};

use contact_sheet::pipeline::{run, SheetConfig};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if let Some(arg) = args.get(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other => {
                eprintln!("Unexpected argument: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
        }
    }

    let config = SheetConfig::default();
    match run(&config) {
        Ok(summary) => {
            eprintln!(
                "Wrote '{}' ({} bytes, {} page{}, {} thumbnail{})",
                summary.pdf_path.display(),
                summary.bytes,
                summary.pages,
                if summary.pages == 1 { "" } else { "s" },
                summary.thumbnails,
                if summary.thumbnails == 1 { "" } else { "s" }
            );
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn print_usage(prog: &str) {
    let config = SheetConfig::default();
    eprintln!("sheet – thumbnail contact sheet generator (contact-sheet)");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog}");
    eprintln!();
    eprintln!("Paths are fixed:");
    eprintln!("  input images   {}", config.input_dir.display());
    eprintln!("  thumbnails     {}", config.output_dir.display());
    eprintln!("  PDF            {}", config.pdf_path.display());
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --help         Print this message");
}
