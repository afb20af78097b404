//! Pack files and directory trees into a ZIP archive.
//!
//! This example demonstrates:
//! - Creating an archive on disk
//! - Stripping a prefix from entry names
//! - Printing one diagnostic line per entry
//! - Getting archive statistics
//!
//! # Usage
//!
//! ```bash
//! cargo run --example zip_tree -- output.zip testdata/ testdata
//! ```

use std::env;
use ziptree::{ArchiveOptions, Archiver, Result};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 4 {
        eprintln!("Usage: {} <output.zip> <strip-prefix> <path> [path...]", args[0]);
        eprintln!();
        eprintln!("Creates a ZIP archive from the specified files and directories.");
        eprintln!("The strip prefix is removed from the front of every entry name;");
        eprintln!("pass \"\" to keep paths as given.");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} out.zip testdata/ testdata", args[0]);
        eprintln!("  {} out.zip \"\" notes.txt docs", args[0]);
        std::process::exit(1);
    }

    let output_path = &args[1];
    let options = ArchiveOptions::new().sub_path(args[2].as_str());

    println!("Creating archive: {}", output_path);
    println!();

    let mut archiver = Archiver::new().options(options).debug(std::io::stdout());
    archiver.create(output_path)?;
    for path in &args[3..] {
        archiver.add(path)?;
    }

    let result = archiver.finish()?;

    println!();
    println!("Archive created successfully!");
    println!("  Files:       {}", result.entries_written);
    println!("  Directories: {}", result.directories_written);
    println!("  Input size:  {} bytes", result.total_size);
    println!("  Archive:     {} bytes", result.archive_size);
    println!("  Ratio:       {:.1}%", result.compression_ratio() * 100.0);

    Ok(())
}
