//! Info command implementation
//!
//! Displays the markup commands, alignments and output formats.

use crate::cli::InfoArgs;
use anyhow::Result;
use glyphmark::BUILTINS;

pub fn run(args: &InfoArgs) -> Result<()> {
    // If no specific flags, show all info
    let show_all = !args.commands && !args.alignments && !args.formats;

    println!("Glyphmark v{}", env!("CARGO_PKG_VERSION"));
    println!();

    if show_all || args.commands {
        print_commands();
        if show_all {
            println!();
        }
    }

    if show_all || args.alignments {
        print_alignments();
        if show_all {
            println!();
        }
    }

    if show_all || args.formats {
        print_formats();
    }

    Ok(())
}

fn print_commands() {
    println!("Markup commands:");
    for builtin in BUILTINS {
        println!("  {:<28} - {}", builtin.usage, builtin.summary);
    }
    println!();
    println!("Escapes: \\<  \\>  \\\\");
}

fn print_alignments() {
    println!("Alignments:");
    println!("  left              - Lines start at the left edge (default)");
    println!("  center            - Lines are centered in the box");
    println!("  right             - Lines end at the right edge");
}

fn print_formats() {
    println!("Output formats:");
    println!("  svg               - SVG document, one <text> per character (default)");
    println!("  json              - Recorded draw calls as JSON");
    println!();
    println!("Measurers:");
    println!("  none              - Fixed-ratio metrics (default, no font needed)");
    println!("  font              - Real metrics from --font-file");
}
