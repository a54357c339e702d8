//! Make the white background of a single logo transparent.
//!
//! Usage:
//! ```sh
//! cargo run --example mask_logo -- Logo.png output.png
//! ```

use std::env;
use std::process;

use logo_background_removal::MaskEngine;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        let program = args.first().map_or("mask_logo", String::as_str);
        eprintln!("Usage: {program} <input> <output.png>");
        process::exit(1);
    }

    let engine = MaskEngine::default();
    let result = engine.process_file(args[1].as_ref(), args[2].as_ref());

    if result.success {
        println!("Done: {}", result.message);
    } else {
        eprintln!("Error: {}", result.message);
        process::exit(1);
    }
}
