//! Shape CLI
//!
//! Filters records through a guarded match clause and prints them as JSON.

use shape_cli::{parse_filter_options, run};

fn main() {
    shape_match::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_filter_options(&args);

    if options.help {
        print_usage();
        return;
    }

    match run(&options) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Shape record filter");
    println!();
    println!("Usage: shape [records.json] [options]");
    println!();
    println!("Without a file, the built-in car records are used.");
    println!();
    println!("Options:");
    println!("  --make=<make>   Keep items whose Make is <make>");
    println!("  --year=<year>   Keep items whose Year is <year> (checked in the guard)");
    println!("  --not           Keep items whose Make is NOT <make> (requires --make)");
    println!("  -h, --help      Show this help message");
    println!();
    println!("Set RUST_LOG=trace to see clause evaluation.");
}
