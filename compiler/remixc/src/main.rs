//! ReMix CLI
//!
//! Scan text with composed patterns, or show how they were batched.

use remixc::args::EngineArgs;
use remixc::commands::{explain, read_file, scan};

fn main() {
    remixc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "scan" => {
            let engine_args = parse_engine_args(&args[2..]);
            let [path] = engine_args.positional.as_slice() else {
                eprintln!("Usage: remix scan <file> [options] name=PATTERN...");
                std::process::exit(1);
            };
            let text = read_file(path);
            let mut engine = build_engine(&engine_args, "");

            let mut stdout = std::io::stdout().lock();
            match scan(&mut engine, &text, &mut stdout) {
                Ok(summary) if summary.complete => {}
                Ok(_) => std::process::exit(2),
                Err(e) => {
                    eprintln!("error: {e}");
                    std::process::exit(1);
                }
            }
        }
        "explain" => {
            let engine_args = parse_engine_args(&args[2..]);
            if !engine_args.positional.is_empty() {
                eprintln!("Usage: remix explain [options] name=PATTERN...");
                std::process::exit(1);
            }
            let mut engine = build_engine(&engine_args, "");

            let mut stdout = std::io::stdout().lock();
            if let Err(e) = explain(&mut engine, &mut stdout) {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("ReMix {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn parse_engine_args(args: &[String]) -> EngineArgs {
    match EngineArgs::parse(args) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    }
}

fn build_engine(args: &EngineArgs, name: &str) -> remix::Remix {
    match args.build_engine(name) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("ReMix - composed pattern scanning");
    println!();
    println!("Usage: remix <command> [options] name=PATTERN...");
    println!();
    println!("Commands:");
    println!("  scan <file>          Print every token matched from the start of <file>");
    println!("  explain              Print the compiled batches and their members");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Patterns:");
    println!("  name=/source/flags   Literal pattern; flags from i, m, g");
    println!("  name=TEMPLATE        Template such as {{word+}} or {{number}}");
    println!();
    println!("Options:");
    println!("  --delimiter <D>      Namespace delimiter (default: .)");
    println!("  --search             Skip unmatched text instead of stopping");
    println!();
    println!("Set RUST_LOG=remix=debug to trace compilation and matching.");
}
