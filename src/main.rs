use bindxml_reader::{BindXmlReader, DefaultSource, Source, StatisticsSnapshot, DEFAULT_PORT};
use std::env;
use std::time::Duration;

fn usage(program: &str) -> ! {
    eprintln!(
        "Usage: {} [--xml <path>] | [--host <host> [--port <port>] [--timeout <seconds>]]",
        program
    );
    eprintln!("  --port defaults to {}; set RUST_LOG for diagnostics.", DEFAULT_PORT);
    std::process::exit(1);
}

/// Value following `flag`, if the flag was given.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let idx = args.iter().position(|arg| arg == flag)?;
    match args.get(idx + 1) {
        Some(value) if !value.starts_with("--") => Some(value.as_str()),
        _ => {
            eprintln!("ERROR: {} flag requires an argument.", flag);
            std::process::exit(1);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("bindxml-reader");

    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        usage(program);
    }

    let source = if let Some(path) = flag_value(&args, "--xml") {
        Source::file(path)
    } else if let Some(host) = flag_value(&args, "--host") {
        let port = match flag_value(&args, "--port") {
            Some(port) => port.parse::<u16>().unwrap_or_else(|_| {
                eprintln!("ERROR: Invalid port '{}'.", port);
                std::process::exit(1);
            }),
            None => DEFAULT_PORT,
        };
        Source::http(host, port)
    } else {
        usage(program);
    };

    let fetcher = match flag_value(&args, "--timeout") {
        Some(secs) => match secs.parse::<u64>() {
            Ok(secs) => DefaultSource::with_timeout(Duration::from_secs(secs)),
            Err(_) => {
                eprintln!("ERROR: Invalid timeout '{}'.", secs);
                std::process::exit(1);
            }
        },
        None => DefaultSource::new(),
    };

    match BindXmlReader::with_source(fetcher).load(&source) {
        Ok(snapshot) => print_snapshot(&snapshot),
        Err(e) => {
            eprintln!("ERROR: Failed to read BIND statistics from {}", source);
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}

fn print_snapshot(snapshot: &StatisticsSnapshot) {
    println!("XML version: {}", snapshot.version());

    println!("\nMemory stats:");
    for (name, value) in snapshot.memory() {
        println!("  {}: {}", name, value);
    }

    println!("\nQuery stats:");
    for (name, value) in snapshot.queries() {
        println!("  {}: {}", name, value);
    }

    let zones = snapshot.zones();
    println!("\nZones ({}):", zones.zone_count());
    for (zone, view, data) in zones.iter() {
        println!(
            "  {} [{}] serial={} counters={}",
            zone,
            view,
            data.serial,
            data.counters.len()
        );
    }
}
