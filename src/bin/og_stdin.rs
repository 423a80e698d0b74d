//! Reads HTML from stdin and prints the card as JSON on stdout.
//!
//! Usage: `og_stdin [--no-probe] [RESOURCE_URL] < page.html`
//!
//! `--no-probe` skips image downloads; only declared `<img width>` values
//! can then qualify. Set `RUST_LOG=debug` to see which tags and images were
//! skipped.

use og_card::{parse_bytes, parse_bytes_with_probe, NoProbe, Options};
use std::io::{self, Read};

fn main() {
    env_logger::init();

    let mut html = Vec::new();
    if io::stdin().read_to_end(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    let (flags, positional): (Vec<String>, Vec<String>) =
        std::env::args().skip(1).partition(|arg| arg.starts_with("--"));
    let no_probe = flags.iter().any(|flag| flag == "--no-probe");

    let options = Options {
        url: positional.into_iter().next(),
        locale: std::env::var("OG_LOCALE").ok(),
        ..Options::default()
    };

    let result = if no_probe {
        parse_bytes_with_probe(&html, &options, &NoProbe)
    } else {
        parse_bytes(&html, &options)
    };

    let json = match result {
        Ok(card) => serde_json::to_string_pretty(&card),
        Err(e) => serde_json::to_string_pretty(&serde_json::json!({ "error": e.to_string() })),
    };

    println!("{}", json.unwrap_or_default());
}
