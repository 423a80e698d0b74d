//! Fetches a URL and prints its card as JSON.
//!
//! Usage: `og_fetch URL`
//!
//! Fetch failures print the structured `{status, httpCode, message, url}`
//! object and exit with status 2.

use og_card::fetch::{fetch, FetchOptions};
use og_card::Error;

fn main() {
    env_logger::init();

    let Some(url) = std::env::args().nth(1) else {
        eprintln!("Usage: og_fetch URL");
        std::process::exit(1);
    };

    let opts = FetchOptions {
        client_user_agent: std::env::var("OG_USER_AGENT").ok(),
        locale: std::env::var("OG_LOCALE").ok(),
        ..FetchOptions::default()
    };

    let (json, code) = match fetch(&url, &opts) {
        Ok(card) => (serde_json::to_string_pretty(&card), 0),
        Err(Error::Fetch(err)) => (serde_json::to_string_pretty(&err), 2),
        Err(e) => (
            serde_json::to_string_pretty(&serde_json::json!({ "error": e.to_string() })),
            3,
        ),
    };

    println!("{}", json.unwrap_or_default());
    std::process::exit(code);
}
