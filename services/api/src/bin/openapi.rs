//! services/api/src/bin/openapi.rs
//!
//! Writes the OpenAPI document of the analysis API to disk.
//! Usage: `openapi [OUTPUT]` (defaults to `openapi.json`).

use api_lib::web::rest::ApiDoc;
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "openapi.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    let doc = ApiDoc::openapi();
    let route_count = doc.paths.paths.len();
    std::fs::write(&output, doc.to_pretty_json()?)?;

    println!("Wrote {} routes to {}", route_count, output);
    Ok(())
}
