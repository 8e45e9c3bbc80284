// src/bin/write_openapi_snapshot.rs
use anyhow::Result;
use std::{env, path::Path};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let output_path =
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| "spec/openapi.json".to_string());
    expedientes::presentation::http::openapi::write_openapi_snapshot(Path::new(&output_path))?;
    println!("OpenAPI snapshot written to {output_path}");
    Ok(())
}
