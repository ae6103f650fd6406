//! Build script for chartify.
//!
//! Copies the `.env.example` configuration template into the user's local
//! data directory (`<data_local_dir>/chartify/.env.example`), next to the
//! `.env` file the CLI loads at startup. A missing template or an unwritable
//! data directory only produces a cargo warning.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Re-run if the template changes
    println!("cargo:rerun-if-changed=.env.example");

    // Where to copy FROM (crate root)
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    // Target is the local data dir, created if missing
    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("chartify");

    // Only copy if the source exists; otherwise warn instead of failing
    if !env_example_path.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
        return Ok(());
    }

    let contents = fs::read_to_string(&env_example_path)?;
    if let Err(e) = fs::create_dir_all(&out_dir)
        .and_then(|_| fs::write(out_dir.join(".env.example"), contents))
    {
        println!(
            "cargo:warning=could not copy .env.example to {}: {}",
            out_dir.display(),
            e
        );
    }

    Ok(())
}
