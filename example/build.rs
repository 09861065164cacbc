//! Build script for umsg-example
//!
//! Compiles every `schemas/*.umsg` file into Rust under `OUT_DIR`, laid out
//! by namespace exactly as `umsg-gen -o $OUT_DIR` would. `src/lib.rs` pulls
//! the results in with `include!`.

use std::{env, fs, path::PathBuf};

use umsg_compiler::{compile_file, output_path, write_if_changed, GenOptions, Target};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let schema_dir = manifest_dir.join("schemas");

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed={}", schema_dir.display());

    let mut schemas: Vec<PathBuf> = fs::read_dir(&schema_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map_or(false, |ext| ext == "umsg"))
        .collect();
    // read_dir order is platform dependent
    schemas.sort();

    for schema in &schemas {
        println!("cargo:rerun-if-changed={}", schema.display());
        let options = GenOptions::new(Target::Rust).with_source(schema);
        let (message, code) = compile_file(schema, &options)?;
        write_if_changed(&output_path(&out_dir, &message, Target::Rust), &code)?;
    }

    Ok(())
}
