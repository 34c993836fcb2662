// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

use anyhow::{bail, Context, Result};
use shmex_gen::codegen::{generate_module, manifest_json};
use shmex_gen::parser::load_schema;
use std::env;
use std::path::PathBuf;

fn main() {
    // Initialize tracing for diagnostics
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        return;
    }

    match args[1].as_str() {
        "generate" => {
            if let Err(e) = generate(&args[2..]) {
                eprintln!("[ERROR] {e:#}");
                std::process::exit(1);
            }
        }
        "check" => {
            if let Err(e) = check(&args[2..]) {
                eprintln!("[ERROR] {e:#}");
                std::process::exit(1);
            }
        }
        "--help" | "-h" | "help" => {
            print_help();
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_help();
            std::process::exit(1);
        }
    }
}

fn generate(args: &[String]) -> Result<()> {
    let mut schemas: Vec<PathBuf> = Vec::new();
    let mut out_dir = PathBuf::from(".");
    let mut manifest_dir: Option<PathBuf> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--out-dir" => {
                i += 1;
                out_dir = PathBuf::from(args.get(i).context("--out-dir needs a value")?);
            }
            "--manifest-dir" => {
                i += 1;
                manifest_dir =
                    Some(PathBuf::from(args.get(i).context("--manifest-dir needs a value")?));
            }
            other if other.starts_with("--") => bail!("Unknown option: {other}"),
            other => schemas.push(PathBuf::from(other)),
        }
        i += 1;
    }
    if schemas.is_empty() {
        bail!("No schema files given");
    }

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Cannot create {}", out_dir.display()))?;
    if let Some(dir) = &manifest_dir {
        std::fs::create_dir_all(dir).with_context(|| format!("Cannot create {}", dir.display()))?;
    }

    for schema_path in &schemas {
        let module = load_schema(schema_path)?;
        tracing::info!(
            "Generating module {} ({} types, {} enums)",
            module.name,
            module.types.len(),
            module.enums.len()
        );

        let code = generate_module(&module);
        let code_path = out_dir.join(format!("{}.rs", module.name));
        std::fs::write(&code_path, code)
            .with_context(|| format!("Cannot write {}", code_path.display()))?;
        tracing::info!("Wrote {}", code_path.display());

        let manifest = manifest_json(&module)?;
        let manifest_path = manifest_dir
            .as_ref()
            .unwrap_or(&out_dir)
            .join(format!("{}.manifest.json", module.name));
        std::fs::write(&manifest_path, manifest)
            .with_context(|| format!("Cannot write {}", manifest_path.display()))?;
        tracing::info!("Wrote {}", manifest_path.display());
    }

    Ok(())
}

fn check(args: &[String]) -> Result<()> {
    if args.is_empty() {
        bail!("No schema files given");
    }
    for path in args {
        let module = load_schema(&PathBuf::from(path))?;
        println!("module {} ({path})", module.name);
        for ty in &module.types {
            println!(
                "  [{}] {:<24} hash {:016x}  fixed {:>4} B  align {}{}",
                ty.type_index,
                ty.name,
                ty.type_hash,
                ty.fixed_size,
                ty.alignment,
                if ty.has_variable_data { "  +var" } else { "" }
            );
        }
    }
    Ok(())
}

fn print_help() {
    println!("shmex-gen v0.3");
    println!();
    println!("USAGE:");
    println!("    shmex-gen <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    generate <schema.json>... [--out-dir DIR] [--manifest-dir DIR]");
    println!("               Emit Rust modules and JSON manifests");
    println!("    check <schema.json>...");
    println!("               Resolve schemas and print layouts and hashes");
    println!("    help       Print this help message");
    println!();
    println!("EXAMPLES:");
    println!("    shmex-gen generate schemas/bench.json --out-dir src/generated \\");
    println!("        --manifest-dir manifests");
    println!("    shmex-gen check schemas/bench.json");
    println!();
}
