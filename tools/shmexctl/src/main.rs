// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! shmexctl - Inspect and clean up shmex shared memory segments
//!
//! Lists the exchange segments in /dev/shm with their kind and sizes,
//! and unlinks segments left behind by crashed hosts.

use clap::{Parser, Subcommand};
use colored::*;
use shmex::channel::{
    cleanup_all_segments, cleanup_instance_segments, ShmSegment, CHANNEL_MAGIC, SEGMENT_PREFIX,
};
use shmex::config::dictionary::DICT_MAGIC;
use std::fs;
use std::path::Path;

/// Inspect and clean up shmex shared memory segments
#[derive(Parser, Debug)]
#[command(name = "shmexctl")]
#[command(version)]
#[command(about = "Inspect and clean up shmex shared memory segments")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List shmex segments with kind and size
    List,

    /// Unlink segments of one instance, or all shmex segments
    Cleanup {
        /// Instance whose segments to remove
        #[arg(short, long, conflicts_with = "all")]
        instance: Option<String>,

        /// Remove every shmex segment
        #[arg(short, long)]
        all: bool,
    },
}

#[derive(Debug)]
struct SegmentInfo {
    name: String,
    file_size: u64,
    kind: SegmentKind,
}

#[derive(Debug)]
enum SegmentKind {
    Channel,
    Dictionary,
    Unknown,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    match &args.command {
        Command::List => list(),
        Command::Cleanup { instance, all } => cleanup(instance.as_deref(), *all),
    }
}

fn list() -> Result<(), Box<dyn std::error::Error>> {
    let shm_dir = Path::new("/dev/shm");
    if !shm_dir.exists() {
        return Err("Shared memory directory /dev/shm not found".into());
    }

    let mut segments = Vec::new();
    for entry in fs::read_dir(shm_dir)?.flatten() {
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if !name.starts_with(SEGMENT_PREFIX) {
            continue;
        }
        let file_size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        segments.push(SegmentInfo {
            kind: probe_kind(&format!("/{name}")),
            name: name.to_string(),
            file_size,
        });
    }
    segments.sort_by(|a, b| a.name.cmp(&b.name));

    if segments.is_empty() {
        println!("No shmex segments found.");
        return Ok(());
    }

    println!(
        "{:<48} {:>10}  {}",
        "SEGMENT".bold(),
        "SIZE".bold(),
        "KIND".bold()
    );
    for seg in &segments {
        let kind = match seg.kind {
            SegmentKind::Channel => "channel".green(),
            SegmentKind::Dictionary => "dictionary".cyan(),
            SegmentKind::Unknown => "unknown".yellow(),
        };
        println!("{:<48} {:>10}  {}", seg.name, seg.file_size, kind);
    }
    println!("\n{} segment(s)", segments.len());
    Ok(())
}

/// Classify a segment by the magic in its first word.
fn probe_kind(name: &str) -> SegmentKind {
    let Ok(seg) = ShmSegment::open(name, 64) else {
        return SegmentKind::Unknown;
    };
    // SAFETY: The mapping is at least 64 bytes and page-aligned; both
    // layouts put a u32 magic at offset 0.
    let magic = unsafe { *(seg.as_ptr() as *const u32) };
    match magic {
        CHANNEL_MAGIC => SegmentKind::Channel,
        DICT_MAGIC => SegmentKind::Dictionary,
        _ => SegmentKind::Unknown,
    }
}

fn cleanup(instance: Option<&str>, all: bool) -> Result<(), Box<dyn std::error::Error>> {
    let removed = match (instance, all) {
        (Some(instance), false) => cleanup_instance_segments(instance),
        (None, true) => cleanup_all_segments(),
        _ => return Err("Pass either --instance <name> or --all".into()),
    };
    if removed == 0 {
        println!("Nothing to clean up.");
    } else {
        println!("{} {} segment(s) unlinked", "OK".green().bold(), removed);
    }
    Ok(())
}
