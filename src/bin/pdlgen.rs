//! Generate target-language source from a protocol description JSON file.
//!
//! Usage:
//!   pdlgen [OPTIONS] protocol.json
//!
//! Options:
//!   --lang, -l <key>   Target language key from the generator registry (default: go)
//!   --base, -b <path>  Cross-package base import path (default: github.com/example/proto)
//!   --out, -o <dir>    Output directory (default: out)
//!
//! Reads the protocol description, runs the selected generator, and writes
//! every returned buffer under the output directory, creating directories as
//! needed. Set RUST_LOG=pdlgen=debug for per-domain progress.

use anyhow::{bail, Context};
use pdlgen::{generators, Protocol};
use std::fs;
use std::path::PathBuf;

fn take_flag_value(args: &mut Vec<String>, long: &str, short: &str) -> Option<String> {
    let pos = args.iter().position(|a| a == long || a == short)?;
    if pos + 1 >= args.len() {
        return None;
    }
    args.remove(pos);
    Some(args.remove(pos))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let lang = take_flag_value(&mut args, "--lang", "-l").unwrap_or_else(|| "go".to_string());
    let base = take_flag_value(&mut args, "--base", "-b")
        .unwrap_or_else(|| "github.com/example/proto".to_string());
    let out_dir = take_flag_value(&mut args, "--out", "-o").unwrap_or_else(|| "out".to_string());

    let input = match args.as_slice() {
        [one] => one.clone(),
        [] => bail!("missing protocol description file (see --help in module docs)"),
        _ => bail!("expected exactly one protocol description file, got {}", args.len()),
    };

    let table = generators();
    let generator = table.get(lang.as_str()).copied().with_context(|| {
        format!(
            "unknown target language `{}` (registered: {})",
            lang,
            table.keys().copied().collect::<Vec<_>>().join(", ")
        )
    })?;

    let protocol = Protocol::from_file(&input)?;
    let emitter = generator(&protocol.domains, &base)
        .with_context(|| format!("generation failed for {}", input))?;

    let out_root = PathBuf::from(out_dir);
    let mut written = 0usize;
    for (path, content) in emitter.emit() {
        let dest = out_root.join(&path);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&dest, content).with_context(|| format!("writing {}", dest.display()))?;
        written += 1;
    }
    eprintln!("pdlgen: {} file(s) written to {}", written, out_root.display());
    Ok(())
}
