use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use vm16_asm::{labels_json, load_isa, load_program, load_registers, parse_u16, render_hex};
use vm16_rs::listing::fmt_listing;
use vm16_rs::{AsmConfig, Assembler};

#[derive(Parser, Debug)]
#[command(author, version, about = "Assemble a parsed vm16 program into machine code")]
struct Opts {
    /// Parsed program as JSON (array of label/instruction statements)
    #[arg(value_name = "PROGRAM")]
    input: PathBuf,
    /// Output file for the machine code image
    #[arg(short, long)]
    output: PathBuf,
    /// Instruction table JSON (default: built-in vm16 set)
    #[arg(long, value_name = "FILE")]
    isa: Option<PathBuf>,
    /// Register names JSON array (default: built-in register file)
    #[arg(long, value_name = "FILE")]
    registers: Option<PathBuf>,
    /// Load address for label resolution (hex or dec)
    #[arg(long, default_value = "0")]
    origin: String,
    /// Warn instead of failing when a table size disagrees with the encoding
    #[arg(long)]
    lenient_sizes: bool,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Bin)]
    format: OutputFormat,
    /// Print a listing to stdout
    #[arg(long)]
    listing: bool,
    /// Export labels to JSON (Vec<{ addr, name }>)
    #[arg(long, value_name = "FILE")]
    labels_out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat { Bin, Hex }

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let program = load_program(&opts.input)?;
    let isa = load_isa(opts.isa.as_deref())?;
    let regs = load_registers(opts.registers.as_deref())?;
    for (name, meta) in isa.size_mismatches() {
        warn!(%name, declared = meta.size, encodes_to = meta.mode.encoded_size(), "instruction size disagrees with its mode");
    }

    let cfg = AsmConfig {
        origin: parse_u16(&opts.origin).context("--origin")?,
        strict_sizes: !opts.lenient_sizes,
    };
    let asm = Assembler::new(&isa, &regs, cfg)
        .assemble(&program)
        .with_context(|| format!("assembling {}", opts.input.display()))?;

    match opts.format {
        OutputFormat::Bin => std::fs::write(&opts.output, &asm.bytes)?,
        OutputFormat::Hex => std::fs::write(&opts.output, render_hex(&asm.bytes) + "\n")?,
    }
    if opts.listing {
        print!("{}", fmt_listing(&program, &asm, &isa));
    }
    if let Some(path) = &opts.labels_out {
        std::fs::write(path, labels_json(&asm.labels)?)?;
    }
    Ok(())
}
