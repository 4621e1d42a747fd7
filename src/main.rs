use anyhow::Context;
use clap::Parser;
use detchannelmaps::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    let result = commands::run(args).context("detchannelmaps failed");

    if let Err(error) = result {
        // Error occurred - print the full chain to stderr and exit with error code
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}
