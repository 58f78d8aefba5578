//! Thin wiring from parsed arguments to the stream-level pipeline.

use std::fs::{self, File};
use std::io;

use anyhow::{Context, Result};
use tracing::debug;

use csvt_cli::pipeline::{
    extract_map, rmfields_streams, select_streams, unzip_streams, zip_streams,
};

use crate::cli::{ExtractMapArgs, RmfieldsArgs, SelectArgs, UnzipArgs, ZipArgs};
use crate::summary::print_summary;

pub fn run_extract_map(args: &ExtractMapArgs) -> Result<()> {
    let stats = extract_map(
        &args.entity_fields,
        &args.ref_field,
        &args.map_file,
        args.duplicates.into(),
        io::stdin().lock(),
        io::stdout().lock(),
    )?;
    print_summary(args.summary, &stats, &args.map_file);
    Ok(())
}

pub fn run_zip(args: &ZipArgs) -> Result<()> {
    let other = File::open(&args.other_file)
        .with_context(|| format!("open {}", args.other_file.display()))?;
    zip_streams(io::stdin().lock(), other, args.keep_id, io::stdout().lock())?;
    if args.remove_other_file {
        debug!(file = %args.other_file.display(), "removing zipped input");
        fs::remove_file(&args.other_file)
            .with_context(|| format!("remove {}", args.other_file.display()))?;
    }
    Ok(())
}

pub fn run_unzip(args: &UnzipArgs) -> Result<()> {
    let rest = File::create(&args.rest_file)
        .with_context(|| format!("create {}", args.rest_file.display()))?;
    unzip_streams(
        io::stdin().lock(),
        &args.fields,
        &args.id_field,
        io::stdout().lock(),
        rest,
    )
}

pub fn run_select(args: &SelectArgs) -> Result<()> {
    select_streams(io::stdin().lock(), &args.fields, io::stdout().lock())
}

pub fn run_rmfields(args: &RmfieldsArgs) -> Result<()> {
    rmfields_streams(io::stdin().lock(), &args.fields, io::stdout().lock())
}
