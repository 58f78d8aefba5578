//! Stream-level command implementations.
//!
//! Each function here takes its inputs and outputs as generic readers and
//! writers so the binary can pass stdin/stdout and tests can pass buffers.
//! File handling for the mapping store (read-then-append, create with
//! header) lives here too.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use csvt_map::{DuplicatePolicy, EntityExtractor, ExtractStats};
use csvt_model::{FieldsMap, read_rows};
use csvt_transform::{rmfields, select, unzip, zip};

/// Builds a reader that surfaces the header as an ordinary first row.
fn row_reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().has_headers(false).from_reader(input)
}

/// Entity extraction over a mapping store file.
///
/// The store is read fully and then appended to if it exists, created with
/// a fresh header otherwise. A store whose last line lacks a trailing
/// newline (externally edited or merged) is repaired with one before
/// appending. The store file is the caller's to serialize: two concurrent
/// runs against one store are undefined behavior.
pub fn extract_map<R, W>(
    entity_fields: &str,
    ref_field: &str,
    map_file: &Path,
    policy: DuplicatePolicy,
    input: R,
    output: W,
) -> Result<ExtractStats>
where
    R: Read,
    W: Write,
{
    let ref_field_map = FieldsMap::parse(ref_field).context("parse reference field spec")?;
    let fields_map = FieldsMap::parse(entity_fields).context("parse entity fields spec")?;

    let input_rows = read_rows(row_reader(input));
    let mut data_out = csv::Writer::from_writer(output);

    let stats = if map_file.exists() {
        info!(map_file = %map_file.display(), "extending existing mapping store");
        let mut store = File::open(map_file)
            .with_context(|| format!("open mapping store {}", map_file.display()))?;
        let unterminated = missing_final_newline(&mut store)?;
        let store_rows = read_rows(row_reader(store));
        let mut append_file = OpenOptions::new()
            .append(true)
            .open(map_file)
            .with_context(|| format!("append to mapping store {}", map_file.display()))?;
        if unterminated {
            // without this, the first appended mapping would splice onto
            // the store's last record
            append_file.write_all(b"\n")?;
        }
        let appender = csv::Writer::from_writer(append_file);
        let mut extractor =
            EntityExtractor::with_existing_store(ref_field_map, fields_map, store_rows, appender, policy)?;
        extractor.extract(input_rows, &mut data_out)?
    } else {
        info!(map_file = %map_file.display(), "creating mapping store");
        let appender = csv::Writer::from_writer(
            OpenOptions::new()
                .create_new(true)
                .append(true)
                .open(map_file)
                .with_context(|| format!("create mapping store {}", map_file.display()))?,
        );
        // an invalid field spec must not leave an empty store behind; a
        // later run would see an existing file with no header and refuse it
        let mut extractor =
            match EntityExtractor::with_new_store(ref_field_map, fields_map, appender) {
                Ok(extractor) => extractor,
                Err(error) => {
                    if let Err(remove_error) = fs::remove_file(map_file) {
                        warn!(
                            map_file = %map_file.display(),
                            %remove_error,
                            "failed to remove half-created mapping store"
                        );
                    }
                    return Err(error.into());
                }
            };
        extractor.extract(input_rows, &mut data_out)?
    };

    data_out.flush()?;
    Ok(stats)
}

/// True when the file is non-empty and its last byte is not a newline.
/// Leaves the cursor back at the start.
fn missing_final_newline(file: &mut File) -> io::Result<bool> {
    let len = file.seek(SeekFrom::End(0))?;
    let missing = if len == 0 {
        false
    } else {
        file.seek(SeekFrom::End(-1))?;
        let mut tail = [0u8; 1];
        file.read_exact(&mut tail)?;
        tail[0] != b'\n'
    };
    file.seek(SeekFrom::Start(0))?;
    Ok(missing)
}

/// Zips `input` with `other` on their single shared field.
pub fn zip_streams<R1, R2, W>(input: R1, other: R2, keep_id: bool, output: W) -> Result<()>
where
    R1: Read,
    R2: Read,
    W: Write,
{
    let mut data_out = csv::Writer::from_writer(output);
    zip(
        read_rows(row_reader(input)),
        read_rows(row_reader(other)),
        keep_id,
        &mut data_out,
    )?;
    data_out.flush()?;
    Ok(())
}

/// Splits `input` into the named fields (to `spec_output`) and the rest
/// (to `rest_output`), both id-linked.
pub fn unzip_streams<R, W1, W2>(
    input: R,
    fields: &str,
    id_field: &str,
    spec_output: W1,
    rest_output: W2,
) -> Result<()>
where
    R: Read,
    W1: Write,
    W2: Write,
{
    let fields: Vec<&str> = fields.split(',').collect();
    let mut spec_out = csv::Writer::from_writer(spec_output);
    let mut rest_out = csv::Writer::from_writer(rest_output);
    unzip(
        read_rows(row_reader(input)),
        &fields,
        id_field,
        &mut spec_out,
        &mut rest_out,
    )?;
    spec_out.flush()?;
    rest_out.flush()?;
    Ok(())
}

/// Selects, reorders and renames columns through a field map.
pub fn select_streams<R, W>(input: R, fields: &str, output: W) -> Result<()>
where
    R: Read,
    W: Write,
{
    let fields_map = FieldsMap::parse(fields).context("parse field spec")?;
    let mut data_out = csv::Writer::from_writer(output);
    select(read_rows(row_reader(input)), &fields_map, &mut data_out)?;
    data_out.flush()?;
    Ok(())
}

/// Removes the named columns.
pub fn rmfields_streams<R, W>(input: R, fields: &str, output: W) -> Result<()>
where
    R: Read,
    W: Write,
{
    let fields: Vec<&str> = fields.split(',').collect();
    let mut data_out = csv::Writer::from_writer(output);
    rmfields(read_rows(row_reader(input)), &fields, &mut data_out)?;
    data_out.flush()?;
    Ok(())
}
