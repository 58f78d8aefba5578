//! Positional join of two row streams on their single shared field.

use std::collections::BTreeSet;

use tracing::debug;

use csvt_model::{CsvtError, Header, Projection, Row, RowSink};

use crate::error::{Result, TransformError};

/// Zips two streams row by row.
///
/// The headers must share exactly one field name, the join key. Row *i* of
/// one side is paired with row *i* of the other unconditionally; the key
/// values must agree per pair. Output carries the non-key columns of the
/// left side then the right, with the key prepended only if `keep_id`.
/// Iteration stops at the shorter input.
pub fn zip<A, B, O>(rows_a: A, rows_b: B, keep_id: bool, output: &mut O) -> Result<()>
where
    A: IntoIterator<Item = csvt_model::Result<Row>>,
    B: IntoIterator<Item = csvt_model::Result<Row>>,
    O: RowSink,
{
    let mut rows_a = rows_a.into_iter();
    let mut rows_b = rows_b.into_iter();
    let header_row_a = rows_a.next().ok_or(CsvtError::MissingHeader)??;
    let header_row_b = rows_b.next().ok_or(CsvtError::MissingHeader)??;
    let header_a = Header::new(&header_row_a);
    let header_b = Header::new(&header_row_b);

    let id_field = common_field(&header_a, &header_b)?;
    debug!(%id_field, "zipping on shared field");

    let extract_id_a = header_a.extractor(&id_field)?;
    let extract_id_b = header_b.extractor(&id_field)?;
    let rest_a = excluding(&header_a, &id_field)?;
    let rest_b = excluding(&header_b, &id_field)?;

    let zip_pair = |row_a: &[String], row_b: &[String], row: u64| -> Result<Row> {
        let left = extract_id_a.extract(row_a)?;
        let right = extract_id_b.extract(row_b)?;
        if left != right {
            return Err(TransformError::IdMismatch {
                row,
                left: left.to_string(),
                right: right.to_string(),
            });
        }
        let mut out = if keep_id {
            vec![left.to_string()]
        } else {
            Vec::new()
        };
        out.extend(rest_a.apply(row_a)?);
        out.extend(rest_b.apply(row_b)?);
        Ok(out)
    };

    // The header pair goes through the same path; its key cells are both
    // the field name, so the mismatch check is trivially satisfied.
    output.write_row(&zip_pair(&header_row_a, &header_row_b, 0)?)?;
    for (row, pair) in rows_a.zip(rows_b).enumerate() {
        let (row_a, row_b) = pair;
        let zipped = zip_pair(&row_a?, &row_b?, row as u64 + 1)?;
        output.write_row(&zipped)?;
    }
    Ok(())
}

fn common_field(header_a: &Header, header_b: &Header) -> Result<String> {
    let fields_a: BTreeSet<&str> = header_a.fields().iter().map(String::as_str).collect();
    let fields_b: BTreeSet<&str> = header_b.fields().iter().map(String::as_str).collect();
    let common: BTreeSet<String> = fields_a
        .intersection(&fields_b)
        .map(|name| (*name).to_string())
        .collect();
    if common.len() != 1 {
        return Err(TransformError::BadInput { common });
    }
    Ok(common.into_iter().next().unwrap_or_default())
}

fn excluding(header: &Header, excluded: &str) -> Result<Projection> {
    let kept = header
        .fields()
        .iter()
        .map(String::as_str)
        .filter(|field| *field != excluded);
    Ok(header.projection(kept)?)
}
