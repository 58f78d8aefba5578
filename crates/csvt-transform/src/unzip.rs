//! Vertical split of one stream into two, linked by a synthetic id column.

use csvt_model::{CsvtError, Header, Row, RowSink};

use crate::error::Result;

/// Splits `rows` into two streams: the named `fields` (in given order) and
/// everything else (in header order), each prefixed with a synthetic id
/// column so the halves can be zipped back together. Data rows are numbered
/// from 0; the header rows carry `id_field` as the id cell.
///
/// Fails with `DuplicateFields` if `id_field` already exists in the source.
pub fn unzip<I, S, U>(
    rows: I,
    fields: &[&str],
    id_field: &str,
    spec_output: &mut S,
    rest_output: &mut U,
) -> Result<()>
where
    I: IntoIterator<Item = csvt_model::Result<Row>>,
    S: RowSink,
    U: RowSink,
{
    let mut rows = rows.into_iter();
    let header_row = rows.next().ok_or(CsvtError::MissingHeader)??;
    let header = Header::new(&header_row);

    if header.contains(id_field) {
        return Err(CsvtError::DuplicateFields(vec![id_field.to_string()]).into());
    }

    let extract_spec = header.projection(fields.iter().copied())?;
    let rest_fields = header
        .fields()
        .iter()
        .map(String::as_str)
        .filter(|field| !fields.contains(field));
    let extract_rest = header.projection(rest_fields)?;

    let mut split_row = |id_cell: String, row: &[String]| -> Result<()> {
        let mut spec_row = vec![id_cell.clone()];
        spec_row.extend(extract_spec.apply(row)?);
        spec_output.write_row(&spec_row)?;

        let mut rest_row = vec![id_cell];
        rest_row.extend(extract_rest.apply(row)?);
        rest_output.write_row(&rest_row)?;
        Ok(())
    };

    split_row(id_field.to_string(), &header_row)?;
    for (id, row) in rows.enumerate() {
        let row = row?;
        split_row(id.to_string(), &row)?;
    }
    Ok(())
}
