//! Drop named columns, keep everything else in header order.

use std::collections::BTreeSet;

use csvt_model::{CsvtError, Header, Row, RowSink};

use crate::error::Result;

pub fn rmfields<I, O>(rows: I, fields: &[&str], output: &mut O) -> Result<()>
where
    I: IntoIterator<Item = csvt_model::Result<Row>>,
    O: RowSink,
{
    let mut rows = rows.into_iter();
    let header_row = rows.next().ok_or(CsvtError::MissingHeader)??;
    let header = Header::new(&header_row);

    let missing: BTreeSet<String> = fields
        .iter()
        .filter(|field| !header.contains(field))
        .map(|field| (*field).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(CsvtError::MissingFields(missing).into());
    }

    let kept: Vec<&str> = header
        .fields()
        .iter()
        .map(String::as_str)
        .filter(|field| !fields.contains(field))
        .collect();
    let project = header.projection(kept.iter().copied())?;

    output.write_row(&kept.iter().map(|field| (*field).to_string()).collect::<Row>())?;
    for row in rows {
        let row = row?;
        output.write_row(&project.apply(&row)?)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|cell| (*cell).to_string()).collect()
    }

    fn rows(table: &[&[&str]]) -> Vec<csvt_model::Result<Row>> {
        table.iter().map(|cells| Ok(row(cells))).collect()
    }

    #[test]
    fn drops_named_columns() {
        let input = rows(&[&["a", "b", "c"], &["a0", "b0", "c0"]]);
        let mut output: Vec<Row> = Vec::new();

        rmfields(input, &["b"], &mut output).unwrap();

        assert_eq!(output, vec![row(&["a", "c"]), row(&["a0", "c0"])]);
    }

    #[test]
    fn removing_an_absent_column_is_an_error() {
        let input = rows(&[&["a"], &["a0"]]);
        let mut output: Vec<Row> = Vec::new();

        let result = rmfields(input, &["b"], &mut output);

        assert!(matches!(
            result.unwrap_err(),
            TransformError::Model(CsvtError::MissingFields(_))
        ));
        assert!(output.is_empty());
    }
}
