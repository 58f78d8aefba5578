//! Column selection: reorder and rename through a field map.

use csvt_model::{CsvtError, FieldsMap, Header, Row, RowSink};

use crate::error::Result;

/// Projects each row onto the field map's input columns, writing them out
/// under the output names, in field-map order.
pub fn select<I, O>(rows: I, fields_map: &FieldsMap, output: &mut O) -> Result<()>
where
    I: IntoIterator<Item = csvt_model::Result<Row>>,
    O: RowSink,
{
    let mut rows = rows.into_iter();
    let header_row = rows.next().ok_or(CsvtError::MissingHeader)??;
    let header = Header::new(&header_row);
    let project = header.projection(fields_map.input_fields())?;

    let output_header: Row = fields_map
        .output_fields()
        .iter()
        .map(|field| (*field).to_string())
        .collect();
    output.write_row(&output_header)?;

    for row in rows {
        let row = row?;
        output.write_row(&project.apply(&row)?)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|cell| (*cell).to_string()).collect()
    }

    fn rows(table: &[&[&str]]) -> Vec<csvt_model::Result<Row>> {
        table.iter().map(|cells| Ok(row(cells))).collect()
    }

    #[test]
    fn reorders_and_renames() {
        let input = rows(&[&["a", "b", "c"], &["a0", "b0", "c0"]]);
        let map = FieldsMap::parse("c,first=a").unwrap();
        let mut output: Vec<Row> = Vec::new();

        select(input, &map, &mut output).unwrap();

        assert_eq!(output, vec![row(&["c", "first"]), row(&["c0", "a0"])]);
    }

    #[test]
    fn one_input_may_feed_two_outputs() {
        let input = rows(&[&["a"], &["a0"]]);
        let map = FieldsMap::parse("left=a,right=a").unwrap();
        let mut output: Vec<Row> = Vec::new();

        select(input, &map, &mut output).unwrap();

        assert_eq!(output, vec![row(&["left", "right"]), row(&["a0", "a0"])]);
    }

    #[test]
    fn unknown_input_field_fails_before_output() {
        let input = rows(&[&["a"], &["a0"]]);
        let map = FieldsMap::parse("b").unwrap();
        let mut output: Vec<Row> = Vec::new();

        assert!(select(input, &map, &mut output).is_err());
        assert!(output.is_empty());
    }
}
