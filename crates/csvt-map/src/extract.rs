//! Streams a data source through a [`Mapper`], replacing repeated entity
//! attribute tuples with a reference column appended to each row.

use serde::Serialize;
use tracing::info;

use csvt_model::{CsvtError, FieldsMap, Header, Result, Row, RowSink};

use crate::mapper::{DuplicatePolicy, Mapper};

/// Counters for one extraction run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ExtractStats {
    /// Data rows streamed through (header excluded).
    pub rows: u64,
    /// References newly assigned during this run.
    pub minted: u64,
    /// Distinct attribute tuples known after the run.
    pub total_mappings: usize,
    /// Highest reference in the store after the run.
    pub max_ref: u64,
}

/// Extracts entities from a row stream and replaces them with references.
///
/// `ref_field_map` names the reference column: its output side is the
/// store's reference field, its input side the column appended to the main
/// output. `fields_map` names the entity attributes: input side read from
/// the data stream, output side written to the store header.
///
/// All original columns are retained; the reference column is appended
/// after them.
#[derive(Debug)]
pub struct EntityExtractor<S: RowSink> {
    ref_field_map: FieldsMap,
    fields_map: FieldsMap,
    mapper: Mapper<S>,
}

impl<S: RowSink> EntityExtractor<S> {
    /// Extractor over a store created fresh for this run.
    pub fn with_new_store(
        ref_field_map: FieldsMap,
        fields_map: FieldsMap,
        store_sink: S,
    ) -> Result<Self> {
        let ref_field = single_ref_field(&ref_field_map)?;
        let mapper = Mapper::create(ref_field, &fields_map.output_fields(), store_sink)?;
        Ok(Self {
            ref_field_map,
            fields_map,
            mapper,
        })
    }

    /// Extractor over an existing store, loaded fully before any row of the
    /// main stream is touched.
    pub fn with_existing_store<I>(
        ref_field_map: FieldsMap,
        fields_map: FieldsMap,
        store_rows: I,
        store_sink: S,
        policy: DuplicatePolicy,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = Result<Row>>,
    {
        let ref_field = single_ref_field(&ref_field_map)?;
        let mapper = Mapper::load(
            ref_field,
            &fields_map.output_fields(),
            store_rows,
            store_sink,
            policy,
        )?;
        Ok(Self {
            ref_field_map,
            fields_map,
            mapper,
        })
    }

    /// Streams `rows` to `output`, one in, one out: each data row is copied
    /// verbatim with its entity's reference appended. The mapping store is
    /// the only accumulated state.
    pub fn extract<I, O>(&mut self, rows: I, output: &mut O) -> Result<ExtractStats>
    where
        I: IntoIterator<Item = Result<Row>>,
        O: RowSink,
    {
        let mut rows = rows.into_iter();
        let header_row = rows.next().ok_or(CsvtError::MissingHeader)??;
        let header = Header::new(&header_row);
        let extract_entity = header.projection(self.fields_map.input_fields())?;

        let mut output_header = header_row;
        output_header.extend(
            self.ref_field_map
                .input_fields()
                .iter()
                .map(|field| (*field).to_string()),
        );
        output.write_row(&output_header)?;

        let mut stats = ExtractStats::default();
        for row in rows {
            let mut row = row?;
            let reference = self.mapper.map(&extract_entity.apply(&row)?)?;
            row.push(reference.to_string());
            output.write_row(&row)?;
            stats.rows += 1;
        }
        self.mapper.flush()?;
        stats.minted = self.mapper.minted();
        stats.total_mappings = self.mapper.mapping_count();
        stats.max_ref = self.mapper.max_ref();
        info!(
            rows = stats.rows,
            minted = stats.minted,
            total = stats.total_mappings,
            "extraction finished"
        );
        Ok(stats)
    }
}

fn single_ref_field(ref_field_map: &FieldsMap) -> Result<&str> {
    let outputs = ref_field_map.output_fields();
    if outputs.len() != 1 {
        return Err(CsvtError::InvalidReferenceSpec(outputs.len()));
    }
    Ok(outputs[0])
}
