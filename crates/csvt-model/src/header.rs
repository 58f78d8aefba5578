//! Name-addressed access into rows whose shape was fixed by a first row.

use std::collections::BTreeSet;
use std::collections::HashMap;

use crate::error::{CsvtError, Result};
use crate::row::Row;

/// Bidirectional index between field names and column positions.
///
/// Built once per stream from its first row; positions stay valid for the
/// stream's lifetime. Duplicate names are tolerated here (the first
/// occurrence wins on lookup); output-side uniqueness is enforced by
/// [`FieldsMap`](crate::fields::FieldsMap) instead.
#[derive(Debug, Clone)]
pub struct Header {
    fields: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Header {
    pub fn new(header_row: &[String]) -> Self {
        let fields: Vec<String> = header_row.to_vec();
        let mut positions = HashMap::with_capacity(fields.len());
        for (position, field) in fields.iter().enumerate() {
            positions.entry(field.clone()).or_insert(position);
        }
        Self { fields, positions }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Field names in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Single-column extractor for `name`.
    ///
    /// Callers are expected to pre-validate their field sets; an unknown
    /// name is reported as [`CsvtError::MissingFields`] rather than
    /// defaulted away.
    pub fn extractor(&self, name: &str) -> Result<FieldExtractor> {
        self.position(name)
            .map(|position| FieldExtractor { position })
            .ok_or_else(|| {
                CsvtError::MissingFields(BTreeSet::from([name.to_string()]))
            })
    }

    /// Batch form of [`extractor`](Self::extractor): one extractor per
    /// requested name, in request order, composed into a [`Projection`].
    pub fn projection<'a, I>(&self, names: I) -> Result<Projection>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let extractors = names
            .into_iter()
            .map(|name| self.extractor(name))
            .collect::<Result<Vec<_>>>()?;
        Ok(Projection { extractors })
    }
}

/// Resolved column position; reads one cell out of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldExtractor {
    position: usize,
}

impl FieldExtractor {
    /// Reads the cell at the resolved position.
    ///
    /// `csv` readers reject ragged rows at the boundary, but rows handed
    /// in directly are not pre-checked; a row shorter than the header it
    /// was resolved against is reported as [`CsvtError::ShortRow`].
    pub fn extract<'r>(&self, row: &'r [String]) -> Result<&'r str> {
        row.get(self.position)
            .map(String::as_str)
            .ok_or(CsvtError::ShortRow {
                position: self.position,
                len: row.len(),
            })
    }
}

/// An ordered sequence of extractors applied as one.
///
/// This is the single primitive behind every projection, permutation and
/// output re-assembly in the system: apply all extractors, preserve order.
#[derive(Debug, Clone, Default)]
pub struct Projection {
    extractors: Vec<FieldExtractor>,
}

impl Projection {
    #[must_use]
    pub fn new(extractors: Vec<FieldExtractor>) -> Self {
        Self { extractors }
    }

    pub fn apply(&self, row: &[String]) -> Result<Row> {
        self.extractors
            .iter()
            .map(|extractor| Ok(extractor.extract(row)?.to_string()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}
