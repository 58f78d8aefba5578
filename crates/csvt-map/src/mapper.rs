//! Attribute-tuple to entity-reference mapping backed by an append-only store.

use std::collections::BTreeSet;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, warn};

use csvt_model::{CsvtError, Header, Projection, Result, Row, RowSink};

/// What to do when an existing store maps the same attribute tuple to two
/// different references.
///
/// The store format cannot express this legitimately, but an externally
/// edited or merged file can contain it. Exact duplicate rows (same tuple,
/// same reference) are accepted under every policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep the first reference seen, ignore later conflicts.
    #[default]
    FirstWins,
    /// Keep the last reference seen.
    LastWins,
    /// Fail the load with [`CsvtError::AmbiguousMapping`].
    Reject,
}

/// Maps attribute tuples to entity reference numbers.
///
/// The mapping may be pre-existing, in which case it is extended as new
/// tuples are mapped, or created fresh. Either way the mapper owns the
/// store's append sink for the whole run; references are never removed or
/// renumbered. Running two processes against one store file is undefined
/// behavior; serialize externally.
#[derive(Debug)]
pub struct Mapper<S: RowSink> {
    sink: S,
    index: HashMap<Vec<String>, u64>,
    max_ref: u64,
    minted: u64,
    to_store_order: Projection,
}

impl<S: RowSink> Mapper<S> {
    /// Starts an empty store: writes the `[ref_field] + fields` header row
    /// immediately and assigns references from 1.
    pub fn create(ref_field: &str, fields: &[&str], mut sink: S) -> Result<Self> {
        if fields.contains(&ref_field) {
            return Err(CsvtError::InvalidReferenceField(ref_field.to_string()));
        }
        let header_row = logical_row(ref_field, fields);
        sink.write_row(&header_row)?;
        let logical = Header::new(&header_row);
        let to_store_order = logical.projection(logical.fields().iter().map(String::as_str))?;
        Ok(Self {
            sink,
            index: HashMap::new(),
            max_ref: 0,
            minted: 0,
            to_store_order,
        })
    }

    /// Loads a full existing store, then appends for the rest of the run.
    ///
    /// The store's physical column order may be any permutation of
    /// `[ref_field] + fields`; entries are indexed in the logical order
    /// given here, and rows appended later are written back in the store's
    /// own physical order.
    pub fn load<I>(
        ref_field: &str,
        fields: &[&str],
        rows: I,
        sink: S,
        policy: DuplicatePolicy,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = Result<Row>>,
    {
        let mut rows = rows.into_iter();
        let header_row = rows.next().ok_or(CsvtError::MissingHeader)??;
        let physical = Header::new(&header_row);
        check_store_fields(ref_field, fields, &physical)?;

        let logical_names = logical_row(ref_field, fields);
        let logical = Header::new(&logical_names);
        let to_store_order =
            logical.projection(physical.fields().iter().map(String::as_str))?;
        let read_order =
            physical.projection(logical_names.iter().map(String::as_str))?;

        let mut index = HashMap::new();
        let mut max_ref = 0u64;
        for row in rows {
            let row = row?;
            let entry = read_order.apply(&row)?;
            let reference: u64 =
                entry[0]
                    .parse()
                    .map_err(|source| CsvtError::InvalidReference {
                        value: entry[0].clone(),
                        source,
                    })?;
            max_ref = max_ref.max(reference);
            match index.entry(entry[1..].to_vec()) {
                Entry::Vacant(vacant) => {
                    vacant.insert(reference);
                }
                Entry::Occupied(mut occupied) => {
                    let existing = *occupied.get();
                    if existing == reference {
                        continue;
                    }
                    match policy {
                        DuplicatePolicy::FirstWins => {
                            warn!(existing, conflicting = reference, "ambiguous store entry, keeping first");
                        }
                        DuplicatePolicy::LastWins => {
                            warn!(existing, conflicting = reference, "ambiguous store entry, keeping last");
                            occupied.insert(reference);
                        }
                        DuplicatePolicy::Reject => {
                            return Err(CsvtError::AmbiguousMapping {
                                existing,
                                conflicting: reference,
                                values: occupied.key().clone(),
                            });
                        }
                    }
                }
            }
        }

        Ok(Self {
            sink,
            index,
            max_ref,
            minted: 0,
            to_store_order,
        })
    }

    /// Maps an attribute tuple to its entity reference number.
    ///
    /// Multiple calls with the same tuple return the same reference; a
    /// novel tuple gets `max_ref + 1` and is appended to the store before
    /// this returns.
    pub fn map(&mut self, values: &[String]) -> Result<u64> {
        if let Some(&reference) = self.index.get(values) {
            return Ok(reference);
        }
        self.max_ref += 1;
        self.minted += 1;
        let reference = self.max_ref;
        self.index.insert(values.to_vec(), reference);

        let mut logical: Row = Vec::with_capacity(values.len() + 1);
        logical.push(reference.to_string());
        logical.extend_from_slice(values);
        self.sink.write_row(&self.to_store_order.apply(&logical)?)?;
        debug!(reference, "minted mapping");
        Ok(reference)
    }

    /// Distinct attribute tuples currently indexed.
    #[must_use]
    pub fn mapping_count(&self) -> usize {
        self.index.len()
    }

    /// Highest reference seen or assigned so far.
    #[must_use]
    pub fn max_ref(&self) -> u64 {
        self.max_ref
    }

    /// References minted by this instance (excludes loaded entries).
    #[must_use]
    pub fn minted(&self) -> u64 {
        self.minted
    }

    /// Flushes the store sink.
    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()
    }
}

fn logical_row(ref_field: &str, fields: &[&str]) -> Row {
    std::iter::once(ref_field)
        .chain(fields.iter().copied())
        .map(str::to_string)
        .collect()
}

/// Store header must carry exactly `{ref_field} ∪ fields`, in any order.
fn check_store_fields(ref_field: &str, fields: &[&str], header: &Header) -> Result<()> {
    if fields.contains(&ref_field) {
        return Err(CsvtError::InvalidReferenceField(ref_field.to_string()));
    }
    let required: BTreeSet<&str> = std::iter::once(ref_field)
        .chain(fields.iter().copied())
        .collect();
    let present: BTreeSet<&str> = header.fields().iter().map(String::as_str).collect();

    let missing: BTreeSet<String> = required
        .difference(&present)
        .map(|name| (*name).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(CsvtError::MissingFields(missing));
    }
    let extra: BTreeSet<String> = present
        .difference(&required)
        .map(|name| (*name).to_string())
        .collect();
    if !extra.is_empty() {
        return Err(CsvtError::ExtraFields(extra));
    }
    Ok(())
}
