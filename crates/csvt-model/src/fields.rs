//! The `[out=]in` field-mapping mini-language.

use crate::error::{CsvtError, Result};

/// One `[output=]input` pair. Without `=`, output and input are the same
/// name. Names are taken literally: no trimming, no quoting of `,` or `=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub output: String,
    pub input: String,
}

impl FieldSpec {
    fn parse(spec: &str) -> Self {
        match spec.split_once('=') {
            Some((output, input)) => {
                // "a=" means the same as plain "a".
                let input = if input.is_empty() { output } else { input };
                Self {
                    output: output.to_string(),
                    input: input.to_string(),
                }
            }
            None => Self {
                output: spec.to_string(),
                input: spec.to_string(),
            },
        }
    }
}

/// Ordered field-spec list with unique output names.
///
/// Duplicate *input* names are fine (one input column may feed two
/// differently named outputs); a duplicate *output* name is a hard error.
#[derive(Debug, Clone)]
pub struct FieldsMap {
    specs: Vec<FieldSpec>,
}

impl FieldsMap {
    pub fn new(specs: Vec<FieldSpec>) -> Result<Self> {
        let mut seen = Vec::with_capacity(specs.len());
        let mut duplicates = Vec::new();
        for spec in &specs {
            if seen.contains(&spec.output.as_str()) {
                duplicates.push(spec.output.clone());
            } else {
                seen.push(spec.output.as_str());
            }
        }
        if !duplicates.is_empty() {
            return Err(CsvtError::DuplicateFields(duplicates));
        }
        Ok(Self { specs })
    }

    /// Parses a comma-separated list of field specs.
    pub fn parse(field_maps: &str) -> Result<Self> {
        Self::new(field_maps.split(',').map(FieldSpec::parse).collect())
    }

    #[must_use]
    pub fn specs(&self) -> &[FieldSpec] {
        &self.specs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Input-side names, parallel to [`output_fields`](Self::output_fields).
    #[must_use]
    pub fn input_fields(&self) -> Vec<&str> {
        self.specs.iter().map(|spec| spec.input.as_str()).collect()
    }

    /// Output-side names, parallel to [`input_fields`](Self::input_fields).
    #[must_use]
    pub fn output_fields(&self) -> Vec<&str> {
        self.specs.iter().map(|spec| spec.output.as_str()).collect()
    }
}
