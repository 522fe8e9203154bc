//! Record kinds
//!
//! A kind declares the exact field set of its records and which of those
//! fields are secondary-indexed. The store itself is attribute-agnostic: it
//! only consults the kind to validate shape and to derive index entries.
//!
//! The index over field `f` is named `"f~key"`, following the ledger
//! convention `<attribute>~<primary key>` for composite index names.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::composite::{COMPOSITE_DELIMITER, MAX_UNICODE_RUNE};
use crate::error::{Error, Result};
use crate::record::Fields;

/// Suffix appended to an indexed field name to form its index name
pub const INDEX_NAME_SUFFIX: &str = "~key";

/// Index name for an indexed field
///
/// ```
/// assert_eq!(ledgerstore_core::kind::index_name("owner"), "owner~key");
/// ```
pub fn index_name(field: &str) -> String {
    format!("{}{}", field, INDEX_NAME_SUFFIX)
}

/// Declared shape of a family of records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordKind {
    /// Kind name, e.g. `"car"`
    pub name: String,
    /// Field names in positional order (the order arguments arrive in)
    pub fields: Vec<String>,
    /// Indexed fields; each must appear in `fields`
    #[serde(default)]
    pub indexes: Vec<String>,
}

impl RecordKind {
    /// Create a kind with no indexes
    pub fn new<I, S>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RecordKind {
            name: name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
            indexes: Vec::new(),
        }
    }

    /// Add an indexed field
    pub fn with_index(mut self, field: impl Into<String>) -> Self {
        self.indexes.push(field.into());
        self
    }

    /// Check the declaration itself is coherent
    ///
    /// Field names must be unique and non-empty, indexed fields must be
    /// declared fields, and index names must be encodable as composite keys.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::invalid_argument("record kind name cannot be empty"));
        }
        let mut seen = BTreeSet::new();
        for field in &self.fields {
            if field.is_empty() {
                return Err(Error::invalid_argument(format!(
                    "kind '{}' declares an empty field name",
                    self.name
                )));
            }
            if !seen.insert(field.as_str()) {
                return Err(Error::invalid_argument(format!(
                    "kind '{}' declares field '{}' twice",
                    self.name, field
                )));
            }
        }
        let mut indexed = BTreeSet::new();
        for field in &self.indexes {
            if !seen.contains(field.as_str()) {
                return Err(Error::invalid_argument(format!(
                    "kind '{}' indexes undeclared field '{}'",
                    self.name, field
                )));
            }
            if !indexed.insert(field.as_str()) {
                return Err(Error::invalid_argument(format!(
                    "kind '{}' indexes field '{}' twice",
                    self.name, field
                )));
            }
            if field.contains(COMPOSITE_DELIMITER) || field.contains(MAX_UNICODE_RUNE) {
                return Err(Error::invalid_argument(format!(
                    "kind '{}' index field {:?} contains a reserved character",
                    self.name, field
                )));
            }
        }
        Ok(())
    }

    /// Check a field map has exactly this kind's field set
    pub fn check_fields(&self, fields: &Fields) -> Result<()> {
        if fields.len() != self.fields.len() {
            return Err(Error::invalid_argument(format!(
                "kind '{}' expects {} fields, got {}",
                self.name,
                self.fields.len(),
                fields.len()
            )));
        }
        if let Some(missing) = self.fields.iter().find(|f| !fields.contains_key(f.as_str())) {
            return Err(Error::invalid_argument(format!(
                "kind '{}' is missing field '{}'",
                self.name, missing
            )));
        }
        Ok(())
    }

    /// Map positional arguments onto this kind's fields
    ///
    /// Fails with `InvalidArgument` when the argument count differs from the
    /// declared field count.
    pub fn fields_from_args(&self, args: &[String]) -> Result<Fields> {
        if args.len() != self.fields.len() {
            return Err(Error::invalid_argument(format!(
                "Incorrect number of arguments. Expecting {}",
                self.fields.len()
            )));
        }
        Ok(self
            .fields
            .iter()
            .cloned()
            .zip(args.iter().cloned())
            .collect())
    }

    /// `(field, index name)` for every indexed field
    pub fn index_names(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.indexes.iter().map(|f| (f.as_str(), index_name(f)))
    }

    /// Returns `true` if `name` is one of this kind's index names
    pub fn has_index(&self, name: &str) -> bool {
        self.index_names().any(|(_, index)| index == name)
    }
}
