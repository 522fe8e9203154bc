//! Record kind registry
//!
//! The registry is built once from configuration and shared read-only by
//! every call. It answers two questions for the store: which fields a kind
//! must carry, and which kind an index name belongs to.

use std::collections::BTreeMap;

use ledgerstore_core::{Error, Limits, RecordKind, Result};

/// Registered record kinds plus the key limits they are validated against
#[derive(Debug, Clone, Default)]
pub struct KindRegistry {
    kinds: BTreeMap<String, RecordKind>,
    limits: Limits,
}

impl KindRegistry {
    /// Empty registry
    pub fn new(limits: Limits) -> Self {
        KindRegistry {
            kinds: BTreeMap::new(),
            limits,
        }
    }

    /// Build a registry from a list of kinds
    pub fn from_kinds<I>(kinds: I, limits: Limits) -> Result<Self>
    where
        I: IntoIterator<Item = RecordKind>,
    {
        let mut registry = KindRegistry::new(limits);
        for kind in kinds {
            registry.register(kind)?;
        }
        Ok(registry)
    }

    /// Add a kind
    ///
    /// Fails if the declaration is incoherent, the name is taken, or one of
    /// its index names is already owned by another kind.
    pub fn register(&mut self, kind: RecordKind) -> Result<()> {
        kind.validate()?;
        if self.kinds.contains_key(&kind.name) {
            return Err(Error::invalid_argument(format!(
                "record kind '{}' registered twice",
                kind.name
            )));
        }
        for (_, index) in kind.index_names() {
            if let Some((owner, _)) = self.index_owner(&index) {
                return Err(Error::invalid_argument(format!(
                    "index '{}' of kind '{}' is already declared by kind '{}'",
                    index, kind.name, owner.name
                )));
            }
        }
        self.kinds.insert(kind.name.clone(), kind);
        Ok(())
    }

    /// Look up a kind; unknown kinds are an `InvalidArgument`
    pub fn get(&self, name: &str) -> Result<&RecordKind> {
        self.kinds
            .get(name)
            .ok_or_else(|| Error::invalid_argument(format!("unknown record kind '{}'", name)))
    }

    /// Returns `true` if `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    /// The kind and field an index name was derived from
    pub fn index_owner(&self, index: &str) -> Option<(&RecordKind, &str)> {
        self.kinds.values().find_map(|kind| {
            kind.index_names()
                .find(|(_, name)| name == index)
                .map(|(field, _)| (kind, field))
        })
    }

    /// Key limits applied to primary keys
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Registered kinds in name order
    pub fn kinds(&self) -> impl Iterator<Item = &RecordKind> + '_ {
        self.kinds.values()
    }
}
