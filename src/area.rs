//! The forecast area tree, from municipalities up to prefectural forecast districts.

use serde::Serialize;
use std::collections::BTreeMap;

mod hierarchy;
mod integrity;
mod level;
mod names;
mod resolver;
mod rows;

pub use hierarchy::{HierarchySpec, HierarchySpecs};
pub use integrity::verify;
pub use level::AreaLevel;
pub use names::{resolve_column, NameLookup};
pub use resolver::{AreaHierarchyResolver, AreaSources};
pub use rows::{is_placeholder, CityRow, ColumnGroup, NameRow, RelationRow};

/// Display name and reading of an area.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaName {
    pub name: String,
    pub kana: String,
}

/// One node of the area tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaRecord {
    /// The area code, unique across the tree.
    pub code: String,
    /// Where in the hierarchy this node sits.
    pub level: AreaLevel,
    /// Display name.
    pub name: String,
    /// Reading of the name, empty when the tables do not carry one.
    pub kana: String,
    /// Codes of the ancestors of this node, keyed by their level.
    pub parent_refs: BTreeMap<AreaLevel, String>,
}

impl AreaRecord {
    /// Create a record with no parent references.
    pub fn new(code: &str, level: AreaLevel, name: &AreaName) -> Self {
        AreaRecord {
            code: code.to_owned(),
            level,
            name: name.name.clone(),
            kana: name.kana.clone(),
            parent_refs: BTreeMap::new(),
        }
    }

    /// Get the code of the ancestor at `level`, if this node has one.
    pub fn parent(&self, level: AreaLevel) -> Option<&str> {
        self.parent_refs.get(&level).map(String::as_str)
    }

    /// Fold another write for the same code into this one.
    ///
    /// A parent reference that is set is never cleared, a later reference that is set replaces an
    /// earlier one. If the levels differ the incoming record replaces this one outright.
    pub(crate) fn merge(&mut self, incoming: AreaRecord) {
        if self.level != incoming.level {
            *self = incoming;
            return;
        }

        self.name = incoming.name;
        self.kana = incoming.kana;
        self.parent_refs.extend(incoming.parent_refs);
    }
}

/// The resolved and verified area tree, keyed by code.
///
/// The only way to get one outside this crate is from [`AreaHierarchyResolver::resolve`], which
/// runs the integrity checks before handing it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AreaTree {
    items: BTreeMap<String, AreaRecord>,
}

impl AreaTree {
    pub(crate) fn from_records(items: BTreeMap<String, AreaRecord>) -> Self {
        AreaTree { items }
    }

    /// Look up a record by code.
    pub fn get(&self, code: &str) -> Option<&AreaRecord> {
        self.items.get(code)
    }

    /// Test to see if a code is in the tree.
    pub fn contains(&self, code: &str) -> bool {
        self.items.contains_key(code)
    }

    /// Number of records in the tree.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the tree holds no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the records in code order.
    pub fn iter(&self) -> impl Iterator<Item = &AreaRecord> {
        self.items.values()
    }

    /// All the codes at a given level, in code order.
    pub fn codes_at_level(&self, level: AreaLevel) -> impl Iterator<Item = &str> {
        self.items
            .values()
            .filter(move |rec| rec.level == level)
            .map(|rec| rec.code.as_str())
    }

    /// Records whose ancestor at `level` is `code`.
    pub fn children_of<'a>(
        &'a self,
        code: &'a str,
        level: AreaLevel,
    ) -> impl Iterator<Item = &'a AreaRecord> + 'a {
        self.items
            .values()
            .filter(move |rec| rec.parent(level) == Some(code))
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
