//! Join of the two matome relation tables.

use log::debug;
use std::collections::BTreeMap;

use super::rows::{is_placeholder, present, RelationRow};
use crate::errors::CodeTableErr;

/// What the relation tables know about one matome area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchySpec {
    /// The primary subdivision the matome area belongs to.
    pub ichiji_code: String,
    /// The prefectural forecast district, from the warning table.
    pub fuken_code: Option<String>,
    /// The announcement subdivision, from the tornado table.
    pub saibun_code: Option<String>,
}

impl HierarchySpec {
    /// Fold a later write into this one. A value that is set replaces the old value, a missing
    /// value never clears one.
    fn merge(&mut self, fuken_code: Option<String>, saibun_code: Option<String>) {
        if fuken_code.is_some() {
            self.fuken_code = fuken_code;
        }
        if saibun_code.is_some() {
            self.saibun_code = saibun_code;
        }
    }

    /// All the codes this spec refers to.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.ichiji_code.as_str())
            .chain(self.fuken_code.as_deref())
            .chain(self.saibun_code.as_deref())
    }
}

/// Hierarchy specs keyed by matome code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchySpecs {
    specs: BTreeMap<String, HierarchySpec>,
}

/// Which field of the spec the relation table supplies.
#[derive(Clone, Copy)]
enum Contributes {
    Fuken,
    Saibun,
}

impl HierarchySpecs {
    /// Join the warning relation table (which supplies fuken codes) and the tornado relation
    /// table (which supplies saibun codes).
    ///
    /// Fails if the tables give different ichiji codes for the same matome code.
    pub fn fold(
        warning_rows: &[RelationRow],
        tornado_rows: &[RelationRow],
    ) -> Result<Self, CodeTableErr> {
        let mut specs = HierarchySpecs::default();

        specs.fold_table(warning_rows, Contributes::Fuken)?;
        specs.fold_table(tornado_rows, Contributes::Saibun)?;

        debug!("hierarchy specs for {} matome codes", specs.len());

        Ok(specs)
    }

    fn fold_table(
        &mut self,
        rows: &[RelationRow],
        contributes: Contributes,
    ) -> Result<(), CodeTableErr> {
        for row in rows {
            if is_placeholder(&row.matome_code) {
                continue;
            }

            let matome_code = row.matome_code.trim();
            let ichiji_code = row.ichiji_code.trim();
            let parent = present(&row.parent_code).map(ToOwned::to_owned);
            let (fuken_code, saibun_code) = match contributes {
                Contributes::Fuken => (parent, None),
                Contributes::Saibun => (None, parent),
            };

            match self.specs.get_mut(matome_code) {
                Some(spec) => {
                    if spec.ichiji_code != ichiji_code {
                        return Err(CodeTableErr::IchijiMismatch {
                            matome: matome_code.to_owned(),
                            existing: spec.ichiji_code.clone(),
                            incoming: ichiji_code.to_owned(),
                        });
                    }
                    spec.merge(fuken_code, saibun_code);
                }
                None => {
                    self.specs.insert(
                        matome_code.to_owned(),
                        HierarchySpec {
                            ichiji_code: ichiji_code.to_owned(),
                            fuken_code,
                            saibun_code,
                        },
                    );
                }
            }
        }

        Ok(())
    }

    /// Get the spec for a matome code.
    pub fn get(&self, matome_code: &str) -> Option<&HierarchySpec> {
        self.specs.get(matome_code)
    }

    /// Iterate over matome codes and their specs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HierarchySpec)> {
        self.specs.iter().map(|(code, spec)| (code.as_str(), spec))
    }

    /// Number of matome codes.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// True if neither table had any rows.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
