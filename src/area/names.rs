//! Code to name lookup, built from the master table and the city sheet.

use log::debug;
use std::collections::BTreeMap;

use super::{
    rows::{is_placeholder, present, CityRow, ColumnGroup, NameRow},
    AreaName,
};

type ColumnAccessor = fn(&ColumnGroup) -> Option<&str>;

fn preferred(group: &ColumnGroup) -> Option<&str> {
    present(&group.preferred)
}

fn alternate1(group: &ColumnGroup) -> Option<&str> {
    present(&group.alt1)
}

fn alternate2(group: &ColumnGroup) -> Option<&str> {
    present(&group.alt2)
}

fn alternate4(group: &ColumnGroup) -> Option<&str> {
    present(&group.alt4)
}

/// Order the columns of a city row are tried in. The third alternate never holds a usable name.
const FALLBACK_CHAIN: [ColumnAccessor; 4] = [preferred, alternate4, alternate2, alternate1];

/// First value along the fallback chain that is not blank or a placeholder.
pub fn resolve_column(group: &ColumnGroup) -> Option<&str> {
    FALLBACK_CHAIN.iter().find_map(|accessor| accessor(group))
}

/// Mapping from area code to name and kana.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameLookup {
    names: BTreeMap<String, AreaName>,
}

impl NameLookup {
    /// Build the lookup from the master table, then overlay the names from the city sheet.
    pub fn build(master: &[NameRow], cities: &[CityRow]) -> Self {
        let mut names = BTreeMap::new();

        for row in master {
            if is_placeholder(&row.code) {
                continue;
            }

            let kana = present(&row.kana).unwrap_or_default().to_owned();
            names.insert(
                row.code.trim().to_owned(),
                AreaName {
                    name: row.name.trim().to_owned(),
                    kana,
                },
            );
        }

        for row in cities {
            let code = match row.code() {
                Some(code) => code,
                None => continue,
            };

            let name = match resolve_column(&row.name) {
                Some(name) => name,
                None => {
                    debug!("city row {} has no usable name column", code);
                    if names.contains_key(code) {
                        continue;
                    }
                    ""
                }
            };
            let kana = resolve_column(&row.kana).unwrap_or_default();

            names.insert(
                code.to_owned(),
                AreaName {
                    name: name.to_owned(),
                    kana: kana.to_owned(),
                },
            );
        }

        debug!("name lookup holds {} codes", names.len());

        NameLookup { names }
    }

    /// Look up the name of a code.
    pub fn get(&self, code: &str) -> Option<&AreaName> {
        self.names.get(code)
    }

    /// Test to see if a code has a name.
    pub fn contains(&self, code: &str) -> bool {
        self.names.contains_key(code)
    }

    /// Iterate over codes and names in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AreaName)> {
        self.names.iter().map(|(code, name)| (code.as_str(), name))
    }

    /// Number of codes with a name.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if there are no names at all.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
