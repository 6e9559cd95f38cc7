//! Assemble the area tree from the city sheet, the relation tables and the master name table.

use log::{debug, info};
use std::collections::BTreeMap;

use super::{
    integrity, AreaLevel, AreaName, AreaRecord, AreaTree, CityRow, HierarchySpecs, NameLookup,
    NameRow, RelationRow,
};
use crate::errors::CodeTableErr;

/// The source tables of one run, already loaded and renamed by the spreadsheet readers.
#[derive(Debug, Clone, Default)]
pub struct AreaSources {
    /// Rows of the city relation sheet.
    pub cities: Vec<CityRow>,
    /// Rows of the warning relation sheet, matome to ichiji to fuken.
    pub warning_relations: Vec<RelationRow>,
    /// Rows of the tornado watch relation sheet, matome to ichiji to saibun.
    pub tornado_relations: Vec<RelationRow>,
    /// Rows of the master code table.
    pub names: Vec<NameRow>,
}

/// Builds an [`AreaTree`] from one set of source tables.
#[derive(Debug)]
pub struct AreaHierarchyResolver {
    sources: AreaSources,
}

impl AreaHierarchyResolver {
    /// Create a new resolver over a set of tables.
    pub fn new(sources: AreaSources) -> Self {
        AreaHierarchyResolver { sources }
    }

    /// Resolve the tables into a verified tree.
    ///
    /// Any integrity defect aborts the run and no tree is returned.
    pub fn resolve(&self) -> Result<AreaTree, CodeTableErr> {
        let AreaSources {
            cities,
            warning_relations,
            tornado_relations,
            names,
        } = &self.sources;

        let names = NameLookup::build(names, cities);
        let specs = HierarchySpecs::fold(warning_relations, tornado_relations)?;

        let mut builder = TreeBuilder {
            names: &names,
            items: BTreeMap::new(),
        };

        for row in cities {
            let code = match row.code() {
                Some(code) => code,
                None => continue,
            };

            match row.matome_code() {
                Some(matome_code) => builder.add_city_in_hierarchy(code, matome_code, &specs)?,
                None => builder.add_bare_city(code)?,
            }
        }

        let in_hierarchy = builder.items.len();
        builder.add_remaining_names();
        debug!(
            "{} codes placed in the hierarchy, {} left over",
            in_hierarchy,
            builder.items.len() - in_hierarchy
        );

        let tree = AreaTree::from_records(builder.items);
        integrity::verify(&tree, &names, &specs)?;

        info!("resolved {} area codes", tree.len());

        Ok(tree)
    }
}

struct TreeBuilder<'a> {
    names: &'a NameLookup,
    items: BTreeMap<String, AreaRecord>,
}

impl<'a> TreeBuilder<'a> {
    fn name(&self, code: &str) -> Result<&'a AreaName, CodeTableErr> {
        self.names
            .get(code)
            .ok_or_else(|| CodeTableErr::MissingName(code.to_owned()))
    }

    fn record(
        &self,
        code: &str,
        level: AreaLevel,
        refs: &[(AreaLevel, Option<&str>)],
    ) -> Result<AreaRecord, CodeTableErr> {
        let mut rec = AreaRecord::new(code, level, self.name(code)?);
        for (parent_level, parent) in refs {
            if let Some(parent) = parent {
                rec.parent_refs.insert(*parent_level, (*parent).to_owned());
            }
        }
        Ok(rec)
    }

    fn upsert(&mut self, rec: AreaRecord) {
        match self.items.get_mut(&rec.code) {
            Some(existing) => existing.merge(rec),
            None => {
                self.items.insert(rec.code.clone(), rec);
            }
        }
    }

    fn add_city_in_hierarchy(
        &mut self,
        code: &str,
        matome_code: &str,
        specs: &HierarchySpecs,
    ) -> Result<(), CodeTableErr> {
        use AreaLevel::*;

        let spec = specs
            .get(matome_code)
            .ok_or_else(|| CodeTableErr::DanglingReference {
                code: code.to_owned(),
                level: Matome,
                target: matome_code.to_owned(),
            })?;

        let ichiji = Some(spec.ichiji_code.as_str());
        let fuken = spec.fuken_code.as_deref();
        let saibun = spec.saibun_code.as_deref();

        let city = self.record(
            code,
            City,
            &[
                (Matome, Some(matome_code)),
                (Ichiji, ichiji),
                (Fuken, fuken),
                (Saibun, saibun),
            ],
        )?;
        self.upsert(city);

        let matome = self.record(
            matome_code,
            Matome,
            &[(Ichiji, ichiji), (Fuken, fuken), (Saibun, saibun)],
        )?;
        self.upsert(matome);

        let ichiji = self.record(&spec.ichiji_code, Ichiji, &[(Fuken, fuken), (Saibun, saibun)])?;
        self.upsert(ichiji);

        if let Some(fuken) = fuken {
            let fuken = self.record(fuken, Fuken, &[])?;
            self.upsert(fuken);
        }

        // The same saibun area covers many cities, the first one to get here wins.
        if let Some(saibun) = saibun {
            if !self.items.contains_key(saibun) {
                let saibun = self.record(saibun, Saibun, &[])?;
                self.upsert(saibun);
            }
        }

        Ok(())
    }

    fn add_bare_city(&mut self, code: &str) -> Result<(), CodeTableErr> {
        let city = self.record(code, AreaLevel::City, &[])?;
        self.upsert(city);
        Ok(())
    }

    fn add_remaining_names(&mut self) {
        let names = self.names;
        for (code, name) in names.iter() {
            if !self.items.contains_key(code) {
                self.items
                    .insert(code.to_owned(), AreaRecord::new(code, AreaLevel::Other, name));
            }
        }
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
