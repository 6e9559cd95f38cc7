#![deny(missing_docs)]
//! Resolve the JMA code tables into a cross-referenced forecast area tree and give the seismic
//! intensity stations their coordinates.
//!
//! Loading the spreadsheets and writing JSON are left to the caller. This crate takes the rows as
//! already parsed, builds and verifies the area tree, matches stations across the independent
//! station lists, and can keep the results of a run in an archive.

//
// Public API
//
pub use crate::archive::{default_root, Archive, RunKind, RunStamp};
pub use crate::area::{
    is_placeholder, resolve_column, verify, AreaHierarchyResolver, AreaLevel, AreaName,
    AreaRecord, AreaSources, AreaTree, CityRow, ColumnGroup, HierarchySpec, HierarchySpecs,
    NameLookup, NameRow, RelationRow,
};
pub use crate::coords::Coords;
pub use crate::errors::CodeTableErr;
pub use crate::station::{
    MatchOutcome, MatchQuery, MatchReport, MatchTier, MatcherOptions, Prefecture, SourceKind,
    StationCandidate, StationMatcher, StationPoint,
};

//
// Implementation only
//
mod archive;
mod area;
mod coords;
mod errors;
mod station;
