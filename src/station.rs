//! Seismic intensity stations and where to find their coordinates.

use serde::Serialize;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

use crate::coords::Coords;

mod matcher;
mod prefecture;

pub use matcher::{MatcherOptions, StationMatcher};
pub use prefecture::Prefecture;

/// Where a candidate station came from.
#[derive(
    Debug, Hash, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter, Serialize,
)]
#[allow(missing_docs)]
pub enum SourceKind {
    /// The station table scraped from the JMA intensity station page.
    #[strum(to_string = "jma")]
    ScrapedTable,
    /// The JSON catalog behind the JMA intensity station map.
    #[strum(to_string = "jma-json")]
    JsonCatalog,
    /// The NIED K-NET site list.
    #[strum(to_string = "k-net")]
    ExternalCsv,
}

impl SourceKind {
    /// Get a static string representation.
    pub fn as_static_str(self) -> &'static str {
        self.into()
    }
}

/// One station from one of the candidate lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationCandidate {
    /// Station name as the source spells it.
    pub name: String,
    /// Location of the station.
    pub coords: Coords,
    /// Which list it came from.
    pub source: SourceKind,
    /// The prefecture, only the external list has one.
    pub prefecture: Option<Prefecture>,
}

impl StationCandidate {
    /// Create a candidate with no prefecture.
    pub fn new(name: &str, coords: Coords, source: SourceKind) -> Self {
        StationCandidate {
            name: name.to_owned(),
            coords,
            source,
            prefecture: None,
        }
    }

    /// Set the prefecture.
    pub fn with_prefecture(self, prefecture: Prefecture) -> Self {
        StationCandidate {
            prefecture: Some(prefecture),
            ..self
        }
    }
}

/// A station name from the point table and the code of the locality it is in.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MatchQuery {
    pub station_name: String,
    pub locality_code: String,
}

impl MatchQuery {
    /// Create a new one.
    pub fn new(station_name: &str, locality_code: &str) -> Self {
        MatchQuery {
            station_name: station_name.to_owned(),
            locality_code: locality_code.to_owned(),
        }
    }
}

/// Which step of the search produced a match.
#[derive(
    Debug, Hash, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter, Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[allow(missing_docs)]
pub enum MatchTier {
    Exact,
    Scoped,
    Catalog,
}

impl MatchTier {
    /// Get a static string representation.
    pub fn as_static_str(self) -> &'static str {
        self.into()
    }
}

/// The result of looking for one station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchOutcome<'a> {
    /// A candidate was found.
    Found {
        /// The matching candidate.
        candidate: &'a StationCandidate,
        /// The step that found it.
        tier: MatchTier,
    },
    /// No list has the station.
    NotFound,
}

impl<'a> MatchOutcome<'a> {
    /// The candidate, if one was found.
    pub fn candidate(self) -> Option<&'a StationCandidate> {
        match self {
            MatchOutcome::Found { candidate, .. } => Some(candidate),
            MatchOutcome::NotFound => None,
        }
    }
}

/// A query together with what the matcher made of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationPoint {
    /// What was asked for.
    pub query: MatchQuery,
    /// The candidate found, if any.
    pub candidate: Option<StationCandidate>,
    /// The step that found the candidate.
    pub tier: Option<MatchTier>,
}

impl StationPoint {
    /// The coordinates, or `None` for a station left for manual follow up.
    pub fn coords(&self) -> Option<Coords> {
        self.candidate.as_ref().map(|cand| cand.coords)
    }
}

/// Outcomes for a batch of queries, in query order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchReport {
    /// One entry per query.
    pub points: Vec<StationPoint>,
}

impl MatchReport {
    /// The queries no source could place.
    pub fn unmatched(&self) -> impl Iterator<Item = &MatchQuery> {
        self.points
            .iter()
            .filter(|pnt| pnt.candidate.is_none())
            .map(|pnt| &pnt.query)
    }

    /// Number of queries that found coordinates.
    pub fn matched_count(&self) -> usize {
        self.points
            .iter()
            .filter(|pnt| pnt.candidate.is_some())
            .count()
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
