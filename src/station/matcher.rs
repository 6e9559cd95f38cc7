//! Find the coordinates of a station by searching the candidate lists in order.

use log::{debug, warn};
use std::collections::HashMap;

use super::{
    MatchOutcome, MatchQuery, MatchReport, MatchTier, Prefecture, StationCandidate, StationPoint,
};

/// Knobs for the scoped search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatcherOptions {
    /// Characters that end a municipality name. Everything up to and including the first one in a
    /// station name is stripped before the scoped search.
    pub suffix_markers: Vec<char>,
    /// Whether external candidates without a prefecture take part in the scoped search.
    pub unscoped_candidates_eligible: bool,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        MatcherOptions {
            suffix_markers: vec!['市', '町', '村', '区'],
            unscoped_candidates_eligible: false,
        }
    }
}

/// Matches station names from the point table against three independently kept station lists.
///
/// The lists are searched in a fixed order and the first hit wins:
///
/// 1. the scraped JMA table, by exact name,
/// 2. the external list, scoped to the prefecture of the locality code, by substring of the name
///    with the municipality stripped,
/// 3. the JSON catalog, by exact name.
#[derive(Debug, Clone)]
pub struct StationMatcher {
    primary: HashMap<String, StationCandidate>,
    external: Vec<StationCandidate>,
    catalog: HashMap<String, StationCandidate>,
    options: MatcherOptions,
}

fn index_by_name(candidates: Vec<StationCandidate>) -> HashMap<String, StationCandidate> {
    candidates
        .into_iter()
        .map(|cand| (cand.name.clone(), cand))
        .collect()
}

impl StationMatcher {
    /// Create a matcher over the three lists. For the exact name lists a later entry replaces an
    /// earlier one with the same name. The order of the external list is kept, it breaks ties.
    pub fn new(
        primary: Vec<StationCandidate>,
        external: Vec<StationCandidate>,
        catalog: Vec<StationCandidate>,
        options: MatcherOptions,
    ) -> Self {
        StationMatcher {
            primary: index_by_name(primary),
            external,
            catalog: index_by_name(catalog),
            options,
        }
    }

    /// Look for a station. Not finding one is logged, never an error.
    pub fn find_station(&self, query: &MatchQuery) -> MatchOutcome<'_> {
        let name = query.station_name.as_str();

        if let Some(candidate) = self.primary.get(name) {
            debug!("{} found by exact name", name);
            return MatchOutcome::Found {
                candidate,
                tier: MatchTier::Exact,
            };
        }

        match Prefecture::from_locality_code(&query.locality_code) {
            Some(prefecture) => {
                if let Some(candidate) = self.scoped_search(prefecture, self.core_name(name)) {
                    debug!(
                        "{} matched {} in {}",
                        name,
                        candidate.name,
                        prefecture.as_static_str()
                    );
                    return MatchOutcome::Found {
                        candidate,
                        tier: MatchTier::Scoped,
                    };
                }
            }
            None => warn!(
                "station {}: locality code {} names no prefecture, skipping scoped search",
                name, query.locality_code
            ),
        }

        if let Some(candidate) = self.catalog.get(name) {
            debug!("{} found in the catalog", name);
            return MatchOutcome::Found {
                candidate,
                tier: MatchTier::Catalog,
            };
        }

        warn!("station {} not found ({:?})", name, query);
        MatchOutcome::NotFound
    }

    /// Resolve a batch of queries, keeping query order.
    pub fn match_all<I>(&self, queries: I) -> MatchReport
    where
        I: IntoIterator<Item = MatchQuery>,
    {
        let points: Vec<StationPoint> = queries
            .into_iter()
            .map(|query| {
                let (candidate, tier) = match self.find_station(&query) {
                    MatchOutcome::Found { candidate, tier } => (Some(candidate.clone()), Some(tier)),
                    MatchOutcome::NotFound => (None, None),
                };
                StationPoint {
                    query,
                    candidate,
                    tier,
                }
            })
            .collect();

        let report = MatchReport { points };
        debug!(
            "matched {} of {} stations",
            report.matched_count(),
            report.points.len()
        );

        report
    }

    /// Strip the municipality from a station name, everything through the first suffix marker.
    pub fn core_name<'a>(&self, station_name: &'a str) -> &'a str {
        station_name
            .char_indices()
            .find(|(_, c)| self.options.suffix_markers.contains(c))
            .map(|(idx, c)| &station_name[idx + c.len_utf8()..])
            .unwrap_or(station_name)
    }

    fn scoped_search(&self, prefecture: Prefecture, core: &str) -> Option<&StationCandidate> {
        let found: Vec<&StationCandidate> = self
            .external
            .iter()
            .filter(|cand| match cand.prefecture {
                Some(pref) => pref == prefecture,
                None => self.options.unscoped_candidates_eligible,
            })
            .filter(|cand| !cand.name.is_empty() && core.contains(cand.name.as_str()))
            .collect();

        if found.len() <= 1 {
            return found.into_iter().next();
        }

        let mut suffixes = found
            .iter()
            .filter(|cand| core.ends_with(cand.name.as_str()));
        if let (Some(only), None) = (suffixes.next(), suffixes.next()) {
            return Some(*only);
        }

        // Closest in length, the first one listed on a tie.
        let core_len = core.chars().count() as i64;
        found
            .into_iter()
            .min_by_key(|cand| (core_len - cand.name.chars().count() as i64).abs())
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;
    use crate::{coords::Coords, station::SourceKind};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn jma(name: &str, lat: f64) -> StationCandidate {
        StationCandidate::new(name, Coords::from((lat, 141.0)), SourceKind::ScrapedTable)
    }

    fn knet(name: &str, pref: Prefecture, lat: f64) -> StationCandidate {
        StationCandidate::new(name, Coords::from((lat, 139.0)), SourceKind::ExternalCsv)
            .with_prefecture(pref)
    }

    fn catalog(name: &str, lat: f64) -> StationCandidate {
        StationCandidate::new(name, Coords::from((lat, 135.0)), SourceKind::JsonCatalog)
    }

    fn matcher(
        primary: Vec<StationCandidate>,
        external: Vec<StationCandidate>,
        catalog: Vec<StationCandidate>,
    ) -> StationMatcher {
        StationMatcher::new(primary, external, catalog, MatcherOptions::default())
    }

    fn found(outcome: MatchOutcome<'_>) -> (&StationCandidate, MatchTier) {
        match outcome {
            MatchOutcome::Found { candidate, tier } => (candidate, tier),
            MatchOutcome::NotFound => panic!("expected a match"),
        }
    }

    #[test]
    fn test_core_name() {
        let m = matcher(vec![], vec![], vec![]);
        assert_eq!(m.core_name("横浜市東本郷"), "東本郷");
        assert_eq!(m.core_name("札幌北区太平"), "太平");
        assert_eq!(m.core_name("大島町元町"), "元町");
        assert_eq!(m.core_name("八丈島"), "八丈島");
    }

    #[test]
    fn test_exact_name_wins_over_better_substring() {
        init_logger();

        let m = matcher(
            vec![jma("横浜市東本郷", 1.0)],
            vec![knet("東本郷", Prefecture::Kanagawa, 2.0)],
            vec![catalog("横浜市東本郷", 3.0)],
        );

        let (cand, tier) = found(m.find_station(&MatchQuery::new("横浜市東本郷", "1410100")));
        assert_eq!(tier, MatchTier::Exact);
        assert_eq!(cand.source, SourceKind::ScrapedTable);
        assert_eq!(cand.coords.lat, 1.0);
    }

    #[test]
    fn test_scoped_single_match() {
        let m = matcher(
            vec![],
            vec![
                knet("本郷", Prefecture::Tokyo, 1.0),
                knet("本郷", Prefecture::Kanagawa, 2.0),
            ],
            vec![],
        );

        let (cand, tier) = found(m.find_station(&MatchQuery::new("文京区本郷", "1310500")));
        assert_eq!(tier, MatchTier::Scoped);
        assert_eq!(cand.prefecture, Some(Prefecture::Tokyo));
    }

    #[test]
    fn test_both_suffixes_closest_length_wins() {
        let m = matcher(
            vec![],
            vec![
                knet("本郷", Prefecture::Kanagawa, 1.0),
                knet("東本郷", Prefecture::Kanagawa, 2.0),
            ],
            vec![],
        );

        let (cand, _) = found(m.find_station(&MatchQuery::new("横浜市東本郷", "1410100")));
        assert_eq!(cand.name, "東本郷");
    }

    #[test]
    fn test_no_suffix_closest_length_wins() {
        let m = matcher(
            vec![],
            vec![
                knet("本郷", Prefecture::Kanagawa, 1.0),
                knet("東本郷", Prefecture::Kanagawa, 2.0),
            ],
            vec![],
        );

        assert_eq!(m.core_name("横浜市東本郷町"), "東本郷町");
        let (cand, tier) = found(m.find_station(&MatchQuery::new("横浜市東本郷町", "1410100")));
        assert_eq!(cand.name, "東本郷");
        assert_eq!(tier, MatchTier::Scoped);
    }

    #[test]
    fn test_single_suffix_beats_closer_length() {
        let m = matcher(
            vec![],
            vec![
                knet("東本", Prefecture::Kanagawa, 1.0),
                knet("郷", Prefecture::Kanagawa, 2.0),
            ],
            vec![],
        );

        let (cand, _) = found(m.find_station(&MatchQuery::new("横浜市東本郷", "1410100")));
        assert_eq!(cand.name, "郷");
    }

    #[test]
    fn test_length_tie_keeps_list_order() {
        let m = matcher(
            vec![],
            vec![
                knet("東本", Prefecture::Kanagawa, 1.0),
                knet("本郷", Prefecture::Kanagawa, 2.0),
                knet("郷町", Prefecture::Kanagawa, 3.0),
            ],
            vec![],
        );

        // Core name 東本郷町, only 郷町 is a suffix of it.
        let (cand, _) = found(m.find_station(&MatchQuery::new("横浜市東本郷町", "1410100")));
        assert_eq!(cand.name, "郷町");

        // Without the suffix, 東本 and 本郷 tie on length and 東本 comes first.
        let m = matcher(
            vec![],
            vec![
                knet("東本", Prefecture::Kanagawa, 1.0),
                knet("本郷", Prefecture::Kanagawa, 2.0),
            ],
            vec![],
        );
        let (cand, _) = found(m.find_station(&MatchQuery::new("横浜市東本郷町", "1410100")));
        assert_eq!(cand.name, "東本");
    }

    #[test]
    fn test_other_prefecture_ignored() {
        let m = matcher(
            vec![],
            vec![knet("本郷", Prefecture::Tokyo, 1.0)],
            vec![catalog("横浜市本郷", 3.0)],
        );

        let (cand, tier) = found(m.find_station(&MatchQuery::new("横浜市本郷", "1410100")));
        assert_eq!(tier, MatchTier::Catalog);
        assert_eq!(cand.source, SourceKind::JsonCatalog);
    }

    #[test]
    fn test_unscoped_candidates() {
        let unscoped = StationCandidate::new(
            "本郷",
            Coords::from((1.0, 139.0)),
            SourceKind::ExternalCsv,
        );
        let query = MatchQuery::new("横浜市本郷", "1410100");

        let m = matcher(vec![], vec![unscoped.clone()], vec![]);
        assert_eq!(m.find_station(&query), MatchOutcome::NotFound);

        let options = MatcherOptions {
            unscoped_candidates_eligible: true,
            ..MatcherOptions::default()
        };
        let m = StationMatcher::new(vec![], vec![unscoped], vec![], options);
        assert_eq!(found(m.find_station(&query)).1, MatchTier::Scoped);
    }

    #[test]
    fn test_bad_locality_code_falls_through() {
        init_logger();

        let m = matcher(
            vec![],
            vec![knet("本郷", Prefecture::Kanagawa, 1.0)],
            vec![catalog("横浜市本郷", 3.0)],
        );

        let (_, tier) = found(m.find_station(&MatchQuery::new("横浜市本郷", "9910100")));
        assert_eq!(tier, MatchTier::Catalog);
    }

    #[test]
    fn test_not_found_is_not_fatal() {
        init_logger();

        let m = matcher(
            vec![jma("札幌北区太平", 1.0)],
            vec![knet("本郷", Prefecture::Kanagawa, 2.0)],
            vec![catalog("函館市美原", 3.0)],
        );

        let queries = vec![
            MatchQuery::new("どこにもない", "0110200"),
            MatchQuery::new("札幌北区太平", "0110200"),
            MatchQuery::new("函館市美原", "0120200"),
        ];

        assert_eq!(m.find_station(&queries[0]), MatchOutcome::NotFound);

        let report = m.match_all(queries);
        assert_eq!(report.points.len(), 3);
        assert_eq!(report.matched_count(), 2);
        assert_eq!(report.points[1].tier, Some(MatchTier::Exact));
        assert_eq!(report.points[2].tier, Some(MatchTier::Catalog));
        assert_eq!(
            report.unmatched().collect::<Vec<_>>(),
            vec![&MatchQuery::new("どこにもない", "0110200")]
        );
    }
}
