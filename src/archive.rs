//! An archive of resolved code tables.

use std::path::PathBuf;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// The archive.
#[derive(Debug)]
pub struct Archive {
    root: PathBuf,                 // The root directory.
    db_conn: rusqlite::Connection, // An sqlite connection.
}

mod add_data;
mod query;
mod root;

/// The default location of the archive, `${HOME}/jma-code-tables`.
pub fn default_root() -> Option<PathBuf> {
    dirs::home_dir().map(|hd| hd.join("jma-code-tables"))
}

/// What a run stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[allow(missing_docs)]
pub enum RunKind {
    Areas,
    Stations,
}

impl RunKind {
    /// Get a static string representation.
    pub fn as_static_str(self) -> &'static str {
        self.into()
    }
}

/// Record of one stored run.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStamp {
    pub finished_at: chrono::NaiveDateTime,
    pub record_count: i64,
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;
    use crate::{
        area::{
            AreaHierarchyResolver, AreaLevel, AreaSources, AreaTree, CityRow, ColumnGroup,
            NameRow, RelationRow,
        },
        coords::Coords,
        errors::CodeTableErr,
        station::{
            MatchQuery, MatchReport, MatchTier, SourceKind, StationCandidate, StationPoint,
        },
    };

    use tempdir::TempDir;

    // struct to hold temporary data for tests.
    struct TestArchive {
        tmp: TempDir,
        arch: Archive,
    }

    // Function to create a new archive to test.
    fn create_test_archive() -> Result<TestArchive, CodeTableErr> {
        let tmp = TempDir::new("jma-code-tables-test-archive")?;
        let arch = Archive::create(&tmp.path())?;

        Ok(TestArchive { tmp, arch })
    }

    fn city(code: &str, matome: &str, name: &str) -> CityRow {
        CityRow {
            code: Some(code.to_owned()),
            matome_code: Some(matome.to_owned()),
            name: ColumnGroup::preferred(name),
            kana: ColumnGroup::default(),
        }
    }

    fn test_tree() -> AreaTree {
        let sources = AreaSources {
            cities: vec![
                city("1310100", "1310001", "千代田区"),
                city("1310200", "1310001", "中央区"),
            ],
            warning_relations: vec![RelationRow::new("1310001", "130010", Some("130000"))],
            tornado_relations: vec![RelationRow::new("1310001", "130010", Some("130011"))],
            names: vec![
                NameRow::new("1310001", "東京２３区東部", None),
                NameRow::new("130010", "東京地方", Some("とうきょうちほう")),
                NameRow::new("130000", "東京都", None),
                NameRow::new("130011", "東京地方", None),
                NameRow::new("139999", "予備", None),
            ],
        };

        AreaHierarchyResolver::new(sources)
            .resolve()
            .expect("test tree failed to resolve")
    }

    fn test_report() -> MatchReport {
        let cand = StationCandidate::new(
            "千代田区大手町",
            Coords::from((35.69, 139.76)),
            SourceKind::ScrapedTable,
        );

        MatchReport {
            points: vec![
                StationPoint {
                    query: MatchQuery::new("千代田区大手町", "1310100"),
                    candidate: Some(cand),
                    tier: Some(MatchTier::Exact),
                },
                StationPoint {
                    query: MatchQuery::new("中央区どこか", "1310200"),
                    candidate: None,
                    tier: None,
                },
            ],
        }
    }

    #[test]
    fn test_archive_create_new() {
        assert!(create_test_archive().is_ok());
    }

    #[test]
    fn test_archive_connect() {
        let TestArchive { tmp, arch } =
            create_test_archive().expect("Failed to create test archive.");
        drop(arch);

        assert!(Archive::connect(&tmp.path()).is_ok());
        assert!(Archive::connect(&"unlikely_directory_in_my_project").is_err());
    }

    #[test]
    fn test_connect_rejects_foreign_db() {
        let tmp = TempDir::new("jma-code-tables-foreign").expect("no temp dir");
        let conn = rusqlite::Connection::open(tmp.path().join("codes.db")).expect("open");
        conn.execute_batch("CREATE TABLE files (name TEXT);")
            .expect("create");
        drop(conn);

        match Archive::connect(&tmp.path()) {
            Err(CodeTableErr::InvalidSchema) => {}
            other => panic!("expected an invalid schema, got {:?}", other),
        }
    }

    #[test]
    fn test_connect_rejects_wrong_columns() {
        let tmp = TempDir::new("jma-code-tables-columns").expect("no temp dir");
        let conn = rusqlite::Connection::open(tmp.path().join("codes.db")).expect("open");
        conn.execute_batch(
            "
                CREATE TABLE runs (kind TEXT, finished_at TEXT, record_count INTEGER);
                CREATE TABLE areas (code TEXT, level TEXT, name TEXT);
                CREATE TABLE parent_refs (code TEXT, level TEXT, parent_code TEXT);
                CREATE TABLE station_points (station_name TEXT, locality_code TEXT);
            ",
        )
        .expect("create");
        drop(conn);

        match Archive::connect(&tmp.path()) {
            Err(CodeTableErr::InvalidSchema) => {}
            other => panic!("expected an invalid schema, got {:?}", other),
        }
    }

    #[test]
    fn test_get_root() {
        let TestArchive { tmp, arch } =
            create_test_archive().expect("Failed to create test archive.");

        let root = arch.root();
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn test_areas_round_trip() {
        let TestArchive { tmp: _tmp, mut arch } =
            create_test_archive().expect("Failed to create test archive.");

        let tree = test_tree();
        arch.store_areas(&tree).expect("Error storing areas.");

        for rec in tree.iter() {
            assert_eq!(&arch.area(&rec.code).expect("Error retrieving area."), rec);
        }

        match arch.area("xyz") {
            Err(CodeTableErr::NotInIndex) => {}
            other => panic!("expected not in index, got {:?}", other),
        }

        let stamp = arch
            .last_run(RunKind::Areas)
            .expect("db error")
            .expect("no run stamp");
        assert_eq!(stamp.record_count as usize, tree.len());
        assert!(arch.last_run(RunKind::Stations).expect("db error").is_none());
    }

    #[test]
    fn test_store_replaces_previous_run() {
        let TestArchive { tmp: _tmp, mut arch } =
            create_test_archive().expect("Failed to create test archive.");

        let tree = test_tree();
        arch.store_areas(&tree).expect("Error storing areas.");
        arch.store_areas(&tree).expect("Error storing areas twice.");

        let cities = arch.areas_at_level(AreaLevel::City).expect("db error");
        let codes: Vec<&str> = cities.iter().map(|rec| rec.code.as_str()).collect();
        assert_eq!(codes, vec!["1310100", "1310200"]);
        assert_eq!(cities[0].parent(AreaLevel::Fuken), Some("130000"));
    }

    #[test]
    fn test_one_run_stamp_per_kind() {
        let TestArchive { tmp: _tmp, mut arch } =
            create_test_archive().expect("Failed to create test archive.");

        let tree = test_tree();
        arch.store_areas(&tree).expect("Error storing areas.");
        arch.store_areas(&tree).expect("Error storing areas twice.");
        arch.store_station_points(&test_report())
            .expect("Error storing stations.");
        arch.store_station_points(&MatchReport::default())
            .expect("Error storing stations twice.");

        let count_runs = |kind: RunKind| -> i64 {
            arch.db_conn
                .query_row(
                    "SELECT COUNT(*) FROM runs WHERE kind = ?1",
                    &[kind.as_static_str()],
                    |row| row.get(0),
                )
                .expect("db error")
        };
        assert_eq!(count_runs(RunKind::Areas), 1);
        assert_eq!(count_runs(RunKind::Stations), 1);

        let stamp = arch
            .last_run(RunKind::Stations)
            .expect("db error")
            .expect("no run stamp");
        assert_eq!(stamp.record_count, 0);
    }

    #[test]
    fn test_children() {
        let TestArchive { tmp: _tmp, mut arch } =
            create_test_archive().expect("Failed to create test archive.");

        arch.store_areas(&test_tree()).expect("Error storing areas.");

        assert_eq!(
            arch.children("1310001", AreaLevel::Matome).expect("db error"),
            vec!["1310100".to_owned(), "1310200".to_owned()]
        );
        assert_eq!(
            arch.children("130000", AreaLevel::Fuken)
                .expect("db error")
                .len(),
            4
        );
        assert!(arch
            .children("139999", AreaLevel::Fuken)
            .expect("db error")
            .is_empty());
    }

    #[test]
    fn test_station_points_round_trip() {
        let TestArchive { tmp: _tmp, mut arch } =
            create_test_archive().expect("Failed to create test archive.");

        let report = test_report();
        arch.store_station_points(&report)
            .expect("Error storing stations.");

        assert_eq!(
            arch.unmatched_stations().expect("db error"),
            vec![MatchQuery::new("中央区どこか", "1310200")]
        );
        assert_eq!(
            arch.station_coords(&report.points[0].query)
                .expect("db error"),
            Some(Coords::from((35.69, 139.76)))
        );
        assert_eq!(
            arch.station_coords(&report.points[1].query)
                .expect("db error"),
            None
        );
        assert!(arch
            .station_coords(&MatchQuery::new("no", "0000000"))
            .is_err());
    }
}
