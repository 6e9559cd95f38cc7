use log::warn;
use std::path::Path;

use super::Archive;

use crate::errors::CodeTableErr;

// Column names in declaration order, matching create_index.sql.
const TABLE_COLUMNS: [(&str, &[&str]); 4] = [
    ("runs", &["kind", "finished_at", "record_count"]),
    ("areas", &["code", "level", "name", "kana"]),
    ("parent_refs", &["code", "level", "parent_code"]),
    (
        "station_points",
        &[
            "station_name",
            "locality_code",
            "matched_name",
            "lat",
            "lon",
            "source",
            "tier",
        ],
    ),
];

impl Archive {
    const DB_FILE: &'static str = "codes.db";

    /// Initialize a new archive.
    pub fn create(root: &dyn AsRef<Path>) -> Result<Self, CodeTableErr> {
        let db_file = root.as_ref().join(Archive::DB_FILE);
        let root = root.as_ref().to_path_buf();

        std::fs::create_dir_all(&root)?;

        // Create and set up the archive
        let db_conn = rusqlite::Connection::open_with_flags(
            db_file,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE | rusqlite::OpenFlags::SQLITE_OPEN_CREATE,
        )?;

        db_conn.execute_batch(include_str!("root/create_index.sql"))?;

        Ok(Archive { root, db_conn })
    }

    /// Open an existing archive.
    pub fn connect(root: &dyn AsRef<Path>) -> Result<Self, CodeTableErr> {
        let db_file = root.as_ref().join(Archive::DB_FILE);
        let root = root.as_ref().to_path_buf();

        let db_conn = rusqlite::Connection::open_with_flags(
            db_file,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE,
        )?;

        Self::validate_db_structure(&db_conn)?;

        Ok(Archive { root, db_conn })
    }

    /// Retrieve a path to the root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate the database structure is correct.
    fn validate_db_structure(db_conn: &rusqlite::Connection) -> Result<(), CodeTableErr> {
        let num_tables: i64 = db_conn.query_row(
            "SELECT COUNT(name) FROM sqlite_master WHERE type='table'",
            rusqlite::NO_PARAMS,
            |row| row.get(0),
        )?;

        if num_tables as usize != TABLE_COLUMNS.len() {
            return Err(CodeTableErr::InvalidSchema);
        }

        // A missing table has no columns, so this also checks the table names.
        for (table, columns) in TABLE_COLUMNS.iter() {
            let mut stmt = db_conn.prepare(&format!("PRAGMA table_info({})", table))?;
            let found: Vec<String> = stmt
                .query_map(rusqlite::NO_PARAMS, |row| row.get::<_, String>(1))?
                .collect::<Result<_, _>>()?;

            if found.iter().map(String::as_str).ne(columns.iter().copied()) {
                warn!("archive table {} has columns {:?}", table, found);
                return Err(CodeTableErr::InvalidSchema);
            }
        }

        Ok(())
    }
}
