use std::{collections::BTreeMap, str::FromStr};

use super::{Archive, RunKind, RunStamp};

use crate::{
    area::{AreaLevel, AreaRecord},
    coords::Coords,
    errors::CodeTableErr,
    station::MatchQuery,
};

impl Archive {
    fn parse_row_to_area(row: &rusqlite::Row) -> Result<AreaRecord, CodeTableErr> {
        let code: String = row.get(0)?;
        let level: String = row.get(1)?;
        let level = AreaLevel::from_str(&level)?;
        let name: String = row.get(2)?;
        let kana: String = row.get(3)?;

        Ok(AreaRecord {
            code,
            level,
            name,
            kana,
            parent_refs: BTreeMap::new(),
        })
    }

    fn parent_refs(&self, code: &str) -> Result<BTreeMap<AreaLevel, String>, CodeTableErr> {
        let mut stmt = self
            .db_conn
            .prepare("SELECT level, parent_code FROM parent_refs WHERE code = ?1")?;

        let vals: Result<BTreeMap<AreaLevel, String>, CodeTableErr> = stmt
            .query_and_then(&[code], |row| -> Result<_, CodeTableErr> {
                let level: String = row.get(0)?;
                let parent_code: String = row.get(1)?;
                Ok((AreaLevel::from_str(&level)?, parent_code))
            })?
            .collect();

        vals
    }

    /// Retrieve a single area with its parent references.
    pub fn area(&self, code: &str) -> Result<AreaRecord, CodeTableErr> {
        let rec = self.db_conn.query_row_and_then(
            "SELECT code, level, name, kana FROM areas WHERE code = ?1",
            &[code],
            Self::parse_row_to_area,
        );

        let mut rec = match rec {
            Ok(rec) => rec,
            Err(CodeTableErr::Database(rusqlite::Error::QueryReturnedNoRows)) => {
                return Err(CodeTableErr::NotInIndex)
            }
            Err(err) => return Err(err),
        };

        rec.parent_refs = self.parent_refs(&rec.code)?;

        Ok(rec)
    }

    /// Retrieve all the areas at a level, in code order.
    pub fn areas_at_level(&self, level: AreaLevel) -> Result<Vec<AreaRecord>, CodeTableErr> {
        let mut stmt = self.db_conn.prepare(
            "SELECT code, level, name, kana FROM areas WHERE level = ?1 ORDER BY code",
        )?;

        let vals: Result<Vec<AreaRecord>, CodeTableErr> = stmt
            .query_and_then(&[level.as_static_str()], Self::parse_row_to_area)?
            .collect();

        vals?
            .into_iter()
            .map(|mut rec| -> Result<AreaRecord, CodeTableErr> {
                rec.parent_refs = self.parent_refs(&rec.code)?;
                Ok(rec)
            })
            .collect()
    }

    /// Codes of the areas whose ancestor at `level` is `code`, in code order.
    pub fn children(&self, code: &str, level: AreaLevel) -> Result<Vec<String>, CodeTableErr> {
        let mut stmt = self.db_conn.prepare(
            "
                SELECT code
                FROM parent_refs
                WHERE parent_code = ?1 AND level = ?2
                ORDER BY code
            ",
        )?;

        let vals: Result<Vec<String>, CodeTableErr> = stmt
            .query_map(&[code, level.as_static_str()], |row| row.get::<_, String>(0))?
            .map(|res| res.map_err(CodeTableErr::Database))
            .collect();

        vals
    }

    /// The stations that need a manual look because no source had them.
    pub fn unmatched_stations(&self) -> Result<Vec<MatchQuery>, CodeTableErr> {
        let mut stmt = self.db_conn.prepare(
            "
                SELECT station_name, locality_code
                FROM station_points
                WHERE lat IS NULL OR lon IS NULL
                ORDER BY station_name, locality_code
            ",
        )?;

        let vals: Result<Vec<MatchQuery>, CodeTableErr> = stmt
            .query_map(rusqlite::NO_PARAMS, |row| {
                Ok(MatchQuery {
                    station_name: row.get(0)?,
                    locality_code: row.get(1)?,
                })
            })?
            .map(|res| res.map_err(CodeTableErr::Database))
            .collect();

        vals
    }

    /// Coordinates stored for a query, `None` if the station was not matched.
    pub fn station_coords(&self, query: &MatchQuery) -> Result<Option<Coords>, CodeTableErr> {
        let coords: Result<(Option<f64>, Option<f64>), _> = self.db_conn.query_row(
            "
                SELECT lat, lon
                FROM station_points
                WHERE station_name = ?1 AND locality_code = ?2
            ",
            &[&query.station_name, &query.locality_code],
            |row| Ok((row.get(0)?, row.get(1)?)),
        );

        match coords {
            Ok((Some(lat), Some(lon))) => Ok(Some(Coords { lat, lon })),
            Ok(_) => Ok(None),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(CodeTableErr::NotInIndex),
            Err(err) => Err(CodeTableErr::Database(err)),
        }
    }

    /// When the last run of a kind was stored, and how many records it wrote.
    pub fn last_run(&self, kind: RunKind) -> Result<Option<RunStamp>, CodeTableErr> {
        let stamp = self.db_conn.query_row(
            "
                SELECT finished_at, record_count
                FROM runs
                WHERE kind = ?1
            ",
            &[kind.as_static_str()],
            |row| {
                let finished_at: chrono::NaiveDateTime = row.get(0)?;
                let record_count: i64 = row.get(1)?;
                Ok(RunStamp {
                    finished_at,
                    record_count,
                })
            },
        );

        match stamp {
            Ok(stamp) => Ok(Some(stamp)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(err) => Err(CodeTableErr::Database(err)),
        }
    }
}
