use rusqlite::ToSql;

use super::{Archive, RunKind};

use crate::{area::AreaTree, errors::CodeTableErr, station::MatchReport};

impl Archive {
    /// Store a resolved area tree, replacing the tree from any earlier run.
    ///
    /// The whole tree goes in one transaction, so a failure leaves the previous tree in place.
    pub fn store_areas(&mut self, tree: &AreaTree) -> Result<(), CodeTableErr> {
        let tx = self.db_conn.transaction()?;

        tx.execute("DELETE FROM parent_refs", rusqlite::NO_PARAMS)?;
        tx.execute("DELETE FROM areas", rusqlite::NO_PARAMS)?;

        {
            let mut area_stmt =
                tx.prepare("INSERT INTO areas (code, level, name, kana) VALUES (?1, ?2, ?3, ?4)")?;
            let mut ref_stmt = tx.prepare(
                "INSERT INTO parent_refs (code, level, parent_code) VALUES (?1, ?2, ?3)",
            )?;

            for rec in tree.iter() {
                area_stmt.execute(&[
                    &rec.code as &dyn ToSql,
                    &rec.level.as_static_str(),
                    &rec.name,
                    &rec.kana,
                ])?;

                for (level, parent_code) in &rec.parent_refs {
                    ref_stmt.execute(&[
                        &rec.code as &dyn ToSql,
                        &level.as_static_str(),
                        parent_code,
                    ])?;
                }
            }
        }

        Self::stamp_run(&tx, RunKind::Areas, tree.len())?;

        tx.commit()?;

        Ok(())
    }

    /// Store the outcome of a station matching run. Unmatched stations are kept with no
    /// coordinates.
    pub fn store_station_points(&mut self, report: &MatchReport) -> Result<(), CodeTableErr> {
        let tx = self.db_conn.transaction()?;

        tx.execute("DELETE FROM station_points", rusqlite::NO_PARAMS)?;

        {
            let mut stmt = tx.prepare(
                "
                    INSERT OR REPLACE INTO station_points
                        (station_name, locality_code, matched_name, lat, lon, source, tier)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                ",
            )?;

            for point in &report.points {
                let cand = point.candidate.as_ref();
                stmt.execute(&[
                    &point.query.station_name as &dyn ToSql,
                    &point.query.locality_code,
                    &cand.map(|c| c.name.as_str()),
                    &cand.map(|c| c.coords.lat),
                    &cand.map(|c| c.coords.lon),
                    &cand.map(|c| c.source.as_static_str()),
                    &point.tier.map(|tier| tier.as_static_str()),
                ])?;
            }
        }

        Self::stamp_run(&tx, RunKind::Stations, report.points.len())?;

        tx.commit()?;

        Ok(())
    }

    // Each kind keeps only the stamp of its latest run.
    fn stamp_run(
        conn: &rusqlite::Connection,
        kind: RunKind,
        record_count: usize,
    ) -> Result<(), CodeTableErr> {
        conn.execute(
            "INSERT OR REPLACE INTO runs (kind, finished_at, record_count) VALUES (?1, ?2, ?3)",
            &[
                &kind.as_static_str() as &dyn ToSql,
                &chrono::Utc::now().naive_utc(),
                &(record_count as i64),
            ],
        )?;

        Ok(())
    }
}
