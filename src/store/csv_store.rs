//! Flat-file backend: the sheet as one CSV file with the schema header.

use super::{Store, schema};
use crate::errors::{AppError, AppResult};
use crate::models::Record;
use crate::models::record::schema_columns;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub struct CsvStore {
    path: PathBuf,
}

fn unavailable(path: &Path, e: impl std::fmt::Display) -> AppError {
    AppError::StoreUnavailable(format!("{}: {e}", path.display()))
}

impl CsvStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Sidecar file keeping the game id high-water mark.
    fn seq_path(&self) -> PathBuf {
        let mut p = self.path.clone().into_os_string();
        p.push(".seq");
        PathBuf::from(p)
    }

    fn read_seq(&self) -> AppResult<u64> {
        match fs::read_to_string(self.seq_path()) {
            Ok(s) => Ok(s.trim().parse().unwrap_or(0)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(unavailable(&self.seq_path(), e)),
        }
    }

    fn write_seq(&self, value: u64) -> AppResult<()> {
        fs::write(self.seq_path(), value.to_string()).map_err(|e| unavailable(&self.seq_path(), e))
    }
}

impl Store for CsvStore {
    /// A missing file is an empty sheet.
    fn list_all(&mut self) -> AppResult<Vec<Record>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| unavailable(&self.path, e))?;

        let header: Vec<String> = rdr
            .headers()
            .map_err(|e| unavailable(&self.path, e))?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();
        schema::check_header(&header)?;

        let index: HashMap<&str, usize> = header
            .iter()
            .enumerate()
            .map(|(i, h)| (h.as_str(), i))
            .collect();

        let mut out = Vec::new();
        for row in rdr.records() {
            let row = row.map_err(|e| unavailable(&self.path, e))?;
            if row.iter().all(|c| c.trim().is_empty()) {
                continue;
            }
            let record = schema::record_from_fields(|col| {
                index
                    .get(col)
                    .and_then(|&i| row.get(i))
                    .map(|s| s.to_string())
            })?;
            out.push(record);
        }
        Ok(out)
    }

    /// Written next to the target and renamed over it, so readers never see
    /// a half-written sheet.
    fn replace_all(&mut self, records: &[Record]) -> AppResult<()> {
        schema::check_unique_ids(records)?;
        let rows = records
            .iter()
            .map(schema::record_to_fields)
            .collect::<AppResult<Vec<_>>>()?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| unavailable(dir, e))?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        {
            let mut wtr = csv::Writer::from_path(&tmp).map_err(|e| unavailable(&tmp, e))?;
            wtr.write_record(schema_columns())?;
            for row in rows {
                wtr.write_record(row)?;
            }
            wtr.flush()?;
        }

        fs::rename(&tmp, &self.path).map_err(|e| unavailable(&self.path, e))?;

        let mark = self.read_seq()?.max(schema::max_game_id(records));
        self.write_seq(mark)
    }

    fn reserve_game_id(&mut self) -> AppResult<u64> {
        let stored_max = schema::max_game_id(&self.list_all()?);
        let next = self.read_seq()?.max(stored_max) + 1;
        self.write_seq(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Seat;
    use std::env;

    fn temp_csv(name: &str) -> PathBuf {
        let mut p = env::temp_dir();
        p.push(format!("{name}_mjledger_unit.csv"));
        fs::remove_file(&p).ok();
        let mut seq = p.clone().into_os_string();
        seq.push(".seq");
        fs::remove_file(PathBuf::from(seq)).ok();
        p
    }

    fn rec(game_id: u64) -> Record {
        Record {
            game_id,
            table_no: 1,
            set_no: 1,
            timestamp: "2026-01-10 21:00:00".into(),
            note: String::new(),
            seats: vec![
                Seat::new("鈴木, 太郎", "A", 1),
                Seat::new("b", "B", 2),
                Seat::new("c", "C", 3),
            ],
        }
    }

    #[test]
    fn missing_file_is_empty() {
        let mut store = CsvStore::new(temp_csv("missing"));
        assert!(store.list_all().unwrap().is_empty());
        assert_eq!(store.reserve_game_id().unwrap(), 1);
    }

    #[test]
    fn round_trip_and_id_mark() {
        let path = temp_csv("round_trip");
        let mut store = CsvStore::new(&path);

        store.replace_all(&[rec(1), rec(2)]).unwrap();
        assert_eq!(store.list_all().unwrap(), vec![rec(1), rec(2)]);

        store.replace_all(&[rec(1)]).unwrap();
        assert_eq!(store.reserve_game_id().unwrap(), 3);
    }

    #[test]
    fn legacy_sheet_without_set_no() {
        let path = temp_csv("legacy");
        fs::write(
            &path,
            "GameNo,TableNo,Timestamp,Note,SeatAName,SeatACategory,SeatARank,\
             SeatBName,SeatBCategory,SeatBRank,SeatCName,SeatCCategory,SeatCRank\n\
             11,1,2025-12-01 20:00,,X,A,1,Y,B,2,Z,C,3\n",
        )
        .unwrap();

        let records = CsvStore::new(&path).list_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].set_no, 2);
    }

    #[test]
    fn foreign_sheet_is_rejected() {
        let path = temp_csv("foreign");
        fs::write(&path, "名前,登録日\nテスト太郎,2026-01-01\n").unwrap();

        let err = CsvStore::new(&path).list_all().unwrap_err();
        assert!(matches!(err, AppError::StoreRejected(_)));
    }
}
