//! The editable table of diurnal forcings.
//!
//! Rows can be appended, inserted, removed or edited in place between
//! evaluations. The table is converted into an immutable [`DiurnalSeries`]
//! right before each pass.

use csv::{ReaderBuilder, Trim, WriterBuilder};
use evap_core::diurnal::{DiurnalRow, DiurnalSeries};
use evap_core::error::DomainError;
use evap_core::observation::MeteorologicalObservation;
use log::info;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

/// Embedded default daily profile: seven rows, every four hours from 0 to 24 h.
pub static DEFAULT_FORCINGS_CSV: &str = include_str!("../../fixtures/diurnal_forcings.csv");

/// Column headers, in table order.
pub const COLUMNS: [&str; 6] = ["Time h", "Rn Wm-2", "Ta oC", "Tw oC", "Vel ms-1", "RH %"];

#[derive(Error, Debug)]
pub enum TableError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("row {index} does not exist, table has {len} rows")]
    RowOutOfRange { index: usize, len: usize },
}

/// One editable row of forcings.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct ForcingRecord {
    #[serde(rename = "Time h")]
    pub time: f64,
    #[serde(rename = "Rn Wm-2")]
    pub net_radiation: f64,
    #[serde(rename = "Ta oC")]
    pub air_temperature: f64,
    #[serde(rename = "Tw oC")]
    pub water_temperature: f64,
    #[serde(rename = "Vel ms-1")]
    pub wind_speed: f64,
    #[serde(rename = "RH %")]
    pub relative_humidity: f64,
}

impl From<ForcingRecord> for DiurnalRow {
    fn from(record: ForcingRecord) -> Self {
        DiurnalRow {
            time: record.time,
            observation: MeteorologicalObservation {
                wind_speed: record.wind_speed,
                air_temperature: record.air_temperature,
                water_temperature: record.water_temperature,
                relative_humidity: record.relative_humidity,
                net_radiation: record.net_radiation,
            },
        }
    }
}

/// A resizable, ordered table of forcing records.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct ForcingTable {
    records: Vec<ForcingRecord>,
}

impl ForcingTable {
    pub fn new(records: Vec<ForcingRecord>) -> Self {
        ForcingTable { records }
    }

    /// The table the diurnal page starts from.
    pub fn default_profile() -> Result<Self, TableError> {
        Self::from_csv(DEFAULT_FORCINGS_CSV)
    }

    /// Parse a CSV string with the [`COLUMNS`] headers.
    pub fn from_csv(csv_object: &str) -> Result<Self, TableError> {
        Self::from_reader(csv_object.as_bytes())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);
        let records = rdr
            .deserialize()
            .collect::<Result<Vec<ForcingRecord>, csv::Error>>()?;
        Ok(ForcingTable { records })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let file = std::fs::File::open(path.as_ref())?;
        let table = Self::from_reader(file)?;
        info!("Read {} forcing rows from {}", table.len(), path.as_ref().display());
        Ok(table)
    }

    pub fn records(&self) -> &[ForcingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a row at the end of the table.
    pub fn push(&mut self, record: ForcingRecord) {
        self.records.push(record);
    }

    /// Insert a row before `index`; `index == len` appends.
    pub fn insert(&mut self, index: usize, record: ForcingRecord) -> Result<(), TableError> {
        if index > self.records.len() {
            return Err(self.out_of_range(index));
        }
        self.records.insert(index, record);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<ForcingRecord, TableError> {
        if index >= self.records.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.records.remove(index))
    }

    /// Change one row in place.
    pub fn edit<F>(&mut self, index: usize, f: F) -> Result<(), TableError>
    where
        F: FnOnce(&mut ForcingRecord),
    {
        let len = self.records.len();
        match self.records.get_mut(index) {
            Some(record) => {
                f(record);
                Ok(())
            }
            None => Err(TableError::RowOutOfRange { index, len }),
        }
    }

    /// Stable sort by time, so edited rows can be put back in order.
    pub fn sort_by_time(&mut self) {
        self.records.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    /// Snapshot the table as a series ready for evaluation.
    pub fn to_series(&self) -> Result<DiurnalSeries, DomainError> {
        DiurnalSeries::new(self.records.iter().copied().map(DiurnalRow::from).collect())
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), TableError> {
        let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
        for record in &self.records {
            wtr.serialize(record)?;
        }
        wtr.flush()?;
        Ok(())
    }

    fn out_of_range(&self, index: usize) -> TableError {
        TableError::RowOutOfRange {
            index,
            len: self.records.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(time: f64) -> ForcingRecord {
        ForcingRecord {
            time,
            net_radiation: 100.0,
            air_temperature: 25.0,
            water_temperature: 24.0,
            wind_speed: 2.0,
            relative_humidity: 50.0,
        }
    }

    #[test]
    fn test_default_profile() {
        let table = ForcingTable::default_profile().unwrap();
        assert_eq!(table.len(), 7);
        let times: Vec<f64> = table.records().iter().map(|r| r.time).collect();
        assert_eq!(times, vec![0.0, 4.0, 8.0, 12.0, 16.0, 20.0, 24.0]);
        assert_eq!(table.records()[3].net_radiation, 330.0);
        assert_eq!(table.records()[0].relative_humidity, 90.0);
        assert_eq!(table.records()[6].wind_speed, 3.1);
    }

    #[test]
    fn test_from_csv_trims_fields() {
        let csv_data = "\
Time h, Rn Wm-2, Ta oC, Tw oC, Vel ms-1, RH %
 6.0 , 10.0, 20.0, 21.0, 1.5, 65.0
";
        let table = ForcingTable::from_csv(csv_data).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].time, 6.0);
        assert_eq!(table.records()[0].wind_speed, 1.5);
    }

    #[test]
    fn test_from_csv_rejects_garbage() {
        let csv_data = "Time h,Rn Wm-2,Ta oC,Tw oC,Vel ms-1,RH %\n0,abc,1,2,3,4\n";
        assert!(matches!(ForcingTable::from_csv(csv_data), Err(TableError::Csv(_))));
    }

    #[test]
    fn test_row_editing() {
        let mut table = ForcingTable::new(vec![record(0.0), record(6.0)]);
        table.push(record(12.0));
        table.insert(1, record(3.0)).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.records()[1].time, 3.0);

        table.edit(2, |r| r.relative_humidity = 80.0).unwrap();
        assert_eq!(table.records()[2].relative_humidity, 80.0);

        let removed = table.remove(0).unwrap();
        assert_eq!(removed.time, 0.0);
        assert_eq!(table.len(), 3);

        assert!(matches!(
            table.remove(3),
            Err(TableError::RowOutOfRange { index: 3, len: 3 })
        ));
        assert!(table.edit(7, |_| {}).is_err());
        assert!(table.insert(5, record(1.0)).is_err());
    }

    #[test]
    fn test_sort_by_time_keeps_duplicates_in_order() {
        let mut first = record(4.0);
        first.net_radiation = 1.0;
        let mut second = record(4.0);
        second.net_radiation = 2.0;
        let mut table = ForcingTable::new(vec![record(8.0), first, second, record(0.0)]);
        table.sort_by_time();
        let times: Vec<f64> = table.records().iter().map(|r| r.time).collect();
        assert_eq!(times, vec![0.0, 4.0, 4.0, 8.0]);
        assert_eq!(table.records()[1].net_radiation, 1.0);
        assert_eq!(table.records()[2].net_radiation, 2.0);
    }

    #[test]
    fn test_to_series() {
        let table = ForcingTable::default_profile().unwrap();
        let series = table.to_series().unwrap();
        assert_eq!(series.len(), 7);
        assert_eq!(series.rows()[4].observation.air_temperature, 38.0);

        let empty = ForcingTable::default();
        assert_eq!(empty.to_series(), Err(DomainError::EmptySeries));
    }

    #[test]
    fn test_from_path() {
        let path = std::env::temp_dir().join(format!("evap-forcings-{}.csv", std::process::id()));
        let table = ForcingTable::default_profile().unwrap();
        table.write_csv(std::fs::File::create(&path).unwrap()).unwrap();
        let loaded = ForcingTable::from_path(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.unwrap(), table);

        assert!(matches!(ForcingTable::from_path(&path), Err(TableError::Io(_))));
    }

    #[test]
    fn test_write_csv_reads_back() {
        let table = ForcingTable::default_profile().unwrap();
        let mut buffer = Vec::new();
        table.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("Time h,Rn Wm-2,Ta oC,Tw oC,Vel ms-1,RH %"));
        assert_eq!(ForcingTable::from_csv(&text).unwrap(), table);
    }
}
