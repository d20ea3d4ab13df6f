/// Source table reader.
///
/// Reads the delimited-text export of the mortality spreadsheet into
/// `RawRecord`s. The header row is checked once against `REQUIRED_COLUMNS`
/// so a renamed or missing column fails the whole run up front instead of
/// silently producing empty charts.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ByteRecord;
use tracing::debug;

use crate::error::PipelineError;
use crate::model::{
    RawRecord, COL_AGE, COL_CASE_STATUS, COL_CITY, COL_DEATH_DATE, COL_REGION, REQUIRED_COLUMNS,
};

/// Opens `path` and reads every row.
pub fn load_records<P: AsRef<Path>>(
    path: P,
    delimiter: u8,
) -> Result<Vec<RawRecord>, PipelineError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;

    let records = read_records(file, delimiter)?;
    debug!(path = %path.display(), rows = records.len(), "loaded source table");
    Ok(records)
}

/// Reads rows from any reader.
///
/// Header and field whitespace is trimmed. Rows may be shorter than the
/// header; missing trailing cells read as empty. Cells are decoded lossily
/// so a stray non-UTF-8 byte only mangles that cell, never the run.
pub fn read_records<R: Read>(reader: R, delimiter: u8) -> Result<Vec<RawRecord>, PipelineError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    // Build column index map; first occurrence wins on duplicate names
    let headers = rdr.headers()?.clone();
    let mut col_map: HashMap<&str, usize> = HashMap::new();
    for (idx, header) in headers.iter().enumerate() {
        col_map.entry(header).or_insert(idx);
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !col_map.contains_key(**col))
        .map(|col| col.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(PipelineError::MissingColumns(missing));
    }

    let columns = ColumnIndex {
        death_date: col_map[COL_DEATH_DATE],
        case_status: col_map[COL_CASE_STATUS],
        region: col_map[COL_REGION],
        city: col_map[COL_CITY],
        age: col_map[COL_AGE],
    };

    let mut records = Vec::new();
    let mut short_rows = 0usize;
    let mut lossy_rows = 0usize;

    for result in rdr.byte_records() {
        let row = result?;
        if row.len() < headers.len() {
            short_rows += 1;
        }
        if std::str::from_utf8(row.as_slice()).is_err() {
            lossy_rows += 1;
        }
        records.push(columns.extract(&row));
    }

    if short_rows > 0 || lossy_rows > 0 {
        debug!(short_rows, lossy_rows, "irregular rows read with blank or replaced cells");
    }

    Ok(records)
}

/// Positions of the required columns in the header row.
struct ColumnIndex {
    death_date: usize,
    case_status: usize,
    region: usize,
    city: usize,
    age: usize,
}

impl ColumnIndex {
    fn extract(&self, row: &ByteRecord) -> RawRecord {
        let cell = |idx: usize| {
            row.get(idx)
                .map(|bytes| String::from_utf8_lossy(bytes).trim().to_string())
                .unwrap_or_default()
        };

        RawRecord {
            death_date: cell(self.death_date),
            case_status: cell(self.case_status),
            region: cell(self.region),
            city: cell(self.city),
            age: cell(self.age),
        }
    }
}
