use std::io;

use super::error::{DataError, Result};
use super::model::{CovidTable, COLUMNS};

pub const EXPORT_FILE_NAME: &str = "filtered_covid_data.csv";
pub const EXPORT_MIME: &str = "text/csv";

/// A downloadable serialization of the filtered table.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPayload {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub data: String,
}

/// Serialize `table` as CSV: one header line, then one line per row.
/// The header is written even when the table is empty.
pub fn export_csv(table: &CovidTable) -> Result<ExportPayload> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(COLUMNS)?;
    for obs in table.iter() {
        writer.serialize(obs)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| DataError::Io(e.into_error()))?;
    let data = String::from_utf8(bytes)
        .map_err(|e| DataError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;

    Ok(ExportPayload {
        file_name: EXPORT_FILE_NAME,
        mime: EXPORT_MIME,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fetcher::parse_dataset;
    use crate::data::model::fixtures::two_countries;

    #[test]
    fn header_plus_one_line_per_row() {
        let table = two_countries();
        let payload = export_csv(&table).unwrap();
        assert_eq!(payload.file_name, "filtered_covid_data.csv");
        assert_eq!(payload.mime, "text/csv");

        let lines: Vec<&str> = payload.data.lines().collect();
        assert_eq!(lines.len(), table.len() + 1);
        assert_eq!(
            lines[0],
            "date,location,total_cases,total_deaths,population,iso_code"
        );
        assert_eq!(lines[1], "2021-03-01,Countryland,10.0,1.0,1000000,COU");
        assert_eq!(lines[2], "2021-03-01,Otherland,5.0,,1000000,OTH");
    }

    #[test]
    fn empty_table_still_has_a_header() {
        let payload = export_csv(&CovidTable::default()).unwrap();
        assert_eq!(payload.data.lines().count(), 1);
    }

    #[test]
    fn export_reads_back_as_the_same_table() {
        let table = two_countries();
        let payload = export_csv(&table).unwrap();
        assert_eq!(parse_dataset(payload.data.as_bytes()).unwrap(), table);
    }
}
