//! Complaints feed backed by a local CSV file.
//!
//! Columns are positional: `id,lat,lon,type,ward,date,description,status`.
//! The header row is skipped but never interpreted.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::Complaint;

const MIN_COLUMNS: usize = 7;
const DEFAULT_STATUS: &str = "open";

/// Parse complaints CSV text. Malformed rows are skipped.
pub fn parse_complaints(content: &str) -> Result<Vec<Complaint>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut complaints = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        // +2: one for the header, one for 1-based line numbers
        let line = idx + 2;

        if record.len() < MIN_COLUMNS {
            warn!(line, columns = record.len(), "Skipping complaint row with too few columns");
            continue;
        }

        let (lat, lon) = match (record[1].parse::<f64>(), record[2].parse::<f64>()) {
            (Ok(lat), Ok(lon)) if lat.is_finite() && lon.is_finite() => (lat, lon),
            _ => {
                warn!(line, lat = &record[1], lon = &record[2], "Skipping complaint row with bad coordinates");
                continue;
            }
        };

        let status = record
            .get(7)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_STATUS);

        complaints.push(Complaint {
            id: record[0].to_string(),
            lat,
            lon,
            kind: record[3].to_string(),
            ward: record[4].to_string(),
            date: record[5].to_string(),
            description: record[6].to_string(),
            status: status.to_string(),
        });
    }

    Ok(complaints)
}

/// Read and parse the complaints file at `path`.
pub async fn load_complaints(path: &Path) -> Result<Vec<Complaint>> {
    debug!("Loading complaints from {:?}", path);
    let content = tokio::fs::read_to_string(path).await?;
    let complaints = parse_complaints(&content)?;
    debug!("Loaded {} complaints", complaints.len());
    Ok(complaints)
}

/// Optional equality filters over a complaint list (case-insensitive).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComplaintFilter {
    pub ward: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl ComplaintFilter {
    pub fn is_empty(&self) -> bool {
        self.ward.is_none() && self.status.is_none() && self.kind.is_none()
    }

    pub fn matches(&self, complaint: &Complaint) -> bool {
        fn field_ok(want: &Option<String>, have: &str) -> bool {
            want.as_deref().map_or(true, |w| w.eq_ignore_ascii_case(have))
        }
        field_ok(&self.ward, &complaint.ward)
            && field_ok(&self.status, &complaint.status)
            && field_ok(&self.kind, &complaint.kind)
    }

    pub fn apply(&self, complaints: Vec<Complaint>) -> Vec<Complaint> {
        if self.is_empty() {
            return complaints;
        }
        complaints.into_iter().filter(|c| self.matches(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const SAMPLE: &str = "\
id,lat,lon,type,ward,date,description,status
1,12.9716,77.5946,Pothole,Ward 12,2024-11-15,Large pothole on main road,open
2,12.9750,77.5980,Street Light,Ward 12,2024-11-20,Street light not working,
3,12.9700,77.5920,Water Supply,Ward 11,2024-11-25,Low water pressure,resolved
";

    #[test]
    fn test_parse_sample() {
        let complaints = parse_complaints(SAMPLE).unwrap();
        assert_eq!(complaints.len(), 3);
        assert_eq!(complaints[0].id, "1");
        assert_eq!(complaints[0].kind, "Pothole");
        assert!((complaints[0].lat - 12.9716).abs() < 1e-9);
        assert_eq!(complaints[2].status, "resolved");
    }

    #[test]
    fn test_empty_status_defaults_to_open() {
        let complaints = parse_complaints(SAMPLE).unwrap();
        assert_eq!(complaints[1].status, "open");
    }

    #[test]
    fn test_missing_status_column_defaults_to_open() {
        let csv = "id,lat,lon,type,ward,date,description\n7,1.0,2.0,Garbage,Ward 3,2024-12-01,Overflowing bin\n";
        let complaints = parse_complaints(csv).unwrap();
        assert_eq!(complaints.len(), 1);
        assert_eq!(complaints[0].status, "open");
    }

    #[test]
    fn test_columns_are_positional() {
        let csv = "a,b,c,d,e,f,g,h\n9,10.5,20.25,Noise,Ward 1,2024-10-10,Loud music,open\n";
        let complaints = parse_complaints(csv).unwrap();
        assert_eq!(complaints[0].ward, "Ward 1");
        assert_eq!(complaints[0].description, "Loud music");
    }

    #[test]
    fn test_quoted_description_with_commas() {
        let csv = "id,lat,lon,type,ward,date,description,status\n\
                   4,1.0,2.0,Drainage,Ward 5,2024-11-01,\"Blocked drain, flooding street\",open\n";
        let complaints = parse_complaints(csv).unwrap();
        assert_eq!(complaints[0].description, "Blocked drain, flooding street");
        assert_eq!(complaints[0].status, "open");
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let csv = "id,lat,lon,type,ward,date,description,status\n\
                   1,not-a-number,77.5,Pothole,Ward 1,2024-01-01,x,open\n\
                   2,12.0\n\
                   3,12.0,77.0,Pothole,Ward 2,2024-01-02,y,open\n";
        let complaints = parse_complaints(csv).unwrap();
        assert_eq!(complaints.len(), 1);
        assert_eq!(complaints[0].id, "3");
    }

    #[test]
    fn test_non_finite_coordinates_are_skipped() {
        let csv = "id,lat,lon,type,ward,date,description,status\n\
                   1,NaN,inf,Pothole,Ward 1,2024-01-01,x,open\n\
                   2,12.0,-inf,Pothole,Ward 1,2024-01-01,x,open\n\
                   3,12.0,77.0,Pothole,Ward 2,2024-01-02,y,open\n";
        let complaints = parse_complaints(csv).unwrap();
        assert_eq!(complaints.len(), 1);
        assert_eq!(complaints[0].id, "3");
    }

    #[test]
    fn test_header_only_yields_empty_list() {
        let complaints = parse_complaints("id,lat,lon,type,ward,date,description,status\n").unwrap();
        assert!(complaints.is_empty());
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let complaints = parse_complaints(SAMPLE).unwrap();
        let filter = ComplaintFilter { ward: Some("ward 12".into()), ..Default::default() };
        let hits = filter.apply(complaints.clone());
        assert_eq!(hits.len(), 2);

        let filter = ComplaintFilter {
            ward: Some("Ward 12".into()),
            kind: Some("street light".into()),
            ..Default::default()
        };
        let hits = filter.apply(complaints);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");
    }

    #[test]
    fn test_load_complaints_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let complaints = tokio_test::block_on(load_complaints(file.path())).unwrap();
        assert_eq!(complaints.len(), 3);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = tokio_test::block_on(load_complaints(Path::new("/nonexistent/complaints.csv")))
            .unwrap_err();
        assert!(matches!(err, crate::CivicaError::Io(_)));
    }
}
