//! CSV export of telemetry series
//!
//! One row per sample, with a header row naming the sample fields:
//!
//! ```text
//! timestamp,speed,acceleration,heart_rate,muscle_activity,position_x,position_y
//! 2023-10-15 19:00:00,12.4,6.1,97,52,0.41,0.63
//! ```

use crate::error::{TkfitError, TkfitResult};
use crate::role::PlayerRole;
use crate::series::{Sample, Series};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Column names, in export order
pub const EXPORT_HEADERS: [&str; 7] = [
    "timestamp",
    "speed",
    "acceleration",
    "heart_rate",
    "muscle_activity",
    "position_x",
    "position_y",
];

/// Download filename for a role's export
pub fn export_filename(role: PlayerRole) -> String {
    format!("tekfit_{}_data.csv", role.slug())
}

/// Write a series as CSV into any writer
pub fn write_csv<W: Write>(series: &Series, writer: W) -> TkfitResult<W> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for sample in series.samples() {
        csv_writer.serialize(sample)?;
    }
    csv_writer.flush()?;
    csv_writer.into_inner().map_err(|e| TkfitError::Io(e.into_error()))
}

/// Encode a series as UTF-8 CSV bytes, ready to offer as a download
pub fn to_csv_bytes(series: &Series) -> TkfitResult<Vec<u8>> {
    let bytes = write_csv(series, Vec::with_capacity(series.len() * 80))?;
    debug!(
        role = %series.role(),
        rows = series.len(),
        bytes = bytes.len(),
        "encoded series as CSV"
    );
    Ok(bytes)
}

/// Write a series to a CSV file
pub fn write_to_path(series: &Series, path: &Path) -> TkfitResult<()> {
    let file = File::create(path)?;
    write_csv(series, file)?;
    info!(role = %series.role(), path = %path.display(), "exported series");
    Ok(())
}

/// Write a series into `dir` under its download filename
pub fn write_to_dir(series: &Series, dir: &Path) -> TkfitResult<PathBuf> {
    let path = dir.join(export_filename(series.role()));
    write_to_path(series, &path)?;
    Ok(path)
}

/// Parse exported CSV bytes back into samples
pub fn read_samples(bytes: &[u8]) -> TkfitResult<Vec<Sample>> {
    let mut reader = csv::Reader::from_reader(bytes);

    let headers = reader.headers()?.clone();
    let found: Vec<&str> = headers.iter().collect();
    if found != EXPORT_HEADERS {
        return Err(TkfitError::MalformedRow {
            row: 0,
            reason: format!("unexpected header {:?}", found),
        });
    }

    let mut samples = Vec::new();
    for (idx, record) in reader.deserialize::<Sample>().enumerate() {
        let sample = record.map_err(|e| TkfitError::MalformedRow {
            row: idx + 1,
            reason: e.to_string(),
        })?;
        samples.push(sample);
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::SeriesMetadata;
    use chrono::{Duration, NaiveDate};

    fn series(role: PlayerRole, count: usize) -> Series {
        let match_start = NaiveDate::from_ymd_opt(2023, 10, 15)
            .and_then(|d| d.and_hms_opt(19, 0, 0))
            .unwrap();
        let samples = (0..count)
            .map(|s| Sample {
                timestamp: match_start + Duration::seconds(s as i64),
                speed: 10.0 + s as f64 * 0.25,
                acceleration: 2.5,
                heart_rate: 100 + (s % 7) as u16,
                muscle_activity: 45.0,
                position_x: 0.25,
                position_y: 0.75,
            })
            .collect();
        let metadata = SeriesMetadata {
            role,
            seed: 42,
            rest_breaks_injected: false,
            match_start,
            base_heart_rate: 100,
            base_muscle: 45,
        };
        Series::new(metadata, samples).unwrap()
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename(PlayerRole::Post), "tekfit_post_data.csv");
        assert_eq!(export_filename(PlayerRole::Guard), "tekfit_guard_data.csv");
    }

    #[test]
    fn test_header_and_first_row() {
        let bytes = to_csv_bytes(&series(PlayerRole::Guard, 3)).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some(EXPORT_HEADERS.join(",").as_str()));
        assert_eq!(
            lines.next(),
            Some("2023-10-15 19:00:00,10.0,2.5,100,45.0,0.25,0.75")
        );
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_read_back_preserves_rows() {
        let original = series(PlayerRole::Post, 250);
        let bytes = to_csv_bytes(&original).unwrap();
        let samples = read_samples(&bytes).unwrap();

        assert_eq!(samples.len(), original.len());
        assert_eq!(samples.as_slice(), original.samples());
    }

    #[test]
    fn test_rejects_foreign_header() {
        let err = read_samples(b"time,vitesse\n2023-10-15 19:00:00,1.0\n").unwrap_err();
        assert!(matches!(err, TkfitError::MalformedRow { row: 0, .. }));
    }

    #[test]
    fn test_reports_bad_row() {
        let mut text = EXPORT_HEADERS.join(",");
        text.push_str("\n2023-10-15 19:00:00,1.0,0.5,seventy,8.0,0.7,0.5\n");
        let err = read_samples(text.as_bytes()).unwrap_err();
        assert!(matches!(err, TkfitError::MalformedRow { row: 1, .. }));
    }

    #[test]
    fn test_write_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_to_dir(&series(PlayerRole::Guard, 5), dir.path()).unwrap();

        assert!(path.ends_with("tekfit_guard_data.csv"));
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(read_samples(&bytes).unwrap().len(), 5);
    }
}
