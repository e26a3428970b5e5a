//! CSV export of a session's measurements.
//!
//! One row per run, in recording order:
//!
//! ```text
//! procesos,tiempo_s,speedup_exp,speedup_amdahl,eficiencia,granularidad,gflops,matrix_size
//! ```
//!
//! `speedup_amdahl`, `gflops` and `matrix_size` are left blank when the run
//! has no value for them.

use std::io;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::Error;
use crate::measurement::{Granularity, Measurement};
use crate::session::Session;

#[derive(Serialize)]
struct CsvRow {
    procesos: usize,
    tiempo_s: f64,
    speedup_exp: f64,
    speedup_amdahl: Option<f64>,
    eficiencia: f64,
    granularidad: Granularity,
    gflops: Option<f64>,
    matrix_size: Option<usize>,
}

impl From<&Measurement> for CsvRow {
    fn from(m: &Measurement) -> Self {
        Self {
            procesos: m.workers(),
            tiempo_s: m.elapsed_secs(),
            speedup_exp: m.speedup(),
            speedup_amdahl: m.speedup_amdahl(),
            eficiencia: m.efficiency(),
            granularidad: m.granularity(),
            gflops: m.gflops(),
            matrix_size: m.problem_size(),
        }
    }
}

const HEADER: [&str; 8] = [
    "procesos",
    "tiempo_s",
    "speedup_exp",
    "speedup_amdahl",
    "eficiencia",
    "granularidad",
    "gflops",
    "matrix_size",
];

/// Writes the header and one row per measurement to `writer`.
///
/// The header is written explicitly so an empty session still produces it.
pub fn write_csv<W: io::Write>(session: &Session, writer: W) -> Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(HEADER)?;
    for measurement in session.measurements() {
        wtr.serialize(CsvRow::from(measurement))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(session: &Session) -> Result<String, Error> {
    let mut buf = Vec::new();
    write_csv(session, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Serializes the session and writes it to `path`, replacing any existing
/// file.
pub async fn export_csv(session: &Session, path: impl AsRef<Path>) -> Result<(), Error> {
    let path = path.as_ref();
    let content = to_csv_string(session)?;
    tokio::fs::write(path, content).await?;
    info!(
        path = %path.display(),
        rows = session.measurements().len(),
        "results exported"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Session {
        let mut session = Session::new();
        session.set_sequential_time(10.0).unwrap();
        session.add_result(2, 5.0, Some(100)).unwrap();
        session.add_result(4, 4.0, None).unwrap();
        session
    }

    #[test]
    fn header_matches_column_contract() {
        let csv = to_csv_string(&Session::new()).unwrap();
        assert_eq!(
            csv,
            "procesos,tiempo_s,speedup_exp,speedup_amdahl,eficiencia,granularidad,gflops,matrix_size\n"
        );
    }

    #[test]
    fn optional_columns_are_blank() {
        let csv = to_csv_string(&scenario()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "2,5.0,2.0,,1.0,Coarse,0.0004,100");
        assert_eq!(lines[2], "4,4.0,2.5,4.0,0.625,Medium,,");
    }

    #[test]
    fn rows_parse_back_with_eight_fields() {
        let csv = to_csv_string(&scenario()).unwrap();
        let mut rdr = csv::Reader::from_reader(csv.as_bytes());
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(headers.len(), 8);
        for record in rdr.records() {
            let record = record.unwrap();
            assert_eq!(record.len(), 8);
            let workers: usize = record[0].parse().unwrap();
            assert!(workers == 2 || workers == 4);
        }
    }

    #[tokio::test]
    async fn export_writes_file() {
        let path = std::env::temp_dir().join(format!(
            "perf-analyzer-export-{}.csv",
            std::process::id()
        ));
        let session = scenario();

        export_csv(&session, &path).await.unwrap();
        let written = tokio::fs::read_to_string(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(written, to_csv_string(&session).unwrap());
    }
}
