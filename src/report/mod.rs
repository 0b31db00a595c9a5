// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Text reports for completed batches.
//!
//! Each batch writes three files named `{prefix}_{batch:05}_{kind}.txt`:
//! the objects found, the pruner counts, and the per-seed timings. The
//! formatting functions take any writer.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::batch::{BatchReport, Output, SeedTiming};
use crate::state::PrunerCounters;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One line per object: its Feasible vertices as bitstrings.
pub fn write_outputs<W: Write>(writer: &mut W, outputs: &[Output]) -> io::Result<()> {
    for output in outputs {
        writeln!(writer, "{}", output.vertices)?;
    }
    Ok(())
}

/// `name count`, one line per pruner in application order.
pub fn write_pruners<W: Write>(writer: &mut W, counters: &PrunerCounters) -> io::Result<()> {
    for (pruner, count) in counters.iter() {
        writeln!(writer, "{} {}", pruner, count)?;
    }
    Ok(())
}

/// `stamp seconds outputs`, one line per seed.
pub fn write_timings<W: Write>(writer: &mut W, timings: &[SeedTiming]) -> io::Result<()> {
    for timing in timings {
        writeln!(
            writer,
            "{} {:.6} {}",
            timing.stamp,
            timing.elapsed.as_secs_f64(),
            timing.outputs
        )?;
    }
    Ok(())
}

/// Write the three report files for `report` into `dir`, returning their
/// paths.
pub fn write_batch_report(
    dir: &Path,
    prefix: &str,
    report: &BatchReport,
) -> Result<Vec<PathBuf>, ReportError> {
    let path_for = |kind: &str| dir.join(format!("{}_{:05}_{}.txt", prefix, report.batch_id, kind));

    let outputs = path_for("outputs");
    write_file(&outputs, |w| write_outputs(w, &report.outputs))?;
    let pruners = path_for("pruners");
    write_file(&pruners, |w| write_pruners(w, &report.counters))?;
    let timings = path_for("timings");
    write_file(&timings, |w| write_timings(w, &report.timings))?;

    info!(
        batch_id = report.batch_id,
        dir = %dir.display(),
        "batch report written"
    );
    Ok(vec![outputs, pruners, timings])
}

fn write_file(
    path: &Path,
    body: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
) -> Result<(), ReportError> {
    let wrap = |source: io::Error| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(wrap)?);
    body(&mut writer).map_err(wrap)?;
    writer.flush().map_err(wrap)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::Config;
    use crate::geometry::VertexSet;
    use crate::state::Pruner;

    fn report() -> BatchReport {
        let mut counters = PrunerCounters::new();
        counters.increment(Pruner::Cover);
        counters.increment(Pruner::Cover);
        counters.increment(Pruner::Closure);
        BatchReport {
            batch_id: 3,
            dimension: 3,
            degree: 3,
            config: Config::default(),
            outputs: vec![
                Output {
                    vertices: VertexSet::from_bitstrings(3, ["011", "101", "110"]).unwrap(),
                    seed: 2,
                    batch: 3,
                },
                Output {
                    vertices: VertexSet::from_bitstrings(3, Vec::<&str>::new()).unwrap(),
                    seed: 5,
                    batch: 3,
                },
            ],
            counters,
            timings: vec![SeedTiming {
                stamp: 2,
                elapsed: Duration::from_micros(1_500_250),
                outputs: 2,
            }],
        }
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buffer = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_outputs_format() {
        let report = report();
        assert_eq!(render(|w| write_outputs(w, &report.outputs)), "011 101 110\n\n");
    }

    #[test]
    fn test_pruners_format() {
        let report = report();
        assert_eq!(
            render(|w| write_pruners(w, &report.counters)),
            "closure 1\nintersecting 0\ncover 2\nminimal 0\ncritical 0\n"
        );
    }

    #[test]
    fn test_timings_format() {
        let report = report();
        assert_eq!(render(|w| write_timings(w, &report.timings)), "2 1.500250 2\n");
    }

    #[test]
    fn test_write_batch_report() {
        let dir = std::env::temp_dir().join(format!("nonpolar-report-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let paths = write_batch_report(&dir, "run", &report()).unwrap();
        let names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["run_00003_outputs.txt", "run_00003_pruners.txt", "run_00003_timings.txt"]
        );
        assert_eq!(std::fs::read_to_string(&paths[0]).unwrap(), "011 101 110\n\n");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = std::env::temp_dir().join("nonpolar-report-missing").join("nested");
        let err = write_batch_report(&dir, "run", &report()).unwrap_err();
        assert!(err.to_string().contains("run_00003_outputs.txt"));
    }
}
