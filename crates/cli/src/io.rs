//! Point and trace files.
//!
//! Point tables are JSON (`[{"x":..,"y":..}, ...]`), CSV, or Parquet with `x`
//! and `y` columns; the format follows the file extension. Trace files are JSON
//! holding the input points next to the generated steps.

use std::fs::{self, File};
use std::path::Path;

use anyhow::{bail, Context, Result};
use hullstep::hull::{StepAction, StepSequence};
use hullstep::{validate_points, Point};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Csv,
    Parquet,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("csv") => Ok(Format::Csv),
            Some("parquet") => Ok(Format::Parquet),
            other => bail!(
                "unsupported extension {other:?} for {} (expected json, csv or parquet)",
                path.display()
            ),
        }
    }
}

/// Points plus the trace computed from them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceFile {
    pub points: Vec<Point>,
    pub steps: StepSequence,
}

/// Anything `play` accepts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum JsonInput {
    Trace(TraceFile),
    Points(Vec<Point>),
}

/// Read a point table and reject non-finite coordinates.
pub fn read_points(path: &Path) -> Result<Vec<Point>> {
    let points = match Format::from_path(path)? {
        Format::Json => {
            let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_slice(&bytes)
                .with_context(|| format!("parsing points from {}", path.display()))?
        }
        Format::Csv => {
            let df = LazyCsvReader::new(path)
                .with_has_header(true)
                .with_infer_schema_length(Some(100))
                .finish()?
                .collect()
                .with_context(|| format!("reading {}", path.display()))?;
            points_from_frame(&df)?
        }
        Format::Parquet => {
            let df = LazyFrame::scan_parquet(path, ScanArgsParquet::default())?
                .collect()
                .with_context(|| format!("reading {}", path.display()))?;
            points_from_frame(&df)?
        }
    };
    validate_points(&points).with_context(|| format!("validating {}", path.display()))?;
    Ok(points)
}

fn points_from_frame(df: &DataFrame) -> Result<Vec<Point>> {
    let xs = df.column("x")?.cast(&DataType::Float64)?;
    let ys = df.column("y")?.cast(&DataType::Float64)?;
    let xs = xs.f64()?;
    let ys = ys.f64()?;
    xs.into_iter()
        .zip(ys.into_iter())
        .enumerate()
        .map(|(row, xy)| match xy {
            (Some(x), Some(y)) => Ok(Point::new(x, y)),
            _ => bail!("row {row}: missing coordinate"),
        })
        .collect()
}

pub fn write_points(path: &Path, points: &[Point]) -> Result<()> {
    let format = Format::from_path(path)?;
    ensure_parent(path)?;
    match format {
        Format::Json => fs::write(path, serde_json::to_vec_pretty(points)?)
            .with_context(|| format!("writing {}", path.display()))?,
        Format::Csv | Format::Parquet => {
            let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
            let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
            let mut df = df!("x" => xs, "y" => ys)?;
            let mut file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            if format == Format::Csv {
                CsvWriter::new(&mut file).finish(&mut df)?;
            } else {
                ParquetWriter::new(&mut file).finish(&mut df)?;
            }
        }
    }
    Ok(())
}

pub fn write_trace(path: &Path, trace: &TraceFile) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, serde_json::to_vec_pretty(trace)?)
        .with_context(|| format!("writing {}", path.display()))
}

/// Load either a trace file or a point table. Point tables are traced on the spot;
/// trace files must hold exactly the trace their points generate.
pub fn read_playable(path: &Path) -> Result<TraceFile> {
    if Format::from_path(path)? == Format::Json {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let input: JsonInput = serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing {}", path.display()))?;
        return match input {
            JsonInput::Trace(trace) => {
                validate_points(&trace.points)?;
                check_trace(&trace).with_context(|| format!("checking {}", path.display()))?;
                Ok(trace)
            }
            JsonInput::Points(points) => {
                validate_points(&points)?;
                Ok(trace_of(points))
            }
        };
    }
    Ok(trace_of(read_points(path)?))
}

fn check_trace(trace: &TraceFile) -> Result<()> {
    match trace.steps.last() {
        None => bail!("trace has no steps"),
        Some(last) if last.action() != StepAction::Finalized => {
            bail!("trace ends in {:?}, not Finalized", last.action())
        }
        Some(_) => {}
    }
    if trace.steps != hullstep::hull::generate(&trace.points) {
        bail!("steps do not match the trace of its points");
    }
    Ok(())
}

pub fn trace_of(points: Vec<Point>) -> TraceFile {
    let steps = hullstep::hull::generate(&points);
    TraceFile { points, steps }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating dir {}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.5, 2.0),
            Point::new(3.0, -1.0),
        ]
    }

    #[test]
    fn format_by_extension() {
        assert_eq!(Format::from_path(Path::new("a/b.csv")).unwrap(), Format::Csv);
        assert_eq!(
            Format::from_path(Path::new("b.parquet")).unwrap(),
            Format::Parquet
        );
        assert!(Format::from_path(Path::new("b.txt")).is_err());
        assert!(Format::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn csv_points_survive_write_and_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/points.csv");
        write_points(&path, &sample()).unwrap();
        assert_eq!(read_points(&path).unwrap(), sample());
    }

    #[test]
    fn csv_with_integer_columns_is_cast() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ints.csv");
        fs::write(&path, "x,y\n0,0\n2,1\n4,0\n").unwrap();
        let pts = read_points(&path).unwrap();
        assert_eq!(pts[1], Point::new(2.0, 1.0));
    }

    #[test]
    fn missing_column_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("xz.csv");
        fs::write(&path, "x,z\n0,0\n1,1\n").unwrap();
        assert!(read_points(&path).is_err());
    }

    #[test]
    fn playable_accepts_points_or_traces() {
        let dir = tempdir().unwrap();
        let points_path = dir.path().join("p.json");
        write_points(&points_path, &sample()).unwrap();
        let from_points = read_playable(&points_path).unwrap();
        assert_eq!(from_points.points, sample());

        let trace_path = dir.path().join("t.json");
        write_trace(&trace_path, &from_points).unwrap();
        let from_trace = read_playable(&trace_path).unwrap();
        assert_eq!(from_trace, from_points);
    }

    #[test]
    fn trace_without_steps_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.json");
        let trace = TraceFile {
            points: sample(),
            steps: StepSequence::default(),
        };
        write_trace(&path, &trace).unwrap();
        let err = read_playable(&path).unwrap_err();
        assert!(format!("{err:#}").contains("no steps"), "{err:#}");
    }

    #[test]
    fn trace_for_other_points_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("swapped.json");
        let mut trace = trace_of(sample());
        trace.points.push(Point::new(9.0, 9.0));
        write_trace(&path, &trace).unwrap();
        assert!(read_playable(&path).is_err());
    }
}
