//! Survey table import
//!
//! Reads a header-row CSV of survey stations into a `Trajectory`. Column
//! names are matched case-insensitively:
//!
//! | Array | Accepted headers                 |
//! |-------|----------------------------------|
//! | MD    | `MD`, `measured_depth`, `DEPT`   |
//! | TVD   | `TVD`, `true_vertical_depth`     |
//! | DX    | `DX`, `east`, `easting`, `X`     |
//! | DY    | `DY`, `north`, `northing`, `Y`   |
//! | INC   | `INC`, `inclination`, `incl`     |
//! | AZI   | `AZI`, `azimuth`, `azim`         |
//!
//! When MD, INC and AZI are all present the positions are derived by minimum
//! curvature from the tie-in and any TVD/DX/DY columns are ignored. Otherwise
//! the columns present are taken as-is.

use crate::error::LoadError;
use crate::trajectory::{ArrayName, TieIn, Trajectory, TrajectoryRecord};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Header index of each recognised column.
#[derive(Debug, Clone, Default)]
struct ColumnMap {
    md: Option<usize>,
    tvd: Option<usize>,
    dx: Option<usize>,
    dy: Option<usize>,
    inc: Option<usize>,
    azi: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut map = Self::default();
        for (idx, col) in headers.iter().enumerate() {
            let slot = match col.trim().to_lowercase().as_str() {
                "md" | "measured_depth" | "measured depth" | "dept" => &mut map.md,
                "tvd" | "true_vertical_depth" | "true vertical depth" => &mut map.tvd,
                "dx" | "east" | "easting" | "x" => &mut map.dx,
                "dy" | "north" | "northing" | "y" => &mut map.dy,
                "inc" | "inclination" | "incl" => &mut map.inc,
                "azi" | "azimuth" | "azim" => &mut map.azi,
                _ => continue,
            };
            // First matching column wins
            if slot.is_none() {
                *slot = Some(idx);
            }
        }
        map
    }

    fn columns(&self) -> impl Iterator<Item = (ArrayName, usize)> + '_ {
        [
            (ArrayName::Md, self.md),
            (ArrayName::Tvd, self.tvd),
            (ArrayName::Dx, self.dx),
            (ArrayName::Dy, self.dy),
            (ArrayName::Inc, self.inc),
            (ArrayName::Azi, self.azi),
        ]
        .into_iter()
        .filter_map(|(name, idx)| idx.map(|i| (name, i)))
    }
}

/// Import stations from any CSV source.
pub fn from_csv_reader<R: Read>(reader: R, tie_in: TieIn) -> Result<Trajectory, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let map = ColumnMap::from_headers(&headers);
    if map.md.is_none() {
        return Err(LoadError::NoSurveyColumns);
    }

    let columns: Vec<(ArrayName, usize)> = map.columns().collect();
    let mut values: Vec<Vec<f64>> = vec![Vec::new(); columns.len()];

    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        for ((name, idx), out) in columns.iter().zip(values.iter_mut()) {
            let raw = record.get(*idx).unwrap_or("");
            let value = raw.parse::<f64>().map_err(|_| LoadError::BadNumber {
                row: row + 1,
                column: name.to_string(),
                value: raw.to_string(),
            })?;
            out.push(value);
        }
    }

    let mut record = TrajectoryRecord {
        xhead: tie_in.xhead,
        yhead: tie_in.yhead,
        datum: tie_in.datum,
        ..Default::default()
    };
    for ((name, _), column) in columns.into_iter().zip(values) {
        let slot = match name {
            ArrayName::Md => &mut record.md,
            ArrayName::Tvd => &mut record.tvd,
            ArrayName::Dx => &mut record.dx,
            ArrayName::Dy => &mut record.dy,
            ArrayName::Inc => &mut record.inc,
            ArrayName::Azi => &mut record.azi,
        };
        *slot = Some(column);
    }

    let trajectory = match (record.md, record.inc, record.azi) {
        (Some(md), Some(inc), Some(azi)) => {
            debug!(stations = md.len(), "Deriving positions by minimum curvature");
            Trajectory::from_md_inc_azi(md, inc, azi, tie_in)?
        }
        (md, inc, azi) => Trajectory::from_record(TrajectoryRecord { md, inc, azi, ..record })?,
    };
    Ok(trajectory)
}

/// Import stations from a CSV file.
pub fn load_csv(path: &Path, tie_in: TieIn) -> Result<Trajectory, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::Io(path.to_path_buf(), e))?;
    let trajectory = from_csv_reader(file, tie_in)?;
    info!(
        path = %path.display(),
        stations = trajectory.len(),
        "Loaded survey"
    );
    Ok(trajectory)
}
