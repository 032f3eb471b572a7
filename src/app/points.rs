use crate::tile::{LonLat, Loc};
use std::{collections::HashSet, fs::File, io::Read, num::ParseFloatError, path::Path};
use thiserror::Error;
use tracing::debug;

/// Zero-based CSV column indexes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PointColumns {
    pub(crate) species: usize,
    pub(crate) longitude: usize,
    pub(crate) latitude: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PointRecord {
    pub(crate) species: String,
    pub(crate) lon_lat: LonLat,
}

#[derive(Error, Debug)]
pub(crate) enum PointLoadError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: missing column {column}")]
    MissingColumn { line: u64, column: usize },

    #[error("line {line}: invalid coordinate {value:?} in column {column}: {source}")]
    InvalidCoordinate {
        line: u64,
        column: usize,
        value: String,
        source: ParseFloatError,
    },
}

pub(crate) fn load_points(
    path: &Path,
    columns: PointColumns,
) -> Result<Vec<PointRecord>, PointLoadError> {
    let file = File::open(path).map_err(csv::Error::from)?;

    read_points(file, columns)
}

pub(crate) fn read_points<R: Read>(
    reader: R,
    columns: PointColumns,
) -> Result<Vec<PointRecord>, PointLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        let line = row.position().map_or(0, |pos| pos.line());

        let cell = |column: usize| {
            row.get(column)
                .map(str::trim)
                .ok_or(PointLoadError::MissingColumn { line, column })
        };

        let species = cell(columns.species)?;
        let lon = cell(columns.longitude)?;
        let lat = cell(columns.latitude)?;

        let coordinate = |value: &str, column: usize| {
            value
                .parse::<f64>()
                .map_err(|source| PointLoadError::InvalidCoordinate {
                    line,
                    column,
                    value: value.to_string(),
                    source,
                })
        };

        records.push(PointRecord {
            species: species.to_string(),
            lon_lat: LonLat {
                lon: coordinate(lon, columns.longitude)?,
                lat: coordinate(lat, columns.latitude)?,
            },
        });
    }

    debug!(count = records.len(), "read point records");

    Ok(records)
}

/// Read-only set of points, projected to loc space once at startup.
#[derive(Debug)]
pub(crate) struct PointSet {
    locs: Vec<Loc>,
    species_count: usize,
}

impl PointSet {
    pub(crate) fn new(records: &[PointRecord]) -> Self {
        let species_count = records
            .iter()
            .map(|record| record.species.as_str())
            .collect::<HashSet<_>>()
            .len();

        Self {
            locs: records.iter().map(|record| Loc::from(record.lon_lat)).collect(),
            species_count,
        }
    }

    pub(crate) fn locs(&self) -> &[Loc] {
        &self.locs
    }

    pub(crate) fn len(&self) -> usize {
        self.locs.len()
    }

    pub(crate) fn species_count(&self) -> usize {
        self.species_count
    }
}
