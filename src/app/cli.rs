use crate::{app::points::PointColumns, tile::DEFAULT_EXTENT};
use clap::{Parser, error::ErrorKind};
use std::{net::Ipv4Addr, path::PathBuf, str::FromStr};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileUrlPath(String);

impl TileUrlPath {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for TileUrlPath {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err("tile URL path cannot be empty".into());
        }

        if !trimmed.starts_with('/') {
            return Err(format!("tile URL path must start with '/': {trimmed}"));
        }

        let trimmed = trimmed.trim_end_matches('/');

        if trimmed.is_empty() {
            return Err("tile URL path cannot be '/'".into());
        }

        Ok(Self(trimmed.to_string()))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// CSV file with the point records.
    #[arg(long, env = "POINTTILES_POINTS_CSV", default_value = "trees.csv")]
    pub points_csv: PathBuf,

    /// Zero-based CSV column with the species label.
    #[arg(long, env = "POINTTILES_SPECIES_COLUMN", default_value_t = 2)]
    pub species_column: usize,

    /// Zero-based CSV column with the longitude.
    #[arg(long, env = "POINTTILES_LONGITUDE_COLUMN", default_value_t = 16)]
    pub longitude_column: usize,

    /// Zero-based CSV column with the latitude.
    #[arg(long, env = "POINTTILES_LATITUDE_COLUMN", default_value_t = 15)]
    pub latitude_column: usize,

    /// HTTP bind address.
    #[arg(long, env = "POINTTILES_HOST", default_value_t = Ipv4Addr::UNSPECIFIED)]
    pub host: Ipv4Addr,

    /// HTTP bind port.
    #[arg(long, env = "POINTTILES_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Maximum concurrent HTTP connections.
    #[arg(
        long,
        env = "POINTTILES_MAX_CONCURRENT_CONNECTIONS",
        default_value_t = 4096
    )]
    pub max_concurrent_connections: usize,

    /// URL path prefix of the tile route.
    #[arg(long, env = "POINTTILES_TILE_URL_PATH", default_value = "/tiles")]
    pub tile_url_path: TileUrlPath,

    /// Tile coordinate resolution per side.
    #[arg(long, env = "POINTTILES_EXTENT", default_value_t = DEFAULT_EXTENT)]
    pub extent: u32,
}

impl Cli {
    pub fn parse_checked() -> Self {
        let cli = Self::parse();

        if let Err(err) = cli.validate() {
            clap::Error::raw(ErrorKind::ValueValidation, err).exit();
        }

        cli
    }

    fn validate(&self) -> Result<(), String> {
        if self.extent == 0 {
            return Err("--extent must be positive".into());
        }

        let columns = self.point_columns();

        if columns.species == columns.longitude
            || columns.species == columns.latitude
            || columns.longitude == columns.latitude
        {
            return Err("species, longitude and latitude columns must differ".into());
        }

        Ok(())
    }

    pub fn point_columns(&self) -> PointColumns {
        PointColumns {
            species: self.species_column,
            longitude: self.longitude_column,
            latitude: self.latitude_column,
        }
    }
}
