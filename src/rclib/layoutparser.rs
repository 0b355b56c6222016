use crate::rclib::{Coord, LoadError};
use indexmap::IndexMap;
use serde::Deserialize;
use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

/// Room id -> floor coordinate, in file order
pub type Layout = IndexMap<String, Coord>;

// Coordinates may be written as [x, y] or {"x": .., "y": ..}
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCoord {
    Pair(f64, f64),
    Point { x: f64, y: f64 },
}

impl From<RawCoord> for Coord {
    fn from(raw: RawCoord) -> Self {
        match raw {
            RawCoord::Pair(x, y) | RawCoord::Point { x, y } => (x, y),
        }
    }
}

pub struct LayoutParser {
    file: PathBuf,
}

impl LayoutParser {
    pub fn new(path: &Path) -> Self {
        Self {
            file: path.to_path_buf(),
        }
    }

    pub fn parse(&self) -> Result<Layout, LoadError> {
        let file = File::open(&self.file).map_err(|source| LoadError::Io {
            path: self.file.clone(),
            source,
        })?;
        let layout = self.parse_reader(BufReader::new(file))?;
        debug!("loaded {} room locations from {:?}", layout.len(), self.file);
        Ok(layout)
    }

    fn parse_reader<R: Read>(&self, reader: R) -> Result<Layout, LoadError> {
        let raw: IndexMap<String, RawCoord> =
            serde_json::from_reader(reader).map_err(|source| LoadError::Json {
                path: self.file.clone(),
                source,
            })?;
        Ok(raw.into_iter().map(|(room, c)| (room, c.into())).collect())
    }
}
