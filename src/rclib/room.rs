use crate::rclib::ClusterError;
use serde::{Deserialize, Serialize};

pub type Coord = (f64, f64);

/// One room as reported back inside a cluster. Values are the original, unscaled inputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Room {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    pub acuity: f64,
    pub coord: Coord,
    pub discharge: bool,
}

/// Three aligned per-room sequences. Index `i` is the same room in each.
#[derive(Clone, Debug, Default)]
pub struct RoomSet {
    pub acuity: Vec<f64>,
    pub coords: Vec<Coord>,
    pub discharge: Vec<bool>,
    pub ids: Option<Vec<String>>,
}

/// Errors with DimensionMismatch unless all three lengths agree
pub fn check_dimensions(
    acuity: &[f64],
    coords: &[Coord],
    discharge: &[bool],
) -> Result<usize, ClusterError> {
    let n = acuity.len();
    if coords.len() != n || discharge.len() != n {
        return Err(ClusterError::DimensionMismatch {
            acuity: n,
            coords: coords.len(),
            discharge: discharge.len(),
        });
    }
    Ok(n)
}

impl RoomSet {
    pub fn new(
        acuity: Vec<f64>,
        coords: Vec<Coord>,
        discharge: Vec<bool>,
    ) -> Result<Self, ClusterError> {
        check_dimensions(&acuity, &coords, &discharge)?;
        Ok(Self {
            acuity,
            coords,
            discharge,
            ids: None,
        })
    }

    /// Attach room identifiers, which must line up with the other sequences
    pub fn with_ids(mut self, ids: Vec<String>) -> Result<Self, ClusterError> {
        if ids.len() != self.len() {
            return Err(ClusterError::InvalidParameter {
                name: "ids",
                reason: format!("{} ids for {} rooms", ids.len(), self.len()),
            });
        }
        self.ids = Some(ids);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.acuity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.acuity.is_empty()
    }

    /// Materialize room `idx` with its original values
    pub fn room(&self, idx: usize) -> Room {
        Room {
            id: self.ids.as_ref().map(|ids| ids[idx].clone()),
            acuity: self.acuity[idx],
            coord: self.coords[idx],
            discharge: self.discharge[idx],
        }
    }
}
