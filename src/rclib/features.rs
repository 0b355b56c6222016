use crate::rclib::{room::check_dimensions, ClusterError, Coord};
use ndarray::Array2;

/// Columns of a feature row
pub const N_FEATURES: usize = 4;

/// Builds the weighted feature matrix used for clustering.
/// Each row is `[x, y, acuity * acuity_scale, discharge * discharge_scale]` where discharge is 1 or 0.
///
/// The scales let severity and discharge status compete with floor distance, which otherwise
/// dominates because coordinates are much larger than acuity or a 0/1 flag.
///
/// # Parameters
/// - `acuity`: Severity score per room.
/// - `coords`: `(x, y)` floor position per room.
/// - `discharge`: Pending-discharge flag per room.
/// - `acuity_scale`: Multiplier on the acuity column.
/// - `discharge_scale`: Multiplier on the discharge column.
///
/// # Returns
/// An `N x 4` matrix with rows in input order, or an error when the lengths differ or there are no rooms.
pub fn build_features(
    acuity: &[f64],
    coords: &[Coord],
    discharge: &[bool],
    acuity_scale: f64,
    discharge_scale: f64,
) -> Result<Array2<f64>, ClusterError> {
    let n = check_dimensions(acuity, coords, discharge)?;
    if n == 0 {
        return Err(ClusterError::EmptyInput);
    }

    Ok(Array2::from_shape_fn((n, N_FEATURES), |(i, j)| match j {
        0 => coords[i].0,
        1 => coords[i].1,
        2 => acuity[i] * acuity_scale,
        _ => f64::from(u8::from(discharge[i])) * discharge_scale,
    }))
}
