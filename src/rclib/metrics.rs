use crate::rclib::Coord;
use itertools::Itertools;

/// Euclidean distance between two equal-length points.
/// Extra trailing values on the longer point are ignored.
pub fn euclidean(p1: &[f64], p2: &[f64]) -> f64 {
    squared_distance(p1, p2).sqrt()
}

pub fn squared_distance(p1: &[f64], p2: &[f64]) -> f64 {
    p1.iter().zip(p2).map(|(&a, &b)| (a - b).powi(2)).sum::<f64>()
}

/// Straight-line floor distance between two rooms
pub fn coord_distance(a: &Coord, b: &Coord) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

/// Computes the total walking spread of a group of rooms.
/// This is the sum of distances over every unordered pair, so it grows quadratically with
/// group size and reflects the worst separated pairs rather than distance to a center.
///
/// # Parameters
/// - `coords`: Floor positions of the rooms in one group.
///
/// # Returns
/// The pairwise distance sum. Groups with fewer than two rooms return 0.0.
pub fn pairwise_spread<'a, I>(coords: I) -> f64
where
    I: IntoIterator<Item = &'a Coord>,
    I::IntoIter: Clone,
{
    coords
        .into_iter()
        .tuple_combinations()
        .map(|(a, b)| coord_distance(a, b))
        .sum()
}
