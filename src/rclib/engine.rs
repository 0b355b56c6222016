use crate::rclib::{
    build_features, kmeans, metrics, ClusterError, ClusterParams, Coord, KMeansParams,
    LossParams, Room, RoomSet,
};
use indexmap::IndexMap;

/// Label -> rooms in that group, in original room order
pub type ClusterAssignment = IndexMap<usize, Vec<Room>>;
/// Label -> group loss
pub type ClusterLoss = IndexMap<usize, f64>;

/// Groups rooms into caregiver clusters and scores each group.
///
/// The engine is unbuilt until `cluster_rooms` succeeds. Each later call replaces the
/// stored assignment.
#[derive(Debug)]
pub struct ClusterEngine {
    rooms: RoomSet,
    params: ClusterParams,
    clusters: ClusterAssignment,
}

impl ClusterEngine {
    pub fn new(rooms: RoomSet, params: ClusterParams) -> Result<Self, ClusterError> {
        crate::rclib::room::check_dimensions(&rooms.acuity, &rooms.coords, &rooms.discharge)?;
        if params.num_clusters < 1 {
            return Err(ClusterError::InvalidClusterCount(params.num_clusters));
        }
        if params.max_iter < 1 {
            return Err(ClusterError::InvalidParameter {
                name: "max_iter",
                reason: "must be at least 1".to_string(),
            });
        }
        if params.n_init < 1 {
            return Err(ClusterError::InvalidParameter {
                name: "n_init",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            rooms,
            params,
            clusters: ClusterAssignment::new(),
        })
    }

    pub fn from_parts(
        acuity: Vec<f64>,
        coords: Vec<Coord>,
        discharge: Vec<bool>,
        params: ClusterParams,
    ) -> Result<Self, ClusterError> {
        Self::new(RoomSet::new(acuity, coords, discharge)?, params)
    }

    /// Cluster the rooms on their weighted features and store the assignment.
    /// Every label `0..num_clusters` is present in the result, possibly with no rooms.
    pub fn cluster_rooms(&mut self) -> Result<&ClusterAssignment, ClusterError> {
        let features = build_features(
            &self.rooms.acuity,
            &self.rooms.coords,
            &self.rooms.discharge,
            self.params.acuity_scale,
            self.params.discharge_scale,
        )?;

        let k = self.params.num_clusters;
        if k > self.rooms.len() {
            warn!(
                "{} clusters requested for {} rooms, some will be empty",
                k,
                self.rooms.len()
            );
        }

        let result = kmeans(
            &features,
            &KMeansParams {
                k,
                max_iter: self.params.max_iter,
                n_init: self.params.n_init,
                seed: self.params.seed,
            },
        )?;
        debug!(
            "clustered {} rooms into {} groups after {} iterations (inertia {:.3})",
            self.rooms.len(),
            k,
            result.iterations,
            result.inertia
        );

        let mut clusters: ClusterAssignment = (0..k).map(|label| (label, Vec::new())).collect();
        for (idx, label) in result.labels.into_iter().enumerate() {
            clusters
                .entry(label)
                .or_default()
                .push(self.rooms.room(idx));
        }
        self.clusters = clusters;

        Ok(&self.clusters)
    }

    /// Computes the loss of every cluster in the stored assignment.
    /// A cluster's loss is the summed pairwise floor distance between its rooms, plus
    /// `acuity * acuity_weight` for each room, plus `discharge_penalty` for each room pending discharge.
    ///
    /// # Parameters
    /// - `acuity_weight`: Loss per unit of acuity.
    /// - `discharge_penalty`: Loss per discharge-pending room.
    ///
    /// # Returns
    /// One entry per label. Empty when `cluster_rooms` has not run yet.
    pub fn calculate_cluster_loss(&self, acuity_weight: f64, discharge_penalty: f64) -> ClusterLoss {
        self.clusters
            .iter()
            .map(|(&label, rooms)| {
                let spread = metrics::pairwise_spread(rooms.iter().map(|r| &r.coord));
                let burden: f64 = rooms
                    .iter()
                    .map(|r| {
                        let discharge = if r.discharge { discharge_penalty } else { 0.0 };
                        r.acuity * acuity_weight + discharge
                    })
                    .sum();
                trace!("cluster {} spread {} burden {}", label, spread, burden);
                (label, spread + burden)
            })
            .collect()
    }

    pub fn loss(&self, params: &LossParams) -> ClusterLoss {
        self.calculate_cluster_loss(params.acuity_weight, params.discharge_penalty)
    }

    /// The stored assignment, empty before `cluster_rooms`
    pub fn clusters(&self) -> &ClusterAssignment {
        &self.clusters
    }

    pub fn is_built(&self) -> bool {
        !self.clusters.is_empty()
    }

    pub fn rooms(&self) -> &RoomSet {
        &self.rooms
    }

    pub fn params(&self) -> &ClusterParams {
        &self.params
    }
}
