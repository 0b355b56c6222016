mod cli;
pub use crate::rclib::cli::{ArgParser, ClusterParams, IOParams, LossParams, RoomClusterParams};

mod engine;
pub use crate::rclib::engine::{ClusterAssignment, ClusterEngine, ClusterLoss};

mod errors;
pub use crate::rclib::errors::{ClusterError, LoadError};

mod features;
pub use crate::rclib::features::{build_features, N_FEATURES};

mod kmeans;
pub use crate::rclib::kmeans::{kmeans, KMeansParams, KMeansResult};

mod layoutparser;
pub use crate::rclib::layoutparser::{Layout, LayoutParser};

mod loader;
pub use crate::rclib::loader::{align_rooms, load_rooms};

pub mod metrics;
pub use crate::rclib::metrics::{euclidean, pairwise_spread};

mod room;
pub use crate::rclib::room::{Coord, Room, RoomSet};

mod tableparser;
pub use crate::rclib::tableparser::{RoomEntry, RoomTableParser};
