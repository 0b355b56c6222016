#[macro_use]
extern crate log;

mod rclib;
pub use self::{
    rclib::align_rooms, rclib::build_features, rclib::euclidean, rclib::kmeans, rclib::load_rooms,
    rclib::metrics, rclib::pairwise_spread, rclib::ArgParser, rclib::ClusterAssignment,
    rclib::ClusterEngine, rclib::ClusterError, rclib::ClusterLoss, rclib::ClusterParams,
    rclib::Coord, rclib::IOParams, rclib::KMeansParams, rclib::KMeansResult, rclib::Layout,
    rclib::LayoutParser, rclib::LoadError, rclib::LossParams, rclib::Room,
    rclib::RoomClusterParams, rclib::RoomEntry, rclib::RoomSet, rclib::RoomTableParser,
    rclib::N_FEATURES,
};
