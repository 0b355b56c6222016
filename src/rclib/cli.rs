use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Parser, Clone, Debug)]
#[command(name = "roomcluster")]
#[command(about = "Group rooms into balanced caregiver assignments")]
#[command(version)]
pub struct ArgParser {
    #[command(flatten)]
    pub io: IOParams,

    #[command(flatten)]
    pub cluster: ClusterParams,

    #[command(flatten)]
    pub loss: LossParams,
}

pub trait RoomClusterParams: std::fmt::Debug {
    fn validate(&self) -> bool;
    fn debug(&self) -> bool;
}

#[derive(clap::Args, Clone, Debug)]
pub struct IOParams {
    /// Room table with Room, Acuity and Discharge columns
    #[arg(short, long, help_heading = "I/O")]
    pub rooms: PathBuf,

    /// Floor layout json of room -> [x, y]
    #[arg(short, long, help_heading = "I/O")]
    pub layout: PathBuf,

    /// Output json (default stdout)
    #[arg(short, long, help_heading = "I/O")]
    pub out: Option<PathBuf>,

    /// Verbose logging
    #[arg(long, default_value_t = false, help_heading = "I/O")]
    pub debug: bool,
}

#[derive(clap::Args, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ClusterParams {
    /// Clustering weight of acuity relative to floor distance
    #[arg(long, default_value_t = 1.0, help_heading = "Clustering")]
    pub acuity_scale: f64,

    /// Clustering weight of discharge status relative to floor distance
    #[arg(long, default_value_t = 1.0, help_heading = "Clustering")]
    pub discharge_scale: f64,

    /// Number of caregiver groups
    #[arg(short = 'k', long = "clusters", default_value_t = 2, help_heading = "Clustering")]
    pub num_clusters: usize,

    /// Seed for centroid initialization
    #[arg(long, default_value_t = 0, help_heading = "Clustering")]
    pub seed: u64,

    /// Maximum assignment rounds per restart
    #[arg(long, default_value_t = 300, help_heading = "Clustering")]
    pub max_iter: usize,

    /// Number of restarts, the tightest partition is kept
    #[arg(long, default_value_t = 10, help_heading = "Clustering")]
    pub n_init: usize,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            acuity_scale: 1.0,
            discharge_scale: 1.0,
            num_clusters: 2,
            seed: 0,
            max_iter: 300,
            n_init: 10,
        }
    }
}

#[derive(clap::Args, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LossParams {
    /// Loss added per unit of acuity
    #[arg(long, default_value_t = 2.0, help_heading = "Scoring")]
    pub acuity_weight: f64,

    /// Loss added per room pending discharge
    #[arg(long, default_value_t = 10.0, help_heading = "Scoring")]
    pub discharge_penalty: f64,
}

impl Default for LossParams {
    fn default() -> Self {
        Self {
            acuity_weight: 2.0,
            discharge_penalty: 10.0,
        }
    }
}

impl RoomClusterParams for ArgParser {
    fn debug(&self) -> bool {
        self.io.debug
    }

    /// Validate command line arguments
    fn validate(&self) -> bool {
        let mut is_ok = true;

        is_ok &= validate_file(&self.io.rooms, "--rooms");
        is_ok &= validate_file(&self.io.layout, "--layout");

        if self.cluster.num_clusters < 1 {
            error!("--clusters must be at least 1");
            is_ok = false;
        }

        if self.cluster.max_iter < 1 {
            error!("--max-iter must be at least 1");
            is_ok = false;
        }

        if self.cluster.n_init < 1 {
            error!("--n-init must be at least 1");
            is_ok = false;
        }

        for (value, label) in [
            (self.cluster.acuity_scale, "--acuity-scale"),
            (self.cluster.discharge_scale, "--discharge-scale"),
            (self.loss.acuity_weight, "--acuity-weight"),
            (self.loss.discharge_penalty, "--discharge-penalty"),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                error!("{} must be a non-negative number", label);
                is_ok = false;
            }
        }

        if self.cluster.n_init > 100 {
            warn!("--n-init above 100 rarely improves the partition");
        }

        is_ok
    }
}

/// Helper function to validate a file's existence and type
fn validate_file(path: &Path, label: &str) -> bool {
    if !path.exists() {
        error!("{} does not exist", label);
        return false;
    }
    if !path.is_file() {
        error!("{} is not a file", label);
        return false;
    }
    true
}
