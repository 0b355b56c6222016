//! End-to-end checks of clustering and scoring

use rand::{rngs::StdRng, Rng, SeedableRng};
use roomcluster::{ClusterAssignment, ClusterEngine, ClusterParams, LoadError, RoomSet};
use std::collections::BTreeSet;
use std::io::Write;

fn params(num_clusters: usize) -> ClusterParams {
    ClusterParams {
        num_clusters,
        ..Default::default()
    }
}

fn square_engine(num_clusters: usize) -> ClusterEngine {
    ClusterEngine::from_parts(
        vec![1.0, 1.0, 1.0, 1.0],
        vec![(0.0, 0.0), (2.0, 0.0), (0.0, 2.0), (2.0, 2.0)],
        vec![false, false, true, true],
        params(num_clusters),
    )
    .unwrap()
}

fn random_rooms(n: usize, seed: u64) -> RoomSet {
    let mut rng = StdRng::seed_from_u64(seed);
    RoomSet::new(
        (0..n).map(|_| rng.gen_range(0.0..5.0)).collect(),
        (0..n)
            .map(|_| (rng.gen_range(0.0..20.0), rng.gen_range(0.0..20.0)))
            .collect(),
        (0..n).map(|_| rng.gen_bool(0.3)).collect(),
    )
    .unwrap()
}

/// Label-free view of a partition
fn as_sets(clusters: &ClusterAssignment) -> BTreeSet<Vec<String>> {
    clusters
        .values()
        .filter(|rooms| !rooms.is_empty())
        .map(|rooms| {
            let mut members: Vec<String> = rooms
                .iter()
                .map(|r| format!("{:?}", r.coord))
                .collect();
            members.sort();
            members
        })
        .collect()
}

#[test]
fn square_scenario() {
    let mut engine = square_engine(2);
    let clusters = engine.cluster_rooms().unwrap();
    assert_eq!(clusters.len(), 2);
    assert!(clusters.values().all(|rooms| rooms.len() == 2));

    let loss = engine.calculate_cluster_loss(2.0, 10.0);
    assert_eq!(loss.len(), 2);
    for (label, rooms) in engine.clusters() {
        let n_discharge = rooms.iter().filter(|r| r.discharge).count() as f64;
        let expected = 2.0 + 4.0 + 10.0 * n_discharge;
        assert!(
            (loss[label] - expected).abs() < 1e-9,
            "cluster {} loss {} != {}",
            label,
            loss[label],
            expected
        );
    }
}

#[test]
fn same_seed_same_partition() {
    for seed in [0, 7, 42] {
        let rooms = random_rooms(30, seed);
        let m_params = ClusterParams {
            num_clusters: 4,
            seed,
            ..Default::default()
        };
        let mut a = ClusterEngine::new(rooms.clone(), m_params.clone()).unwrap();
        let mut b = ClusterEngine::new(rooms, m_params).unwrap();
        assert_eq!(
            as_sets(a.cluster_rooms().unwrap()),
            as_sets(b.cluster_rooms().unwrap())
        );
    }
}

#[test]
fn every_room_assigned_once() {
    for (n, k) in [(1, 1), (5, 2), (12, 3), (25, 6), (4, 9)] {
        let rooms = random_rooms(n, n as u64);
        let mut engine = ClusterEngine::new(rooms.clone(), params(k)).unwrap();
        let clusters = engine.cluster_rooms().unwrap();
        assert_eq!(clusters.len(), k);
        assert!(clusters.keys().all(|&label| label < k));

        let total: usize = clusters.values().map(Vec::len).sum();
        assert_eq!(total, n);

        let mut seen: Vec<String> = clusters
            .values()
            .flatten()
            .map(|r| format!("{:?}{}{}", r.coord, r.acuity, r.discharge))
            .collect();
        let mut expected: Vec<String> = (0..n)
            .map(|i| format!("{:?}{}{}", rooms.coords[i], rooms.acuity[i], rooms.discharge[i]))
            .collect();
        seen.sort();
        expected.sort();
        assert_eq!(seen, expected);
    }
}

#[test]
fn rooms_keep_input_order_within_cluster() {
    let rooms = random_rooms(20, 3);
    let mut engine = ClusterEngine::new(rooms.clone(), params(3)).unwrap();
    for members in engine.cluster_rooms().unwrap().values() {
        let positions: Vec<usize> = members
            .iter()
            .map(|r| {
                rooms
                    .coords
                    .iter()
                    .position(|c| *c == r.coord)
                    .unwrap()
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn loss_is_non_negative() {
    let mut engine = ClusterEngine::new(random_rooms(40, 11), params(5)).unwrap();
    engine.cluster_rooms().unwrap();
    for (acuity_weight, discharge_penalty) in [(0.0, 0.0), (2.0, 10.0), (0.5, 100.0)] {
        let loss = engine.calculate_cluster_loss(acuity_weight, discharge_penalty);
        assert_eq!(loss.len(), 5);
        assert!(loss.values().all(|&v| v >= 0.0));
    }
}

#[test]
fn discharge_penalty_is_monotonic() {
    let mut engine = ClusterEngine::new(random_rooms(30, 5), params(4)).unwrap();
    engine.cluster_rooms().unwrap();
    let low = engine.calculate_cluster_loss(2.0, 10.0);
    let high = engine.calculate_cluster_loss(2.0, 25.0);
    for (label, rooms) in engine.clusters() {
        if rooms.iter().any(|r| r.discharge) {
            assert!(high[label] > low[label]);
        } else {
            assert_eq!(high[label], low[label]);
        }
    }
}

#[test]
fn one_cluster_per_room() {
    let mut engine = square_engine(4);
    let clusters = engine.cluster_rooms().unwrap();
    assert_eq!(clusters.len(), 4);
    assert!(clusters.values().all(|rooms| rooms.len() == 1));

    let loss = engine.calculate_cluster_loss(2.0, 10.0);
    for (label, rooms) in engine.clusters() {
        let room = &rooms[0];
        let expected = room.acuity * 2.0 + if room.discharge { 10.0 } else { 0.0 };
        assert_eq!(loss[label], expected);
    }
}

#[test]
fn more_clusters_than_rooms() {
    let mut engine = ClusterEngine::from_parts(
        vec![1.0, 2.0, 3.0],
        vec![(0.0, 0.0), (5.0, 5.0), (10.0, 0.0)],
        vec![false, true, false],
        params(5),
    )
    .unwrap();
    let clusters = engine.cluster_rooms().unwrap();
    assert_eq!(clusters.len(), 5);
    let empty: Vec<usize> = clusters
        .iter()
        .filter(|(_, rooms)| rooms.is_empty())
        .map(|(&label, _)| label)
        .collect();
    assert!(empty.len() >= 2);

    let loss = engine.calculate_cluster_loss(2.0, 10.0);
    assert_eq!(loss.len(), 5);
    for label in empty {
        assert_eq!(loss[&label], 0.0);
    }
}

#[test]
fn from_files() {
    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("rooms.csv");
    let layout = dir.path().join("floor.json");

    let mut file = std::fs::File::create(&table).unwrap();
    writeln!(file, "Room,Acuity,Discharge").unwrap();
    writeln!(file, "101,1,False").unwrap();
    writeln!(file, "102,1,False").unwrap();
    writeln!(file, "201,1,True").unwrap();
    writeln!(file, "202,1,True").unwrap();
    std::fs::write(
        &layout,
        r#"{"101": [0, 0], "102": [2, 0], "201": [0, 2], "202": [2, 2], "301": [9, 9]}"#,
    )
    .unwrap();

    let rooms = roomcluster::load_rooms(&table, &layout).unwrap();
    assert_eq!(rooms.len(), 4);
    let mut engine = ClusterEngine::new(rooms, params(2)).unwrap();
    let clusters = engine.cluster_rooms().unwrap();
    let ids: usize = clusters
        .values()
        .flatten()
        .filter(|r| r.id.is_some())
        .count();
    assert_eq!(ids, 4);

    std::fs::write(&layout, r#"{"101": [0, 0]}"#).unwrap();
    assert!(matches!(
        roomcluster::load_rooms(&table, &layout),
        Err(LoadError::UnknownRoom(_))
    ));
}
