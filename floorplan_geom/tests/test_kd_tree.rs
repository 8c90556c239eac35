mod test_utils;

use floorplan_geom::{
    core::math::Vector2,
    error::KdTreeError,
    spatial::{euclidean_distance, Axis, KdNodeData, KdTree},
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use test_utils::init_logging;

type DistanceFn = fn(&Vector2<f64>, &Vector2<f64>) -> f64;

fn random_points(rng: &mut StdRng, count: usize) -> Vec<Vector2<f64>> {
    (0..count)
        .map(|_| Vector2::new(rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0)))
        .collect()
}

fn build(points: Vec<Vector2<f64>>) -> KdTree<Vector2<f64>, DistanceFn> {
    KdTree::new(points, euclidean_distance as DistanceFn, vec![Axis::X, Axis::Y]).unwrap()
}

fn brute_force_sorted(points: &[Vector2<f64>], query: &Vector2<f64>) -> Vec<f64> {
    let mut dists: Vec<f64> = points.iter().map(|p| euclidean_distance(p, query)).collect();
    dists.sort_by(|a, b| a.total_cmp(b));
    dists
}

#[test]
fn nearest_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let points = random_points(&mut rng, 500);
    let tree = build(points.clone());
    assert_eq!(tree.len(), 500);
    assert!(tree.balance_factor() < 2.0);

    for query in random_points(&mut rng, 1000) {
        let (nearest, dist) = tree.nearest(&query).unwrap();
        let expected = brute_force_sorted(&points, &query)[0];
        assert_eq!(dist, expected, "query {:?} found {:?}", query, nearest);
        assert_eq!(euclidean_distance(nearest, &query), dist);
    }
}

#[test]
fn nearest_k_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(42);
    let points = random_points(&mut rng, 500);
    let tree = build(points.clone());

    for query in random_points(&mut rng, 100) {
        let expected = brute_force_sorted(&points, &query);
        let found: Vec<f64> = tree.nearest_k(&query, 8, None).iter().map(|r| r.1).collect();
        assert_eq!(found, expected[..8].to_vec());

        let max_distance = expected[3] + 1e-9;
        let found = tree.nearest_k(&query, 8, Some(max_distance));
        assert_eq!(found.len(), 4);
    }
}

#[test]
fn insert_and_remove_track_brute_force() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut points = random_points(&mut rng, 200);
    let mut tree = build(points.clone());

    for _ in 0..150 {
        let i = rng.gen_range(0..points.len());
        let removed = points.swap_remove(i);
        assert!(tree.remove(&removed));
        assert!(!tree.remove(&Vector2::new(-1.0, -1.0)));
    }

    for p in random_points(&mut rng, 100) {
        tree.insert(p);
        points.push(p);
    }

    assert_eq!(tree.len(), points.len());
    assert_eq!(tree.iter().count(), points.len());
    for query in random_points(&mut rng, 300) {
        let (_, dist) = tree.nearest(&query).unwrap();
        assert_eq!(dist, brute_force_sorted(&points, &query)[0]);
    }
}

#[test]
fn sorted_inserts_stay_shallow() {
    let mut tree = build(Vec::new());
    let count = 50_000;
    for i in 0..count {
        tree.insert(Vector2::new(i as f64, i as f64));
    }

    assert_eq!(tree.len(), count);
    // log(50_000) / log(1 / 0.7) is about 30.3
    assert!(tree.height() <= 34, "height {}", tree.height());

    let last = (count - 1) as f64;
    let (nearest, _) = tree.nearest(&Vector2::new(1e9, 1e9)).unwrap();
    assert_eq!(*nearest, Vector2::new(last, last));
    let (nearest, dist) = tree.nearest(&Vector2::new(-1.0, 0.0)).unwrap();
    assert_eq!(*nearest, Vector2::new(0.0, 0.0));
    assert_eq!(dist, 1.0);

    let data = tree.to_data();
    let loaded =
        KdTree::from_data(data, euclidean_distance as DistanceFn, vec![Axis::X, Axis::Y]).unwrap();
    assert_eq!(loaded.height(), tree.height());
}

#[test]
fn duplicate_points() {
    let p: Vector2<f64> = Vector2::new(1.0, 1.0);
    let mut tree = build(vec![p, p, p, Vector2::new(2.0, 2.0)]);
    assert_eq!(tree.nearest_k(&p, 3, None).len(), 3);
    assert!(tree.remove(&p));
    assert!(tree.remove(&p));
    assert!(tree.remove(&p));
    assert!(!tree.remove(&p));
    assert_eq!(tree.len(), 1);
    assert_eq!(*tree.nearest(&p).unwrap().0, Vector2::new(2.0, 2.0));
}

#[test]
fn empty_tree() {
    let mut tree = build(Vec::new());
    assert!(tree.is_empty());
    assert_eq!(tree.height(), 0);
    assert!(tree.nearest(&Vector2::new(0.0, 0.0)).is_none());
    assert!(tree.to_data().is_none());
    tree.insert(Vector2::new(3.0, 4.0));
    assert_eq!(tree.nearest(&Vector2::new(0.0, 0.0)).unwrap().1, 5.0);
}

#[test]
fn three_dimensional_arrays() {
    let mut rng = StdRng::seed_from_u64(3);
    let points: Vec<[f64; 3]> = (0..300)
        .map(|_| [rng.gen(), rng.gen(), rng.gen()])
        .collect();
    let dist = |a: &[f64; 3], b: &[f64; 3]| {
        a.iter()
            .zip(b)
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f64>()
            .sqrt()
    };
    let tree = KdTree::new(points.clone(), dist, vec![0, 1, 2]).unwrap();
    for _ in 0..200 {
        let q: [f64; 3] = [rng.gen(), rng.gen(), rng.gen()];
        let expected = points
            .iter()
            .map(|p| dist(p, &q))
            .fold(f64::INFINITY, f64::min);
        assert_eq!(tree.nearest(&q).unwrap().1, expected);
    }
}

#[test]
fn dump_load_round_trip() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(11);
    let points = random_points(&mut rng, 64);
    let mut tree = build(points);
    let fifth = tree.iter().nth(5).copied().unwrap();
    assert!(tree.remove(&fifth));
    tree.insert(Vector2::new(500.0, 500.0));

    let data = tree.to_data();
    let loaded = KdTree::from_data(
        data.clone(),
        euclidean_distance as DistanceFn,
        vec![Axis::X, Axis::Y],
    )
    .unwrap();
    assert_eq!(loaded.len(), tree.len());
    assert_eq!(loaded.height(), tree.height());
    assert_eq!(loaded.to_data(), data);
    assert!(loaded.iter().eq(tree.iter()));

    for query in random_points(&mut rng, 50) {
        assert_eq!(loaded.nearest(&query), tree.nearest(&query));
    }
}

#[test]
fn load_rejects_bad_dimensions() {
    init_logging();
    let leaf = KdNodeData {
        obj: Vector2::new(1.0, 1.0),
        left: None,
        right: None,
        dimension: 2,
    };
    let data = KdNodeData {
        obj: Vector2::new(0.0, 0.0),
        left: None,
        right: Some(Box::new(leaf)),
        dimension: 0,
    };
    let err = KdTree::from_data(Some(data), euclidean_distance, vec![Axis::X, Axis::Y]).unwrap_err();
    assert!(matches!(
        err,
        KdTreeError::InvalidDimension {
            index: 2,
            dimension_count: 2
        }
    ));

    let err = KdTree::<Vector2<f64>, _>::new(Vec::new(), euclidean_distance, Vec::new()).unwrap_err();
    assert!(matches!(err, KdTreeError::EmptyDimensions));
}

#[cfg(feature = "serde")]
#[test]
fn serde_round_trip() {
    let tree = build(vec![
        Vector2::new(0.0, 0.0),
        Vector2::new(1.0, 5.0),
        Vector2::new(4.0, 2.0),
    ]);
    let json = serde_json::to_string(&tree.to_data()).unwrap();
    let data: Option<KdNodeData<Vector2<f64>>> = serde_json::from_str(&json).unwrap();
    let loaded = KdTree::from_data(data, euclidean_distance as DistanceFn, vec![Axis::X, Axis::Y]).unwrap();
    assert!(loaded.iter().eq(tree.iter()));
}
