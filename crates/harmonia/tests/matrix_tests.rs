use harmonia::{Chart, Point, ResonanceMatrix, ResonanceSettings, SubsetMode};

fn chart(name: &str, points: &[(&str, f64)]) -> Chart {
    Chart::with_points(name, points.iter().map(|(n, p)| Point::new(*n, *p)))
}

#[test]
fn test_points_flattened_in_chart_order() {
    let a = chart("A", &[("sun", 10.0), ("moon", 20.0)]);
    let b = chart("B", &[("sun", 30.0)]);
    let matrix = ResonanceMatrix::new(&[a.clone(), b.clone()], &ResonanceSettings::default());

    assert_eq!(matrix.len(), 3);
    assert_eq!(matrix.all_resonances().count(), 3);
    assert_eq!(matrix.index_of(a.point("moon").unwrap()).unwrap(), 1);
    assert_eq!(matrix.index_of(b.point("sun").unwrap()).unwrap(), 2);
}

#[test]
fn test_cross_chart_pair_uses_half_orb() {
    let a = chart("A", &[("sun", 10.0)]);
    let b = chart("B", &[("sun", 14.0)]);
    let matrix = ResonanceMatrix::new(&[a.clone(), b.clone()], &ResonanceSettings::default());

    let batch = matrix
        .resonance_for(a.point("sun").unwrap(), b.point("sun").unwrap())
        .unwrap();
    assert_eq!(batch.orb(), 6.0);
    assert!(batch.is_synastric());

    let aspect = batch.aspect_at(1);
    assert_eq!(aspect.clearance, 4.0);
    assert!((aspect.strength - 100.0 / 3.0).abs() < 1e-9);
    assert!(batch.has_exact_harmonic(1));
}

#[test]
fn test_missing_and_self_lookups_fail() {
    let a = chart("A", &[("sun", 10.0), ("moon", 20.0)]);
    let other = chart("B", &[("sun", 10.0)]);
    let matrix = ResonanceMatrix::new(&[a.clone()], &ResonanceSettings::default());

    let sun = a.point("sun").unwrap();
    assert!(matrix.resonance_for(sun, sun).is_err());
    assert!(matrix.resonance_for(sun, other.point("sun").unwrap()).is_err());
    assert!(matrix.index_of(&Point::new("sun", 10.0)).is_err());
}

#[test]
fn test_lookup_is_symmetric() {
    let a = chart("A", &[("sun", 10.0), ("moon", 137.0), ("venus", 250.0)]);
    let matrix = ResonanceMatrix::new(&[a.clone()], &ResonanceSettings::default());
    for x in a.points() {
        for y in a.points().iter().filter(|y| !y.is_same(x)) {
            let xy = matrix.resonance_for(x, y).unwrap();
            let yx = matrix.resonance_for(y, x).unwrap();
            assert_eq!(xy.aspects(), yx.aspects());
        }
    }
}

#[test]
fn test_chart_combinations() {
    let a = chart("A", &[("sun", 0.0)]);
    let b = chart("B", &[("sun", 0.0)]);
    let c = chart("C", &[("sun", 0.0)]);

    let pair = ResonanceMatrix::new(&[a.clone(), b.clone()], &ResonanceSettings::default());
    let subsets = pair.chart_combinations(SubsetMode::Aspects);
    assert_eq!(subsets, vec![vec![a.id()], vec![b.id()], vec![a.id(), b.id()]]);

    let triple = ResonanceMatrix::new(&[a, b, c], &ResonanceSettings::default());
    let sizes: Vec<usize> = triple
        .chart_combinations(SubsetMode::Patterns)
        .iter()
        .map(Vec::len)
        .collect();
    assert_eq!(sizes, vec![1, 1, 1, 2, 2, 2, 3]);
    assert_eq!(triple.chart_combinations(SubsetMode::Aspects).len(), 6);
}

#[test]
fn test_pairs_keep_chart_order() {
    let charts: Vec<Chart> = ["A", "B", "C"].iter().map(|n| chart(n, &[("sun", 0.0)])).collect();
    let ids: Vec<_> = charts.iter().map(|c| c.id()).collect();
    let matrix = ResonanceMatrix::new(&charts, &ResonanceSettings::default());
    let pairs: Vec<Vec<_>> = matrix
        .chart_combinations(SubsetMode::Patterns)
        .into_iter()
        .filter(|s| s.len() == 2)
        .collect();
    assert_eq!(
        pairs,
        vec![vec![ids[0], ids[1]], vec![ids[0], ids[2]], vec![ids[1], ids[2]]]
    );
    let aspects = matrix.chart_combinations(SubsetMode::Aspects);
    assert_eq!(&aspects[3..], &pairs[..]);
}

#[test]
fn test_sixty_four_charts_fall_back_to_pairs() {
    let charts: Vec<Chart> = (0..64)
        .map(|i| chart(&format!("c{}", i), &[("sun", i as f64 * 5.0)]))
        .collect();
    let matrix = ResonanceMatrix::new(&charts, &ResonanceSettings::default());
    let aspects = matrix.chart_combinations(SubsetMode::Aspects);
    assert_eq!(aspects.len(), 64 + 64 * 63 / 2);
    assert_eq!(matrix.chart_combinations(SubsetMode::Patterns), aspects);
}

#[test]
fn test_empty_matrix() {
    let matrix = ResonanceMatrix::new(&[], &ResonanceSettings::default());
    assert!(matrix.is_empty());
    assert!(matrix.chart_combinations(SubsetMode::Patterns).is_empty());
    assert!(matrix.build_pattern_table().is_empty());
    assert!(matrix.build_aspect_table().is_empty());
}

#[test]
fn test_resonances_within_and_between() {
    let a = chart("A", &[("sun", 0.0), ("moon", 120.0)]);
    let b = chart("B", &[("sun", 3.0), ("moon", 200.0)]);
    let matrix = ResonanceMatrix::new(&[a.clone(), b.clone()], &ResonanceSettings::default());

    assert_eq!(matrix.resonances_within(a.id()).len(), 1);
    assert_eq!(matrix.resonances_within(b.id()).len(), 1);
    let between = matrix.resonances_between(b.id(), a.id());
    assert_eq!(between.len(), 4);
    assert!(between.iter().all(|batch| batch.is_synastric()));
}

#[test]
fn test_connected_points() {
    let a = chart("A", &[("sun", 0.0), ("moon", 120.0), ("mars", 45.0)]);
    let matrix = ResonanceMatrix::new(&[a.clone()], &ResonanceSettings::default());
    let sun = a.point("sun").unwrap();
    let connected = matrix.connected_points(sun, 3, None).unwrap();
    assert_eq!(connected.len(), 1);
    assert_eq!(connected[0].name(), "moon");
}
