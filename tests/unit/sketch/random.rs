use super::*;

#[test]
fn same_seed_same_sequence() {
    let mut a = Random::seeded(42);
    let mut b = Random::seeded(42);
    for _ in 0..16 {
        assert_eq!(a.range(0.0, 100.0), b.range(0.0, 100.0));
    }
}

#[test]
fn range_stays_in_bounds() {
    let mut r = Random::seeded(7);
    for _ in 0..1000 {
        let v = r.range(-2.0, 3.0);
        assert!((-2.0..3.0).contains(&v));
        let n = r.range_u32(5, 9);
        assert!((5..9).contains(&n));
    }
}

#[test]
fn empty_ranges_return_lower_bound() {
    let mut r = Random::seeded(1);
    assert_eq!(r.range(4.0, 4.0), 4.0);
    assert_eq!(r.range(4.0, 1.0), 4.0);
    assert_eq!(r.range_u32(3, 3), 3);
}

#[test]
fn pick_handles_empty_and_non_empty() {
    let mut r = Random::seeded(3);
    let empty: [u8; 0] = [];
    assert_eq!(r.pick(&empty), None);
    let items = [1, 2, 3];
    assert!(items.contains(r.pick(&items).unwrap()));
}

#[test]
fn chance_extremes_are_deterministic() {
    let mut r = Random::seeded(9);
    assert!(!r.chance(0.0));
    assert!(r.chance(1.0));
    assert!(r.chance(5.0));
}
