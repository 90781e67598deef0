use std::collections::{BTreeMap, BTreeSet};

use crate::{Circle, Pair};

/// Compute every unordered pair of labels whose circles overlap.
///
/// Brute-force over all pairs; task sizes are single digits to low tens,
/// so O(n^2) is fine and a spatial index would be noise.
pub fn detect_overlaps(circles: &BTreeMap<String, Circle>) -> BTreeSet<Pair> {
    let list: Vec<&Circle> = circles.values().collect();
    let mut overlaps = BTreeSet::new();

    for (i, a) in list.iter().enumerate() {
        for b in &list[i + 1..] {
            if a.overlaps(b) {
                overlaps.insert(Pair::new(&a.label, &b.label));
            }
        }
    }

    overlaps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(circles: &[Circle]) -> BTreeMap<String, Circle> {
        circles
            .iter()
            .map(|c| (c.label.clone(), c.clone()))
            .collect()
    }

    #[test]
    fn test_detects_single_overlap() {
        let map = scene(&[
            Circle::new("red", 0.0, 0.0, 5.0),
            Circle::new("blue", 6.0, 0.0, 5.0),
            Circle::new("green", 20.0, 20.0, 1.0),
        ]);

        let overlaps = detect_overlaps(&map);
        assert_eq!(overlaps.len(), 1);
        assert!(overlaps.contains(&Pair::new("red", "blue")));
    }

    #[test]
    fn test_empty_scene_has_no_overlaps() {
        assert!(detect_overlaps(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn test_tangent_pair_excluded() {
        let map = scene(&[
            Circle::new("red", 0.0, 0.0, 3.0),
            Circle::new("blue", 7.0, 0.0, 4.0),
        ]);
        assert!(detect_overlaps(&map).is_empty());
    }

    #[test]
    fn test_chain_of_overlaps() {
        // red-blue and blue-green overlap, red-green does not.
        let map = scene(&[
            Circle::new("red", 100.0, 100.0, 50.0),
            Circle::new("blue", 160.0, 100.0, 50.0),
            Circle::new("green", 220.0, 100.0, 50.0),
        ]);

        let overlaps = detect_overlaps(&map);
        assert_eq!(overlaps.len(), 2);
        assert!(overlaps.contains(&Pair::new("red", "blue")));
        assert!(overlaps.contains(&Pair::new("blue", "green")));
        assert!(!overlaps.contains(&Pair::new("red", "green")));
    }
}
