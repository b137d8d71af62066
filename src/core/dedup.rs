use std::collections::HashSet;

use crate::models::{Coordinate, RawElement};

/// Decimal places kept when comparing locations (~1.1 m at the equator)
pub const DEDUP_PRECISION: i32 = 5;

/// A coordinate snapped to [`DEDUP_PRECISION`] decimal places
///
/// Stored as scaled integers so it can be hashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DedupKey {
    lat: i64,
    lon: i64,
}

impl DedupKey {
    pub fn from_coordinate(coord: Coordinate) -> Self {
        let scale = 10f64.powi(DEDUP_PRECISION);
        Self {
            lat: (coord.lat * scale).round() as i64,
            lon: (coord.lon * scale).round() as i64,
        }
    }
}

/// An element whose position has been resolved
#[derive(Debug, Clone)]
pub struct LocatedElement {
    pub coordinate: Coordinate,
    pub element: RawElement,
}

/// Drop elements without a usable position and collapse duplicates
///
/// The first element seen for a given [`DedupKey`] wins, so the result depends
/// on the order the upstream service returned elements in.
pub fn dedup_elements(elements: Vec<RawElement>) -> Vec<LocatedElement> {
    let mut seen = HashSet::with_capacity(elements.len());
    let mut located = Vec::with_capacity(elements.len());

    for element in elements {
        let Some(coordinate) = element.coordinate() else {
            tracing::debug!(
                "Skipping element {:?}/{:?} without coordinates",
                element.element_type,
                element.id
            );
            continue;
        };

        if !seen.insert(DedupKey::from_coordinate(coordinate)) {
            tracing::debug!(
                "Skipping duplicate element at ({}, {})",
                coordinate.lat,
                coordinate.lon
            );
            continue;
        }

        located.push(LocatedElement { coordinate, element });
    }

    located
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ElementCenter;

    fn node(lat: f64, lon: f64, name: &str) -> RawElement {
        let mut element = RawElement {
            element_type: Some("node".to_string()),
            lat: Some(lat),
            lon: Some(lon),
            ..Default::default()
        };
        element.tags.insert("name".to_string(), name.to_string());
        element
    }

    #[test]
    fn test_key_rounds_to_five_places() {
        let a = DedupKey::from_coordinate(Coordinate::new(40.000001, -74.000004));
        let b = DedupKey::from_coordinate(Coordinate::new(40.000004, -73.999996));
        assert_eq!(a, b);

        let c = DedupKey::from_coordinate(Coordinate::new(40.00001, -74.0));
        assert_ne!(a, c);
    }

    #[test]
    fn test_first_seen_wins() {
        let elements = vec![
            node(40.001, -74.001, "First"),
            node(40.0010001, -74.0010001, "Second"),
        ];

        let located = dedup_elements(elements);
        assert_eq!(located.len(), 1);
        assert_eq!(located[0].element.name(), Some("First"));
    }

    #[test]
    fn test_node_and_way_center_collapse() {
        let way = RawElement {
            element_type: Some("way".to_string()),
            center: Some(ElementCenter { lat: Some(40.001), lon: Some(-74.001) }),
            ..Default::default()
        };

        let located = dedup_elements(vec![node(40.001, -74.001, "Node"), way]);
        assert_eq!(located.len(), 1);
    }

    #[test]
    fn test_unresolvable_elements_dropped() {
        let located = dedup_elements(vec![RawElement::default(), node(1.0, 2.0, "Ok")]);
        assert_eq!(located.len(), 1);
        assert_eq!(located[0].coordinate, Coordinate::new(1.0, 2.0));
    }

    #[test]
    fn test_order_preserved() {
        let located = dedup_elements(vec![
            node(3.0, 3.0, "c"),
            node(1.0, 1.0, "a"),
            node(2.0, 2.0, "b"),
        ]);
        let names: Vec<_> = located.iter().filter_map(|l| l.element.name()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
