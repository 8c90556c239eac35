use floorplan_geom::{
    core::{math::Vector2, traits::FuzzyEq},
    offset::clean_polygon,
    polygon::{ring_extents, ring_path_length, ring_signed_area},
    AABB,
};

/// Fuzzy compare AABB values
pub fn aabb_fuzzy_eq_eps(a: &AABB<f64>, b: &AABB<f64>, eps: f64) -> bool {
    a.min_x.fuzzy_eq_eps(b.min_x, eps)
        && a.min_y.fuzzy_eq_eps(b.min_y, eps)
        && a.max_x.fuzzy_eq_eps(b.max_x, eps)
        && a.max_y.fuzzy_eq_eps(b.max_y, eps)
}

/// Holds a set of properties of a closed ring for comparison in tests
#[derive(Debug, Copy, Clone)]
pub struct RingProperties {
    pub vertex_count: usize,
    pub area: f64,
    pub path_length: f64,
    pub extents: AABB<f64>,
}

impl RingProperties {
    // property comparer epsilon
    pub const PROP_CMP_EPS: f64 = 1e-4;
    // distance used to drop collinear vertexes for consistent vertex counts
    pub const CLEAN_EPS: f64 = 1e-6;

    pub fn new(
        vertex_count: usize,
        area: f64,
        path_length: f64,
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    ) -> Self {
        Self {
            vertex_count,
            area,
            path_length,
            extents: AABB::new(min_x, min_y, max_x, max_y),
        }
    }

    pub fn from_ring(ring: &[Vector2<f64>]) -> Self {
        let cleaned = clean_polygon(ring, Self::CLEAN_EPS);
        let extents = ring_extents(ring).unwrap();
        Self {
            vertex_count: cleaned.len(),
            area: ring_signed_area(ring),
            path_length: ring_path_length(ring),
            extents: extents.to_aabb(),
        }
    }

    pub fn fuzzy_eq_eps(&self, other: &Self, eps: f64) -> bool {
        self.vertex_count == other.vertex_count
            && self.area.fuzzy_eq_eps(other.area, eps)
            && self.path_length.fuzzy_eq_eps(other.path_length, eps)
            && aabb_fuzzy_eq_eps(&self.extents, &other.extents, eps)
    }
}

pub fn create_property_set(rings: &[Vec<Vector2<f64>>]) -> Vec<RingProperties> {
    rings.iter().map(|r| RingProperties::from_ring(r)).collect()
}

/// Returns `true` if every expected property has exactly one matching result property.
pub fn property_sets_match(result_set: &[RingProperties], expected_set: &[RingProperties]) -> bool {
    if result_set.len() != expected_set.len() {
        return false;
    }

    let mut matched = vec![false; result_set.len()];
    for expected in expected_set {
        let found = result_set.iter().enumerate().position(|(i, r)| {
            !matched[i] && r.fuzzy_eq_eps(expected, RingProperties::PROP_CMP_EPS)
        });
        match found {
            Some(i) => matched[i] = true,
            None => return false,
        }
    }

    true
}
