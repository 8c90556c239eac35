use super::Path;
use crate::{
    core::{
        math::{dist_squared, midpoint, Vector2},
        traits::Real,
    },
    polygon::{ring_signed_area, ring_winding_number, DiscretePolygon2d},
};

/// Closed contour in a [PolyTree] with the contours directly nested inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyNode<T = f64> {
    /// Counter clockwise for outers, clockwise for holes.
    pub contour: Path<T>,
    pub is_hole: bool,
    pub children: Vec<PolyNode<T>>,
}

impl<T> PolyNode<T>
where
    T: Real,
{
    fn count(&self) -> usize {
        1 + self.children.iter().map(PolyNode::count).sum::<usize>()
    }

    fn collect_paths(&self, result: &mut Vec<Path<T>>) {
        result.push(self.contour.clone());
        for child in self.children.iter() {
            child.collect_paths(result);
        }
    }

    fn collect_polygons(&self, result: &mut Vec<DiscretePolygon2d<T>>) {
        if self.is_hole {
            for child in self.children.iter() {
                child.collect_polygons(result);
            }
            return;
        }

        let mut polygon = DiscretePolygon2d::from_outer(self.contour.clone());
        for hole in self.children.iter() {
            polygon.holes.push(hole.contour.clone());
            for island in hole.children.iter() {
                island.collect_polygons(result);
            }
        }
        result.push(polygon);
    }
}

/// Offset result preserving outer/hole nesting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolyTree<T = f64> {
    pub roots: Vec<PolyNode<T>>,
}

/// Midpoint of the ring's longest edge, used to test nesting against larger loops.
fn nesting_test_point<T>(ring: &[Vector2<T>]) -> Option<Vector2<T>>
where
    T: Real,
{
    let n = ring.len();
    let (i, _) = (0..n)
        .map(|i| (i, dist_squared(ring[i], ring[(i + 1) % n])))
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))?;

    Some(midpoint(ring[i], ring[(i + 1) % n]))
}

impl<T> PolyTree<T>
where
    T: Real,
{
    /// Build the nesting of non crossing closed loops.
    ///
    /// Loops are placed under the smallest loop containing them. Loops with negative signed area
    /// are holes.
    pub fn from_loops(loops: Vec<Path<T>>) -> Self {
        let mut entries: Vec<(T, Path<T>)> = loops
            .into_iter()
            .map(|l| (ring_signed_area(&l), l))
            .collect();
        // largest first so every parent is placed before its children
        entries.sort_by(|a, b| {
            b.0.abs()
                .partial_cmp(&a.0.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let count = entries.len();
        let mut parents: Vec<Option<usize>> = vec![None; count];
        for i in 0..count {
            let Some(test_point) = nesting_test_point(&entries[i].1) else {
                continue;
            };

            // smallest enclosing loop is the last containing one in area order
            parents[i] = (0..i)
                .rev()
                .find(|&j| ring_winding_number(&entries[j].1, test_point) != 0);
        }

        let mut nodes: Vec<Option<PolyNode<T>>> = entries
            .into_iter()
            .map(|(area, contour)| {
                Some(PolyNode {
                    contour,
                    is_hole: area < T::zero(),
                    children: Vec::new(),
                })
            })
            .collect();

        // children come after parents, attach in reverse so every child is complete when moved
        let mut roots = Vec::new();
        for i in (0..count).rev() {
            let Some(node) = nodes[i].take() else {
                continue;
            };
            match parents[i] {
                Some(p) => {
                    if let Some(parent) = nodes[p].as_mut() {
                        parent.children.push(node);
                    }
                }
                None => roots.push(node),
            }
        }

        roots.reverse();
        for node in roots.iter_mut() {
            reverse_children(node);
        }

        PolyTree { roots }
    }

    /// Total number of nodes in the tree.
    pub fn total_count(&self) -> usize {
        self.roots.iter().map(PolyNode::count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// All contours in pre-order (each outer followed by its holes and their islands).
    pub fn to_paths(&self) -> Vec<Path<T>> {
        let mut result = Vec::with_capacity(self.total_count());
        for node in self.roots.iter() {
            node.collect_paths(&mut result);
        }

        result
    }

    /// Polygons made of each outer contour and its immediate holes, islands inside holes become
    /// polygons of their own.
    pub fn to_polygons(&self) -> Vec<DiscretePolygon2d<T>> {
        let mut result = Vec::new();
        for node in self.roots.iter() {
            node.collect_polygons(&mut result);
        }

        result
    }
}

fn reverse_children<T>(node: &mut PolyNode<T>) {
    node.children.reverse();
    for child in node.children.iter_mut() {
        reverse_children(child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Path<f64> {
        vec![
            Vector2::new(x0, y0),
            Vector2::new(x1, y0),
            Vector2::new(x1, y1),
            Vector2::new(x0, y1),
        ]
    }

    #[test]
    fn outer_with_hole_and_island() {
        let mut hole = rect(2.0, 2.0, 8.0, 8.0);
        hole.reverse();
        let loops = vec![rect(4.0, 4.0, 6.0, 6.0), hole, rect(0.0, 0.0, 10.0, 10.0)];
        let tree = PolyTree::from_loops(loops);
        assert_eq!(tree.roots.len(), 1);
        assert_eq!(tree.total_count(), 3);
        let outer = &tree.roots[0];
        assert!(!outer.is_hole);
        assert_eq!(outer.children.len(), 1);
        assert!(outer.children[0].is_hole);
        assert_eq!(outer.children[0].children.len(), 1);

        let polygons = tree.to_polygons();
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[1].holes.len(), 1);
        assert!((polygons[1].area() - 64.0).abs() < 1e-9);
        assert!((polygons[0].area() - 4.0).abs() < 1e-9);
        assert_eq!(tree.to_paths().len(), 3);
    }

    #[test]
    fn disjoint_loops_are_roots() {
        let tree = PolyTree::from_loops(vec![rect(0.0, 0.0, 1.0, 1.0), rect(5.0, 0.0, 6.0, 1.0)]);
        assert_eq!(tree.roots.len(), 2);
        assert!(tree.roots.iter().all(|n| n.children.is_empty()));
    }
}
