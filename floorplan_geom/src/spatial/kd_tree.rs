use std::{cmp::Ordering, collections::BinaryHeap, fmt::Debug};

use crate::{core::math::Vector2, error::KdTreeError};

/// Point that can be stored in a [KdTree].
///
/// `Dim` names one coordinate axis, the tree rotates through a list of them when splitting.
pub trait KdPoint: Clone + PartialEq {
    type Dim: Copy + Debug + PartialEq;

    /// Coordinate value along `dim`.
    fn coord(&self, dim: Self::Dim) -> f64;

    /// Copy of the point with the coordinate along `dim` replaced by `value`.
    fn with_coord(&self, dim: Self::Dim, value: f64) -> Self;
}

/// Coordinate axis of a [Vector2].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum Axis {
    X,
    Y,
}

impl KdPoint for Vector2<f64> {
    type Dim = Axis;

    #[inline]
    fn coord(&self, dim: Axis) -> f64 {
        match dim {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    #[inline]
    fn with_coord(&self, dim: Axis, value: f64) -> Self {
        match dim {
            Axis::X => Vector2::new(value, self.y),
            Axis::Y => Vector2::new(self.x, value),
        }
    }
}

/// Fixed size coordinate arrays, dimensions are array indexes.
///
/// # Panics
///
/// Accessing a dimension `>= N` panics.
impl<const N: usize> KdPoint for [f64; N] {
    type Dim = usize;

    #[inline]
    fn coord(&self, dim: usize) -> f64 {
        self[dim]
    }

    #[inline]
    fn with_coord(&self, dim: usize, value: f64) -> Self {
        let mut result = *self;
        result[dim] = value;
        result
    }
}

/// Euclidean distance between two [Vector2] points, a common distance function for a
/// [KdTree] of 2D points.
pub fn euclidean_distance(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    (*a - *b).length()
}

/// Dumped form of a tree node, see [KdTree::to_data] and [KdTree::from_data].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct KdNodeData<P> {
    pub obj: P,
    pub left: Option<Box<KdNodeData<P>>>,
    pub right: Option<Box<KdNodeData<P>>>,
    /// Index into the tree's dimension list.
    pub dimension: usize,
}

#[derive(Debug, Clone)]
struct KdNode<P> {
    obj: P,
    left: Option<usize>,
    right: Option<usize>,
    parent: Option<usize>,
    dimension: usize,
}

/// Weight balance a subtree may reach before an insert rebuilds it.
const REBUILD_ALPHA: f64 = 0.7;

/// Nearest query work item.
#[derive(Debug, Copy, Clone)]
enum Step {
    /// Walk down the near side starting at the node.
    Descend(usize),
    /// Offer the node and queue its far side when it can still hold a closer point.
    Visit(usize),
}

/// K-dimensional tree for nearest neighbor queries with a caller supplied distance function.
///
/// Nodes split on their dimension with the left subtree strictly less than the node and the right
/// subtree greater or equal. Nodes live in an arena indexed by position, removed slots are reused
/// by later inserts.
///
/// Inserts keep the tree weight balanced by rebuilding the smallest unbalanced subtree above a
/// leaf that ends up too deep, so the depth stays logarithmic under sorted inserts. All walks
/// use explicit stacks.
///
/// The distance function must be a metric (or a monotonic function of one, e.g. squared
/// euclidean distance) for the pruning of nearest queries to be correct.
///
/// # Examples
///
/// ```
/// # use floorplan_geom::core::math::Vector2;
/// # use floorplan_geom::spatial::*;
/// let points: Vec<Vector2<f64>> = vec![
///     Vector2::new(0.0, 0.0),
///     Vector2::new(5.0, 5.0),
///     Vector2::new(10.0, 0.0),
/// ];
/// let tree = KdTree::new(points, euclidean_distance, vec![Axis::X, Axis::Y]).unwrap();
/// let (nearest, dist) = tree.nearest(&Vector2::new(9.0, 1.0)).unwrap();
/// assert_eq!(*nearest, Vector2::new(10.0, 0.0));
/// assert!((dist - 2f64.sqrt()).abs() < 1e-12);
/// ```
#[derive(Clone)]
pub struct KdTree<P, F>
where
    P: KdPoint,
{
    nodes: Vec<KdNode<P>>,
    free_slots: Vec<usize>,
    root: Option<usize>,
    len: usize,
    distance_fn: F,
    dimensions: Vec<P::Dim>,
}

impl<P, F> Debug for KdTree<P, F>
where
    P: KdPoint + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KdTree")
            .field("len", &self.len)
            .field("dimensions", &self.dimensions)
            .field("root", &self.root.map(|r| &self.nodes[r].obj))
            .finish()
    }
}

/// Nearest query candidate ordered by distance, `node` is `None` for the max distance sentinels.
#[derive(Debug, Copy, Clone)]
struct Candidate {
    distance: f64,
    node: Option<usize>,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.distance.total_cmp(&other.distance) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance.total_cmp(&other.distance)
    }
}

/// Max heap holding at most `capacity` closest candidates.
struct BoundedHeap {
    heap: BinaryHeap<Candidate>,
    capacity: usize,
}

impl BoundedHeap {
    fn new(capacity: usize, max_distance: Option<f64>) -> Self {
        let mut heap = BinaryHeap::with_capacity(capacity + 1);
        if let Some(distance) = max_distance {
            heap.extend((0..capacity).map(|_| Candidate {
                distance,
                node: None,
            }));
        }

        BoundedHeap { heap, capacity }
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    #[inline]
    fn worst(&self) -> f64 {
        self.heap.peek().map_or(f64::INFINITY, |c| c.distance)
    }

    fn offer(&mut self, distance: f64, node: usize) {
        if !self.is_full() {
            self.heap.push(Candidate {
                distance,
                node: Some(node),
            });
        } else if distance < self.worst() {
            self.heap.pop();
            self.heap.push(Candidate {
                distance,
                node: Some(node),
            });
        }
    }
}

impl<P, F> KdTree<P, F>
where
    P: KdPoint,
    F: Fn(&P, &P) -> f64,
{
    /// Build a balanced tree from `points`, splitting on `dimensions` in rotation starting from
    /// the first at the root.
    pub fn new(points: Vec<P>, distance_fn: F, dimensions: Vec<P::Dim>) -> Result<Self, KdTreeError> {
        if dimensions.is_empty() {
            return Err(KdTreeError::EmptyDimensions);
        }

        let mut tree = KdTree {
            nodes: Vec::with_capacity(points.len()),
            free_slots: Vec::new(),
            root: None,
            len: points.len(),
            distance_fn,
            dimensions,
        };
        tree.build_subtree(points, 0, None);

        Ok(tree)
    }

    /// Rebuild a tree from its dumped form (`None` for an empty tree).
    ///
    /// Node placement is taken as given, only dimension indexes are validated.
    pub fn from_data(
        data: Option<KdNodeData<P>>,
        distance_fn: F,
        dimensions: Vec<P::Dim>,
    ) -> Result<Self, KdTreeError> {
        if dimensions.is_empty() {
            return Err(KdTreeError::EmptyDimensions);
        }

        let mut tree = KdTree {
            nodes: Vec::new(),
            free_slots: Vec::new(),
            root: None,
            len: 0,
            distance_fn,
            dimensions,
        };

        if let Some(data) = data {
            if let Err(err) = tree.load_nodes(data) {
                log::debug!("rejected kd tree data: {err}");
                return Err(err);
            }
        }

        tree.len = tree.nodes.len();
        Ok(tree)
    }

    fn load_nodes(&mut self, data: KdNodeData<P>) -> Result<(), KdTreeError> {
        let mut work: Vec<(KdNodeData<P>, Option<(usize, bool)>)> = vec![(data, None)];
        while let Some((data, parent)) = work.pop() {
            if data.dimension >= self.dimensions.len() {
                return Err(KdTreeError::InvalidDimension {
                    index: data.dimension,
                    dimension_count: self.dimensions.len(),
                });
            }

            let KdNodeData {
                obj,
                left,
                right,
                dimension,
            } = data;
            let index = self.alloc(KdNode {
                obj,
                left: None,
                right: None,
                parent: parent.map(|(p, _)| p),
                dimension,
            });
            self.attach(index, parent);

            if let Some(right) = right {
                work.push((*right, Some((index, false))));
            }
            if let Some(left) = left {
                work.push((*left, Some((index, true))));
            }
        }

        Ok(())
    }

    /// Link `index` below `parent` (`true` for the left side) or make it the root.
    fn attach(&mut self, index: usize, parent: Option<(usize, bool)>) {
        match parent {
            None => self.root = Some(index),
            Some((p, true)) => self.nodes[p].left = Some(index),
            Some((p, false)) => self.nodes[p].right = Some(index),
        }
    }

    fn alloc(&mut self, node: KdNode<P>) -> usize {
        match self.free_slots.pop() {
            Some(index) => {
                self.nodes[index] = node;
                index
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Build a balanced subtree from `points` and link it below `parent`, the subtree root splits
    /// on dimension `depth % dimensions.len()`.
    fn build_subtree(&mut self, points: Vec<P>, depth: usize, parent: Option<(usize, bool)>) {
        let mut work = vec![(points, depth, parent)];
        while let Some((mut points, depth, parent)) = work.pop() {
            if points.is_empty() {
                continue;
            }

            let dimension = depth % self.dimensions.len();
            let dim = self.dimensions[dimension];
            points.sort_by(|a, b| a.coord(dim).total_cmp(&b.coord(dim)));

            // equal keys must end up on the right
            let mut median = points.len() / 2;
            while median > 0 && points[median - 1].coord(dim) == points[median].coord(dim) {
                median -= 1;
            }

            let right_points = points.split_off(median + 1);
            let Some(obj) = points.pop() else {
                continue;
            };
            let index = self.alloc(KdNode {
                obj,
                left: None,
                right: None,
                parent: parent.map(|(p, _)| p),
                dimension,
            });
            self.attach(index, parent);

            work.push((right_points, depth + 1, Some((index, false))));
            work.push((points, depth + 1, Some((index, true))));
        }
    }

    fn subtree_size(&self, index: Option<usize>) -> usize {
        let mut count = 0;
        let mut stack: Vec<usize> = index.into_iter().collect();
        while let Some(i) = stack.pop() {
            count += 1;
            stack.extend(self.nodes[i].left);
            stack.extend(self.nodes[i].right);
        }

        count
    }

    /// Replace the subtree at `index` with a balanced one holding the same points.
    fn rebuild(&mut self, index: usize) {
        let node = &self.nodes[index];
        let dimension = node.dimension;
        let parent = node.parent.map(|p| (p, self.nodes[p].left == Some(index)));

        let mut points = Vec::new();
        let mut stack = vec![index];
        while let Some(i) = stack.pop() {
            let node = &self.nodes[i];
            stack.extend(node.left);
            stack.extend(node.right);
            points.push(node.obj.clone());
            self.free_slots.push(i);
        }

        self.build_subtree(points, dimension, parent);
    }

    /// Rebuild the lowest ancestor of the leaf at `index` whose child on the path holds more than
    /// [REBUILD_ALPHA] of its points.
    fn rebalance_from(&mut self, index: usize) {
        let mut child = index;
        let mut child_size = 1;
        while let Some(parent) = self.nodes[child].parent {
            let node = &self.nodes[parent];
            let sibling = if node.left == Some(child) {
                node.right
            } else {
                node.left
            };
            let size = child_size + 1 + self.subtree_size(sibling);
            if child_size as f64 > REBUILD_ALPHA * size as f64 {
                self.rebuild(parent);
                return;
            }

            child = parent;
            child_size = size;
        }
    }

    /// Number of points in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Split dimensions the tree rotates through.
    pub fn dimensions(&self) -> &[P::Dim] {
        &self.dimensions
    }

    /// Insert `point` as a new leaf, rebuilding the subtree above it if the leaf is too deep.
    pub fn insert(&mut self, point: P) {
        let Some(mut current) = self.root else {
            let index = self.alloc(KdNode {
                obj: point,
                left: None,
                right: None,
                parent: None,
                dimension: 0,
            });
            self.root = Some(index);
            self.len += 1;
            return;
        };

        let mut depth = 1;
        loop {
            let node = &self.nodes[current];
            let dim = self.dimensions[node.dimension];
            let go_left = point.coord(dim) < node.obj.coord(dim);
            let next = if go_left { node.left } else { node.right };
            if let Some(next) = next {
                current = next;
                depth += 1;
                continue;
            }

            let dimension = (node.dimension + 1) % self.dimensions.len();
            let index = self.alloc(KdNode {
                obj: point,
                left: None,
                right: None,
                parent: Some(current),
                dimension,
            });
            self.attach(index, Some((current, go_left)));
            self.len += 1;

            let max_depth = (self.len as f64).ln() / (1.0 / REBUILD_ALPHA).ln();
            if depth as f64 > max_depth {
                self.rebalance_from(index);
            }
            return;
        }
    }

    fn find_node(&self, point: &P) -> Option<usize> {
        let mut current = self.root;
        while let Some(index) = current {
            let node = &self.nodes[index];
            if node.obj == *point {
                return Some(index);
            }

            let dim = self.dimensions[node.dimension];
            current = if point.coord(dim) < node.obj.coord(dim) {
                node.left
            } else {
                node.right
            };
        }

        None
    }

    /// Node with the smallest coordinate along `dimension` in the subtree at `index`.
    fn find_min(&self, index: usize, dimension: usize) -> usize {
        let dim = self.dimensions[dimension];
        let mut best = index;
        let mut stack = vec![index];
        while let Some(i) = stack.pop() {
            let node = &self.nodes[i];
            if node.obj.coord(dim) < self.nodes[best].obj.coord(dim) {
                best = i;
            }

            // right side of a node splitting on `dimension` cannot hold a smaller value
            stack.extend(node.left);
            if node.dimension != dimension {
                stack.extend(node.right);
            }
        }

        best
    }

    fn remove_node(&mut self, mut index: usize) {
        // (node, replacement value, move left subtree to the right), applied deepest first
        let mut fixups = Vec::new();
        loop {
            let node = &self.nodes[index];
            let (left, right, parent, dimension) =
                (node.left, node.right, node.parent, node.dimension);

            let Some(subtree) = right.or(left) else {
                if let Some(p) = parent {
                    let is_left = self.nodes[p].left == Some(index);
                    if is_left {
                        self.nodes[p].left = None;
                    } else {
                        self.nodes[p].right = None;
                    }
                } else {
                    self.root = None;
                }
                self.free_slots.push(index);
                break;
            };

            let replacement = self.find_min(subtree, dimension);
            fixups.push((index, self.nodes[replacement].obj.clone(), right.is_none()));
            index = replacement;
        }

        for (index, obj, move_left) in fixups.into_iter().rev() {
            let node = &mut self.nodes[index];
            node.obj = obj;
            if move_left {
                // replacement is the minimum of the left subtree, everything left is now >= it
                node.right = node.left.take();
            }
        }
    }

    /// Remove one point equal to `point`, returns `false` if it is not in the tree.
    pub fn remove(&mut self, point: &P) -> bool {
        let Some(index) = self.find_node(point) else {
            return false;
        };

        self.remove_node(index);
        self.len -= 1;
        true
    }

    /// Closest point to `point` and its distance, `None` if the tree is empty.
    pub fn nearest(&self, point: &P) -> Option<(&P, f64)> {
        self.nearest_k(point, 1, None).into_iter().next()
    }

    /// Up to `count` closest points sorted by ascending distance. When `max_distance` is given
    /// only points closer than it are returned.
    pub fn nearest_k(&self, point: &P, count: usize, max_distance: Option<f64>) -> Vec<(&P, f64)> {
        let Some(root) = self.root else {
            return Vec::new();
        };

        if count == 0 {
            return Vec::new();
        }

        let mut best = BoundedHeap::new(count, max_distance);
        self.nearest_search(root, point, &mut best);

        best.heap
            .into_sorted_vec()
            .into_iter()
            .filter_map(|c| c.node.map(|n| (&self.nodes[n].obj, c.distance)))
            .collect()
    }

    fn nearest_search(&self, root: usize, point: &P, best: &mut BoundedHeap) {
        let mut stack = vec![Step::Descend(root)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Descend(index) => {
                    let mut current = Some(index);
                    while let Some(i) = current {
                        stack.push(Step::Visit(i));
                        let node = &self.nodes[i];
                        let dim = self.dimensions[node.dimension];
                        current = if point.coord(dim) < node.obj.coord(dim) {
                            node.left
                        } else {
                            node.right
                        };
                    }
                }
                Step::Visit(index) => {
                    let node = &self.nodes[index];
                    best.offer((self.distance_fn)(point, &node.obj), index);

                    let dim = self.dimensions[node.dimension];
                    let far = if point.coord(dim) < node.obj.coord(dim) {
                        node.right
                    } else {
                        node.left
                    };
                    if let Some(far) = far {
                        let plane_point = node.obj.with_coord(dim, point.coord(dim));
                        let plane_distance = (self.distance_fn)(&plane_point, &node.obj);
                        if !best.is_full() || plane_distance.abs() < best.worst() {
                            stack.push(Step::Descend(far));
                        }
                    }
                }
            }
        }
    }

    /// Number of nodes on the longest root to leaf path.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(usize, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((i, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[i];
            stack.extend(node.left.map(|l| (l, depth + 1)));
            stack.extend(node.right.map(|r| (r, depth + 1)));
        }

        height
    }

    /// Height relative to the height of a perfectly balanced tree (`log2(len)`), 1.0 for trees
    /// with less than 2 points.
    pub fn balance_factor(&self) -> f64 {
        if self.len < 2 {
            return 1.0;
        }

        self.height() as f64 / (self.len as f64).log2()
    }

    /// Iterate all points in pre-order.
    pub fn iter(&self) -> Iter<'_, P> {
        Iter {
            nodes: &self.nodes,
            stack: self.root.into_iter().collect(),
        }
    }

    /// Dump the tree structure, `None` if the tree is empty.
    pub fn to_data(&self) -> Option<KdNodeData<P>> {
        let root = self.root?;
        // children come after their parent in pre-order, build in reverse
        let mut order = Vec::with_capacity(self.len);
        let mut stack = vec![root];
        while let Some(i) = stack.pop() {
            order.push(i);
            stack.extend(self.nodes[i].right);
            stack.extend(self.nodes[i].left);
        }

        let mut built: Vec<Option<Box<KdNodeData<P>>>> = Vec::new();
        built.resize_with(self.nodes.len(), || None);
        for &i in order.iter().rev() {
            let node = &self.nodes[i];
            built[i] = Some(Box::new(KdNodeData {
                obj: node.obj.clone(),
                left: node.left.and_then(|l| built[l].take()),
                right: node.right.and_then(|r| built[r].take()),
                dimension: node.dimension,
            }));
        }

        built[root].take().map(|data| *data)
    }
}

/// Pre-order iterator over the points of a [KdTree].
#[derive(Debug, Clone)]
pub struct Iter<'a, P> {
    nodes: &'a [KdNode<P>],
    stack: Vec<usize>,
}

impl<'a, P> Iterator for Iter<'a, P> {
    type Item = &'a P;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let node = &self.nodes[index];
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        Some(&node.obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type DistanceFn = fn(&Vector2<f64>, &Vector2<f64>) -> f64;

    fn grid_tree() -> KdTree<Vector2<f64>, DistanceFn> {
        let mut points = Vec::new();
        for i in 0..5 {
            for j in 0..5 {
                points.push(Vector2::new(i as f64, j as f64));
            }
        }
        KdTree::new(points, euclidean_distance as DistanceFn, vec![Axis::X, Axis::Y]).unwrap()
    }

    /// Checks left < node <= right on every node's dimension.
    fn assert_ordered<P: KdPoint + Debug, F>(tree: &KdTree<P, F>) {
        fn check<P: KdPoint + Debug>(
            nodes: &[KdNode<P>],
            dims: &[P::Dim],
            index: usize,
            bounds: &mut Vec<(P::Dim, f64, bool)>,
        ) {
            let node = &nodes[index];
            for &(dim, value, less) in bounds.iter() {
                let c = node.obj.coord(dim);
                if less {
                    assert!(c < value, "{:?} not < {} on {:?}", node.obj, value, dim);
                } else {
                    assert!(c >= value, "{:?} not >= {} on {:?}", node.obj, value, dim);
                }
            }
            let dim = dims[node.dimension];
            let value = node.obj.coord(dim);
            if let Some(l) = node.left {
                assert_eq!(nodes[l].parent, Some(index));
                bounds.push((dim, value, true));
                check(nodes, dims, l, bounds);
                bounds.pop();
            }
            if let Some(r) = node.right {
                assert_eq!(nodes[r].parent, Some(index));
                bounds.push((dim, value, false));
                check(nodes, dims, r, bounds);
                bounds.pop();
            }
        }

        if let Some(root) = tree.root {
            check(&tree.nodes, &tree.dimensions, root, &mut Vec::new());
        }
    }

    #[test]
    fn build_is_ordered_and_balanced() {
        let tree = grid_tree();
        assert_eq!(tree.len(), 25);
        assert_ordered(&tree);
        assert!(tree.height() <= 6);
        assert_eq!(tree.iter().count(), 25);
    }

    #[test]
    fn remove_keeps_order() {
        let mut tree = grid_tree();
        for p in [
            Vector2::new(2.0, 2.0),
            Vector2::new(0.0, 0.0),
            Vector2::new(4.0, 4.0),
            Vector2::new(2.0, 3.0),
        ] {
            assert!(tree.remove(&p));
            assert!(!tree.remove(&p));
            assert_ordered(&tree);
        }
        assert_eq!(tree.len(), 21);
        assert_eq!(tree.iter().count(), 21);
        let (nearest, _) = tree.nearest(&Vector2::new(2.1, 2.1)).unwrap();
        assert_eq!(*nearest, Vector2::new(3.0, 2.0));
    }

    #[test]
    fn remove_all_then_insert() {
        let mut tree = grid_tree();
        let points: Vec<_> = tree.iter().copied().collect();
        for p in points.iter() {
            assert!(tree.remove(p));
        }
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.nearest(&Vector2::new(0.0, 0.0)).is_none());

        tree.insert(Vector2::new(1.0, 1.0));
        tree.insert(Vector2::new(0.5, 3.0));
        tree.insert(Vector2::new(1.0, 0.0));
        assert_ordered(&tree);
        assert_eq!(tree.len(), 3);
        assert!(tree.nodes.len() <= 25);
    }

    #[test]
    fn rebuilds_keep_order() {
        let mut tree = KdTree::new(Vec::new(), euclidean_distance as DistanceFn, vec![Axis::X, Axis::Y])
            .unwrap();
        for i in 0..500 {
            // repeated x values exercise equal keys on the right side
            tree.insert(Vector2::new((i / 3) as f64, (i % 7) as f64));
        }
        assert_ordered(&tree);
        assert_eq!(tree.len(), 500);
        assert_eq!(tree.iter().count(), 500);
        assert!(tree.height() <= 24, "height {}", tree.height());

        for i in (0..500).step_by(2) {
            assert!(tree.remove(&Vector2::new((i / 3) as f64, (i % 7) as f64)));
        }
        assert_ordered(&tree);
        assert_eq!(tree.len(), 250);
        let (nearest, _) = tree.nearest(&Vector2::new(1000.0, 0.0)).unwrap();
        assert_eq!(nearest.x, 166.0);
    }

    #[test]
    fn nearest_k_with_max_distance() {
        let tree = grid_tree();
        let result = tree.nearest_k(&Vector2::new(0.0, 0.0), 10, Some(1.5));
        // (0,0), (1,0), (0,1), (1,1)
        assert_eq!(result.len(), 4);
        assert_eq!(result[0].1, 0.0);
        assert!(result.windows(2).all(|w| w[0].1 <= w[1].1));
    }

    #[test]
    fn invalid_dump_rejected() {
        let data = KdNodeData {
            obj: [0.0, 0.0, 0.0],
            left: None,
            right: None,
            dimension: 3,
        };
        let err = KdTree::from_data(
            Some(data),
            |a: &[f64; 3], b: &[f64; 3]| a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum::<f64>(),
            vec![0, 1, 2],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            KdTreeError::InvalidDimension {
                index: 3,
                dimension_count: 3
            }
        ));
    }
}
