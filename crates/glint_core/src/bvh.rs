//! Bounding-volume hierarchy over a static geometry set.
//!
//! A binary tree of AABBs built once before rendering; traversal prunes
//! whole subtrees on a box miss. Unbounded geometries (planes, tubes) cannot
//! be boxed and ride in a flat side list that is always tested, so a BVH
//! returns exactly the same intersection set as a flat collection over the
//! same input.

use glint_math::{Aabb, Ray};

use crate::geometry::{Geometry, Intersectable, Intersection};

/// Maximum primitives per leaf before splitting.
const LEAF_MAX_SIZE: usize = 4;

enum BvhNode {
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    Leaf {
        geometries: Vec<Geometry>,
        bbox: Aabb,
    },
    Empty,
}

impl BvhNode {
    /// Recursive construction: median split on the longest centroid axis.
    fn build(mut geometries: Vec<Geometry>) -> Self {
        let Some(bounds) = combined_box(&geometries) else {
            return BvhNode::Empty;
        };

        if geometries.len() <= LEAF_MAX_SIZE {
            return BvhNode::Leaf {
                geometries,
                bbox: bounds,
            };
        }

        // Spread of the centroids decides the split axis
        let centroid_bounds = geometries
            .iter()
            .map(|g| {
                let c = g.bounding_box().expect("bounded by construction").centroid();
                Aabb::new(c, c)
            })
            .reduce(|a, b| Aabb::combine(&a, &b))
            .expect("non-empty by construction");
        let axis = centroid_bounds.longest_axis();

        geometries.sort_unstable_by(|a, b| {
            let ca = a.bounding_box().expect("bounded").centroid().as_dvec3()[axis];
            let cb = b.bounding_box().expect("bounded").centroid().as_dvec3()[axis];
            ca.partial_cmp(&cb).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mid = geometries.len() / 2;
        let right = geometries.split_off(mid);
        let left = geometries;

        BvhNode::Branch {
            left: Box::new(Self::build(left)),
            right: Box::new(Self::build(right)),
            bbox: bounds,
        }
    }

    fn bounding_box(&self) -> Option<Aabb> {
        match self {
            BvhNode::Branch { bbox, .. } | BvhNode::Leaf { bbox, .. } => Some(*bbox),
            BvhNode::Empty => None,
        }
    }

    fn depth(&self) -> usize {
        match self {
            BvhNode::Branch { left, right, .. } => 1 + left.depth().max(right.depth()),
            BvhNode::Leaf { .. } => 1,
            BvhNode::Empty => 0,
        }
    }

    fn collect<'a>(&'a self, ray: &Ray, out: &mut Vec<Intersection<'a>>) {
        match self {
            BvhNode::Empty => {}
            BvhNode::Leaf { geometries, bbox } => {
                if !bbox.intersect(ray) {
                    return;
                }
                for geometry in geometries {
                    out.extend(geometry.intersections(ray));
                }
            }
            BvhNode::Branch { left, right, bbox } => {
                if !bbox.intersect(ray) {
                    return;
                }
                left.collect(ray, out);
                right.collect(ray, out);
            }
        }
    }
}

fn combined_box(geometries: &[Geometry]) -> Option<Aabb> {
    geometries
        .iter()
        .filter_map(|g| g.bounding_box())
        .reduce(|a, b| Aabb::combine(&a, &b))
}

/// A built hierarchy plus the unbounded stragglers.
pub struct Bvh {
    root: BvhNode,
    unbounded: Vec<Geometry>,
}

impl Bvh {
    /// Build once from a static geometry list. The tree is immutable for
    /// the life of the render; geometries cannot be removed post-build.
    pub fn build(geometries: Vec<Geometry>) -> Self {
        let (bounded, unbounded): (Vec<_>, Vec<_>) = geometries
            .into_iter()
            .partition(|g| g.bounding_box().is_some());

        let bounded_count = bounded.len();
        let root = BvhNode::build(bounded);

        log::info!(
            "BVH built: {} bounded geometries (depth {}), {} unbounded alongside",
            bounded_count,
            root.depth(),
            unbounded.len()
        );

        Self { root, unbounded }
    }
}

impl Intersectable for Bvh {
    fn intersections<'a>(&'a self, ray: &Ray) -> Vec<Intersection<'a>> {
        let mut intersections = Vec::new();
        self.root.collect(ray, &mut intersections);
        for geometry in &self.unbounded {
            intersections.extend(geometry.intersections(ray));
        }
        intersections
    }

    fn bounding_box(&self) -> Option<Aabb> {
        if self.unbounded.is_empty() {
            self.root.bounding_box()
        } else {
            None
        }
    }
}
