//! Flat composite of intersectable children.

use glint_math::{Aabb, Ray};

use crate::geometry::{Intersectable, Intersection};

/// A flat list of intersectables, the degenerate one-level case of the
/// hierarchy. Children answer in arbitrary order; callers wanting the
/// closest hit must search the merged result.
#[derive(Default)]
pub struct Geometries {
    children: Vec<Box<dyn Intersectable>>,
    bbox: Option<Aabb>,
    has_unbounded: bool,
}

impl Geometries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a child, folding its box into the collection box.
    pub fn add(&mut self, child: impl Intersectable + 'static) {
        self.add_boxed(Box::new(child));
    }

    pub fn add_boxed(&mut self, child: Box<dyn Intersectable>) {
        match child.bounding_box() {
            Some(bbox) => {
                self.bbox = Some(match self.bbox {
                    Some(current) => Aabb::combine(&current, &bbox),
                    None => bbox,
                });
            }
            None => self.has_unbounded = true,
        }
        self.children.push(child);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Intersectable for Geometries {
    fn intersections<'a>(&'a self, ray: &Ray) -> Vec<Intersection<'a>> {
        let mut intersections = Vec::new();
        for child in &self.children {
            intersections.extend(child.intersections(ray));
        }
        intersections
    }

    fn bounding_box(&self) -> Option<Aabb> {
        // A collection with an unbounded child has no usable box
        if self.has_unbounded {
            None
        } else {
            self.bbox
        }
    }
}
