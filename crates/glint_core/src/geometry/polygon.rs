//! Convex planar polygon (and triangle).

use glint_math::{align_zero, is_zero, Aabb, Point, Ray, Vector};

use super::{GeometryError, Plane};

/// An ordered, convex, planar polygon.
///
/// The vertex list is validated at construction; intersection never has to
/// re-check convexity or coplanarity. The supporting plane holds the shared
/// unit normal.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<Point>,
    plane: Plane,
}

impl Polygon {
    /// Build a polygon from vertices ordered along the edge path.
    ///
    /// Rejected configurations: fewer than 3 vertices, coincident
    /// consecutive vertices, vertices off the supporting plane, and any
    /// turn-direction flip (concave or mis-ordered input).
    pub fn new(vertices: Vec<Point>) -> Result<Self, GeometryError> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices);
        }

        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        let polygon = Self { vertices, plane };
        if polygon.vertices.len() == 3 {
            // A triangle is always planar and convex
            return Ok(polygon);
        }

        let n = polygon.plane.normal();
        let vertices = &polygon.vertices;
        let last = vertices.len() - 1;

        // Walk consecutive edges; coincident vertices and straight-line
        // triples surface as zero-vector failures from subtract/cross.
        let mut edge1 = vertices[last].subtract(vertices[last - 1])?;
        let mut edge2 = vertices[0].subtract(vertices[last])?;
        let positive = edge1.cross(edge2)?.dot(n) > 0.0;

        for i in 1..vertices.len() {
            if !is_zero(vertices[i].subtract(vertices[0])?.dot(n)) {
                return Err(GeometryError::NotCoplanar);
            }
            edge1 = edge2;
            edge2 = vertices[i].subtract(vertices[i - 1])?;
            if positive != (edge1.cross(edge2)?.dot(n) > 0.0) {
                return Err(GeometryError::NotConvex);
            }
        }

        Ok(polygon)
    }

    /// Build a triangle. Skips the coplanarity/convexity sweep (a 3-gon has
    /// both for free); degenerate vertex triples still fail through the
    /// supporting-plane construction.
    pub fn triangle(a: Point, b: Point, c: Point) -> Result<Self, GeometryError> {
        let plane = Plane::from_points(a, b, c)?;
        Ok(Self {
            vertices: vec![a, b, c],
            plane,
        })
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// The polygon's unit normal (from its supporting plane).
    #[inline]
    pub fn normal(&self) -> Vector {
        self.plane.normal()
    }

    /// Intersection with a ray: at most one point.
    ///
    /// Boundaries are exclusive: a ray landing exactly on an edge or vertex
    /// counts as a miss.
    pub fn intersect(&self, ray: &Ray) -> Vec<Point> {
        let plane_hits = self.plane.intersect(ray);
        if plane_hits.is_empty() {
            return Vec::new();
        }

        let head = ray.head();
        let direction = ray.direction();

        if self.vertices.iter().any(|v| *v == head) {
            return Vec::new();
        }

        // For each edge (p1, p2) the sign of ((p1-head) x (p2-head)) . dir
        // tells which side of the edge plane the ray passes; a hit inside
        // the polygon sees the same sign everywhere, a zero means exactly
        // on an edge.
        let mut positive = None;
        for i in 0..self.vertices.len() {
            let p1 = self.vertices[i];
            let p2 = self.vertices[(i + 1) % self.vertices.len()];

            let e1 = match p1.subtract(head) {
                Ok(v) => v,
                Err(_) => return Vec::new(),
            };
            let e2 = match p2.subtract(head) {
                Ok(v) => v,
                Err(_) => return Vec::new(),
            };
            let edge_normal = match e1.cross(e2) {
                Ok(v) => v.normalize(),
                // Head collinear with the edge: grazing, treated as outside
                Err(_) => return Vec::new(),
            };

            let sign = align_zero(edge_normal.dot(direction));
            if sign == 0.0 {
                return Vec::new();
            }
            match positive {
                None => positive = Some(sign > 0.0),
                Some(p) if p != (sign > 0.0) => return Vec::new(),
                Some(_) => {}
            }
        }

        plane_hits
    }

    /// The tight box around the vertices.
    pub fn bounding_box(&self) -> Aabb {
        let mut min = self.vertices[0].as_dvec3();
        let mut max = min;
        for v in &self.vertices[1..] {
            min = min.min(v.as_dvec3());
            max = max.max(v.as_dvec3());
        }
        Aabb::new(Point::from_dvec3(min), Point::from_dvec3(max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::Vector;

    fn unit_triangle() -> Polygon {
        // Right triangle in the z=0 plane
        Polygon::triangle(
            Point::new(0.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
            Point::new(0.0, 2.0, 0.0),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_quad() {
        let quad = Polygon::new(vec![
            Point::new(0.0, 0.0, 1.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(-1.0, 1.0, 1.0),
        ]);
        assert!(quad.is_ok());
    }

    #[test]
    fn test_too_few_vertices() {
        let result = Polygon::new(vec![Point::ORIGIN, Point::new(1.0, 0.0, 0.0)]);
        assert!(matches!(result, Err(GeometryError::TooFewVertices)));
    }

    #[test]
    fn test_not_coplanar() {
        let result = Polygon::new(vec![
            Point::new(0.0, 0.0, 1.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 2.0, 2.0),
        ]);
        assert!(matches!(result, Err(GeometryError::NotCoplanar)));
    }

    #[test]
    fn test_concave_rejected() {
        let result = Polygon::new(vec![
            Point::new(0.0, 0.0, 1.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.4, 0.4, 0.2),
        ]);
        assert!(matches!(result, Err(GeometryError::NotConvex)));
    }

    #[test]
    fn test_coincident_vertices_rejected() {
        let a = Point::new(0.0, 0.0, 1.0);
        let result = Polygon::new(vec![
            a,
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            a,
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_degenerate_triangle_still_fails() {
        // Collinear vertices collapse the supporting plane even though the
        // triangle constructor skips the polygon sweep
        let result = Polygon::triangle(
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 1.0),
            Point::new(2.0, 2.0, 2.0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_hit_inside() {
        let tri = unit_triangle();
        let ray = Ray::new(Point::new(0.5, 0.5, 1.0), -Vector::AXIS_Z);
        assert_eq!(tri.intersect(&ray), vec![Point::new(0.5, 0.5, 0.0)]);
    }

    #[test]
    fn test_miss_outside() {
        let tri = unit_triangle();
        let ray = Ray::new(Point::new(3.0, 3.0, 1.0), -Vector::AXIS_Z);
        assert!(tri.intersect(&ray).is_empty());
    }

    #[test]
    fn test_edge_is_exclusive() {
        let tri = unit_triangle();
        // Lands exactly on the edge from (0,0,0) to (2,0,0)
        let ray = Ray::new(Point::new(1.0, 0.0, 1.0), -Vector::AXIS_Z);
        assert!(tri.intersect(&ray).is_empty());
    }

    #[test]
    fn test_vertex_is_exclusive() {
        let tri = unit_triangle();
        let ray = Ray::new(Point::new(0.0, 0.0, 1.0), -Vector::AXIS_Z);
        assert!(tri.intersect(&ray).is_empty());
    }

    #[test]
    fn test_bounding_box_covers_vertices() {
        let tri = unit_triangle();
        let b = tri.bounding_box();
        assert_eq!(b.min(), Point::new(0.0, 0.0, 0.0));
        assert_eq!(b.max(), Point::new(2.0, 2.0, 0.0));
    }
}
