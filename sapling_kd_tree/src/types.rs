// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and intersection helpers.

use glam::Vec3;

/// Tolerance shared by the plane-side and parallel-ray decisions.
pub(crate) const EPSILON: f32 = 1e-3;

/// Axis-aligned bounding box in 3D.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// An inverted box; growing it by any point yields that point.
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// Create a box from min/max corners.
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Grow the box to contain `p`.
    pub fn grow(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Tight bounds over every vertex of `triangles`.
    pub fn from_triangles(triangles: &[Triangle]) -> Self {
        let mut bounds = Self::EMPTY;
        for tri in triangles {
            bounds.grow(tri.v0);
            bounds.grow(tri.v1);
            bounds.grow(tri.v2);
        }
        bounds
    }

    /// Center point.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Surface area; degenerate extents contribute zero.
    pub fn surface_area(&self) -> f32 {
        let d = (self.max - self.min).max(Vec3::ZERO);
        2.0 * (d.x * d.y + d.y * d.z + d.z * d.x)
    }

    /// The half of the box left of `split` on `axis`.
    pub fn clipped_left(&self, axis: usize, split: f32) -> Self {
        let mut out = *self;
        out.max[axis] = split;
        out
    }

    /// The half of the box right of `split` on `axis`.
    pub fn clipped_right(&self, axis: usize, split: f32) -> Self {
        let mut out = *self;
        out.min[axis] = split;
        out
    }

    /// Whether the boxes share any point.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }
}

/// Side classification of a point against a volume.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    /// Strictly inside.
    Inside,
    /// On the boundary.
    Overlapping,
    /// Strictly outside.
    Outside,
}

/// Classify a point against a box.
pub fn classify_point_aabb(p: Vec3, aabb: &Aabb) -> Side {
    if p.cmplt(aabb.min).any() || p.cmpgt(aabb.max).any() {
        return Side::Outside;
    }
    if p.cmpeq(aabb.min).any() || p.cmpeq(aabb.max).any() {
        Side::Overlapping
    } else {
        Side::Inside
    }
}

/// A triangle given by three vertices.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Triangle {
    /// First vertex.
    pub v0: Vec3,
    /// Second vertex.
    pub v1: Vec3,
    /// Third vertex.
    pub v2: Vec3,
}

impl Triangle {
    /// Create a triangle from its vertices.
    pub const fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Tight bounds of the triangle.
    pub fn aabb(&self) -> Aabb {
        Aabb {
            min: self.v0.min(self.v1).min(self.v2),
            max: self.v0.max(self.v1).max(self.v2),
        }
    }
}

/// A ray with origin and (non-zero, not necessarily normalized) direction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Direction; intersection times are expressed in multiples of it.
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray.
    pub const fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Componentwise reciprocal direction. Zero components become signed
    /// infinities, which the slab test tolerates.
    #[inline]
    pub(crate) fn recip_direction(&self) -> Vec3 {
        Vec3::new(
            1.0 / self.direction.x,
            1.0 / self.direction.y,
            1.0 / self.direction.z,
        )
    }

    /// Slab-clip the ray against a box.
    ///
    /// Returns the parametric interval in which the ray is inside the box,
    /// or `None` when the box is missed or lies entirely behind the origin.
    /// The near bound may be negative when the origin is inside the box.
    pub fn clip_aabb(&self, aabb: &Aabb) -> Option<(f32, f32)> {
        let inv = self.recip_direction();
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        for axis in 0..3 {
            let t1 = (aabb.min[axis] - self.origin[axis]) * inv[axis];
            let t2 = (aabb.max[axis] - self.origin[axis]) * inv[axis];
            // min/max drop the NaN produced by `0.0 * inf` on an axis the
            // ray is parallel to while sitting on a slab boundary.
            t_near = t_near.max(t1.min(t2));
            t_far = t_far.min(t1.max(t2));
        }
        if t_far < 0.0 || t_near > t_far {
            None
        } else {
            Some((t_near, t_far))
        }
    }

    /// Intersection time against the plane `dot(n, x) = d`, or a negative
    /// value when the ray is parallel to the plane or points away from it.
    fn intersect_plane(&self, normal: Vec3, d: f32) -> f32 {
        let denom = self.direction.dot(normal);
        if denom > -EPSILON && denom < EPSILON {
            return -1.0;
        }
        let t = -(normal.dot(self.origin) - d) / denom;
        if t > 0.0 { t } else { -1.0 }
    }

    /// Intersection time against a triangle, or a negative value on a miss.
    ///
    /// Plane-based test: intersect the supporting plane, then check the hit
    /// point against the three edges. Degenerate triangles never hit.
    pub fn intersect_triangle(&self, tri: &Triangle) -> f32 {
        let ab = tri.v1 - tri.v0;
        let ac = tri.v2 - tri.v0;
        let normal = ab.cross(ac).normalize();
        let d = tri.v0.dot(normal);

        let t = self.intersect_plane(normal, d);
        if t < 0.0 {
            return -1.0;
        }

        let point = self.origin + self.direction * t;
        if (tri.v1 - tri.v0).cross(point - tri.v0).dot(normal) < 0.0
            || (tri.v2 - tri.v1).cross(point - tri.v1).dot(normal) < 0.0
            || (tri.v0 - tri.v2).cross(point - tri.v2).dot(normal) < 0.0
        {
            return -1.0;
        }
        t
    }
}

/// Result of a closest-hit query.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Intersection {
    /// Index of the intersected triangle; meaningless on a miss.
    pub triangle_index: u32,
    /// Intersection time; negative when nothing was hit.
    pub t: f32,
}

impl Intersection {
    /// The no-hit sentinel.
    pub const MISS: Self = Self {
        triangle_index: u32::MAX,
        t: -1.0,
    };

    /// Whether anything was hit.
    pub fn is_hit(&self) -> bool {
        self.t >= 0.0
    }
}
