//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! Binary tree over indices into the scene's primitive list. It answers the
//! same queries as the linear scan in [`crate::Scene`], including the
//! tie-break: at equal `t` the primitive with the lower index wins.

use crate::{HitRecord, Hittable, Primitive};
use whitted_math::{Aabb, Interval, Ray};

/// Maximum primitives per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 4;

/// BVH node - either a branch with two children or a leaf with primitives.
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf node with a small number of primitive indices, ascending.
    Leaf { indices: Vec<usize>, bbox: Aabb },
    /// Empty node (for edge cases).
    Empty,
}

/// Best candidate so far: primitive index and its record.
type Best<'a> = Option<(usize, HitRecord<'a>)>;

impl BvhNode {
    /// Build a BVH over all of `primitives`.
    pub fn new(primitives: &[Primitive]) -> Self {
        if primitives.is_empty() {
            return BvhNode::Empty;
        }
        let indices: Vec<usize> = (0..primitives.len()).collect();
        Self::build(primitives, indices)
    }

    /// Recursive BVH construction.
    ///
    /// Simple median-split approach: sort by centroid on the axis where the
    /// centroids spread the most, split in half, recurse.
    fn build(primitives: &[Primitive], mut indices: Vec<usize>) -> Self {
        let bbox = indices.iter().fold(Aabb::EMPTY, |acc, &i| {
            Aabb::surrounding(&acc, &primitives[i].bounding_box())
        });

        if indices.len() <= LEAF_MAX_SIZE {
            indices.sort_unstable();
            return BvhNode::Leaf { indices, bbox };
        }

        let centroid_bounds = indices.iter().fold(Aabb::EMPTY, |acc, &i| {
            let c = primitives[i].centroid();
            Aabb::surrounding(&acc, &Aabb { min: c, max: c })
        });
        let axis = centroid_bounds.longest_axis();

        indices.sort_unstable_by(|&a, &b| {
            primitives[a].centroid()[axis]
                .partial_cmp(&primitives[b].centroid()[axis])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let right_indices = indices.split_off(indices.len() / 2);
        let left = Self::build(primitives, indices);
        let right = Self::build(primitives, right_indices);

        BvhNode::Branch {
            left: Box::new(left),
            right: Box::new(right),
            bbox,
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Leaf { bbox, .. } => *bbox,
            BvhNode::Branch { bbox, .. } => *bbox,
        }
    }

    /// Closest hit among `primitives`; must be the slice the tree was built from.
    pub fn closest_hit<'a>(
        &self,
        primitives: &'a [Primitive],
        ray: &Ray,
        ray_t: Interval,
        epsilon: f32,
    ) -> Option<HitRecord<'a>> {
        let mut best = None;
        self.closest_in(primitives, ray, ray_t, epsilon, &mut best);
        best.map(|(_, rec)| rec)
    }

    fn closest_in<'a>(
        &self,
        primitives: &'a [Primitive],
        ray: &Ray,
        ray_t: Interval,
        epsilon: f32,
        best: &mut Best<'a>,
    ) {
        let window = match best {
            Some((_, rec)) => ray_t.with_max(next_up(rec.t)),
            None => ray_t,
        };
        if !self.bounding_box().hit(ray, window) {
            return;
        }

        match self {
            BvhNode::Empty => {}
            BvhNode::Leaf { indices, .. } => {
                for &i in indices {
                    offer(primitives, i, ray, ray_t, epsilon, best);
                }
            }
            BvhNode::Branch { left, right, .. } => {
                left.closest_in(primitives, ray, ray_t, epsilon, best);
                right.closest_in(primitives, ray, ray_t, epsilon, best);
            }
        }
    }

    /// True when any primitive is hit inside `ray_t`.
    pub fn any_hit(&self, primitives: &[Primitive], ray: &Ray, ray_t: Interval, epsilon: f32) -> bool {
        if !self.bounding_box().hit(ray, ray_t) {
            return false;
        }

        match self {
            BvhNode::Empty => false,
            BvhNode::Leaf { indices, .. } => indices
                .iter()
                .any(|&i| primitives[i].hit_shadow(ray, ray_t, epsilon)),
            BvhNode::Branch { left, right, .. } => {
                left.any_hit(primitives, ray, ray_t, epsilon)
                    || right.any_hit(primitives, ray, ray_t, epsilon)
            }
        }
    }
}

/// Offer primitive `i` to the running best.
///
/// Lower indices are allowed to match the current `t` exactly so that ties
/// resolve the same way as the linear scan.
fn offer<'a>(
    primitives: &'a [Primitive],
    i: usize,
    ray: &Ray,
    ray_t: Interval,
    epsilon: f32,
    best: &mut Best<'a>,
) {
    let window = match best {
        Some((j, rec)) if i < *j => ray_t.with_max(next_up(rec.t)),
        Some((_, rec)) => ray_t.with_max(rec.t),
        None => ray_t,
    };

    if let Some(rec) = primitives[i].hit(ray, window, epsilon) {
        *best = Some((i, rec));
    }
}

/// Smallest f32 greater than a positive finite `t`.
#[inline]
fn next_up(t: f32) -> f32 {
    if t.is_finite() && t >= 0.0 {
        f32::from_bits(t.to_bits() + 1)
    } else {
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Cone, PhongMaterial, Scene, Sphere, Unshadowed};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::sync::Arc;
    use whitted_math::Vec3;

    const EPS: f32 = 1e-4;

    fn sphere_at(center: Vec3, radius: f32, color: Color) -> Primitive {
        Sphere::new(center, radius, Arc::new(PhongMaterial::new(color))).into()
    }

    #[test]
    fn test_bvh_empty() {
        let bvh = BvhNode::new(&[]);
        assert!(matches!(bvh, BvhNode::Empty));

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(bvh.closest_hit(&[], &ray, Interval::positive(), EPS).is_none());
        assert!(!bvh.any_hit(&[], &ray, Interval::positive(), EPS));
    }

    #[test]
    fn test_bvh_single_sphere_is_leaf() {
        let prims = vec![sphere_at(Vec3::new(0.0, 0.0, -1.0), 0.5, Color::ONE)];
        let bvh = BvhNode::new(&prims);
        assert!(matches!(bvh, BvhNode::Leaf { .. }));

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = bvh.closest_hit(&prims, &ray, Interval::positive(), EPS).expect("should hit");
        assert!((rec.t - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_bvh_matches_linear_scan() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut scene = Scene::new();
        for _ in 0..60 {
            let center = Vec3::new(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
            );
            scene.add(Sphere::new(center, rng.gen_range(0.2..1.5), Arc::new(PhongMaterial::default())));
        }
        scene.add(Cone::new(Vec3::new(0.0, 0.0, 20.0), Vec3::Z, 0.2, Arc::new(PhongMaterial::default())));

        let bvh = BvhNode::new(scene.primitives());
        assert!(matches!(bvh, BvhNode::Branch { .. }));

        for _ in 0..500 {
            let origin = Vec3::new(
                rng.gen_range(-15.0..15.0),
                rng.gen_range(-15.0..15.0),
                rng.gen_range(-15.0..15.0),
            );
            let dir = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            )
            .normalize_or_zero();
            if dir == Vec3::ZERO {
                continue;
            }
            let ray = Ray::new(origin, dir);

            let linear = scene.closest_hit(&ray, Interval::positive(), EPS).map(|h| h.t);
            let accel = bvh
                .closest_hit(scene.primitives(), &ray, Interval::positive(), EPS)
                .map(|h| h.t);
            assert_eq!(linear, accel);

            assert_eq!(
                scene.any_hit(&ray, Interval::positive(), EPS),
                bvh.any_hit(scene.primitives(), &ray, Interval::positive(), EPS)
            );
        }
    }

    #[test]
    fn test_bvh_tie_goes_to_lower_index() {
        let green = Color::new(0.0, 1.0, 0.0);
        // Coincident spheres at both ends of the index range.
        let mut prims: Vec<Primitive> = (0..8)
            .map(|i| sphere_at(Vec3::new(10.0 + i as f32 * 3.0, 0.0, 0.0), 0.5, Color::ONE))
            .collect();
        prims.insert(0, sphere_at(Vec3::ZERO, 1.0, green));
        prims.push(sphere_at(Vec3::ZERO, 1.0, Color::ONE));

        let bvh = BvhNode::new(&prims);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let rec = bvh.closest_hit(&prims, &ray, Interval::positive(), EPS).expect("should hit");

        let shaded = rec.material.shade(&ray, &rec, &[], &Unshadowed);
        assert!((shaded - 0.1 * green).length() < 1e-5);
    }

    #[test]
    fn test_next_up() {
        assert!(next_up(4.0) > 4.0);
        assert_eq!(next_up(f32::INFINITY), f32::INFINITY);
    }
}
