//! Ray casting against model triangles.
//!
//! Used for shot hit-testing and line-of-sight checks. Rays are tested in each
//! model's local space against every face; there is no acceleration structure.

use log::warn;

use crate::math::fixed::{fixed_abs, fixed_div, int_to_fixed, Fixed, FIXED_ONE};
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::model::Model;

/// Determinants smaller than this (about 0.001) count as parallel.
const DET_EPSILON: Fixed = 4;

/// Rays give up beyond this distance.
pub const MAX_RAY_DISTANCE: Fixed = int_to_fixed(2000);

/// Closest hit of a traced ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RayHit {
    /// World-space hit position.
    pub point: Vec3,
    /// Index of the model that was hit.
    pub model: usize,
    /// Distance along the normalized ray. Measured in the model's local units,
    /// which match world units for rigid transforms.
    pub distance: Fixed,
}

/// Möller–Trumbore ray/triangle intersection.
///
/// Returns the signed distance along `dir` (in multiples of its length) or
/// `None` when the ray misses or runs parallel to the triangle.
pub fn ray_tri_intersect(origin: Vec3, dir: Vec3, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<Fixed> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let pvec = dir.cross(edge2);

    let det = edge1.dot(pvec);
    if fixed_abs(det) < DET_EPSILON {
        return None;
    }

    let tvec = origin - v0;
    let u = fixed_div(tvec.dot(pvec), det);
    if !(0..=FIXED_ONE).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = fixed_div(dir.dot(qvec), det);
    if v < 0 || v > FIXED_ONE - u {
        return None;
    }

    Some(fixed_div(edge2.dot(qvec), det))
}

/// Finds the closest model face hit by a ray.
///
/// Inactive models and `ignore` are skipped, as are models whose transform
/// cannot be inverted. Only hits in front of the origin and closer than
/// [`MAX_RAY_DISTANCE`] count.
pub fn raytrace(models: &[Model], origin: Vec3, dir: Vec3, ignore: Option<usize>) -> Option<RayHit> {
    let dir = dir.normalize();
    let mut best: Option<(usize, Fixed)> = None;
    let mut best_t = MAX_RAY_DISTANCE;

    for (index, model) in models.iter().enumerate() {
        if Some(index) == ignore || !model.is_active() {
            continue;
        }
        let Some(to_local) = model.modelview().affine_inverse() else {
            warn!("skipping model {} in raytrace: singular transform", model.name());
            continue;
        };

        let local_origin = (to_local * Vec4::from_vec3(origin, FIXED_ONE)).to_vec3();
        let local_dir = (to_local * Vec4::from_vec3(dir, 0)).to_vec3().normalize();

        let vertices = model.vertices();
        for face in model.faces() {
            let [v0, v1, v2] = face.vertices.map(|i| vertices[i as usize]);
            if let Some(t) = ray_tri_intersect(local_origin, local_dir, v0, v1, v2) {
                if t > 0 && t < best_t {
                    best_t = t;
                    best = Some((index, t));
                }
            }
        }
    }

    best.map(|(model, distance)| RayHit {
        point: origin + dir.scale(distance),
        model,
        distance,
    })
}

/// True when nothing blocks the segment from `from` to `to`.
pub fn line_of_sight(models: &[Model], from: Vec3, to: Vec3, ignore: Option<usize>) -> bool {
    let distance = (to - from).length();
    match raytrace(models, from, to - from, ignore) {
        Some(hit) => hit.distance >= distance,
        None => true,
    }
}
