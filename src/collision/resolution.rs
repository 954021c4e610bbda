//! Impulse-based response for one colliding pair.
//!
//! Both resolvers take the MTV exactly as the narrow phase returned it for
//! `test(first, second)`, so it moves the first body out of the second and
//! its normalized direction points from the second body toward the first.

use super::collider::Collider;
use crate::common::{Material, PhysicsConfig};
use crate::math::vec2::Vec2;
use crate::objects::Body;

/// What a resolver did with a pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// A body had a non-positive mass or inertia; nothing changed.
    Skipped,
    /// Overlap corrected, but the bodies were already separating.
    PositionOnly,
    /// Overlap corrected and impulses applied.
    Impulse { normal: f64, tangent: f64 },
}

impl Resolution {
    pub fn applied_impulse(&self) -> bool {
        matches!(self, Resolution::Impulse { .. })
    }
}

/// Returns mutable references to two distinct bodies of the slice.
///
/// `None` if either index is out of bounds or both are the same.
pub fn body_pair_mut(bodies: &mut [Body], index_a: usize, index_b: usize) -> Option<(&mut Body, &mut Body)> {
    if index_a == index_b || index_a >= bodies.len() || index_b >= bodies.len() {
        return None;
    }
    // Get mutable references using split_at_mut to satisfy the borrow checker
    if index_a < index_b {
        let (head, tail) = bodies.split_at_mut(index_b);
        Some((&mut head[index_a], &mut tail[0]))
    } else {
        let (head, tail) = bodies.split_at_mut(index_a);
        Some((&mut tail[0], &mut head[index_b]))
    }
}

/// Denominator of the impulse equation along `direction`. Inverse terms of
/// an immovable side are zero.
fn effective_mass_inverse(direction: Vec2, inv_mass: [f64; 2], inv_inertia: [f64; 2], arms: [Vec2; 2]) -> f64 {
    let ra_x_d = arms[0].cross(direction);
    let rb_x_d = arms[1].cross(direction);
    inv_mass[0] + inv_mass[1] + ra_x_d * ra_x_d * inv_inertia[0] + rb_x_d * rb_x_d * inv_inertia[1]
}

/// Applies `impulse` to `a` and `-impulse` to `b` at the given lever arms.
fn apply_pair_impulse(a: &mut Body, b: &mut Body, impulse: Vec2, r_a: Vec2, r_b: Vec2) {
    let body_a = a.rigid_mut();
    body_a.velocity += impulse * body_a.inv_mass();
    body_a.angular_velocity += r_a.cross(impulse) * body_a.inv_inertia();
    let body_b = b.rigid_mut();
    body_b.velocity -= impulse * body_b.inv_mass();
    body_b.angular_velocity -= r_b.cross(impulse) * body_b.inv_inertia();
}

/// Resolves two moving bodies. `mtv` moves `a` out of `b`.
pub fn resolve_bodies(a: &mut Body, b: &mut Body, mtv: Vec2, material: Material, config: &PhysicsConfig) -> Resolution {
    if !a.rigid().can_resolve() || !b.rigid().can_resolve() {
        log::debug!(
            "skipping {:?}/{:?} pair: non-positive mass or inertia",
            a.kind(),
            b.kind()
        );
        return Resolution::Skipped;
    }
    let Some(normal) = unit_normal(mtv) else {
        return Resolution::Skipped;
    };

    // Positional correction, split by the other body's mass fraction
    let mass_a = a.rigid().mass;
    let mass_b = b.rigid().mass;
    let total_mass = mass_a + mass_b;
    let correction = mtv * config.position_correction;
    a.translate(correction * (mass_b / total_mass));
    b.translate(-correction * (mass_a / total_mass));

    // Contact point approximation
    let pos_a = a.position();
    let pos_b = b.position();
    let contact = (pos_a + pos_b) * 0.5;
    let r_a = contact - pos_a;
    let r_b = contact - pos_b;

    // Relative velocity at the contact
    let relative_velocity = a.rigid().velocity_at(contact) - b.rigid().velocity_at(contact);
    let velocity_along_normal = relative_velocity.dot(normal);
    if velocity_along_normal >= 0.0 {
        return Resolution::PositionOnly;
    }

    let inv_mass = [a.rigid().inv_mass(), b.rigid().inv_mass()];
    let inv_inertia = [a.rigid().inv_inertia(), b.rigid().inv_inertia()];
    let arms = [r_a, r_b];

    // Normal impulse
    let denominator = effective_mass_inverse(normal, inv_mass, inv_inertia, arms);
    let j = (-(1.0 + material.restitution) * velocity_along_normal / denominator)
        .max(-config.max_impulse)
        .min(config.max_impulse);
    apply_pair_impulse(a, b, normal * j, r_a, r_b);

    // Friction along the tangent, Coulomb-capped
    let tangent = normal.perpendicular();
    let relative_velocity = a.rigid().velocity_at(contact) - b.rigid().velocity_at(contact);
    let tangent_denominator = effective_mass_inverse(tangent, inv_mass, inv_inertia, arms);
    let max_friction = material.friction * j.abs();
    let jt = (-relative_velocity.dot(tangent) / tangent_denominator).max(-max_friction).min(max_friction);
    apply_pair_impulse(a, b, tangent * jt, r_a, r_b);

    // Table friction, once per resolved collision
    for body in [a.rigid_mut(), b.rigid_mut()] {
        body.velocity *= config.collision_linear_damping;
        body.angular_velocity *= config.collision_angular_damping;
    }

    log::trace!("body-body impulse: normal={:.4} tangent={:.4} n={:?}", j, jt, normal);
    Resolution::Impulse { normal: j, tangent: jt }
}

/// Resolves a moving body against immovable field geometry. `mtv` moves
/// `body` out of `structure`; it is flipped if needed so that it points
/// toward `field_center`, which keeps bodies that crossed a boundary inside
/// the field.
pub fn resolve_structure(
    body: &mut Body,
    structure: &Collider,
    mtv: Vec2,
    field_center: Vec2,
    material: Material,
    config: &PhysicsConfig,
) -> Resolution {
    if !body.rigid().can_resolve() {
        log::debug!("skipping {:?}/structure pair: non-positive mass or inertia", body.kind());
        return Resolution::Skipped;
    }
    let mut mtv = mtv;
    if mtv.dot(field_center - body.position()) < 0.0 {
        mtv = -mtv;
    }
    let Some(normal) = unit_normal(mtv) else {
        return Resolution::Skipped;
    };

    // The structure does not move; the body takes the whole correction
    body.translate(mtv);

    let position = body.position();
    let contact = position - normal * body.collider().shape.extent_along(normal);
    let r = contact - position;

    let velocity_along_normal = body.rigid().velocity_at(contact).dot(normal);
    if velocity_along_normal >= 0.0 {
        return Resolution::PositionOnly;
    }

    let inv_mass = [body.rigid().inv_mass(), 0.0];
    let inv_inertia = [body.rigid().inv_inertia(), 0.0];
    let arms = [r, Vec2::ZERO];

    let denominator = effective_mass_inverse(normal, inv_mass, inv_inertia, arms);
    let j = (-(1.0 + material.restitution) * velocity_along_normal / denominator)
        .max(-config.max_impulse)
        .min(config.max_impulse);
    body.apply_impulse(normal * j, contact);

    let tangent = normal.perpendicular();
    let tangent_denominator = effective_mass_inverse(tangent, inv_mass, inv_inertia, arms);
    let max_friction = material.friction * j.abs();
    let jt = (-body.rigid().velocity_at(contact).dot(tangent) / tangent_denominator)
        .max(-max_friction)
        .min(max_friction);
    body.apply_impulse(tangent * jt, contact);

    log::trace!(
        "structure impulse on {:?}: normal={:.4} tangent={:.4} (structure kind {:?})",
        body.kind(),
        j,
        jt,
        structure.kind
    );
    Resolution::Impulse { normal: j, tangent: jt }
}

fn unit_normal(mtv: Vec2) -> Option<Vec2> {
    let magnitude = mtv.magnitude();
    (magnitude > 0.0 && magnitude.is_finite()).then(|| mtv / magnitude)
}
