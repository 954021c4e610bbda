//! Narrow phase: one routine per unordered pair of shape kinds, plus the
//! dispatcher that routes every ordered pair to it.
//!
//! Convention: every routine returns the MTV that moves its *first*
//! argument out of the second. When the dispatcher swaps arguments to reuse
//! a routine it flips the result, so `test(a, b).mtv == -test(b, a).mtv`.

use super::manifold::CollisionResult;
use crate::math::vec2::Vec2;
use crate::shapes::rectangle::sign_or_positive;
use crate::shapes::{Circle, Group, LineSegment, Rectangle, Shape};

/// Rectangle-circle MTVs below this are numerical noise.
pub const RECT_CIRCLE_MIN_MTV: f64 = 1e-3;
/// Penetration depth under which a contact is considered tangential.
pub const SHALLOW_CONTACT_DEPTH: f64 = 1e-2;
/// Push-out multiplier for tangential rectangle-circle contacts.
pub const SHALLOW_CONTACT_BOOST: f64 = 1.5;
/// Overlap used for rectangle pairs in the corner-touching regime.
pub const CORNER_CONTACT_OVERLAP: f64 = 1e-2;

const DEGENERATE_DISTANCE: f64 = 1e-10;
const POINT_CONTACT_TOLERANCE: f64 = 1e-9;

/// Tests two shapes of any kind.
pub fn test(a: &Shape, b: &Shape) -> CollisionResult {
    use Shape::*;
    let result = match (a, b) {
        (Group(ga), Group(gb)) => group_group(ga, gb),
        (Group(g), other) => group_shape(g, other),
        (other, Group(g)) => group_shape(g, other).flipped(),

        (Point(p), Point(q)) => point_point(p.position, q.position),
        (Point(p), Circle(c)) => point_circle(p.position, c),
        (Circle(c), Point(p)) => point_circle(p.position, c).flipped(),
        (Point(p), Rectangle(r)) => point_rectangle(p.position, r),
        (Rectangle(r), Point(p)) => point_rectangle(p.position, r).flipped(),
        (Point(p), Line(l)) => point_line(p.position, l),
        (Line(l), Point(p)) => point_line(p.position, l).flipped(),

        (Circle(ca), Circle(cb)) => circle_circle(ca, cb),
        (Circle(c), Rectangle(r)) => circle_rectangle(c, r),
        (Rectangle(r), Circle(c)) => circle_rectangle(c, r).flipped(),
        (Circle(c), Line(l)) => circle_line(c, l),
        (Line(l), Circle(c)) => circle_line(c, l).flipped(),

        (Rectangle(ra), Rectangle(rb)) => rectangle_rectangle(ra, rb),
        (Rectangle(r), Line(l)) => rectangle_line(r, l),
        (Line(l), Rectangle(r)) => rectangle_line(r, l).flipped(),

        (Line(la), Line(lb)) => line_line(la, lb),
    };
    if result.collided {
        log::trace!("narrow phase hit: mtv={:?}", result.mtv);
    }
    result
}

/// Keeps the collided result with the smallest MTV.
fn keep_smallest(best: Option<CollisionResult>, candidate: CollisionResult) -> Option<CollisionResult> {
    if !candidate.collided {
        return best;
    }
    match best {
        Some(b) if b.mtv.magnitude_squared() <= candidate.mtv.magnitude_squared() => Some(b),
        _ => Some(candidate),
    }
}

fn aabbs_overlap(a: &Shape, b: &Shape) -> bool {
    match (a.aabb(), b.aabb()) {
        (Some(x), Some(y)) => x.overlaps(&y),
        _ => false,
    }
}

/// Group against a single (non-group) shape: AABB rejection, then the
/// smallest MTV among the colliding children.
pub fn group_shape(group: &Group, other: &Shape) -> CollisionResult {
    let Some(aabb) = group.aabb() else {
        return CollisionResult::NONE;
    };
    match other.aabb() {
        Some(other_aabb) if aabb.overlaps(&other_aabb) => {}
        _ => return CollisionResult::NONE,
    }
    group
        .children()
        .iter()
        .fold(None, |best, child| keep_smallest(best, test(child, other)))
        .unwrap_or(CollisionResult::NONE)
}

/// Group against group: AABB rejection, then every child pair, keeping the
/// smallest MTV.
pub fn group_group(a: &Group, b: &Group) -> CollisionResult {
    match (a.aabb(), b.aabb()) {
        (Some(x), Some(y)) if x.overlaps(&y) => {}
        _ => return CollisionResult::NONE,
    }
    let mut best = None;
    for child_a in a.children() {
        for child_b in b.children() {
            if !aabbs_overlap(child_a, child_b) {
                continue;
            }
            best = keep_smallest(best, test(child_a, child_b));
        }
    }
    best.unwrap_or(CollisionResult::NONE)
}

/// Coincident points touch with a zero MTV; anything else is apart.
pub fn point_point(p: Vec2, q: Vec2) -> CollisionResult {
    if p.distance_squared(q) <= POINT_CONTACT_TOLERANCE * POINT_CONTACT_TOLERANCE {
        CollisionResult::hit(Vec2::ZERO)
    } else {
        CollisionResult::NONE
    }
}

/// MTV pushes the point radially out of the circle.
pub fn point_circle(point: Vec2, circle: &Circle) -> CollisionResult {
    let offset = point - circle.center;
    let distance = offset.magnitude();
    if distance > circle.radius() {
        return CollisionResult::NONE;
    }
    let direction = if distance > DEGENERATE_DISTANCE { offset / distance } else { Vec2::X };
    CollisionResult::hit(direction * (circle.radius() - distance))
}

/// MTV pushes the point out through the nearest pair of edges.
pub fn point_rectangle(point: Vec2, rect: &Rectangle) -> CollisionResult {
    rect.point_push_out(point)
        .map(CollisionResult::hit)
        .unwrap_or(CollisionResult::NONE)
}

/// A point lying on the segment touches it with a zero MTV.
pub fn point_line(point: Vec2, line: &LineSegment) -> CollisionResult {
    let (closest, _) = line.closest_point(point);
    point_point(point, closest)
}

pub fn circle_circle(a: &Circle, b: &Circle) -> CollisionResult {
    let offset = a.center - b.center;
    let distance = offset.magnitude();
    let radii_sum = a.radius() + b.radius();
    if distance > radii_sum {
        return CollisionResult::NONE;
    }
    let direction = if distance > DEGENERATE_DISTANCE { offset / distance } else { Vec2::X };
    CollisionResult::hit(direction * (radii_sum - distance))
}

/// Circle against oriented rectangle, solved in rectangle-local space.
pub fn circle_rectangle(circle: &Circle, rect: &Rectangle) -> CollisionResult {
    let frame = rect.frame();
    let local = frame.apply_inverse(circle.center);
    let h = rect.half_extents();
    let closest = Vec2::new(local.x.clamp(-h.x, h.x), local.y.clamp(-h.y, h.y));
    let diff = local - closest;
    let dist_sq = diff.magnitude_squared();
    let radius = circle.radius();
    if dist_sq > radius * radius {
        return CollisionResult::NONE;
    }

    let (local_normal, mut depth) = if dist_sq > DEGENERATE_DISTANCE * DEGENERATE_DISTANCE {
        let distance = dist_sq.sqrt();
        (diff / distance, radius - distance)
    } else {
        // Center inside the rectangle: leave through the shallower side.
        let pen_x = h.x - local.x.abs();
        let pen_y = h.y - local.y.abs();
        if pen_x < pen_y {
            (Vec2::new(sign_or_positive(local.x), 0.0), pen_x + radius)
        } else {
            (Vec2::new(0.0, sign_or_positive(local.y)), pen_y + radius)
        }
    };
    if depth < SHALLOW_CONTACT_DEPTH {
        depth *= SHALLOW_CONTACT_BOOST;
    }

    let mtv = frame.rotate(local_normal * depth);
    if mtv.magnitude() < RECT_CIRCLE_MIN_MTV {
        return CollisionResult::NONE;
    }
    CollisionResult::hit(mtv)
}

/// Circle against segment via the closest point on the segment.
pub fn circle_line(circle: &Circle, line: &LineSegment) -> CollisionResult {
    let (closest, _) = line.closest_point(circle.center);
    let offset = circle.center - closest;
    let distance = offset.magnitude();
    if distance > circle.radius() {
        return CollisionResult::NONE;
    }
    let direction = if distance > DEGENERATE_DISTANCE { offset / distance } else { line.normal() };
    CollisionResult::hit(direction * (circle.radius() - distance))
}

/// Adds `axis` unless it is degenerate or parallel to one already present.
fn push_unique_axis(axes: &mut Vec<Vec2>, axis: Vec2) {
    if axis.magnitude_squared() < 1e-12 {
        return;
    }
    let axis = axis.normalize();
    if axes.iter().any(|existing| existing.cross(axis).abs() < 1e-9) {
        return;
    }
    axes.push(axis);
}

/// Push distance along `axis`, or `None` if the intervals are separated.
fn interval_overlap((min_a, max_a): (f64, f64), (min_b, max_b): (f64, f64)) -> Option<f64> {
    let overlap = (max_a - min_b).min(max_b - min_a);
    (overlap > 0.0).then_some(overlap)
}

/// Separating Axis Theorem over the edge normals of both rectangles.
pub fn rectangle_rectangle(a: &Rectangle, b: &Rectangle) -> CollisionResult {
    let mut axes = Vec::with_capacity(4);
    for axis in a.axes().into_iter().chain(b.axes()) {
        push_unique_axis(&mut axes, axis);
    }

    let mut min_overlap = f64::INFINITY;
    let mut mtv_axis = Vec2::ZERO;
    for axis in axes {
        let Some(overlap) = interval_overlap(a.project(axis), b.project(axis)) else {
            return CollisionResult::NONE;
        };
        if overlap < min_overlap {
            min_overlap = overlap;
            mtv_axis = axis;
        }
    }

    let center_delta = a.center() - b.center();
    if mtv_axis.dot(center_delta) < 0.0 {
        mtv_axis = -mtv_axis;
    }

    if min_overlap < SHALLOW_CONTACT_DEPTH {
        // Corner-touching regime: the min-overlap axis flips between
        // near-equal candidates, so push along the closest corner pair.
        let (corner_a, corner_b) = closest_corner_pair(a.corners(), b.corners());
        let mut direction = (corner_a - corner_b).normalize_or(mtv_axis);
        if direction.dot(center_delta) < 0.0 {
            direction = -direction;
        }
        return CollisionResult::hit(direction * CORNER_CONTACT_OVERLAP);
    }

    CollisionResult::hit(mtv_axis * min_overlap)
}

fn closest_corner_pair(a: &[Vec2; 4], b: &[Vec2; 4]) -> (Vec2, Vec2) {
    let mut best = (a[0], b[0]);
    let mut best_dist = f64::INFINITY;
    for ca in a {
        for cb in b {
            let d = ca.distance_squared(*cb);
            if d < best_dist {
                best_dist = d;
                best = (*ca, *cb);
            }
        }
    }
    best
}

/// Rectangle against segment: SAT over the rectangle's normals and the
/// segment normal for the MTV, confirmed by a direct intersection test.
pub fn rectangle_line(rect: &Rectangle, line: &LineSegment) -> CollisionResult {
    let mut axes = Vec::with_capacity(3);
    for axis in rect.axes() {
        push_unique_axis(&mut axes, axis);
    }
    push_unique_axis(&mut axes, line.normal());

    let mut min_overlap = f64::INFINITY;
    let mut mtv_axis = Vec2::ZERO;
    for axis in axes {
        let Some(overlap) = interval_overlap(rect.project(axis), line.project(axis)) else {
            return CollisionResult::NONE;
        };
        if overlap < min_overlap {
            min_overlap = overlap;
            mtv_axis = axis;
        }
    }

    // Grazing projections can survive SAT by rounding; require real contact.
    let touches = rect.contains_point(line.a)
        || rect.contains_point(line.b)
        || rect
            .edges()
            .iter()
            .any(|(e1, e2)| intersect_line_segments(*e1, *e2, line.a, line.b).is_some());
    if !touches {
        return CollisionResult::NONE;
    }

    let (reference, _) = line.closest_point(rect.center());
    if mtv_axis.dot(rect.center() - reference) < 0.0 {
        mtv_axis = -mtv_axis;
    }
    CollisionResult::hit(mtv_axis * min_overlap)
}

/// Intersection of two segments with the cross-product parametric form.
/// Returns the point and the parameters `(t, u)` on each segment.
/// Parallel segments never intersect, colinear overlaps included.
pub fn intersect_line_segments(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<(Vec2, f64, f64)> {
    let d1 = a2 - a1;
    let d2 = b2 - b1;
    let delta_start = b1 - a1;

    let denominator = d1.cross(d2);
    if denominator.abs() < 1e-10 {
        return None;
    }

    let t = delta_start.cross(d2) / denominator;
    let u = delta_start.cross(d1) / denominator;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some((a1 + d1 * t, t, u))
    } else {
        None
    }
}

/// Translation along `b`'s normal that brings the endpoint of `a` nearest
/// to `b`'s line onto it.
fn slide_onto(a: &LineSegment, b: &LineSegment) -> Vec2 {
    let normal = b.normal();
    let d_a = (a.a - b.a).dot(normal);
    let d_b = (a.b - b.a).dot(normal);
    let nearest = if d_a.abs() < d_b.abs() { d_a } else { d_b };
    normal * -nearest
}

/// Segment against segment. Of the two slides (`a` along `b`'s normal, or
/// `b` along `a`'s normal) the shorter one is kept.
pub fn line_line(a: &LineSegment, b: &LineSegment) -> CollisionResult {
    if intersect_line_segments(a.a, a.b, b.a, b.b).is_none() {
        return CollisionResult::NONE;
    }
    let move_a = slide_onto(a, b);
    let move_b = -slide_onto(b, a);
    if move_a.magnitude_squared() <= move_b.magnitude_squared() {
        CollisionResult::hit(move_a)
    } else {
        CollisionResult::hit(move_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Point;
    const EPSILON: f64 = 1e-9;

    fn circle(x: f64, y: f64, r: f64) -> Shape {
        Shape::Circle(Circle::new(Vec2::new(x, y), r).unwrap())
    }

    fn rect(x: f64, y: f64, w: f64, h: f64, angle: f64) -> Shape {
        Shape::Rectangle(Rectangle::new(Vec2::new(x, y), w, h, angle).unwrap())
    }

    fn line(ax: f64, ay: f64, bx: f64, by: f64) -> Shape {
        Shape::Line(LineSegment::new(Vec2::new(ax, ay), Vec2::new(bx, by)))
    }

    fn point(x: f64, y: f64) -> Shape {
        Shape::Point(Point::new(Vec2::new(x, y)))
    }

    fn assert_vec_close(actual: Vec2, expected: Vec2) {
        assert!((actual - expected).magnitude() < EPSILON, "{:?} != {:?}", actual, expected);
    }

    #[test]
    fn test_circle_circle_no_collision() {
        assert!(!test(&circle(0.0, 0.0, 1.0), &circle(3.0, 0.0, 1.0)).collided);
    }

    #[test]
    fn test_circle_circle_colliding() {
        let r = test(&circle(0.0, 0.0, 1.0), &circle(1.5, 0.0, 1.0));
        assert!(r.collided);
        // Pushes the first circle away from the second (-x)
        assert_vec_close(r.mtv, Vec2::new(-0.5, 0.0));
    }

    #[test]
    fn test_circle_circle_touching_counts() {
        let r = test(&circle(0.0, 0.0, 1.0), &circle(2.0, 0.0, 1.0));
        assert!(r.collided);
        assert!(r.mtv.magnitude() < EPSILON);
    }

    #[test]
    fn test_circle_circle_concentric_uses_fallback_axis() {
        let r = test(&circle(0.0, 0.0, 2.0), &circle(0.0, 0.0, 1.0));
        assert!(r.collided);
        assert_vec_close(r.mtv, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_circle_circle_symmetry() {
        let cases = [
            (circle(0.0, 0.0, 1.0), circle(1.2, 0.7, 0.8)),
            (circle(-3.0, 2.0, 2.5), circle(-1.0, 0.5, 1.0)),
            (circle(5.0, 5.0, 1.0), circle(9.0, 9.0, 1.0)),
        ];
        for (a, b) in &cases {
            let ab = test(a, b);
            let ba = test(b, a);
            assert_eq!(ab.collided, ba.collided);
            assert_vec_close(ab.mtv, -ba.mtv);
        }
    }

    #[test]
    fn test_point_circle() {
        let r = test(&point(1.5, 0.0), &circle(0.0, 0.0, 2.0));
        assert!(r.collided);
        assert_vec_close(r.mtv, Vec2::new(0.5, 0.0));

        let r = test(&circle(0.0, 0.0, 2.0), &point(1.5, 0.0));
        assert_vec_close(r.mtv, Vec2::new(-0.5, 0.0));

        let centered = test(&point(0.0, 0.0), &circle(0.0, 0.0, 2.0));
        assert!(centered.collided);
        assert!((centered.mtv.magnitude() - 2.0).abs() < EPSILON);

        assert!(!test(&point(3.0, 0.0), &circle(0.0, 0.0, 2.0)).collided);
    }

    #[test]
    fn test_point_rectangle_and_line() {
        let r = test(&point(1.8, 0.0), &rect(0.0, 0.0, 4.0, 4.0, 0.0));
        assert!(r.collided);
        assert_vec_close(r.mtv, Vec2::new(0.2, 0.0));
        let flipped = test(&rect(0.0, 0.0, 4.0, 4.0, 0.0), &point(1.8, 0.0));
        assert_vec_close(flipped.mtv, Vec2::new(-0.2, 0.0));

        assert!(test(&point(1.0, 0.0), &line(0.0, 0.0, 2.0, 0.0)).collided);
        assert!(!test(&point(1.0, 0.1), &line(0.0, 0.0, 2.0, 0.0)).collided);
        assert!(test(&point(1.0, 1.0), &point(1.0, 1.0)).collided);
        assert!(!test(&point(1.0, 1.0), &point(1.0, 1.5)).collided);
    }

    #[test]
    fn test_circle_line_collision_mid() {
        let r = test(&circle(0.0, 0.0, 1.0), &line(-2.0, 0.5, 2.0, 0.5));
        assert!(r.collided);
        // Circle pushed away from the line (-y) by radius - distance
        assert_vec_close(r.mtv, Vec2::new(0.0, -0.5));
    }

    #[test]
    fn test_circle_line_collision_endpoint() {
        let r = test(&circle(0.5, 0.5, 1.0), &line(1.0, 0.0, 3.0, 0.0));
        assert!(r.collided);
        let offset = Vec2::new(-0.5, 0.5);
        let expected = offset.normalize() * (1.0 - offset.magnitude());
        assert_vec_close(r.mtv, expected);
    }

    #[test]
    fn test_circle_line_center_on_segment_uses_normal() {
        let r = test(&circle(1.0, 0.0, 1.0), &line(0.0, 0.0, 2.0, 0.0));
        assert!(r.collided);
        assert_vec_close(r.mtv, Vec2::new(0.0, 1.0));
        let r = test(&line(0.0, 0.0, 2.0, 0.0), &circle(1.0, 0.0, 1.0));
        assert_vec_close(r.mtv, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_circle_line_no_collision() {
        assert!(!test(&circle(0.0, 0.0, 1.0), &line(2.0, 1.0, 4.0, 1.0)).collided);
    }

    #[test]
    fn test_circle_rectangle_side_contact() {
        // Circle overlapping the left face of an axis-aligned rectangle
        let r = test(&circle(4.5, 0.0, 1.0), &rect(10.0, 0.0, 10.0, 4.0, 0.0));
        assert!(r.collided);
        assert_vec_close(r.mtv, Vec2::new(-0.5, 0.0));
        let r = test(&rect(10.0, 0.0, 10.0, 4.0, 0.0), &circle(4.5, 0.0, 1.0));
        assert_vec_close(r.mtv, Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_circle_rectangle_rotated() {
        // Rectangle rotated 90 degrees: its width now spans y
        let r = test(&circle(0.0, 5.5, 1.0), &rect(0.0, 0.0, 10.0, 2.0, 90.0));
        assert!(r.collided);
        assert_vec_close(r.mtv, Vec2::new(0.0, 0.5));
    }

    #[test]
    fn test_circle_rectangle_center_inside() {
        let r = test(&circle(4.0, 0.0, 1.0), &rect(0.0, 0.0, 10.0, 4.0, 0.0));
        assert!(r.collided);
        // Leaves through the right face: penetration 1 + radius 1
        assert_vec_close(r.mtv, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_circle_rectangle_shallow_contact_is_boosted() {
        let r = test(&circle(-5.995, 0.0, 1.0), &rect(0.0, 0.0, 10.0, 4.0, 0.0));
        assert!(r.collided);
        assert_vec_close(r.mtv, Vec2::new(-0.005 * SHALLOW_CONTACT_BOOST, 0.0));
    }

    #[test]
    fn test_circle_rectangle_noise_floor() {
        // Depth 5e-4 boosted to 7.5e-4, still under the noise floor
        let r = test(&circle(-5.9995, 0.0, 1.0), &rect(0.0, 0.0, 10.0, 4.0, 0.0));
        assert!(!r.collided);
        assert!(!test(&circle(-7.0, 0.0, 1.0), &rect(0.0, 0.0, 10.0, 4.0, 0.0)).collided);
    }

    #[test]
    fn test_rectangle_rectangle_separated() {
        assert!(!test(&rect(0.0, 0.0, 2.0, 2.0, 0.0), &rect(3.0, 0.0, 2.0, 2.0, 0.0)).collided);
        // Rotated squares whose AABBs overlap but shapes do not
        assert!(!test(&rect(0.0, 0.0, 2.0, 2.0, 45.0), &rect(2.3, 2.3, 2.0, 2.0, 45.0)).collided);
    }

    #[test]
    fn test_rectangle_rectangle_min_axis() {
        let r = test(&rect(0.0, 0.0, 4.0, 4.0, 0.0), &rect(3.5, 0.5, 4.0, 4.0, 0.0));
        assert!(r.collided);
        // x overlap 0.5 < y overlap 3.5, pushes A towards -x
        assert_vec_close(r.mtv, Vec2::new(-0.5, 0.0));
        let rb = test(&rect(3.5, 0.5, 4.0, 4.0, 0.0), &rect(0.0, 0.0, 4.0, 4.0, 0.0));
        assert_vec_close(rb.mtv, Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_rectangle_rectangle_corner_regime() {
        // Corners barely overlapping on both axes
        let a = rect(0.0, 0.0, 2.0, 2.0, 0.0);
        let b = rect(1.995, 1.995, 2.0, 2.0, 0.0);
        let r = test(&a, &b);
        assert!(r.collided);
        assert!((r.mtv.magnitude() - CORNER_CONTACT_OVERLAP).abs() < EPSILON);
        assert!(r.mtv.x < 0.0 && r.mtv.y < 0.0);
    }

    #[test]
    fn test_rectangle_line_crossing_boundary() {
        // Robot-sized box sunk 1 unit below a horizontal wall at y=0
        let r = test(&rect(50.0, 3.0, 8.0, 8.0, 0.0), &line(0.0, 0.0, 100.0, 0.0));
        assert!(r.collided);
        assert_vec_close(r.mtv, Vec2::new(0.0, 1.0));
        let flipped = test(&line(0.0, 0.0, 100.0, 0.0), &rect(50.0, 3.0, 8.0, 8.0, 0.0));
        assert_vec_close(flipped.mtv, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_rectangle_line_diagonal_beside_corner() {
        // Both rectangle axes overlap; only the segment normal separates.
        let r = test(&rect(0.0, 0.0, 2.0, 2.0, 0.0), &line(0.5, 2.5, 2.5, 0.5));
        assert!(!r.collided);
    }

    #[test]
    fn test_rectangle_line_fully_inside() {
        let r = test(&rect(0.0, 0.0, 10.0, 10.0, 0.0), &line(-1.0, 0.0, 1.0, 0.0));
        assert!(r.collided);
    }

    #[test]
    fn test_intersect_line_segments_cases() {
        let (p, t, u) = intersect_line_segments(
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(2.0, 0.0),
        )
        .unwrap();
        assert_vec_close(p, Vec2::new(1.0, 1.0));
        assert!((t - 0.5).abs() < EPSILON);
        assert!((u - 0.5).abs() < EPSILON);

        // Outside segment A (t = 1.5)
        assert!(intersect_line_segments(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 2.0),
            Vec2::new(3.0, 0.0)
        )
        .is_none());

        // Touching endpoints count
        assert!(intersect_line_segments(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(2.0, 0.0)
        )
        .is_some());
    }

    #[test]
    fn test_line_line_colinear_overlap_is_not_a_collision() {
        // Known limitation: parallel segments never collide
        assert!(!test(&line(0.0, 0.0, 2.0, 0.0), &line(1.0, 0.0, 3.0, 0.0)).collided);
        assert!(!test(&line(0.0, 0.0, 1.0, 0.0), &line(0.0, 1.0, 1.0, 1.0)).collided);
    }

    #[test]
    fn test_line_line_crossing() {
        let a = line(0.0, -1.0, 0.0, 3.0);
        let b = line(-2.0, 0.0, 2.0, 0.0);
        let r = test(&a, &b);
        assert!(r.collided);
        // Lower endpoint is 1 below b: push a up by 1
        assert_vec_close(r.mtv, Vec2::new(0.0, 1.0));
        let r = test(&b, &a);
        assert_vec_close(r.mtv, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_group_vs_shape_keeps_smallest_mtv() {
        let group = Shape::Group(Group::new(vec![circle(0.0, 0.0, 1.0), circle(1.0, 0.0, 1.0)]));
        let query = circle(1.8, 0.0, 1.0);
        let r = test(&group, &query);
        assert!(r.collided);
        // First child overlaps 0.2, second 1.2: keep 0.2
        assert_vec_close(r.mtv, Vec2::new(-0.2, 0.0));
        let flipped = test(&query, &group);
        assert_vec_close(flipped.mtv, Vec2::new(0.2, 0.0));
    }

    #[test]
    fn test_group_vs_group() {
        let a = Shape::Group(Group::new(vec![circle(0.0, 0.0, 1.0), rect(0.0, 3.0, 2.0, 2.0, 0.0)]));
        let b = Shape::Group(Group::new(vec![circle(1.8, 0.0, 1.0), circle(0.0, 4.5, 1.0)]));
        let r = test(&a, &b);
        assert!(r.collided);
        // circle-circle overlap 0.2, rect-circle overlap 0.5: keep 0.2
        assert_vec_close(r.mtv, Vec2::new(-0.2, 0.0));

        let far = Shape::Group(Group::new(vec![circle(50.0, 50.0, 1.0)]));
        assert!(!test(&a, &far).collided);
        let empty = Shape::Group(Group::new(Vec::new()));
        assert!(!test(&a, &empty).collided);
    }

    #[test]
    fn test_every_ordered_pair_is_defined_and_antisymmetric() {
        let shapes = vec![
            point(0.5, 0.0),
            circle(0.0, 0.0, 1.0),
            rect(0.3, 0.2, 2.0, 1.5, 20.0),
            line(-1.0, -0.5, 1.0, 0.7),
            Shape::Group(Group::new(vec![circle(0.2, 0.1, 0.7)])),
        ];
        // Distinct pairs only: a shape against itself has coincident centers,
        // and the degenerate fallback direction is the same in both orders.
        for (i, a) in shapes.iter().enumerate() {
            for (j, b) in shapes.iter().enumerate() {
                if i == j {
                    continue;
                }
                let ab = test(a, b);
                let ba = test(b, a);
                assert_eq!(ab.collided, ba.collided, "{:?} vs {:?}", a, b);
                if ab.collided {
                    assert_vec_close(ab.mtv, -ba.mtv);
                }
            }
        }
    }

    #[test]
    fn test_coincident_shapes_use_fallback_direction() {
        let c = circle(3.0, 3.0, 1.0);
        let r = test(&c, &c);
        assert!(r.collided);
        assert_vec_close(r.mtv, Vec2::new(2.0, 0.0));

        let square = rect(1.0, 1.0, 2.0, 2.0, 0.0);
        let r = test(&square, &square);
        assert!(r.collided);
        assert!(r.mtv.magnitude() > 0.0);
    }
}
