//! Friendly-fire shadow cast by an ally standing near the line of fire.

use tk_core::{Circle, Line, Point};

/// Risk in `[0, 1]` that a shot from `shooter` at `target` passes close to
/// `ally`.
///
/// The ally's circle is grown by `blast` (the projectile's explosion radius,
/// or its own radius for kinds that do not explode).  The two tangents from
/// `target` to that circle bound a cone; behind the tangent points the cone is
/// the region where the ally shields the target.  Inside it the risk is
/// `min(d1, d2) / mean(d1, d2)` for the shooter's distances to the tangent
/// lines, so `1` on the axis and `0` on either edge.
pub fn tangent_shadow(shooter: Point, target: Point, ally: &Circle, blast: f64) -> f64 {
    let radius = ally.radius + blast;
    let axis = ally.position - target;
    let distance = axis.norm();
    if distance <= radius {
        return 1.0;
    }

    let half_angle = (radius / distance).asin();
    let to_shooter = shooter - target;
    let reach = to_shooter.norm();
    if reach == 0.0 || axis.cos(to_shooter) < half_angle.cos() {
        return 0.0;
    }
    let tangent_length = (distance * distance - radius * radius).sqrt();
    if reach < tangent_length {
        return 0.0;
    }

    let direction = axis.normalized();
    let left = Line::new(target, target + direction.rotated(half_angle));
    let right = Line::new(target, target + direction.rotated(-half_angle));
    let d1 = left.distance(shooter);
    let d2 = right.distance(shooter);
    let mean = (d1 + d2) * 0.5;
    if mean == 0.0 {
        return 1.0;
    }
    (d1.min(d2) / mean).clamp(0.0, 1.0)
}
