use glam::DVec2;

/// Euclidean distance between two points.
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

/// Angle (radians) of the ray from `from` towards `to`.
pub fn angle(from: DVec2, to: DVec2) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Point `length` units away from `origin` along `angle`.
pub fn point_at_offset(origin: DVec2, angle: f64, length: f64) -> DVec2 {
    origin + DVec2::new(angle.cos(), angle.sin()) * length
}
