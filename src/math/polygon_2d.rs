use super::{Point2, TOLERANCE};

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// The ring is given without a repeated closing point. Positive for
/// counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(ring: &[Point2]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += ring[i].x * ring[j].y - ring[j].x * ring[i].y;
    }
    sum * 0.5
}

/// Computes the absolute area of a closed polygon.
#[must_use]
pub fn area(ring: &[Point2]) -> f64 {
    signed_area(ring).abs()
}

/// Computes the area-weighted centroid of a closed polygon.
///
/// Falls back to the vertex mean for degenerate (zero-area) rings, so
/// collinear elements still get a well-defined sample position.
#[must_use]
pub fn centroid(ring: &[Point2]) -> Point2 {
    let n = ring.len();
    if n == 0 {
        return Point2::origin();
    }

    let a = signed_area(ring);
    if a.abs() < TOLERANCE {
        let mut cx = 0.0;
        let mut cy = 0.0;
        for p in ring {
            cx += p.x;
            cy += p.y;
        }
        #[allow(clippy::cast_precision_loss)]
        return Point2::new(cx / n as f64, cy / n as f64);
    }

    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        let cross = ring[i].x * ring[j].y - ring[j].x * ring[i].y;
        cx += (ring[i].x + ring[j].x) * cross;
        cy += (ring[i].y + ring[j].y) * cross;
    }
    Point2::new(cx / (6.0 * a), cy / (6.0 * a))
}

/// Tests whether a point lies inside or on the boundary of a closed polygon.
///
/// Boundary inclusion is checked explicitly against every edge before the
/// ray cast, so vertices and points on edges always count as inside.
#[must_use]
pub fn contains_point(ring: &[Point2], p: &Point2) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    for i in 0..n {
        let j = (i + 1) % n;
        if point_on_segment(&ring[i], &ring[j], p) {
            return true;
        }
    }

    // Standard crossing-number ray cast towards +x.
    let mut inside = false;
    for i in 0..n {
        let a = &ring[i];
        let b = &ring[(i + 1) % n];
        if (a.y > p.y) != (b.y > p.y) {
            let t = (p.y - a.y) / (b.y - a.y);
            let x = a.x + t * (b.x - a.x);
            if x > p.x {
                inside = !inside;
            }
        }
    }
    inside
}

/// Tests whether a point lies on the segment `a`-`b` within [`TOLERANCE`].
fn point_on_segment(a: &Point2, b: &Point2, p: &Point2) -> bool {
    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    if cross.abs() > TOLERANCE {
        return false;
    }
    p.x >= a.x.min(b.x) - TOLERANCE
        && p.x <= a.x.max(b.x) + TOLERANCE
        && p.y >= a.y.min(b.y) - TOLERANCE
        && p.y <= a.y.max(b.y) + TOLERANCE
}
