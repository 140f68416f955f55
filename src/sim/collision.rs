//! Stateless collision math
//!
//! Pure geometric predicates shared by the physics world and the game
//! loops' manual overlap checks. Degenerate input yields `None`/`false`,
//! never a panic.

use glam::Vec2;

/// Axis-aligned rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// A circle by center and radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

/// Per-axis overlap between two intersecting rectangles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    pub x: f32,
    pub y: f32,
}

/// Nearest intersection of a segment with a rectangle edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    pub point: Vec2,
    pub distance: f32,
}

/// Two boxes intersect iff they overlap on both axes
pub fn aabbs_intersect(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Per-axis overlap of two boxes, `None` when they don't intersect
pub fn aabb_overlap(a: &Rect, b: &Rect) -> Option<Overlap> {
    if !aabbs_intersect(a, b) {
        return None;
    }
    Some(Overlap {
        x: a.right().min(b.right()) - a.x.max(b.x),
        y: a.bottom().min(b.bottom()) - a.y.max(b.y),
    })
}

pub fn circles_intersect(a: &Circle, b: &Circle) -> bool {
    a.center.distance(b.center) < a.radius + b.radius
}

pub fn point_in_rect(point: Vec2, rect: &Rect) -> bool {
    point.x >= rect.x && point.x <= rect.right() && point.y >= rect.y && point.y <= rect.bottom()
}

pub fn point_in_circle(point: Vec2, circle: &Circle) -> bool {
    point.distance(circle.center) <= circle.radius
}

/// Circle vs rectangle via the closest point on the rectangle
pub fn circle_vs_rect(circle: &Circle, rect: &Rect) -> bool {
    let closest = Vec2::new(
        circle.center.x.clamp(rect.x, rect.right()),
        circle.center.y.clamp(rect.y, rect.bottom()),
    );
    circle.center.distance_squared(closest) < circle.radius * circle.radius
}

/// Parametric segment-segment intersection
///
/// Returns `None` when the segments are parallel (determinant within 1e-4
/// of zero) or when the intersection falls outside either segment.
pub fn segment_intersection(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<Vec2> {
    let denom = (p4.y - p3.y) * (p2.x - p1.x) - (p4.x - p3.x) * (p2.y - p1.y);
    if denom.abs() < 1e-4 {
        return None;
    }

    let ua = ((p4.x - p3.x) * (p1.y - p3.y) - (p4.y - p3.y) * (p1.x - p3.x)) / denom;
    let ub = ((p2.x - p1.x) * (p1.y - p3.y) - (p2.y - p1.y) * (p1.x - p3.x)) / denom;

    if (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub) {
        return Some(p1 + (p2 - p1) * ua);
    }
    None
}

/// Nearest intersection of a segment with any of the four rectangle edges,
/// measured from the segment start
pub fn segment_vs_rect(start: Vec2, end: Vec2, rect: &Rect) -> Option<SegmentHit> {
    let tl = Vec2::new(rect.x, rect.y);
    let tr = Vec2::new(rect.right(), rect.y);
    let bl = Vec2::new(rect.x, rect.bottom());
    let br = Vec2::new(rect.right(), rect.bottom());

    let edges = [(tl, bl), (tr, br), (tl, tr), (bl, br)];

    let mut best: Option<SegmentHit> = None;
    for (a, b) in edges {
        if let Some(point) = segment_intersection(start, end, a, b) {
            let distance = start.distance(point);
            if best.is_none_or(|hit| distance < hit.distance) {
                best = Some(SegmentHit { point, distance });
            }
        }
    }
    best
}

/// Separating-axis test over all edge normals of both convex polygons
///
/// Returns `true` when the polygons intersect. Reserved for the genres
/// with non-axis-aligned shapes; the platformer only uses boxes.
pub fn separating_axis(poly_a: &[Vec2], poly_b: &[Vec2]) -> bool {
    if poly_a.is_empty() || poly_b.is_empty() {
        return false;
    }

    for polygon in [poly_a, poly_b] {
        for i in 0..polygon.len() {
            let j = (i + 1) % polygon.len();
            let edge = polygon[j] - polygon[i];
            let normal = Vec2::new(-edge.y, edge.x);

            let (min_a, max_a) = project_polygon(poly_a, normal);
            let (min_b, max_b) = project_polygon(poly_b, normal);

            if max_a < min_b || max_b < min_a {
                return false;
            }
        }
    }
    true
}

fn project_polygon(polygon: &[Vec2], axis: Vec2) -> (f32, f32) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for point in polygon {
        let projection = point.dot(axis);
        min = min.min(projection);
        max = max.max(projection);
    }
    (min, max)
}

/// Point-in-polygon via the ray-crossing parity test
pub fn point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
    let mut inside = false;
    let mut j = polygon.len().wrapping_sub(1);
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if ((pi.y > point.y) != (pj.y > point.y))
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Axis-aligned bounding box of a polygon
pub fn polygon_bounds(polygon: &[Vec2]) -> Rect {
    let mut min = Vec2::splat(f32::INFINITY);
    let mut max = Vec2::splat(f32::NEG_INFINITY);
    for point in polygon {
        min = min.min(*point);
        max = max.max(*point);
    }
    Rect::new(min.x, min.y, max.x - min.x, max.y - min.y)
}
