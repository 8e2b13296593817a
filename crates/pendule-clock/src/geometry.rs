use pendule_engine::coords::Vec2;

/// Angle between the dial's zero ("12 o'clock") and the +x axis, in degrees.
const ZERO_OFFSET_DEG: f64 = 90.0;

/// A circle that maps dial angles to screen points.
///
/// Angles are in degrees, `0` points up and angles grow clockwise. Screen
/// coordinates grow downward, so "up" is `-y`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CircularPoint {
    center: Vec2,
    radius: f32,
}

impl CircularPoint {
    #[inline]
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Point on the circle at `angle_deg`.
    pub fn xy(&self, angle_deg: f64) -> Vec2 {
        let rad = (angle_deg.rem_euclid(360.0) - ZERO_OFFSET_DEG).to_radians();
        let r = self.radius as f64;
        Vec2::new(
            (self.center.x as f64 + r * rad.cos()) as f32,
            (self.center.y as f64 + r * rad.sin()) as f32,
        )
    }
}

/// The two ends of a hand or a scale mark at one angular position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EndpointPair {
    pub inner: Vec2,
    pub outer: Vec2,
}

impl EndpointPair {
    #[inline]
    pub fn translated(self, delta: Vec2) -> Self {
        Self {
            inner: self.inner + delta,
            outer: self.outer + delta,
        }
    }
}

/// Evenly discretizes a full lap into `n` endpoint pairs at `k * 360 / n` degrees.
pub fn build_pairs(inner: &CircularPoint, outer: &CircularPoint, n: u32) -> Vec<EndpointPair> {
    let step = 360.0 / n.max(1) as f64;
    (0..n)
        .map(|k| {
            let angle = k as f64 * step;
            EndpointPair {
                inner: inner.xy(angle),
                outer: outer.xy(angle),
            }
        })
        .collect()
}
