use std::time::Duration;

use pendule_engine::coords::Vec2;
use pendule_engine::paint::Color;

use crate::error::{ClockError, ClockResult};

/// Which hand a [`HandSpec`] describes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum HandKind {
    Hour,
    Minute,
    Second,
}

impl HandKind {
    /// Seconds per full lap of the dial.
    pub const fn lap_seconds(self) -> u32 {
        match self {
            HandKind::Hour => 12 * 60 * 60,
            HandKind::Minute => 60 * 60,
            HandKind::Second => 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HandSpec {
    pub kind: HandKind,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub width: f32,
    pub color: Color,
    /// Discrete positions per lap; one step per tick.
    pub period: u32,
}

impl HandSpec {
    /// A hand that advances one position per second of its lap.
    pub fn new(kind: HandKind, inner_radius: f32, outer_radius: f32, width: f32, color: Color) -> Self {
        Self {
            kind,
            inner_radius,
            outer_radius,
            width,
            color,
            period: kind.lap_seconds(),
        }
    }
}

/// A ring of evenly spaced graduation marks.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleSpec {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub width: f32,
    pub color: Color,
    pub divisions: u32,
}

/// Center dot drawn above the hands.
#[derive(Debug, Clone, PartialEq)]
pub struct PinSpec {
    pub radius: f32,
    pub color: Color,
}

/// Every visual and timing constant of the clock.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockConfig {
    /// Dial center in logical pixels, before any drag.
    pub center: Vec2,
    /// Drawn in order; later hands cover earlier ones.
    pub hands: Vec<HandSpec>,
    pub scales: Vec<ScaleSpec>,
    pub pin: PinSpec,
    /// Ticks between wall-clock resyncs. Tick 0 always resyncs.
    pub sync_interval_ticks: u64,
    pub tick_period: Duration,
}

impl Default for ClockConfig {
    fn default() -> Self {
        let ink = Color::from_srgb_u8(0xf2, 0xf2, 0xf2, 0xe6);
        let red = Color::from_srgb_u8(0xe0, 0x3c, 0x31, 0xff);

        Self {
            center: Vec2::new(160.0, 160.0),
            hands: vec![
                HandSpec::new(HandKind::Hour, 0.0, 60.0, 6.0, ink),
                HandSpec::new(HandKind::Minute, 0.0, 90.0, 4.0, ink),
                HandSpec::new(HandKind::Second, 0.0, 105.0, 2.0, red),
            ],
            scales: vec![
                ScaleSpec {
                    inner_radius: 112.0,
                    outer_radius: 120.0,
                    width: 1.5,
                    color: ink,
                    divisions: 60,
                },
                ScaleSpec {
                    inner_radius: 102.0,
                    outer_radius: 120.0,
                    width: 4.0,
                    color: ink,
                    divisions: 12,
                },
            ],
            pin: PinSpec { radius: 5.0, color: red },
            sync_interval_ticks: 300,
            tick_period: Duration::from_secs(1),
        }
    }
}

impl ClockConfig {
    /// Rejects constants that cannot produce a drawable clock.
    pub fn validate(&self) -> ClockResult<()> {
        if !self.center.is_finite() {
            return Err(setup("center must be finite"));
        }
        if self.sync_interval_ticks == 0 {
            return Err(setup("sync interval must be at least one tick"));
        }
        if self.tick_period.is_zero() {
            return Err(setup("tick period must be non-zero"));
        }

        for hand in &self.hands {
            let what = format!("{:?} hand", hand.kind);
            check_ring(&what, hand.inner_radius, hand.outer_radius)?;
            check_extent(&format!("{what} width"), hand.width)?;
            if hand.period == 0 {
                return Err(setup(format!("{what} period must be non-zero")));
            }
        }

        for (i, scale) in self.scales.iter().enumerate() {
            let what = format!("scale #{i}");
            check_ring(&what, scale.inner_radius, scale.outer_radius)?;
            check_extent(&format!("{what} width"), scale.width)?;
            if scale.divisions == 0 {
                return Err(setup(format!("{what} needs at least one division")));
            }
        }

        check_extent("pin radius", self.pin.radius)
    }
}

fn setup(msg: impl Into<String>) -> ClockError {
    ClockError::Setup(msg.into())
}

fn check_extent(what: &str, v: f32) -> ClockResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(setup(format!("{what} must be finite and non-negative, got {v}")))
    }
}

fn check_ring(what: &str, inner: f32, outer: f32) -> ClockResult<()> {
    check_extent(&format!("{what} inner radius"), inner)?;
    check_extent(&format!("{what} outer radius"), outer)?;
    if inner > outer {
        return Err(setup(format!("{what} inner radius {inner} exceeds outer radius {outer}")));
    }
    Ok(())
}
