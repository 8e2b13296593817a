//! The 1 Hz clock loop body: resync, erase, step + draw, raise.
//!
//! Pacing is not done here. The caller runs [`Controller::tick`] once per
//! [`ClockConfig::tick_period`] and sleeps (or waits on its event loop) in
//! between.

use std::time::Duration;

use pendule_engine::scene::Tags;

use crate::config::{ClockConfig, HandKind};
use crate::error::ClockResult;
use crate::hand::Hand;
use crate::scale::{Pin, Scale};
use crate::surface::RenderSurface;
use crate::time_source::TimeSource;

/// Outcome of one successful tick.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TickReport {
    /// The hands were re-aligned to the wall clock before stepping.
    pub resynced: bool,
    /// Zero-based index of the tick that just ran.
    pub tick_index: u64,
}

/// Owns the clock geometry and drives it one tick at a time.
pub struct Controller<T> {
    time_source: T,
    hands: Vec<Hand>,
    scales: Vec<Scale>,
    pin: Pin,
    sync_interval: u64,
    tick_period: Duration,
    total_ticks: u64,
}

impl<T: TimeSource> Controller<T> {
    /// Validates `config` and precomputes every hand and scale position.
    pub fn new(config: ClockConfig, time_source: T) -> ClockResult<Self> {
        config.validate()?;

        let center = config.center;
        let hands = config
            .hands
            .iter()
            .map(|spec| Hand::new(spec, center))
            .collect::<ClockResult<Vec<_>>>()?;
        let scales = config.scales.iter().map(|spec| Scale::new(spec, center)).collect();
        let pin = Pin::new(&config.pin, center);

        log::debug!(
            "clock built: {} hands, {} scales, resync every {} ticks",
            config.hands.len(),
            config.scales.len(),
            config.sync_interval_ticks
        );

        Ok(Self {
            time_source,
            hands,
            scales,
            pin,
            sync_interval: config.sync_interval_ticks,
            tick_period: config.tick_period,
            total_ticks: 0,
        })
    }

    #[inline]
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// First hand of the given kind.
    pub fn hand(&self, kind: HandKind) -> Option<&Hand> {
        self.hands.iter().find(|h| h.kind() == kind)
    }

    #[inline]
    pub fn scales(&self) -> &[Scale] {
        &self.scales
    }

    #[inline]
    pub fn pin(&self) -> &Pin {
        &self.pin
    }

    #[inline]
    pub fn time_source(&self) -> &T {
        &self.time_source
    }

    #[inline]
    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Ticks completed so far.
    #[inline]
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Draws the graduations and the pin. Call once, before the first tick.
    pub fn draw_static(&self, surface: &mut dyn RenderSurface) -> ClockResult<()> {
        for scale in &self.scales {
            scale.draw(surface)?;
        }
        self.pin.draw(surface)?;
        Ok(())
    }

    /// Runs one tick.
    ///
    /// On a surface failure the tick is abandoned midway and the tick counter
    /// is left unchanged; the caller is expected to stop ticking.
    pub fn tick(&mut self, surface: &mut dyn RenderSurface) -> ClockResult<TickReport> {
        let tick_index = self.total_ticks;

        let resynced = tick_index % self.sync_interval == 0 && self.resync();

        surface.erase_by_tag(Tags::REMOVABLE)?;
        for hand in &mut self.hands {
            hand.step();
            hand.draw(surface)?;
        }
        surface.raise_by_tag(Tags::ALWAYS_TOP)?;

        self.total_ticks += 1;

        Ok(TickReport { resynced, tick_index })
    }

    /// Re-aligns every hand to the wall clock. Returns `false` (hands untouched)
    /// when the clock cannot be read.
    fn resync(&mut self) -> bool {
        match self.time_source.seconds_of_day() {
            Ok(now) => {
                for hand in &mut self.hands {
                    hand.setup(now as u64);
                }
                log::debug!("resynced at tick {} to {now}s of day", self.total_ticks);
                true
            }
            Err(err) => {
                log::warn!("skipping resync at tick {}: {err}", self.total_ticks);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pendule_engine::coords::Vec2;
    use pendule_engine::paint::Color;
    use pendule_engine::scene::{Handle, Scene};

    use super::*;
    use crate::error::{ClockError, SurfaceError, TimeSourceError};
    use crate::hand::HAND_TAGS;
    use crate::scale::PIN_TAGS;
    use crate::time_source::FixedTimeSource;

    /// Fixed wall clock that counts how often it is read.
    struct CountingTimeSource {
        now: u32,
        reads: Cell<u32>,
    }

    impl CountingTimeSource {
        fn new(now: u32) -> Self {
            Self { now, reads: Cell::new(0) }
        }
    }

    impl TimeSource for CountingTimeSource {
        fn seconds_of_day(&self) -> Result<u32, TimeSourceError> {
            self.reads.set(self.reads.get() + 1);
            Ok(self.now)
        }
    }

    struct BrokenTimeSource;

    impl TimeSource for BrokenTimeSource {
        fn seconds_of_day(&self) -> Result<u32, TimeSourceError> {
            Err(TimeSourceError::Unavailable("no clock".to_string()))
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Op {
        Line(Tags),
        Dot(Tags),
        Erase(Tags),
        Raise(Tags),
        Move(Tags),
    }

    /// Scene wrapper that logs every surface call.
    #[derive(Default)]
    struct RecordingSurface {
        scene: Scene,
        ops: Vec<Op>,
    }

    impl RenderSurface for RecordingSurface {
        fn draw_line(&mut self, p0: Vec2, p1: Vec2, width: f32, color: Color, tags: Tags) -> Result<Handle, SurfaceError> {
            self.ops.push(Op::Line(tags));
            RenderSurface::draw_line(&mut self.scene, p0, p1, width, color, tags)
        }

        fn draw_dot(&mut self, center: Vec2, radius: f32, color: Color, tags: Tags) -> Result<Handle, SurfaceError> {
            self.ops.push(Op::Dot(tags));
            RenderSurface::draw_dot(&mut self.scene, center, radius, color, tags)
        }

        fn erase_by_tag(&mut self, tags: Tags) -> Result<(), SurfaceError> {
            self.ops.push(Op::Erase(tags));
            RenderSurface::erase_by_tag(&mut self.scene, tags)
        }

        fn raise_by_tag(&mut self, tags: Tags) -> Result<(), SurfaceError> {
            self.ops.push(Op::Raise(tags));
            RenderSurface::raise_by_tag(&mut self.scene, tags)
        }

        fn move_by_tag(&mut self, tags: Tags, delta: Vec2) -> Result<(), SurfaceError> {
            self.ops.push(Op::Move(tags));
            RenderSurface::move_by_tag(&mut self.scene, tags, delta)
        }

        fn pan_offset(&self) -> Vec2 {
            self.scene.pan_offset()
        }

        fn set_pan_offset(&mut self, pan: Vec2) {
            self.scene.set_pan_offset(pan);
        }
    }

    fn controller_at(now: u32) -> Controller<FixedTimeSource> {
        Controller::new(ClockConfig::default(), FixedTimeSource::new(now)).unwrap()
    }

    // ── new ───────────────────────────────────────────────────────────────

    #[test]
    fn new_rejects_invalid_config() {
        let mut cfg = ClockConfig::default();
        cfg.hands[1].period = 0;
        let res = Controller::new(cfg, FixedTimeSource::new(0));
        assert!(matches!(res, Err(ClockError::Setup(_))));
    }

    #[test]
    fn new_builds_every_hand_at_step_zero() {
        let c = controller_at(0);
        assert_eq!(c.hands().len(), 3);
        assert!(c.hands().iter().all(|h| h.current_step() == 0));
        assert_eq!(c.hand(HandKind::Hour).map(Hand::period), Some(43200));
        assert_eq!(c.total_ticks(), 0);
    }

    // ── draw_static ───────────────────────────────────────────────────────

    #[test]
    fn draw_static_draws_scales_then_pin() {
        let c = controller_at(0);
        let mut surface = RecordingSurface::default();
        c.draw_static(&mut surface).unwrap();

        let marks: usize = c.scales().iter().map(|s| s.marks().len()).sum();
        assert_eq!(surface.scene.len(), marks + 1);
        assert_eq!(surface.ops.last(), Some(&Op::Dot(PIN_TAGS)));
    }

    // ── tick ──────────────────────────────────────────────────────────────

    #[test]
    fn first_tick_resyncs_then_steps() {
        // 10:08:42
        let mut c = controller_at(36_522);
        let mut surface = RecordingSurface::default();

        let report = c.tick(&mut surface).unwrap();
        assert_eq!(report, TickReport { resynced: true, tick_index: 0 });

        assert_eq!(c.hand(HandKind::Second).unwrap().current_step(), 43);
        assert_eq!(c.hand(HandKind::Minute).unwrap().current_step(), 8 * 60 + 43);
        assert_eq!(c.hand(HandKind::Hour).unwrap().current_step(), 36_523);
        assert_eq!(c.total_ticks(), 1);
    }

    #[test]
    fn sync_interval_plus_one_ticks_resync_once() {
        let mut c = Controller::new(ClockConfig::default(), CountingTimeSource::new(0)).unwrap();
        let mut surface = RecordingSurface::default();

        // Startup tick (index 0) always resyncs.
        assert!(c.tick(&mut surface).unwrap().resynced);
        let minute_before = c.hand(HandKind::Minute).unwrap().current_step();
        surface.ops.clear();

        let resynced_at: Vec<u64> = (0..301)
            .map(|_| c.tick(&mut surface).unwrap())
            .filter(|r| r.resynced)
            .map(|r| r.tick_index)
            .collect();

        assert_eq!(resynced_at, vec![300]);
        assert_eq!(c.time_source().reads.get(), 2);
        assert_eq!(c.total_ticks(), 302);

        // Each hand is stepped, then drawn, exactly once per tick.
        let hand_draws = surface.ops.iter().filter(|op| **op == Op::Line(HAND_TAGS)).count();
        assert_eq!(hand_draws, 3 * 301);

        // Tick 300 pulled the hands back to 0 s, then every tick stepped once.
        assert_eq!(minute_before, 1);
        assert_eq!(c.hand(HandKind::Minute).unwrap().current_step(), 2);
        assert_eq!(c.hand(HandKind::Second).unwrap().current_step(), 2);
    }

    #[test]
    fn resync_is_due_on_tick_zero_and_each_interval_multiple() {
        let mut c = Controller::new(ClockConfig::default(), CountingTimeSource::new(0)).unwrap();
        let mut surface = RecordingSurface::default();

        let resynced_at: Vec<u64> = (0..601)
            .map(|_| c.tick(&mut surface).unwrap())
            .filter(|r| r.resynced)
            .map(|r| r.tick_index)
            .collect();

        assert_eq!(resynced_at, vec![0, 300, 600]);
        assert_eq!(c.time_source().reads.get(), 3);
    }

    #[test]
    fn resync_happens_on_every_interval_boundary() {
        let mut cfg = ClockConfig::default();
        cfg.sync_interval_ticks = 3;
        let mut c = Controller::new(cfg, FixedTimeSource::new(0)).unwrap();
        let mut surface = RecordingSurface::default();

        let pattern: Vec<bool> = (0..7).map(|_| c.tick(&mut surface).unwrap().resynced).collect();
        assert_eq!(pattern, vec![true, false, false, true, false, false, true]);

        // The tick-6 resync pulled the hands back to 0 s before stepping.
        assert_eq!(c.hand(HandKind::Second).unwrap().current_step(), 1);
    }

    #[test]
    fn erase_precedes_draw_and_pin_is_raised_last() {
        let mut c = controller_at(0);
        let mut surface = RecordingSurface::default();
        c.draw_static(&mut surface).unwrap();
        surface.ops.clear();

        c.tick(&mut surface).unwrap();

        let hand_tags = crate::hand::HAND_TAGS;
        assert_eq!(
            surface.ops,
            vec![
                Op::Erase(Tags::REMOVABLE),
                Op::Line(hand_tags),
                Op::Line(hand_tags),
                Op::Line(hand_tags),
                Op::Raise(Tags::ALWAYS_TOP),
            ]
        );
    }

    #[test]
    fn previous_hands_are_gone_after_next_tick() {
        let mut c = controller_at(0);
        let mut surface = RecordingSurface::default();
        c.draw_static(&mut surface).unwrap();
        let static_count = surface.scene.len();

        c.tick(&mut surface).unwrap();
        let first: Vec<Handle> = surface
            .scene
            .items()
            .iter()
            .filter(|i| i.tags.contains(Tags::REMOVABLE))
            .map(|i| i.handle)
            .collect();
        assert_eq!(first.len(), 3);

        c.tick(&mut surface).unwrap();
        assert!(first.iter().all(|h| surface.scene.get(*h).is_none()));
        assert_eq!(surface.scene.len(), static_count + 3);
    }

    #[test]
    fn pin_is_topmost_after_every_tick() {
        let mut c = controller_at(12_345);
        let mut surface = RecordingSurface::default();
        c.draw_static(&mut surface).unwrap();

        for _ in 0..5 {
            c.tick(&mut surface).unwrap();
            let top = surface.scene.topmost().unwrap();
            assert_eq!(top.tags, PIN_TAGS);
        }
    }

    #[test]
    fn broken_time_source_skips_resync_and_keeps_ticking() {
        let mut c = Controller::new(ClockConfig::default(), BrokenTimeSource).unwrap();
        let mut surface = RecordingSurface::default();

        let report = c.tick(&mut surface).unwrap();
        assert!(!report.resynced);
        // Hands kept their previous position (0) and stepped once.
        assert_eq!(c.hand(HandKind::Second).unwrap().current_step(), 1);
        assert_eq!(c.total_ticks(), 1);
    }

    #[test]
    fn closed_surface_fails_the_tick() {
        let mut c = controller_at(0);
        let mut surface = RecordingSurface::default();
        surface.scene.close();

        let err = c.tick(&mut surface).unwrap_err();
        assert_eq!(err, ClockError::Surface(SurfaceError::Closed));
        assert_eq!(c.total_ticks(), 0);
    }
}
