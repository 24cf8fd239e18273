//! Frame interpolation and the bite timeline
//!
//! Every moving phase uses the same rule:
//! `frame = round(lerp(start, target, clamp01(elapsed / max(duration, ε))))`

use crate::types::{floor_duration, MouthConfig};

/// Fraction of `duration` covered by `elapsed`, clamped to [0, 1]
pub fn progress(elapsed: f32, duration: f32) -> f32 {
    (elapsed / floor_duration(duration)).clamp(0.0, 1.0)
}

/// Frame between `start` and `target` after `elapsed` of `duration`.
///
/// Rounds half away from zero, so 5 -> 0 at t = 0.5 lands on frame 3.
pub fn interpolate_frame(start: i32, target: i32, elapsed: f32, duration: f32) -> i32 {
    lerp_frame(start, target, progress(elapsed, duration))
}

/// Frame at fraction `t` of the way from `start` to `target`
pub fn lerp_frame(start: i32, target: i32, t: f32) -> i32 {
    let (a, b) = (start as f32, target as f32);
    (a + (b - a) * t.clamp(0.0, 1.0)).round() as i32
}

/// One linear leg of the bite animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub from: i32,
    pub to: i32,
    /// Already floored to ε
    pub duration: f32,
}

impl Sweep {
    pub fn new(from: i32, to: i32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration: floor_duration(duration),
        }
    }
}

/// Snap-shut sweep followed by chomp cycles.
///
/// Only the snap and the shape of one chomp are stored; the chomp being
/// played is found from the elapsed time, so the size does not depend on
/// the chomp count.
#[derive(Debug, Clone, PartialEq)]
pub struct BiteTimeline {
    snap: Option<Sweep>,
    chomp_open: Sweep,
    chomp_close: Sweep,
    chomps: u32,
    elapsed: f32,
    closed: i32,
}

impl BiteTimeline {
    /// Lay out the bite starting from `start`.
    ///
    /// From an open pose the mouth snaps shut first and then plays
    /// `chomps_after_snap` chomps; from the closed pose it plays `chomp_count`.
    pub fn plan(start: i32, closed: i32, open: i32, config: &MouthConfig) -> Self {
        let peak = (closed + config.chomp_open_frame_offset).min(open).max(closed);

        let (snap, chomps) = if start > closed {
            (
                Some(Sweep::new(start, closed, config.bite_close_duration)),
                config.chomps_after_snap,
            )
        } else {
            (None, config.chomp_count)
        };

        Self {
            snap,
            chomp_open: Sweep::new(closed, peak, config.chomp_open_duration),
            chomp_close: Sweep::new(peak, closed, config.chomp_close_duration),
            chomps,
            elapsed: 0.0,
            closed,
        }
    }

    /// Nothing to animate: the bite completes on entry
    pub fn is_empty(&self) -> bool {
        self.snap.is_none() && self.chomps == 0
    }

    pub fn snap(&self) -> Option<Sweep> {
        self.snap
    }

    pub fn chomp_count(&self) -> u32 {
        self.chomps
    }

    /// Frame a chomp opens to
    pub fn chomp_peak(&self) -> i32 {
        self.chomp_open.to
    }

    fn snap_duration(&self) -> f32 {
        self.snap.map_or(0.0, |s| s.duration)
    }

    fn cycle_duration(&self) -> f32 {
        self.chomp_open.duration + self.chomp_close.duration
    }

    pub fn total_duration(&self) -> f32 {
        self.snap_duration() + self.chomps as f32 * self.cycle_duration()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Move time forward and return the frame to show
    pub fn advance(&mut self, dt: f32) -> i32 {
        self.elapsed += dt;
        self.frame()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.total_duration()
    }

    /// Frame for the current elapsed time
    pub fn frame(&self) -> i32 {
        let mut t = self.elapsed;
        if let Some(snap) = self.snap {
            if t <= snap.duration {
                return interpolate_frame(snap.from, snap.to, t, snap.duration);
            }
            t -= snap.duration;
        }

        let cycle = self.cycle_duration();
        if (t / cycle).floor() >= self.chomps as f32 {
            return self.closed;
        }
        let t = t % cycle;
        if t <= self.chomp_open.duration {
            interpolate_frame(self.chomp_open.from, self.chomp_open.to, t, self.chomp_open.duration)
        } else {
            let t = t - self.chomp_open.duration;
            interpolate_frame(self.chomp_close.from, self.chomp_close.to, t, self.chomp_close.duration)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DURATION_EPSILON;

    #[test]
    fn test_halfway_rounds_away_from_zero() {
        assert_eq!(interpolate_frame(5, 0, 0.5, 1.0), 3);
        assert_eq!(interpolate_frame(0, 5, 0.5, 1.0), 3);
    }

    #[test]
    fn test_progress_clamps_and_floors() {
        assert_eq!(progress(2.0, 1.0), 1.0);
        assert_eq!(progress(-1.0, 1.0), 0.0);
        // zero duration floored to epsilon, no NaN
        assert_eq!(progress(DURATION_EPSILON, 0.0), 1.0);
        assert_eq!(interpolate_frame(5, 0, 0.0, 0.0), 5);
    }

    #[test]
    fn test_plan_from_open_snaps_then_stops() {
        let config = MouthConfig::default();
        let timeline = BiteTimeline::plan(4, 0, 5, &config);
        assert_eq!(timeline.snap(), Some(Sweep::new(4, 0, config.bite_close_duration)));
        assert_eq!(timeline.chomp_count(), 0);
        assert_eq!(timeline.total_duration(), config.bite_close_duration);
    }

    #[test]
    fn test_plan_from_closed_chomps() {
        let config = MouthConfig {
            chomp_count: 2,
            ..MouthConfig::default()
        };
        let timeline = BiteTimeline::plan(0, 0, 5, &config);
        assert_eq!(timeline.snap(), None);
        assert_eq!(timeline.chomp_count(), 2);
        assert_eq!(timeline.chomp_peak(), 2);
    }

    #[test]
    fn test_chomp_peak_bounded_by_open() {
        let config = MouthConfig {
            chomp_open_frame_offset: 10,
            ..MouthConfig::default()
        };
        let timeline = BiteTimeline::plan(0, 0, 3, &config);
        assert_eq!(timeline.chomp_peak(), 3);
    }

    #[test]
    fn test_second_chomp_repeats_the_first() {
        let config = MouthConfig {
            chomp_count: 2,
            chomp_open_duration: 0.5,
            chomp_close_duration: 0.5,
            ..MouthConfig::default()
        };
        let mut timeline = BiteTimeline::plan(0, 0, 5, &config);
        let frames: Vec<i32> = (0..4).map(|_| timeline.advance(0.5)).collect();
        assert_eq!(frames, vec![2, 0, 2, 0]);
        assert!(timeline.is_finished());
    }

    #[test]
    fn test_huge_chomp_count_plans_in_constant_space() {
        let config = MouthConfig {
            chomp_count: u32::MAX,
            chomp_open_duration: 0.5,
            chomp_close_duration: 0.5,
            ..MouthConfig::default()
        };
        let mut timeline = BiteTimeline::plan(0, 0, 5, &config);
        assert_eq!(timeline.chomp_count(), u32::MAX);
        assert!(timeline.total_duration() > 1.0e9);
        assert_eq!(timeline.advance(0.5), 2);
        assert!(!timeline.is_finished());
    }

    #[test]
    fn test_advance_walks_through_chomp() {
        let config = MouthConfig {
            chomp_open_duration: 0.5,
            chomp_close_duration: 0.5,
            ..MouthConfig::default()
        };
        let mut timeline = BiteTimeline::plan(0, 0, 5, &config);
        assert_eq!(timeline.advance(0.5), 2);
        assert!(!timeline.is_finished());
        assert_eq!(timeline.advance(0.25), 1);
        assert_eq!(timeline.advance(0.25), 0);
        assert!(timeline.is_finished());
        assert_eq!(timeline.advance(1.0), 0);
    }

    #[test]
    fn test_no_chomps_from_closed_is_empty() {
        let config = MouthConfig {
            chomp_count: 0,
            ..MouthConfig::default()
        };
        let timeline = BiteTimeline::plan(0, 0, 5, &config);
        assert!(timeline.is_empty());
        assert!(timeline.is_finished());
    }
}
