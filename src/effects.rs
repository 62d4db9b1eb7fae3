//! Row animation effects.
//!
//! Rows animate over [`ROW_ANIM`] with an ease-in/ease-out curve: new rows
//! slide in from the left, completed rows fade toward the muted color while
//! their removal timer runs.

use std::time::Duration;

/// Duration of row animations.
pub const ROW_ANIM: Duration = Duration::from_millis(300);

fn normalized_progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }

    let elapsed = elapsed.as_secs_f32();
    let total = duration.as_secs_f32();
    (elapsed / total).clamp(0.0, 1.0)
}

#[derive(Debug, Clone)]
struct EffectTimer {
    elapsed: Duration,
    duration: Duration,
}

impl EffectTimer {
    fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
        }
    }

    fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    fn progress(&self) -> f32 {
        normalized_progress(self.elapsed, self.duration)
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Ease-in/ease-out cubic curve over `[0, 1]`.
#[must_use]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let inv = -2.0 * t + 2.0;
        1.0 - inv * inv * inv / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEffectKind {
    /// A freshly added row sliding into place.
    SlideIn,
    /// A completed row fading out while its removal timer runs.
    FadeOut,
}

/// Animation state for a single checklist row.
#[derive(Debug, Clone)]
pub struct RowEffect {
    kind: RowEffectKind,
    timer: EffectTimer,
}

impl RowEffect {
    #[must_use]
    pub fn slide_in() -> Self {
        Self {
            kind: RowEffectKind::SlideIn,
            timer: EffectTimer::new(ROW_ANIM),
        }
    }

    #[must_use]
    pub fn fade_out() -> Self {
        Self {
            kind: RowEffectKind::FadeOut,
            timer: EffectTimer::new(ROW_ANIM),
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.timer.advance(delta);
    }

    /// Progress through the effect with the easing curve applied.
    #[must_use]
    pub fn eased_progress(&self) -> f32 {
        ease_in_out_cubic(self.timer.progress())
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.timer.is_finished()
    }

    #[must_use]
    pub fn kind(&self) -> RowEffectKind {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_endpoints_and_midpoint() {
        assert!(ease_in_out_cubic(0.0).abs() < f32::EPSILON);
        assert!((ease_in_out_cubic(1.0) - 1.0).abs() < f32::EPSILON);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
        // Slow start, fast middle.
        assert!(ease_in_out_cubic(0.25) < 0.25);
        assert!(ease_in_out_cubic(0.75) > 0.75);
    }

    #[test]
    fn easing_clamps_out_of_range_input() {
        assert!(ease_in_out_cubic(-1.0).abs() < f32::EPSILON);
        assert!((ease_in_out_cubic(2.0) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn effect_advances_to_finished() {
        let mut effect = RowEffect::slide_in();
        assert_eq!(effect.kind(), RowEffectKind::SlideIn);
        assert!(!effect.is_finished());
        assert!(effect.eased_progress() < 0.1);

        effect.advance(Duration::from_millis(150));
        assert!(!effect.is_finished());

        effect.advance(Duration::from_millis(150));
        assert!(effect.is_finished());
        assert!((effect.eased_progress() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_duration_timer_reports_complete() {
        let timer = EffectTimer::new(Duration::ZERO);
        assert!((timer.progress() - 1.0).abs() < f32::EPSILON);
        assert!(timer.is_finished());
    }
}
