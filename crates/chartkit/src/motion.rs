//! Frame clock for the fade/slide-in that follows a reveal.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionMode {
    Running,
    Paused,
}

pub const REVEAL_DURATION: f64 = 0.7;
pub const REVEAL_OFFSET: f64 = 24.0;
const MAX_FRAME_DELTA: f64 = 0.25;

/// Advances reveal progress in `[0, 1]` by the time since `last_tick`.
///
/// The first tick only starts the clock, frame gaps are clamped so a
/// backgrounded tab does not skip the animation, and time running
/// backwards never rewinds it.
pub fn advance_reveal(
    progress: f64,
    last_tick: Option<f64>,
    now_seconds: f64,
    mode: MotionMode,
) -> (f64, Option<f64>) {
    let delta = last_tick
        .map(|last| (now_seconds - last).clamp(0.0, MAX_FRAME_DELTA))
        .unwrap_or(0.0);

    let next = match mode {
        MotionMode::Running => (progress + delta / REVEAL_DURATION).clamp(0.0, 1.0),
        MotionMode::Paused => progress.clamp(0.0, 1.0),
    };

    (next, Some(now_seconds))
}

fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Presentation of an element part way through its reveal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealStyle {
    pub opacity: f64,
    pub offset_y: f64,
}

impl RevealStyle {
    pub fn at(progress: f64) -> Self {
        let eased = ease_out_cubic(progress);
        Self {
            opacity: eased,
            offset_y: (1.0 - eased) * REVEAL_OFFSET,
        }
    }

    pub const fn hidden() -> Self {
        Self {
            opacity: 0.0,
            offset_y: REVEAL_OFFSET,
        }
    }

    pub const fn visible() -> Self {
        Self {
            opacity: 1.0,
            offset_y: 0.0,
        }
    }

    pub fn to_css(self) -> String {
        format!(
            "opacity:{:.3};transform:translateY({:.1}px)",
            self.opacity, self.offset_y
        )
    }
}
