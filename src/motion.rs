//! Time-based motion primitives. Every value here is a pure function of the
//! page clock (milliseconds from `requestAnimationFrame`), so the page never
//! owns a free-running timer.

pub const TYPE_INTERVAL_MS: f64 = 150.0;
pub const CURSOR_BLINK_LEG_MS: f64 = 500.0;
pub const FLOAT_LEG_MS: f64 = 3_000.0;
pub const FLOAT_DISTANCE: f64 = 10.0;
pub const HOVER_LIFT: f64 = 6.0;
pub const HOVER_LIFT_MS: f64 = 100.0;

/// Title, subtitle, then buttons; each starts when the previous one ends.
pub const HERO_INTRO: [Track; 3] = [
    Track::new(500.0, 800.0),
    Track::new(1_300.0, 800.0),
    Track::new(2_100.0, 800.0),
];

pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// A single 0→1 animation with an optional start delay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Track {
    pub delay: f64,
    pub duration: f64,
}

impl Track {
    pub const fn new(delay: f64, duration: f64) -> Self {
        Self { delay, duration }
    }

    pub fn staggered(index: usize, step: f64, duration: f64) -> Self {
        Self::new(index as f64 * step, duration)
    }

    pub fn progress(self, elapsed: f64) -> f64 {
        if elapsed <= self.delay {
            return 0.0;
        }
        if self.duration <= 0.0 {
            return 1.0;
        }

        ease_in_out((elapsed - self.delay) / self.duration)
    }
}

/// Interpolates between two values starting at an absolute clock time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    start: f64,
    duration: f64,
}

impl Tween {
    pub fn settled(value: f64) -> Self {
        Self {
            from: value,
            to: value,
            start: 0.0,
            duration: 0.0,
        }
    }

    pub fn sample(&self, now: f64) -> f64 {
        if self.duration <= 0.0 || now >= self.start + self.duration {
            return self.to;
        }
        if now <= self.start {
            return self.from;
        }

        let progress = ease_in_out((now - self.start) / self.duration);
        self.from + (self.to - self.from) * progress
    }

    /// Starts a new leg from wherever the current one is at `now`.
    pub fn retarget(&self, now: f64, to: f64, duration: f64) -> Self {
        Self {
            from: self.sample(now),
            to,
            start: now,
            duration,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn is_running(&self, now: f64) -> bool {
        self.from != self.to && now < self.start + self.duration
    }
}

/// Reveals a fixed string one character per interval. The first character is
/// visible as soon as typing starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Typewriter {
    text: &'static str,
    started_at: f64,
}

impl Typewriter {
    pub fn new(text: &'static str, started_at: f64) -> Self {
        Self { text, started_at }
    }

    fn total_chars(&self) -> usize {
        self.text.chars().count()
    }

    pub fn visible_chars(&self, now: f64) -> usize {
        let total = self.total_chars();
        if total == 0 || now < self.started_at {
            return 0;
        }

        let steps = ((now - self.started_at) / TYPE_INTERVAL_MS).floor() as usize;
        steps.saturating_add(1).min(total)
    }

    pub fn typed(&self, now: f64) -> &'static str {
        let visible = self.visible_chars(now);
        match self.text.char_indices().nth(visible) {
            Some((byte_index, _)) => &self.text[..byte_index],
            None => self.text,
        }
    }

    pub fn finished_at(&self) -> f64 {
        self.started_at + self.total_chars() as f64 * TYPE_INTERVAL_MS
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now >= self.finished_at()
    }

    /// Solid while typing, then fades out and back in forever.
    pub fn cursor_opacity(&self, now: f64) -> f64 {
        if !self.is_finished(now) {
            return 1.0;
        }

        let phase = (now - self.finished_at()) % (CURSOR_BLINK_LEG_MS * 2.0);
        if phase < CURSOR_BLINK_LEG_MS {
            1.0 - ease_in_out(phase / CURSOR_BLINK_LEG_MS)
        } else {
            ease_in_out((phase - CURSOR_BLINK_LEG_MS) / CURSOR_BLINK_LEG_MS)
        }
    }
}

/// Vertical offset of the floating hero avatar, `elapsed` ms after mount.
pub fn float_offset(elapsed: f64) -> f64 {
    let phase = elapsed.max(0.0) % (FLOAT_LEG_MS * 2.0);
    let amount = if phase < FLOAT_LEG_MS {
        ease_in_out(phase / FLOAT_LEG_MS)
    } else {
        1.0 - ease_in_out((phase - FLOAT_LEG_MS) / FLOAT_LEG_MS)
    };

    -FLOAT_DISTANCE * amount
}

/// Maps an entrance progress to `(opacity, translate)` for an element that
/// slides in from `distance` px away.
pub fn fade_slide(progress: f64, distance: f64) -> (f64, f64) {
    (progress, distance * (1.0 - progress))
}
