use crate::motion::ease_in_out;

pub const SLIDE_MS: f64 = 400.0;
pub const DWELL_MS: f64 = 3_000.0;
pub const OFFSCREEN_OFFSET: f64 = 300.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastPhase {
    Hidden,
    SlidingIn { since: f64 },
    Visible { since: f64 },
    SlidingOut { since: f64 },
}

/// Single-slot notification. A new message replaces whatever is showing and
/// restarts the slide-in, so a pending dismissal of the old message cannot
/// fire.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    message: Option<String>,
    phase: ToastPhase,
}

impl Default for Toast {
    fn default() -> Self {
        Self {
            message: None,
            phase: ToastPhase::Hidden,
        }
    }
}

impl Toast {
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn show(&mut self, message: impl Into<String>, now: f64) {
        self.message = Some(message.into());
        self.phase = ToastPhase::SlidingIn { since: now };
    }

    /// Advances through every phase boundary crossed by `now`. Returns the
    /// message that finished sliding out, if any.
    pub fn tick(&mut self, now: f64) -> Option<String> {
        loop {
            let next = match self.phase {
                ToastPhase::Hidden => return None,
                ToastPhase::SlidingIn { since } if now - since >= SLIDE_MS => {
                    ToastPhase::Visible {
                        since: since + SLIDE_MS,
                    }
                }
                ToastPhase::Visible { since } if now - since >= DWELL_MS => {
                    ToastPhase::SlidingOut {
                        since: since + DWELL_MS,
                    }
                }
                ToastPhase::SlidingOut { since } if now - since >= SLIDE_MS => {
                    self.phase = ToastPhase::Hidden;
                    return self.message.take();
                }
                _ => return None,
            };
            self.phase = next;
        }
    }

    /// Horizontal translation of the toast at `now`.
    pub fn offset(&self, now: f64) -> f64 {
        match self.phase {
            ToastPhase::Hidden => OFFSCREEN_OFFSET,
            ToastPhase::SlidingIn { since } => {
                OFFSCREEN_OFFSET * (1.0 - ease_in_out((now - since) / SLIDE_MS))
            }
            ToastPhase::Visible { .. } => 0.0,
            ToastPhase::SlidingOut { since } => {
                OFFSCREEN_OFFSET * ease_in_out((now - since) / SLIDE_MS)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_clock(toast: &mut Toast, from: f64, to: f64, dismissed: &mut Vec<String>) {
        let mut now = from;
        while now <= to {
            if let Some(message) = toast.tick(now) {
                dismissed.push(message);
            }
            now += 16.0;
        }
    }

    #[test]
    fn walks_all_phases_and_returns_to_hidden() {
        let mut toast = Toast::default();
        toast.show("Email copied to clipboard", 0.0);

        assert_eq!(toast.offset(0.0), OFFSCREEN_OFFSET);
        assert_eq!(toast.tick(399.0), None);
        assert!(matches!(toast.phase, ToastPhase::SlidingIn { .. }));

        toast.tick(400.0);
        assert_eq!(toast.phase, ToastPhase::Visible { since: 400.0 });
        assert_eq!(toast.offset(1_000.0), 0.0);

        toast.tick(3_400.0);
        assert_eq!(toast.phase, ToastPhase::SlidingOut { since: 3_400.0 });

        let dismissed = toast.tick(3_800.0);
        assert_eq!(dismissed.as_deref(), Some("Email copied to clipboard"));
        assert_eq!(toast.phase, ToastPhase::Hidden);
        assert_eq!(toast.message(), None);
    }

    #[test]
    fn latest_message_wins_and_earlier_one_never_dismisses() {
        let mut toast = Toast::default();
        let mut dismissed = Vec::new();

        toast.show("A", 0.0);
        run_clock(&mut toast, 0.0, 1_000.0, &mut dismissed);
        toast.show("B", 1_000.0);
        run_clock(&mut toast, 1_000.0, 10_000.0, &mut dismissed);

        assert_eq!(dismissed, vec!["B".to_string()]);
        assert_eq!(toast.phase, ToastPhase::Hidden);
    }

    #[test]
    fn replacing_during_slide_out_restarts_from_offscreen() {
        let mut toast = Toast::default();
        toast.show("A", 0.0);
        toast.tick(3_500.0);
        assert!(matches!(toast.phase, ToastPhase::SlidingOut { .. }));

        toast.show("B", 3_500.0);

        assert_eq!(toast.message(), Some("B"));
        assert_eq!(toast.offset(3_500.0), OFFSCREEN_OFFSET);
        assert_eq!(toast.tick(3_850.0), None);
    }

    #[test]
    fn a_long_gap_between_ticks_crosses_several_phases() {
        let mut toast = Toast::default();
        toast.show("late frame", 0.0);

        assert_eq!(toast.tick(60_000.0).as_deref(), Some("late frame"));
    }
}
