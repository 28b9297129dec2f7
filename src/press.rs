use crate::motion::{HOVER_LIFT, HOVER_LIFT_MS};

/// Optional colour overrides for one interaction state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fill {
    pub background: Option<&'static str>,
    pub color: Option<&'static str>,
}

impl Fill {
    pub const fn new(background: &'static str, color: &'static str) -> Self {
        Self {
            background: Some(background),
            color: Some(color),
        }
    }

    pub const fn background(background: &'static str) -> Self {
        Self {
            background: Some(background),
            color: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PressState {
    pub hovered: bool,
    pub pressed: bool,
}

/// Press beats hover beats base, independently per property.
pub fn resolve_fill(state: PressState, base: Fill, hover: Option<Fill>, press: Option<Fill>) -> Fill {
    let pick = |select: fn(&Fill) -> Option<&'static str>| {
        let pressed = press.filter(|_| state.pressed).and_then(|fill| select(&fill));
        let hovered = hover.filter(|_| state.hovered).and_then(|fill| select(&fill));
        pressed.or(hovered).or_else(|| select(&base))
    };

    Fill {
        background: pick(|fill| fill.background),
        color: pick(|fill| fill.color),
    }
}

/// Inline style for a pressable in `state`. The lift is eased by a CSS
/// transition.
pub fn press_style(state: PressState, fill: Fill) -> String {
    let lift = if state.hovered { -HOVER_LIFT } else { 0.0 };
    let mut style = format!(
        "transform: translateY({lift:.0}px); transition: transform {HOVER_LIFT_MS:.0}ms ease, background-color 120ms ease, color 120ms ease;"
    );

    if let Some(background) = fill.background {
        style.push_str(&format!(" background-color: {background};"));
    }
    if let Some(color) = fill.color {
        style.push_str(&format!(" color: {color};"));
    }

    style
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOVER: Fill = Fill::new("rgba(255,255,255,0.06)", "#fff");
    const PRESS: Fill = Fill::new("rgba(255,255,255,0.12)", "#eee");

    #[test]
    fn idle_uses_base_fill() {
        let fill = resolve_fill(PressState::default(), Fill::background("#000"), Some(HOVER), Some(PRESS));

        assert_eq!(fill.background, Some("#000"));
        assert_eq!(fill.color, None);
    }

    #[test]
    fn press_takes_priority_over_hover() {
        let state = PressState {
            hovered: true,
            pressed: true,
        };

        assert_eq!(resolve_fill(state, Fill::default(), Some(HOVER), Some(PRESS)), PRESS);
    }

    #[test]
    fn missing_press_property_falls_back_to_hover() {
        let state = PressState {
            hovered: true,
            pressed: true,
        };
        let press = Fill::background("#111");

        let fill = resolve_fill(state, Fill::default(), Some(HOVER), Some(press));

        assert_eq!(fill.background, Some("#111"));
        assert_eq!(fill.color, Some("#fff"));
    }

    #[test]
    fn hovered_style_lifts_control() {
        let state = PressState {
            hovered: true,
            pressed: false,
        };
        let style = press_style(state, Fill::background("#111"));

        assert!(style.starts_with("transform: translateY(-6px);"));
        assert!(style.ends_with("background-color: #111;"));
    }
}
