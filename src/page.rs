//! Page state machine: scroll bands, one-shot section reveals, the nav
//! underline and the responsive switch. Every transition is a plain method on
//! [`PageState`] so the whole page can be driven without a DOM.

use crate::content::{ClipboardTarget, HERO_TITLE};
use crate::motion::{Track, Tween, Typewriter};
use crate::projects::Project;
use crate::telemetry::{log_event, LogLevel};
use crate::toast::Toast;
use serde_json::json;
use std::fmt::Debug;

pub const MOBILE_BREAKPOINT: f64 = 768.0;
pub const NAVBAR_HEIGHT: f64 = 64.0;
pub const REVEAL_LOOKAHEAD: f64 = 0.3;
pub const UNDERLINE_INSET: f64 = 10.0;
pub const UNDERLINE_LEFT_MS: f64 = 300.0;
pub const UNDERLINE_WIDTH_MS: f64 = 200.0;
pub const MENU_HEIGHT: f64 = 220.0;
pub const MENU_OPEN_MS: f64 = 300.0;
pub const MENU_CLOSE_MS: f64 = 250.0;
pub const CARD_STAGGER_MS: f64 = 200.0;

/// Upper edges of the first four active-section bands, in viewport heights.
const ACTIVE_BANDS: [(f64, Section); 4] = [
    (0.5, Section::Hero),
    (1.5, Section::About),
    (2.5, Section::Interests),
    (3.5, Section::Projects),
];

/// Extra push applied to the contact scroll target on narrow layouts, where
/// the measured offsets tend to land on the projects grid.
fn mobile_contact_nudge(viewport_height: f64) -> f64 {
    (viewport_height * 1.5).round() - NAVBAR_HEIGHT + 60.0
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Hero,
    About,
    Interests,
    Projects,
    Contact,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Hero,
        Section::About,
        Section::Interests,
        Section::Projects,
        Section::Contact,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::Hero => 0,
            Self::About => 1,
            Self::Interests => 2,
            Self::Projects => 3,
            Self::Contact => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::About => "about",
            Self::Interests => "interests",
            Self::Projects => "projects",
            Self::Contact => "contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hero => "Home",
            Self::About => "About",
            Self::Interests => "Interests",
            Self::Projects => "Projects",
            Self::Contact => "Contact",
        }
    }

    /// Scroll target used until the section has been measured.
    fn fallback_offset_factor(self) -> f64 {
        match self {
            Self::Hero => 0.0,
            Self::About => 0.95,
            Self::Interests => 1.95,
            Self::Projects => 2.95,
            Self::Contact => 3.85,
        }
    }
}

pub fn active_section(scroll_y: f64, viewport_height: f64) -> Section {
    ACTIVE_BANDS
        .iter()
        .find(|(edge, _)| scroll_y < edge * viewport_height)
        .map(|(_, section)| *section)
        .unwrap_or(Section::Contact)
}

/// Regions with a one-shot entrance animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reveal {
    About,
    Interests,
    Projects,
    Contact,
    Footer,
}

impl Reveal {
    pub const COUNT: usize = 5;
    pub const ALL: [Reveal; Reveal::COUNT] = [
        Reveal::About,
        Reveal::Interests,
        Reveal::Projects,
        Reveal::Contact,
        Reveal::Footer,
    ];

    fn index(self) -> usize {
        match self {
            Self::About => 0,
            Self::Interests => 1,
            Self::Projects => 2,
            Self::Contact => 3,
            Self::Footer => 4,
        }
    }

    /// Nominal top of the region, in viewport heights.
    fn nominal_top(self) -> f64 {
        match self {
            Self::About => 0.95,
            Self::Interests => 1.95,
            Self::Projects => 2.95,
            Self::Contact => 3.95,
            Self::Footer => 4.5,
        }
    }

    pub fn trigger_offset(self, viewport_height: f64) -> f64 {
        (self.nominal_top() - REVEAL_LOOKAHEAD) * viewport_height
    }

    /// Timing of the `index`th animated element in the region. About runs its
    /// title, text and image; the card grids stagger per card.
    pub fn track(self, index: usize) -> Track {
        match self {
            Self::About if index == 0 => Track::new(0.0, 800.0),
            Self::About => Track::new(200.0, 1_200.0),
            Self::Interests | Self::Projects => Track::staggered(index, CARD_STAGGER_MS, 800.0),
            Self::Contact => Track::new(0.0, 800.0),
            Self::Footer => Track::new(0.0, 1_000.0),
        }
    }
}

/// Per-region "already revealed" bits. Bits are only ever set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RevealFlags(u8);

impl RevealFlags {
    pub fn is_set(self, reveal: Reveal) -> bool {
        self.0 & (1 << reveal.index()) != 0
    }

    /// Sets the flag and reports whether it was previously clear.
    pub fn set(&mut self, reveal: Reveal) -> bool {
        let fresh = !self.is_set(reveal);
        self.0 |= 1 << reveal.index();
        fresh
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextBox {
    pub x: f64,
    pub width: f64,
}

/// Measured box of one nav link, relative to the nav links row. `text` is the
/// tighter label box, relative to the link itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavLinkLayout {
    pub x: f64,
    pub width: f64,
    pub text: Option<TextBox>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NavLayoutMap([Option<NavLinkLayout>; 5]);

impl NavLayoutMap {
    pub fn get(&self, section: Section) -> Option<NavLinkLayout> {
        self.0[section.index()]
    }

    pub fn record_container(&mut self, section: Section, x: f64, width: f64) -> bool {
        let slot = &mut self.0[section.index()];
        if let Some(existing) = slot {
            if existing.x == x && existing.width == width {
                return false;
            }
        }

        let text = slot.and_then(|layout| layout.text);
        *slot = Some(NavLinkLayout { x, width, text });
        true
    }

    pub fn record_text(&mut self, section: Section, x: f64, width: f64) -> bool {
        let text = TextBox { x, width };
        let slot = &mut self.0[section.index()];
        if slot.and_then(|layout| layout.text) == Some(text) {
            return false;
        }

        let (container_x, container_width) = slot
            .map(|layout| (layout.x, layout.width))
            .unwrap_or((0.0, width));
        *slot = Some(NavLinkLayout {
            x: container_x,
            width: container_width,
            text: Some(text),
        });
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Underline {
    pub left: f64,
    pub width: f64,
}

/// Underline geometry for a link: the label box when measured, otherwise
/// the whole link, shrunk by the inset and centred.
pub fn underline_target(layout: NavLinkLayout) -> Underline {
    let (start, span) = match layout.text {
        Some(text) => (layout.x + text.x, text.width),
        None => (layout.x, layout.width),
    };
    let width = (span - UNDERLINE_INSET).max(0.0);

    Underline {
        left: start + ((span - width) / 2.0).round(),
        width,
    }
}

pub fn is_mobile(viewport_width: f64) -> bool {
    viewport_width < MOBILE_BREAKPOINT
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn is_mobile(self) -> bool {
        is_mobile(self.width)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Menu {
    open: bool,
    height: Tween,
}

impl Default for Menu {
    fn default() -> Self {
        Self {
            open: false,
            height: Tween::settled(0.0),
        }
    }
}

impl Menu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The overlay stays mounted until its closing animation finishes.
    pub fn is_rendered(&self, now: f64) -> bool {
        self.open || self.height.is_running(now)
    }

    pub fn height(&self, now: f64) -> f64 {
        self.height.sample(now)
    }

    fn toggle(&mut self, now: f64) {
        if self.open {
            self.close(now);
        } else {
            self.open = true;
            self.height = self.height.retarget(now, MENU_HEIGHT, MENU_OPEN_MS);
        }
    }

    fn close(&mut self, now: f64) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        self.height = self.height.retarget(now, 0.0, MENU_CLOSE_MS);
        true
    }
}

/// What a scroll event changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollOutcome {
    pub section_changed: bool,
    pub revealed: Vec<Reveal>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PageAction {
    Tick(f64),
    Scrolled(f64),
    Resized(Viewport),
    NavLinkMeasured { section: Section, x: f64, width: f64 },
    NavTextMeasured { section: Section, x: f64, width: f64 },
    SectionMeasured { section: Section, top: f64 },
    ProjectsLoaded(Vec<Project>),
    Notify(String),
    ToggleMenu,
    CloseMenu,
}

/// Follow-up to a clipboard write: a confirmation toast once the text is on
/// the clipboard. A failed write is logged and shows nothing.
pub fn clipboard_outcome<E: Debug>(
    target: ClipboardTarget,
    written: Result<(), E>,
) -> Option<PageAction> {
    match written {
        Ok(()) => Some(PageAction::Notify(target.confirmation().to_string())),
        Err(error) => {
            log_event(
                LogLevel::Warn,
                "clipboard_write_failed",
                json!({ "target": target.as_str(), "error": format!("{error:?}") }),
            );
            None
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageState {
    mounted_at: f64,
    now: f64,
    viewport: Viewport,
    scroll_y: f64,
    active: Section,
    reveals: RevealFlags,
    reveal_started: [Option<f64>; Reveal::COUNT],
    nav_layout: NavLayoutMap,
    underline_left: Tween,
    underline_width: Tween,
    section_offsets: [Option<f64>; 5],
    menu: Menu,
    typewriter: Typewriter,
    projects: Option<Vec<Project>>,
    toast: Toast,
}

impl PageState {
    pub fn new(viewport: Viewport, now: f64) -> Self {
        Self {
            mounted_at: now,
            now,
            viewport,
            scroll_y: 0.0,
            active: Section::Hero,
            reveals: RevealFlags::default(),
            reveal_started: [None; Reveal::COUNT],
            nav_layout: NavLayoutMap::default(),
            underline_left: Tween::settled(0.0),
            underline_width: Tween::settled(0.0),
            section_offsets: [None; 5],
            menu: Menu::default(),
            typewriter: Typewriter::new(HERO_TITLE, now),
            projects: None,
            toast: Toast::default(),
        }
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn since_mount(&self) -> f64 {
        self.now - self.mounted_at
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_mobile(&self) -> bool {
        self.viewport.is_mobile()
    }

    pub fn active(&self) -> Section {
        self.active
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    pub fn projects(&self) -> Option<&[Project]> {
        self.projects.as_deref()
    }

    pub fn toast(&self) -> &Toast {
        &self.toast
    }

    pub fn underline(&self) -> Underline {
        Underline {
            left: self.underline_left.sample(self.now),
            width: self.underline_width.sample(self.now),
        }
    }

    /// Progress of element `track` of `reveal`; zero until the region has
    /// been revealed.
    pub fn reveal_progress(&self, reveal: Reveal, track: usize) -> f64 {
        self.reveal_started[reveal.index()]
            .map(|started| reveal.track(track).progress(self.now - started))
            .unwrap_or(0.0)
    }

    pub fn scroll_target(&self, section: Section) -> f64 {
        let height = self.viewport.height;
        let mut offset = self.section_offsets[section.index()]
            .unwrap_or(section.fallback_offset_factor() * height);

        if self.is_mobile() && section == Section::Contact {
            offset += mobile_contact_nudge(height);
        }

        offset.max(0.0)
    }

    /// Applies one event. Returns whether anything observable changed.
    pub fn apply(&mut self, action: PageAction) -> bool {
        match action {
            PageAction::Tick(now) => self.tick(now),
            PageAction::Scrolled(y) => {
                let moved = y.max(0.0) != self.scroll_y;
                let outcome = self.scroll(y);
                moved || outcome.section_changed || !outcome.revealed.is_empty()
            }
            PageAction::Resized(viewport) => {
                let changed = viewport != self.viewport;
                self.viewport = viewport;
                changed
            }
            PageAction::NavLinkMeasured { section, x, width } => {
                let changed = self.nav_layout.record_container(section, x, width);
                if changed {
                    self.sync_underline();
                }
                changed
            }
            PageAction::NavTextMeasured { section, x, width } => {
                let changed = self.nav_layout.record_text(section, x, width);
                if changed {
                    self.sync_underline();
                }
                changed
            }
            PageAction::SectionMeasured { section, top } => {
                let slot = &mut self.section_offsets[section.index()];
                let changed = *slot != Some(top);
                *slot = Some(top);
                changed
            }
            PageAction::ProjectsLoaded(projects) => {
                self.projects = Some(projects);
                true
            }
            PageAction::Notify(message) => {
                self.toast.show(message, self.now);
                true
            }
            PageAction::ToggleMenu => {
                self.menu.toggle(self.now);
                true
            }
            PageAction::CloseMenu => self.menu.close(self.now),
        }
    }

    fn tick(&mut self, now: f64) -> bool {
        if now <= self.now {
            return false;
        }
        self.now = now;
        self.toast.tick(now);
        true
    }

    /// Updates the active section and starts any region whose trigger line
    /// has been passed for the first time.
    pub fn scroll(&mut self, y: f64) -> ScrollOutcome {
        self.scroll_y = y.max(0.0);
        let height = self.viewport.height;
        let mut outcome = ScrollOutcome::default();

        let candidate = active_section(self.scroll_y, height);
        if candidate != self.active {
            self.active = candidate;
            outcome.section_changed = true;
            self.sync_underline();
        }

        for reveal in Reveal::ALL {
            if self.scroll_y > reveal.trigger_offset(height) && self.reveals.set(reveal) {
                self.reveal_started[reveal.index()] = Some(self.now);
                outcome.revealed.push(reveal);
            }
        }

        outcome
    }

    fn sync_underline(&mut self) {
        let Some(layout) = self.nav_layout.get(self.active) else {
            return;
        };
        let target = underline_target(layout);

        if self.underline_left.target() != target.left {
            self.underline_left = self
                .underline_left
                .retarget(self.now, target.left, UNDERLINE_LEFT_MS);
        }
        if self.underline_width.target() != target.width {
            self.underline_width = self
                .underline_width
                .retarget(self.now, target.width, UNDERLINE_WIDTH_MS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VH: f64 = 800.0;

    fn desktop() -> PageState {
        PageState::new(
            Viewport {
                width: 1280.0,
                height: VH,
            },
            0.0,
        )
    }

    fn mobile() -> PageState {
        PageState::new(
            Viewport {
                width: 390.0,
                height: VH,
            },
            0.0,
        )
    }

    #[test]
    fn bands_switch_exactly_at_their_edges() {
        assert_eq!(active_section(0.0, VH), Section::Hero);
        assert_eq!(active_section(399.9, VH), Section::Hero);
        assert_eq!(active_section(400.0, VH), Section::About);
        assert_eq!(active_section(1_199.0, VH), Section::About);
        assert_eq!(active_section(1_200.0, VH), Section::Interests);
        assert_eq!(active_section(2_000.0, VH), Section::Projects);
        assert_eq!(active_section(2_800.0, VH), Section::Contact);
        assert_eq!(active_section(100_000.0, VH), Section::Contact);
    }

    #[test]
    fn active_section_never_moves_backwards_while_scrolling_down() {
        let mut previous = 0;
        let mut y = 0.0;
        while y < 4.0 * VH {
            let index = active_section(y, VH).index();
            assert!(index >= previous, "section went back at y={y}");
            previous = index;
            y += 7.5;
        }
        assert_eq!(previous, Section::Contact.index());
    }

    #[test]
    fn scrolling_within_a_band_keeps_the_section() {
        let mut page = desktop();

        assert!(page.scroll(500.0).section_changed);
        assert!(!page.scroll(900.0).section_changed);
        assert_eq!(page.active(), Section::About);
    }

    #[test]
    fn reveal_fires_once_past_lookahead_line() {
        let mut page = desktop();
        let about_line = Reveal::About.trigger_offset(VH);

        assert_eq!(about_line, (0.95 - 0.3) * VH);
        assert!(page.scroll(about_line).revealed.is_empty());
        assert_eq!(page.scroll(about_line + 1.0).revealed, vec![Reveal::About]);
        assert!(page.scroll(about_line + 50.0).revealed.is_empty());
        assert!(page.reveals.is_set(Reveal::About));
    }

    #[test]
    fn reveal_flags_survive_scrolling_back_to_top() {
        let mut page = desktop();

        let outcome = page.scroll(10.0 * VH);
        assert_eq!(outcome.revealed, Reveal::ALL.to_vec());

        page.scroll(0.0);
        for reveal in Reveal::ALL {
            assert!(page.reveals.is_set(reveal));
        }
        assert!(page.scroll(10.0 * VH).revealed.is_empty());
    }

    #[test]
    fn jumping_far_down_reveals_everything_passed() {
        let mut page = desktop();

        let outcome = page.scroll(3.0 * VH);

        assert_eq!(
            outcome.revealed,
            vec![Reveal::About, Reveal::Interests, Reveal::Projects]
        );
    }

    #[test]
    fn reveal_progress_staggers_cards_from_trigger_time() {
        let mut page = desktop();
        page.apply(PageAction::Tick(1_000.0));
        page.scroll(2.0 * VH);
        page.apply(PageAction::Tick(1_300.0));

        assert!(page.reveal_progress(Reveal::Interests, 0) > 0.0);
        assert!(page.reveal_progress(Reveal::Interests, 1) > 0.0);
        assert_eq!(page.reveal_progress(Reveal::Interests, 2), 0.0);
        assert_eq!(page.reveal_progress(Reveal::Projects, 0), 0.0);

        page.apply(PageAction::Tick(10_000.0));
        assert_eq!(page.reveal_progress(Reveal::Interests, 2), 1.0);
    }

    #[test]
    fn reveal_flags_report_only_the_first_set() {
        let mut flags = RevealFlags::default();

        assert!(flags.set(Reveal::Footer));
        assert!(!flags.set(Reveal::Footer));
        assert!(flags.is_set(Reveal::Footer));
        assert!(!flags.is_set(Reveal::Contact));
    }

    #[test]
    fn underline_shrinks_and_centres_on_link_box() {
        let target = underline_target(NavLinkLayout {
            x: 100.0,
            width: 80.0,
            text: None,
        });

        assert_eq!(
            target,
            Underline {
                left: 105.0,
                width: 70.0
            }
        );
    }

    #[test]
    fn underline_prefers_label_box() {
        let target = underline_target(NavLinkLayout {
            x: 100.0,
            width: 80.0,
            text: Some(TextBox {
                x: 10.0,
                width: 40.0,
            }),
        });

        assert_eq!(
            target,
            Underline {
                left: 115.0,
                width: 30.0
            }
        );
    }

    #[test]
    fn underline_width_never_goes_negative() {
        let target = underline_target(NavLinkLayout {
            x: 20.0,
            width: 6.0,
            text: None,
        });

        assert_eq!(target.width, 0.0);
        assert_eq!(target.left, 23.0);
    }

    #[test]
    fn underline_waits_for_measurement_of_active_link() {
        let mut page = desktop();
        page.apply(PageAction::NavLinkMeasured {
            section: Section::About,
            x: 200.0,
            width: 90.0,
        });
        page.apply(PageAction::Tick(1_000.0));
        assert_eq!(page.underline().width, 0.0);

        page.scroll(VH);
        page.apply(PageAction::Tick(2_000.0));
        assert_eq!(
            page.underline(),
            Underline {
                left: 205.0,
                width: 80.0
            }
        );

        page.scroll(2.0 * VH);
        page.apply(PageAction::Tick(3_000.0));
        assert_eq!(page.underline().left, 205.0);
    }

    #[test]
    fn underline_follows_new_measurements() {
        let mut page = desktop();
        page.apply(PageAction::NavLinkMeasured {
            section: Section::Hero,
            x: 100.0,
            width: 80.0,
        });
        page.apply(PageAction::NavTextMeasured {
            section: Section::Hero,
            x: 10.0,
            width: 40.0,
        });
        page.apply(PageAction::Tick(1_000.0));

        assert_eq!(
            page.underline(),
            Underline {
                left: 115.0,
                width: 30.0
            }
        );
    }

    #[test]
    fn repeated_measurements_are_ignored() {
        let mut map = NavLayoutMap::default();

        assert!(map.record_container(Section::Hero, 0.0, 60.0));
        assert!(!map.record_container(Section::Hero, 0.0, 60.0));
        assert!(map.record_text(Section::Hero, 8.0, 44.0));
        assert!(!map.record_text(Section::Hero, 8.0, 44.0));
        assert!(map.record_container(Section::Hero, 2.0, 60.0));
        assert_eq!(
            map.get(Section::Hero).and_then(|layout| layout.text),
            Some(TextBox { x: 8.0, width: 44.0 })
        );
    }

    #[test]
    fn label_measured_first_borrows_its_width_for_the_link() {
        let mut map = NavLayoutMap::default();
        map.record_text(Section::Contact, 4.0, 52.0);

        let layout = map.get(Section::Contact).expect("layout recorded");
        assert_eq!(layout.x, 0.0);
        assert_eq!(layout.width, 52.0);
    }

    #[test]
    fn mobile_switches_exactly_at_breakpoint() {
        assert!(is_mobile(767.0));
        assert!(!is_mobile(768.0));

        let mut page = desktop();
        assert!(page.apply(PageAction::Resized(Viewport {
            width: 767.0,
            height: VH
        })));
        assert!(page.is_mobile());
        page.apply(PageAction::Resized(Viewport {
            width: 768.0,
            height: VH,
        }));
        assert!(!page.is_mobile());
    }

    #[test]
    fn scroll_targets_prefer_measured_offsets() {
        let mut page = desktop();

        assert_eq!(page.scroll_target(Section::Hero), 0.0);
        assert_eq!(page.scroll_target(Section::Projects), 2.95 * VH);

        page.apply(PageAction::SectionMeasured {
            section: Section::Projects,
            top: 2_500.0,
        });
        assert_eq!(page.scroll_target(Section::Projects), 2_500.0);
    }

    #[test]
    fn mobile_contact_target_is_nudged_down() {
        let desktop_page = desktop();
        let mobile_page = mobile();
        let base = 3.85 * VH;

        assert_eq!(mobile_contact_nudge(VH), 1_196.0);
        assert_eq!(desktop_page.scroll_target(Section::Contact), base);
        assert_eq!(mobile_page.scroll_target(Section::Contact), base + 1_196.0);
        assert_eq!(
            mobile_page.scroll_target(Section::About),
            desktop_page.scroll_target(Section::About)
        );
    }

    #[test]
    fn menu_stays_mounted_until_closed_animation_ends() {
        let mut page = mobile();
        page.apply(PageAction::ToggleMenu);
        page.apply(PageAction::Tick(400.0));
        assert_eq!(page.menu().height(page.now()), MENU_HEIGHT);

        page.apply(PageAction::CloseMenu);
        assert!(!page.menu().is_open());
        page.apply(PageAction::Tick(500.0));
        assert!(page.menu().is_rendered(page.now()));

        page.apply(PageAction::Tick(700.0));
        assert!(!page.menu().is_rendered(page.now()));
        assert!(!page.apply(PageAction::CloseMenu));
    }

    #[test]
    fn notification_uses_page_clock() {
        let mut page = desktop();
        page.apply(PageAction::Tick(1_000.0));
        page.apply(PageAction::Notify("Email copied to clipboard".to_string()));

        page.apply(PageAction::Tick(1_000.0 + 400.0 + 3_000.0 + 400.0));

        assert_eq!(page.toast().message(), None);
    }

    #[test]
    fn failed_clipboard_write_shows_no_notification() {
        let mut page = desktop();

        let outcome = clipboard_outcome(ClipboardTarget::Email, Err("NotAllowedError"));
        assert_eq!(outcome, None);
        page.apply(PageAction::Tick(5_000.0));

        assert_eq!(page.toast().message(), None);
        assert_eq!(page.toast().offset(page.now()), crate::toast::OFFSCREEN_OFFSET);
    }

    #[test]
    fn successful_clipboard_write_confirms_the_target() {
        let mut page = desktop();

        let outcome = clipboard_outcome::<()>(ClipboardTarget::Discord, Ok(()));
        assert_eq!(
            outcome,
            Some(PageAction::Notify(
                ClipboardTarget::Discord.confirmation().to_string()
            ))
        );
        page.apply(outcome.expect("notification action"));

        assert_eq!(
            page.toast().message(),
            Some(ClipboardTarget::Discord.confirmation())
        );
    }

    #[test]
    fn overscroll_above_the_top_is_not_a_change() {
        let mut page = desktop();

        assert!(!page.apply(PageAction::Scrolled(-40.0)));
        assert!(!page.apply(PageAction::Scrolled(0.0)));
        assert!(page.apply(PageAction::Scrolled(10.0)));
        assert!(page.apply(PageAction::Scrolled(-5.0)));
        assert_eq!(page.scroll_y, 0.0);
    }

    #[test]
    fn clock_never_runs_backwards() {
        let mut page = desktop();

        assert!(page.apply(PageAction::Tick(50.0)));
        assert!(!page.apply(PageAction::Tick(20.0)));
        assert_eq!(page.now(), 50.0);
    }
}
