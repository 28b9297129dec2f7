use crate::content::{
    repos_url, ClipboardTarget, ABOUT_PARAGRAPHS, FOOTER_NOTICE, GITHUB_PROFILE_URL, HERO_SUBTITLE,
    INTERESTS,
};
use crate::motion::{fade_slide, float_offset, HERO_INTRO};
use crate::page::{clipboard_outcome, PageAction, PageState, Reveal, Section, Viewport};
use crate::press::{press_style, resolve_fill, Fill, PressState};
use crate::projects::{load_projects_until_cancelled, CancelToken};
use crate::repos::{FetchError, RepoRecord, RepoSource, OWNER};
use crate::telemetry::{self, log_event, LogLevel};
use gloo_events::EventListener;
use gloo_net::http::Request;
use gloo_render::{request_animation_frame, AnimationFrame};
use js_sys::{Function, Promise, Reflect};
use serde_json::json;
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{window, Element, HtmlElement, ScrollBehavior, ScrollToOptions};
use yew::prelude::*;

const FALLBACK_VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    height: 720.0,
};

impl Reducible for PageState {
    type Action = PageAction;

    fn reduce(self: Rc<Self>, action: PageAction) -> Rc<Self> {
        let mut next = (*self).clone();
        if next.apply(action) {
            Rc::new(next)
        } else {
            self
        }
    }
}

fn current_viewport() -> Viewport {
    let Some(win) = window() else {
        return FALLBACK_VIEWPORT;
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT.width);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT.height);

    Viewport { width, height }
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|performance| performance.now())
        .unwrap_or(0.0)
}

struct BrowserRepoSource {
    url: &'static str,
}

impl RepoSource for BrowserRepoSource {
    async fn list_repos(&self, _owner: &str) -> Result<Vec<RepoRecord>, FetchError> {
        let response = Request::get(self.url)
            .send()
            .await
            .map_err(|_| FetchError::Network)?;

        if !response.ok() {
            return Err(FetchError::Status(response.status()));
        }

        response
            .json::<Vec<RepoRecord>>()
            .await
            .map_err(|_| FetchError::Decode)
    }
}

async fn write_clipboard(text: &str) -> Result<(), JsValue> {
    let navigator = window()
        .ok_or_else(|| JsValue::from_str("window unavailable"))?
        .navigator();
    let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))?;
    let write_text = Reflect::get(&clipboard, &JsValue::from_str("writeText"))?.dyn_into::<Function>()?;
    let promise = write_text
        .call1(&clipboard, &JsValue::from_str(text))?
        .dyn_into::<Promise>()?;

    JsFuture::from(promise).await?;
    Ok(())
}

fn open_external(url: &str) {
    let opened = window().map(|win| win.open_with_url_and_target(url, "_blank"));
    if !matches!(opened, Some(Ok(_))) {
        log_event(LogLevel::Warn, "open_link_failed", json!({ "url": url }));
    }
}

fn scroll_container_to(container: &NodeRef, top: f64) {
    let Some(element) = container.cast::<Element>() else {
        return;
    };

    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    element.scroll_to_with_scroll_to_options(&options);
}

#[derive(Default)]
struct NavRefs {
    row: NodeRef,
    links: [NodeRef; 5],
    labels: [NodeRef; 5],
}

fn measure_nav(refs: &NavRefs, dispatcher: &UseReducerDispatcher<PageState>) {
    let Some(row) = refs.row.cast::<Element>() else {
        return;
    };
    let row_left = row.get_bounding_client_rect().left();

    for section in Section::ALL {
        let index = section.index();
        let Some(link) = refs.links[index].cast::<Element>() else {
            continue;
        };
        let link_rect = link.get_bounding_client_rect();
        dispatcher.dispatch(PageAction::NavLinkMeasured {
            section,
            x: link_rect.left() - row_left,
            width: link_rect.width(),
        });

        if let Some(label) = refs.labels[index].cast::<Element>() {
            let label_rect = label.get_bounding_client_rect();
            dispatcher.dispatch(PageAction::NavTextMeasured {
                section,
                x: label_rect.left() - link_rect.left(),
                width: label_rect.width(),
            });
        }
    }
}

fn measure_sections(refs: &[NodeRef; 5], dispatcher: &UseReducerDispatcher<PageState>) {
    for section in Section::ALL {
        if let Some(element) = refs[section.index()].cast::<HtmlElement>() {
            dispatcher.dispatch(PageAction::SectionMeasured {
                section,
                top: f64::from(element.offset_top()),
            });
        }
    }
}

fn schedule_frame(
    slot: Rc<RefCell<Option<AnimationFrame>>>,
    dispatcher: UseReducerDispatcher<PageState>,
) {
    let next_slot = Rc::clone(&slot);
    let frame = request_animation_frame(move |timestamp| {
        next_slot.borrow_mut().take();
        dispatcher.dispatch(PageAction::Tick(timestamp));
        schedule_frame(next_slot, dispatcher);
    });
    *slot.borrow_mut() = Some(frame);
}

/// Drives the page clock from `requestAnimationFrame` while mounted.
#[hook]
fn use_frame_clock(dispatcher: UseReducerDispatcher<PageState>) {
    use_effect_with((), move |_| {
        let slot: Rc<RefCell<Option<AnimationFrame>>> = Rc::default();
        schedule_frame(Rc::clone(&slot), dispatcher);
        move || {
            slot.borrow_mut().take();
        }
    });
}

#[hook]
fn use_viewport_listener(dispatcher: UseReducerDispatcher<PageState>) {
    use_effect_with((), move |_| {
        let listeners = window().map(|win| {
            ["resize", "orientationchange"].map(|event_type| {
                let dispatcher = dispatcher.clone();
                EventListener::new(&win, event_type, move |_| {
                    dispatcher.dispatch(PageAction::Resized(current_viewport()));
                })
            })
        });
        move || drop(listeners)
    });
}

#[hook]
fn use_project_loader(dispatcher: UseReducerDispatcher<PageState>) {
    use_effect_with((), move |_| {
        let token = CancelToken::new();
        let task_token = token.clone();

        spawn_local(async move {
            let source = BrowserRepoSource { url: repos_url() };
            if let Some(projects) = load_projects_until_cancelled(&source, OWNER, &task_token).await {
                dispatcher.dispatch(PageAction::ProjectsLoaded(projects));
            }
        });

        move || token.cancel()
    });
}

fn slide_style(progress: f64, axis: char, distance: f64) -> String {
    let (opacity, offset) = fade_slide(progress, distance);
    format!("opacity: {opacity:.3}; transform: translate{axis}({offset:.2}px);")
}

fn scale_style(progress: f64) -> String {
    format!("opacity: {progress:.3}; transform: scale({progress:.3});")
}

#[derive(Properties, PartialEq)]
struct PressableProps {
    #[prop_or_default]
    class: Classes,
    #[prop_or_default]
    node_ref: NodeRef,
    #[prop_or_default]
    label: Option<AttrValue>,
    #[prop_or_default]
    base: Fill,
    #[prop_or_default]
    hover: Option<Fill>,
    #[prop_or_default]
    press: Option<Fill>,
    #[prop_or_default]
    onpress: Callback<()>,
    #[prop_or_default]
    children: Html,
}

#[function_component(Pressable)]
fn pressable(props: &PressableProps) -> Html {
    let state = use_state(PressState::default);

    let update = |change: fn(&mut PressState)| {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = *state;
            change(&mut next);
            state.set(next);
        })
    };
    let onmouseenter = update(|s| s.hovered = true);
    let onmouseleave = update(|s| *s = PressState::default());
    let onmousedown = update(|s| s.pressed = true);
    let onmouseup = update(|s| s.pressed = false);

    let onclick = {
        let onpress = props.onpress.clone();
        Callback::from(move |_: MouseEvent| onpress.emit(()))
    };

    let fill = resolve_fill(*state, props.base, props.hover, props.press);

    html! {
        <button
            type="button"
            ref={props.node_ref.clone()}
            class={classes!("pressable", props.class.clone())}
            style={press_style(*state, fill)}
            aria-label={props.label.clone()}
            onmouseenter={onmouseenter}
            onmouseleave={onmouseleave}
            onmousedown={onmousedown}
            onmouseup={onmouseup}
            onclick={onclick}
        >
            {props.children.clone()}
        </button>
    }
}

const CTA_HOVER: Fill = Fill::new("#111", "#fff");
const CTA_SECONDARY_HOVER: Fill = Fill::new("#fff", "#000");
const PROJECT_LINK_HOVER: Fill = Fill::new("rgba(255,204,0,0.06)", "#ffcc00");
const CONTACT_HOVER: Fill = Fill::background("rgba(255,255,255,0.08)");
const SOCIAL_HOVER: Fill = Fill::new("rgba(255,255,255,0.06)", "#fff");
const SOCIAL_PRESS: Fill = Fill::new("rgba(255,255,255,0.12)", "#fff");

#[function_component(App)]
fn app() -> Html {
    let page = use_reducer(|| PageState::new(current_viewport(), now_ms()));
    let nav_refs = use_memo((), |_| NavRefs::default());
    let section_refs = use_memo((), |_| <[NodeRef; 5]>::default());
    let scroll_ref = use_node_ref();

    use_frame_clock(page.dispatcher());
    use_viewport_listener(page.dispatcher());
    use_project_loader(page.dispatcher());

    {
        let nav_refs = nav_refs.clone();
        let section_refs = section_refs.clone();
        let dispatcher = page.dispatcher();
        let layout_inputs = (
            page.active(),
            page.viewport(),
            page.projects().map(<[_]>::len),
        );
        use_effect_with(layout_inputs, move |_| {
            measure_nav(&nav_refs, &dispatcher);
            measure_sections(&section_refs, &dispatcher);
            || ()
        });
    }

    let onscroll = {
        let dispatcher = page.dispatcher();
        Callback::from(move |event: Event| {
            if let Some(container) = event.target_dyn_into::<Element>() {
                dispatcher.dispatch(PageAction::Scrolled(f64::from(container.scroll_top())));
            }
        })
    };

    let on_section = {
        let scroll_ref = scroll_ref.clone();
        let targets = Section::ALL.map(|section| page.scroll_target(section));
        Callback::from(move |section: Section| {
            scroll_container_to(&scroll_ref, targets[section.index()]);
        })
    };

    let on_toggle_menu = {
        let dispatcher = page.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(PageAction::ToggleMenu))
    };

    let on_copy = {
        let dispatcher = page.dispatcher();
        Callback::from(move |target: ClipboardTarget| {
            let dispatcher = dispatcher.clone();
            spawn_local(async move {
                let written = write_clipboard(target.value()).await;
                if let Some(action) = clipboard_outcome(target, written) {
                    dispatcher.dispatch(action);
                }
            });
        })
    };

    let open_link = |url: String| Callback::from(move |()| open_external(&url));

    let now = page.now();
    let since_mount = page.since_mount();
    let mobile = page.is_mobile();
    let typewriter = page.typewriter();
    let underline = page.underline();
    let menu = page.menu();
    let toast = page.toast();

    let nav_bar = if mobile {
        html! {
            <div class="hamburger-container">
                <button
                    type="button"
                    class="hamburger-button"
                    aria-label="Toggle navigation"
                    aria-expanded={menu.is_open().to_string()}
                    onclick={on_toggle_menu}
                >
                    <span class="hamburger-line" />
                    <span class="hamburger-line" style="width: 18px;" />
                    <span class="hamburger-line" style="width: 14px;" />
                </button>
            </div>
        }
    } else {
        html! {
            <div class="nav-links" ref={nav_refs.row.clone()}>
                { for Section::ALL.into_iter().map(|section| {
                    let index = section.index();
                    let is_active = page.active() == section;
                    html! {
                        <Pressable
                            key={section.as_str()}
                            class="nav-link-container"
                            node_ref={nav_refs.links[index].clone()}
                            onpress={on_section.reform(move |()| section)}
                        >
                            <span
                                ref={nav_refs.labels[index].clone()}
                                class={classes!("nav-link", is_active.then_some("nav-link--active"))}
                                data-section={section.as_str()}
                            >
                                {section.label()}
                            </span>
                        </Pressable>
                    }
                }) }
                <span
                    class="nav-underline"
                    style={format!("left: {:.2}px; width: {:.2}px;", underline.left, underline.width)}
                />
            </div>
        }
    };

    let mobile_menu = if mobile && menu.is_rendered(now) {
        html! {
            <div class="mobile-menu" style={format!("height: {:.2}px;", menu.height(now))}>
                { for Section::ALL.into_iter().map(|section| {
                    let on_section = on_section.clone();
                    let dispatcher = page.dispatcher();
                    let onpress = Callback::from(move |()| {
                        on_section.emit(section);
                        dispatcher.dispatch(PageAction::CloseMenu);
                    });
                    html! {
                        <Pressable key={section.as_str()} class="mobile-menu-item" onpress={onpress}>
                            <span class="mobile-menu-text">{section.label()}</span>
                        </Pressable>
                    }
                }) }
            </div>
        }
    } else {
        Html::default()
    };

    let hero_title = HERO_INTRO[0].progress(since_mount);
    let hero_subtitle = HERO_INTRO[1].progress(since_mount);
    let hero_buttons = HERO_INTRO[2].progress(since_mount);

    let project_cards = match page.projects() {
        Some(projects) => projects
            .iter()
            .enumerate()
            .map(|(index, project)| {
                let progress = page.reveal_progress(Reveal::Projects, index);
                html! {
                    <div key={project.name.clone()} class="project-card" style={slide_style(progress, 'Y', 30.0)}>
                        <img class="project-image" src={project.image.clone()} alt={project.name.clone()} loading="lazy" />
                        <p class="project-title">{project.name.clone()}</p>
                        <p class="card-text">{project.description.clone()}</p>
                        <Pressable
                            class="project-link-button"
                            hover={PROJECT_LINK_HOVER}
                            onpress={open_link(project.url.clone())}
                        >
                            <span class="project-link">{"View on GitHub"}</span>
                        </Pressable>
                    </div>
                }
            })
            .collect::<Html>(),
        None => Html::default(),
    };

    html! {
        <div class="container">
            <nav class="navbar">
                <div class="nav-container">
                    <span class="logo">{OWNER}</span>
                    {nav_bar}
                </div>
                {mobile_menu}
            </nav>

            <div class="scroll-view" ref={scroll_ref} onscroll={onscroll}>
                <section class="section" ref={section_refs[Section::Hero.index()].clone()}>
                    <div class={classes!("hero-content", mobile.then_some("hero-content--mobile"))}>
                        <img
                            class="hero-image"
                            src="/assets/pfp2.png"
                            alt="dinonuwg avatar"
                            style={format!("transform: translateY({:.2}px);", float_offset(since_mount))}
                        />
                        <h1 class="hero-title" style={slide_style(hero_title, 'Y', 20.0)}>
                            {typewriter.typed(now)}
                            <span class="cursor" style={format!("opacity: {:.3};", typewriter.cursor_opacity(now))}>{"|"}</span>
                        </h1>
                        <p class="hero-subtitle" style={slide_style(hero_subtitle, 'Y', 20.0)}>{HERO_SUBTITLE}</p>
                        <div class="hero-buttons" style={slide_style(hero_buttons, 'Y', 20.0)}>
                            <Pressable
                                class="cta-button"
                                hover={CTA_HOVER}
                                onpress={on_section.reform(|()| Section::About)}
                            >
                                <span class="cta-button-text">{"Learn More"}</span>
                            </Pressable>
                            <Pressable
                                class="cta-button cta-button--secondary"
                                hover={CTA_SECONDARY_HOVER}
                                onpress={on_section.reform(|()| Section::Contact)}
                            >
                                <span class="cta-button-text">{"Contact Info"}</span>
                            </Pressable>
                        </div>
                    </div>
                </section>

                <section class="section" ref={section_refs[Section::About.index()].clone()}>
                    <div class="section-container">
                        <h2 class="section-title" style={scale_style(page.reveal_progress(Reveal::About, 0))}>{"About Me"}</h2>
                        <div class={classes!("about-row", mobile.then_some("about-row--mobile"))}>
                            <div class="about-text-container" style={slide_style(page.reveal_progress(Reveal::About, 1), 'X', -50.0)}>
                                { for ABOUT_PARAGRAPHS.iter().map(|paragraph| html! { <p class="about-text">{*paragraph}</p> }) }
                            </div>
                            <img
                                class="about-image"
                                src="/assets/pfp.png"
                                alt="dinonuwg portrait"
                                style={slide_style(page.reveal_progress(Reveal::About, 2), 'X', 50.0)}
                            />
                        </div>
                    </div>
                </section>

                <section class="section" ref={section_refs[Section::Interests.index()].clone()}>
                    <div class="section-container">
                        <h2 class="section-title">{"My Interests"}</h2>
                        <div class="interests-grid">
                            { for INTERESTS.iter().enumerate().map(|(index, interest)| html! {
                                <div class="interest-card" style={slide_style(page.reveal_progress(Reveal::Interests, index), 'Y', 30.0)}>
                                    <p class="interest-title">{interest.title}</p>
                                    <p class="card-text">{interest.description}</p>
                                </div>
                            }) }
                        </div>
                    </div>
                </section>

                <section class="section" ref={section_refs[Section::Projects.index()].clone()}>
                    <div class="section-container">
                        <h2 class="section-title">{"Projects"}</h2>
                        <div class="projects-grid">{project_cards}</div>
                    </div>
                </section>

                <section class="section" ref={section_refs[Section::Contact.index()].clone()}>
                    <div class="section-container" style={scale_style(page.reveal_progress(Reveal::Contact, 0))}>
                        <h2 class="section-title">{"Contact Me"}</h2>
                        <div class="contact-content">
                            <Pressable
                                class="contact-button"
                                label="Copy email address"
                                hover={CONTACT_HOVER}
                                onpress={on_copy.reform(|()| ClipboardTarget::Email)}
                            >
                                <img class="contact-icon" src="/assets/mail.png" alt="" />
                            </Pressable>
                            <Pressable
                                class="contact-button"
                                label="Copy Discord tag"
                                hover={CONTACT_HOVER}
                                onpress={on_copy.reform(|()| ClipboardTarget::Discord)}
                            >
                                <img class="contact-icon" src="/assets/discord.png" alt="" />
                            </Pressable>
                        </div>
                    </div>
                </section>

                <footer class="footer" style={slide_style(page.reveal_progress(Reveal::Footer, 0), 'Y', 30.0)}>
                    <div class="footer-container">
                        <p class="footer-text">{FOOTER_NOTICE}</p>
                        <div class="social-links">
                            <Pressable
                                class="social-button"
                                hover={SOCIAL_HOVER}
                                press={SOCIAL_PRESS}
                                onpress={open_link(GITHUB_PROFILE_URL.to_string())}
                            >
                                <span class="social-link">{"GitHub"}</span>
                            </Pressable>
                            <Pressable
                                class="social-button"
                                hover={SOCIAL_HOVER}
                                press={SOCIAL_PRESS}
                                onpress={on_copy.reform(|()| ClipboardTarget::Email)}
                            >
                                <span class="social-link">{"Email"}</span>
                            </Pressable>
                            <Pressable
                                class="social-button"
                                hover={SOCIAL_HOVER}
                                press={SOCIAL_PRESS}
                                onpress={on_copy.reform(|()| ClipboardTarget::Discord)}
                            >
                                <span class="social-link">{"Discord"}</span>
                            </Pressable>
                        </div>
                    </div>
                </footer>
            </div>

            if let Some(message) = toast.message() {
                <div class="notification" style={format!("transform: translateX({:.2}px);", toast.offset(now))}>
                    <p class="notification-text">{message.to_string()}</p>
                </div>
            }
        </div>
    }
}

pub fn run() {
    telemetry::set_min_level(telemetry::level_from_setting(option_env!("LOG_LEVEL")));

    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
