//! The page component exported to JavaScript.
//!
//! `new PortfolioFx()` wires every effect to the live document once the page is
//! ready; `destroy()` (or `free()`) removes every listener, timer and pending
//! animation frame again.

use super::dom::{element_info, html_element_by_id, scroll_metrics, DomSurface, LocalThemeStore, RafScheduler};
use crate::config::FxConfig;
use crate::error::{log_error, FxError, FxResult};
use crate::feedback::PointerFeedback;
use crate::parallax::Tilt;
use crate::types::{FrameToken, Point, Rect};
use crate::widgets::*;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::{Interval, Timeout};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, ErrorEvent, HtmlDocument, HtmlElement, HtmlTextAreaElement, MouseEvent,
    PromiseRejectionEvent, ScrollBehavior, ScrollToOptions, VisibilityState, Window,
};

/// Delegated enter/leave listeners; dropping them detaches both.
pub struct HoverListeners {
    _enter: EventListener,
    _leave: EventListener,
}

type WebFeedback = PointerFeedback<DomSurface, RafScheduler, HoverListeners>;

struct ScrollState {
    progress: ScrollProgress,
    scheduler: RafScheduler,
}

/// The toast on screen and the timers that fade and remove it.
struct ToastHandle {
    element: HtmlElement,
    _fade: Timeout,
    _remove: Timeout,
}

impl ToastHandle {
    fn dismiss(self) {
        self.element.remove();
    }
}

/// Image currently tilted by the pointer.
struct Parallax {
    card_selector: String,
    active: Option<HtmlElement>,
}

impl Parallax {
    fn on_move(&mut self, event: &MouseEvent) {
        let target = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(&self.card_selector).ok().flatten());
        let card_and_image = target.and_then(|card| {
            let image = card
                .query_selector("img")
                .ok()
                .flatten()?
                .dyn_into::<HtmlElement>()
                .ok()?;
            Some((card, image))
        });

        let Some((card, image)) = card_and_image else {
            self.reset();
            return;
        };
        if self.active.as_ref() != Some(&image) {
            self.reset();
        }
        let r = card.get_bounding_client_rect();
        let rect = Rect::new(r.left(), r.top(), r.width(), r.height());
        let pointer = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
        if let Some(tilt) = Tilt::toward(rect, pointer) {
            let _ = image.style().set_property("transform", &tilt.css());
        }
        self.active = Some(image);
    }

    fn reset(&mut self) {
        if let Some(image) = self.active.take() {
            let _ = image.style().set_property("transform", &Tilt::RESET.css());
        }
    }
}

/// All effects of one page session.
#[wasm_bindgen]
pub struct PortfolioFx {
    config: FxConfig,
    document: Document,
    feedback: Option<Rc<RefCell<WebFeedback>>>,
    scroll: Rc<RefCell<ScrollState>>,
    parallax: Rc<RefCell<Parallax>>,
    menu: MenuToggle,
    theme: Theme,
    theme_store: LocalThemeStore,
    clock: Option<Interval>,
    listeners: Vec<EventListener>,
    toast: Rc<RefCell<ToastSlot<ToastHandle>>>,
}

fn window() -> FxResult<Window> {
    web_sys::window().ok_or(FxError::Unsupported("window"))
}

fn event_element(event: &web_sys::Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn with_feedback(fx: &Weak<RefCell<WebFeedback>>, f: impl FnOnce(&mut WebFeedback)) {
    let Some(fx) = fx.upgrade() else {
        return;
    };
    // A busy component means we are already inside one of its callbacks.
    if let Ok(mut fx) = fx.try_borrow_mut() {
        f(&mut fx);
    }
}

fn attach_hover_delegates(
    document: &Document,
    fx: Weak<RefCell<WebFeedback>>,
) -> FxResult<HoverListeners> {
    let enter_fx = fx.clone();
    let enter = EventListener::new_with_options(
        document,
        "mouseenter",
        EventListenerOptions::run_in_capture_phase(),
        move |event| {
            if let Some(el) = event_element(event) {
                with_feedback(&enter_fx, |fx| fx.on_interactive_enter(&element_info(&el)));
            }
        },
    );
    let leave = EventListener::new_with_options(
        document,
        "mouseleave",
        EventListenerOptions::run_in_capture_phase(),
        move |event| {
            if let Some(el) = event_element(event) {
                with_feedback(&fx, |fx| fx.on_interactive_leave(&element_info(&el)));
            }
        },
    );
    Ok(HoverListeners {
        _enter: enter,
        _leave: leave,
    })
}

fn register_hover(document: &Document, fx: &Rc<RefCell<WebFeedback>>) -> bool {
    let weak = Rc::downgrade(fx);
    let Ok(mut feedback) = fx.try_borrow_mut() else {
        return false;
    };
    match feedback.register_interactive_hover_tracking(|| attach_hover_delegates(document, weak)) {
        Ok(attached) => attached,
        Err(e) => {
            log_error("hover tracking not registered", &e);
            false
        }
    }
}

fn apply_theme(document: &Document, theme: Theme) {
    if let Some(root) = document.document_element() {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
}

fn system_prefers_dark(window: &Window) -> Option<bool> {
    window
        .match_media("(prefers-color-scheme: dark)")
        .ok()
        .flatten()
        .map(|mq| mq.matches())
}

fn write_clock(document: &Document, element_id: &str, clock: &ClockDisplay) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(&clock.now_text()));
    }
}

async fn write_platform_clipboard(text: &str) -> FxResult<()> {
    let navigator: JsValue = window()?.navigator().into();
    let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(FxError::Unsupported("navigator.clipboard"));
    }
    let write_text = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))?
        .dyn_into::<js_sys::Function>()
        .map_err(|_| FxError::Unsupported("clipboard.writeText"))?;
    let promise = write_text
        .call1(&clipboard, &JsValue::from_str(text))?
        .dyn_into::<js_sys::Promise>()
        .map_err(|_| FxError::Clipboard("writeText did not return a promise".into()))?;
    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| FxError::Clipboard(format!("{e:?}")))
}

fn legacy_copy(document: &Document, text: &str) -> FxResult<()> {
    let body = document
        .body()
        .ok_or_else(|| FxError::MissingElement("body".into()))?;
    let area = document
        .create_element("textarea")?
        .dyn_into::<HtmlTextAreaElement>()
        .map_err(|_| FxError::Js("textarea cast failed".into()))?;
    area.set_value(text);
    let _ = area.style().set_property("position", "fixed");
    let _ = area.style().set_property("opacity", "0");
    body.append_child(&area)?;
    area.select();
    let accepted = document
        .clone()
        .dyn_into::<HtmlDocument>()
        .map_err(|_| FxError::Unsupported("execCommand"))
        .and_then(|doc| Ok(doc.exec_command("copy")?));
    let _ = body.remove_child(&area);
    legacy_copy_result(accepted?)
}

fn show_toast(
    document: &Document,
    toast: &Toast,
    timing: &crate::config::ToastConfig,
    slot: &Rc<RefCell<ToastSlot<ToastHandle>>>,
) -> FxResult<()> {
    let body = document
        .body()
        .ok_or_else(|| FxError::MissingElement("body".into()))?;
    let el = document
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| FxError::Js("toast cast failed".into()))?;
    let kind = match toast.kind {
        ToastKind::Success => "fx-toast fx-toast--success",
        ToastKind::Failure => "fx-toast fx-toast--failure",
    };
    el.set_class_name(kind);
    el.set_text_content(Some(&toast.message));
    body.append_child(&el)?;

    let fading = el.clone();
    let fade_ms = timing.fade_ms;
    let fade = Timeout::new(timing.display_ms, move || {
        let style = fading.style();
        let _ = style.set_property("transition", &format!("opacity {fade_ms}ms"));
        let _ = style.set_property("opacity", "0");
    });
    let removing = el.clone();
    let remove = Timeout::new(timing.total_ms(), move || removing.remove());
    let handle = ToastHandle {
        element: el,
        _fade: fade,
        _remove: remove,
    };
    if let Some(previous) = slot.borrow_mut().show(handle) {
        previous.dismiss();
    }
    Ok(())
}

impl PortfolioFx {
    fn build(config_json: Option<&str>) -> FxResult<PortfolioFx> {
        let config = match config_json {
            Some(json) => FxConfig::from_json(json)?,
            None => FxConfig::standard(),
        };
        let window = window()?;
        let document = window
            .document()
            .ok_or(FxError::Unsupported("document"))?;
        let mut listeners = Vec::new();

        let theme_store = LocalThemeStore::open();
        let theme = resolve_theme(&theme_store, &config.theme_key, system_prefers_dark(&window));
        apply_theme(&document, theme);

        let width = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0);
        let feedback = if config.feedback.follower_enabled_for(width) {
            Some(Self::install_pointer_loop(&config, &document, &mut listeners))
        } else {
            DomSurface::new(document.clone(), config.feedback.clone()).hide_followers();
            log::info!("viewport {width}px wide, cursor follower disabled");
            None
        };

        let parallax = Rc::new(RefCell::new(Parallax {
            card_selector: config.feedback.card_selector.clone(),
            active: None,
        }));
        if feedback.is_some() {
            let parallax = Rc::clone(&parallax);
            listeners.push(EventListener::new(&document, "mousemove", move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    if let Ok(mut parallax) = parallax.try_borrow_mut() {
                        parallax.on_move(event);
                    }
                }
            }));
            if let Some(root) = document.document_element() {
                let parallax = Rc::clone(&parallax);
                listeners.push(EventListener::new(&root, "mouseleave", move |_| {
                    if let Ok(mut parallax) = parallax.try_borrow_mut() {
                        parallax.reset();
                    }
                }));
            }
        }

        let scroll = Self::install_scroll_progress(&config, &window, &document, &mut listeners);

        {
            let visibility_doc = document.clone();
            let fx = feedback.as_ref().map(Rc::downgrade);
            let scroll = Rc::downgrade(&scroll);
            listeners.push(EventListener::new(&document, "visibilitychange", move |_| {
                if visibility_doc.visibility_state() != VisibilityState::Hidden {
                    return;
                }
                if let Some(fx) = &fx {
                    with_feedback(fx, |fx| {
                        fx.suspend();
                    });
                }
                if let Some(scroll) = scroll.upgrade() {
                    if let Ok(mut state) = scroll.try_borrow_mut() {
                        let state = &mut *state;
                        state.progress.suspend(&mut state.scheduler);
                    }
                }
            }));
        }

        listeners.push(EventListener::new(&window, "error", |event| {
            let message = event
                .dyn_ref::<ErrorEvent>()
                .map(|e| e.message())
                .unwrap_or_else(|| "unknown error".to_string());
            log::error!("uncaught error: {message}");
        }));
        listeners.push(EventListener::new(&window, "unhandledrejection", |event| {
            let reason = event
                .dyn_ref::<PromiseRejectionEvent>()
                .map(|e| format!("{:?}", e.reason()))
                .unwrap_or_default();
            log::error!("unhandled rejection: {reason}");
        }));

        let clock_display = ClockDisplay::new(&config.clock);
        write_clock(&document, &config.clock.element_id, &clock_display);
        let clock = {
            let document = document.clone();
            let element_id = config.clock.element_id.clone();
            Interval::new(config.clock.interval_ms, move || {
                write_clock(&document, &element_id, &clock_display)
            })
        };

        log::info!("portfolio effects ready");
        Ok(PortfolioFx {
            config,
            document,
            feedback,
            scroll,
            parallax,
            menu: MenuToggle::new(),
            theme,
            theme_store,
            clock: Some(clock),
            listeners,
            toast: Rc::new(RefCell::new(ToastSlot::new())),
        })
    }

    fn install_pointer_loop(
        config: &FxConfig,
        document: &Document,
        listeners: &mut Vec<EventListener>,
    ) -> Rc<RefCell<WebFeedback>> {
        let feedback = Rc::new_cyclic(|weak: &Weak<RefCell<WebFeedback>>| {
            let weak = weak.clone();
            let on_frame: Rc<dyn Fn(FrameToken)> = Rc::new(move |token| {
                with_feedback(&weak, |fx| {
                    fx.run_visual_update(token);
                });
            });
            let surface = DomSurface::new(document.clone(), config.feedback.clone());
            RefCell::new(PointerFeedback::new(
                &config.feedback,
                surface,
                RafScheduler::new(on_frame),
            ))
        });

        let fx = Rc::downgrade(&feedback);
        listeners.push(EventListener::new(document, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let (x, y) = (f64::from(event.client_x()), f64::from(event.client_y()));
            with_feedback(&fx, |fx| {
                if let Err(e) = fx.on_pointer_move(x, y) {
                    log_error("visual update not scheduled", &e);
                }
            });
        }));

        if let Some(root) = document.document_element() {
            let fx = Rc::downgrade(&feedback);
            listeners.push(EventListener::new(&root, "mouseleave", move |_| {
                with_feedback(&fx, |fx| fx.on_pointer_leave_window());
            }));
        }

        register_hover(document, &feedback);
        feedback
    }

    fn install_scroll_progress(
        config: &FxConfig,
        window: &Window,
        document: &Document,
        listeners: &mut Vec<EventListener>,
    ) -> Rc<RefCell<ScrollState>> {
        let scroll = Rc::new_cyclic(|weak: &Weak<RefCell<ScrollState>>| {
            let weak = weak.clone();
            let document = document.clone();
            let bar_id = config.scroll_bar_id.clone();
            let on_frame: Rc<dyn Fn(FrameToken)> = Rc::new(move |token| {
                let Some(state) = weak.upgrade() else {
                    return;
                };
                let percent = match state.try_borrow_mut() {
                    Ok(mut state) => state.progress.run(token),
                    Err(_) => None,
                };
                if let (Some(percent), Ok(bar)) = (percent, html_element_by_id(&document, &bar_id)) {
                    let _ = bar
                        .style()
                        .set_property("width", &ScrollProgress::css_width(percent));
                }
            });
            RefCell::new(ScrollState {
                progress: ScrollProgress::new(),
                scheduler: RafScheduler::new(on_frame),
            })
        });

        let state = Rc::downgrade(&scroll);
        let scroll_doc = document.clone();
        listeners.push(EventListener::new(window, "scroll", move |_| {
            let (Some(state), Some(metrics)) = (state.upgrade(), scroll_metrics(&scroll_doc)) else {
                return;
            };
            if let Ok(mut state) = state.try_borrow_mut() {
                let state = &mut *state;
                if let Err(e) = state.progress.on_scroll(metrics, &mut state.scheduler) {
                    log_error("scroll progress not scheduled", &e);
                }
            }
        }));
        scroll
    }
}

#[wasm_bindgen]
impl PortfolioFx {
    /// Wires every effect to the current document.
    ///
    /// `config_json` optionally overrides ids, selectors and timings.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<PortfolioFx, JsValue> {
        Self::build(config_json.as_deref()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Opens or closes the slide-out menu. Returns whether the menu is now open.
    #[wasm_bindgen(js_name = toggleMenu)]
    pub fn toggle_menu(&mut self) -> bool {
        let ids = &self.config.menu;
        let overlay = match html_element_by_id(&self.document, &ids.overlay_id) {
            Ok(overlay) => overlay,
            Err(e) => {
                log_error("menu toggle ignored", &e);
                return self.menu.is_open();
            }
        };
        let effects = self.menu.toggle();
        let _ = overlay
            .style()
            .set_property("display", effects.overlay_display);
        if let (Ok(top), Ok(bottom)) = (
            html_element_by_id(&self.document, &ids.top_line_id),
            html_element_by_id(&self.document, &ids.bottom_line_id),
        ) {
            let _ = top
                .style()
                .set_property("transform", effects.top_line_transform);
            let _ = bottom
                .style()
                .set_property("transform", effects.bottom_line_transform);
        }
        if let Some(body) = self.document.body() {
            let _ = body.style().set_property("overflow", effects.body_overflow);
        }
        if self.menu.is_open() {
            self.refresh_hover_tracking();
        }
        self.menu.is_open()
    }

    /// Makes sure interactive hover tracking is attached. Returns whether this
    /// call attached it.
    #[wasm_bindgen(js_name = refreshHoverTracking)]
    pub fn refresh_hover_tracking(&self) -> bool {
        match &self.feedback {
            Some(fx) => register_hover(&self.document, fx),
            None => false,
        }
    }

    /// Copies `text` to the clipboard and shows the result as a toast.
    #[wasm_bindgen(js_name = copyEmail)]
    pub fn copy_email(&self, text: String) {
        let document = self.document.clone();
        let timing = self.config.toast;
        let slot = Rc::clone(&self.toast);
        wasm_bindgen_futures::spawn_local(async move {
            let platform = write_platform_clipboard(&text).await;
            let report = settle_copy(platform, || legacy_copy(&document, &text));
            let toast = Toast::for_copy(report, js_sys::Date::now());
            if let Err(e) = show_toast(&document, &toast, &timing, &slot) {
                log_error("toast not shown", &e);
            }
        });
    }

    /// Smoothly scrolls back to the top of the page.
    #[wasm_bindgen(js_name = scrollToTop)]
    pub fn scroll_to_top(&self) {
        if let Ok(window) = window() {
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        }
    }

    /// Switches between light and dark, persists the choice and returns its name.
    #[wasm_bindgen(js_name = toggleTheme)]
    pub fn toggle_theme(&mut self) -> String {
        self.theme = self.theme.toggled();
        apply_theme(&self.document, self.theme);
        persist_theme(&mut self.theme_store, &self.config.theme_key, self.theme);
        self.theme.as_str().to_string()
    }

    /// Whether the pointer is over an interactive element.
    #[wasm_bindgen(getter, js_name = isHovering)]
    pub fn is_hovering(&self) -> bool {
        self.feedback
            .as_ref()
            .and_then(|fx| fx.try_borrow().ok().map(|fx| fx.is_hovering()))
            .unwrap_or(false)
    }

    /// Removes every listener, timer and pending frame.
    pub fn destroy(&mut self) {
        self.listeners.clear();
        self.clock = None;
        if let Some(toast) = self.toast.borrow_mut().clear() {
            toast.dismiss();
        }
        self.parallax.borrow_mut().reset();
        {
            let state = &mut *self.scroll.borrow_mut();
            state.progress.suspend(&mut state.scheduler);
        }
        if let Some(fx) = self.feedback.take() {
            let mut fx = fx.borrow_mut();
            fx.suspend();
            drop(fx.unregister_hover_tracking());
            log::debug!("pointer loop stats: {:?}", fx.stats());
        }
    }
}

impl Drop for PortfolioFx {
    fn drop(&mut self) {
        self.destroy();
    }
}
