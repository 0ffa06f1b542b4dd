//! Browser implementations of the core's page and frame abstractions.

use crate::config::FeedbackConfig;
use crate::error::{FxError, FxResult};
use crate::feedback::Surface;
use crate::scheduler::FrameScheduler;
use crate::types::*;
use crate::widgets::{ScrollMetrics, ThemeStore};
use gloo::render::{request_animation_frame, AnimationFrame};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Storage};

/// Describes a DOM element to the interactive predicate.
pub fn element_info(element: &Element) -> ElementInfo {
    // `className` is not a string on SVG elements, the attribute always is.
    let classes = element
        .get_attribute("class")
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    ElementInfo {
        tag: element.tag_name().to_ascii_lowercase(),
        classes,
    }
}

/// Looks up an element by id as an `HtmlElement`.
pub fn html_element_by_id(document: &Document, id: &str) -> FxResult<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| FxError::MissingElement(format!("#{id}")))
}

/// Current document scroll metrics.
pub fn scroll_metrics(document: &Document) -> Option<ScrollMetrics> {
    let root = document.document_element()?;
    let body_top = document.body().map(|b| f64::from(b.scroll_top())).unwrap_or(0.0);
    Some(ScrollMetrics {
        scroll_top: body_top.max(f64::from(root.scroll_top())),
        scroll_height: f64::from(root.scroll_height()),
        client_height: f64::from(root.client_height()),
    })
}

/// The live page, as seen by the pointer loop.
pub struct DomSurface {
    document: Document,
    config: FeedbackConfig,
}

impl DomSurface {
    /// Wraps `document` using the ids and selectors from `config`.
    pub fn new(document: Document, config: FeedbackConfig) -> Self {
        Self { document, config }
    }

    fn follower_id(&self, follower: Follower) -> &str {
        match follower {
            Follower::Dot => &self.config.dot_id,
            Follower::Ring => &self.config.ring_id,
        }
    }

    /// Hides both followers, used on narrow viewports.
    pub fn hide_followers(&self) {
        for follower in Follower::ALL {
            if let Ok(el) = html_element_by_id(&self.document, self.follower_id(follower)) {
                let _ = el.style().set_property("display", "none");
            }
        }
    }
}

impl Surface for DomSurface {
    type Card = HtmlElement;

    fn place_follower(&mut self, follower: Follower, at: Point) -> FxResult<()> {
        let el = html_element_by_id(&self.document, self.follower_id(follower))?;
        el.style()
            .set_property("transform", &Follower::transform(at))?;
        Ok(())
    }

    fn cards(&self) -> Vec<HtmlElement> {
        let Ok(list) = self.document.query_selector_all(&self.config.card_selector) else {
            log::warn!("invalid card selector {:?}", self.config.card_selector);
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn card_rect(&self, card: &HtmlElement) -> FxResult<Rect> {
        let r = card.get_bounding_client_rect();
        Ok(Rect::new(r.left(), r.top(), r.width(), r.height()))
    }

    fn set_card_glow(&mut self, card: &HtmlElement, glow: GlowOffset) -> FxResult<()> {
        let (x, y) = glow.css_values();
        let style = card.style();
        style.set_property(&self.config.glow_x_property, &x)?;
        style.set_property(&self.config.glow_y_property, &y)?;
        Ok(())
    }

    fn set_hover_class(&mut self, hovering: bool) -> FxResult<()> {
        let body = self
            .document
            .body()
            .ok_or_else(|| FxError::MissingElement("body".into()))?;
        body.class_list()
            .toggle_with_force(&self.config.hover_class, hovering)?;
        Ok(())
    }
}

/// Frame scheduler backed by `requestAnimationFrame`.
///
/// Fired tokens are routed to `on_frame`; the owner decides what runs.
pub struct RafScheduler {
    next_id: u64,
    pending: Option<(FrameToken, AnimationFrame)>,
    on_frame: Rc<dyn Fn(FrameToken)>,
}

impl RafScheduler {
    /// Creates a scheduler delivering fired tokens to `on_frame`.
    pub fn new(on_frame: Rc<dyn Fn(FrameToken)>) -> Self {
        Self {
            next_id: 0,
            pending: None,
            on_frame,
        }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> FxResult<FrameToken> {
        if web_sys::window().is_none() {
            return Err(FxError::Unsupported("animation frames"));
        }
        self.next_id += 1;
        let token = FrameToken(self.next_id);
        let on_frame = Rc::clone(&self.on_frame);
        let handle = request_animation_frame(move |_timestamp| on_frame(token));
        self.pending = Some((token, handle));
        Ok(token)
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if matches!(&self.pending, Some((pending, _)) if *pending == token) {
            // Dropping the handle cancels the animation frame.
            self.pending = None;
        }
    }
}

/// `localStorage` as a theme store.
pub struct LocalThemeStore {
    storage: Option<Storage>,
}

impl LocalThemeStore {
    /// Opens `localStorage`; a denied or missing store is remembered as unavailable.
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        Self { storage }
    }

    fn storage(&self) -> FxResult<&Storage> {
        self.storage
            .as_ref()
            .ok_or(FxError::Unsupported("localStorage"))
    }
}

impl ThemeStore for LocalThemeStore {
    fn read(&self, key: &str) -> FxResult<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| FxError::Storage(format!("{e:?}")))
    }

    fn write(&mut self, key: &str, value: &str) -> FxResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| FxError::Storage(format!("{e:?}")))
    }
}
