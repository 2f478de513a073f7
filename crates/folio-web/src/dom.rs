#![forbid(unsafe_code)]

//! `web-sys` implementations of the core seam traits.
//!
//! Every lookup that can come back empty stays optional here; a missing
//! element turns the matching write into a no-op.

use folio_core::bindings::{CATEGORY_ATTRIBUTE, PAGE_ATTRIBUTE};
use folio_core::{
    ACTIVE_CLASS, ActiveClass, CardSource, Categorized, LinkSlot, Marker, ModalSurface,
    PageSection, ScrollHost, THEME_ATTRIBUTE, TextSlot, ThemeSurface,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlAnchorElement, HtmlElement, HtmlImageElement, Window};

/// Body style properties set while the page is frozen.
const FREEZE_PROPERTIES: [&str; 6] = ["position", "top", "left", "right", "width", "overflow"];

pub(crate) fn query_one(document: &Document, marker: Marker) -> Option<Element> {
    document.query_selector(marker.selector()).ok().flatten()
}

pub(crate) fn query_all(document: &Document, marker: Marker) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(marker.selector()) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|index| list.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn query_within(parent: &Element, marker: Marker) -> Option<Element> {
    parent.query_selector(marker.selector()).ok().flatten()
}

fn set_display(element: &HtmlElement, value: &str) {
    let _ = element.style().set_property("display", value);
}

/// Handle to one element driven by the active class.
#[derive(Debug, Clone)]
pub struct DomElement {
    element: Element,
}

impl DomElement {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    /// Rendered text, as the user sees it.
    #[must_use]
    pub fn text(&self) -> String {
        let text = match self.element.dyn_ref::<HtmlElement>() {
            Some(html) => html.inner_text(),
            None => self.element.text_content().unwrap_or_default(),
        };
        text.trim().to_owned()
    }
}

impl ActiveClass for DomElement {
    fn is_active(&self) -> bool {
        self.element.class_list().contains(ACTIVE_CLASS)
    }

    fn set_active(&mut self, active: bool) {
        let classes = self.element.class_list();
        let _ = if active {
            classes.add_1(ACTIVE_CLASS)
        } else {
            classes.remove_1(ACTIVE_CLASS)
        };
    }
}

impl TextSlot for DomElement {
    fn set_text(&mut self, text: &str) {
        match self.element.dyn_ref::<HtmlElement>() {
            Some(html) => html.set_inner_text(text),
            None => self.element.set_text_content(Some(text)),
        }
    }
}

impl Categorized for DomElement {
    fn category(&self) -> Option<String> {
        self.element.get_attribute(CATEGORY_ATTRIBUTE)
    }
}

impl PageSection for DomElement {
    fn page_name(&self) -> Option<String> {
        self.element.get_attribute(PAGE_ATTRIBUTE)
    }
}

/// Root theme attribute plus the toggle control.
#[derive(Debug, Clone)]
pub struct DomThemeSurface {
    root: Element,
    toggle: Option<Element>,
    icon: Option<Element>,
    label: Option<Element>,
}

impl DomThemeSurface {
    pub fn new(root: Element, toggle: Option<Element>) -> Self {
        let icon = toggle
            .as_ref()
            .and_then(|toggle| query_within(toggle, Marker::ThemeIcon));
        let label = toggle
            .as_ref()
            .and_then(|toggle| query_within(toggle, Marker::ThemeLabel));
        Self {
            root,
            toggle,
            icon,
            label,
        }
    }
}

impl ThemeSurface for DomThemeSurface {
    fn theme_attribute(&self) -> Option<String> {
        self.root.get_attribute(THEME_ATTRIBUTE)
    }

    fn set_theme_attribute(&mut self, name: &str) {
        let _ = self.root.set_attribute(THEME_ATTRIBUTE, name);
    }

    fn set_toggle_icon(&mut self, icon: &str) {
        if let Some(el) = &self.icon {
            let _ = el.set_attribute("name", icon);
        }
    }

    fn set_toggle_label(&mut self, accessible: &str, text: &str) {
        if let Some(toggle) = &self.toggle {
            let _ = toggle.set_attribute("aria-label", accessible);
            let _ = toggle.set_attribute("title", accessible);
        }
        if let Some(label) = &self.label {
            label.set_text_content(Some(text));
        }
    }
}

/// Modal container, overlay, and content slots.
#[derive(Debug, Clone)]
pub struct DomModalSurface {
    container: Element,
    overlay: Option<Element>,
    content: Option<Element>,
    image: Option<HtmlImageElement>,
    title: Option<Element>,
    text: Option<Element>,
    repo: Option<HtmlAnchorElement>,
    demo: Option<HtmlAnchorElement>,
}

impl DomModalSurface {
    /// Resolve every slot; `None` when the container itself is missing.
    pub fn locate(document: &Document) -> Option<Self> {
        let container = query_one(document, Marker::ModalContainer)?;
        let anchor = |marker| {
            query_one(document, marker).and_then(|el| el.dyn_into::<HtmlAnchorElement>().ok())
        };
        Some(Self {
            overlay: query_one(document, Marker::ModalOverlay),
            content: query_one(document, Marker::ModalContent),
            image: query_one(document, Marker::ModalImage)
                .and_then(|el| el.dyn_into::<HtmlImageElement>().ok()),
            title: query_one(document, Marker::ModalTitle),
            text: query_one(document, Marker::ModalText),
            repo: anchor(Marker::ModalRepo),
            demo: anchor(Marker::ModalDemo),
            container,
        })
    }

    fn link(&self, slot: LinkSlot) -> Option<&HtmlAnchorElement> {
        match slot {
            LinkSlot::Repository => self.repo.as_ref(),
            LinkSlot::Demo => self.demo.as_ref(),
        }
    }
}

impl ModalSurface for DomModalSurface {
    fn set_image(&mut self, src: &str, alt: &str) {
        if let Some(img) = &self.image {
            img.set_src(src);
            img.set_alt(alt);
        }
    }

    fn set_title_html(&mut self, html: &str) {
        if let Some(title) = &self.title {
            title.set_inner_html(html);
        }
    }

    fn set_description_html(&mut self, html: &str) {
        if let Some(text) = &self.text {
            text.set_inner_html(html);
        }
    }

    fn set_link(&mut self, slot: LinkSlot, href: Option<&str>) {
        let Some(anchor) = self.link(slot) else {
            return;
        };
        match href {
            Some(href) => {
                anchor.set_href(href);
                set_display(anchor, "flex");
            }
            None => set_display(anchor, "none"),
        }
    }

    fn reset_content_scroll(&mut self) {
        self.content
            .as_ref()
            .unwrap_or(&self.container)
            .set_scroll_top(0);
    }

    fn set_active(&mut self, active: bool) {
        for element in std::iter::once(&self.container).chain(self.overlay.as_ref()) {
            let classes = element.class_list();
            let _ = if active {
                classes.add_1(ACTIVE_CLASS)
            } else {
                classes.remove_1(ACTIVE_CLASS)
            };
        }
    }
}

/// Window scroll position and body freezing.
#[derive(Debug, Clone)]
pub struct WindowScroll {
    window: Window,
    document: Document,
}

impl WindowScroll {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    fn root_style_target(&self) -> Option<HtmlElement> {
        self.document
            .document_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }
}

impl ScrollHost for WindowScroll {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scrollbar_width(&self) -> f64 {
        let inner = self
            .window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or(0.0);
        let client = self
            .document
            .document_element()
            .map_or(inner, |root| f64::from(root.client_width()));
        (inner - client).max(0.0)
    }

    fn freeze_body(&mut self, offset: f64) {
        let Some(body) = self.document.body() else {
            return;
        };
        let style = body.style();
        let top = format!("-{offset}px");
        for (property, value) in FREEZE_PROPERTIES.iter().zip([
            "fixed",
            top.as_str(),
            "0",
            "0",
            "100%",
            "hidden",
        ]) {
            let _ = style.set_property(property, value);
        }
    }

    fn release_body(&mut self) {
        let Some(body) = self.document.body() else {
            return;
        };
        let style = body.style();
        for property in FREEZE_PROPERTIES {
            let _ = style.remove_property(property);
        }
    }

    fn set_property(&mut self, property: &str, value: &str) {
        if let Some(root) = self.root_style_target() {
            let _ = root.style().set_property(property, value);
        }
    }

    fn remove_property(&mut self, property: &str) {
        if let Some(root) = self.root_style_target() {
            let _ = root.style().remove_property(property);
        }
    }

    fn scroll_to(&mut self, y: f64) {
        self.window.scroll_to_with_x_and_y(0.0, y);
    }
}

/// One `.project-item` card.
#[derive(Debug, Clone)]
pub struct DomCard {
    card: Element,
}

impl DomCard {
    pub fn new(card: Element) -> Self {
        Self { card }
    }
}

impl CardSource for DomCard {
    fn image(&self) -> Option<(String, String)> {
        let img = query_within(&self.card, Marker::ProjectImage)?
            .dyn_into::<HtmlImageElement>()
            .ok()?;
        Some((img.src(), img.alt()))
    }

    fn title_html(&self) -> Option<String> {
        query_within(&self.card, Marker::ProjectTitle).map(|el| el.inner_html())
    }

    fn description_html(&self) -> Option<String> {
        query_within(&self.card, Marker::ProjectDescription).map(|el| el.inner_html())
    }

    fn link_href(&self, slot: LinkSlot) -> Option<String> {
        let marker = match slot {
            LinkSlot::Repository => Marker::ProjectRepo,
            LinkSlot::Demo => Marker::ProjectDemo,
        };
        let el = query_within(&self.card, marker)?;
        // An empty href attribute resolves to the page URL through `.href`.
        let raw = el.get_attribute("href").unwrap_or_default();
        if raw.trim().is_empty() {
            return Some(String::new());
        }
        Some(
            el.dyn_ref::<HtmlAnchorElement>()
                .map_or(raw, HtmlAnchorElement::href),
        )
    }
}
