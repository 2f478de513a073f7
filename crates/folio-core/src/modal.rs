#![forbid(unsafe_code)]

//! Shared project-preview modal.
//!
//! One modal instance serves every project card: each preview click copies
//! the card's content into fixed slots, then opens. While open the page
//! behind it cannot scroll (see [`crate::scroll_lock`]).

use tracing::{debug, trace};

use crate::config::ModalConfig;
use crate::scroll_lock::{ScrollHost, ScrollLock, ScrollSnapshot};

/// Image slot content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectImage {
    pub src: String,
    pub alt: String,
}

/// Transient view of one project card.
///
/// `None` slots leave the modal's previous content in place; empty hrefs
/// hide the matching link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectSummary {
    pub image: Option<ProjectImage>,
    pub title_html: Option<String>,
    pub description_html: Option<String>,
    pub repo_href: String,
    pub demo_href: String,
}

/// Read access to one project card's parts.
pub trait CardSource {
    /// `(src, alt)` of the card image, if the card has one.
    fn image(&self) -> Option<(String, String)>;
    fn title_html(&self) -> Option<String>;
    fn description_html(&self) -> Option<String>;
    /// Resolved href of a card link; `None` when the element is missing.
    fn link_href(&self, slot: LinkSlot) -> Option<String>;
}

impl ProjectSummary {
    /// Extract the card's content, filling an empty alt with `fallback_alt`.
    pub fn from_card<C: CardSource + ?Sized>(card: &C, fallback_alt: &str) -> Self {
        let image = card.image().map(|(src, alt)| ProjectImage {
            src,
            alt: if alt.is_empty() {
                fallback_alt.to_owned()
            } else {
                alt
            },
        });
        Self {
            image,
            title_html: card.title_html(),
            description_html: card.description_html(),
            repo_href: card.link_href(LinkSlot::Repository).unwrap_or_default(),
            demo_href: card.link_href(LinkSlot::Demo).unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn href(&self, slot: LinkSlot) -> &str {
        match slot {
            LinkSlot::Repository => &self.repo_href,
            LinkSlot::Demo => &self.demo_href,
        }
    }
}

/// The two optional outbound links of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkSlot {
    Repository,
    Demo,
}

impl LinkSlot {
    pub const ALL: [Self; 2] = [Self::Repository, Self::Demo];
}

/// Modal DOM slots.
pub trait ModalSurface {
    fn set_image(&mut self, src: &str, alt: &str);
    fn set_title_html(&mut self, html: &str);
    fn set_description_html(&mut self, html: &str);
    /// Show the link with `href`, or hide it when `None`.
    fn set_link(&mut self, slot: LinkSlot, href: Option<&str>);
    /// Scroll the modal's own content back to the top.
    fn reset_content_scroll(&mut self);
    /// Toggle the active class on both container and overlay.
    fn set_active(&mut self, active: bool);
}

/// Visibility of the single modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

/// Owns modal visibility and the page scroll lock.
#[derive(Debug)]
pub struct ProjectModalController<M, H> {
    surface: M,
    host: H,
    lock: ScrollLock,
    state: ModalState,
}

impl<M: ModalSurface, H: ScrollHost> ProjectModalController<M, H> {
    pub fn new(surface: M, host: H, config: &ModalConfig) -> Self {
        Self {
            surface,
            host,
            lock: ScrollLock::new(&config.compensation_property),
            state: ModalState::Closed,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == ModalState::Open
    }

    #[must_use]
    pub fn state(&self) -> ModalState {
        self.state
    }

    #[must_use]
    pub fn surface(&self) -> &M {
        &self.surface
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn scroll_snapshot(&self) -> Option<ScrollSnapshot> {
        self.lock.snapshot()
    }

    /// Copy `summary` into the modal and open it.
    ///
    /// Re-opening while open repopulates and re-captures the scroll lock.
    pub fn populate_and_open(&mut self, summary: &ProjectSummary) {
        if let Some(image) = &summary.image {
            self.surface.set_image(&image.src, &image.alt);
        }
        if let Some(title) = &summary.title_html {
            self.surface.set_title_html(title);
        }
        if let Some(description) = &summary.description_html {
            self.surface.set_description_html(description);
        }
        for slot in LinkSlot::ALL {
            let href = summary.href(slot);
            self.surface.set_link(slot, (!href.is_empty()).then_some(href));
        }
        self.surface.reset_content_scroll();
        self.surface.set_active(true);
        let was_open = self.is_open();
        self.state = ModalState::Open;
        self.lock.engage(&mut self.host);
        debug!(
            target: "folio_core::modal",
            reopened = was_open,
            has_repo = !summary.repo_href.is_empty(),
            has_demo = !summary.demo_href.is_empty(),
            "project modal opened"
        );
    }

    /// Hide the modal and release the scroll lock.
    pub fn close(&mut self) {
        if !self.is_open() {
            trace!(target: "folio_core::modal", "close while already closed");
            return;
        }
        self.surface.set_active(false);
        self.state = ModalState::Closed;
        self.lock.release(&mut self.host);
        debug!(target: "folio_core::modal", "project modal closed");
    }

    /// Handle a document key press. Returns true when it closed the modal.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if !matches!(key, "Escape" | "Esc") || !self.is_open() {
            return false;
        }
        self.close();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll_lock::tests::FakeWindow;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    struct FakeModal {
        image: Option<(String, String)>,
        title: Option<String>,
        description: Option<String>,
        links: HashMap<LinkSlot, Option<String>>,
        content_scroll_resets: usize,
        active: bool,
    }

    impl ModalSurface for FakeModal {
        fn set_image(&mut self, src: &str, alt: &str) {
            self.image = Some((src.to_owned(), alt.to_owned()));
        }

        fn set_title_html(&mut self, html: &str) {
            self.title = Some(html.to_owned());
        }

        fn set_description_html(&mut self, html: &str) {
            self.description = Some(html.to_owned());
        }

        fn set_link(&mut self, slot: LinkSlot, href: Option<&str>) {
            self.links.insert(slot, href.map(str::to_owned));
        }

        fn reset_content_scroll(&mut self) {
            self.content_scroll_resets += 1;
        }

        fn set_active(&mut self, active: bool) {
            self.active = active;
        }
    }

    #[derive(Default)]
    struct FakeCard {
        image: Option<(String, String)>,
        title: Option<String>,
        description: Option<String>,
        repo: Option<String>,
        demo: Option<String>,
    }

    impl CardSource for FakeCard {
        fn image(&self) -> Option<(String, String)> {
            self.image.clone()
        }

        fn title_html(&self) -> Option<String> {
            self.title.clone()
        }

        fn description_html(&self) -> Option<String> {
            self.description.clone()
        }

        fn link_href(&self, slot: LinkSlot) -> Option<String> {
            match slot {
                LinkSlot::Repository => self.repo.clone(),
                LinkSlot::Demo => self.demo.clone(),
            }
        }
    }

    fn controller(y: f64) -> ProjectModalController<FakeModal, FakeWindow> {
        let host = FakeWindow {
            y,
            scrollbar: 12.0,
            ..FakeWindow::default()
        };
        ProjectModalController::new(FakeModal::default(), host, &ModalConfig::default())
    }

    fn summary(repo: &str, demo: &str) -> ProjectSummary {
        ProjectSummary {
            image: Some(ProjectImage {
                src: "/img/folio.png".to_owned(),
                alt: "Folio".to_owned(),
            }),
            title_html: Some("Folio <em>site</em>".to_owned()),
            description_html: Some("<p>Static portfolio</p>".to_owned()),
            repo_href: repo.to_owned(),
            demo_href: demo.to_owned(),
        }
    }

    #[test]
    fn empty_repo_hidden_demo_shown() {
        let mut ctl = controller(0.0);
        ctl.populate_and_open(&summary("", "https://x"));
        let links = &ctl.surface().links;
        assert_eq!(links[&LinkSlot::Repository], None);
        assert_eq!(links[&LinkSlot::Demo].as_deref(), Some("https://x"));
    }

    #[test]
    fn open_populates_slots_and_activates() {
        let mut ctl = controller(0.0);
        ctl.populate_and_open(&summary("https://repo", ""));
        let modal = ctl.surface();
        assert_eq!(
            modal.image,
            Some(("/img/folio.png".to_owned(), "Folio".to_owned()))
        );
        assert_eq!(modal.title.as_deref(), Some("Folio <em>site</em>"));
        assert_eq!(modal.description.as_deref(), Some("<p>Static portfolio</p>"));
        assert_eq!(modal.content_scroll_resets, 1);
        assert!(modal.active);
        assert!(ctl.is_open());
        assert_eq!(ctl.host().frozen_at, Some(0.0));
    }

    #[test]
    fn missing_slots_keep_previous_content() {
        let mut ctl = controller(0.0);
        ctl.populate_and_open(&summary("", ""));
        ctl.populate_and_open(&ProjectSummary::default());
        assert_eq!(ctl.surface().title.as_deref(), Some("Folio <em>site</em>"));
    }

    #[test]
    fn close_restores_scroll_even_if_moved() {
        let mut ctl = controller(880.0);
        ctl.populate_and_open(&summary("", ""));
        ctl.host_mut().y = 42.0;
        ctl.close();
        assert!(!ctl.is_open());
        assert!(!ctl.surface().active);
        assert_eq!(ctl.host().y, 880.0);
        assert_eq!(ctl.host().frozen_at, None);
    }

    #[test]
    fn reopen_is_idempotent_and_recaptures() {
        let mut ctl = controller(500.0);
        ctl.populate_and_open(&summary("", ""));
        ctl.populate_and_open(&summary("https://repo", ""));
        assert!(ctl.is_open());
        assert_eq!(
            ctl.scroll_snapshot().map(|snap| snap.offset),
            Some(500.0)
        );
        ctl.close();
        assert_eq!(ctl.host().y, 500.0);
    }

    #[test]
    fn escape_when_closed_is_noop() {
        let mut ctl = controller(100.0);
        assert!(!ctl.handle_key("Escape"));
        assert_eq!(ctl.state(), ModalState::Closed);
        assert!(ctl.host().scroll_calls.is_empty());
    }

    #[test]
    fn escape_when_open_closes() {
        let mut ctl = controller(100.0);
        ctl.populate_and_open(&summary("", ""));
        assert!(!ctl.handle_key("Enter"));
        assert!(ctl.is_open());
        assert!(ctl.handle_key("Esc"));
        assert!(!ctl.is_open());
    }

    #[test]
    fn double_close_does_not_scroll_twice() {
        let mut ctl = controller(70.0);
        ctl.populate_and_open(&summary("", ""));
        ctl.close();
        ctl.close();
        assert_eq!(ctl.host().scroll_calls, vec![70.0]);
    }

    #[test]
    fn summary_from_card_fills_alt_and_missing_links() {
        let card = FakeCard {
            image: Some(("/img/a.png".to_owned(), String::new())),
            title: Some("A".to_owned()),
            description: None,
            repo: None,
            demo: Some("https://demo".to_owned()),
        };
        let summary = ProjectSummary::from_card(&card, "Project image");
        assert_eq!(
            summary.image,
            Some(ProjectImage {
                src: "/img/a.png".to_owned(),
                alt: "Project image".to_owned(),
            })
        );
        assert_eq!(summary.description_html, None);
        assert_eq!(summary.repo_href, "");
        assert_eq!(summary.demo_href, "https://demo");
    }

    #[test]
    fn summary_from_card_keeps_existing_alt() {
        let card = FakeCard {
            image: Some(("/img/b.png".to_owned(), "Dashboard".to_owned())),
            ..FakeCard::default()
        };
        let summary = ProjectSummary::from_card(&card, "Project image");
        assert_eq!(summary.image.map(|img| img.alt).as_deref(), Some("Dashboard"));
    }
}
