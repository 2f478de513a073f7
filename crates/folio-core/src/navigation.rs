#![forbid(unsafe_code)]

//! Single-page section switcher.
//!
//! Navigation links and page sections are paired by position: the markup
//! lists them in the same order, and link `i` is highlighted exactly when
//! page `i` is shown.

use tracing::{debug, trace};

use crate::scroll_lock::ScrollHost;
use crate::toggle::ActiveClass;

/// A page section carrying its name in the markup.
pub trait PageSection {
    fn page_name(&self) -> Option<String>;
}

/// Owns the nav links and page sections.
#[derive(Debug)]
pub struct PageNavigator<E, H> {
    links: Vec<E>,
    pages: Vec<E>,
    host: H,
    current: Option<usize>,
}

impl<E: ActiveClass + PageSection, H: ScrollHost> PageNavigator<E, H> {
    pub fn new(links: Vec<E>, pages: Vec<E>, host: H) -> Self {
        let current = pages.iter().position(ActiveClass::is_active);
        Self {
            links,
            pages,
            host,
            current,
        }
    }

    /// Index of the visible page, if any.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    #[must_use]
    pub fn pages(&self) -> &[E] {
        &self.pages
    }

    #[must_use]
    pub fn links(&self) -> &[E] {
        &self.links
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Show the page named like `label` (case-insensitive) and scroll to top.
    ///
    /// An unknown label leaves the current page in place.
    pub fn navigate(&mut self, label: &str) -> Option<usize> {
        let wanted = label.trim().to_lowercase();
        let Some(target) = self
            .pages
            .iter()
            .position(|page| page.page_name().as_deref() == Some(wanted.as_str()))
        else {
            trace!(target: "folio_core::navigation", label, "no page for nav label");
            return None;
        };

        for (index, page) in self.pages.iter_mut().enumerate() {
            let show = index == target;
            page.set_active(show);
            if let Some(link) = self.links.get_mut(index) {
                link.set_active(show);
            }
        }
        self.host.scroll_to(0.0);
        self.current = Some(target);
        debug!(
            target: "folio_core::navigation",
            page = %wanted,
            index = target,
            "page shown"
        );
        Some(target)
    }
}
