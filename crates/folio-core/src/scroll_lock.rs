#![forbid(unsafe_code)]

//! Page scroll freezing with exact offset restoration.
//!
//! While a lock is engaged the body is pinned at the captured offset and the
//! scrollbar width is published through a CSS custom property so the page
//! does not shift sideways when the scrollbar disappears. Releasing restores
//! the captured offset even if the host reported other offsets meanwhile.

use tracing::{debug, trace};

/// Window/body operations needed by [`ScrollLock`].
pub trait ScrollHost {
    /// Current vertical scroll offset of the page, in CSS px.
    fn scroll_y(&self) -> f64;
    /// Width of the vertical scrollbar, in CSS px (0 on overlay scrollbars).
    fn scrollbar_width(&self) -> f64;
    /// Stop body scrolling, keeping content visually at `offset`.
    fn freeze_body(&mut self, offset: f64);
    /// Undo [`ScrollHost::freeze_body`].
    fn release_body(&mut self);
    fn set_property(&mut self, property: &str, value: &str);
    fn remove_property(&mut self, property: &str);
    fn scroll_to(&mut self, y: f64);
}

/// Offsets captured when a lock begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSnapshot {
    pub offset: f64,
    pub scrollbar_width: f64,
}

/// Scroll lock bookkeeping. One lock at a time; engaging again re-captures.
#[derive(Debug, Clone)]
pub struct ScrollLock {
    compensation_property: String,
    snapshot: Option<ScrollSnapshot>,
}

impl ScrollLock {
    pub fn new(compensation_property: &str) -> Self {
        Self {
            compensation_property: compensation_property.to_owned(),
            snapshot: None,
        }
    }

    #[must_use]
    pub fn is_engaged(&self) -> bool {
        self.snapshot.is_some()
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<ScrollSnapshot> {
        self.snapshot
    }

    /// Capture the current offset and freeze the page.
    ///
    /// An already engaged lock is released first so the new capture reads
    /// the real page offset rather than the frozen one.
    pub fn engage<H: ScrollHost>(&mut self, host: &mut H) -> ScrollSnapshot {
        if self.is_engaged() {
            self.release(host);
        }
        let snapshot = ScrollSnapshot {
            offset: host.scroll_y(),
            scrollbar_width: host.scrollbar_width().max(0.0),
        };
        host.set_property(
            &self.compensation_property,
            &format!("{}px", snapshot.scrollbar_width),
        );
        host.freeze_body(snapshot.offset);
        self.snapshot = Some(snapshot);
        debug!(
            target: "folio_core::scroll_lock",
            offset = snapshot.offset,
            scrollbar_width = snapshot.scrollbar_width,
            "scroll locked"
        );
        snapshot
    }

    /// Unfreeze and return to the captured offset. No-op when not engaged.
    pub fn release<H: ScrollHost>(&mut self, host: &mut H) -> Option<ScrollSnapshot> {
        let Some(snapshot) = self.snapshot.take() else {
            trace!(target: "folio_core::scroll_lock", "release without lock");
            return None;
        };
        host.release_body();
        host.remove_property(&self.compensation_property);
        host.scroll_to(snapshot.offset);
        debug!(
            target: "folio_core::scroll_lock",
            offset = snapshot.offset,
            "scroll unlocked"
        );
        Some(snapshot)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Window stand-in: a frozen body reports offset 0, like
    /// `position: fixed` does in browsers.
    #[derive(Debug, Default)]
    pub(crate) struct FakeWindow {
        pub y: f64,
        pub scrollbar: f64,
        pub frozen_at: Option<f64>,
        pub properties: HashMap<String, String>,
        pub scroll_calls: Vec<f64>,
    }

    impl ScrollHost for FakeWindow {
        fn scroll_y(&self) -> f64 {
            if self.frozen_at.is_some() { 0.0 } else { self.y }
        }

        fn scrollbar_width(&self) -> f64 {
            self.scrollbar
        }

        fn freeze_body(&mut self, offset: f64) {
            self.frozen_at = Some(offset);
        }

        fn release_body(&mut self) {
            self.frozen_at = None;
        }

        fn set_property(&mut self, property: &str, value: &str) {
            self.properties.insert(property.to_owned(), value.to_owned());
        }

        fn remove_property(&mut self, property: &str) {
            self.properties.remove(property);
        }

        fn scroll_to(&mut self, y: f64) {
            self.y = y;
            self.scroll_calls.push(y);
        }
    }

    const PROP: &str = "--scrollbar-compensation";

    #[test]
    fn engage_captures_and_compensates() {
        let mut host = FakeWindow {
            y: 640.0,
            scrollbar: 15.0,
            ..FakeWindow::default()
        };
        let mut lock = ScrollLock::new(PROP);
        let snap = lock.engage(&mut host);
        assert_eq!(snap.offset, 640.0);
        assert_eq!(host.frozen_at, Some(640.0));
        assert_eq!(host.properties.get(PROP).map(String::as_str), Some("15px"));
        assert!(lock.is_engaged());
    }

    #[test]
    fn release_restores_exact_offset() {
        let mut host = FakeWindow {
            y: 1234.5,
            ..FakeWindow::default()
        };
        let mut lock = ScrollLock::new(PROP);
        lock.engage(&mut host);
        // Content moved underneath while locked.
        host.y = 10.0;
        lock.release(&mut host);
        assert_eq!(host.y, 1234.5);
        assert_eq!(host.frozen_at, None);
        assert!(!host.properties.contains_key(PROP));
    }

    #[test]
    fn re_engage_reads_real_offset() {
        let mut host = FakeWindow {
            y: 300.0,
            ..FakeWindow::default()
        };
        let mut lock = ScrollLock::new(PROP);
        lock.engage(&mut host);
        let snap = lock.engage(&mut host);
        assert_eq!(snap.offset, 300.0);
        lock.release(&mut host);
        assert_eq!(host.y, 300.0);
    }

    #[test]
    fn release_without_engage_touches_nothing() {
        let mut host = FakeWindow::default();
        let mut lock = ScrollLock::new(PROP);
        assert_eq!(lock.release(&mut host), None);
        assert!(host.scroll_calls.is_empty());
    }

    #[test]
    fn negative_scrollbar_width_clamps_to_zero() {
        let mut host = FakeWindow {
            scrollbar: -3.0,
            ..FakeWindow::default()
        };
        let mut lock = ScrollLock::new(PROP);
        assert_eq!(lock.engage(&mut host).scrollbar_width, 0.0);
        assert_eq!(host.properties.get(PROP).map(String::as_str), Some("0px"));
    }
}
