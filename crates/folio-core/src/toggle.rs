#![forbid(unsafe_code)]

//! The toggle-class-on-click primitive shared by the smaller widgets.

use tracing::debug;

/// An element whose visibility or selection is driven by an `active` class.
pub trait ActiveClass {
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);

    /// Flip the class and return the new state.
    fn toggle_active(&mut self) -> bool {
        let next = !self.is_active();
        self.set_active(next);
        next
    }
}

/// An element whose visible text can be replaced.
pub trait TextSlot {
    fn set_text(&mut self, text: &str);
}

/// Mobile sidebar expand/collapse.
#[derive(Debug)]
pub struct SidebarController<E> {
    sidebar: E,
}

impl<E: ActiveClass> SidebarController<E> {
    pub fn new(sidebar: E) -> Self {
        Self { sidebar }
    }

    /// Returns true when the sidebar is now expanded.
    pub fn toggle(&mut self) -> bool {
        let expanded = self.sidebar.toggle_active();
        debug!(target: "folio_core::sidebar", expanded, "sidebar toggled");
        expanded
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.sidebar.is_active()
    }
}
