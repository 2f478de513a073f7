#![forbid(unsafe_code)]

//! Project category filter.
//!
//! Two entry points drive the same filter: a custom select (small screens)
//! and a row of filter buttons (large screens). Both write the chosen label
//! into the select's value slot so the two stay in agreement when the
//! viewport crosses the breakpoint.

use tracing::{debug, trace};

use crate::config::FilterConfig;
use crate::toggle::{ActiveClass, TextSlot};

/// Filterable element tagged with a category.
pub trait Categorized {
    /// Category as written in the markup (already lowercase).
    fn category(&self) -> Option<String>;
}

/// Filter state over one element type.
#[derive(Debug)]
pub struct FilterController<E> {
    select: E,
    value: E,
    items: Vec<E>,
    buttons: Vec<E>,
    last_button: usize,
    active_value: String,
    all_value: String,
}

impl<E: ActiveClass + TextSlot + Categorized> FilterController<E> {
    /// `buttons[0]` is the initially active button, as in the markup.
    pub fn new(select: E, value: E, items: Vec<E>, buttons: Vec<E>, config: &FilterConfig) -> Self {
        Self {
            select,
            value,
            items,
            buttons,
            last_button: 0,
            active_value: config.all_value.clone(),
            all_value: config.all_value.clone(),
        }
    }

    #[must_use]
    pub fn active_value(&self) -> &str {
        &self.active_value
    }

    #[must_use]
    pub fn items(&self) -> &[E] {
        &self.items
    }

    #[must_use]
    pub fn buttons(&self) -> &[E] {
        &self.buttons
    }

    #[must_use]
    pub fn select(&self) -> &E {
        &self.select
    }

    #[must_use]
    pub fn active_button(&self) -> Option<usize> {
        self.buttons
            .get(self.last_button)
            .is_some_and(ActiveClass::is_active)
            .then_some(self.last_button)
    }

    /// Expand or collapse the select list.
    pub fn toggle_select(&mut self) -> bool {
        let expanded = self.select.toggle_active();
        trace!(target: "folio_core::filter", expanded, "select toggled");
        expanded
    }

    /// A select list entry labelled `label` was clicked.
    pub fn choose_select_item(&mut self, label: &str) -> usize {
        self.value.set_text(label);
        self.select.toggle_active();
        self.apply_filter(&label.to_lowercase())
    }

    /// Filter button `index` labelled `label` was clicked.
    ///
    /// Returns `None` for an index outside the button row.
    pub fn click_filter_button(&mut self, index: usize, label: &str) -> Option<usize> {
        if index >= self.buttons.len() {
            trace!(target: "folio_core::filter", index, "unknown filter button");
            return None;
        }
        self.value.set_text(label);
        let visible = self.apply_filter(&label.to_lowercase());
        if let Some(previous) = self.buttons.get_mut(self.last_button) {
            previous.set_active(false);
        }
        self.buttons[index].set_active(true);
        self.last_button = index;
        Some(visible)
    }

    /// Show items whose category equals `value`; the all-value shows every
    /// item. Returns the number of visible items.
    pub fn apply_filter(&mut self, value: &str) -> usize {
        let show_all = value == self.all_value;
        let mut visible = 0;
        for item in &mut self.items {
            let show = show_all || item.category().as_deref() == Some(value);
            item.set_active(show);
            visible += usize::from(show);
        }
        self.active_value = value.to_owned();
        debug!(
            target: "folio_core::filter",
            value,
            visible,
            total = self.items.len(),
            "filter applied"
        );
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toggle::tests::FakeElement;
    use pretty_assertions::assert_eq;

    impl Categorized for FakeElement {
        fn category(&self) -> Option<String> {
            (!self.tag.is_empty()).then(|| self.tag.clone())
        }
    }

    fn controller() -> FilterController<FakeElement> {
        let items = ["web design", "applications", "web design", ""]
            .into_iter()
            .map(FakeElement::tagged)
            .collect();
        let mut buttons: Vec<FakeElement> = ["All", "Web design", "Applications"]
            .into_iter()
            .map(|_| FakeElement::default())
            .collect();
        buttons[0].active = true;
        FilterController::new(
            FakeElement::default(),
            FakeElement::default(),
            items,
            buttons,
            &FilterConfig::default(),
        )
    }

    fn visible(ctl: &FilterController<FakeElement>) -> Vec<bool> {
        ctl.items().iter().map(|item| item.active).collect()
    }

    #[test]
    fn all_shows_everything() {
        let mut ctl = controller();
        assert_eq!(ctl.apply_filter("all"), 4);
        assert_eq!(visible(&ctl), vec![true; 4]);
    }

    #[test]
    fn category_shows_exact_matches() {
        let mut ctl = controller();
        assert_eq!(ctl.apply_filter("web design"), 2);
        assert_eq!(visible(&ctl), vec![true, false, true, false]);
        assert_eq!(ctl.active_value(), "web design");
    }

    #[test]
    fn select_item_sets_label_and_collapses() {
        let mut ctl = controller();
        ctl.toggle_select();
        assert!(ctl.select().active);
        let shown = ctl.choose_select_item("Applications");
        assert_eq!(shown, 1);
        assert!(!ctl.select().active);
        assert_eq!(ctl.value.text, "Applications");
    }

    #[test]
    fn button_click_moves_active_class() {
        let mut ctl = controller();
        assert_eq!(ctl.active_button(), Some(0));
        assert_eq!(ctl.click_filter_button(1, "Web design"), Some(2));
        assert_eq!(ctl.click_filter_button(2, "Applications"), Some(1));
        let active: Vec<bool> = ctl.buttons().iter().map(|b| b.active).collect();
        assert_eq!(active, vec![false, false, true]);
        assert_eq!(ctl.active_button(), Some(2));
        assert_eq!(ctl.value.text, "Applications");
    }

    #[test]
    fn out_of_range_button_ignored() {
        let mut ctl = controller();
        assert_eq!(ctl.click_filter_button(9, "Ghost"), None);
        assert_eq!(ctl.active_button(), Some(0));
        assert_eq!(ctl.active_value(), "all");
    }
}
