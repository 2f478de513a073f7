#![forbid(unsafe_code)]

//! Cyclic multi-theme toggle with persisted preference and system fallback.
//!
//! [`ThemeController`] owns the active theme for the page lifetime. The
//! document root attribute is the single source of truth for "current";
//! the controller reads it back before every transition so the state can
//! never drift from what the page shows.
//!
//! Precedence at startup:
//! 1. a stored preference naming a sequence member,
//! 2. the system dark-mode preference (second sequence entry),
//! 3. the theme attribute already present in the markup,
//! 4. the first sequence entry.
//!
//! Once the user clicks the toggle the stored preference wins permanently;
//! live system-preference changes are ignored from then on.

use tracing::{debug, trace, warn};

use crate::config::{ConfigError, check_unique_names};
use crate::storage::{PreferenceStore, StorageError};

/// One named visual variant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct ThemeSpec {
    /// Value written to the root theme attribute and to storage.
    pub name: String,
    /// Icon shown on the toggle while this theme is active.
    pub icon: String,
    /// Human-readable name used in the toggle label.
    pub label: String,
}

impl ThemeSpec {
    pub fn new(name: &str, icon: &str, label: &str) -> Self {
        Self {
            name: name.to_owned(),
            icon: icon.to_owned(),
            label: label.to_owned(),
        }
    }
}

/// Validated, non-empty ordered set of themes with unique names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSequence {
    themes: Vec<ThemeSpec>,
}

impl ThemeSequence {
    pub fn new(themes: Vec<ThemeSpec>) -> Result<Self, ConfigError> {
        if themes.is_empty() {
            return Err(ConfigError::EmptyThemeSequence);
        }
        check_unique_names(&themes)?;
        Ok(Self { themes })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Always false; the constructor rejects empty sequences.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> &ThemeSpec {
        &self.themes[0]
    }

    /// Theme used when the system prefers a dark scheme.
    #[must_use]
    pub fn dark(&self) -> &ThemeSpec {
        self.themes.get(1).unwrap_or_else(|| self.first())
    }

    /// Theme used when the system prefers a light scheme.
    #[must_use]
    pub fn light(&self) -> &ThemeSpec {
        self.first()
    }

    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.themes.iter().position(|theme| theme.name == name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ThemeSpec> {
        self.position(name).map(|index| &self.themes[index])
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Index of `name`, or 0 when it is not a member.
    #[must_use]
    pub fn normalize(&self, name: &str) -> usize {
        self.position(name).unwrap_or(0)
    }

    #[must_use]
    pub fn at(&self, index: usize) -> &ThemeSpec {
        &self.themes[index % self.themes.len()]
    }

    /// Theme following `index` in cyclic order.
    #[must_use]
    pub fn next_after(&self, index: usize) -> &ThemeSpec {
        self.at(index + 1)
    }

}

/// Document-side targets the theme controller writes to.
pub trait ThemeSurface {
    /// Current value of the root theme attribute, if set.
    fn theme_attribute(&self) -> Option<String>;
    fn set_theme_attribute(&mut self, name: &str);
    /// Icon of the toggle control.
    fn set_toggle_icon(&mut self, icon: &str);
    /// Accessible label and visible text of the toggle control.
    fn set_toggle_label(&mut self, accessible: &str, text: &str);
}

/// What triggered a theme transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChangeCause {
    Startup,
    Toggle,
    SystemPreference,
}

/// Record of one applied transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeChange {
    pub cause: ThemeChangeCause,
    pub from: Option<String>,
    pub to: String,
    /// `None` when the transition does not persist (startup, system change).
    pub persisted: Option<Result<(), StorageError>>,
}

/// Owns the active theme and the toggle control's presentation.
#[derive(Debug)]
pub struct ThemeController<S, T> {
    sequence: ThemeSequence,
    storage_key: String,
    store: S,
    surface: T,
}

impl<S: PreferenceStore, T: ThemeSurface> ThemeController<S, T> {
    pub fn new(sequence: ThemeSequence, storage_key: &str, store: S, surface: T) -> Self {
        Self {
            sequence,
            storage_key: storage_key.to_owned(),
            store,
            surface,
        }
    }

    #[must_use]
    pub fn sequence(&self) -> &ThemeSequence {
        &self.sequence
    }

    #[must_use]
    pub fn surface(&self) -> &T {
        &self.surface
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Raw stored preference; failures are returned, not swallowed.
    pub fn read_preference(&self) -> Result<Option<String>, StorageError> {
        self.store.read(&self.storage_key)
    }

    /// Stored preference if it names a sequence member.
    ///
    /// Storage failures read as "no explicit choice".
    #[must_use]
    pub fn stored_preference(&self) -> Option<&ThemeSpec> {
        match self.read_preference() {
            Ok(Some(name)) => {
                let theme = self.sequence.get(&name);
                if theme.is_none() {
                    debug!(
                        target: "folio_core::theme",
                        stored = %name,
                        "ignoring stored theme outside the sequence"
                    );
                }
                theme
            }
            Ok(None) => None,
            Err(err) => {
                warn!(
                    target: "folio_core::theme",
                    error = %err,
                    "theme preference unreadable, treating as absent"
                );
                None
            }
        }
    }

    /// Pick the theme to show at startup. No side effects.
    #[must_use]
    pub fn resolve_initial_theme(&self, prefers_dark: bool) -> &ThemeSpec {
        if let Some(theme) = self.stored_preference() {
            return theme;
        }
        if prefers_dark {
            return self.sequence.dark();
        }
        self.surface
            .theme_attribute()
            .and_then(|name| self.sequence.get(&name))
            .unwrap_or_else(|| self.sequence.first())
    }

    /// Name of the theme the document currently shows, normalized.
    #[must_use]
    pub fn current_theme(&self) -> &ThemeSpec {
        let index = self
            .surface
            .theme_attribute()
            .map_or(0, |name| self.sequence.normalize(&name));
        self.sequence.at(index)
    }

    /// Write `name` (normalized) to the document and refresh the toggle.
    ///
    /// Returns the name actually applied. Does not persist.
    pub fn apply_theme(&mut self, name: &str) -> String {
        let index = self.sequence.normalize(name);
        let current = self.sequence.at(index);
        let next = self.sequence.next_after(index);
        let accessible = format!("Switch to {} theme", next.label);

        self.surface.set_theme_attribute(&current.name);
        self.surface.set_toggle_icon(&current.icon);
        self.surface.set_toggle_label(&accessible, &next.label);

        if current.name != name {
            debug!(
                target: "folio_core::theme",
                requested = name,
                applied = %current.name,
                "normalized unknown theme"
            );
        }
        current.name.clone()
    }

    /// Resolve and apply the startup theme.
    pub fn start(&mut self, prefers_dark: bool) -> ThemeChange {
        let from = self.surface.theme_attribute();
        let initial = self.resolve_initial_theme(prefers_dark).name.clone();
        let to = self.apply_theme(&initial);
        debug!(
            target: "folio_core::theme",
            prefers_dark,
            theme = %to,
            "applied initial theme"
        );
        ThemeChange {
            cause: ThemeChangeCause::Startup,
            from,
            to,
            persisted: None,
        }
    }

    /// Advance one position in the sequence and persist the result.
    pub fn cycle_theme(&mut self) -> ThemeChange {
        let from = self.current_theme().name.clone();
        let index = self.sequence.normalize(&from);
        let next = self.sequence.next_after(index).name.clone();
        let to = self.apply_theme(&next);

        let persisted = self.store.write(&self.storage_key, &to);
        match &persisted {
            Ok(()) => debug!(
                target: "folio_core::theme",
                from = %from,
                to = %to,
                "cycled theme"
            ),
            Err(err) => warn!(
                target: "folio_core::theme",
                to = %to,
                error = %err,
                "theme applied but preference write discarded"
            ),
        }

        ThemeChange {
            cause: ThemeChangeCause::Toggle,
            from: Some(from),
            to,
            persisted: Some(persisted),
        }
    }

    /// React to a live system color-scheme change.
    ///
    /// Returns `None` when any preference is stored, even one outside the
    /// sequence. Unreadable storage counts as absent.
    pub fn on_system_preference_change(&mut self, prefers_dark: bool) -> Option<ThemeChange> {
        if let Ok(Some(stored)) = self.read_preference() {
            trace!(
                target: "folio_core::theme",
                stored = %stored,
                prefers_dark,
                "explicit choice stored, ignoring system change"
            );
            return None;
        }
        let from = self.surface.theme_attribute();
        let target = if prefers_dark {
            self.sequence.dark()
        } else {
            self.sequence.light()
        }
        .name
        .clone();
        let to = self.apply_theme(&target);
        debug!(
            target: "folio_core::theme",
            prefers_dark,
            theme = %to,
            "followed system color scheme"
        );
        Some(ThemeChange {
            cause: ThemeChangeCause::SystemPreference,
            from,
            to,
            persisted: None,
        })
    }
}
