#![forbid(unsafe_code)]

//! Host-agnostic behavior for the folio portfolio page.
//!
//! # Role in folio
//! `folio-core` holds every state machine the page runs, written against
//! small seam traits instead of DOM types. `folio-web` implements those
//! traits with `web-sys` and attaches listeners; native tests implement them
//! with plain structs.
//!
//! # This crate provides
//! - [`ThemeController`]: cyclic theme toggle with persisted preference and
//!   system color-scheme fallback.
//! - [`ProjectModalController`]: shared project preview modal with a scroll
//!   lock that restores the exact page offset.
//! - [`SidebarController`], [`FilterController`], [`PageNavigator`]: the
//!   toggle-class-on-click widgets.
//! - [`BINDINGS`]: the declarative marker/event/action table.
//! - [`FolioConfig`]: defaults matching the shipped markup.

pub mod bindings;
pub mod config;
pub mod filter;
pub mod modal;
pub mod navigation;
pub mod scroll_lock;
pub mod storage;
pub mod theme;
pub mod toggle;

pub use bindings::{
    ACTIVE_CLASS, Action, BINDINGS, Binding, BindingTarget, COLOR_SCHEME_QUERY, DomEvent, Marker,
    THEME_ATTRIBUTE,
};
pub use config::{ConfigError, FilterConfig, FolioConfig, ModalConfig, ThemeConfig};
pub use filter::{Categorized, FilterController};
pub use modal::{
    CardSource, LinkSlot, ModalState, ModalSurface, ProjectImage, ProjectModalController,
    ProjectSummary,
};
pub use navigation::{PageNavigator, PageSection};
pub use scroll_lock::{ScrollHost, ScrollLock, ScrollSnapshot};
pub use storage::{MemoryStore, PreferenceStore, StorageError};
pub use theme::{
    ThemeChange, ThemeChangeCause, ThemeController, ThemeSequence, ThemeSpec, ThemeSurface,
};
pub use toggle::{ActiveClass, SidebarController, TextSlot};
