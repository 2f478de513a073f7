#![forbid(unsafe_code)]

//! Declarative marker → handler table.
//!
//! The page markup is the integration surface: each element role carries a
//! fixed marker attribute or class. [`BINDINGS`] lists every (marker, event,
//! action) triple so hosts attach listeners by walking one table instead of
//! scattering selector lookups.

/// Element roles located through selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    Sidebar,
    SidebarButton,
    Select,
    SelectItem,
    SelectValue,
    FilterButton,
    FilterItem,
    ProjectItem,
    PreviewTrigger,
    ProjectImage,
    ProjectTitle,
    ProjectDescription,
    ProjectRepo,
    ProjectDemo,
    ModalContainer,
    ModalOverlay,
    ModalClose,
    ModalContent,
    ModalImage,
    ModalTitle,
    ModalText,
    ModalRepo,
    ModalDemo,
    ThemeToggle,
    ThemeIcon,
    ThemeLabel,
    NavLink,
    Page,
}

impl Marker {
    pub const ALL: [Self; 28] = [
        Self::Sidebar,
        Self::SidebarButton,
        Self::Select,
        Self::SelectItem,
        Self::SelectValue,
        Self::FilterButton,
        Self::FilterItem,
        Self::ProjectItem,
        Self::PreviewTrigger,
        Self::ProjectImage,
        Self::ProjectTitle,
        Self::ProjectDescription,
        Self::ProjectRepo,
        Self::ProjectDemo,
        Self::ModalContainer,
        Self::ModalOverlay,
        Self::ModalClose,
        Self::ModalContent,
        Self::ModalImage,
        Self::ModalTitle,
        Self::ModalText,
        Self::ModalRepo,
        Self::ModalDemo,
        Self::ThemeToggle,
        Self::ThemeIcon,
        Self::ThemeLabel,
        Self::NavLink,
        Self::Page,
    ];

    /// CSS selector matching this role.
    ///
    /// Project parts are relative to their `.project-item` card; theme icon
    /// and label are relative to the toggle.
    #[must_use]
    pub const fn selector(self) -> &'static str {
        match self {
            Self::Sidebar => "[data-sidebar]",
            Self::SidebarButton => "[data-sidebar-btn]",
            Self::Select => "[data-select]",
            Self::SelectItem => "[data-select-item]",
            // Spelling matches the published page markup.
            Self::SelectValue => "[data-selecct-value]",
            Self::FilterButton => "[data-filter-btn]",
            Self::FilterItem => "[data-filter-item]",
            Self::ProjectItem => ".project-item",
            Self::PreviewTrigger => "[data-project-eye]",
            Self::ProjectImage => "img",
            Self::ProjectTitle => ".project-title",
            Self::ProjectDescription => ".project-description",
            Self::ProjectRepo => ".project-repo",
            Self::ProjectDemo => ".project-demo",
            Self::ModalContainer => "[data-modal-container-project]",
            Self::ModalOverlay => "[data-overlay-project]",
            Self::ModalClose => "[data-modal-close-btn-project]",
            Self::ModalContent => "[data-project-modal]",
            Self::ModalImage => "[data-project-modal-img]",
            Self::ModalTitle => "[data-project-modal-title]",
            Self::ModalText => "[data-project-modal-text]",
            Self::ModalRepo => "[data-project-modal-repo]",
            Self::ModalDemo => "[data-project-modal-demo]",
            Self::ThemeToggle => "[data-theme-toggle]",
            Self::ThemeIcon => "[data-theme-icon]",
            Self::ThemeLabel => "[data-theme-label]",
            Self::NavLink => "[data-nav-link]",
            Self::Page => "[data-page]",
        }
    }

    /// Whether the selector is scoped to a project card.
    #[must_use]
    pub const fn is_card_part(self) -> bool {
        matches!(
            self,
            Self::PreviewTrigger
                | Self::ProjectImage
                | Self::ProjectTitle
                | Self::ProjectDescription
                | Self::ProjectRepo
                | Self::ProjectDemo
        )
    }
}

/// Where a binding's listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingTarget {
    /// Every element matching the marker.
    Marker(Marker),
    /// The document itself.
    Document,
    /// The `prefers-color-scheme: dark` media query list.
    ColorSchemeQuery,
}

/// DOM event names used by the bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomEvent {
    Click,
    KeyDown,
    Change,
}

impl DomEvent {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::Change => "change",
        }
    }
}

/// Controller operation a binding triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ToggleSidebar,
    ToggleSelect,
    ChooseSelectItem,
    ClickFilterButton,
    OpenPreview,
    CloseModal,
    EscapeModal,
    CycleTheme,
    SystemThemeChanged,
    Navigate,
}

impl Action {
    pub const ALL: [Self; 10] = [
        Self::ToggleSidebar,
        Self::ToggleSelect,
        Self::ChooseSelectItem,
        Self::ClickFilterButton,
        Self::OpenPreview,
        Self::CloseModal,
        Self::EscapeModal,
        Self::CycleTheme,
        Self::SystemThemeChanged,
        Self::Navigate,
    ];

    /// Whether the handler must cancel the event's default action.
    #[must_use]
    pub const fn prevents_default(self) -> bool {
        matches!(self, Self::OpenPreview)
    }
}

/// One listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub target: BindingTarget,
    pub event: DomEvent,
    pub action: Action,
}

const fn on(target: BindingTarget, event: DomEvent, action: Action) -> Binding {
    Binding {
        target,
        event,
        action,
    }
}

/// Every listener the page needs.
pub const BINDINGS: &[Binding] = &[
    on(
        BindingTarget::Marker(Marker::SidebarButton),
        DomEvent::Click,
        Action::ToggleSidebar,
    ),
    on(
        BindingTarget::Marker(Marker::Select),
        DomEvent::Click,
        Action::ToggleSelect,
    ),
    on(
        BindingTarget::Marker(Marker::SelectItem),
        DomEvent::Click,
        Action::ChooseSelectItem,
    ),
    on(
        BindingTarget::Marker(Marker::FilterButton),
        DomEvent::Click,
        Action::ClickFilterButton,
    ),
    on(
        BindingTarget::Marker(Marker::PreviewTrigger),
        DomEvent::Click,
        Action::OpenPreview,
    ),
    on(
        BindingTarget::Marker(Marker::ModalClose),
        DomEvent::Click,
        Action::CloseModal,
    ),
    on(
        BindingTarget::Marker(Marker::ModalOverlay),
        DomEvent::Click,
        Action::CloseModal,
    ),
    on(BindingTarget::Document, DomEvent::KeyDown, Action::EscapeModal),
    on(
        BindingTarget::Marker(Marker::ThemeToggle),
        DomEvent::Click,
        Action::CycleTheme,
    ),
    on(
        BindingTarget::ColorSchemeQuery,
        DomEvent::Change,
        Action::SystemThemeChanged,
    ),
    on(
        BindingTarget::Marker(Marker::NavLink),
        DomEvent::Click,
        Action::Navigate,
    ),
];

/// Bindings that trigger `action`.
pub fn bindings_for(action: Action) -> impl Iterator<Item = &'static Binding> {
    BINDINGS.iter().filter(move |binding| binding.action == action)
}

/// Media query observed for the system color scheme.
pub const COLOR_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// Root element attribute carrying the theme name.
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Attribute carrying a filter item's category.
pub const CATEGORY_ATTRIBUTE: &str = "data-category";

/// Attribute carrying a page section's name.
pub const PAGE_ATTRIBUTE: &str = "data-page";

/// Class toggled on every stateful element.
pub const ACTIVE_CLASS: &str = "active";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_action_is_bound() {
        for action in Action::ALL {
            assert!(
                bindings_for(action).next().is_some(),
                "{action:?} has no binding"
            );
        }
    }

    #[test]
    fn selectors_are_unique_and_non_empty() {
        let mut seen = HashSet::new();
        for marker in Marker::ALL {
            let selector = marker.selector();
            assert!(!selector.is_empty(), "{marker:?} selector empty");
            assert!(seen.insert(selector), "{marker:?} selector duplicated");
        }
    }

    #[test]
    fn close_has_button_and_overlay() {
        let targets: Vec<BindingTarget> = bindings_for(Action::CloseModal)
            .map(|binding| binding.target)
            .collect();
        assert_eq!(
            targets,
            vec![
                BindingTarget::Marker(Marker::ModalClose),
                BindingTarget::Marker(Marker::ModalOverlay),
            ]
        );
    }

    #[test]
    fn only_preview_prevents_default() {
        let preventing: Vec<Action> = Action::ALL
            .into_iter()
            .filter(|action| action.prevents_default())
            .collect();
        assert_eq!(preventing, vec![Action::OpenPreview]);
    }

    #[test]
    fn system_theme_listens_on_media_query_change() {
        let binding = bindings_for(Action::SystemThemeChanged)
            .next()
            .expect("bound");
        assert_eq!(binding.target, BindingTarget::ColorSchemeQuery);
        assert_eq!(binding.event.as_str(), "change");
    }
}
