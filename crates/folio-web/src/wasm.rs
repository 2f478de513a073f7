#![forbid(unsafe_code)]

//! `wasm-bindgen` exports: boots every controller and attaches listeners.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::{
    Action, BINDINGS, Binding, BindingTarget, COLOR_SCHEME_QUERY, FilterController, FolioConfig,
    Marker, PageNavigator, ProjectModalController, ProjectSummary, SidebarController,
    ThemeController,
};
use tracing::{debug, info, trace};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent, MediaQueryListEvent};

use crate::console::{init_tracing, install_panic_hook, js_error};
use crate::dom::{
    DomCard, DomElement, DomModalSurface, DomThemeSurface, WindowScroll, query_all, query_one,
    query_within,
};
use crate::storage::LocalStorage;

type DomTheme = ThemeController<LocalStorage, DomThemeSurface>;
type DomModal = ProjectModalController<DomModalSurface, WindowScroll>;

/// Every controller the page runs. Optional ones are absent when their
/// required markup is missing.
struct Controllers {
    theme: DomTheme,
    modal: Option<DomModal>,
    sidebar: Option<SidebarController<DomElement>>,
    filter: Option<FilterController<DomElement>>,
    navigator: Option<PageNavigator<DomElement, WindowScroll>>,
    fallback_alt: String,
}

impl Controllers {
    fn handles(&self, action: Action) -> bool {
        match action {
            Action::ToggleSidebar => self.sidebar.is_some(),
            Action::ToggleSelect | Action::ChooseSelectItem | Action::ClickFilterButton => {
                self.filter.is_some()
            }
            Action::OpenPreview | Action::CloseModal | Action::EscapeModal => self.modal.is_some(),
            Action::CycleTheme | Action::SystemThemeChanged => true,
            Action::Navigate => self.navigator.is_some(),
        }
    }
}

/// The element a listener was registered on.
struct EventSource {
    index: usize,
    element: Option<Element>,
    card: Option<Element>,
}

impl EventSource {
    fn label(&self) -> String {
        self.element
            .as_ref()
            .map(|el| DomElement::new(el.clone()).text())
            .unwrap_or_default()
    }
}

fn dispatch(controllers: &mut Controllers, action: Action, source: &EventSource, event: &Event) {
    if action.prevents_default() {
        event.prevent_default();
    }
    match action {
        Action::ToggleSidebar => {
            if let Some(sidebar) = controllers.sidebar.as_mut() {
                sidebar.toggle();
            }
        }
        Action::ToggleSelect => {
            if let Some(filter) = controllers.filter.as_mut() {
                filter.toggle_select();
            }
        }
        Action::ChooseSelectItem => {
            if let Some(filter) = controllers.filter.as_mut() {
                filter.choose_select_item(&source.label());
            }
        }
        Action::ClickFilterButton => {
            if let Some(filter) = controllers.filter.as_mut() {
                filter.click_filter_button(source.index, &source.label());
            }
        }
        Action::OpenPreview => {
            let (Some(modal), Some(card)) = (controllers.modal.as_mut(), source.card.as_ref())
            else {
                return;
            };
            let summary =
                ProjectSummary::from_card(&DomCard::new(card.clone()), &controllers.fallback_alt);
            modal.populate_and_open(&summary);
        }
        Action::CloseModal => {
            if let Some(modal) = controllers.modal.as_mut() {
                modal.close();
            }
        }
        Action::EscapeModal => {
            let (Some(modal), Some(key)) = (
                controllers.modal.as_mut(),
                event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key),
            ) else {
                return;
            };
            modal.handle_key(&key);
        }
        Action::CycleTheme => {
            controllers.theme.cycle_theme();
        }
        Action::SystemThemeChanged => {
            if let Some(change) = event.dyn_ref::<MediaQueryListEvent>() {
                controllers
                    .theme
                    .on_system_preference_change(change.matches());
            }
        }
        Action::Navigate => {
            if let Some(navigator) = controllers.navigator.as_mut() {
                navigator.navigate(&source.label());
            }
        }
    }
}

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn detach(&self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

fn elements_for(document: &Document, marker: Marker) -> Vec<(Element, Option<Element>)> {
    if marker.is_card_part() {
        query_all(document, Marker::ProjectItem)
            .into_iter()
            .filter_map(|card| query_within(&card, marker).map(|el| (el, Some(card))))
            .collect()
    } else {
        query_all(document, marker)
            .into_iter()
            .map(|el| (el, None))
            .collect()
    }
}

fn build_controllers(
    config: &FolioConfig,
    window: &web_sys::Window,
    document: &Document,
    root: Element,
) -> Result<Controllers, JsValue> {
    let sequence = config
        .theme
        .sequence()
        .map_err(|err| js_error(&err.to_string()))?;
    let store = LocalStorage::from_window(window);
    if !store.is_available() {
        debug!(target: "folio_web", "localStorage unavailable, theme choice will not persist");
    }
    let theme = ThemeController::new(
        sequence,
        &config.theme.storage_key,
        store,
        DomThemeSurface::new(root, query_one(document, Marker::ThemeToggle)),
    );

    let scroll = || WindowScroll::new(window.clone(), document.clone());
    let modal = DomModalSurface::locate(document)
        .map(|surface| ProjectModalController::new(surface, scroll(), &config.modal));

    let sidebar = query_one(document, Marker::Sidebar)
        .map(|el| SidebarController::new(DomElement::new(el)));

    let filter = match (
        query_one(document, Marker::Select),
        query_one(document, Marker::SelectValue),
    ) {
        (Some(select), Some(value)) => {
            let wrap = |marker| {
                query_all(document, marker)
                    .into_iter()
                    .map(DomElement::new)
                    .collect::<Vec<_>>()
            };
            Some(FilterController::new(
                DomElement::new(select),
                DomElement::new(value),
                wrap(Marker::FilterItem),
                wrap(Marker::FilterButton),
                &config.filter,
            ))
        }
        _ => None,
    };

    let pages: Vec<DomElement> = query_all(document, Marker::Page)
        .into_iter()
        .map(DomElement::new)
        .collect();
    let navigator = (!pages.is_empty()).then(|| {
        let links = query_all(document, Marker::NavLink)
            .into_iter()
            .map(DomElement::new)
            .collect();
        PageNavigator::new(links, pages, scroll())
    });

    Ok(Controllers {
        theme,
        modal,
        sidebar,
        filter,
        navigator,
        fallback_alt: config.modal.fallback_alt.clone(),
    })
}

/// Page behavior handle.
///
/// Constructing it boots every controller; dropping it or calling
/// [`FolioApp::destroy`] detaches all listeners.
#[wasm_bindgen]
pub struct FolioApp {
    controllers: Rc<RefCell<Controllers>>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl FolioApp {
    /// Boot with an optional JSON config override and tracing filter
    /// (e.g. `"folio_core=debug"`).
    #[wasm_bindgen(constructor)]
    pub fn new(
        config_json: Option<String>,
        log_filter: Option<String>,
    ) -> Result<FolioApp, JsValue> {
        install_panic_hook();
        init_tracing(log_filter.as_deref());

        let config = match config_json.as_deref() {
            Some(json) => FolioConfig::from_json(json).map_err(|err| js_error(&err.to_string()))?,
            None => FolioConfig::default(),
        };
        let window = web_sys::window().ok_or_else(|| js_error("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| js_error("window has no document"))?;
        let root = document
            .document_element()
            .ok_or_else(|| js_error("document has no root element"))?;
        let color_scheme = window.match_media(COLOR_SCHEME_QUERY).ok().flatten();
        let prefers_dark = color_scheme.as_ref().is_some_and(|query| query.matches());

        let mut controllers = build_controllers(&config, &window, &document, root)?;
        controllers.theme.start(prefers_dark);

        let mut app = Self {
            controllers: Rc::new(RefCell::new(controllers)),
            listeners: Vec::new(),
        };
        let color_scheme: Option<EventTarget> = color_scheme.map(Into::into);
        for binding in BINDINGS {
            app.attach(binding, &document, color_scheme.as_ref());
        }
        info!(
            target: "folio_web",
            listeners = app.listeners.len(),
            prefers_dark,
            "folio booted"
        );
        Ok(app)
    }

    /// Name of the theme currently applied to the document.
    #[wasm_bindgen(js_name = currentTheme)]
    pub fn current_theme(&self) -> String {
        self.controllers.borrow().theme.current_theme().name.clone()
    }

    /// Advance the theme as a toggle click would. Returns the new name.
    #[wasm_bindgen(js_name = cycleTheme)]
    pub fn cycle_theme(&self) -> String {
        self.controllers.borrow_mut().theme.cycle_theme().to
    }

    #[wasm_bindgen(js_name = isModalOpen)]
    pub fn is_modal_open(&self) -> bool {
        self.controllers
            .borrow()
            .modal
            .as_ref()
            .is_some_and(ProjectModalController::is_open)
    }

    #[wasm_bindgen(js_name = closeModal)]
    pub fn close_modal(&self) {
        if let Some(modal) = self.controllers.borrow_mut().modal.as_mut() {
            modal.close();
        }
    }

    /// Show the page section named `label`. Returns false for unknown names.
    pub fn navigate(&self, label: &str) -> bool {
        self.controllers
            .borrow_mut()
            .navigator
            .as_mut()
            .and_then(|navigator| navigator.navigate(label))
            .is_some()
    }

    /// Number of attached DOM listeners.
    #[wasm_bindgen(js_name = listenerCount)]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Detach every listener. The handle stays usable for the query methods.
    pub fn destroy(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
        debug!(target: "folio_web", "folio listeners detached");
    }
}

impl FolioApp {
    fn attach(
        &mut self,
        binding: &Binding,
        document: &Document,
        color_scheme: Option<&EventTarget>,
    ) {
        if !self.controllers.borrow().handles(binding.action) {
            debug!(
                target: "folio_web",
                action = ?binding.action,
                "controller missing, binding skipped"
            );
            return;
        }
        let targets: Vec<(EventTarget, EventSource)> = match binding.target {
            BindingTarget::Marker(marker) => elements_for(document, marker)
                .into_iter()
                .enumerate()
                .map(|(index, (element, card))| {
                    let target: EventTarget = element.clone().into();
                    (
                        target,
                        EventSource {
                            index,
                            element: Some(element),
                            card,
                        },
                    )
                })
                .collect(),
            BindingTarget::Document => vec![(
                document.clone().into(),
                EventSource {
                    index: 0,
                    element: None,
                    card: None,
                },
            )],
            BindingTarget::ColorSchemeQuery => color_scheme
                .map(|query| {
                    (
                        query.clone(),
                        EventSource {
                            index: 0,
                            element: None,
                            card: None,
                        },
                    )
                })
                .into_iter()
                .collect(),
        };

        let event = binding.event.as_str();
        let action = binding.action;
        for (target, source) in targets {
            let controllers = Rc::clone(&self.controllers);
            let callback = Closure::<dyn FnMut(Event)>::new(move |dom_event: Event| {
                match controllers.try_borrow_mut() {
                    Ok(mut controllers) => dispatch(&mut controllers, action, &source, &dom_event),
                    Err(_) => trace!(
                        target: "folio_web",
                        action = ?action,
                        "re-entrant event dropped"
                    ),
                }
            });
            if target
                .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
                .is_ok()
            {
                self.listeners.push(Listener {
                    target,
                    event,
                    callback,
                });
            }
        }
    }
}

impl Drop for FolioApp {
    fn drop(&mut self) {
        self.destroy();
    }
}
