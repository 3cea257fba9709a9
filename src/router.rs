use crate::collection::CollectionPage;
use crate::curtain::DomCurtain;
use crate::home::HomePage;
use crate::quiz_page::QuizPage;
use maison_core::{
    EntryTimings, Navigator, Page, PageEntryCoordinator, Route, Scheduler, WarpSignal,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

// held only for their Drop
#[allow(dead_code)]
enum MountedPage {
    Home(HomePage),
    Quiz(QuizPage),
    Collection(CollectionPage),
}

struct Mounted {
    _page: MountedPage,
    _entry: Option<PageEntryCoordinator>,
}

/// Long-lived application state. Pages come and go; the warp signal and
/// the background outlive them.
pub struct App {
    pub document: web::Document,
    pub root: web::Element,
    pub signal: WarpSignal,
    pub scheduler: Rc<dyn Scheduler>,
    pub navigator: Rc<dyn Navigator>,
    page: RefCell<Option<Mounted>>,
}

impl App {
    pub fn new(
        document: web::Document,
        root: web::Element,
        signal: WarpSignal,
        scheduler: Rc<dyn Scheduler>,
    ) -> Rc<Self> {
        Rc::new_cyclic(|app: &Weak<App>| {
            let navigator: Rc<dyn Navigator> = Rc::new(HistoryNavigator {
                app: app.clone(),
                scheduler: scheduler.clone(),
            });
            Self {
                document,
                root,
                signal,
                scheduler,
                navigator,
                page: RefCell::new(None),
            }
        })
    }

    /// Replace the current page with the one for `route`.
    pub fn mount(self: &Rc<Self>, route: &Route) {
        let previous = self.page.borrow_mut().take();
        drop(previous);
        if route.has_entry_flag() {
            replace_url(&route.clone().without_entry());
        }
        let mounted = match route.page {
            Page::Home => HomePage::mount(self, route).map(MountedPage::Home),
            Page::Quiz => QuizPage::mount(self).map(MountedPage::Quiz),
            Page::Collection { product } => {
                CollectionPage::mount(self, product).map(MountedPage::Collection)
            }
        };
        let page = match mounted {
            Ok(page) => page,
            Err(e) => {
                log::error!("[router] mount {} failed: {:?}", route, e);
                return;
            }
        };
        // motion pages settle the warp once their markup (and curtain) exists
        let entry = route.page.has_motion().then(|| {
            let curtain = Rc::new(DomCurtain::new(self.document.clone(), self.scheduler.clone()));
            PageEntryCoordinator::mount(
                &self.signal,
                curtain,
                self.scheduler.clone(),
                &EntryTimings::default(),
            )
        });
        *self.page.borrow_mut() = Some(Mounted {
            _page: page,
            _entry: entry,
        });
    }

    pub fn wire_popstate(self: &Rc<Self>) {
        let Some(window) = web::window() else {
            return;
        };
        let app = Rc::downgrade(self);
        let closure = Closure::wrap(Box::new(move |_ev: web::PopStateEvent| {
            let Some(app) = app.upgrade() else {
                return;
            };
            let route = current_route();
            log::info!("[router] popstate {}", route);
            app.mount(&route);
        }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// History API navigation. The page swap runs on the next timer tick so a
/// click handler never tears down the page it belongs to.
struct HistoryNavigator {
    app: Weak<App>,
    scheduler: Rc<dyn Scheduler>,
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, route: &Route) {
        log::info!("[router] navigate {}", route);
        if let Some(history) = web::window().and_then(|w| w.history().ok()) {
            if let Err(e) =
                history.push_state_with_url(&JsValue::NULL, "", Some(&route.to_url()))
            {
                log::warn!("[router] pushState failed: {:?}", e);
            }
        }
        let app = self.app.clone();
        let route = route.clone();
        self.scheduler.schedule(
            Duration::ZERO,
            Box::new(move || {
                if let Some(app) = app.upgrade() {
                    app.mount(&route);
                }
            }),
        );
    }
}

fn replace_url(route: &Route) {
    if let Some(history) = web::window().and_then(|w| w.history().ok()) {
        _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&route.to_url()));
    }
}

/// Route for the address bar; unknown URLs fall back to home.
pub fn current_route() -> Route {
    let Some(location) = web::window().map(|w| w.location()) else {
        return Route::home();
    };
    let url = format!(
        "{}{}{}",
        location.pathname().unwrap_or_default(),
        location.search().unwrap_or_default(),
        location.hash().unwrap_or_default(),
    );
    Route::parse(&url).unwrap_or_else(|e| {
        log::warn!("[router] {}; showing home", e);
        Route::home()
    })
}
