use crate::constants::*;
use crate::dom::{self, Listeners};
use crate::markup;
use crate::router::App;
use maison_core::{HandoffTimings, Journey, NavigationHandoff, Route};
use std::rc::Rc;

/// Landing page with the discovery hub that launches the quiz journey.
pub struct HomePage {
    _listeners: Listeners,
    _handoff: Rc<NavigationHandoff>,
}

impl HomePage {
    pub fn mount(app: &Rc<App>, route: &Route) -> anyhow::Result<Self> {
        app.root.set_inner_html(&markup::home_page());
        let handoff = Rc::new(NavigationHandoff::new(
            app.signal.clone(),
            app.navigator.clone(),
            app.scheduler.clone(),
            HandoffTimings::default(),
        ));

        let mut listeners = Listeners::new();
        let doc = app.document.clone();
        let begin = handoff.clone();
        listeners.on_click(&app.document, BEGIN_JOURNEY_ID, move || {
            if begin.begin(Journey::into_quiz()) {
                if let Some(intro) = doc.get_element_by_id(HUB_INTRO_ID) {
                    dom::set_class(&intro, LEAVING_CLASS, true);
                }
            }
        });
        let navigator = app.navigator.clone();
        let browse = handoff.clone();
        listeners.on_click(&app.document, BROWSE_COLLECTION_ID, move || {
            if !browse.is_pending() {
                navigator.navigate(&Route::collection(None));
            }
        });

        if let Some(fragment) = route.fragment.as_deref() {
            if let Some(el) = app.document.get_element_by_id(fragment) {
                el.scroll_into_view();
            }
        }
        log::info!("[page] home mounted");
        Ok(Self {
            _listeners: listeners,
            _handoff: handoff,
        })
    }
}
