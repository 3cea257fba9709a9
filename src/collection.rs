use crate::constants::*;
use crate::dom::Listeners;
use crate::markup;
use crate::router::App;
use maison_core::{ProductKey, Route};
use std::rc::Rc;

pub struct CollectionPage {
    _listeners: Listeners,
}

impl CollectionPage {
    pub fn mount(app: &Rc<App>, selected: Option<ProductKey>) -> anyhow::Result<Self> {
        app.root.set_inner_html(&markup::collection_page(selected));
        if let Some(key) = selected {
            let selector = format!("[data-product=\"{}\"]", key.product().id);
            if let Ok(Some(card)) = app.document.query_selector(&selector) {
                card.scroll_into_view();
            }
        }

        let mut listeners = Listeners::new();
        let navigator = app.navigator.clone();
        listeners.on_click(&app.document, COLLECTION_QUIZ_ID, move || {
            navigator.navigate(&Route::quiz());
        });
        let navigator = app.navigator.clone();
        listeners.on_click(&app.document, COLLECTION_HOME_ID, move || {
            navigator.navigate(&Route::home());
        });

        log::info!("[page] collection mounted (selected={:?})", selected);
        Ok(Self {
            _listeners: listeners,
        })
    }
}
