use crate::constants::CURTAIN_LEAVING_CLASS;
use crate::dom;
use maison_core::constants::{CURTAIN_FADE, CURTAIN_ID};
use maison_core::{Curtain, Scheduler};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// The `#static-curtain` cover: fade for 0.8s, then detach.
pub struct DomCurtain {
    document: web::Document,
    scheduler: Rc<dyn Scheduler>,
}

impl DomCurtain {
    pub fn new(document: web::Document, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            document,
            scheduler,
        }
    }
}

impl Curtain for DomCurtain {
    fn dismiss(&self) -> bool {
        let Some(el) = self.document.get_element_by_id(CURTAIN_ID) else {
            return false;
        };
        if el.class_list().contains(CURTAIN_LEAVING_CLASS) {
            return true;
        }
        dom::set_class(&el, CURTAIN_LEAVING_CLASS, true);
        if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
            dom::set_style(
                html,
                "transition",
                &format!("opacity {:.1}s ease", CURTAIN_FADE.as_secs_f32()),
            );
            dom::set_style(html, "opacity", "0");
        }
        // detach outlives the page mount; removing a detached node is harmless
        self.scheduler
            .schedule(CURTAIN_FADE, Box::new(move || el.remove()));
        true
    }
}
