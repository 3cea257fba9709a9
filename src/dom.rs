use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn element<T: JsCast>(document: &web::Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

#[inline]
pub fn set_class(el: &web::Element, class: &str, on: bool) {
    let cl = el.class_list();
    _ = if on { cl.add_1(class) } else { cl.remove_1(class) };
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    _ = el.style().set_property(property, value);
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, max_ratio: f64) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio().min(max_ratio);
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

type Handler = Closure<dyn FnMut(web::Event)>;

/// Event listeners owned by one page or panel. Dropping removes them.
///
/// Handlers must not drop the `Listeners` that owns them while running; page
/// swaps and panel re-renders are deferred to a timer for that reason.
#[derive(Default)]
pub struct Listeners {
    entries: Vec<(web::EventTarget, &'static str, Handler)>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(
        &mut self,
        target: &web::EventTarget,
        event: &'static str,
        mut handler: impl FnMut(web::Event) + 'static,
    ) {
        let closure =
            Closure::wrap(Box::new(move |ev: web::Event| handler(ev)) as Box<dyn FnMut(_)>);
        if let Err(e) =
            target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            log::warn!("addEventListener({}) failed: {:?}", event, e);
            return;
        }
        self.entries.push((target.clone(), event, closure));
    }

    /// Wire a click handler on the element with `id`; false if it is missing.
    pub fn on_click(
        &mut self,
        document: &web::Document,
        id: &str,
        mut handler: impl FnMut() + 'static,
    ) -> bool {
        match document.get_element_by_id(id) {
            Some(el) => {
                self.on(&el, "click", move |_| handler());
                true
            }
            None => {
                log::debug!("no #{} to wire", id);
                false
            }
        }
    }

    pub fn clear(&mut self) {
        for (target, event, closure) in self.entries.drain(..) {
            _ = target
                .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        self.clear();
    }
}
