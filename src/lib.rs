#![cfg(target_arch = "wasm32")]
use crate::constants::*;
use instant::Instant;
use maison_core::constants::PARTICLE_COUNT;
use maison_core::scene::ParticleField;
use maison_core::{Scheduler, Subscription, WarpMotion, WarpSignal};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod collection;
mod constants;
mod curtain;
mod dom;
mod frame;
mod home;
mod markup;
mod quiz_page;
mod render;
mod router;
mod style;
mod timers;

/// Everything that lives for the whole visit.
struct Runtime {
    _app: Rc<router::App>,
    _zoom: Subscription,
}

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = const { RefCell::new(None) };
}

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas, MAX_PIXEL_RATIO);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize, MAX_PIXEL_RATIO);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn context_2d(canvas: &web::HtmlCanvasElement) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("maison-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let root = document
        .get_element_by_id(APP_ROOT_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", APP_ROOT_ID))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    wire_canvas_resize(&canvas);
    let ctx = context_2d(&canvas)?;

    // A cold load that arrives via the handoff link starts at warp.
    let route = router::current_route();
    let signal = WarpSignal::new(route.has_entry_flag());

    let motion = Rc::new(RefCell::new(WarpMotion::new(signal.start_at_warp())));
    let motion_zoom = motion.clone();
    let zoom = signal
        .is_zooming
        .subscribe(move |z| motion_zoom.borrow_mut().set_zooming(*z));

    let scheduler: Rc<dyn Scheduler> = Rc::new(timers::TimeoutScheduler);
    let app = router::App::new(document, root, signal, scheduler);
    app.wire_popstate();
    app.mount(&route);

    let field = ParticleField::new(PARTICLE_COUNT, FIELD_SEED);
    log::info!(
        "[scene] particles={} start_at_warp={}",
        field.len(),
        app.signal.start_at_warp()
    );
    frame::start_loop(Rc::new(RefCell::new(frame::FrameContext {
        motion,
        field,
        canvas,
        ctx,
        points: Vec::with_capacity(PARTICLE_COUNT),
        last_instant: Instant::now(),
    })));

    RUNTIME.with(|rt| {
        *rt.borrow_mut() = Some(Runtime {
            _app: app,
            _zoom: zoom,
        })
    });
    Ok(())
}
