use crate::constants::*;
use crate::render;
use instant::Instant;
use maison_core::scene::{Camera, ParticleField, ScreenPoint};
use maison_core::WarpMotion;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub motion: Rc<RefCell<WarpMotion>>,
    pub field: ParticleField,
    pub canvas: web::HtmlCanvasElement,
    pub ctx: web::CanvasRenderingContext2d,
    pub points: Vec<ScreenPoint>,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        let dt_sec = dt.as_secs_f32().min(MAX_FRAME_DT);

        let m = self.motion.borrow_mut().tick(dt_sec);

        let width = self.canvas.width() as f32;
        let height = self.canvas.height().max(1) as f32;
        let pixel_ratio = web::window()
            .map(|w| w.device_pixel_ratio().min(MAX_PIXEL_RATIO))
            .unwrap_or(1.0) as f32;
        let camera = Camera::looking_down_field(width / height, m.fov_deg);
        self.field
            .project(&camera, m.offset, width, height, pixel_ratio, &mut self.points);
        render::draw_field(&self.ctx, width as f64, height as f64, &self.points);
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
