use crate::constants::BACKGROUND_COLOR;
use crate::style;
use maison_core::scene::ScreenPoint;
use std::f64::consts::TAU;
use wasm_bindgen::JsValue;
use web_sys as web;

/// Paint one frame of the particle field. Points blend additively.
#[allow(deprecated)]
pub fn draw_field(
    ctx: &web::CanvasRenderingContext2d,
    width: f64,
    height: f64,
    points: &[ScreenPoint],
) {
    _ = ctx.set_global_composite_operation("source-over");
    ctx.set_fill_style(&JsValue::from_str(BACKGROUND_COLOR));
    ctx.fill_rect(0.0, 0.0, width, height);

    _ = ctx.set_global_composite_operation("lighter");
    for p in points {
        ctx.set_fill_style(&JsValue::from_str(&style::rgba(p.color, p.alpha)));
        let radius = (p.size as f64 * 0.5).max(0.5);
        ctx.begin_path();
        if p.mist {
            _ = ctx.arc(p.x as f64, p.y as f64, radius, 0.0, TAU);
        } else {
            // dust is too small for arcs to matter
            ctx.rect(p.x as f64 - radius, p.y as f64 - radius, radius * 2.0, radius * 2.0);
        }
        ctx.fill();
    }
}
