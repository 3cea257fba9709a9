// Inline CSS values computed at runtime.

/// CSS percentage for a handle position in [0, 1].
#[inline]
pub fn percent(fraction: f32) -> String {
    format!("{:.2}%", fraction.clamp(0.0, 1.0) * 100.0)
}

/// `rgba(r,g,b,a)` from a linear [0, 1] colour.
pub fn rgba(color: [f32; 3], alpha: f32) -> String {
    let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({},{},{},{:.3})",
        c(color[0]),
        c(color[1]),
        c(color[2]),
        alpha.clamp(0.0, 1.0)
    )
}
