// Some mobile browsers report surface sizes beyond what wgpu will accept
// when configuring the surface, so the resize is clamped.
#[cfg(target_arch = "wasm32")]
const MAX_SURFACE_EXTENT: f32 = 2048.0;

#[cfg(target_arch = "wasm32")]
pub fn handle_browser_resize(
    mut primary_query: bevy::ecs::system::Query<
        &mut bevy::window::Window,
        bevy::ecs::query::With<bevy::window::PrimaryWindow>,
    >,
) {
    let Some(wasm_window) = web_sys::window() else {
        return;
    };
    let Ok(inner_width) = wasm_window.inner_width() else {
        return;
    };
    let Ok(inner_height) = wasm_window.inner_height() else {
        return;
    };
    let (Some(target_width), Some(target_height)) =
        (inner_width.as_f64(), inner_height.as_f64())
    else {
        return;
    };
    let target_width = target_width as f32;
    let target_height = target_height as f32;

    for mut window in &mut primary_query {
        if (window.resolution.width() - target_width).abs() > f32::EPSILON
            || (window.resolution.height() - target_height).abs() > f32::EPSILON
        {
            let width = target_width.min(MAX_SURFACE_EXTENT);
            let height = target_height.min(MAX_SURFACE_EXTENT);
            window.resolution.set(width, height);
        }
    }
}
