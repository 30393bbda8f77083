pub mod runner;

pub use runner::FieldRunner;

use std::cell::RefCell;

use nest_engine::{DrawCommand, FrameOutcome, InputEvent};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<FieldRunner>> = RefCell::new(None);
}

/// Run `f` against the runner, or log and return `None` before `field_init`.
fn with_runner<R>(f: impl FnOnce(&mut FieldRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("idea field not initialized; call field_init() first");
                None
            }
        }
    })
}

// ---- Lifecycle ----

/// Create the runner. `config_json` may be empty for defaults.
#[wasm_bindgen]
pub fn field_init(config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = FieldRunner::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("idea field: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn field_start(width: f32, height: f32) -> Result<(), JsValue> {
    with_runner(|r| r.start(width, height))
        .unwrap_or(Ok(()))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub fn field_stop() {
    with_runner(|r| r.stop());
}

/// One display refresh. Returns false once the field has stopped.
#[wasm_bindgen]
pub fn field_frame(dt: f32) -> bool {
    match with_runner(|r| r.frame(dt)) {
        Some(FrameOutcome::Stopped) | Some(FrameOutcome::Failed) | None => false,
        Some(FrameOutcome::Idle) | Some(FrameOutcome::Rendered { .. }) => true,
    }
}

// ---- Data ----

#[wasm_bindgen]
pub fn field_load_records(json: &str) -> Result<(), JsValue> {
    with_runner(|r| r.load_records(json))
        .unwrap_or(Ok(()))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub fn field_source_failed(message: &str) {
    if let Some(Err(e)) = with_runner(|r| r.source_failed(message)) {
        log::error!("could not degrade to an empty field: {}", e);
    }
}

// ---- Input ----

#[wasm_bindgen]
pub fn field_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn field_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn field_pointer_leave() {
    with_runner(|r| r.push_input(InputEvent::PointerLeave));
}

#[wasm_bindgen]
pub fn field_resize(width: f32, height: f32) {
    with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
}

// ---- Draw buffer accessors ----

/// Copy of this frame's commands as a flat `Float32Array`.
#[wasm_bindgen]
pub fn get_draw_commands() -> js_sys::Float32Array {
    with_runner(|r| js_sys::Float32Array::from(r.command_floats()))
        .unwrap_or_else(|| js_sys::Float32Array::new_with_length(0))
}

/// Pointer into WASM memory for zero-copy reads.
#[wasm_bindgen]
pub fn get_draw_commands_ptr() -> *const f32 {
    with_runner(|r| r.draw_commands_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_draw_command_count() -> u32 {
    with_runner(|r| r.draw_command_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_command_floats() -> u32 {
    with_runner(|r| r.floats_per_command()).unwrap_or(DrawCommand::FLOATS as u32)
}

// ---- State accessors ----

#[wasm_bindgen]
pub fn get_selection_json() -> String {
    with_runner(|r| r.selection_json()).unwrap_or_else(|| "null".to_string())
}

#[wasm_bindgen]
pub fn get_selection_version() -> u32 {
    with_runner(|r| r.selection_version()).unwrap_or(0)
}

/// 0 = stopped, 1 = running.
#[wasm_bindgen]
pub fn get_state() -> u32 {
    with_runner(|r| r.state_code()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn is_loading() -> bool {
    with_runner(|r| r.is_loading()).unwrap_or(true)
}

#[wasm_bindgen]
pub fn get_particle_count() -> u32 {
    with_runner(|r| r.particle_count()).unwrap_or(0)
}
