#![cfg(target_arch = "wasm32")]

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use water_wasm::scheduler::LoopPhase;
use water_wasm::{mount, EffectConfig};
use web_sys::{HtmlCanvasElement, HtmlImageElement};

wasm_bindgen_test_configure!(run_in_browser);

const PIXEL_PNG: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";
// Served without CORS headers, so WebGL refuses to read it.
const FOREIGN_PNG: &str = "https://upload.wikimedia.org/wikipedia/commons/c/ca/1x1.png";

fn isolated_config(tag: &str) -> EffectConfig {
    EffectConfig {
        canvas_id: format!("{tag}-canvas"),
        image_id: format!("{tag}-img"),
        ..EffectConfig::default()
    }
}

fn add_elements(config: &EffectConfig) -> (HtmlCanvasElement, HtmlImageElement) {
    let document = web_sys::window().unwrap().document().unwrap();
    let body = document.body().unwrap();

    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_id(&config.canvas_id);
    body.append_child(&canvas).unwrap();

    let image = document
        .create_element("img")
        .unwrap()
        .dyn_into::<HtmlImageElement>()
        .unwrap();
    image.set_id(&config.image_id);
    body.append_child(&image).unwrap();

    (canvas, image)
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

/// Points `image` at `src` and waits for it to decode. False if it failed to load.
async fn load(image: &HtmlImageElement, src: &str) -> bool {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        let on_load = resolve.clone();
        let loaded = Closure::once_into_js(move || {
            on_load.call1(&JsValue::NULL, &JsValue::TRUE).ok();
        });
        let failed = Closure::once_into_js(move || {
            resolve.call1(&JsValue::NULL, &JsValue::FALSE).ok();
        });
        image
            .add_event_listener_with_callback("load", loaded.unchecked_ref())
            .unwrap();
        image
            .add_event_listener_with_callback("error", failed.unchecked_ref())
            .unwrap();
    });
    image.set_src(src);
    JsFuture::from(promise)
        .await
        .map(|v| v.as_bool() == Some(true))
        .unwrap_or(false)
}

fn fire_resize(times: usize) {
    let window = web_sys::window().unwrap();
    for _ in 0..times {
        let event = web_sys::Event::new("resize").unwrap();
        window.dispatch_event(&event).unwrap();
    }
}

fn assert_fallback(canvas: &HtmlCanvasElement, image: &HtmlImageElement) {
    assert_eq!(canvas.style().get_property_value("display").unwrap(), "none");
    assert_eq!(image.style().get_property_value("opacity").unwrap(), "1");
}

#[wasm_bindgen_test]
fn inert_without_elements() {
    let window = web_sys::window().unwrap();
    let document = window.document().unwrap();

    let handle = mount(&window, &document, &isolated_config("absent")).unwrap();
    assert!(handle.is_none());
}

#[wasm_bindgen_test]
fn waits_for_image_or_falls_back() {
    let window = web_sys::window().unwrap();
    let document = window.document().unwrap();
    let config = isolated_config("present");
    let (canvas, image) = add_elements(&config);

    match mount(&window, &document, &config).unwrap() {
        // The image has no source yet, so nothing is drawn or uploaded.
        Some(handle) => {
            assert_eq!(handle.phase(), LoopPhase::Uninitialized);
            assert_eq!(handle.frames_drawn(), 0);
            assert_eq!(handle.texture_uploads(), 0);
        }
        // Headless browser without WebGL: canvas hidden, image fully visible.
        None => assert_fallback(&canvas, &image),
    }
}

#[wasm_bindgen_test(async)]
async fn loaded_image_animates_and_coalesces_resizes() {
    let window = web_sys::window().unwrap();
    let document = window.document().unwrap();
    let config = isolated_config("loaded");
    let (canvas, image) = add_elements(&config);
    assert!(load(&image, PIXEL_PNG).await);

    let Some(handle) = mount(&window, &document, &config).unwrap() else {
        assert_fallback(&canvas, &image);
        return;
    };
    assert_ne!(handle.phase(), LoopPhase::Stopped);
    assert_eq!(handle.texture_uploads(), 1);
    assert_eq!(image.style().get_property_value("opacity").unwrap(), "0");

    sleep(100).await;
    let drawn = handle.frames_drawn();
    if handle.phase() == LoopPhase::Running {
        assert!(drawn > 0);
    }

    fire_resize(3);
    sleep(config.resize_debounce_ms as i32 * 2).await;
    assert_eq!(handle.texture_uploads(), 2);

    // A visible signal while already running leaves the single chain in place.
    document
        .dispatch_event(&web_sys::Event::new("visibilitychange").unwrap())
        .unwrap();
    sleep(100).await;
    if handle.phase() == LoopPhase::Running {
        assert!(handle.frames_drawn() > drawn);
    }
}

#[wasm_bindgen_test(async)]
async fn rejected_first_upload_keeps_photograph() {
    let window = web_sys::window().unwrap();
    let document = window.document().unwrap();
    let config = isolated_config("foreign");
    let (canvas, image) = add_elements(&config);
    if !load(&image, FOREIGN_PNG).await {
        // No network in this browser; nothing to exercise.
        return;
    }

    let Some(handle) = mount(&window, &document, &config).unwrap() else {
        assert_fallback(&canvas, &image);
        return;
    };
    assert_eq!(handle.phase(), LoopPhase::Stopped);
    assert_eq!(handle.texture_uploads(), 0);
    assert_fallback(&canvas, &image);

    // A stopped effect ignores later resizes.
    fire_resize(2);
    sleep(config.resize_debounce_ms as i32 * 2).await;
    assert_eq!(handle.texture_uploads(), 0);
    assert_eq!(handle.frames_drawn(), 0);
}
