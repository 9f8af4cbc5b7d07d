use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{
    AddEventListenerOptions, Document, HtmlCanvasElement, HtmlImageElement,
    WebGlRenderingContext as GL, Window,
};

use super::probe::{self, js_error};
use super::program::ShaderProgram;
use super::quad::QuadBuffer;
use super::texture::SourceTexture;
use crate::config::EffectConfig;
use crate::debounce::{Debouncer, Ticket};
use crate::error::WaterError;
use crate::scheduler::{LoopPhase, RenderLoop, SourceReadiness};
use crate::viewport::Viewport;

/// Every piece of GPU and loop state for one canvas. Only the callbacks wired
/// up by [`WaterHandle`] mutate it, one at a time, on the page's thread.
struct WaterSurface {
    window: Window,
    canvas: HtmlCanvasElement,
    image: HtmlImageElement,
    gl: GL,
    program: ShaderProgram,
    quad: QuadBuffer,
    texture: SourceTexture,
    viewport: Viewport,
    render_loop: RenderLoop,
    readiness: SourceReadiness,
    resize: Debouncer<i32>,
    config: EffectConfig,
}

impl WaterSurface {
    fn new(
        window: Window,
        canvas: HtmlCanvasElement,
        image: HtmlImageElement,
        config: EffectConfig,
    ) -> Result<Self, WaterError> {
        let gl = probe::acquire_context(&canvas)?;
        let program = ShaderProgram::build(&gl)?;
        let quad = QuadBuffer::upload(&gl, &program)?;
        let texture = SourceTexture::create(&gl)?;

        Ok(Self {
            window,
            canvas,
            image,
            gl,
            program,
            quad,
            texture,
            viewport: Viewport::default(),
            render_loop: RenderLoop::new(config.resume),
            readiness: SourceReadiness::Unready,
            resize: Debouncer::new(config.resize_debounce_ms),
            config,
        })
    }

    fn now(&self) -> f64 {
        self.window
            .performance()
            .map(|perf| perf.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn sync_viewport(&mut self) {
        let next = Viewport::from_layout(
            self.canvas.client_width(),
            self.canvas.client_height(),
            self.window.device_pixel_ratio(),
            self.config.max_pixel_ratio,
        );
        if next.differs_from(self.canvas.width(), self.canvas.height()) {
            self.canvas.set_width(next.width);
            self.canvas.set_height(next.height);
            self.gl.viewport(0, 0, next.width as i32, next.height as i32);
        }
        self.viewport = next;
    }

    fn upload_texture(&mut self) -> Result<(), WaterError> {
        self.texture.upload(&self.gl, &self.image)
    }

    /// First upload and `Uninitialized → Running`. Runs at most once; returns
    /// true if a frame must be requested.
    ///
    /// The photograph stays visible until its first upload succeeded; a
    /// rejected upload (e.g. a cross-origin image without CORS) is returned and
    /// leaves the loop uninitialized.
    fn on_source_ready(&mut self, hidden: bool) -> Result<bool, WaterError> {
        if !self.readiness.mark_ready() || self.render_loop.phase() == LoopPhase::Stopped {
            return Ok(false);
        }
        self.sync_viewport();
        self.upload_texture()?;
        probe::hide_source_image(&self.image);

        let now = self.now();
        let request = self.render_loop.start(now);
        log::info!(
            "water effect running at {}x{}",
            self.viewport.width,
            self.viewport.height
        );
        if hidden {
            self.render_loop.pause(now);
            return Ok(false);
        }
        Ok(request)
    }

    fn on_resize_settled(&mut self, ticket: Ticket) {
        if !self.resize.fire(ticket) || self.render_loop.phase() == LoopPhase::Stopped {
            return;
        }
        self.sync_viewport();
        if self.readiness.is_ready() && self.texture.is_dirty() {
            if let Err(err) = self.upload_texture() {
                log::error!("texture re-upload failed: {err}");
                return;
            }
            log::debug!(
                "texture re-uploaded at {}x{} (upload #{})",
                self.viewport.width,
                self.viewport.height,
                self.texture.uploads()
            );
        }
    }

    fn draw(&mut self, time: f32) {
        self.sync_viewport();

        let gl = &self.gl;
        gl.uniform1f(self.program.u_time.as_ref(), time);
        gl.uniform2f(
            self.program.u_res.as_ref(),
            self.viewport.width as f32,
            self.viewport.height as f32,
        );
        gl.uniform1i(self.program.u_tex.as_ref(), 0);
        self.texture.bind(gl);
        self.quad.draw(gl);
    }

    /// Permanent fallback to the static image.
    fn fail(&mut self) {
        self.render_loop.stop();
        self.gl.use_program(None);
        probe::show_fallback(&self.canvas, &self.image);
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Handle to a mounted effect. Clones share the same surface.
#[derive(Clone)]
pub struct WaterHandle {
    surface: Rc<RefCell<WaterSurface>>,
    // Holds the animation-frame closure so that it can re-request itself.
    frame: FrameCallback,
}

impl WaterHandle {
    fn new(surface: WaterSurface) -> Self {
        let handle = Self {
            surface: Rc::new(RefCell::new(surface)),
            frame: Rc::new(RefCell::new(None)),
        };
        let tick = handle.clone();
        *handle.frame.borrow_mut() = Some(Closure::wrap(Box::new(move || tick.tick()) as Box<dyn FnMut()>));
        handle
    }

    pub fn phase(&self) -> LoopPhase {
        self.surface.borrow().render_loop.phase()
    }

    /// Number of draw calls issued so far.
    pub fn frames_drawn(&self) -> u64 {
        self.surface.borrow().render_loop.frames_drawn()
    }

    pub fn texture_uploads(&self) -> u32 {
        self.surface.borrow().texture.uploads()
    }

    fn tick(&self) {
        let drew = {
            let mut surface = self.surface.borrow_mut();
            let now = surface.now();
            match surface.render_loop.begin_frame(now) {
                Some(time) => {
                    surface.draw(time);
                    true
                }
                None => false,
            }
        };
        if drew {
            self.request_frame();
        }
    }

    fn request_frame(&self) {
        let frame = self.frame.borrow();
        let Some(callback) = frame.as_ref() else {
            return;
        };
        let mut surface = self.surface.borrow_mut();
        match surface
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(_) => surface.render_loop.frame_requested(),
            Err(err) => {
                log::error!("requestAnimationFrame failed: {err:?}");
                surface.fail();
            }
        }
    }

    fn on_source_ready(&self, hidden: bool) {
        let ready = self.surface.borrow_mut().on_source_ready(hidden);
        match ready {
            Ok(true) => self.request_frame(),
            Ok(false) => {}
            Err(err) => {
                log::error!("{err}; showing the static image");
                self.surface.borrow_mut().fail();
            }
        }
    }

    fn on_visibility(&self, hidden: bool) {
        let request = {
            let mut surface = self.surface.borrow_mut();
            let now = surface.now();
            if hidden {
                surface.render_loop.pause(now);
                false
            } else {
                surface.render_loop.resume(now)
            }
        };
        if request {
            self.request_frame();
        }
    }

    fn on_resize(&self) {
        let mut surface = self.surface.borrow_mut();
        if surface.render_loop.phase() == LoopPhase::Stopped {
            return;
        }
        surface.texture.mark_dirty();

        let (ticket, stale) = surface.resize.rearm();
        if let Some(timer) = stale {
            surface.window.clear_timeout_with_handle(timer);
        }

        let handle = self.clone();
        let settled =
            Closure::once_into_js(move || handle.surface.borrow_mut().on_resize_settled(ticket));
        let delay = surface.resize.delay_ms().min(i32::MAX as u32) as i32;
        match surface
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(settled.unchecked_ref(), delay)
        {
            Ok(timer) => surface.resize.armed(ticket, timer),
            Err(err) => log::error!("cannot schedule resize: {err:?}"),
        }
    }

    fn wire(&self, window: &Window, document: &Document) -> Result<(), WaterError> {
        let handle = self.clone();
        let on_resize = Closure::wrap(Box::new(move || handle.on_resize()) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            .map_err(js_error)?;
        on_resize.forget();

        let handle = self.clone();
        let doc = document.clone();
        let on_visibility =
            Closure::wrap(Box::new(move || handle.on_visibility(doc.hidden())) as Box<dyn FnMut()>);
        document
            .add_event_listener_with_callback("visibilitychange", on_visibility.as_ref().unchecked_ref())
            .map_err(js_error)?;
        on_visibility.forget();

        let image = self.surface.borrow().image.clone();
        if image.complete() && image.natural_width() > 0 {
            self.on_source_ready(document.hidden());
            return Ok(());
        }

        let handle = self.clone();
        let doc = document.clone();
        let on_load = Closure::once_into_js(move || handle.on_source_ready(doc.hidden()));
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        image
            .add_event_listener_with_callback_and_add_event_listener_options(
                "load",
                on_load.unchecked_ref(),
                &options,
            )
            .map_err(js_error)
    }
}

/// Starts the effect on the canvas and image named by `defaults`.
///
/// Returns `Ok(None)` when either element is missing (the page simply has no
/// effect) or when the browser cannot run it, in which case the static image is
/// left visible.
pub fn mount(
    window: &Window,
    document: &Document,
    defaults: &EffectConfig,
) -> Result<Option<WaterHandle>, WaterError> {
    let canvas = document
        .get_element_by_id(&defaults.canvas_id)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
    let image = document
        .get_element_by_id(&defaults.image_id)
        .and_then(|el| el.dyn_into::<HtmlImageElement>().ok());
    let (Some(canvas), Some(image)) = (canvas, image) else {
        log::debug!("water effect inert: #{} or #{} missing", defaults.canvas_id, defaults.image_id);
        return Ok(None);
    };

    let config = defaults
        .with_overrides(|key| canvas.get_attribute(&format!("data-{key}")))
        .unwrap_or_else(|err| {
            log::warn!("{err}; using defaults");
            defaults.clone()
        });

    let surface = match WaterSurface::new(window.clone(), canvas.clone(), image.clone(), config) {
        Ok(surface) => surface,
        Err(err) if err.is_fatal_for_session() => {
            probe::show_fallback(&canvas, &image);
            match err {
                WaterError::ContextUnavailable => log::info!("{err}; showing the static image"),
                _ => log::error!("{err}; showing the static image"),
            }
            return Ok(None);
        }
        Err(err) => {
            probe::show_fallback(&canvas, &image);
            return Err(err);
        }
    };

    let handle = WaterHandle::new(surface);
    if let Err(err) = handle.wire(window, document) {
        handle.surface.borrow_mut().fail();
        return Err(err);
    }
    Ok(Some(handle))
}
