//! The `Brightroom` editor widget.
//!
//! State lives in an `Rc<RefCell<Editor>>`. DOM callbacks (button clicks,
//! animation frames, load completion) hold only weak references, so freeing
//! the JS object drops the editor, which unmounts it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use brightroom_core::frame::RedrawScheduler;
use brightroom_core::transform::CanvasOp;
use brightroom_core::{layout, EditState, EditorConfig, EditorError, ExportPlan, Layout, Rotation};
use js_sys::{Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, spawn_local};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, Node};

use crate::controls::{ControlAction, Controls};
use crate::dom;
use crate::error::{dom_error, to_js};
use crate::loader::{decode_failure, ImageSource, LoadedImage};
use crate::mount::Mounted;

pub(crate) struct Editor {
    config: EditorConfig,
    canvas: HtmlCanvasElement,
    controls: Option<Controls>,
    mounted: Option<Mounted>,
    image: Option<LoadedImage>,
    /// Bumped by every load; only the latest one may touch the editor.
    generation: u64,
    state: EditState,
    layout: Layout,
    scheduler: RedrawScheduler<i32>,
    frame_callback: Option<Closure<dyn FnMut()>>,
}

impl Editor {
    fn new(config: EditorConfig) -> Result<Rc<RefCell<Self>>, EditorError> {
        config.validate()?;
        let document = dom::document()?;
        let canvas = dom::create_canvas(&document)?;

        let editor = Rc::new(RefCell::new(Editor {
            config,
            canvas,
            controls: None,
            mounted: None,
            image: None,
            generation: 0,
            state: EditState::default(),
            layout: Layout::EMPTY,
            scheduler: RedrawScheduler::new(),
            frame_callback: None,
        }));

        let weak = Rc::downgrade(&editor);
        let on_action = {
            let weak = weak.clone();
            move |action: ControlAction| {
                if let Some(editor) = weak.upgrade() {
                    editor.borrow_mut().apply_action(action);
                }
            }
        };
        let frame_callback = Closure::<dyn FnMut()>::new(move || {
            if let Some(editor) = weak.upgrade() {
                editor.borrow_mut().on_frame();
            }
        });

        {
            let mut this = editor.borrow_mut();
            let controls = Controls::build(&document, &this.config.controls_class, on_action)?;
            this.controls = Some(controls);
            this.frame_callback = Some(frame_callback);
        }
        Ok(editor)
    }

    fn mount(&mut self, container: HtmlElement) -> Result<(), EditorError> {
        if self
            .mounted
            .as_ref()
            .is_some_and(|m| m.holds(&container))
        {
            return Ok(());
        }
        self.unmount();

        let panel = self
            .controls
            .as_ref()
            .map(|c| c.panel().clone())
            .ok_or_else(|| EditorError::Dom("controls not built".to_string()))?;
        let canvas: &Node = self.canvas.as_ref();
        let panel: &Node = panel.as_ref();
        let mounted = Mounted::attach(container, &[canvas, panel], &self.config.container_class)?;
        self.mounted = Some(mounted);
        self.resize();
        Ok(())
    }

    fn unmount(&mut self) {
        if let Some(handle) = self.scheduler.cancel() {
            if let Ok(window) = dom::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
        // Dropping the mount detaches the nodes and releases the claim.
        if self.mounted.take().is_some() {
            let (requests, draws) = self.scheduler.stats();
            log::debug!("unmounted after {draws} draws for {requests} redraw requests");
        }
    }

    fn ready_image(&self) -> Option<&LoadedImage> {
        self.image.as_ref().filter(|image| image.is_ready())
    }

    fn apply_action(&mut self, action: ControlAction) {
        action.apply(&mut self.state);
        log::debug!("{:?} -> {:?}", action, self.state);
        self.resize();
    }

    fn rotate(&mut self, rotation: Rotation) {
        self.state.rotate(rotation);
        self.resize();
    }

    /// Recompute the fitted canvas size and preview transform, then schedule
    /// a redraw. No-op while unmounted.
    fn resize(&mut self) {
        let Some(mounted) = &self.mounted else {
            return;
        };
        let (width, height) = match dom::rendered_size(mounted.container()) {
            Ok(size) => size,
            Err(e) => {
                log::warn!("cannot measure container: {e}");
                (0.0, 0.0)
            }
        };

        let natural = self.ready_image().map(LoadedImage::natural_size);
        self.layout = layout::fit(width, height, natural, self.state.rotation, &self.config);
        if self.layout.is_empty() {
            log::debug!("nothing to show; canvas cleared");
        }
        self.canvas.set_width(self.layout.canvas_width);
        self.canvas.set_height(self.layout.canvas_height);

        let style = self.canvas.style();
        let transform = self.state.css_transform(self.config.hidpi_scale);
        for (property, value) in [
            ("width", format!("{}px", self.layout.css_width)),
            ("height", format!("{}px", self.layout.css_height)),
            ("transform", transform),
        ] {
            if let Err(e) = style.set_property(property, &value) {
                log::warn!("cannot set canvas {property}: {}", dom_error(e));
            }
        }

        self.request_redraw();
    }

    fn request_redraw(&mut self) {
        if !self.scheduler.request() {
            return;
        }
        let Some(callback) = &self.frame_callback else {
            return;
        };
        let scheduled = dom::window().and_then(|window| {
            window
                .request_animation_frame(callback.as_ref().unchecked_ref())
                .map_err(dom_error)
        });
        match scheduled {
            Ok(handle) => self.scheduler.scheduled(handle),
            Err(e) => log::warn!("cannot schedule redraw: {e}"),
        }
    }

    fn on_frame(&mut self) {
        if self.scheduler.fire() {
            if let Err(e) = self.draw() {
                log::warn!("draw failed: {e}");
            }
        }
    }

    fn draw(&self) -> Result<(), EditorError> {
        if self.mounted.is_none() {
            return Ok(());
        }
        let ctx = dom::context_2d(&self.canvas)?;
        let width = f64::from(self.canvas.width());
        let height = f64::from(self.canvas.height());

        ctx.set_fill_style_str(&self.config.background);
        ctx.fill_rect(0.0, 0.0, width, height);

        match self.ready_image() {
            Some(image) => ctx
                .draw_image_with_html_image_element_and_dw_and_dh(
                    image.element(),
                    0.0,
                    0.0,
                    width,
                    height,
                )
                .map_err(dom_error),
            None => {
                ctx.set_fill_style_str(&self.config.placeholder_color);
                ctx.fill_text(&self.config.placeholder, 50.0, 50.0)
                    .map_err(dom_error)
            }
        }
    }

    /// Render the edited image at full resolution onto a new canvas.
    fn export(&self) -> Result<HtmlCanvasElement, EditorError> {
        let image = self.ready_image().ok_or(EditorError::NotLoaded)?;
        let (source_width, source_height) = image.natural_size();
        let plan = ExportPlan::new(source_width, source_height, &self.state)?;

        let canvas = dom::create_canvas(&dom::document()?)?;
        canvas.set_width(plan.width);
        canvas.set_height(plan.height);
        let ctx = dom::context_2d(&canvas)?;

        ctx.save();
        let drawn = run_plan(&ctx, &plan, image);
        ctx.restore();
        drawn?;

        log::debug!(
            "exported {}x{} ({:?})",
            plan.width,
            plan.height,
            self.state
        );
        Ok(canvas)
    }
}

fn run_plan(
    ctx: &CanvasRenderingContext2d,
    plan: &ExportPlan,
    image: &LoadedImage,
) -> Result<(), EditorError> {
    for op in &plan.ops {
        let applied = match *op {
            CanvasOp::Translate(x, y) => ctx.translate(x, y),
            CanvasOp::Scale(x, y) => ctx.scale(x, y),
            CanvasOp::Rotate(rotation) => ctx.rotate(rotation.radians()),
        };
        applied.map_err(dom_error)?;
    }
    let (x, y) = plan.draw_origin();
    ctx.draw_image_with_html_image_element_and_dw_and_dh(
        image.element(),
        x,
        y,
        f64::from(plan.source_width),
        f64::from(plan.source_height),
    )
    .map_err(dom_error)
}

impl Drop for Editor {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Load `source` into the editor behind `editor`.
///
/// Layout is recomputed as soon as the bytes are in (clearing the previous
/// image) and again once the browser has decoded the new one. A load
/// superseded by a later `setImage` before its bytes arrive resolves without
/// touching the editor. Once installed, the image is laid out after decoding
/// for as long as the editor still holds it.
async fn load(editor: Weak<RefCell<Editor>>, source: ImageSource) -> Result<(), EditorError> {
    let Some(generation) = editor.upgrade().map(|editor| {
        let mut this = editor.borrow_mut();
        this.generation += 1;
        this.generation
    }) else {
        return Ok(());
    };
    let is_current = |editor: &Weak<RefCell<Editor>>| {
        editor
            .upgrade()
            .filter(|editor| editor.borrow().generation == generation)
    };

    let bytes = source.read().await?;
    let image = LoadedImage::from_bytes(&bytes)?;
    let element = image.element().clone();
    let decoded = image.decoded();

    match is_current(&editor) {
        Some(editor) => {
            let mut this = editor.borrow_mut();
            this.image = Some(image);
            this.resize();
        }
        None => {
            log::debug!("superseded load fetched; ignoring");
            return Ok(());
        }
    }

    decoded.await.map_err(decode_failure)?;

    // A newer load may have bumped the generation without replacing the
    // image yet (or ever, if it fails); what matters is who is displayed.
    let holder = editor.upgrade().filter(|editor| {
        editor
            .borrow()
            .image
            .as_ref()
            .is_some_and(|image| *image.element() == element)
    });
    match holder {
        Some(editor) => {
            log::debug!("image ready ({} bytes)", bytes.len());
            editor.borrow_mut().resize();
        }
        None => log::debug!("replaced image decoded; ignoring"),
    }
    Ok(())
}

/// An embeddable photo editor: preview canvas, control panel, export.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const editor = new Brightroom({ image: file, container: el });
/// await editor.setImage('/photos/example.jpg');
/// editor.rotate(90);
/// const canvas = await editor.toCanvas();
/// ```
#[wasm_bindgen]
pub struct Brightroom {
    editor: Rc<RefCell<Editor>>,
}

#[wasm_bindgen]
impl Brightroom {
    /// Create an editor from `{ image?, container?, config? }`.
    ///
    /// A load started here has no caller to reject to; failures are logged.
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<js_sys::Object>) -> Result<Brightroom, JsValue> {
        let options = options.unwrap_or_default();
        let config = match option(&options, "config")? {
            Some(value) => serde_wasm_bindgen::from_value::<EditorConfig>(value)
                .map_err(|e| to_js(EditorError::InvalidConfig(e.to_string())))?,
            None => EditorConfig::default(),
        };

        let widget = Brightroom {
            editor: Editor::new(config).map_err(to_js)?,
        };

        if let Some(container) = option(&options, "container")? {
            let container = container.dyn_into::<HtmlElement>().map_err(|_| {
                to_js(EditorError::Dom(
                    "container must be an HTMLElement".to_string(),
                ))
            })?;
            widget.mount(container)?;
        }

        if let Some(image) = option(&options, "image")? {
            let source = ImageSource::from_js(&image).map_err(to_js)?;
            let editor = Rc::downgrade(&widget.editor);
            spawn_local(async move {
                match load(editor, source).await {
                    Ok(()) => {}
                    Err(e) if e.is_input_error() => {
                        log::warn!("initial image rejected: {e}");
                    }
                    Err(e) => log::error!("initial image failed to load: {e}"),
                }
            });
        }

        Ok(widget)
    }

    /// Attach to `container`. Mounting to the current container is a no-op;
    /// mounting elsewhere detaches first.
    pub fn mount(&self, container: HtmlElement) -> Result<(), JsValue> {
        self.editor.borrow_mut().mount(container).map_err(to_js)
    }

    /// Detach from the current container, if any.
    pub fn unmount(&self) {
        self.editor.borrow_mut().unmount();
    }

    /// Load an image from a URL string or a `Blob`/`File`.
    ///
    /// Resolves once the image has decoded; rejects for unsupported input,
    /// failed fetches, non-image content types and undecodable data.
    #[wasm_bindgen(js_name = setImage)]
    pub fn set_image(&self, source: JsValue) -> Promise {
        let editor = Rc::downgrade(&self.editor);
        future_to_promise(async move {
            let source = ImageSource::from_js(&source).map_err(to_js)?;
            load(editor, source).await.map_err(to_js)?;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// True once an image has decoded with non-zero size.
    #[wasm_bindgen(getter)]
    pub fn loaded(&self) -> bool {
        self.editor.borrow().ready_image().is_some()
    }

    /// Current rotation in degrees.
    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> u32 {
        self.editor.borrow().state.rotation.degrees()
    }

    /// Set the rotation; accepts 0, 90, 180 or 270.
    pub fn rotate(&self, degrees: f64) -> Result<(), JsValue> {
        let rotation = Rotation::try_from(degrees).map_err(to_js)?;
        self.editor.borrow_mut().rotate(rotation);
        Ok(())
    }

    #[wasm_bindgen(js_name = flipHorizontal)]
    pub fn flip_horizontal(&self) {
        self.editor
            .borrow_mut()
            .apply_action(ControlAction::FlipHorizontal);
    }

    #[wasm_bindgen(js_name = flipVertical)]
    pub fn flip_vertical(&self) {
        self.editor
            .borrow_mut()
            .apply_action(ControlAction::FlipVertical);
    }

    #[wasm_bindgen(getter, js_name = flippedHorizontal)]
    pub fn flipped_horizontal(&self) -> bool {
        self.editor.borrow().state.flip_horizontal
    }

    #[wasm_bindgen(getter, js_name = flippedVertical)]
    pub fn flipped_vertical(&self) -> bool {
        self.editor.borrow().state.flip_vertical
    }

    /// Back to no rotation and no flips.
    pub fn reset(&self) {
        let mut editor = self.editor.borrow_mut();
        editor.state.reset();
        editor.resize();
    }

    /// `{ rotation, flipHorizontal, flipVertical }` as a plain object.
    #[wasm_bindgen(getter, js_name = editState)]
    pub fn edit_state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.editor.borrow().state).map_err(JsValue::from)
    }

    /// The most recent preview layout as a plain object.
    #[wasm_bindgen(getter)]
    pub fn layout(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.editor.borrow().layout).map_err(JsValue::from)
    }

    /// EXIF orientation (1-8) of the current image, if it could be read.
    #[wasm_bindgen(getter)]
    pub fn orientation(&self) -> Option<u8> {
        self.editor
            .borrow()
            .image
            .as_ref()
            .and_then(LoadedImage::metadata)
            .map(|meta| meta.orientation.value())
    }

    /// Resolve with a new full-resolution canvas holding the edited image.
    #[wasm_bindgen(js_name = toCanvas)]
    pub fn to_canvas(&self) -> Promise {
        let result = self.editor.borrow().export();
        future_to_promise(async move { result.map(JsValue::from).map_err(to_js) })
    }

    /// Export and encode as a data URL (`image/png` unless `mime` is given).
    #[wasm_bindgen(js_name = toDataURL)]
    pub fn to_data_url(&self, mime: Option<String>) -> Promise {
        let result = self.editor.borrow().export().and_then(|canvas| {
            let encoded = match mime.as_deref() {
                Some(mime) => canvas.to_data_url_with_type(mime),
                None => canvas.to_data_url(),
            };
            encoded.map_err(dom_error)
        });
        future_to_promise(async move { result.map(JsValue::from).map_err(to_js) })
    }
}

/// Read an optional property; `undefined` and `null` count as absent.
fn option(options: &js_sys::Object, key: &str) -> Result<Option<JsValue>, JsValue> {
    let value = Reflect::get(options, &JsValue::from_str(key))?;
    Ok((!value.is_undefined() && !value.is_null()).then_some(value))
}
