use crate::constants::{SCENE_CANVAS_CLASS, SCENE_CLEAR_RGB};
use crate::dom::{self, Listener};
use crate::frame::AnimationLoop;
use crate::render::GpuState;
use jt_core::geometry::{idle_orientation, scene_instances, OctahedronPose};
use jt_core::lifecycle::Lifecycle;
use jt_core::{Camera, SceneLighting, SmoothedDistortion};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

struct SceneInner {
    lifecycle: Lifecycle,
    container: web::HtmlElement,
    canvas: web::HtmlCanvasElement,
    gpu: Option<GpuState>,
    smoothing: SmoothedDistortion,
    camera: Camera,
    lighting: SceneLighting,
    mounted_at_ms: f64,
    resize_listener: Option<Listener>,
    frame: Option<AnimationLoop>,
}

impl SceneInner {
    fn resize(&mut self) {
        let (w, h) = dom::sync_canvas_to_container(&self.canvas, &self.container);
        self.camera.set_viewport(w, h);
        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(w, h);
        }
    }

    /// One animation step. Returns `false` when the loop should stop.
    fn frame(&mut self, now_ms: f64) -> bool {
        if !self.lifecycle.is_mounted() {
            return false;
        }
        let p = self.smoothing.step();
        let pose = OctahedronPose::from_progress(p);
        let orientation = idle_orientation(now_ms - self.mounted_at_ms);
        let instances = scene_instances(&pose, orientation);
        let Some(g) = &mut self.gpu else {
            return false;
        };
        match g.render(&self.camera, &self.lighting, &instances) {
            Ok(()) => true,
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[scene] surface out of memory, stopping render loop");
                false
            }
            Err(e) => {
                log::warn!("[scene] skipped frame: {:?}", e);
                true
            }
        }
    }

    /// Release everything. Returns `false` if already disposed.
    fn dispose(&mut self) -> bool {
        if !self.lifecycle.dispose() {
            return false;
        }
        if let Some(f) = self.frame.take() {
            f.cancel();
        }
        self.resize_listener.take();
        if let Some(mut g) = self.gpu.take() {
            g.destroy();
        }
        let node: &web::Node = self.canvas.as_ref();
        if self.container.contains(Some(node)) {
            _ = self.container.remove_child(node);
        }
        log::info!("[scene] disposed");
        true
    }
}

/// The 3D view: a canvas appended to a host container, driven by its own
/// frame loop that eases the drawn distortion toward the latest target.
pub struct SceneView {
    inner: Rc<RefCell<SceneInner>>,
}

impl SceneView {
    /// Append a canvas to `container` and start GPU initialization.
    ///
    /// Rendering begins once the adapter and device are ready; disposing
    /// before then releases them as soon as they arrive.
    pub fn mount(
        document: &web::Document,
        container: web::HtmlElement,
        initial_progress: f32,
        smoothing_alpha: f32,
    ) -> anyhow::Result<Self> {
        let canvas: web::HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| anyhow::anyhow!("create canvas: {:?}", e))?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("canvas cast: {:?}", e))?;
        canvas.set_class_name(SCENE_CANVAS_CLASS);
        container
            .append_child(&canvas)
            .map_err(|e| anyhow::anyhow!("append canvas: {:?}", e))?;

        let mut lifecycle = Lifecycle::default();
        lifecycle.begin_mount();
        let inner = Rc::new(RefCell::new(SceneInner {
            lifecycle,
            container,
            canvas: canvas.clone(),
            gpu: None,
            smoothing: SmoothedDistortion::new(initial_progress).with_alpha(smoothing_alpha),
            camera: Camera::default(),
            lighting: SceneLighting::default(),
            mounted_at_ms: dom::now_ms(),
            resize_listener: None,
            frame: None,
        }));
        inner.borrow_mut().resize();

        if let Some(window) = web::window() {
            let weak = Rc::downgrade(&inner);
            let listener = Listener::new(window.as_ref(), "resize", move |_| {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().resize();
                }
            })?;
            inner.borrow_mut().resize_listener = Some(listener);
        }

        let weak = Rc::downgrade(&inner);
        spawn_local(async move {
            let gpu = match GpuState::new(&canvas).await {
                Ok(g) => g,
                Err(e) => {
                    log::error!("[gpu] WebGPU init error: {:?}", e);
                    return;
                }
            };
            finish_mount(weak, gpu);
        });

        log::info!("[scene] mounted, waiting for GPU");
        Ok(Self { inner })
    }

    /// Publish a new target distortion; the drawn value eases toward it.
    pub fn set_target(&self, progress: f32) {
        self.inner.borrow_mut().smoothing.set_target(progress);
    }

    /// Stop rendering, detach the canvas and release GPU resources.
    ///
    /// Safe to call more than once and before GPU initialization finished.
    pub fn dispose(&self) {
        self.inner.borrow_mut().dispose();
    }
}

impl Drop for SceneView {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn finish_mount(weak: Weak<RefCell<SceneInner>>, mut gpu: GpuState) {
    let Some(inner) = weak.upgrade() else {
        gpu.destroy();
        return;
    };
    let mut s = inner.borrow_mut();
    if !s.lifecycle.finish_mount() {
        log::info!("[scene] disposed during GPU init, releasing late resources");
        gpu.destroy();
        return;
    }
    gpu.set_clear_color(SCENE_CLEAR_RGB);
    s.gpu = Some(gpu);
    s.resize();

    let weak_tick = weak.clone();
    s.frame = Some(AnimationLoop::start(move |ts| match weak_tick.upgrade() {
        Some(inner) => inner.borrow_mut().frame(ts),
        None => false,
    }));
    log::info!("[scene] GPU ready, render loop started");
}
