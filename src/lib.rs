#![cfg(target_arch = "wasm32")]
use jt_core::lifecycle::PageHide;
use jt_core::{ControlAction, Controller, VisualizerConfig};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod constants;
mod controls;
mod diagram;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod query;
mod render;
mod scene;

use constants::{DIAGRAM_CONTAINER_ID, SCENE_CONTAINER_ID};
use controls::Controls;
use diagram::DiagramView;
use dom::Listener;
use frame::AnimationLoop;
use scene::SceneView;

/// Everything the page owns: parameters, both views, the auto-scan loop
/// and the listeners feeding them.
struct App {
    controller: Controller,
    scene: SceneView,
    diagram: DiagramView,
    controls: Controls,
    scan_loop: Option<AnimationLoop>,
    listeners: Vec<Listener>,
    disposed: bool,
}

impl App {
    /// Push controller state to every view.
    fn refresh(&mut self) {
        let levels = self.controller.levels();
        self.scene.set_target(self.controller.distortion());
        self.diagram.update(&levels);
        self.controls.sync(&self.controller);
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        if let Some(l) = self.scan_loop.take() {
            l.cancel();
        }
        self.listeners.clear();
        self.scene.dispose();
        self.diagram.clear();
        log::info!("[app] torn down");
    }
}

fn dispatch(app: &Rc<RefCell<App>>, action: ControlAction) {
    {
        let mut a = app.borrow_mut();
        if a.disposed {
            return;
        }
        if !a.controller.apply(action, dom::now_ms()) {
            // rejected writes still resync the widget that sent them
            a.controls.sync(&a.controller);
            return;
        }
        a.refresh();
    }
    sync_scan_loop(app);
}

/// Run the auto-scan loop exactly while `auto_play` is on.
fn sync_scan_loop(app: &Rc<RefCell<App>>) {
    let mut a = app.borrow_mut();
    let running = a.scan_loop.as_ref().is_some_and(|l| l.is_running());
    match (a.controller.auto_play(), running) {
        (true, false) => {
            let weak = Rc::downgrade(app);
            a.scan_loop = Some(AnimationLoop::start(move |ts| scan_tick(&weak, ts)));
        }
        (false, true) => {
            if let Some(l) = a.scan_loop.take() {
                l.cancel();
            }
        }
        _ => {}
    }
}

fn scan_tick(app: &Weak<RefCell<App>>, now_ms: f64) -> bool {
    let Some(app) = app.upgrade() else {
        return false;
    };
    let mut a = app.borrow_mut();
    if a.disposed {
        return false;
    }
    match a.controller.tick(now_ms) {
        Some(_) => {
            a.refresh();
            true
        }
        None => false,
    }
}

fn read_config(window: &web::Window) -> VisualizerConfig {
    let search = window.location().search().unwrap_or_default();
    let pairs = query::parse_query(&search);
    match VisualizerConfig::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::error!("[config] {}; using defaults", e);
            VisualizerConfig::default()
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("jt-web starting");

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

    let config = read_config(&window);
    log::info!("[config] {:?}", config);
    let controller = Controller::new(&config, dom::now_ms());

    let scene_host: web::HtmlElement = dom::element_by_id(&document, SCENE_CONTAINER_ID)?;
    let scene = SceneView::mount(
        &document,
        scene_host,
        controller.distortion(),
        config.smoothing,
    )?;
    let diagram_host: web::Element = dom::element_by_id(&document, DIAGRAM_CONTAINER_ID)?;
    let controls = Controls::find(&document)?;

    let app = Rc::new(RefCell::new(App {
        controller,
        scene,
        diagram: DiagramView::new(diagram_host),
        controls,
        scan_loop: None,
        listeners: Vec::new(),
        disposed: false,
    }));

    let weak = Rc::downgrade(&app);
    let on_action = move |action: ControlAction| {
        if let Some(app) = weak.upgrade() {
            dispatch(&app, action);
        }
    };
    let mut listeners = app.borrow().controls.wire(on_action.clone())?;
    listeners.push(events::wire_global_keydown(&document, on_action)?);
    overlay::hide(&document);

    {
        let mut a = app.borrow_mut();
        a.listeners = listeners;
        a.refresh();
    }
    sync_scan_loop(&app);

    // The page owns the app from here on; a non-cached pagehide is its unmount.
    let app_for_teardown = app.clone();
    let teardown = Closure::wrap(Box::new(move |ev: web::Event| {
        let persisted = ev
            .dyn_ref::<web::PageTransitionEvent>()
            .is_some_and(|e| e.persisted());
        if !PageHide::from_persisted(persisted).tears_down() {
            log::info!("[app] page cached, keeping views");
            return;
        }
        app_for_teardown.borrow_mut().dispose();
    }) as Box<dyn FnMut(web::Event)>);
    window
        .add_event_listener_with_callback("pagehide", teardown.as_ref().unchecked_ref())
        .map_err(|e| anyhow::anyhow!("add pagehide listener: {:?}", e))?;
    teardown.forget();

    Ok(())
}
