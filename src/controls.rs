use crate::constants::{
    AUTOPLAY_BUTTON_ID, COUPLING_INPUT_ID, COUPLING_LABEL_ID, DISTORTION_INPUT_ID,
    DISTORTION_LABEL_ID, SLIDER_STEP, STABILIZATION_LABEL_ID,
};
use crate::dom::{self, Listener};
use crate::input::{format_slider_value, parse_slider_value};
use jt_core::{
    ControlAction, Controller, COUPLING_MAX, COUPLING_MIN, DISTORTION_MAX, DISTORTION_MIN,
};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Handles to the page's parameter widgets.
pub struct Controls {
    document: web::Document,
    distortion: web::HtmlInputElement,
    coupling: web::HtmlInputElement,
    toggle: web::HtmlButtonElement,
}

impl Controls {
    pub fn find(document: &web::Document) -> anyhow::Result<Self> {
        let distortion: web::HtmlInputElement =
            dom::element_by_id(document, DISTORTION_INPUT_ID)?;
        let coupling: web::HtmlInputElement = dom::element_by_id(document, COUPLING_INPUT_ID)?;
        let toggle: web::HtmlButtonElement = dom::element_by_id(document, AUTOPLAY_BUTTON_ID)?;
        configure_range(&distortion, DISTORTION_MIN, DISTORTION_MAX);
        configure_range(&coupling, COUPLING_MIN, COUPLING_MAX);
        Ok(Self {
            document: document.clone(),
            distortion,
            coupling,
            toggle,
        })
    }

    /// Attach listeners that turn widget events into [`ControlAction`]s.
    pub fn wire(
        &self,
        dispatch: impl Fn(ControlAction) + Clone + 'static,
    ) -> anyhow::Result<Vec<Listener>> {
        let mut listeners = Vec::with_capacity(3);

        let on_distortion = dispatch.clone();
        listeners.push(Listener::new(self.distortion.as_ref(), "input", move |ev| {
            if let Some(v) = event_value(&ev) {
                on_distortion(ControlAction::SetDistortion(v));
            }
        })?);

        let on_coupling = dispatch.clone();
        listeners.push(Listener::new(self.coupling.as_ref(), "input", move |ev| {
            if let Some(v) = event_value(&ev) {
                on_coupling(ControlAction::SetCoupling(v));
            }
        })?);

        listeners.push(Listener::new(self.toggle.as_ref(), "click", move |_| {
            dispatch(ControlAction::ToggleAutoScan);
        })?);

        Ok(listeners)
    }

    /// Reflect controller state into the widgets and labels.
    pub fn sync(&self, controller: &Controller) {
        let d = format_slider_value(controller.distortion());
        if self.distortion.value() != d {
            self.distortion.set_value(&d);
        }
        let c = format_slider_value(controller.coupling());
        if self.coupling.value() != c {
            self.coupling.set_value(&c);
        }
        self.distortion.set_disabled(controller.auto_play());
        self.toggle.set_text_content(Some(controller.toggle_caption()));
        let pressed = if controller.auto_play() { "true" } else { "false" };
        _ = self.toggle.set_attribute("aria-pressed", pressed);

        dom::set_text(&self.document, DISTORTION_LABEL_ID, &controller.distortion_label());
        dom::set_text(&self.document, COUPLING_LABEL_ID, &controller.coupling_label());
        dom::set_text(
            &self.document,
            STABILIZATION_LABEL_ID,
            &controller.stabilization_label(),
        );
    }
}

fn configure_range(input: &web::HtmlInputElement, min: f32, max: f32) {
    input.set_min(&format_slider_value(min));
    input.set_max(&format_slider_value(max));
    input.set_step(&format_slider_value(SLIDER_STEP));
}

fn event_value(ev: &web::Event) -> Option<f32> {
    let input = ev.target()?.dyn_into::<web::HtmlInputElement>().ok()?;
    parse_slider_value(&input.value())
}
