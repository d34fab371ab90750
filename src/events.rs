use crate::dom::Listener;
use crate::input::{command_for_key, KeyCommand};
use crate::overlay;
use jt_core::ControlAction;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Global keyboard shortcuts.
///
/// Keys typed into a focused form control are left to the control itself,
/// so arrows on a slider do not also nudge through the shortcut.
pub fn wire_global_keydown(
    document: &web::Document,
    dispatch: impl Fn(ControlAction) + 'static,
) -> anyhow::Result<Listener> {
    let doc = document.clone();
    Listener::new(document.as_ref(), "keydown", move |ev| {
        let Some(ev) = ev.dyn_ref::<web::KeyboardEvent>() else {
            return;
        };
        if ev.repeat() && ev.key() == " " {
            return;
        }
        if targets_form_control(ev) {
            return;
        }
        match command_for_key(&ev.key()) {
            Some(KeyCommand::Control(action)) => {
                ev.prevent_default();
                log::debug!("[keys] {:?}", action);
                dispatch(action);
            }
            Some(KeyCommand::ToggleHelp) => overlay::toggle(&doc),
            None => {}
        }
    })
}

fn targets_form_control(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .map(|t| t.is_instance_of::<web::HtmlInputElement>())
        .unwrap_or(false)
}
