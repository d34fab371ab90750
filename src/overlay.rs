use crate::constants::{HELP_OVERLAY_ID, HIDDEN_CLASS};
use web_sys as web;

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(HELP_OVERLAY_ID) {
        _ = el.class_list().remove_1(HIDDEN_CLASS);
        // fallback for pages without the CSS class
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(HELP_OVERLAY_ID) {
        _ = el.class_list().add_1(HIDDEN_CLASS);
        _ = el.set_attribute("style", "display:none");
    }
}

/// A missing overlay counts as hidden.
#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    let Some(el) = document.get_element_by_id(HELP_OVERLAY_ID) else {
        return true;
    };
    el.class_list().contains(HIDDEN_CLASS)
        || el
            .get_attribute("style")
            .map(|s| s.contains("display:none"))
            .unwrap_or(false)
}

#[inline]
pub fn toggle(document: &web::Document) {
    if is_hidden(document) {
        show(document);
    } else {
        hide(document);
    }
}
