use jt_core::diagram::Diagram;
use jt_core::EnergyLevels;
use web_sys as web;

/// SVG energy-level diagram rendered into a host element.
///
/// The first update writes the whole `<svg>`; later updates only move the
/// shapes that carry an id, so the CSS transitions on level lines can run.
pub struct DiagramView {
    host: web::Element,
    mounted: bool,
}

impl DiagramView {
    pub fn new(host: web::Element) -> Self {
        Self {
            host,
            mounted: false,
        }
    }

    pub fn update(&mut self, levels: &EnergyLevels) {
        let diagram = Diagram::layout(levels);
        if !self.mounted {
            self.host.set_inner_html(&diagram.to_svg());
            self.mounted = true;
            return;
        }
        for shape in &diagram.shapes {
            let Some(id) = shape.id() else { continue };
            let Some(el) = self.find(id) else {
                log::warn!("[diagram] #{} missing, remounting", id);
                self.host.set_inner_html(&diagram.to_svg());
                return;
            };
            for (name, value) in shape.dynamic_attributes() {
                _ = el.set_attribute(name, &value);
            }
            if let Some(text) = shape.text() {
                if el.text_content().as_deref() != Some(text) {
                    el.set_text_content(Some(text));
                }
            }
        }
    }

    fn find(&self, id: &str) -> Option<web::Element> {
        self.host.query_selector(&format!("#{}", id)).ok().flatten()
    }

    pub fn clear(&mut self) {
        self.host.set_inner_html("");
        self.mounted = false;
    }
}
