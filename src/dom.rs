use cinema_core::{ElementGeometry, ScrollSample};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{FALLBACK_VIEWPORT_H, FALLBACK_VIEWPORT_W};

/// What a page's progress is measured against.
#[derive(Clone)]
pub enum ScrollTarget {
    Document,
    Element(web::Element),
}

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

fn viewport(w: &web::Window) -> (f32, f32) {
    let width = w
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .map_or(FALLBACK_VIEWPORT_W, |v| v as f32);
    let height = w
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .map_or(FALLBACK_VIEWPORT_H, |v| v as f32);
    (width, height)
}

pub fn viewport_aspect() -> f32 {
    match web::window() {
        Some(w) => {
            let (width, height) = viewport(&w);
            if height > 0.0 {
                width / height
            } else {
                1.0
            }
        }
        None => FALLBACK_VIEWPORT_W / FALLBACK_VIEWPORT_H,
    }
}

/// Read the current scroll geometry. None when there is no window.
pub fn sample(target: &ScrollTarget) -> Option<ScrollSample> {
    let w = web::window()?;
    let (_, viewport_height) = viewport(&w);
    match target {
        ScrollTarget::Document => {
            let offset = w.scroll_y().ok()? as f32;
            let scroll_height = w
                .document()
                .and_then(|d| d.document_element())
                .map_or(0, |el| el.scroll_height()) as f32;
            Some(ScrollSample::Document {
                offset,
                extent: scroll_height - viewport_height,
            })
        }
        ScrollTarget::Element(el) => {
            let rect = el.get_bounding_client_rect();
            Some(ScrollSample::Element(ElementGeometry {
                top: rect.top() as f32,
                height: rect.height() as f32,
                viewport_height,
            }))
        }
    }
}

pub fn element_by_id(id: &str) -> anyhow::Result<web::Element> {
    let document = window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))
}

/// Items under `container` matching `selector`, in document order.
pub fn query_items(container: &web::Element, selector: &str) -> anyhow::Result<Vec<web::HtmlElement>> {
    let list = container
        .query_selector_all(selector)
        .map_err(|e| anyhow::anyhow!("bad selector '{}': {:?}", selector, e))?;
    let mut items = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        if let Some(node) = list.item(i) {
            match node.dyn_into::<web::HtmlElement>() {
                Ok(el) => items.push(el),
                Err(_) => log::warn!("[dom] skipping non-HTML node matching '{}'", selector),
            }
        }
    }
    Ok(items)
}

pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    if let Err(e) = el.style().set_property(property, value) {
        log::warn!("[dom] set {} failed: {:?}", property, e);
    }
}
