#![cfg(target_arch = "wasm32")]
use cinema_core::{presets, Orchestrator};
use wasm_bindgen::prelude::*;

mod constants;
mod css;
mod dom;
mod events;
mod frame;
mod render;

use dom::ScrollTarget;
use render::PageRenderer;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scroll-cinema starting");
    Ok(())
}

fn to_js(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", e))
}

/// Handle to one mounted page. Dropping or freeing it unmounts the page.
#[wasm_bindgen]
pub struct PageHandle {
    page: frame::Page,
}

#[wasm_bindgen]
impl PageHandle {
    /// Remove listeners, stop the frame loop and release every item. Idempotent.
    pub fn unmount(&mut self) {
        self.page.unmount();
    }

    #[wasm_bindgen(getter)]
    pub fn live(&self) -> bool {
        self.page.is_live()
    }

    #[wasm_bindgen(getter)]
    pub fn progress(&self) -> f32 {
        self.page.progress()
    }
}

/// Mount a document-scroll camera journey from a named preset; `on_frame`
/// receives one plain object per animation frame.
#[wasm_bindgen]
pub fn mount_journey(preset: &str, on_frame: js_sys::Function) -> Result<PageHandle, JsValue> {
    mount_preset(preset, on_frame).map_err(to_js)
}

fn mount_preset(preset: &str, on_frame: js_sys::Function) -> anyhow::Result<PageHandle> {
    let config = presets::by_name(preset)
        .ok_or_else(|| anyhow::anyhow!("unknown preset '{}'", preset))?;
    if !config.timelines.is_empty() {
        anyhow::bail!("preset '{}' drives DOM items; use mount_accordion", preset);
    }
    let orchestrator = Orchestrator::new(config, PageRenderer::new(Some(on_frame)))?;
    let page = frame::Page::mount(orchestrator, ScrollTarget::Document)?;
    log::info!("[orchestrator] journey '{}' mounted", preset);
    Ok(PageHandle { page })
}

/// Mount the book accordion on `#container_id`, scrubbing every descendant
/// matching `item_selector` (default `.book-page`) in document order.
#[wasm_bindgen]
pub fn mount_accordion(
    container_id: &str,
    item_selector: Option<String>,
    on_frame: Option<js_sys::Function>,
) -> Result<PageHandle, JsValue> {
    mount_book(container_id, item_selector, on_frame).map_err(to_js)
}

fn mount_book(
    container_id: &str,
    item_selector: Option<String>,
    on_frame: Option<js_sys::Function>,
) -> anyhow::Result<PageHandle> {
    let selector = item_selector.unwrap_or_else(|| constants::DEFAULT_ITEM_SELECTOR.to_string());
    let container = dom::element_by_id(container_id)?;
    let pages = dom::query_items(&container, &selector)?;
    if pages.is_empty() {
        log::warn!("[orchestrator] no items match '{}' in #{}", selector, container_id);
    }
    if let Some(host) = container.dyn_ref::<web_sys::HtmlElement>() {
        for (property, value) in css::container_properties() {
            dom::set_style(host, property, &value);
        }
    }

    // Timelines are registered here so item ids can be bound to their nodes.
    let mut config = presets::book_accordion(pages.len());
    let specs = std::mem::take(&mut config.timelines);
    let mut orchestrator = Orchestrator::new(config, PageRenderer::new(on_frame))?;
    for spec in specs {
        let (_, ids) = orchestrator.add_timeline(spec.config, spec.item_count)?;
        orchestrator
            .renderer_mut()
            .bind_nodes(ids.into_iter().zip(pages.iter().cloned()));
    }

    let page = frame::Page::mount(orchestrator, ScrollTarget::Element(container))?;
    log::info!(
        "[orchestrator] accordion on #{} mounted with {} items",
        container_id,
        pages.len()
    );
    Ok(PageHandle { page })
}
