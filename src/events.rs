use std::cell::Cell;
use std::rc::Rc;

use cinema_core::ScrollSample;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom::{self, ScrollTarget};

const EVENTS: [&str; 2] = ["scroll", "resize"];

/// Window scroll/resize listeners feeding the latest sample into `pending`.
///
/// Listeners are removed when this is dropped.
pub struct ScrollListeners {
    window: web::Window,
    closure: Closure<dyn FnMut()>,
}

impl ScrollListeners {
    pub fn attach(
        target: ScrollTarget,
        pending: Rc<Cell<Option<ScrollSample>>>,
    ) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let closure = Closure::wrap(Box::new(move || {
            // Later events overwrite earlier ones; the frame takes whatever is newest.
            if let Some(s) = dom::sample(&target) {
                pending.set(Some(s));
            }
        }) as Box<dyn FnMut()>);

        // Drop removes anything already added if a later add fails.
        let listeners = Self { window, closure };
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(true);
        for event in EVENTS {
            listeners
                .window
                .add_event_listener_with_callback_and_add_event_listener_options(
                    event,
                    listeners.closure.as_ref().unchecked_ref(),
                    &opts,
                )
                .map_err(|e| anyhow::anyhow!("add {} listener: {:?}", event, e))?;
        }
        Ok(listeners)
    }
}

impl Drop for ScrollListeners {
    fn drop(&mut self) {
        for event in EVENTS {
            _ = self
                .window
                .remove_event_listener_with_callback(event, self.closure.as_ref().unchecked_ref());
        }
        log::debug!("[scroll] listeners removed");
    }
}
