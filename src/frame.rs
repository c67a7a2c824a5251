use std::cell::{Cell, RefCell};
use std::rc::Rc;

use cinema_core::{Orchestrator, ScrollSample};
use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom::{self, ScrollTarget};
use crate::events::ScrollListeners;
use crate::render::PageRenderer;

/// Per-frame state owned by the animation loop.
pub struct FrameContext {
    pub orchestrator: Orchestrator<PageRenderer>,
    pub target: ScrollTarget,
    pub pending: Rc<Cell<Option<ScrollSample>>>,
    pub live: Rc<Cell<bool>>,
    /// Last rendered progress, readable while the loop holds the context.
    pub progress: Rc<Cell<f32>>,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        if !self.live.get() {
            self.teardown();
            return;
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last_instant);
        self.last_instant = now;

        // Newest listener sample, or a fresh read when nothing scrolled.
        if let Some(sample) = self.pending.take().or_else(|| dom::sample(&self.target)) {
            self.orchestrator.sample(sample);
        }
        self.orchestrator
            .renderer_mut()
            .set_aspect(dom::viewport_aspect());
        if self.orchestrator.tick(dt) {
            self.progress.set(self.orchestrator.progress());
        }

        // The frame callback may have unmounted the page.
        if !self.live.get() {
            self.teardown();
        }
    }

    fn teardown(&mut self) {
        if self.orchestrator.is_live() {
            self.orchestrator.unmount();
        }
        self.orchestrator.renderer_mut().release();
    }
}

/// A mounted page: listeners, animation loop and the shared liveness flag.
pub struct Page {
    ctx: Rc<RefCell<FrameContext>>,
    live: Rc<Cell<bool>>,
    progress: Rc<Cell<f32>>,
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    listeners: Option<ScrollListeners>,
}

impl Page {
    pub fn mount(
        mut orchestrator: Orchestrator<PageRenderer>,
        target: ScrollTarget,
    ) -> anyhow::Result<Self> {
        let pending = Rc::new(Cell::new(None));
        let listeners = ScrollListeners::attach(target.clone(), pending.clone())?;
        if let Some(sample) = dom::sample(&target) {
            orchestrator.sample(sample);
        }
        orchestrator.mount();

        let live = Rc::new(Cell::new(true));
        let progress = Rc::new(Cell::new(orchestrator.progress()));
        let ctx = Rc::new(RefCell::new(FrameContext {
            orchestrator,
            target,
            pending,
            live: live.clone(),
            progress: progress.clone(),
            last_instant: Instant::now(),
        }));
        let raf_id = Rc::new(Cell::new(None));
        let tick = start_loop(ctx.clone(), live.clone(), raf_id.clone());
        Ok(Self {
            ctx,
            live,
            progress,
            raf_id,
            tick,
            listeners: Some(listeners),
        })
    }

    pub fn is_live(&self) -> bool {
        self.live.get()
    }

    pub fn progress(&self) -> f32 {
        self.progress.get()
    }

    /// Detach listeners, cancel the pending frame and tear the orchestrator
    /// down. Safe to call from inside the frame callback.
    pub fn unmount(&mut self) {
        if !self.live.replace(false) {
            return;
        }
        self.listeners = None;
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        // Mid-frame the loop still holds the context; it tears down itself
        // once the renderer returns.
        if let Ok(mut ctx) = self.ctx.try_borrow_mut() {
            ctx.teardown();
        }
        self.tick.borrow_mut().take();
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn request_frame(
    tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    raf_id: &Cell<Option<i32>>,
) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(closure) = tick.borrow().as_ref() {
        match w.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => raf_id.set(Some(id)),
            Err(e) => log::error!("[frame] requestAnimationFrame failed: {:?}", e),
        }
    }
}

pub fn start_loop(
    frame_ctx: Rc<RefCell<FrameContext>>,
    live: Rc<Cell<bool>>,
    raf_id: Rc<Cell<Option<i32>>>,
) -> Rc<RefCell<Option<Closure<dyn FnMut()>>>> {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let raf_tick = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        raf_tick.set(None);
        if !live.get() {
            return;
        }
        frame_ctx.borrow_mut().frame();
        if live.get() {
            request_frame(&tick_clone, &raf_tick);
        }
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &raf_id);
    tick
}
