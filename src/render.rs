use cinema_core::{
    CameraState, DirectionalLight, EffectEvent, EffectParams, FlashState, FrameOutput,
    FrameRenderer, ItemId,
};
use glam::Vec3;
use js_sys::{Array, Float32Array, Function, Object, Reflect};
use wasm_bindgen::JsValue;
use web_sys as web;

use crate::{css, dom};

/// Hands each frame to a JS callback and applies item transforms to the DOM.
pub struct PageRenderer {
    on_frame: Option<Function>,
    /// Sorted by id.
    nodes: Vec<(ItemId, web::HtmlElement)>,
    aspect: f32,
    callback_failed: bool,
}

impl PageRenderer {
    pub fn new(on_frame: Option<Function>) -> Self {
        Self {
            on_frame,
            nodes: Vec::new(),
            aspect: 1.0,
            callback_failed: false,
        }
    }

    pub fn bind_nodes(&mut self, nodes: impl IntoIterator<Item = (ItemId, web::HtmlElement)>) {
        self.nodes.extend(nodes);
        self.nodes.sort_by_key(|(id, _)| *id);
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Drop the callback and every node reference.
    pub fn release(&mut self) {
        self.on_frame = None;
        self.nodes.clear();
    }

    fn node(&self, id: ItemId) -> Option<&web::HtmlElement> {
        self.nodes
            .binary_search_by_key(&id, |(i, _)| *i)
            .ok()
            .map(|at| &self.nodes[at].1)
    }

    fn apply_items(&self, frame: &FrameOutput) {
        for item in &frame.items {
            let Some(el) = self.node(item.id) else {
                continue;
            };
            dom::set_style(el, "transform", &css::transform_css(&item.transform));
            if let Some(opacity) = css::opacity_css(&item.transform) {
                dom::set_style(el, "opacity", &opacity);
            }
        }
    }
}

impl FrameRenderer for PageRenderer {
    fn render(&mut self, frame: &FrameOutput) {
        self.apply_items(frame);
        let Some(callback) = &self.on_frame else {
            return;
        };
        let payload = frame_object(frame, self.aspect);
        if let Err(e) = callback.call1(&JsValue::NULL, &payload) {
            // Logged once per page.
            if !self.callback_failed {
                log::error!("[render] frame callback threw: {:?}", e);
                self.callback_failed = true;
            }
        }
    }
}

fn set(obj: &Object, key: &str, value: &JsValue) {
    _ = Reflect::set(obj, &JsValue::from_str(key), value);
}

fn vec3(v: Vec3) -> JsValue {
    Float32Array::from(&v.to_array()[..]).into()
}

fn light_object(light: &DirectionalLight) -> JsValue {
    let obj = Object::new();
    set(&obj, "position", &vec3(light.position));
    set(&obj, "intensity", &light.intensity.into());
    set(&obj, "color", &vec3(light.color));
    obj.into()
}

fn camera_object(cam: &CameraState, aspect: f32) -> JsValue {
    let obj = Object::new();
    set(&obj, "position", &vec3(cam.position));
    set(&obj, "target", &vec3(cam.target));
    set(&obj, "ambient", &cam.ambient_intensity.into());
    if let Some(light) = &cam.directional_light {
        set(&obj, "light", &light_object(light));
    }
    let uniform = cam.to_camera(aspect).uniform();
    let view_proj: &[f32] = bytemuck::cast_slice(uniform.view_proj.as_slice());
    set(&obj, "viewProj", &Float32Array::from(view_proj).into());
    obj.into()
}

fn effect_object(ev: &EffectEvent) -> JsValue {
    let obj = Object::new();
    set(&obj, "stop", &(ev.stop_index as u32).into());
    match &ev.params {
        EffectParams::Particles(b) => {
            set(&obj, "kind", &"particles".into());
            set(&obj, "origin", &vec3(b.origin));
            set(&obj, "count", &b.count.into());
            set(&obj, "speed", &b.speed.into());
            set(&obj, "spread", &b.spread.into());
            set(&obj, "color", &vec3(b.color));
            set(&obj, "life", &b.life_sec.into());
            set(&obj, "seed", &(b.seed as f64).into());
        }
        EffectParams::Flash(f) => {
            set(&obj, "kind", &"flash".into());
            set(&obj, "position", &vec3(f.position));
            set(&obj, "color", &vec3(f.color));
            set(&obj, "intensity", &f.intensity.into());
        }
    }
    obj.into()
}

fn flash_object(flash: &FlashState) -> JsValue {
    let obj = Object::new();
    set(&obj, "position", &vec3(flash.position));
    set(&obj, "color", &vec3(flash.color));
    set(&obj, "intensity", &flash.intensity.into());
    obj.into()
}

fn frame_object(frame: &FrameOutput, aspect: f32) -> JsValue {
    let obj = Object::new();
    set(&obj, "frame", &(frame.frame as f64).into());
    set(&obj, "progress", &frame.progress.into());
    if let Some(ch) = frame.chapter {
        set(&obj, "chapter", &(ch.chapter_index as u32).into());
        set(&obj, "chapterProgress", &ch.chapter_progress.into());
    }
    if let Some(cam) = &frame.camera {
        set(&obj, "camera", &camera_object(cam, aspect));
    }
    let effects: Array = frame.effects.iter().map(effect_object).collect();
    set(&obj, "effects", &effects.into());
    if let Some(flash) = &frame.flash {
        set(&obj, "flash", &flash_object(flash));
    }
    obj.into()
}
