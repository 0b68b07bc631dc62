use crate::gallery::{instance_floats, Gallery};
use bubble_core::Config;
use gift_proto::resolve_image_url;
use wasm_bindgen::prelude::*;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn fresh_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(_) => (js_sys::Math::random() * u64::MAX as f64) as u64,
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Gallery owned by the page; JS drives it from `requestAnimationFrame`
/// and from its gift-list polling timer.
#[wasm_bindgen]
pub struct GalleryHandle {
    gallery: Gallery,
}

#[wasm_bindgen]
impl GalleryHandle {
    /// `config_json` may override any tuning field, e.g. `{"speed_max": 1.2}`
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: f32,
        height: f32,
        config_json: Option<String>,
    ) -> Result<GalleryHandle, JsValue> {
        let config = match config_json {
            Some(json) => serde_json::from_str::<Config>(&json).map_err(to_js)?,
            None => Config::default(),
        };
        let gallery = Gallery::new(width, height, fresh_seed(), config).map_err(to_js)?;
        Ok(Self { gallery })
    }

    /// Ingest a `GET /api/gifts` body; returns how many bubbles were added
    pub fn ingest(&mut self, json: &str, now_ms: f64) -> Result<u32, JsValue> {
        let report = self.gallery.ingest_json(json, now_ms).map_err(to_js)?;
        Ok(report.spawned.len() as u32)
    }

    pub fn frame(&mut self, now_ms: f64) {
        self.gallery.frame(now_ms);
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        self.gallery.resize(width, height).map_err(to_js)
    }

    /// `[x, y, size, flags]` per bubble
    pub fn instances(&self) -> js_sys::Float32Array {
        let instances = self.gallery.instances();
        js_sys::Float32Array::from(instance_floats(&instances))
    }

    pub fn ids(&self) -> js_sys::Array {
        self.gallery
            .ids()
            .iter()
            .map(|id| JsValue::from_str(id))
            .collect()
    }

    /// Postcard-encoded frame, for renderers running in a worker
    pub fn frame_bytes(&self) -> Result<Vec<u8>, JsValue> {
        self.gallery.snapshot_frame().to_bytes().map_err(to_js)
    }

    pub fn len(&self) -> usize {
        self.gallery.simulator().len()
    }

    pub fn is_empty(&self) -> bool {
        self.gallery.simulator().is_empty()
    }
}

#[wasm_bindgen]
pub fn image_url(path: Option<String>, hostname: &str) -> Option<String> {
    resolve_image_url(path.as_deref(), hostname)
}

#[wasm_bindgen]
pub fn refresh_interval_ms() -> f64 {
    bubble_core::Params::REFRESH_INTERVAL_MS
}
