//! Leaflet (`window.L`) behind the map lifecycle trait.

use std::fmt;

use chartkit::map::{MapBackend, MapView};
use chartkit::svg::tone_color;
use chartkit::GeoPoint;
use js_sys::{Array, Function, Reflect};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};

const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";
const MARKER_RADIUS: u8 = 8;
const MARKER_FILL_OPACITY: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafletError(String);

impl fmt::Display for LeafletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "leaflet: {}", self.0)
    }
}

impl From<JsValue> for LeafletError {
    fn from(value: JsValue) -> Self {
        Self(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileOptions<'a> {
    attribution: &'a str,
    max_zoom: u8,
}

/// Options for `L.circleMarker`, tinted with the place's color.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct MarkerOptions<'a> {
    color: &'a str,
    fill_color: &'a str,
    fill_opacity: f64,
    radius: u8,
}

impl<'a> MarkerOptions<'a> {
    fn for_place(place: &'a GeoPoint) -> Self {
        let color = tone_color(&place.color);
        Self {
            color,
            fill_color: color,
            fill_opacity: MARKER_FILL_OPACITY,
            radius: MARKER_RADIUS,
        }
    }
}

fn popup_text(place: &GeoPoint) -> &str {
    if place.popup.is_empty() {
        &place.name
    } else {
        &place.popup
    }
}

/// Runs `setup` on a freshly created map, releasing the map if any step
/// fails so the container can be initialized again.
fn finish_or_release<M, E>(
    map: M,
    setup: impl FnOnce(&M) -> Result<(), E>,
    release: impl FnOnce(M),
) -> Result<M, E> {
    match setup(&map) {
        Ok(()) => Ok(map),
        Err(error) => {
            release(map);
            Err(error)
        }
    }
}

/// Calls `target[name](...args)`.
fn call(target: &JsValue, name: &str, args: &[JsValue]) -> Result<JsValue, LeafletError> {
    let method = Reflect::get(target, &name.into())?
        .dyn_into::<Function>()
        .map_err(|_| LeafletError(format!("{name} is not a function")))?;
    let args: Array = args.iter().collect();
    Ok(Reflect::apply(&method, target, &args)?)
}

fn lat_lng(latitude: f64, longitude: f64) -> JsValue {
    let pair: Array = [JsValue::from_f64(latitude), JsValue::from_f64(longitude)]
        .iter()
        .collect();
    pair.into()
}

fn to_js(value: &impl Serialize) -> Result<JsValue, LeafletError> {
    serde_wasm_bindgen::to_value(value).map_err(|error| LeafletError(error.to_string()))
}

/// Handle to the global Leaflet namespace.
pub struct LeafletBackend {
    leaflet: JsValue,
}

impl LeafletBackend {
    /// `None` when the page did not load Leaflet.
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        let leaflet = Reflect::get(&window, &"L".into()).ok()?;
        if leaflet.is_undefined() || leaflet.is_null() {
            return None;
        }
        Some(Self { leaflet })
    }
}

impl MapBackend for LeafletBackend {
    type Map = JsValue;
    type Marker = JsValue;
    type Error = LeafletError;

    fn create_map(&mut self, container: &str, view: MapView) -> Result<JsValue, LeafletError> {
        let map = call(&self.leaflet, "map", &[container.into()])?;
        let leaflet = &self.leaflet;
        finish_or_release(
            map,
            |map| {
                call(
                    map,
                    "setView",
                    &[
                        lat_lng(view.latitude, view.longitude),
                        JsValue::from(view.zoom),
                    ],
                )?;
                let tiles = call(
                    leaflet,
                    "tileLayer",
                    &[
                        TILE_URL.into(),
                        to_js(&TileOptions {
                            attribution: TILE_ATTRIBUTION,
                            max_zoom: 18,
                        })?,
                    ],
                )?;
                call(&tiles, "addTo", &[map.clone()])?;
                Ok(())
            },
            |map| {
                if let Err(error) = call(&map, "remove", &[]) {
                    web_sys::console::warn_1(&error.to_string().into());
                }
            },
        )
    }

    fn add_marker(&mut self, map: &JsValue, place: &GeoPoint) -> Result<JsValue, LeafletError> {
        let options = to_js(&MarkerOptions::for_place(place))?;
        let marker = call(
            &self.leaflet,
            "circleMarker",
            &[lat_lng(place.latitude, place.longitude), options],
        )?;
        call(&marker, "addTo", &[map.clone()])?;
        call(&marker, "bindTooltip", &[JsValue::from_str(&place.name)])?;
        call(&marker, "bindPopup", &[JsValue::from_str(popup_text(place))])?;
        Ok(marker)
    }

    fn remove_marker(&mut self, _map: &JsValue, marker: JsValue) {
        if let Err(error) = call(&marker, "remove", &[]) {
            web_sys::console::warn_1(&error.to_string().into());
        }
    }

    fn destroy_map(&mut self, map: JsValue) {
        if let Err(error) = call(&map, "remove", &[]) {
            web_sys::console::warn_1(&error.to_string().into());
        }
    }
}
