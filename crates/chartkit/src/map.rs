//! Scoped ownership of an external interactive map and its markers.
//!
//! The handle acquires the map when mounted and always releases markers and
//! map together, whether it is re-initialised, unmounted or dropped.

use tracing::debug;

use crate::domain::GeoPoint;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
}

impl MapView {
    /// Centers on the mean position of `places`, or on the given fallback
    /// when there are none.
    pub fn centered_on(places: &[GeoPoint], zoom: u8, fallback: Self) -> Self {
        if places.is_empty() {
            return fallback;
        }
        let count = places.len() as f64;
        let (latitude, longitude) = places.iter().fold((0.0, 0.0), |(lat, lng), place| {
            (lat + place.latitude, lng + place.longitude)
        });
        Self {
            latitude: latitude / count,
            longitude: longitude / count,
            zoom,
        }
    }
}

/// Imperative map library driven by a [`MapHandle`].
pub trait MapBackend {
    type Map;
    type Marker;
    type Error: std::fmt::Display;

    fn create_map(&mut self, container: &str, view: MapView) -> Result<Self::Map, Self::Error>;

    fn add_marker(&mut self, map: &Self::Map, place: &GeoPoint)
        -> Result<Self::Marker, Self::Error>;

    fn remove_marker(&mut self, map: &Self::Map, marker: Self::Marker);

    fn destroy_map(&mut self, map: Self::Map);
}

pub struct MapHandle<B: MapBackend> {
    backend: B,
    container: String,
    map: Option<B::Map>,
    markers: Vec<B::Marker>,
}

impl<B: MapBackend> MapHandle<B> {
    pub fn mount(mut backend: B, container: impl Into<String>, view: MapView) -> Result<Self, B::Error> {
        let container = container.into();
        let map = backend.create_map(&container, view)?;
        debug!(%container, "map mounted");
        Ok(Self {
            backend,
            container,
            map: Some(map),
            markers: Vec::new(),
        })
    }

    pub fn is_mounted(&self) -> bool {
        self.map.is_some()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Replaces every marker with one per place. Markers added before a
    /// failure stay owned by the handle and are released with it.
    pub fn sync(&mut self, places: &[GeoPoint]) -> Result<(), B::Error> {
        self.clear_markers();
        let Some(map) = self.map.as_ref() else {
            return Ok(());
        };
        for place in places {
            let marker = self.backend.add_marker(map, place)?;
            self.markers.push(marker);
        }
        debug!(markers = self.markers.len(), "map markers synced");
        Ok(())
    }

    /// Tears the map down and builds a fresh one in the same container.
    pub fn reinit(&mut self, view: MapView) -> Result<(), B::Error> {
        self.release();
        let map = self.backend.create_map(&self.container, view)?;
        self.map = Some(map);
        Ok(())
    }

    pub fn unmount(&mut self) {
        self.release();
    }

    fn clear_markers(&mut self) {
        if let Some(map) = self.map.as_ref() {
            for marker in self.markers.drain(..) {
                self.backend.remove_marker(map, marker);
            }
        }
    }

    fn release(&mut self) {
        self.clear_markers();
        if let Some(map) = self.map.take() {
            self.backend.destroy_map(map);
            debug!(container = %self.container, "map released");
        }
    }
}

impl<B: MapBackend> Drop for MapHandle<B> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        log: Rc<RefCell<Vec<String>>>,
        next_id: u32,
        fail_on: Option<String>,
    }

    impl MapBackend for Recorder {
        type Map = u32;
        type Marker = String;
        type Error = String;

        fn create_map(&mut self, container: &str, _view: MapView) -> Result<u32, String> {
            self.next_id += 1;
            self.log
                .borrow_mut()
                .push(format!("create {container} #{}", self.next_id));
            Ok(self.next_id)
        }

        fn add_marker(&mut self, map: &u32, place: &GeoPoint) -> Result<String, String> {
            if self.fail_on.as_deref() == Some(place.name.as_str()) {
                return Err(format!("cannot place {}", place.name));
            }
            self.log.borrow_mut().push(format!("add {} on #{map}", place.name));
            Ok(place.name.clone())
        }

        fn remove_marker(&mut self, map: &u32, marker: String) {
            self.log.borrow_mut().push(format!("remove {marker} on #{map}"));
        }

        fn destroy_map(&mut self, map: u32) {
            self.log.borrow_mut().push(format!("destroy #{map}"));
        }
    }

    fn place(name: &str, latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint {
            name: name.to_string(),
            latitude,
            longitude,
            color: "amber".to_string(),
            popup: String::new(),
        }
    }

    const VIEW: MapView = MapView {
        latitude: 0.0,
        longitude: 0.0,
        zoom: 3,
    };

    #[test]
    fn drop_releases_markers_then_map() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let backend = Recorder {
                log: log.clone(),
                ..Recorder::default()
            };
            let mut handle = MapHandle::mount(backend, "map", VIEW).unwrap();
            handle.sync(&[place("Kyoto", 35.0, 135.7)]).unwrap();
            assert_eq!(handle.marker_count(), 1);
        }
        assert_eq!(
            *log.borrow(),
            vec![
                "create map #1",
                "add Kyoto on #1",
                "remove Kyoto on #1",
                "destroy #1"
            ]
        );
    }

    #[test]
    fn sync_replaces_previous_markers() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let backend = Recorder {
            log: log.clone(),
            ..Recorder::default()
        };
        let mut handle = MapHandle::mount(backend, "map", VIEW).unwrap();
        handle.sync(&[place("Lima", -12.0, -77.0), place("Cusco", -13.5, -72.0)]).unwrap();
        handle.sync(&[place("Puno", -15.8, -70.0)]).unwrap();
        assert_eq!(handle.marker_count(), 1);
        let removed = log
            .borrow()
            .iter()
            .filter(|line| line.starts_with("remove"))
            .count();
        assert_eq!(removed, 2);
    }

    #[test]
    fn reinit_destroys_before_recreating() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let backend = Recorder {
            log: log.clone(),
            ..Recorder::default()
        };
        let mut handle = MapHandle::mount(backend, "map", VIEW).unwrap();
        handle.sync(&[place("Oslo", 59.9, 10.7)]).unwrap();
        handle.reinit(VIEW).unwrap();
        assert!(handle.is_mounted());
        assert_eq!(handle.marker_count(), 0);
        assert_eq!(
            log.borrow()[2..],
            ["remove Oslo on #1", "destroy #1", "create map #2"]
        );
    }

    #[test]
    fn failed_sync_keeps_partial_markers_owned() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let backend = Recorder {
            log: log.clone(),
            fail_on: Some("Atlantis".to_string()),
            ..Recorder::default()
        };
        let mut handle = MapHandle::mount(backend, "map", VIEW).unwrap();
        let result = handle.sync(&[place("Athens", 38.0, 23.7), place("Atlantis", 0.0, 0.0)]);
        assert!(result.is_err());
        assert_eq!(handle.marker_count(), 1);
        handle.unmount();
        handle.unmount();
        assert!(!handle.is_mounted());
        assert_eq!(log.borrow().last().map(String::as_str), Some("destroy #1"));
    }

    #[test]
    fn view_centers_on_places() {
        let view = MapView::centered_on(&[place("a", 10.0, 20.0), place("b", 30.0, 40.0)], 5, VIEW);
        assert_eq!((view.latitude, view.longitude, view.zoom), (20.0, 30.0, 5));
        assert_eq!(MapView::centered_on(&[], 5, VIEW), VIEW);
    }
}
