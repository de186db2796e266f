//! Per-tab stroke persistence on top of a blob store.

use crate::canvas::TabId;
use crate::storage::{BlobStore, StorageError, StorageResult};
use crate::stroke::Stroke;

/// Prefix of the storage key for a tab's strokes.
pub const KEY_PREFIX: &str = "drawing:";

/// Storage key for a tab, e.g. `drawing:1`.
pub fn drawing_key(tab: TabId) -> String {
    format!("{}{}", KEY_PREFIX, tab)
}

/// Saves and loads whole stroke lists, one blob per tab.
#[derive(Debug, Clone, Default)]
pub struct DrawingStore<S> {
    store: S,
}

impl<S: BlobStore> DrawingStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a reference to the storage backend.
    pub fn backend(&self) -> &S {
        &self.store
    }

    pub fn into_backend(self) -> S {
        self.store
    }

    /// Write a full snapshot of a tab's strokes.
    pub fn save(&mut self, tab: TabId, strokes: &[Stroke]) -> StorageResult<()> {
        let json = encode(strokes)?;
        self.store.set(&drawing_key(tab), &json)?;
        log::debug!("Saved {} strokes for tab {}", strokes.len(), tab);
        Ok(())
    }

    /// Read a tab's strokes.
    ///
    /// Absent, unreadable or malformed data all yield an empty list.
    pub fn load(&self, tab: TabId) -> Vec<Stroke> {
        let key = drawing_key(tab);
        let json = match self.store.get(&key) {
            Ok(Some(json)) => json,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("Failed to read {}: {}", key, e);
                return Vec::new();
            }
        };

        match decode(&json) {
            Ok(strokes) => {
                log::debug!("Loaded {} strokes for tab {}", strokes.len(), tab);
                strokes
            }
            Err(e) => {
                log::warn!("Discarding corrupt data in {}: {}", key, e);
                Vec::new()
            }
        }
    }
}

/// Serialize strokes to the stored JSON form.
pub fn encode(strokes: &[Stroke]) -> StorageResult<String> {
    serde_json::to_string(strokes).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Parse the stored JSON form. A stroke with no points or an unusable width
/// makes the whole blob invalid.
pub fn decode(json: &str) -> StorageResult<Vec<Stroke>> {
    let strokes: Vec<Stroke> =
        serde_json::from_str(json).map_err(|e| StorageError::Serialization(e.to_string()))?;
    if let Some(index) = strokes.iter().position(|s| !s.is_valid()) {
        return Err(StorageError::Serialization(format!(
            "stroke {} has no points or an invalid width",
            index
        )));
    }
    Ok(strokes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use kurbo::Point;

    fn tab(id: u32) -> TabId {
        TabId::new(id).unwrap()
    }

    fn sample() -> Vec<Stroke> {
        vec![
            Stroke::from_points(
                vec![Point::new(10.0, 10.0), Point::new(20.0, 20.0)],
                "red",
                5.0,
            ),
            Stroke::new(Point::new(3.5, 4.25), "#00ff00", 2.0),
        ]
    }

    #[test]
    fn test_key_format() {
        assert_eq!(drawing_key(tab(1)), "drawing:1");
        assert_eq!(drawing_key(tab(12)), "drawing:12");
    }

    #[test]
    fn test_save_and_load() {
        let mut store = DrawingStore::new(MemoryStore::new());
        store.save(tab(2), &sample()).unwrap();
        assert_eq!(store.load(tab(2)), sample());
        assert!(store.load(tab(1)).is_empty());
    }

    #[test]
    fn test_stored_format() {
        let mut store = DrawingStore::new(MemoryStore::new());
        store
            .save(tab(1), &[Stroke::new(Point::new(1.0, 2.0), "black", 5.0)])
            .unwrap();
        let raw = store.backend().get("drawing:1").unwrap().unwrap();
        assert_eq!(
            raw,
            r#"[{"points":[{"x":1.0,"y":2.0}],"color":"black","width":5.0}]"#
        );
    }

    #[test]
    fn test_corrupt_data_is_empty() {
        let mut backend = MemoryStore::new();
        backend.set("drawing:1", "{not json").unwrap();
        backend.set("drawing:2", r#"[{"points":[],"color":"red","width":5}]"#).unwrap();
        backend.set("drawing:3", r#"{"points":[]}"#).unwrap();
        let store = DrawingStore::new(backend);

        assert!(store.load(tab(1)).is_empty());
        assert!(store.load(tab(2)).is_empty());
        assert!(store.load(tab(3)).is_empty());
    }

    #[test]
    fn test_integer_coordinates_accepted() {
        let strokes = decode(r#"[{"points":[{"x":1,"y":2}],"color":"blue","width":10}]"#).unwrap();
        assert_eq!(strokes[0].points[0], Point::new(1.0, 2.0));
        assert_eq!(strokes[0].width, 10.0);
    }

    #[test]
    fn test_save_overwrites() {
        let mut store = DrawingStore::new(MemoryStore::new());
        store.save(tab(1), &sample()).unwrap();
        store.save(tab(1), &[]).unwrap();
        assert!(store.load(tab(1)).is_empty());
        assert_eq!(store.backend().get("drawing:1").unwrap().as_deref(), Some("[]"));
    }
}
