use crate::error::{Error, Result};
use crate::host::RepulsionOptions;
use netvis_layout::OverlapOptions;
use serde_json::{Map, Value, json};
use std::time::Duration;

/// View configuration as a JSON object addressed by dotted paths (`"overlap.minDistance"`).
///
/// [`ViewConfig::default`] carries the values the searchbox page hard-codes; user configs are
/// deep-merged over them, and the typed getters validate on the way out.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig(Value);

impl Default for ViewConfig {
    fn default() -> Self {
        Self(json!({
            "overlap": {
                "minDistance": 200.0,
                "maxDistance": 1000.0,
                "timeoutMs": 5000,
                "tolerance": 0.0
            },
            "radial": {
                "radius": 100.0
            },
            "physics": {
                "repulsion": {
                    "nodeDistance": 500.0,
                    "centralGravity": 0.1
                }
            },
            "slider": {
                "minEdgeValue": 10.0
            }
        }))
    }
}

impl ViewConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Defaults with `text` (a JSON object) merged on top.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| Error::invalid_config("<root>", e.to_string()))?;
        if !value.is_object() {
            return Err(Error::invalid_config("<root>", "expected a JSON object"));
        }
        let mut cfg = Self::default();
        cfg.deep_merge(&value);
        Ok(cfg)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.get(dotted_path)?.as_bool()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.get(dotted_path)?.as_f64()
    }

    /// Writes `value` at `dotted_path`. Missing or non-object parents along the path (the root
    /// included) are replaced by empty objects.
    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        let (parents, leaf) = match dotted_path.rsplit_once('.') {
            Some((parents, leaf)) => (Some(parents), leaf),
            None => (None, dotted_path),
        };

        let Some(mut cur) = object_slot(&mut self.0) else {
            return;
        };
        for seg in parents.into_iter().flat_map(|p| p.split('.')) {
            let Some(next) = object_slot(cur.entry(seg).or_insert(Value::Null)) else {
                return;
            };
            cur = next;
        }
        cur.insert(leaf.to_string(), value);
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }

    pub fn overlap_options(&self) -> Result<OverlapOptions> {
        let timeout_ms = self.require_u64("overlap.timeoutMs")?;
        let max_passes = match self.get("overlap.maxPasses") {
            None | Some(Value::Null) => None,
            Some(v) => Some(v.as_u64().ok_or_else(|| {
                Error::invalid_config("overlap.maxPasses", "expected a non-negative integer")
            })? as usize),
        };
        let tolerance = match self.get("overlap.tolerance") {
            None | Some(Value::Null) => 0.0,
            Some(_) => self.require_f64("overlap.tolerance")?,
        };
        let opts = OverlapOptions {
            min_distance: self.require_f64("overlap.minDistance")?,
            max_distance: self.require_f64("overlap.maxDistance")?,
            timeout: Duration::from_millis(timeout_ms),
            tolerance,
            max_passes,
        };
        opts.validate()?;
        Ok(opts)
    }

    pub fn radial_radius(&self) -> Result<f64> {
        let radius = self.require_f64("radial.radius")?;
        if !(radius.is_finite() && radius > 0.0) {
            return Err(Error::invalid_config("radial.radius", "expected a positive number"));
        }
        Ok(radius)
    }

    pub fn repulsion(&self) -> Result<RepulsionOptions> {
        let raw = self
            .get("physics.repulsion")
            .cloned()
            .ok_or_else(|| Error::invalid_config("physics.repulsion", "missing"))?;
        serde_json::from_value(raw)
            .map_err(|e| Error::invalid_config("physics.repulsion", e.to_string()))
    }

    pub fn min_edge_value(&self) -> Result<f64> {
        self.require_f64("slider.minEdgeValue")
    }

    fn require_f64(&self, dotted_path: &str) -> Result<f64> {
        self.get_f64(dotted_path)
            .ok_or_else(|| Error::invalid_config(dotted_path, "expected a number"))
    }

    fn require_u64(&self, dotted_path: &str) -> Result<u64> {
        self.get(dotted_path)
            .and_then(Value::as_u64)
            .ok_or_else(|| Error::invalid_config(dotted_path, "expected a non-negative integer"))
    }
}

/// Turns `slot` into an object unless it already is one.
fn object_slot(slot: &mut Value) -> Option<&mut Map<String, Value>> {
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    slot.as_object_mut()
}

/// Objects merge key by key; anything else in `overlay` replaces what `base` holds.
fn deep_merge_value(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(fields), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match fields.get_mut(key) {
                    Some(existing) => deep_merge_value(existing, value),
                    None => {
                        fields.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (slot, value) => *slot = value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::ViewConfig;
    use crate::error::Error;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn defaults_match_the_page_constants() {
        let cfg = ViewConfig::default();
        let overlap = cfg.overlap_options().unwrap();
        assert_eq!(overlap.min_distance, 200.0);
        assert_eq!(overlap.max_distance, 1000.0);
        assert_eq!(overlap.timeout, Duration::from_millis(5000));
        assert_eq!(overlap.max_passes, None);
        assert_eq!(cfg.radial_radius().unwrap(), 100.0);
        let rep = cfg.repulsion().unwrap();
        assert_eq!((rep.node_distance, rep.central_gravity), (500.0, 0.1));
        assert_eq!(cfg.min_edge_value().unwrap(), 10.0);
    }

    #[test]
    fn user_json_merges_over_defaults() {
        let cfg =
            ViewConfig::from_json_str(r#"{"overlap": {"minDistance": 50, "maxPasses": 3}}"#)
                .unwrap();
        let overlap = cfg.overlap_options().unwrap();
        assert_eq!(overlap.min_distance, 50.0);
        assert_eq!(overlap.max_distance, 1000.0);
        assert_eq!(overlap.max_passes, Some(3));
    }

    #[test]
    fn set_value_creates_intermediate_objects() {
        let mut cfg = ViewConfig::empty_object();
        cfg.set_value("a.b.c", json!(true));
        assert_eq!(cfg.get_bool("a.b.c"), Some(true));

        cfg.set_value("a.b", json!("flat"));
        assert_eq!(cfg.get_str("a.b"), Some("flat"));

        let mut odd = ViewConfig::from_value(json!(42));
        odd.set_value("x", json!(1));
        assert_eq!(odd.get_f64("x"), Some(1.0));
    }

    #[test]
    fn wrong_types_name_the_offending_path() {
        let mut cfg = ViewConfig::default();
        cfg.set_value("radial.radius", json!("wide"));
        match cfg.radial_radius() {
            Err(Error::InvalidConfig { path, .. }) => assert_eq!(path, "radial.radius"),
            other => panic!("unexpected: {other:?}"),
        }

        let mut cfg = ViewConfig::default();
        cfg.set_value("overlap.maxDistance", json!(10));
        assert!(matches!(cfg.overlap_options(), Err(Error::Layout(_))));
    }

    #[test]
    fn tolerance_defaults_when_absent_and_rejects_wrong_types() {
        let mut cfg = ViewConfig::default();
        cfg.set_value("overlap.tolerance", json!(null));
        assert_eq!(cfg.overlap_options().unwrap().tolerance, 0.0);

        cfg.set_value("overlap.tolerance", json!(0.5));
        assert_eq!(cfg.overlap_options().unwrap().tolerance, 0.5);

        cfg.set_value("overlap.tolerance", json!("loose"));
        match cfg.overlap_options() {
            Err(Error::InvalidConfig { path, .. }) => assert_eq!(path, "overlap.tolerance"),
            other => panic!("unexpected: {other:?}"),
        }

        let mut bare = ViewConfig::empty_object();
        bare.set_value("overlap.minDistance", json!(10));
        bare.set_value("overlap.maxDistance", json!(20));
        bare.set_value("overlap.timeoutMs", json!(5));
        assert_eq!(bare.overlap_options().unwrap().tolerance, 0.0);
    }

    #[test]
    fn deep_merge_replaces_scalars_and_merges_objects() {
        let mut cfg = ViewConfig::default();
        cfg.deep_merge(&json!({"radial": {"radius": 40}, "overlap": 3}));
        assert_eq!(cfg.get_f64("radial.radius"), Some(40.0));
        assert_eq!(cfg.get_f64("overlap"), Some(3.0));
        assert_eq!(cfg.get_f64("slider.minEdgeValue"), Some(10.0));

        cfg.set_value("overlap.minDistance", json!(1));
        assert_eq!(cfg.get_f64("overlap.minDistance"), Some(1.0));
    }

    #[test]
    fn non_object_documents_are_rejected() {
        assert!(ViewConfig::from_json_str("[1, 2]").is_err());
        assert!(ViewConfig::from_json_str("{not json").is_err());
    }
}
