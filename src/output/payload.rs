use crate::ast::{ShapeKind, Value};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// Named values in the order the program supplied them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NamedValues(Vec<(String, Value)>);

impl NamedValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name`, replacing an earlier entry of the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|(key, _)| key == name).map(|(_, value)| value)
    }

    /// The entry as a number, if present and numeric.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name)
            .map(Value::to_number)
            .filter(|n| n.is_finite())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for NamedValues {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut values = NamedValues::new();
        for (name, value) in iter {
            values.insert(name, value);
        }
        values
    }
}

impl Serialize for NamedValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Evaluated arguments of one `drawShape` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapePayload {
    pub shape: String,
    #[serde(flatten)]
    pub params: NamedValues,
    pub label: String,
    pub calculation: NamedValues,
}

/// The drawing a run left behind. Exactly one is current at a time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Visualization {
    #[serde(rename = "2d-shape")]
    Shape2D(ShapePayload),
    #[serde(rename = "3d-shape")]
    Shape3D(ShapePayload),
    #[serde(rename = "graph")]
    Graph(ShapePayload),
    #[serde(rename = "chart")]
    Chart { chart_type: String, data: Vec<f64> },
    #[serde(rename = "function")]
    Function { expression: String },
}

impl Visualization {
    pub fn shape(kind: ShapeKind, payload: ShapePayload) -> Self {
        match kind {
            ShapeKind::TwoD => Visualization::Shape2D(payload),
            ShapeKind::ThreeD => Visualization::Shape3D(payload),
            ShapeKind::Graph => Visualization::Graph(payload),
        }
    }

    /// The payload kind tag, e.g. `2d-shape` or `chart`.
    pub fn tag(&self) -> &'static str {
        match self {
            Visualization::Shape2D(_) => ShapeKind::TwoD.tag(),
            Visualization::Shape3D(_) => ShapeKind::ThreeD.tag(),
            Visualization::Graph(_) => ShapeKind::Graph.tag(),
            Visualization::Chart { .. } => "chart",
            Visualization::Function { .. } => "function",
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
