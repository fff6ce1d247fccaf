use serde::Deserialize;
use std::fmt;

const CATALOG_JSON: &str = include_str!("../../assets/node_catalog.json");

/// Per-category animation overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    /// Constant rotation increment every tick
    Spin,
    /// Shell opacity oscillates
    Shimmer,
    /// Node is hidden for half of each blink cycle
    Blink,
    None,
}

/// A kind of node: its label, color and animation speeds
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeCategory {
    pub label: String,
    /// Hue in degrees, [0, 360)
    pub base_hue: f32,
    pub float_speed: f32,
    pub pulse_speed: f32,
    pub behavior: Behavior,
}

#[derive(Debug)]
pub enum CatalogError {
    Parse(serde_json::Error),
    Empty,
    InvalidHue { label: String, hue: f32 },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Parse(e) => write!(f, "Failed to parse node catalog: {}", e),
            CatalogError::Empty => write!(f, "Node catalog has no categories"),
            CatalogError::InvalidHue { label, hue } => {
                write!(f, "Category {} has hue {} outside [0, 360)", label, hue)
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Parse(e)
    }
}

/// Read-only, non-empty list of node categories
#[derive(Debug, Clone)]
pub struct NodeCatalog {
    categories: Vec<NodeCategory>,
}

#[derive(Deserialize)]
struct CatalogJson {
    categories: Vec<NodeCategory>,
}

impl NodeCatalog {
    pub fn new(categories: Vec<NodeCategory>) -> Result<Self, CatalogError> {
        if categories.is_empty() {
            return Err(CatalogError::Empty);
        }

        if let Some(bad) = categories
            .iter()
            .find(|c| !(c.base_hue.is_finite() && (0.0..360.0).contains(&c.base_hue)))
        {
            return Err(CatalogError::InvalidHue {
                label: bad.label.clone(),
                hue: bad.base_hue,
            });
        }

        Ok(NodeCatalog { categories })
    }

    /// Parse the catalog shipped with the binary
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_json(CATALOG_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: CatalogJson = serde_json::from_str(json)?;
        Self::new(raw.categories)
    }

    /// Hardcoded copy of the shipped catalog, used if the asset fails to parse
    pub fn builtin() -> Self {
        NodeCatalog {
            categories: vec![
                NodeCategory {
                    label: "AI".to_string(),
                    base_hue: 300.0,
                    float_speed: 0.01,
                    pulse_speed: 2.5,
                    behavior: Behavior::Spin,
                },
                NodeCategory {
                    label: "Human".to_string(),
                    base_hue: 180.0,
                    float_speed: 0.008,
                    pulse_speed: 3.2,
                    behavior: Behavior::Shimmer,
                },
                NodeCategory {
                    label: "Sensor".to_string(),
                    base_hue: 60.0,
                    float_speed: 0.006,
                    pulse_speed: 4.1,
                    behavior: Behavior::Blink,
                },
            ],
        }
    }

    /// Round-robin assignment: node `index` gets `categories[index % len]`
    pub fn category_for(&self, index: usize) -> &NodeCategory {
        &self.categories[index % self.categories.len()]
    }
}

#[cfg(test)]
impl NodeCatalog {
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeCategory> {
        self.categories.iter()
    }
}
