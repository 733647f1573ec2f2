//! Label schema: the categories (with display colors) and attributes offered to the user.

use crate::error::{EditorError, Result};
use crate::state::{Attribute, AttributeTool};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Colors handed out to categories that do not define one.
const PALETTE: [&str; 6] = ["#ff0000", "#00ff00", "#0000ff", "#ffff00", "#ff00ff", "#00ffff"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelSchema {
    pub categories: Vec<CategoryDefinition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
}

impl Default for LabelSchema {
    fn default() -> Self {
        let names = ["car", "person", "bicycle", "traffic sign"];
        Self {
            categories: names
                .iter()
                .enumerate()
                .map(|(i, name)| CategoryDefinition {
                    name: name.to_string(),
                    color: Some(PALETTE[i % PALETTE.len()].to_string()),
                    shortcut: Some((i + 1).to_string()),
                })
                .collect(),
            attributes: vec![
                Attribute {
                    name: "Occluded".into(),
                    tool: AttributeTool::Switch,
                    values: Vec::new(),
                },
                Attribute {
                    name: "Truncated".into(),
                    tool: AttributeTool::Switch,
                    values: Vec::new(),
                },
            ],
        }
    }
}

impl LabelSchema {
    pub fn category_names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    /// Display color for a category name. Unknown names fall back to the palette by index.
    pub fn category_color(&self, name: &str, index: usize) -> String {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .and_then(|c| c.color.clone())
            .unwrap_or_else(|| PALETTE[index % PALETTE.len()].to_string())
    }

    /// Category index bound to a keyboard shortcut, relative to `categories`.
    pub fn category_for_shortcut(&self, key: &str, categories: &[String]) -> Option<usize> {
        let name = &self
            .categories
            .iter()
            .find(|c| c.shortcut.as_deref() == Some(key))?
            .name;
        categories.iter().position(|c| c == name)
    }
}

/// Load the label schema. Search order:
///   1) explicit path (if provided)
///   2) ./categories.yaml
///   3) ~/.config/label_editor/categories.yaml
///   4) the bundled default
pub fn load_schema(path: Option<&str>) -> LabelSchema {
    let mut search_paths: Vec<String> = Vec::new();
    if let Some(p) = path {
        search_paths.push(p.to_string());
    }
    search_paths.push("./categories.yaml".to_string());
    search_paths.push("~/.config/label_editor/categories.yaml".to_string());

    for candidate in search_paths {
        let expanded = shellexpand::tilde(&candidate);
        let path_obj = Path::new(expanded.as_ref());
        if !path_obj.exists() {
            continue;
        }

        match try_load_schema_file(path_obj) {
            Ok(schema) => {
                debug!(path = %path_obj.display(), "loaded label schema");
                return schema;
            }
            Err(e) => warn!(path = %path_obj.display(), error = %e, "failed to parse label schema"),
        }
    }

    if let Ok(schema) = parse_schema_content(include_str!("../categories.yaml")) {
        return schema;
    }

    warn!("no label schema found; using defaults");
    LabelSchema::default()
}

fn try_load_schema_file(path: &Path) -> Result<LabelSchema> {
    let content = std::fs::read_to_string(path).map_err(|source| EditorError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_schema_content(&content)
}

/// Parse schema YAML, accepting either a bare list of category names or a full schema.
pub fn parse_schema_content(content: &str) -> Result<LabelSchema> {
    if let Ok(names) = serde_yaml::from_str::<Vec<String>>(content) {
        return Ok(LabelSchema {
            categories: names
                .into_iter()
                .map(|name| CategoryDefinition {
                    name,
                    color: None,
                    shortcut: None,
                })
                .collect(),
            attributes: Vec::new(),
        });
    }
    Ok(serde_yaml::from_str::<LabelSchema>(content)?)
}

pub fn save_schema(schema: &LabelSchema, path: &str) -> Result<()> {
    let expanded_path = shellexpand::tilde(path);
    let path = Path::new(expanded_path.as_ref());

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| EditorError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let yaml = serde_yaml::to_string(schema)?;
    std::fs::write(path, yaml).map_err(|source| EditorError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name_list_is_accepted() {
        let schema = parse_schema_content("- car\n- truck\n").unwrap();
        assert_eq!(schema.category_names(), vec!["car", "truck"]);
        assert_eq!(schema.category_color("truck", 1), PALETTE[1]);
    }

    #[test]
    fn full_schema_with_attributes() {
        let yaml = r##"
categories:
  - name: car
    color: "#123456"
    shortcut: "c"
attributes:
  - name: Weather
    toolType: list
    values: [sunny, rainy]
"##;
        let schema = parse_schema_content(yaml).unwrap();
        assert_eq!(schema.category_color("car", 0), "#123456");
        assert_eq!(schema.attributes[0].tool, AttributeTool::List);
        assert_eq!(schema.category_for_shortcut("c", &["bus".into(), "car".into()]), Some(1));
    }

    #[test]
    fn bundled_default_parses() {
        let schema = parse_schema_content(include_str!("../categories.yaml")).unwrap();
        assert!(!schema.categories.is_empty());
    }
}
