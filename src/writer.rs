use crate::error::SheetsResult;
use crate::types::WorkbookLayout;
use std::path::Path;

/// Serialization format for layout dumps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutFormat {
    #[default]
    Yaml,
    Json,
}

impl LayoutFormat {
    /// Pick a format from a file extension (`.json` → Json, anything else → Yaml)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => LayoutFormat::Json,
            _ => LayoutFormat::Yaml,
        }
    }
}

impl std::str::FromStr for LayoutFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(LayoutFormat::Yaml),
            "json" => Ok(LayoutFormat::Json),
            other => Err(format!(
                "unknown format '{}' (expected 'yaml' or 'json')",
                other
            )),
        }
    }
}

/// Serialize a layout descriptor set
pub fn render_layout(layout: &WorkbookLayout, format: LayoutFormat) -> SheetsResult<String> {
    match format {
        LayoutFormat::Yaml => Ok(serde_yaml::to_string(layout)?),
        LayoutFormat::Json => Ok(serde_json::to_string_pretty(layout)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::build_workbook;
    use crate::types::TemplateConfig;

    fn layout() -> WorkbookLayout {
        build_workbook(&TemplateConfig::new(2024, 2024).with_categories(["Housing", "Food"]))
    }

    #[test]
    fn test_render_yaml() {
        let yaml = render_layout(&layout(), LayoutFormat::Yaml).unwrap();
        assert!(yaml.contains("name: '2024.1'") || yaml.contains("name: \"2024.1\""));
        assert!(yaml.contains("=SUM(B2:B)"));
    }

    #[test]
    fn test_render_json_reloads() {
        let json = render_layout(&layout(), LayoutFormat::Json).unwrap();
        let reloaded: WorkbookLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, layout());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(LayoutFormat::from_path(Path::new("out.JSON")), LayoutFormat::Json);
        assert_eq!(LayoutFormat::from_path(Path::new("out.yaml")), LayoutFormat::Yaml);
        assert_eq!(LayoutFormat::from_path(Path::new("out")), LayoutFormat::Yaml);
    }
}
