use regex::RegexBuilder;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, trace};

use crate::Circle;

#[derive(Debug, Error)]
pub enum SvgParseError {
    #[error("markup is not well-formed XML: {0}")]
    Malformed(#[from] roxmltree::Error),
}

/// Circles extracted from one SVG document, in document order.
///
/// Duplicate labels are kept here so the total element count is preserved;
/// [`ParsedScene::by_label`] collapses them with last-write-wins.
#[derive(Debug, Clone, Default)]
pub struct ParsedScene {
    circles: Vec<Circle>,
}

impl ParsedScene {
    /// Number of successfully extracted circle elements, counting
    /// duplicate labels separately.
    pub fn circle_count(&self) -> usize {
        self.circles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }

    /// Label-to-circle mapping. When a label appears on more than one
    /// element, the later element in document order wins.
    pub fn by_label(&self) -> BTreeMap<String, Circle> {
        let mut map = BTreeMap::new();
        for circle in &self.circles {
            map.insert(circle.label.clone(), circle.clone());
        }
        map
    }
}

fn svg_block_regex() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| {
        RegexBuilder::new(r"<svg.*?>.*?</svg>")
            .dot_matches_new_line(true)
            .case_insensitive(true)
            .build()
            .expect("static regex")
    })
}

/// Isolate the `<svg>...</svg>` document from surrounding model chatter
/// (markdown fences, prose). Falls back to the full text when no svg tag
/// is found, so plain documents still parse.
pub fn extract_svg(text: &str) -> &str {
    match svg_block_regex().find(text) {
        Some(m) => m.as_str(),
        None => text,
    }
}

/// Extract circles from raw model output.
///
/// A `<circle>` element yields a [`Circle`] only when `cx`, `cy`, and `r`
/// are all present and numeric and it carries a label (`id` preferred,
/// else `fill`). Anything less is skipped, never fatal. Only a document
/// that fails to parse as XML at all is an error.
pub fn parse_circles(text: &str) -> Result<ParsedScene, SvgParseError> {
    let svg = extract_svg(text);
    let doc = roxmltree::Document::parse(svg)?;

    let mut circles = Vec::new();
    for node in doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "circle")
    {
        match extract_circle(&node) {
            Some(circle) => circles.push(circle),
            None => {
                trace!("skipping circle element with missing or non-numeric attributes");
            }
        }
    }

    debug!(circles = circles.len(), "parsed SVG scene");
    Ok(ParsedScene { circles })
}

fn extract_circle(node: &roxmltree::Node) -> Option<Circle> {
    let cx = numeric_attribute(node, "cx")?;
    let cy = numeric_attribute(node, "cy")?;
    let r = numeric_attribute(node, "r")?;
    let label = node.attribute("id").or_else(|| node.attribute("fill"))?;
    Some(Circle::new(label, cx, cy, r))
}

fn numeric_attribute(node: &roxmltree::Node, name: &str) -> Option<f64> {
    node.attribute(name)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_svg_from_fenced_response() {
        let response = r#"Here is your drawing:
```svg
<svg width="300" height="300">
  <circle cx="100" cy="100" r="50" fill="Red" />
</svg>
```
Let me know if you need changes."#;

        let svg = extract_svg(response);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_extract_svg_without_tag_returns_input() {
        let text = "no markup here";
        assert_eq!(extract_svg(text), text);
    }

    #[test]
    fn test_parse_basic_circles() {
        let svg = r#"<svg>
            <circle cx="10" cy="20" r="5" fill="Red" />
            <circle cx="30" cy="40" r="7" fill="Blue" />
        </svg>"#;

        let scene = parse_circles(svg).unwrap();
        assert_eq!(scene.circle_count(), 2);

        let map = scene.by_label();
        assert_eq!(map["red"].cx, 10.0);
        assert_eq!(map["blue"].r, 7.0);
    }

    #[test]
    fn test_id_attribute_wins_over_fill() {
        let svg = r#"<svg><circle id="Alpha" cx="1" cy="2" r="3" fill="red" /></svg>"#;
        let scene = parse_circles(svg).unwrap();
        assert!(scene.by_label().contains_key("alpha"));
    }

    #[test]
    fn test_missing_radius_skips_element() {
        let svg = r#"<svg>
            <circle cx="10" cy="20" fill="Red" />
            <circle cx="30" cy="40" r="7" fill="Blue" />
        </svg>"#;

        let scene = parse_circles(svg).unwrap();
        assert_eq!(scene.circle_count(), 1);
        assert!(scene.by_label().contains_key("blue"));
    }

    #[test]
    fn test_non_numeric_coordinate_skips_element() {
        let svg = r#"<svg>
            <circle cx="wide" cy="20" r="5" fill="Red" />
            <circle cx="30" cy="40" r="7" fill="Blue" />
        </svg>"#;

        let scene = parse_circles(svg).unwrap();
        assert_eq!(scene.circle_count(), 1);
    }

    #[test]
    fn test_unlabeled_element_skips() {
        let svg = r#"<svg><circle cx="10" cy="20" r="5" /></svg>"#;
        let scene = parse_circles(svg).unwrap();
        assert!(scene.is_empty());
    }

    #[test]
    fn test_duplicate_label_last_write_wins() {
        let svg = r#"<svg>
            <circle cx="0" cy="0" r="5" fill="Red" />
            <circle cx="100" cy="100" r="9" fill="Red" />
        </svg>"#;

        let scene = parse_circles(svg).unwrap();
        // Both elements parsed, but the mapping keeps the later geometry.
        assert_eq!(scene.circle_count(), 2);
        let map = scene.by_label();
        assert_eq!(map.len(), 1);
        assert_eq!(map["red"].cx, 100.0);
        assert_eq!(map["red"].r, 9.0);
    }

    #[test]
    fn test_nested_circles_are_found() {
        let svg = r#"<svg><g><circle cx="1" cy="2" r="3" fill="green" /></g></svg>"#;
        let scene = parse_circles(svg).unwrap();
        assert_eq!(scene.circle_count(), 1);
    }

    #[test]
    fn test_unknown_elements_and_attributes_ignored() {
        let svg = r#"<svg>
            <rect x="0" y="0" width="10" height="10" fill="red" />
            <circle cx="1" cy="2" r="3" fill="blue" stroke="black" opacity="0.5" />
        </svg>"#;
        let scene = parse_circles(svg).unwrap();
        assert_eq!(scene.circle_count(), 1);
    }

    #[test]
    fn test_namespaced_svg_parses() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
            <circle cx="1" cy="2" r="3" fill="red" />
        </svg>"#;
        let scene = parse_circles(svg).unwrap();
        assert_eq!(scene.circle_count(), 1);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        let svg = "<svg><circle cx='1' cy='2' r='3' fill='red'";
        assert!(parse_circles(svg).is_err());
    }
}
