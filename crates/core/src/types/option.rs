//! Product options and their values.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::colors;

static COLOR_OPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)colou?r").expect("Invalid regex"));

/// One selectable value of a product option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOptionValue {
    /// Value as shown to shoppers (e.g., "Midnight Blue").
    pub label: String,
    /// Swatch colors, set only for color options whose label is a known color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex_colors: Option<Vec<String>>,
}

/// An option axis on a product or a variant (e.g., size, color).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    /// Option id.
    pub id: String,
    /// Lower-cased option name (e.g., "color").
    pub display_name: String,
    /// Values available on this axis.
    pub values: Vec<ProductOptionValue>,
}

/// Whether an option name denotes a color axis ("Color", "colour", "Band Colour").
#[must_use]
pub fn is_color_option(name: &str) -> bool {
    COLOR_OPTION_RE.is_match(name)
}

/// Key used for the static color table: lower-cased, all whitespace removed.
fn color_key(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Build option values, attaching swatch colors for color-named options.
///
/// A label missing from the color table simply has no `hex_colors`.
#[must_use]
pub fn normalize_color_option<S: AsRef<str>>(name: &str, values: &[S]) -> Vec<ProductOptionValue> {
    let is_color = is_color_option(name);

    values
        .iter()
        .map(|value| {
            let label = value.as_ref();
            let hex_colors = is_color
                .then(|| colors::lookup(&color_key(label)))
                .flatten()
                .map(|hex| vec![hex.to_string()]);

            ProductOptionValue {
                label: label.to_string(),
                hex_colors,
            }
        })
        .collect()
}

/// Build a canonical option from a backend option descriptor.
#[must_use]
pub fn normalize_option<S: AsRef<str>>(id: &str, name: &str, values: &[S]) -> ProductOption {
    ProductOption {
        id: id.to_string(),
        display_name: name.to_lowercase(),
        values: normalize_color_option(name, values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_key_strips_whitespace_and_case() {
        assert_eq!(color_key("Midnight Blue"), "midnightblue");
        assert_eq!(color_key(" Rebecca\tPurple "), "rebeccapurple");
    }

    #[test]
    fn test_is_color_option() {
        assert!(is_color_option("Color"));
        assert!(is_color_option("COLOUR"));
        assert!(is_color_option("Strap colour"));
        assert!(!is_color_option("Size"));
        assert!(!is_color_option("Colr"));
    }

    #[test]
    fn test_known_color_gets_one_hex() {
        let values = normalize_color_option("Color", &["Midnight Blue"]);
        assert_eq!(values.len(), 1);
        let hex = values.first().and_then(|v| v.hex_colors.clone());
        assert_eq!(hex, Some(vec!["#191970".to_string()]));
    }

    #[test]
    fn test_unknown_color_has_no_hex() {
        let values = normalize_color_option("Colour", &["Sunset Glow"]);
        assert_eq!(
            values,
            vec![ProductOptionValue {
                label: "Sunset Glow".to_string(),
                hex_colors: None,
            }]
        );
    }

    #[test]
    fn test_non_color_option_never_looks_up() {
        // "Red" is in the table but the option is not a color axis
        let values = normalize_color_option("Size", &["Red"]);
        assert!(values.iter().all(|v| v.hex_colors.is_none()));
    }

    #[test]
    fn test_normalize_option_lowercases_display_name() {
        let option = normalize_option("opt-1", "Color", &["Red", "Navy"]);
        assert_eq!(option.display_name, "color");
        assert_eq!(option.values.len(), 2);
        assert!(option.values.iter().all(|v| v.hex_colors.is_some()));
    }

    #[test]
    fn test_missing_hex_is_not_serialized() {
        let value = ProductOptionValue {
            label: "Large".to_string(),
            hex_colors: None,
        };
        let json = serde_json::to_value(&value).unwrap_or_default();
        assert_eq!(json, serde_json::json!({ "label": "Large" }));
    }
}
