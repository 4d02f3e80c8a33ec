//! CSS color values for fills, strokes and text.
//!
//! [`Color`] wraps `DynamicColor` from the `color` crate so that any CSS color
//! string accepted by a browser (`#0d9488`, `rgba(20, 184, 166, 0.05)`,
//! `teal`) can be carried through catalogs, configuration and the document's
//! group color hints.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;
use serde::{Deserialize, Deserializer, de};

/// A parsed CSS color.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Parses a CSS color string.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_core::color::Color;
    ///
    /// let teal = Color::new("#14b8a6").unwrap();
    /// let tinted = Color::new("rgba(20, 184, 166, 0.05)").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Builds one of the built-in palette colors.
    ///
    /// Only used with literals that are known to parse.
    pub(crate) fn builtin(color_str: &'static str) -> Self {
        Self::new(color_str).expect("built-in palette colors are valid CSS colors")
    }

    /// Returns a representation usable inside an SVG `id` attribute.
    ///
    /// The result contains only alphanumerics and underscores and starts with a letter.
    pub fn to_id_safe_string(self) -> String {
        let mut sanitized = self
            .to_string()
            .replace('#', "hex")
            .replace(['(', ')', ',', ' ', ';', '.', '%'], "_");

        if sanitized.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            sanitized = format!("c_{sanitized}");
        }

        sanitized
    }

    /// Returns a copy of this color with the alpha channel replaced.
    ///
    /// ```
    /// use trellis_core::color::Color;
    ///
    /// let faded = Color::new("#14b8a6").unwrap().with_alpha(0.05);
    /// assert!((faded.alpha() - 0.05).abs() < 0.001);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Alpha channel in `0.0..=1.0`.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::builtin("black")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(&raw).map_err(de::Error::custom)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}
