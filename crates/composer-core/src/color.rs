//! Color handling for colored spans
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Colored spans (`<text#FF0000>`) keep their color as a
//! raw literal in the tree; renderers resolve it through [`Color::new`].

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{DynamicColor, Srgb};

/// Color literal used by a colored span that names no color.
pub const DEFAULT_SPAN_COLOR: &str = "#222222";

/// Wrapper around the `DynamicColor` type from the color crate
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
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use composer_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the color as a lowercase `#rrggbb` string, dropping alpha.
    ///
    /// # Examples
    ///
    /// ```
    /// use composer_core::color::Color;
    ///
    /// let color = Color::new("#FF8000").unwrap();
    /// assert_eq!(color.to_hex(), "#ff8000");
    /// ```
    pub fn to_hex(&self) -> String {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(DEFAULT_SPAN_COLOR).expect("default span color is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}
