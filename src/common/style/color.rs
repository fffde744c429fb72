use std::fmt;

/// RGB color representation.
///
/// Represents a color using red, green, and blue components, each in the range 0-255.
/// Colors are rendered as `#RRGGBB` (uppercase) wherever they leave the crate.
///
/// # Examples
///
/// ```rust
/// use lesson_lens::common::RGBColor;
///
/// let blue = RGBColor::from_hex("0000ff").unwrap();
/// assert_eq!(blue.to_string(), "#0000FF");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RGBColor {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl RGBColor {
    /// Pure white, the background assumed when a slide declares none.
    pub const WHITE: RGBColor = RGBColor::new(0xFF, 0xFF, 0xFF);

    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create an RGB color from a hex string.
    ///
    /// Accepts exactly six hex digits, optionally prefixed with `#`.
    /// Anything else (three-digit shorthand, scheme names such as `accent1`,
    /// signs, whitespace) is rejected.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lesson_lens::common::RGBColor;
    ///
    /// assert!(RGBColor::from_hex("#4472C4").is_some());
    /// assert!(RGBColor::from_hex("FFF").is_none());
    /// assert!(RGBColor::from_hex("+FFFFF").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self::new(r, g, b))
    }

    /// Convert to hex string (without # prefix).
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_accepts_six_digits() {
        assert_eq!(RGBColor::from_hex("ff8000"), Some(RGBColor::new(255, 128, 0)));
        assert_eq!(RGBColor::from_hex("#00FF00"), Some(RGBColor::new(0, 255, 0)));
    }

    #[test]
    fn test_from_hex_rejects_malformed() {
        for bad in ["", "FFF", "FFFFFFF", "GG0000", "+FFFFF", " FFFFF", "accent1"] {
            assert!(RGBColor::from_hex(bad).is_none(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_display_is_uppercase_with_hash() {
        assert_eq!(RGBColor::new(0x44, 0x72, 0xc4).to_string(), "#4472C4");
        assert_eq!(RGBColor::WHITE.to_string(), "#FFFFFF");
    }
}
