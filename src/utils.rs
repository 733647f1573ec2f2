//! Utility functions for the editor window.

use slint::SharedPixelBuffer;

/// Checkerboard shown when an item's image cannot be loaded.
pub fn placeholder_image() -> slint::Image {
    let width = 640u32;
    let height = 480u32;
    let mut buffer = SharedPixelBuffer::new(width, height);
    let data = buffer.make_mut_bytes();
    for y in 0..height {
        for x in 0..width {
            let v = if (x / 32 + y / 32) % 2 == 0 { 60 } else { 110 };
            let i = ((y * width + x) * 3) as usize;
            data[i] = v;
            data[i + 1] = v;
            data[i + 2] = v;
        }
    }
    slint::Image::from_rgb8(buffer)
}

/// Parse `#rrggbb` or `#rrggbbaa` into a Slint color.
pub fn parse_color(hex: &str) -> Option<slint::Color> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
    let a = if digits.len() == 8 { channel(6)? } else { 255 };
    Some(slint::Color::from_argb_u8(a, r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_color("#00ff80"), Some(slint::Color::from_rgb_u8(0, 255, 128)));
        assert_eq!(parse_color("ff000080"), Some(slint::Color::from_argb_u8(128, 255, 0, 0)));
        assert_eq!(parse_color("abc"), None);
        assert_eq!(parse_color("#zzzzzz"), None);
    }
}
