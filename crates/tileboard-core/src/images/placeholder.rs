//! Offline stand-in for placeholder image URLs.
//!
//! Catalog URLs look like `https://via.placeholder.com/600/92c952`: a size
//! segment (or `WxH`) followed by a hex fill color. Decoding those lets the
//! renderer draw the image without touching the network.

use kurbo::Size;
use peniko::Color;

/// The size and fill color encoded in a placeholder URL.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderImage {
    pub size: Size,
    pub color: Color,
}

impl PlaceholderImage {
    /// Decode a placeholder URL. Returns `None` for anything else.
    pub fn parse(url: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next()?;
        let mut segments = path.trim_end_matches('/').rsplit('/');
        let color = parse_hex(segments.next()?)?;
        let size = parse_size(segments.next()?)?;
        Some(Self { size, color })
    }
}

fn parse_size(s: &str) -> Option<Size> {
    let (w, h) = match s.split_once('x') {
        Some((w, h)) => (w.parse::<u32>().ok()?, h.parse::<u32>().ok()?),
        None => {
            let side = s.parse::<u32>().ok()?;
            (side, side)
        }
    };
    if w == 0 || h == 0 {
        return None;
    }
    Some(Size::new(w as f64, h as f64))
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::from_rgba8(r, g, b, 255))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_square() {
        let img = PlaceholderImage::parse("https://via.placeholder.com/600/92c952").unwrap();
        assert_eq!(img.size, Size::new(600.0, 600.0));
        assert_eq!(img.color.to_rgba8().r, 0x92);
        assert_eq!(img.color.to_rgba8().g, 0xc9);
        assert_eq!(img.color.to_rgba8().b, 0x52);
    }

    #[test]
    fn test_parse_rect_with_query() {
        let img = PlaceholderImage::parse("https://example.com/320x200/ff0000?text=hi").unwrap();
        assert_eq!(img.size, Size::new(320.0, 200.0));
    }

    #[test]
    fn test_rejects_other_urls() {
        assert!(PlaceholderImage::parse("https://example.com/cat.png").is_none());
        assert!(PlaceholderImage::parse("https://example.com/0/ff0000").is_none());
        assert!(PlaceholderImage::parse("").is_none());
    }
}
