#![allow(dead_code)]

use quire::{Color, LinearGradient, SerializeSettings};

pub trait SerializeSettingsExt {
    fn settings_1() -> Self;
    fn settings_watermark() -> Self;
}

impl SerializeSettingsExt for SerializeSettings {
    fn settings_1() -> Self {
        Self {
            ascii_compatible: true,
            compress_content_streams: false,
            watermark: None,
        }
    }

    fn settings_watermark() -> Self {
        Self {
            watermark: Some("DRAFT".to_string()),
            ..Self::settings_1()
        }
    }
}

pub fn red_to_blue(x2: f32) -> LinearGradient {
    LinearGradient::two_color(
        (0.0, 0.0),
        Color::new(255, 0, 0),
        (x2, 0.0),
        Color::new(0, 0, 255),
        false,
    )
}

pub fn to_text(pdf: Vec<u8>) -> String {
    String::from_utf8(pdf).unwrap()
}

/// The object numbers of all `N 0 obj` headers, in the order they appear.
pub fn object_numbers(pdf: &str) -> Vec<i32> {
    pdf.lines()
        .filter_map(|line| line.strip_suffix(" 0 obj"))
        .filter_map(|number| number.parse().ok())
        .collect()
}
