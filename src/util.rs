//! Internal utilities.

use std::hash::Hash;

use base64::Engine;
use siphasher::sip128::{Hasher128, SipHasher13};

use crate::{Rect, Transform};

pub(crate) trait TransformExt {
    fn to_pdf_transform(&self) -> [f32; 6];
}

impl TransformExt for Transform {
    fn to_pdf_transform(&self) -> [f32; 6] {
        [self.sx, self.ky, self.kx, self.sy, self.tx, self.ty]
    }
}

pub(crate) trait RectExt {
    fn to_pdf_rect(&self) -> [f32; 4];
}

impl RectExt for Rect {
    fn to_pdf_rect(&self) -> [f32; 4] {
        [
            self.left(),
            self.top(),
            self.left() + self.width(),
            self.top() + self.height(),
        ]
    }
}

/// Map a float to a key that can be hashed and compared. Negative zero is
/// folded into positive zero so that `-0.0` and `0.0` are the same key.
pub(crate) fn float_key(value: f32) -> u32 {
    if value == 0.0 {
        0.0f32.to_bits()
    } else {
        value.to_bits()
    }
}

/// Create a base64-encoded hash of the value.
pub(crate) fn hash_base64<T: Hash + ?Sized>(value: &T) -> String {
    base64::engine::general_purpose::STANDARD.encode(hash128(value).to_be_bytes())
}

/// Calculate a 128-bit siphash of a value.
fn hash128<T: Hash + ?Sized>(value: &T) -> u128 {
    let mut state = SipHasher13::new();
    value.hash(&mut state);
    state.finish128().as_u128()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_key_folds_negative_zero() {
        assert_eq!(float_key(-0.0), float_key(0.0));
        assert_ne!(float_key(0.5), float_key(-0.5));
    }

    #[test]
    fn pdf_rect_from_bounds() {
        let rect = Rect::from_xywh(10.0, 20.0, 100.0, 50.0).unwrap();
        assert_eq!(rect.to_pdf_rect(), [10.0, 20.0, 110.0, 70.0]);
    }

    #[test]
    fn hash_is_stable() {
        assert_eq!(hash_base64(&[1u8, 2, 3]), hash_base64(&[1u8, 2, 3]));
        assert_ne!(hash_base64(&[1u8, 2, 3]), hash_base64(&[3u8, 2, 1]));
    }
}
