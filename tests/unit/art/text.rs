use super::*;
use crate::mosaic::cell::Sixels;

/// Vowels light the top row of sub-cells, consonants the bottom row.
struct VowelSampler;

impl GlyphSampler for VowelSampler {
    fn sample(&mut self, ch: char, _width: u32, _height: u32) -> Sixels {
        match ch {
            ' ' => Sixels::EMPTY,
            'A' | 'E' | 'I' | 'O' | 'U' => Sixels::from_bits_str("110000").unwrap(),
            _ => Sixels::from_bits_str("000011").unwrap(),
        }
    }
}

#[test]
fn wraps_then_samples_each_character() {
    let art = text_to_art("HI THERE", 5, 2, Color::Cyan, &mut VowelSampler, 15, 20).unwrap();
    assert_eq!((art.width(), art.height()), (5, 2));
    assert_eq!(art.get(0, 0).unwrap().sixels().to_bits_string(), "000011");
    assert_eq!(art.get(0, 1).unwrap().sixels().to_bits_string(), "110000");
    assert!(art.get(0, 2).is_none());
    assert_eq!(art.get(1, 4).unwrap().color(), Color::Cyan);
}

#[test]
fn blank_text_yields_nothing() {
    assert!(text_to_art("   ", 4, 1, Color::White, &mut VowelSampler, 15, 20).is_none());
    assert!(text_to_art("A", 0, 1, Color::White, &mut VowelSampler, 15, 20).is_none());
}
