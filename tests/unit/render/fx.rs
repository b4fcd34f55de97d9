use super::*;

fn grey(w: u32, h: u32) -> FrameRGBA {
    FrameRGBA::new(w, h, [200, 200, 200, 255])
}

fn only(f: impl FnOnce(&mut CrtSettings)) -> CrtSettings {
    let mut s = CrtSettings::preset(CrtPreset::Clean);
    f(&mut s);
    s
}

#[test]
fn presets_match_their_names() {
    assert!(!CrtSettings::preset(CrtPreset::Clean).any_enabled());
    let mild = CrtSettings::preset(CrtPreset::Mild);
    assert!(mild.scanlines && mild.glow && !mild.barrel && !mild.noise);
    assert_eq!(CrtSettings::default(), CrtSettings::preset(CrtPreset::Authentic));
    assert_eq!("BeatUp".parse::<CrtPreset>().unwrap(), CrtPreset::Beatup);
    assert!("vhs".parse::<CrtPreset>().is_err());
}

#[test]
fn clean_leaves_frame_untouched() {
    let mut f = grey(8, 6);
    f.put_pixel(3, 3, [255, 0, 0, 255]);
    let before = f.clone();
    CrtEffects::new(CrtSettings::preset(CrtPreset::Clean)).apply(&mut f).unwrap();
    assert_eq!(f, before);
}

#[test]
fn scanlines_darken_even_rows() {
    let mut f = grey(4, 4);
    let s = only(|s| {
        s.scanlines = true;
        s.scanline_intensity = 1.0;
    });
    CrtEffects::new(s).apply(&mut f).unwrap();
    assert_eq!(f.pixel(0, 0), Some([100, 100, 100, 255]));
    assert_eq!(f.pixel(0, 1), Some([200, 200, 200, 255]));
    assert_eq!(f.pixel(0, 2), Some([100, 100, 100, 255]));
}

#[test]
fn bleed_pulls_red_from_right_and_blue_from_left() {
    let mut f = FrameRGBA::new(8, 1, [0, 0, 0, 255]);
    f.put_pixel(4, 0, [255, 255, 255, 255]);
    let s = only(|s| {
        s.bleed = true;
        s.bleed_intensity = 0.5;
    });
    CrtEffects::new(s).apply(&mut f).unwrap();
    // Offset is round(1.5) = 2.
    assert_eq!(f.pixel(2, 0), Some([255, 0, 0, 255]));
    assert_eq!(f.pixel(4, 0), Some([0, 255, 0, 255]));
    assert_eq!(f.pixel(6, 0), Some([0, 0, 255, 255]));
}

#[test]
fn noise_is_seeded() {
    let s = only(|s| {
        s.noise = true;
        s.noise_intensity = 1.0;
        s.seed = 7;
    });
    let mut a = grey(16, 16);
    let mut b = grey(16, 16);
    CrtEffects::new(s).apply(&mut a).unwrap();
    CrtEffects::new(s).apply(&mut b).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, grey(16, 16));
    assert!(a.data.chunks_exact(4).all(|px| (180..=220).contains(&px[0]) && px[3] == 255));

    let mut c = grey(16, 16);
    CrtEffects::new(CrtSettings { seed: 8, ..s }).apply(&mut c).unwrap();
    assert_ne!(a, c);
}

#[test]
fn vignette_darkens_corners_not_centre() {
    let mut f = grey(40, 40);
    let s = only(|s| {
        s.vignette = true;
        s.vignette_intensity = 1.0;
    });
    CrtEffects::new(s).apply(&mut f).unwrap();
    assert_eq!(f.pixel(20, 20), Some([200, 200, 200, 255]));
    assert!(f.pixel(0, 0).unwrap()[0] < 100);
}

#[test]
fn barrel_keeps_centre_and_blackens_pulled_in_edges() {
    let mut f = grey(20, 20);
    let s = only(|s| {
        s.barrel = true;
        s.barrel_intensity = 1.0;
    });
    CrtEffects::new(s).apply(&mut f).unwrap();
    assert_eq!(f.pixel(10, 10), Some([200, 200, 200, 255]));
    assert_eq!(f.pixel(0, 0), Some([0, 0, 0, 255]));
}

#[test]
fn glow_brightens_around_a_lit_pixel() {
    let mut f = FrameRGBA::new(21, 21, [0, 0, 0, 255]);
    f.fill_rect(9, 9, 3, 3, [255, 255, 255, 255]);
    let s = only(|s| {
        s.glow = true;
        s.glow_intensity = 1.0;
    });
    CrtEffects::new(s).apply(&mut f).unwrap();
    assert!(f.pixel(13, 10).unwrap()[0] > 0);
    assert_eq!(f.pixel(10, 10), Some([255, 255, 255, 255]));
}

#[test]
fn negative_intensity_is_rejected() {
    let s = only(|s| {
        s.noise = true;
        s.noise_intensity = -1.0;
    });
    assert!(CrtEffects::new(s).apply(&mut grey(2, 2)).is_err());
}

#[test]
fn settings_load_from_partial_json() {
    let s: CrtSettings = serde_json::from_str(r#"{"noise": false, "seed": 3}"#).unwrap();
    assert!(!s.noise);
    assert_eq!(s.seed, 3);
    assert!(s.scanlines);
}

#[test]
fn blur_of_constant_image_is_identity() {
    let src = [10u8, 20, 30, 255].repeat(12);
    assert_eq!(blur_rgba8(&src, 4, 3, 3, 2.0).unwrap(), src);
    assert!(blur_rgba8(&src, 5, 3, 3, 2.0).is_err());
}
