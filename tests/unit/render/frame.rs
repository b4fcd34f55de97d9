use super::*;

#[test]
fn fill_rect_clips_to_frame() {
    let mut f = FrameRGBA::new(4, 3, [0, 0, 0, 255]);
    f.fill_rect(2, 1, 10, 10, [255, 0, 0, 255]);
    assert_eq!(f.pixel(1, 1), Some([0, 0, 0, 255]));
    assert_eq!(f.pixel(3, 2), Some([255, 0, 0, 255]));
    assert_eq!(f.pixel(4, 2), None);
}

#[test]
fn blend_mixes_by_coverage() {
    let mut f = FrameRGBA::new(1, 1, [0, 0, 0, 255]);
    f.blend_pixel(0, 0, [255, 255, 255, 255], 255);
    assert_eq!(f.pixel(0, 0), Some([255, 255, 255, 255]));
    f.blend_pixel(0, 0, [0, 0, 0, 255], 0);
    assert_eq!(f.pixel(0, 0), Some([255, 255, 255, 255]));
    f.blend_pixel(0, 0, [0, 0, 0, 255], 128);
    let px = f.pixel(0, 0).unwrap();
    assert!((126..=128).contains(&px[0]));
}

#[test]
fn digest_tracks_content() {
    let a = FrameRGBA::new(2, 2, [0, 0, 0, 255]);
    let mut b = a.clone();
    assert_eq!(a.digest(), b.digest());
    b.put_pixel(1, 1, [1, 0, 0, 255]);
    assert_ne!(a.digest(), b.digest());
}

#[test]
fn save_png_reports_export_errors() {
    let f = FrameRGBA::new(1, 1, [0, 0, 0, 255]);
    let err = f
        .save_png(Path::new("/nonexistent-dir/for/sure/out.png"))
        .unwrap_err();
    assert!(matches!(err, TelepageError::Export(_)));
}
