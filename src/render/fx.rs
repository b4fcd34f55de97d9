//! CRT-style post-processing applied to a finished page bitmap.

use crate::foundation::error::{TelepageError, TelepageResult};
use crate::foundation::math::{mix64, unit_f32};
use crate::render::frame::FrameRGBA;

/// A bitmap-to-bitmap filter run after rasterization.
pub trait PostProcess {
    fn apply(&self, frame: &mut FrameRGBA) -> TelepageResult<()>;
}

/// Toggle and strength for each CRT stage. Strengths are `0..=1`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CrtSettings {
    pub scanlines: bool,
    pub scanline_intensity: f32,
    pub glow: bool,
    pub glow_intensity: f32,
    pub vignette: bool,
    pub vignette_intensity: f32,
    pub barrel: bool,
    pub barrel_intensity: f32,
    pub bleed: bool,
    pub bleed_intensity: f32,
    pub noise: bool,
    pub noise_intensity: f32,
    /// Seed for the noise stage; the same seed always gives the same grain.
    pub seed: u64,
}

impl Default for CrtSettings {
    fn default() -> Self {
        Self::preset(CrtPreset::Authentic)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrtPreset {
    Clean,
    Mild,
    Authentic,
    Beatup,
}

impl CrtPreset {
    pub const ALL: [CrtPreset; 4] = [
        CrtPreset::Clean,
        CrtPreset::Mild,
        CrtPreset::Authentic,
        CrtPreset::Beatup,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CrtPreset::Clean => "clean",
            CrtPreset::Mild => "mild",
            CrtPreset::Authentic => "authentic",
            CrtPreset::Beatup => "beatup",
        }
    }
}

impl std::str::FromStr for CrtPreset {
    type Err = TelepageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TelepageError::validation(format!("unknown effects preset '{s}'")))
    }
}

impl CrtSettings {
    pub fn preset(preset: CrtPreset) -> Self {
        // (scanlines, glow, vignette, barrel, bleed, noise)
        let [s, g, v, b, l, n] = match preset {
            CrtPreset::Clean => [0.0; 6],
            CrtPreset::Mild => [0.2, 0.15, 0.3, 0.0, 0.1, 0.0],
            CrtPreset::Authentic => [0.4, 0.3, 0.5, 0.2, 0.25, 0.15],
            CrtPreset::Beatup => [0.6, 0.5, 0.7, 0.35, 0.5, 0.35],
        };
        Self {
            scanlines: s > 0.0,
            scanline_intensity: s,
            glow: g > 0.0,
            glow_intensity: g,
            vignette: v > 0.0,
            vignette_intensity: v,
            barrel: b > 0.0,
            barrel_intensity: b,
            bleed: l > 0.0,
            bleed_intensity: l,
            noise: n > 0.0,
            noise_intensity: n,
            seed: 0,
        }
    }

    pub fn any_enabled(&self) -> bool {
        self.scanlines || self.glow || self.vignette || self.barrel || self.bleed || self.noise
    }

    pub fn validate(&self) -> TelepageResult<()> {
        let all = [
            self.scanline_intensity,
            self.glow_intensity,
            self.vignette_intensity,
            self.barrel_intensity,
            self.bleed_intensity,
            self.noise_intensity,
        ];
        if all.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(TelepageError::validation(
                "effect intensities must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// The CRT filter chain: barrel, bleed, glow, scanlines, noise, vignette.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CrtEffects {
    pub settings: CrtSettings,
}

impl CrtEffects {
    pub fn new(settings: CrtSettings) -> Self {
        Self { settings }
    }
}

impl PostProcess for CrtEffects {
    fn apply(&self, frame: &mut FrameRGBA) -> TelepageResult<()> {
        let s = &self.settings;
        s.validate()?;
        if !s.any_enabled() || frame.width == 0 || frame.height == 0 {
            return Ok(());
        }
        if s.barrel && s.barrel_intensity > 0.0 {
            barrel(frame, s.barrel_intensity * 0.15);
        }
        if s.bleed && s.bleed_intensity > 0.0 {
            bleed(frame, (s.bleed_intensity * 3.0).round() as u32);
        }
        if s.glow && s.glow_intensity > 0.0 {
            glow(frame, s.glow_intensity * 0.6)?;
        }
        if s.scanlines && s.scanline_intensity > 0.0 {
            scanlines(frame, s.scanline_intensity * 0.5);
        }
        if s.noise && s.noise_intensity > 0.0 {
            noise(frame, s.noise_intensity * 40.0, s.seed);
        }
        if s.vignette && s.vignette_intensity > 0.0 {
            vignette(frame, s.vignette_intensity * 0.8);
        }
        Ok(())
    }
}

fn clamp_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Each output pixel reads from `centre + d * (1 + strength * |d|²)` in normalized space.
/// Samples that land outside the frame are black.
fn barrel(frame: &mut FrameRGBA, strength: f32) {
    let (w, h) = (frame.width, frame.height);
    let (cx, cy) = (w as f32 / 2.0, h as f32 / 2.0);
    let mut out = FrameRGBA::new(w, h, [0, 0, 0, 255]);
    for y in 0..h {
        for x in 0..w {
            let dx = (x as f32 - cx) / cx;
            let dy = (y as f32 - cy) / cy;
            let distort = 1.0 + (dx * dx + dy * dy) * strength;
            let sx = (cx + dx * distort * cx).round();
            let sy = (cy + dy * distort * cy).round();
            if sx >= 0.0 && sy >= 0.0 {
                if let Some(px) = frame.pixel(sx as u32, sy as u32) {
                    out.put_pixel(x, y, px);
                }
            }
        }
    }
    *frame = out;
}

/// Red reads from `offset` px to the right, blue from `offset` px to the left.
fn bleed(frame: &mut FrameRGBA, offset: u32) {
    if offset < 1 {
        return;
    }
    let src = frame.clone();
    let w = frame.width;
    for y in 0..frame.height {
        for x in 0..w {
            let (Some(r), Some(g), Some(b)) = (
                src.pixel((x + offset).min(w - 1), y),
                src.pixel(x, y),
                src.pixel(x.saturating_sub(offset), y),
            ) else {
                continue;
            };
            frame.put_pixel(x, y, [r[0], g[1], b[2], 255]);
        }
    }
}

const GLOW_RADIUS: u32 = 8;
const GLOW_SIGMA: f32 = 4.0;

/// Screen-blend a blurred copy over the frame at `amount`.
fn glow(frame: &mut FrameRGBA, amount: f32) -> TelepageResult<()> {
    let blurred = blur_rgba8(&frame.data, frame.width, frame.height, GLOW_RADIUS, GLOW_SIGMA)?;
    let a = amount.clamp(0.0, 1.0);
    for (dst, src) in frame.data.chunks_exact_mut(4).zip(blurred.chunks_exact(4)) {
        for c in 0..3 {
            let base = f32::from(dst[c]);
            let top = f32::from(src[c]);
            let screen = 255.0 - (255.0 - base) * (255.0 - top) / 255.0;
            dst[c] = clamp_u8(base + (screen - base) * a);
        }
    }
    Ok(())
}

/// Darken every even row.
fn scanlines(frame: &mut FrameRGBA, darken: f32) {
    let keep = (1.0 - darken).clamp(0.0, 1.0);
    let stride = frame.width as usize * 4;
    for row in frame.data.chunks_exact_mut(stride).step_by(2) {
        for px in row.chunks_exact_mut(4) {
            for c in &mut px[..3] {
                *c = clamp_u8(f32::from(*c) * keep);
            }
        }
    }
}

/// Add the same offset in `±amount / 2` to all three channels of each pixel.
fn noise(frame: &mut FrameRGBA, amount: f32, seed: u64) {
    let base = mix64(seed);
    for (i, px) in frame.data.chunks_exact_mut(4).enumerate() {
        let n = (unit_f32(mix64(base ^ i as u64)) - 0.5) * amount;
        for c in &mut px[..3] {
            *c = clamp_u8(f32::from(*c) + n);
        }
    }
}

/// Radial darkening ramping from 0 at `0.25·w` to `max` at `0.7·w` from the centre.
fn vignette(frame: &mut FrameRGBA, max: f32) {
    let (w, h) = (frame.width as f32, frame.height as f32);
    let (cx, cy) = (w / 2.0, h / 2.0);
    let (r0, r1) = (w * 0.25, w * 0.7);
    let width = frame.width as usize;
    for (i, px) in frame.data.chunks_exact_mut(4).enumerate() {
        let x = (i % width) as f32 + 0.5;
        let y = (i / width) as f32 + 0.5;
        let d = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
        let t = ((d - r0) / (r1 - r0)).clamp(0.0, 1.0);
        let keep = 1.0 - t * max;
        for c in &mut px[..3] {
            *c = clamp_u8(f32::from(*c) * keep);
        }
    }
}

/// Separable gaussian blur over RGBA8 with edge clamping and Q16 fixed-point weights.
pub(crate) fn blur_rgba8(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> TelepageResult<Vec<u8>> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| TelepageError::render("blur buffer size overflow"))?;
    if src.len() != expected {
        return Err(TelepageError::render("blur expects width*height*4 bytes"));
    }
    if radius == 0 {
        return Ok(src.to_vec());
    }
    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected];
    let mut out = vec![0u8; expected];
    blur_pass(src, &mut tmp, width, height, &kernel, true);
    blur_pass(&tmp, &mut out, width, height, &kernel, false);
    Ok(out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> TelepageResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(TelepageError::validation("blur sigma must be > 0"));
    }
    let r = radius as i32;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let weights: Vec<f64> = (-r..=r)
        .map(|i| (-f64::from(i * i) / denom).exp())
        .collect();
    let sum: f64 = weights.iter().sum();

    let mut q: Vec<u32> = weights
        .iter()
        .map(|w| ((w / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    let total: i64 = q.iter().map(|&v| i64::from(v)).sum();
    let mid = q.len() / 2;
    q[mid] = (i64::from(q[mid]) + 65536 - total).clamp(0, 65536) as u32;
    Ok(q)
}

fn blur_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32], horizontal: bool) {
    let radius = (k.len() / 2) as i64;
    let (w, h) = (i64::from(width), i64::from(height));
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let d = ki as i64 - radius;
                let (sx, sy) = if horizontal {
                    ((x + d).clamp(0, w - 1), y)
                } else {
                    (x, (y + d).clamp(0, h - 1))
                };
                let idx = ((sy * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out + c] = ((acc[c] + 32768) >> 16).min(255) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/fx.rs"]
mod tests;
