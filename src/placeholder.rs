use std::path::Path;

use ab_glyph::Font;
use anyhow::anyhow;
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_ellipse_mut, draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

use crate::alphabet::Letter;
use crate::batch::UnitOfWork;

pub const DEFAULT_BACKGROUND: Rgb<u8> = Rgb([74, 144, 226]);
pub const DEFAULT_FOREGROUND: Rgb<u8> = Rgb([255, 255, 255]);
/// Largest accepted tile side in pixels.
pub const MAX_SIDE: u32 = 4096;

#[derive(Debug, Clone)]
pub struct PlaceholderStyle {
    pub width: u32,
    pub height: u32,
    pub background: Rgb<u8>,
    pub foreground: Rgb<u8>,
    pub letter_scale: f32,
    pub letter_center: (i32, i32),
    pub hand_center: (i32, i32),
}

impl PlaceholderStyle {
    /// Lays the tile out the same way as the 300x400 default, scaled to fit.
    pub fn new(width: u32, height: u32) -> Self {
        let s = unit(width, height);
        Self {
            width,
            height,
            background: DEFAULT_BACKGROUND,
            foreground: DEFAULT_FOREGROUND,
            letter_scale: 120.0 * s,
            letter_center: (scaled(width, 1, 2), scaled(height, 3, 8)),
            hand_center: (scaled(width, 1, 2), scaled(height, 4, 5)),
        }
    }

    /// size of one layout unit in pixels, relative to the 300x400 tile
    fn unit(&self) -> f32 {
        unit(self.width, self.height)
    }
}

impl Default for PlaceholderStyle {
    fn default() -> Self {
        Self::new(300, 400)
    }
}

fn scaled(side: u32, num: u64, den: u64) -> i32 {
    (side as u64 * num / den).min(i32::MAX as u64) as i32
}

fn unit(width: u32, height: u32) -> f32 {
    (width as f32 / 300.0).min(height as f32 / 400.0)
}

/// Background plus the hand glyph, without the letter.
fn draw_tile(style: &PlaceholderStyle) -> RgbImage {
    let mut img = RgbImage::from_pixel(style.width, style.height, style.background);
    draw_hand(&mut img, style);
    img
}

pub fn render<F: Font>(letter: Letter, font: &F, style: &PlaceholderStyle) -> RgbImage {
    let mut img = draw_tile(style);
    let text = letter.to_string();
    let (w, h) = text_size(style.letter_scale, font, &text);
    let (cx, cy) = style.letter_center;
    draw_text_mut(
        &mut img,
        style.foreground,
        cx - (w / 2) as i32,
        cy - (h / 2) as i32,
        style.letter_scale,
        font,
        &text,
    );
    img
}

// a raised open hand: palm, four fingers and a thumb
fn draw_hand(img: &mut RgbImage, style: &PlaceholderStyle) {
    let s = style.unit();
    let px = |v: f32| (v * s).round() as i32;
    let (cx, cy) = style.hand_center;
    let palm_y = cy + px(12.0);

    draw_filled_ellipse_mut(
        img,
        (cx, palm_y),
        px(20.0).max(1),
        px(18.0).max(1),
        style.foreground,
    );

    let finger_w = px(8.0).max(1);
    for (dx, len) in [(-15.0, 22.0), (-5.0, 28.0), (5.0, 26.0), (15.0, 20.0)] {
        let len = px(len).max(1);
        let x = cx + px(dx) - finger_w / 2;
        let y = palm_y - px(10.0) - len;
        draw_filled_rect_mut(
            img,
            Rect::at(x, y).of_size(finger_w as u32, (len + px(10.0)) as u32),
            style.foreground,
        );
    }

    draw_filled_ellipse_mut(
        img,
        (cx - px(24.0), palm_y - px(2.0)),
        px(6.0).max(1),
        px(13.0).max(1),
        style.foreground,
    );
}

/// Parses `#rrggbb` or `rrggbb`.
pub fn parse_rgb(s: &str) -> anyhow::Result<Rgb<u8>> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(anyhow!("`{s}` is not a #rrggbb colour"));
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

pub struct PlaceholderGenerator<F> {
    font: F,
    style: PlaceholderStyle,
}

impl<F: Font> PlaceholderGenerator<F> {
    pub fn new(font: F, style: PlaceholderStyle) -> Self {
        Self { font, style }
    }
}

impl<F: Font> UnitOfWork for PlaceholderGenerator<F> {
    fn banner(&self) -> &str {
        "Generating ASL alphabet images..."
    }

    fn verb(&self) -> &str {
        "Generating"
    }

    fn produce(&mut self, letter: Letter, dest: &Path) -> anyhow::Result<()> {
        render(letter, &self.font, &self.style).save_with_format(dest, ImageFormat::Png)?;
        Ok(())
    }
}
