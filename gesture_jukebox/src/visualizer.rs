//! Software-rendered window using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  camera image (annotated)                                    │
//! │                                                              │
//! │   1. first track on page                                     │
//! │   2. current track  (green)                                  │
//! │   3. ...                                                     │
//! │                                                  ┌────────┐  │
//! │                                                  │ cover  │  │
//! │  status bar                                      │        │  │
//! │  key legend                                      └────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! All drawing happens on a [`Canvas`], which knows nothing about the window;
//! [`Visualizer`] only moves the finished buffer and keyboard state.

use std::sync::mpsc::Sender;

use hand_gesture::Frame;
use jukebox_library::Track;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::artwork::Thumbnail;
use crate::config::AppConfig;
use crate::gesture::SimInput;
use crate::jukebox::NO_TRACKS;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const THUMB_SIZE:   usize = 200;
pub const THUMB_MARGIN: usize = 20;
const LIST_X:           usize = 50;
const LIST_Y:           usize = 50;
const LIST_STEP:        usize = 40;
const LIST_SCALE:       usize = 3;
const STATUS_SCALE:     usize = 2;
const STATUS_H:         usize = 28;
const LEGEND_H:         usize = 16;
const TEXT_COLOR:       u32   = 0xFFFFFFFF;
const CURRENT_COLOR:    u32   = 0xFF00FF00;
const EMPTY_COLOR:      u32   = 0xFFFF0000;
const TEXT_BG:          u32   = 0xFF0F3460;
const LEGEND_COLOR:     u32   = 0xFF888888;
const VOLUME_STEP:      f32   = 0.05;

const LEGEND: &str = "0-5=show fingers  Up/Down=volume  Q/Esc=quit";

// ════════════════════════════════════════════════════════════════════════════
// Scene: what one frame shows
// ════════════════════════════════════════════════════════════════════════════

/// Snapshot of everything drawn in one frame.
pub struct Scene<'a> {
    pub frame:      &'a Frame,
    /// Tracks on the visible page, with their playlist index.
    pub page:       Vec<(usize, &'a Track)>,
    pub current:    Option<usize>,
    pub page_label: String,
    pub thumbnail:  Option<&'a Thumbnail>,
    pub status:     &'a str,
    pub playing:    bool,
    pub volume:     f32,
}

// ════════════════════════════════════════════════════════════════════════════
// Canvas
// ════════════════════════════════════════════════════════════════════════════

pub struct Canvas {
    pub width:  usize,
    pub height: usize,
    pub buf:    Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas { width, height, buf: vec![0xFF000000; width * height] }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.buf[y * self.width + x])
    }

    pub fn draw_scene(&mut self, scene: &Scene<'_>) {
        self.blit(scene.frame.width, scene.frame.height, &scene.frame.pixels, 0, 0);

        if scene.page.is_empty() {
            self.draw_label(NO_TRACKS, LIST_X, LIST_Y, LIST_SCALE, EMPTY_COLOR);
        }
        for (row, (index, track)) in scene.page.iter().enumerate() {
            let y = LIST_Y + row * LIST_STEP;
            let line = format!("{}. {}", index + 1, track.name());
            if scene.current == Some(*index) {
                let w = line.chars().count() * 4 * LIST_SCALE + 12;
                self.shade_rect(LIST_X - 6, y - 6, w, 5 * LIST_SCALE + 12, CURRENT_COLOR, 0.25);
                self.draw_label(&line, LIST_X, y, LIST_SCALE, CURRENT_COLOR);
            } else {
                self.draw_label(&line, LIST_X, y, LIST_SCALE, TEXT_COLOR);
            }
        }

        if let Some(thumb) = scene.thumbnail {
            let x = self.width.saturating_sub(thumb.size + THUMB_MARGIN);
            let y = self.height.saturating_sub(thumb.size + THUMB_MARGIN);
            self.blit(thumb.size, thumb.size, &thumb.pixels, x, y);
            let border = if scene.playing { CURRENT_COLOR } else { LEGEND_COLOR };
            self.draw_border(x, y, thumb.size, thumb.size, border);
        }

        // ── Status bar ────────────────────────────────────────────────────
        let bar_w = self.width.saturating_sub(THUMB_SIZE + 2 * THUMB_MARGIN);
        let bar_y = self.height.saturating_sub(STATUS_H + LEGEND_H);
        self.fill_rect(0, bar_y, bar_w, STATUS_H, TEXT_BG);
        let status = format!(
            "{}   {}   Vol {:.0}%",
            scene.status, scene.page_label, scene.volume * 100.0,
        );
        self.draw_label(&status, 10, bar_y + 7, STATUS_SCALE, TEXT_COLOR);

        // ── Key legend ────────────────────────────────────────────────────
        self.draw_label(LEGEND, 10, self.height.saturating_sub(LEGEND_H - 5), 1, LEGEND_COLOR);
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn blit(&mut self, w: usize, h: usize, pixels: &[u32], x: usize, y: usize) {
        if x >= self.width || y >= self.height {
            return;
        }
        let cols = w.min(self.width - x);
        for row in 0..h.min(self.height - y) {
            let src = &pixels[row * w..row * w + cols];
            let dst = (y + row) * self.width + x;
            self.buf[dst..dst + cols].copy_from_slice(src);
        }
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(self.height) {
            for col in x..(x + w).min(self.width) {
                self.buf[row * self.width + col] = color;
            }
        }
    }

    /// Blend `color` over the rectangle, keeping the camera image visible.
    fn shade_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32, t: f32) {
        for row in y..(y + h).min(self.height) {
            for col in x..(x + w).min(self.width) {
                let i = row * self.width + col;
                self.buf[i] = blend(self.buf[i], color, t);
            }
        }
    }

    fn draw_border(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        if w == 0 || h == 0 {
            return;
        }
        for col in x..(x + w).min(self.width) {
            self.set_pixel(col, y, color);
            self.set_pixel(col, y + h - 1, color);
        }
        for row in y..(y + h).min(self.height) {
            self.set_pixel(x, row, color);
            self.set_pixel(x + w - 1, row, color);
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < self.width && y < self.height {
            self.buf[y * self.width + x] = color;
        }
    }

    /// Minimal bitmap font: 3×5 glyphs, each pixel drawn as a
    /// `scale`×`scale` block.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) {
        let advance = 4 * scale;
        let mut cx = x;
        for ch in text.chars() {
            if cx + advance > self.width {
                break;
            }
            for (row, &bits) in char_glyph(ch).iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * scale, y + row * scale, scale, scale, color);
                    }
                }
            }
            cx += advance;
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window:  Window,
    canvas:  Canvas,
    sim_tx:  Sender<SimInput>,
    /// Number key currently shown as a simulated hand.
    held:    Option<u8>,
}

const DIGIT_KEYS: [(Key, Key, u8); 6] = [
    (Key::Key0, Key::NumPad0, 0),
    (Key::Key1, Key::NumPad1, 1),
    (Key::Key2, Key::NumPad2, 2),
    (Key::Key3, Key::NumPad3, 3),
    (Key::Key4, Key::NumPad4, 4),
    (Key::Key5, Key::NumPad5, 5),
];

impl Visualizer {
    pub fn new(cfg: &AppConfig, sim_tx: Sender<SimInput>) -> Result<Self, String> {
        let mut window = Window::new(
            "Gesture Jukebox",
            cfg.window_width, cfg.window_height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(cfg.frame_interval()));

        Ok(Visualizer {
            window,
            canvas: Canvas::new(cfg.window_width, cfg.window_height),
            sim_tx,
            held: None,
        })
    }

    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Poll keyboard inputs and translate number keys to [`SimInput`] events.
    /// Returns false when the window should close.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() { return false; }

        if self.window.is_key_pressed(Key::Q, KeyRepeat::No)
            || self.window.is_key_pressed(Key::Escape, KeyRepeat::No)
        {
            return false;
        }

        for (key, pad, fingers) in DIGIT_KEYS {
            if self.window.is_key_pressed(key, KeyRepeat::No)
                || self.window.is_key_pressed(pad, KeyRepeat::No)
            {
                self.held = Some(fingers);
                let _ = self.sim_tx.send(SimInput::ShowFingers(fingers));
            } else if self.held == Some(fingers)
                && (self.window.is_key_released(key) || self.window.is_key_released(pad))
            {
                self.held = None;
                let _ = self.sim_tx.send(SimInput::HideHand);
            }
        }

        true
    }

    /// Volume change requested this frame through the arrow keys.
    pub fn volume_nudge(&self) -> f32 {
        let mut delta = 0.0;
        if self.window.is_key_pressed(Key::Up, KeyRepeat::Yes) {
            delta += VOLUME_STEP;
        }
        if self.window.is_key_pressed(Key::Down, KeyRepeat::Yes) {
            delta -= VOLUME_STEP;
        }
        delta
    }

    /// Render one frame.
    pub fn render(&mut self, scene: &Scene<'_>) {
        self.canvas.draw_scene(scene);
        self.window
            .update_with_buffer(&self.canvas.buf, self.canvas.width, self.canvas.height)
            .ok();
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '_' => [0b000, 0b000, 0b000, 0b000, 0b111],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '(' => [0b001, 0b010, 0b010, 0b010, 0b001],
        ')' => [0b100, 0b010, 0b010, 0b010, 0b100],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '%' => [0b101, 0b001, 0b010, 0b100, 0b101],
        '&' => [0b010, 0b101, 0b010, 0b101, 0b011],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

/// Alpha-blend two ARGB colors. `t` = 0.0 → all `a`, `t` = 1.0 → all `b`.
fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |ca: u32, cb: u32| (ca as f32 * (1.0 - t) + cb as f32 * t) as u32;
    let ar = (a >> 16) & 0xFF; let br = (b >> 16) & 0xFF;
    let ag = (a >>  8) & 0xFF; let bg = (b >>  8) & 0xFF;
    let ab =  a        & 0xFF; let bb =  b        & 0xFF;
    0xFF000000 | (lerp(ar, br) << 16) | (lerp(ag, bg) << 8) | lerp(ab, bb)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
