//! Packed-ARGB video frame with the few drawing primitives the landmark
//! overlay needs.

/// One camera frame: `width × height` pixels, row-major, `0xAARRGGBB`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width:  usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl Frame {
    pub fn new(width: usize, height: usize, fill: u32) -> Self {
        Frame { width, height, pixels: vec![fill; width * height] }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    pub fn set_pixel(&mut self, x: isize, y: isize, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }

    /// Map a normalized `[0,1]` coordinate onto this frame.
    pub fn to_pixel(&self, nx: f32, ny: f32) -> (isize, isize) {
        let x = (nx * self.width as f32).round() as isize;
        let y = (ny * self.height as f32).round() as isize;
        (x, y)
    }

    /// Bresenham line, clipped to the frame.
    pub fn draw_line(&mut self, from: (isize, isize), to: (isize, isize), color: u32) {
        let (mut x0, mut y0) = from;
        let (x1, y1) = to;
        let dx =  (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.set_pixel(x0, y0, color);
            if x0 == x1 && y0 == y1 { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x0 += sx; }
            if e2 <= dx { err += dx; y0 += sy; }
        }
    }

    /// Filled square dot of half-width `r` centred on `(cx, cy)`.
    pub fn draw_dot(&mut self, cx: isize, cy: isize, r: isize, color: u32) {
        for y in (cy - r)..=(cy + r) {
            for x in (cx - r)..=(cx + r) {
                self.set_pixel(x, y, color);
            }
        }
    }
}
