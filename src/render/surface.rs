/// The destination pixel surface renders and exports write into.
///
/// One surface per session; it is resized in place for each frame and reused
/// across the whole batch, so nothing may touch it concurrently with a
/// render+encode step. Pixels are premultiplied RGBA8, row-major, tightly
/// packed.
#[derive(Clone, Debug, Default)]
pub struct FrameSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl FrameSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resize to the frame dimensions and clear to transparent black.
    pub fn reset(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize) * 4;
        self.data.clear();
        self.data.resize(len, 0);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel bytes in premultiplied RGBA8.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// One premultiplied pixel. Panics out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Convert to straight-alpha RGBA8 for encoding.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = px[3] as u32;
            if a == 0 || a == 255 {
                continue;
            }
            px[0] = ((px[0] as u32 * 255 + a / 2) / a).min(255) as u8;
            px[1] = ((px[1] as u32 * 255 + a / 2) / a).min(255) as u8;
            px[2] = ((px[2] as u32 * 255 + a / 2) / a).min(255) as u8;
        }
        out
    }
}
