/// Compact square grid of QR modules (true = dark)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGrid {
    width: usize,
    data: Vec<u8>,
}

impl ModuleGrid {
    /// Create an all-light grid with `width` modules per side
    pub fn new(width: usize) -> Self {
        let bytes_needed = (width * width).div_ceil(8);
        Self {
            width,
            data: vec![0; bytes_needed],
        }
    }

    /// Build a grid from row-major dark flags
    ///
    /// Returns `None` when `dark` is not a perfect square of `width`.
    pub fn from_dark_flags<I>(width: usize, dark: I) -> Option<Self>
    where
        I: IntoIterator<Item = bool>,
    {
        let mut grid = Self::new(width);
        let mut count = 0usize;
        for (index, is_dark) in dark.into_iter().enumerate() {
            if index >= width * width {
                return None;
            }
            grid.set(index % width, index / width, is_dark);
            count += 1;
        }
        (count == width * width).then_some(grid)
    }

    /// Modules per side
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get module at (x, y); out of range reads as light
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.width {
            return false;
        }
        let index = y * self.width + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set module at (x, y); out of range writes are ignored
    pub fn set(&mut self, x: usize, y: usize, dark: bool) {
        if x >= self.width || y >= self.width {
            return;
        }
        let index = y * self.width + x;
        if dark {
            self.data[index / 8] |= 1 << (index % 8);
        } else {
            self.data[index / 8] &= !(1 << (index % 8));
        }
    }

    /// Number of dark modules
    pub fn dark_count(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }
}
