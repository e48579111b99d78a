use crate::encoder::EncodedSymbol;
use crate::models::{ModuleGrid, SymbolImage, SymbolOptions};
use image::{GrayImage, Luma};

const DARK: u8 = 0;
const LIGHT: u8 = 255;

/// Rasterize a symbol: `module_size` pixels per module plus a light quiet zone
pub fn render(symbol: &EncodedSymbol, options: &SymbolOptions) -> SymbolImage {
    render_grid(&symbol.modules, options.module_size.get(), options.border)
}

/// Rasterize a bare module grid
pub fn render_grid(grid: &ModuleGrid, module_size: u32, border: u32) -> SymbolImage {
    let modules = grid.width() as u32 + 2 * border;
    let side = modules * module_size;
    let mut pixels = GrayImage::from_pixel(side, side, Luma([LIGHT]));

    for my in 0..grid.width() {
        for mx in 0..grid.width() {
            if !grid.get(mx, my) {
                continue;
            }
            let x0 = (mx as u32 + border) * module_size;
            let y0 = (my as u32 + border) * module_size;
            for y in y0..y0 + module_size {
                for x in x0..x0 + module_size {
                    pixels.put_pixel(x, y, Luma([DARK]));
                }
            }
        }
    }

    SymbolImage::from_gray(pixels)
}
