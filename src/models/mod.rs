pub mod matrix;
pub mod options;
pub mod result;
pub mod symbol_image;

pub use matrix::ModuleGrid;
pub use options::{ErrorCorrection, SymbolOptions, SymbolVersion};
pub use result::{DecodedResult, DecodedText};
pub use symbol_image::SymbolImage;
