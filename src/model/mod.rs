pub mod item;
pub mod settings;

pub use item::*;
pub use settings::*;
