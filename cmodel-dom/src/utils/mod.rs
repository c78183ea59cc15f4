//! Pure helpers shared by the format handlers: CSS units, colors, the dark color registry and the
//! entity class-name micro format.

pub mod color;
pub mod dark_color;
pub mod entity_class;
pub mod unit;

pub use color::{get_color, parse_color, set_color};
pub use dark_color::{ColorPair, DarkColorHandler, DarkColorRegistry};
pub use unit::{parse_value_with_unit, ResultUnit, UnitBase};
