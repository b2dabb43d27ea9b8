pub mod class;
pub mod code;
pub mod util;
pub mod value;

pub use class::*;
pub use code::*;
pub use value::*;
