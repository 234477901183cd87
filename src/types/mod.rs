pub mod line;
pub mod record;
pub mod window;

pub use line::*;
pub use record::*;
pub use window::*;
