pub mod assemble;
pub mod item_ops;
pub mod merge;
pub mod user_ops;
pub mod validate;

pub use assemble::*;
pub use item_ops::*;
pub use merge::*;
pub use user_ops::*;
pub use validate::*;
