pub mod common;
pub mod item;
pub mod patch;
pub mod user;

pub use common::*;
pub use item::*;
pub use patch::*;
pub use user::*;
