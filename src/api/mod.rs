pub mod extract;
pub mod handlers;
pub mod routes;

pub use extract::*;
pub use handlers::*;
pub use routes::*;
