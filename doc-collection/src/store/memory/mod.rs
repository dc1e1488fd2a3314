mod module;
mod store;

pub use module::*;
pub use store::*;
