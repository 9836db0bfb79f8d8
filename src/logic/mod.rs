pub mod mutate;
pub mod resolve;
pub mod validate;

pub use mutate::*;
pub use resolve::*;
pub use validate::*;
