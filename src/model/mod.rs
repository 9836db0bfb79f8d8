pub mod common;
pub mod form;
pub mod request;
pub mod request_context;
pub mod response;

pub use common::*;
pub use form::*;
pub use request::*;
pub use request_context::*;
pub use response::*;
