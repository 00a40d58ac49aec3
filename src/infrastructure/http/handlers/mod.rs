//! HTTP Handlers

mod batch;
mod ping;
mod speech;

pub use batch::*;
pub use ping::*;
pub use speech::*;
