//! HTTP Handlers

mod flowchart;
mod generate;
mod narrate;
mod ping;
mod query;

pub use flowchart::*;
pub use generate::*;
pub use narrate::*;
pub use ping::*;
pub use query::*;
