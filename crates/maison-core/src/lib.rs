pub mod catalog;
pub mod constants;
pub mod entry;
pub mod error;
pub mod handoff;
pub mod motion;
pub mod quiz;
pub mod route;
pub mod scene;
pub mod schedule;
pub mod session;
pub mod signal;

pub use catalog::*;
pub use entry::*;
pub use error::*;
pub use handoff::*;
pub use motion::*;
pub use quiz::*;
pub use route::*;
pub use schedule::*;
pub use session::*;
pub use signal::*;
