//! Runtime primitives shared by the cascade crates.
//!
//! * [`GenerationClock`] / [`GenerationToken`]: session generations where
//!   issuing a new generation cancels all work of the previous one
//! * [`spawn`]: runs session work on the ambient tokio runtime inside a
//!   span tagged with its generation and [`TaskClass`]

mod class;
mod spawn;
mod token;

pub use class::TaskClass;
pub use spawn::spawn;
pub use token::{GenerationClock, GenerationToken};
