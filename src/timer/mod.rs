pub mod engine;

pub use engine::{Phase, TickReport, TimerEngine, TimerError};
