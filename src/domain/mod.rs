pub mod datefmt;
pub mod note;
pub mod store;
pub mod task;

pub use note::Note;
pub use store::{EntityStore, ValidationError, DEFAULT_CATEGORIES};
pub use task::{format_seconds, FreeTimeEntry, Priority, Task};
