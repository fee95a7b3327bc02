pub mod task;
pub mod category;

pub use task::{OwnerId, Task};
pub use category::Category;
