pub mod task;
pub mod user;

pub use task::{Task, TaskRecord};
pub use user::{NewUser, User};
