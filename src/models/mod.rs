pub mod task;
pub mod user;

pub use task::{CreateTaskRequest, Task, TaskStatus, UpdateTaskStatusRequest};
pub use user::{NewUser, UpdateUserRequest, User, UserCredentials};
