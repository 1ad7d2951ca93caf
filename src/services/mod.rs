//! Business operations invoked by the route handlers.
//!
//! Protected operations take the caller's identity as an explicit argument. It is used to
//! bind task ownership and for the audit log; no service checks that the caller owns the
//! record it touches.

pub mod auth;
pub mod tasks;
pub mod users;

pub use auth::AuthService;
pub use tasks::TaskService;
pub use users::UserService;
