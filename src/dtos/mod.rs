mod query;
mod task;
mod user;

pub use query::*;
pub use task::*;
pub use user::*;
