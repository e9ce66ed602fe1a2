pub mod config;
pub mod page;
pub mod project;
pub mod selection;
pub mod task;
pub mod user;

pub use config::*;
pub use page::*;
pub use project::*;
pub use selection::*;
pub use task::*;
pub use user::*;
