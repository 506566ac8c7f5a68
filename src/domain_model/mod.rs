mod cache;
mod friend;
mod message;
mod user;

pub use cache::*;
pub use friend::*;
pub use message::*;
pub use user::*;
