mod friend_link_repo_mysql;
mod message_repo_mysql;
mod user_repo_mysql;

pub use friend_link_repo_mysql::*;
pub use message_repo_mysql::*;
pub use user_repo_mysql::*;

mod util;
