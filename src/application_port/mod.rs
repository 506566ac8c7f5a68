mod messaging_service;
mod social_graph_service;

pub use messaging_service::*;
pub use social_graph_service::*;
