mod messaging_service_impl;
mod social_graph_service_impl;

pub use messaging_service_impl::*;
pub use social_graph_service_impl::*;
