pub mod endpoint;
pub mod ids;

pub use endpoint::{EndpointParts, encode_query_value, split_endpoint};
pub use ids::generate_id;
