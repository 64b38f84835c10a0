mod domain;
mod ipv4;

pub use domain::validate_domain;
pub use ipv4::{parse_ipv4, validate};
