pub mod wildcard_filter;

pub use wildcard_filter::{registrable_domain, WildcardFilter};
