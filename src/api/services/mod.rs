pub mod lookup;

pub use lookup::{LookupQuery, LookupService, ResponseSettings, lookup_routes};
