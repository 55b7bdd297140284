pub mod http;
pub mod simulated;
pub mod traits;
pub mod types;

pub use http::HttpSearchBackend;
pub use simulated::SimulatedBackend;
pub use traits::SearchBackend;
pub use types::SearchResults;
