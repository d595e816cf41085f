pub mod agent;
pub mod fetch;

pub use agent::{DictionaryAgent, DEFAULT_API_BASE};
pub use fetch::{DictionaryFetch, FetchError, FetchResponse, HttpFetcher, LOOKUP_TIMEOUT_SECS};
