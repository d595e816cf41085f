pub mod dictionary;
pub mod info;
pub mod rpc;

pub use dictionary::*;
pub use info::*;
pub use rpc::*;
