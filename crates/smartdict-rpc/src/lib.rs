pub mod dispatcher;

pub use dispatcher::RpcDispatcher;
