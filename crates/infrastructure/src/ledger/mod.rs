pub mod abi;
pub mod in_memory;
pub mod json_rpc;

pub use in_memory::InMemoryLedger;
pub use json_rpc::JsonRpcLedger;
