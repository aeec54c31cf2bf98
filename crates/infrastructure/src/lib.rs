pub mod clock;
pub mod ledger;
pub mod recursive;

pub use clock::SystemClock;
pub use ledger::{InMemoryLedger, JsonRpcLedger};
pub use recursive::DohJsonResolver;
