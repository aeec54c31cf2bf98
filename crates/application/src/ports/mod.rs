pub mod clock;
pub mod ledger;
pub mod recursive_resolver;

pub use clock::Clock;
pub use ledger::{LedgerBinding, LedgerError, LedgerNetwork, LedgerRecord, TxReceipt};
pub use recursive_resolver::{RecursiveResolver, UpstreamAnswer};
