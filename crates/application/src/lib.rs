//! Ledger DNS Application Layer
//!
//! Ports to the outside world (ledger binding, upstream resolver, clock),
//! the stateful services the resolution engine shares, and the use cases
//! that drive them.
pub mod ports;
pub mod services;
pub mod use_cases;
