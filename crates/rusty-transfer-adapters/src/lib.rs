pub mod config;
pub mod eip1193;

pub use config::{RuntimeProfile, TransferAdapterConfig};
pub use eip1193::{Eip1193Adapter, Eip1193PendingTx, Eip1193Signer, DETERMINISTIC_ACCOUNT};
