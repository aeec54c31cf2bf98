pub mod registry;
pub mod resolve;

// Re-export use cases
pub use registry::{
    ConnectRegistryUseCase, DeleteRecordUseCase, RefreshSnapshotUseCase, RegisterDomainUseCase,
    TransferDomainUseCase, UpsertRecordUseCase,
};
pub use resolve::{AnswerSource, Resolution, ResolveDomainUseCase};
