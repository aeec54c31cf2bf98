pub mod connect;
pub mod delete_record;
pub mod refresh_snapshot;
pub mod register_domain;
pub mod transfer_domain;
pub mod upsert_record;

pub use connect::ConnectRegistryUseCase;
pub use delete_record::DeleteRecordUseCase;
pub use refresh_snapshot::RefreshSnapshotUseCase;
pub use register_domain::RegisterDomainUseCase;
pub use transfer_domain::TransferDomainUseCase;
pub use upsert_record::UpsertRecordUseCase;
