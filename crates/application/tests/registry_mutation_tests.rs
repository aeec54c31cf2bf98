use ledger_dns_application::use_cases::{
    AnswerSource, ConnectRegistryUseCase, DeleteRecordUseCase, RegisterDomainUseCase,
    TransferDomainUseCase, UpsertRecordUseCase,
};
use ledger_dns_domain::{DomainError, RecordType, Severity};

mod helpers;
use helpers::{Harness, MockLedger, OTHER_OWNER, OWNER};

fn signing_harness(seed: &[&str]) -> Harness {
    Harness::with_ledger(MockLedger::new().with_signer(OWNER), seed)
}

fn register_use_case(h: &Harness) -> RegisterDomainUseCase {
    RegisterDomainUseCase::new(
        h.context.clone(),
        h.registry.clone(),
        h.refresh.clone(),
        "blockchain",
    )
}

fn upsert_use_case(h: &Harness) -> UpsertRecordUseCase {
    UpsertRecordUseCase::new(
        h.context.clone(),
        h.registry.clone(),
        h.refresh.clone(),
        "blockchain",
    )
}

fn delete_use_case(h: &Harness) -> DeleteRecordUseCase {
    DeleteRecordUseCase::new(
        h.context.clone(),
        h.registry.clone(),
        h.refresh.clone(),
        "blockchain",
    )
}

fn transfer_use_case(h: &Harness) -> TransferDomainUseCase {
    TransferDomainUseCase::new(
        h.context.clone(),
        h.registry.clone(),
        h.refresh.clone(),
        "blockchain",
    )
}

// ============================================================================
// Read-only mode
// ============================================================================

#[tokio::test]
async fn test_mutations_without_signer_are_unauthorized() {
    // Arrange
    let h = Harness::new();
    h.ledger.register("example", OWNER).await;

    // Act
    let register = register_use_case(&h).execute("fresh.blockchain").await;
    let upsert = upsert_use_case(&h)
        .execute("example", RecordType::A, "10.0.0.1", 600)
        .await;
    let delete = delete_use_case(&h).execute("example", RecordType::A).await;
    let transfer = transfer_use_case(&h).execute("example", OTHER_OWNER).await;

    // Assert
    assert!(matches!(register, Err(DomainError::Unauthorized(_))));
    assert!(matches!(upsert, Err(DomainError::Unauthorized(_))));
    assert!(matches!(delete, Err(DomainError::Unauthorized(_))));
    assert!(matches!(transfer, Err(DomainError::Unauthorized(_))));
    assert_eq!(h.ledger.write_calls(), 0);

    let log = h.context.log_entries();
    assert_eq!(log.len(), 4);
    assert!(log.iter().all(|e| e.severity == Severity::Error));
    assert!(log[0].message.starts_with("Wallet not connected"));
}

// ============================================================================
// Register
// ============================================================================

#[tokio::test]
async fn test_register_assigns_signer_and_remembers_domain() {
    let h = signing_harness(&[]);

    let receipt = register_use_case(&h)
        .execute("MyDapp.blockchain")
        .await
        .unwrap();

    assert!(receipt.tx_hash.starts_with("0x"));
    assert_eq!(h.ledger.owner_of("mydapp").await.as_deref(), Some(OWNER));
    assert_eq!(h.context.known_domains().await, vec!["mydapp"]);
}

#[tokio::test]
async fn test_register_existing_domain_fails_transaction() {
    let h = signing_harness(&[]);
    h.ledger.register("taken", OTHER_OWNER).await;

    let result = register_use_case(&h).execute("taken").await;

    assert!(matches!(result, Err(DomainError::TransactionFailed(_))));
    assert_eq!(h.ledger.owner_of("taken").await.as_deref(), Some(OTHER_OWNER));
    let last = h.context.log_entries().pop().unwrap();
    assert_eq!(last.severity, Severity::Error);
    assert!(last.message.starts_with("Error registering domain"));
}

#[tokio::test]
async fn test_register_rejects_empty_label() {
    let h = signing_harness(&[]);

    let result = register_use_case(&h).execute(".blockchain").await;

    assert!(matches!(result, Err(DomainError::InvalidDomainName(_))));
    assert_eq!(h.ledger.write_calls(), 0);
}

// ============================================================================
// Records
// ============================================================================

#[tokio::test]
async fn test_upsert_is_visible_to_next_resolve() {
    let h = signing_harness(&[]);
    register_use_case(&h).execute("shop").await.unwrap();

    upsert_use_case(&h)
        .execute("shop.blockchain", RecordType::A, "192.0.2.7", 300)
        .await
        .unwrap();
    let resolution = h.resolve.execute("shop.blockchain").await.unwrap().unwrap();

    assert_eq!(resolution.source, AnswerSource::Registry);
    assert_eq!(resolution.record.value.as_ref(), "192.0.2.7");
    assert_eq!(resolution.record.ttl, 300);
}

#[tokio::test]
async fn test_upsert_refreshes_snapshot() {
    let h = signing_harness(&[]);
    register_use_case(&h).execute("shop").await.unwrap();

    upsert_use_case(&h)
        .execute("shop", RecordType::TXT, "v=spf1 -all", 600)
        .await
        .unwrap();

    let snapshot = h.context.snapshot().await;
    let entry = snapshot.get("shop").expect("refreshed entry");
    assert_eq!(entry.records[0].record.record_type, RecordType::TXT);
}

#[tokio::test]
async fn test_upsert_rejects_empty_value() {
    let h = signing_harness(&[]);
    register_use_case(&h).execute("shop").await.unwrap();
    let writes = h.ledger.write_calls();

    let result = upsert_use_case(&h)
        .execute("shop", RecordType::A, "   ", 600)
        .await;

    assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    assert_eq!(h.ledger.write_calls(), writes);
}

#[tokio::test]
async fn test_upsert_on_unregistered_domain_fails_transaction() {
    let h = signing_harness(&[]);

    let result = upsert_use_case(&h)
        .execute("nowhere", RecordType::A, "10.0.0.1", 600)
        .await;

    assert!(matches!(result, Err(DomainError::TransactionFailed(_))));
}

#[tokio::test]
async fn test_delete_removes_record() {
    let h = signing_harness(&[]);
    register_use_case(&h).execute("shop").await.unwrap();
    upsert_use_case(&h)
        .execute("shop", RecordType::A, "10.0.0.1", 600)
        .await
        .unwrap();
    upsert_use_case(&h)
        .execute("shop", RecordType::MX, "10 mail.shop", 600)
        .await
        .unwrap();

    delete_use_case(&h)
        .execute("shop.blockchain", RecordType::A)
        .await
        .unwrap();

    let resolution = h.resolve.execute("shop.blockchain").await.unwrap().unwrap();
    assert_eq!(resolution.record.record_type, RecordType::MX);
    let snapshot = h.context.snapshot().await;
    assert_eq!(snapshot.get("shop").unwrap().records.len(), 1);
}

#[tokio::test]
async fn test_delete_missing_record_fails_transaction() {
    let h = signing_harness(&[]);
    register_use_case(&h).execute("shop").await.unwrap();

    let result = delete_use_case(&h).execute("shop", RecordType::SRV).await;

    assert!(matches!(result, Err(DomainError::TransactionFailed(_))));
}

// ============================================================================
// Transfer
// ============================================================================

#[tokio::test]
async fn test_transfer_changes_owner() {
    let h = signing_harness(&[]);
    register_use_case(&h).execute("shop").await.unwrap();
    upsert_use_case(&h)
        .execute("shop", RecordType::A, "10.0.0.1", 600)
        .await
        .unwrap();

    transfer_use_case(&h)
        .execute("shop", OTHER_OWNER)
        .await
        .unwrap();

    assert_eq!(h.ledger.owner_of("shop").await.as_deref(), Some(OTHER_OWNER));
    let snapshot = h.context.snapshot().await;
    assert_eq!(snapshot.get("shop").unwrap().owner.as_ref(), OTHER_OWNER);
    let success = h
        .context
        .log_entries()
        .into_iter()
        .find(|e| e.message.starts_with("Domain transferred"))
        .unwrap();
    assert!(success.message.contains("0xabcd...abcd"));
}

#[tokio::test]
async fn test_transfer_requires_new_owner() {
    let h = signing_harness(&[]);
    register_use_case(&h).execute("shop").await.unwrap();

    let result = transfer_use_case(&h).execute("shop", "").await;

    assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    assert_eq!(h.ledger.owner_of("shop").await.as_deref(), Some(OWNER));
}

// ============================================================================
// Connect
// ============================================================================

#[tokio::test]
async fn test_connect_reports_network_and_loads_snapshot() {
    let h = Harness::with_ledger(MockLedger::new(), &["example", "test"]);
    h.ledger
        .add_record("example", "A", "10.0.0.1", 600, h.now_secs())
        .await;
    let connect = ConnectRegistryUseCase::new(h.context.clone(), h.registry.clone(), h.refresh.clone());

    let network = connect.execute().await.unwrap();

    assert_eq!(network.chain_id, 31337);
    assert_eq!(h.context.snapshot().await.len(), 1);
    let messages: Vec<String> = h
        .context
        .log_entries()
        .into_iter()
        .map(|e| e.message)
        .collect();
    assert!(messages.contains(&"Connected to network: testnet (chainId: 31337)".to_string()));
    assert!(messages.contains(&"Read-only mode (no signer configured)".to_string()));
    assert!(messages.contains(&"Ledger connection established!".to_string()));
}

#[tokio::test]
async fn test_connect_with_signer_logs_abbreviated_wallet() {
    let h = signing_harness(&[]);
    let connect = ConnectRegistryUseCase::new(h.context.clone(), h.registry.clone(), h.refresh.clone());

    connect.execute().await.unwrap();

    assert!(h
        .context
        .log_entries()
        .iter()
        .any(|e| e.message == "Wallet connected: 0x1234...5678"));
}

#[tokio::test]
async fn test_connect_fails_when_contract_missing() {
    let h = Harness::with_ledger(MockLedger::new(), &["example"]);
    h.ledger.set_deployed(false);
    let connect = ConnectRegistryUseCase::new(h.context.clone(), h.registry.clone(), h.refresh.clone());

    let result = connect.execute().await;

    assert!(matches!(result, Err(DomainError::RegistryUnreachable(_))));
    assert!(h.ledger.registration_checks().await.is_empty());
    let last = h.context.log_entries().pop().unwrap();
    assert_eq!(last.message, "Contract not found at this address!");
}

#[tokio::test]
async fn test_connect_fails_when_network_unreachable() {
    let h = Harness::new();
    h.ledger.set_unreachable(true);
    let connect = ConnectRegistryUseCase::new(h.context.clone(), h.registry.clone(), h.refresh.clone());

    let result = connect.execute().await;

    assert!(matches!(result, Err(DomainError::RegistryUnreachable(_))));
    assert_eq!(h.context.log_entries().last().unwrap().severity, Severity::Error);
}
