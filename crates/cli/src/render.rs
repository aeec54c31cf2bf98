//! Plain-text views printed by the CLI.

use ledger_dns_application::use_cases::Resolution;
use ledger_dns_domain::{abbreviate_identity, CounterSnapshot, Freshness, LogEntry, RegistrySnapshot};
use std::fmt::Write;

pub fn resolution(input: &str, resolution: Option<&Resolution>) -> String {
    let Some(r) = resolution else {
        return format!("{input}: no match");
    };

    let mut line = format!(
        "{input}: {} {} [{}]",
        r.record.record_type, r.record.value, r.source
    );
    if let Some(freshness) = &r.freshness {
        let _ = write!(line, " {}", freshness_label(freshness));
    }
    if let Some(owner) = &r.owner {
        let _ = write!(line, " owner {}", abbreviate_identity(owner));
    }
    let _ = write!(line, " ({:.3}s)", r.latency.as_secs_f64());
    line
}

pub fn counters(counters: &CounterSnapshot, cached_names: usize) -> String {
    format!(
        "queries:           {}\n\
         blockchain hits:   {}\n\
         recursive queries: {}\n\
         cache hits:        {}\n\
         cached names:      {}",
        counters.queries,
        counters.blockchain_hits,
        counters.recursive_queries,
        counters.cache_hits,
        cached_names
    )
}

pub fn log(entries: &[LogEntry]) -> String {
    if entries.is_empty() {
        return "(log is empty)".to_string();
    }
    entries
        .iter()
        .map(|e| format!("[{}] {:<7} {}", e.timestamp, e.severity.as_str(), e.message))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn snapshot(snapshot: &RegistrySnapshot, ledger_suffix: &str) -> String {
    if snapshot.is_empty() {
        return "(no registry records loaded)".to_string();
    }

    let mut out = String::new();
    for (domain, entry) in snapshot.iter() {
        let _ = writeln!(
            out,
            "{domain}.{ledger_suffix}  owner {}",
            entry.owner_display()
        );
        for fresh in &entry.records {
            let _ = writeln!(
                out,
                "  {:<5} {}  ttl {}  {}",
                fresh.record.record_type.as_str(),
                fresh.record.value,
                fresh.record.ttl,
                freshness_label(&fresh.freshness)
            );
        }
    }
    out.trim_end().to_string()
}

fn freshness_label(freshness: &Freshness) -> String {
    if freshness.expired {
        "(EXPIRED)".to_string()
    } else {
        format!("({}s left)", freshness.remaining)
    }
}
