use crate::di::Services;
use crate::render;
use ledger_dns_domain::RecordType;
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

pub const HELP: &str = "\
commands:
  query <domain>                       resolve a domain
  refresh                              reload the registry snapshot
  register <domain>                    register a ledger domain
  set <domain> <type> <value> <ttl>    create or update a record
  delete <domain> <type>               delete a record
  transfer <domain> <owner>            transfer a domain
  stats                                show counters
  log                                  show the activity log
  snapshot                             show the registry snapshot
  help                                 show this help
  quit                                 exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Empty,
    Query(String),
    Refresh,
    Register(String),
    Set {
        domain: String,
        record_type: RecordType,
        value: String,
        ttl: u64,
    },
    Delete {
        domain: String,
        record_type: RecordType,
    },
    Transfer {
        domain: String,
        new_owner: String,
    },
    Stats,
    Log,
    Snapshot,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("{0}")]
    InvalidRecordType(String),

    #[error("ttl must be a whole number of seconds, got '{0}'")]
    InvalidTtl(String),
}

impl FromStr for ConsoleCommand {
    type Err = ConsoleError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((command, args)) = tokens.split_first() else {
            return Ok(ConsoleCommand::Empty);
        };

        match (command.to_ascii_lowercase().as_str(), args) {
            ("query" | "q", [domain]) => Ok(ConsoleCommand::Query(domain.to_string())),
            ("query" | "q", _) => Err(ConsoleError::Usage("query <domain>")),
            ("refresh", []) => Ok(ConsoleCommand::Refresh),
            ("register", [domain]) => Ok(ConsoleCommand::Register(domain.to_string())),
            ("register", _) => Err(ConsoleError::Usage("register <domain>")),
            // Values may contain spaces (MX, TXT); the ttl is always last.
            ("set", [domain, record_type, value @ .., ttl]) if !value.is_empty() => {
                Ok(ConsoleCommand::Set {
                    domain: domain.to_string(),
                    record_type: parse_record_type(record_type)?,
                    value: value.join(" "),
                    ttl: ttl
                        .parse()
                        .map_err(|_| ConsoleError::InvalidTtl(ttl.to_string()))?,
                })
            }
            ("set", _) => Err(ConsoleError::Usage("set <domain> <type> <value> <ttl>")),
            ("delete", [domain, record_type]) => Ok(ConsoleCommand::Delete {
                domain: domain.to_string(),
                record_type: parse_record_type(record_type)?,
            }),
            ("delete", _) => Err(ConsoleError::Usage("delete <domain> <type>")),
            ("transfer", [domain, new_owner]) => Ok(ConsoleCommand::Transfer {
                domain: domain.to_string(),
                new_owner: new_owner.to_string(),
            }),
            ("transfer", _) => Err(ConsoleError::Usage("transfer <domain> <owner>")),
            ("stats", []) => Ok(ConsoleCommand::Stats),
            ("log", []) => Ok(ConsoleCommand::Log),
            ("snapshot", []) => Ok(ConsoleCommand::Snapshot),
            ("help" | "?", _) => Ok(ConsoleCommand::Help),
            ("quit" | "exit", _) => Ok(ConsoleCommand::Quit),
            (other, _) => Err(ConsoleError::UnknownCommand(other.to_string())),
        }
    }
}

fn parse_record_type(s: &str) -> Result<RecordType, ConsoleError> {
    RecordType::from_str(s).map_err(|e| ConsoleError::InvalidRecordType(e.to_string()))
}

/// Runs one command and returns what to print.
pub async fn dispatch(services: &Services, command: ConsoleCommand) -> String {
    match command {
        ConsoleCommand::Empty | ConsoleCommand::Quit => String::new(),
        ConsoleCommand::Help => HELP.to_string(),
        ConsoleCommand::Query(domain) => match services.resolve.execute(&domain).await {
            Ok(resolution) => render::resolution(&domain, resolution.as_ref()),
            Err(e) => format!("error: {e}"),
        },
        ConsoleCommand::Refresh => {
            let snapshot = services.refresh.execute().await;
            format!("loaded {} domain(s)", snapshot.len())
        }
        ConsoleCommand::Register(domain) => {
            tx_outcome(services.register.execute(&domain).await)
        }
        ConsoleCommand::Set {
            domain,
            record_type,
            value,
            ttl,
        } => tx_outcome(
            services
                .upsert
                .execute(&domain, record_type, &value, ttl)
                .await,
        ),
        ConsoleCommand::Delete {
            domain,
            record_type,
        } => tx_outcome(services.delete.execute(&domain, record_type).await),
        ConsoleCommand::Transfer { domain, new_owner } => {
            tx_outcome(services.transfer.execute(&domain, &new_owner).await)
        }
        ConsoleCommand::Stats => {
            render::counters(&services.context.counters(), services.context.cache_len())
        }
        ConsoleCommand::Log => render::log(&services.context.log_entries()),
        ConsoleCommand::Snapshot => render::snapshot(
            &services.context.snapshot().await,
            services.resolve.ledger_suffix(),
        ),
    }
}

fn tx_outcome<E: std::fmt::Display>(
    result: Result<ledger_dns_application::ports::TxReceipt, E>,
) -> String {
    match result {
        Ok(receipt) => format!("confirmed: {}", receipt.tx_hash),
        Err(e) => format!("error: {e}"),
    }
}

/// Reads commands from stdin until EOF, `quit`, Ctrl-C or `shutdown`.
pub async fn run(services: &Services, shutdown: CancellationToken) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("Type 'help' for commands.");

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = shutdown.cancelled() => break,
            line = lines.next_line() => line?,
        };
        let Some(line) = line else { break };

        match line.parse::<ConsoleCommand>() {
            Ok(ConsoleCommand::Quit) => break,
            Ok(ConsoleCommand::Empty) => continue,
            Ok(command) => println!("{}", dispatch(services, command).await),
            Err(e) => println!("{e}"),
        }
    }

    println!();
    shutdown.cancel();
    Ok(())
}
