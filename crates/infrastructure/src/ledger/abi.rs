//! Minimal contract ABI codec for the registry's read methods.
//!
//! Covers exactly what the registry needs: calls whose arguments are all
//! `string`, and `bool`, `address` and the record tuple
//! `(string, string, uint256, uint256, bool)` as return values.

use ledger_dns_application::ports::{LedgerError, LedgerRecord};

const WORD: usize = 32;

/// `isDomainRegistered(string)`
pub const IS_DOMAIN_REGISTERED: [u8; 4] = [0x1c, 0x45, 0x27, 0x81];
/// `getDomainOwner(string)`
pub const GET_DOMAIN_OWNER: [u8; 4] = [0x25, 0x97, 0x01, 0x15];
/// `getRecord(string,string)`
pub const GET_RECORD: [u8; 4] = [0x8a, 0x53, 0xdd, 0xb9];

/// Encodes `selector` followed by the given string arguments.
pub fn encode_string_call(selector: [u8; 4], args: &[&str]) -> Vec<u8> {
    let head_len = args.len() * WORD;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for arg in args {
        head.extend_from_slice(&uint_word((head_len + tail.len()) as u64));
        tail.extend_from_slice(&uint_word(arg.len() as u64));
        tail.extend_from_slice(arg.as_bytes());
        tail.resize(tail.len().next_multiple_of(WORD), 0);
    }

    let mut out = Vec::with_capacity(4 + head.len() + tail.len());
    out.extend_from_slice(&selector);
    out.extend_from_slice(&head);
    out.extend_from_slice(&tail);
    out
}

/// `0x`-prefixed hex, as JSON-RPC expects.
pub fn to_hex(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

pub fn from_hex(s: &str) -> Result<Vec<u8>, LedgerError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(digits).map_err(|e| LedgerError::Decode(format!("bad hex: {e}")))
}

pub fn decode_bool(data: &[u8]) -> Result<bool, LedgerError> {
    let word = read_word(data, 0)?;
    match word_to_u64(word) {
        Some(0) => Ok(false),
        Some(1) => Ok(true),
        _ => Err(LedgerError::Decode("bool out of range".to_string())),
    }
}

pub fn decode_address(data: &[u8]) -> Result<String, LedgerError> {
    let word = read_word(data, 0)?;
    if word[..12].iter().any(|b| *b != 0) {
        return Err(LedgerError::Decode("address has dirty high bytes".to_string()));
    }
    Ok(to_hex(&word[12..]))
}

/// Decodes the single dynamic tuple returned by `getRecord`.
pub fn decode_record(data: &[u8]) -> Result<LedgerRecord, LedgerError> {
    let base = read_offset(data, 0)?;

    // String offsets are relative to the start of the tuple.
    let record_type = read_string(data, base + read_offset(data, base)?)?;
    let value = read_string(data, base + read_offset(data, base + WORD)?)?;
    let ttl = saturating_u64(read_word(data, base + 2 * WORD)?);
    let last_updated = saturating_u64(read_word(data, base + 3 * WORD)?);
    let exists = match word_to_u64(read_word(data, base + 4 * WORD)?) {
        Some(0) => false,
        Some(1) => true,
        _ => return Err(LedgerError::Decode("bool out of range".to_string())),
    };

    Ok(LedgerRecord {
        record_type,
        value,
        ttl,
        last_updated,
        exists,
    })
}

fn uint_word(value: u64) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 8..].copy_from_slice(&value.to_be_bytes());
    word
}

fn read_word(data: &[u8], at: usize) -> Result<&[u8], LedgerError> {
    data.get(at..at + WORD)
        .ok_or_else(|| LedgerError::Decode(format!("short return data at byte {at}")))
}

fn word_to_u64(word: &[u8]) -> Option<u64> {
    if word[..WORD - 8].iter().any(|b| *b != 0) {
        return None;
    }
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&word[WORD - 8..]);
    Some(u64::from_be_bytes(bytes))
}

fn saturating_u64(word: &[u8]) -> u64 {
    word_to_u64(word).unwrap_or(u64::MAX)
}

fn read_offset(data: &[u8], at: usize) -> Result<usize, LedgerError> {
    let offset = word_to_u64(read_word(data, at)?)
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| LedgerError::Decode("offset out of range".to_string()))?;
    if offset > data.len() {
        return Err(LedgerError::Decode(format!("offset {offset} past end")));
    }
    Ok(offset)
}

fn read_string(data: &[u8], at: usize) -> Result<String, LedgerError> {
    let len = read_offset(data, at)?;
    let start = at + WORD;
    let bytes = data
        .get(start..start + len)
        .ok_or_else(|| LedgerError::Decode("string runs past end".to_string()))?;
    String::from_utf8(bytes.to_vec()).map_err(|e| LedgerError::Decode(e.to_string()))
}
