//! Recipient file adapter.
//!
//! Recipient lists arrive as a JSON array of `{ "address": ..., "amount": ... }`
//! objects with amounts as decimal strings or integers. This is a thin
//! replaceable adapter; the engine revalidates every entry.

use anyhow::Context;
use std::fs;
use std::path::Path;

use payrun_types::Recipient;

pub fn load_recipients(path: &Path) -> anyhow::Result<Vec<Recipient>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("cannot read recipients file {}", path.display()))?;
    let recipients: Vec<Recipient> = serde_json::from_str(&contents)
        .with_context(|| format!("invalid recipients file {}", path.display()))?;
    Ok(recipients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use payrun_types::TokenAmount;
    use std::io::Write;

    #[test]
    fn loads_json_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"address": "cosmos1abc", "amount": 25}},
                {{"address": "cosmos1def", "amount": "170141183460469231731687303715884105728"}}]"#
        )
        .unwrap();

        let recipients = load_recipients(file.path()).unwrap();
        assert_eq!(recipients.len(), 2);
        assert_eq!(recipients[0].amount, TokenAmount::new(25));
        assert_eq!(recipients[1].amount, TokenAmount::new(1u128 << 127));
    }

    #[test]
    fn rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "address,amount").unwrap();
        assert!(load_recipients(file.path()).is_err());
    }
}
