//! Case tables stored as YAML files.
//!
//! A table file is a YAML list. Each row holds the fields of the case value
//! plus optional `name`, `skip` and `only` keys:
//!
//! ```yaml
//! - name: WithdrawingLessThanBalance
//!   initial_balance: 100
//!   withdraw_amount: 50
//!   final_balance: 50
//!   success: true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::case::{Case, CaseTable};
use crate::diagnostics::CaseworkError;

#[derive(Debug, Deserialize)]
struct Row<V> {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    skip: bool,
    #[serde(default)]
    only: bool,
    #[serde(flatten)]
    value: V,
}

/// Finds `.yaml`/`.yml` files under `root`, sorted for a deterministic order.
pub fn discover_tables<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>, CaseworkError> {
    let root = root.as_ref();
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            match e.into_io_error() {
                Some(io) => CaseworkError::io(path, io),
                None => CaseworkError::io(
                    path,
                    std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop"),
                ),
            }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_yaml = entry
            .path()
            .extension()
            .is_some_and(|ext| ext == "yaml" || ext == "yml");
        if is_yaml {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();
    debug!(root = %root.display(), count = files.len(), "discovered case tables");
    Ok(files)
}

/// Parses a table from YAML text. `origin` names the source in errors.
pub fn parse_table<V: DeserializeOwned>(
    text: &str,
    origin: &Path,
) -> Result<CaseTable<V>, CaseworkError> {
    let rows: Vec<Row<V>> = serde_yaml::from_str(text)
        .map_err(|e| CaseworkError::table(origin, "could not parse case rows", e))?;
    Ok(rows
        .into_iter()
        .map(|row| Case {
            name: row.name,
            value: row.value,
            skip: row.skip,
            only: row.only,
        })
        .collect())
}

/// Reads and parses one table file.
pub fn load_table<V: DeserializeOwned>(path: &Path) -> Result<CaseTable<V>, CaseworkError> {
    let text = fs::read_to_string(path).map_err(|e| CaseworkError::io(path, e))?;
    parse_table(&text, path)
}

/// Suite name for a table file: its file stem.
pub fn suite_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toys::bank::AccountState;

    #[test]
    fn rows_keep_order_names_and_flags() {
        let yaml = r#"
- name: First
  initial_balance: 100
  withdraw_amount: 50
  final_balance: 50
  success: true
- initial_balance: 100
  withdraw_amount: 200
  final_balance: 100
  success: false
  skip: true
"#;
        let table: CaseTable<AccountState> = parse_table(yaml, Path::new("inline.yaml")).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.effective_names(), vec!["First", "case_1"]);
        assert!(table.get(1).unwrap().skip);
        assert_eq!(table.get(0).unwrap().value, AccountState::new(100, 50, 50, true));
    }

    #[test]
    fn malformed_rows_are_table_errors() {
        let err = parse_table::<AccountState>("- initial_balance: lots", Path::new("bad.yaml"))
            .unwrap_err();
        assert_eq!(err.error_type(), crate::ErrorType::Table);
        assert!(err.to_string().contains("bad.yaml"));
    }

    #[test]
    fn missing_paths_are_io_errors() {
        let missing = std::env::temp_dir().join(format!("casework-missing-{}", std::process::id()));
        let err = discover_tables(&missing).unwrap_err();
        assert_eq!(err.error_type(), crate::ErrorType::Io);

        let err = load_table::<AccountState>(&missing.join("withdraw.yaml")).unwrap_err();
        assert_eq!(err.error_type(), crate::ErrorType::Io);
        assert!(err.to_string().contains("withdraw.yaml"));
    }

    #[test]
    fn suite_name_is_file_stem() {
        assert_eq!(suite_name(Path::new("tests/cases/withdraw.yaml")), "withdraw");
    }
}
