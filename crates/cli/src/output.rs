use colored::Colorize;
use etheroll_common::utils::io::file::write_file;
use serde_json::Value;

use crate::error::Error;

/// Emits a command result. `print` calls `display`, `json` prints the JSON to stdout, and
/// anything else is taken as a path the JSON is written to.
pub(crate) fn emit(output: &str, json: &Value, display: impl FnOnce()) -> Result<(), Error> {
    match output {
        "print" => display(),
        "json" => println!("{}", serde_json::to_string_pretty(json)?),
        path => {
            write_file(path, &serde_json::to_string_pretty(json)?)
                .map_err(|e| Error::Generic(format!("failed to write '{path}': {e}")))?;
            println!("wrote {}", path.bold());
        }
    }

    Ok(())
}

/// Prints a dimmed summary line under a printed result.
pub(crate) fn print_summary(summary: &str) {
    println!("\n{}", summary.dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;
    use etheroll_common::utils::io::file::{delete_path, read_file};
    use serde_json::json;

    #[test]
    fn test_emit_print_calls_display() {
        let mut displayed = false;
        emit("print", &json!({}), || displayed = true).expect("failed to emit");

        assert!(displayed);
    }

    #[test]
    fn test_emit_json_skips_display() {
        let mut displayed = false;
        emit("json", &json!({ "bets": [] }), || displayed = true).expect("failed to emit");

        assert!(!displayed);
    }

    #[test]
    fn test_emit_writes_file() {
        let dir = std::env::temp_dir().join("etheroll-cli-output-test");
        let path = dir.join("merged.json");
        let path = path.to_str().expect("utf-8 path");

        let value = json!([{ "bet_log": { "roll_under": 14 }, "bet_result": null }]);
        emit(path, &value, || {}).expect("failed to emit");

        let written: Value =
            serde_json::from_str(&read_file(path).expect("failed to read")).expect("valid json");
        assert_eq!(written, value);

        delete_path(dir.to_str().expect("utf-8 path")).expect("failed to clean up");
    }
}
