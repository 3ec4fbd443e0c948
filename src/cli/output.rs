//! Shared text and JSON rendering for CLI reports.

use bi4::error::Bi4Error;
use serde::Serialize;
use serde_json::json;

#[cfg(feature = "colorized_output")]
use console::style;

/// Section heading, underlined
pub fn heading(title: &str) -> String {
    let rule = "=".repeat(title.len());

    #[cfg(feature = "colorized_output")]
    {
        format!("{}\n{}", style(title).bold().cyan(), style(rule).cyan())
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        format!("{}\n{}", title, rule)
    }
}

/// An error shown inline next to a per-file result
pub fn inline_error(err: &Bi4Error) -> String {
    #[cfg(feature = "colorized_output")]
    {
        format!("{}", style(format!("error: {}", err)).red())
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        format!("error: {}", err)
    }
}

/// A value that is absent from this file version
pub fn unavailable() -> String {
    #[cfg(feature = "colorized_output")]
    {
        format!("{}", style("n/a").dim())
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        "n/a".to_string()
    }
}

/// JSON for a per-file result: the value, or `{"error": ...}`
pub fn result_json<T: Serialize>(result: &Result<T, Bi4Error>) -> serde_json::Value {
    match result {
        Ok(value) => json!(value),
        Err(e) => json!({ "error": e.to_string() }),
    }
}

/// Print `value` as pretty JSON on stdout
pub fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
