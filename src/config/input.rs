use crate::utils::error::{MailerError, Result};
use serde_json::{Map, Value};
use std::io::{IsTerminal, Read};
use std::path::Path;

/// Template text from `file`, else from a piped stdin (trimmed), else empty.
pub fn read_template_data(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => read_template_file(path),
        None => {
            let stdin = std::io::stdin();
            if stdin.is_terminal() {
                return Ok(String::new());
            }
            read_template_from(stdin.lock())
        }
    }
}

pub fn read_template_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(MailerError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

pub fn read_template_from<R: Read>(mut reader: R) -> Result<String> {
    let mut data = String::new();
    reader.read_to_string(&mut data)?;
    Ok(data.trim().to_string())
}

/// `--vars` must be a JSON object.
pub fn parse_vars(raw: Option<&str>) -> Result<Option<Map<String, Value>>> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(vars)) => Ok(Some(vars)),
        Ok(other) => Err(MailerError::validation(format!(
            "Invalid vars JSON: expected an object, got {}",
            other
        ))),
        Err(e) => Err(MailerError::validation(format!("Invalid vars JSON: {}", e))),
    }
}
