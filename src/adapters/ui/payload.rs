//! Loading feature payloads from files or stdin.

use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Read a JSON payload from `path`, or from stdin when `path` is `None` or `-`.
pub fn read_payload(path: Option<&str>) -> anyhow::Result<Value> {
    let (source, text) = match path {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| anyhow::anyhow!("read stdin: {}", e))?;
            ("stdin".to_string(), buf)
        }
        Some(p) => {
            let text = std::fs::read_to_string(Path::new(p))
                .map_err(|e| anyhow::anyhow!("read {}: {}", p, e))?;
            (p.to_string(), text)
        }
    };
    parse_payload(&source, &text)
}

/// Parse payload text. Blank input is an empty object.
pub fn parse_payload(source: &str, text: &str) -> anyhow::Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_str(text).map_err(|e| anyhow::anyhow!("{} is not valid JSON: {}", source, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_payload() {
        assert_eq!(
            parse_payload("inline", r#"{"location": "Lisbon"}"#).unwrap(),
            json!({"location": "Lisbon"})
        );
        assert_eq!(parse_payload("inline", "  \n").unwrap(), json!({}));
        let err = parse_payload("events.json", "{oops").unwrap_err();
        assert!(err.to_string().contains("events.json"));
    }

    #[test]
    fn test_read_payload_from_file() {
        let path = std::env::temp_dir().join(format!("nomad-intel-payload-{}.json", std::process::id()));
        std::fs::write(&path, r#"[{"title": "Client call"}]"#).unwrap();

        let value = read_payload(path.to_str()).unwrap();
        assert_eq!(value, json!([{"title": "Client call"}]));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_read_payload_missing_file() {
        assert!(read_payload(Some("/definitely/not/here.json")).is_err());
    }
}
