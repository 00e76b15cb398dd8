//! Read a project `.env` file into a key-value map. Applying to the environment happens in `lib`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

fn dotenv_file(override_dir: Option<&Path>) -> Option<PathBuf> {
    let dir = match override_dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir().ok()?,
    };
    let path = dir.join(".env");
    path.is_file().then_some(path)
}

/// Parses one `.env` line. Returns `None` for blanks, comments and lines without `=`.
///
/// Accepts an optional `export ` prefix. Double-quoted values keep `#` and unescape `\"`;
/// single-quoted values are taken literally; unquoted values drop a trailing ` # comment`.
fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, raw) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let raw = raw.trim();
    let value = if let Some(inner) = raw.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
        inner.replace("\\\"", "\"")
    } else if let Some(inner) = raw.strip_prefix('\'').and_then(|r| r.strip_suffix('\'')) {
        inner.to_string()
    } else {
        match raw.find(" #") {
            Some(idx) => raw[..idx].trim_end().to_string(),
            None => raw.to_string(),
        }
    };
    Some((key.to_string(), value))
}

fn parse_dotenv(content: &str) -> HashMap<String, String> {
    content.lines().filter_map(parse_line).collect()
}

/// Missing `.env` yields an empty map.
pub fn load_env_map(override_dir: Option<&Path>) -> std::io::Result<HashMap<String, String>> {
    let Some(path) = dotenv_file(override_dir) else {
        return Ok(HashMap::new());
    };
    Ok(parse_dotenv(&std::fs::read_to_string(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_pairs() {
        let m = parse_dotenv("GEMINI_API_KEY=abc\nONEIR_BIND_ADDR=0.0.0.0:5000\n");
        assert_eq!(m.get("GEMINI_API_KEY").map(String::as_str), Some("abc"));
        assert_eq!(m.get("ONEIR_BIND_ADDR").map(String::as_str), Some("0.0.0.0:5000"));
    }

    #[test]
    fn comments_blanks_and_junk_are_skipped() {
        let m = parse_dotenv("# header\n\nNO_EQUALS\n=orphan\nKEY=val\n");
        assert_eq!(m.len(), 1);
        assert_eq!(m.get("KEY").map(String::as_str), Some("val"));
    }

    #[test]
    fn export_prefix_is_accepted() {
        let m = parse_dotenv("export ONEIR_MAX_SYMBOLS=7");
        assert_eq!(m.get("ONEIR_MAX_SYMBOLS").map(String::as_str), Some("7"));
    }

    #[test]
    fn quoting_rules() {
        let m = parse_dotenv(concat!(
            "A=\"two words # not a comment\"\n",
            "B='raw \\\"kept'\n",
            "C=\"say \\\"hi\\\"\"\n",
            "D=value # trailing comment\n",
            "E=\n",
        ));
        assert_eq!(m["A"], "two words # not a comment");
        assert_eq!(m["B"], "raw \\\"kept");
        assert_eq!(m["C"], "say \"hi\"");
        assert_eq!(m["D"], "value");
        assert_eq!(m["E"], "");
    }

    #[test]
    fn missing_file_gives_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_env_map(Some(dir.path())).unwrap().is_empty());
    }

    #[test]
    fn reads_file_from_override_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "X=1\nY=2\n").unwrap();
        let m = load_env_map(Some(dir.path())).unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m["Y"], "2");
    }
}
