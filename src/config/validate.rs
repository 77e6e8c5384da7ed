//! Configuration validation with unknown field detection.

use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

/// Known top-level config field names.
const KNOWN_TOP_LEVEL: &[&str] = &["server", "logging", "runtime", "compose"];

/// Known fields for each section.
const KNOWN_SERVER: &[&str] = &["host", "port"];
const KNOWN_LOGGING: &[&str] = &["format", "level", "file"];
const KNOWN_RUNTIME: &[&str] = &["runtime_type", "docker"];
const KNOWN_COMPOSE: &[&str] = &["env_file", "brokers"];

/// A validation diagnostic.
#[derive(Debug)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub path: String,
    pub message: String,
}

#[derive(Debug, PartialEq)]
pub enum DiagnosticLevel {
    Ok,
    Warn,
    Error,
}

impl Diagnostic {
    fn new(level: DiagnosticLevel, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.level {
            DiagnosticLevel::Ok => "[OK]",
            DiagnosticLevel::Warn => "[WARN]",
            DiagnosticLevel::Error => "[ERROR]",
        };
        if self.path.is_empty() {
            write!(f, "{} {}", prefix, self.message)
        } else {
            write!(f, "{} {}: {}", prefix, self.path, self.message)
        }
    }
}

/// Simple Levenshtein distance for "did you mean?" suggestions.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut matrix = vec![vec![0usize; b.len() + 1]; a.len() + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, val) in matrix[0].iter_mut().enumerate() {
        *val = j;
    }

    for (i, ca) in a.iter().enumerate() {
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            matrix[i + 1][j + 1] = std::cmp::min(
                std::cmp::min(matrix[i][j + 1] + 1, matrix[i + 1][j] + 1),
                matrix[i][j] + cost,
            );
        }
    }
    matrix[a.len()][b.len()]
}

/// Suggest the closest known field name (if distance <= 3).
pub fn suggest_field(unknown: &str, known: &[&str]) -> Option<String> {
    known
        .iter()
        .map(|k| (k, levenshtein(unknown, k)))
        .filter(|(_, d)| *d <= 3)
        .min_by_key(|(_, d)| *d)
        .map(|(k, _)| format!("did you mean '{}'?", k))
}

/// Push an error for every key of `obj` not in `known`. Returns true if any.
fn check_keys(
    obj: &serde_json::Map<String, Value>,
    known: &[&str],
    prefix: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> bool {
    let known_set: HashSet<&str> = known.iter().copied().collect();
    let mut has_unknown = false;
    for key in obj.keys() {
        if known_set.contains(key.as_str()) {
            continue;
        }
        has_unknown = true;
        let msg = match suggest_field(key, known) {
            Some(suggestion) => format!("Unknown field '{}', {}", key, suggestion),
            None => format!("Unknown field '{}'", key),
        };
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        diagnostics.push(Diagnostic::new(DiagnosticLevel::Error, path, msg));
    }
    has_unknown
}

/// Validate a raw JSON config value.
///
/// Deployment file paths are resolved against `base_dir` to warn about
/// files that do not exist; the registry would refuse to start with them.
pub fn validate_config(raw: &Value, base_dir: &Path) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let obj = match raw.as_object() {
        Some(o) => o,
        None => {
            diagnostics.push(Diagnostic::new(
                DiagnosticLevel::Error,
                "",
                "Config must be a JSON object",
            ));
            return diagnostics;
        }
    };

    diagnostics.push(Diagnostic::new(DiagnosticLevel::Ok, "", "Valid JSON"));

    let mut has_unknown = check_keys(obj, KNOWN_TOP_LEVEL, "", &mut diagnostics);
    for (section, known) in [
        ("server", KNOWN_SERVER),
        ("logging", KNOWN_LOGGING),
        ("runtime", KNOWN_RUNTIME),
        ("compose", KNOWN_COMPOSE),
    ] {
        if let Some(section_obj) = obj.get(section).and_then(|v| v.as_object()) {
            has_unknown |= check_keys(section_obj, known, section, &mut diagnostics);
        }
    }

    if !has_unknown {
        diagnostics.push(Diagnostic::new(
            DiagnosticLevel::Ok,
            "",
            "All fields recognized",
        ));
    }

    if obj
        .get("server")
        .and_then(|s| s.get("port"))
        .and_then(|p| p.as_u64())
        == Some(0)
    {
        diagnostics.push(Diagnostic::new(
            DiagnosticLevel::Error,
            "server.port",
            "Port 0 is not a usable listen port",
        ));
    }

    if let Some(logging) = obj.get("logging").and_then(|l| l.as_object()) {
        let format = logging.get("format").and_then(|f| f.as_str()).unwrap_or("component");
        if logging.get("file").is_some_and(|f| !f.is_null()) && format != "json" {
            diagnostics.push(Diagnostic::new(
                DiagnosticLevel::Warn,
                "logging.file",
                format!("Ignored with format '{}'; only 'json' writes to a file", format),
            ));
        }
    }

    if let Some(brokers) = obj
        .get("compose")
        .and_then(|c| c.get("brokers"))
        .and_then(|b| b.as_object())
    {
        let mut deployable = 0;
        for (name, files) in brokers {
            let Some(files) = files.as_array() else {
                diagnostics.push(Diagnostic::new(
                    DiagnosticLevel::Error,
                    format!("compose.brokers.{}", name),
                    "Expected a list of deployment file paths",
                ));
                continue;
            };
            if !files.is_empty() {
                deployable += 1;
            }
            for file in files.iter().filter_map(|f| f.as_str()) {
                if !base_dir.join(file).exists() {
                    diagnostics.push(Diagnostic::new(
                        DiagnosticLevel::Warn,
                        format!("compose.brokers.{}", name),
                        format!("Deployment file '{}' not found", file),
                    ));
                }
            }
        }
        if deployable == 0 {
            diagnostics.push(Diagnostic::new(
                DiagnosticLevel::Warn,
                "compose.brokers",
                "No broker has deployment files; every initialize will be rejected",
            ));
        }
    }

    diagnostics
}
