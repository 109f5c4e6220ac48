//! Fixture generators for reference files and tsconfig documents.

use serde_json::{Map, Value};

/// Build a reference file with `before` and `after` sections around a
/// signature-delimited `unordered` section.
pub fn reference_file(before: &[&str], unordered: &[&str], after: &[&str]) -> String {
    let mut lines = Vec::new();
    let reference = |path: &&str| format!("/// <reference path=\"{}\" />", path);

    lines.extend(before.iter().map(reference));
    lines.push("//grunt-start".to_string());
    lines.extend(unordered.iter().map(reference));
    lines.push("//grunt-end".to_string());
    lines.extend(after.iter().map(reference));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Build a tsconfig.json with the given `files` and string compiler options.
pub fn tsconfig_json(files: &[&str], options: &[(&str, &str)]) -> String {
    let mut compiler_options = Map::new();
    for (name, value) in options {
        compiler_options.insert(name.to_string(), Value::String(value.to_string()));
    }

    let mut doc = Map::new();
    doc.insert(
        "compilerOptions".to_string(),
        Value::Object(compiler_options),
    );
    doc.insert(
        "files".to_string(),
        Value::Array(files.iter().map(|f| Value::String(f.to_string())).collect()),
    );

    Value::Object(doc).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_file_layout() {
        let text = reference_file(&["a.ts"], &["b.ts"], &[]);
        assert_eq!(
            text,
            "/// <reference path=\"a.ts\" />\n//grunt-start\n/// <reference path=\"b.ts\" />\n//grunt-end\n"
        );
    }

    #[test]
    fn test_tsconfig_json_parses() {
        let text = tsconfig_json(&["x.ts"], &[("target", "es5")]);
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["files"][0], "x.ts");
        assert_eq!(value["compilerOptions"]["target"], "es5");
    }
}
