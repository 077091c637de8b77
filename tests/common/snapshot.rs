use assert_fs::TempDir;
use assert_fs::fixture::{FileWriteStr, PathChild};
use serde_json::{Value, json};

/// A snapshot whose body holds one paragraph per text; paragraph `i` has id
/// `10 + i` and its text node id `20 + i`
pub fn page(texts: &[&str]) -> Value {
    let paragraphs: Vec<Value> = texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            json!({
                "nodeId": 10 + i, "nodeType": 1, "nodeName": "P", "attributes": [],
                "children": [{ "nodeId": 20 + i, "nodeType": 3, "nodeName": "#text", "nodeValue": text }]
            })
        })
        .collect();

    json!({
        "root": {
            "nodeId": 1, "nodeType": 9, "nodeName": "#document",
            "children": [
                { "nodeId": 2, "nodeType": 1, "nodeName": "BODY", "attributes": [], "children": paragraphs }
            ]
        }
    })
}

/// Writes `page(texts)` as `name` and returns the file name
pub fn write_page(dir: &TempDir, name: &str, texts: &[&str]) -> String {
    dir.child(name)
        .write_str(&page(texts).to_string())
        .expect("Failed to write snapshot");
    name.to_string()
}
