use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "variant": { "type": "string", "enum": ["summary", "charted"] },
            "input": {
                "type": "object",
                "properties": {
                    "path": { "type": "string", "minLength": 1 }
                },
                "additionalProperties": false
            },
            "output": {
                "type": "object",
                "properties": {
                    "markdown": { "type": "string", "minLength": 1 },
                    "chart_dir": { "type": "string" }
                },
                "additionalProperties": false
            },
            "options": {
                "type": "object",
                "properties": {
                    "include_charts": { "type": "boolean" },
                    "mean_excludes_zero_scores": { "type": "boolean" },
                    "missing_input_is_fatal": { "type": "boolean" },
                    "include_full_table": { "type": "boolean" }
                },
                "additionalProperties": false
            },
            "charts": {
                "type": "object",
                "properties": {
                    "external": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "required": ["title", "path"],
                            "properties": {
                                "title": { "type": "string" },
                                "path": { "type": "string", "minLength": 1 }
                            }
                        }
                    }
                }
            },
            "links": {
                "type": "object",
                "properties": {
                    "lookup_url_template": { "type": "string", "pattern": "\\{cve\\}" },
                    "lookup_label": { "type": "string", "minLength": 1 }
                }
            }
        },
        "additionalProperties": false
    })
});
