use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value, table_options()),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T, options: table::TableOptions) -> anyhow::Result<String> {
    match serde_json::to_value(value)? {
        Value::Array(items) => Ok(render_rows(&items, options)),
        Value::Object(map) => {
            let rows = flatten_object(&map)
                .into_iter()
                .map(|(key, value)| vec![key, value])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&["field", "value"], &rows, options))
        }
        scalar => Ok(table::render_entity_table(
            &["value"],
            &[vec![value_to_cell(&scalar)]],
            options,
        )),
    }
}

/// One row per item. Nested objects (a joined course, its teacher) become
/// dotted columns, so `EnrollmentWithCourse` reads as `course.name` etc.
fn render_rows(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&["value"], &rows, options);
    }

    let flattened = items
        .iter()
        .filter_map(Value::as_object)
        .map(flatten_object)
        .collect::<Vec<_>>();

    let mut headers = Vec::<String>::new();
    for row in &flattened {
        for (key, _) in row {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = flattened
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|header| {
                    row.iter()
                        .find(|(key, _)| key == header)
                        .map_or_else(|| String::from("-"), |(_, cell)| cell.clone())
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, options)
}

fn flatten_object(map: &serde_json::Map<String, Value>) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for (key, value) in map {
        match value {
            Value::Object(inner) => {
                for (inner_key, cell) in flatten_object(inner) {
                    out.push((format!("{key}.{inner_key}"), cell));
                }
            }
            other => out.push((key.clone(), value_to_cell(other))),
        }
    }
    out
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;
    use serde_json::json;

    use super::table::TableOptions;
    use super::{render, render_table};
    use crate::cli::OutputFormat;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[derive(Serialize)]
    struct Row {
        id: &'static str,
        ects: f32,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Row { id: "crs-1", ects: 5.0 };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "crs-1");
        assert_eq!(parsed["ects"], 5.0);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = vec![Row { id: "crs-1", ects: 5.0 }, Row { id: "crs-2", ects: 3.0 }];
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn object_renders_as_field_value_pairs() {
        let out = render_table(&Row { id: "crs-1", ects: 5.0 }, PLAIN).expect("table");
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("field"));
        assert!(lines.iter().any(|line| line.starts_with("id") && line.contains("crs-1")));
    }

    #[test]
    fn nested_objects_become_dotted_columns() {
        let rows = json!([
            {
                "enrollment": { "course_id": "crs-1", "score": 14.5 },
                "course": { "name": "Logic", "teacher_id": null }
            }
        ]);
        let out = render_table(&rows, PLAIN).expect("table");
        let header = out.lines().next().expect("header line");
        assert!(header.contains("enrollment.course_id"));
        assert!(header.contains("course.name"));
        assert!(out.contains("Logic"));
        assert!(out.contains("14.5"));
    }

    #[test]
    fn empty_list_has_placeholder() {
        let out = render_table(&Vec::<Row>::new(), PLAIN).expect("table");
        assert_eq!(out, "(no rows)");
    }

    #[test]
    fn scalar_list_renders_single_column() {
        let out = render_table(&vec!["A1", "B2"], PLAIN).expect("table");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("value"));
        assert!(lines[3].starts_with("B2"));
    }
}
