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
        Value::Array(items) => Ok(render_array_table(&items, options)),
        Value::Object(map) => {
            let headers = ["field", "value"];
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, options))
        }
        scalar => Ok(table::render_entity_table(
            &["value"],
            &[vec![value_to_cell(&scalar)]],
            options,
        )),
    }
}

/// One column per key, in first-seen order across the rows.
fn render_array_table(items: &[Value], options: table::TableOptions) -> String {
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

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| {
                    map.get(header)
                        .map_or_else(|| String::from("-"), value_to_cell)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, options)
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
    use serde::Serialize;

    use super::{render, render_table, table::TableOptions};
    use crate::cli::OutputFormat;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[derive(Serialize)]
    struct Row {
        code: &'static str,
        status: &'static str,
        assigned_technician: &'static str,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Row {
            code: "inc-1",
            status: "pending",
            assigned_technician: "T1",
        };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["code"], "inc-1");
        assert_eq!(parsed["assigned_technician"], "T1");
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let rows = vec![
            Row {
                code: "inc-1",
                status: "pending",
                assigned_technician: "T1",
            },
            Row {
                code: "inc-2",
                status: "unattended",
                assigned_technician: "",
            },
        ];
        let out = render(&rows, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn array_table_has_one_column_per_field() {
        let rows = vec![Row {
            code: "inc-1",
            status: "pending",
            assigned_technician: "T1",
        }];
        let out = render_table(&rows, PLAIN).expect("table render should work");
        let header = out.lines().next().unwrap();
        for column in ["code", "status", "assigned_technician"] {
            assert!(header.contains(column), "missing {column} in {header}");
        }
        assert!(out.lines().nth(2).unwrap().contains("inc-1"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let rows: Vec<Row> = Vec::new();
        assert_eq!(render_table(&rows, PLAIN).unwrap(), "(no rows)");
    }

    #[test]
    fn object_table_is_field_value_pairs() {
        let value = Row {
            code: "inc-1",
            status: "solved",
            assigned_technician: "T1",
        };
        let out = render_table(&value, PLAIN).unwrap();
        assert!(out.lines().next().is_some_and(|line| line.contains("field")));
        assert!(out.contains("solved"));
    }
}
