use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(render_table(serde_json::to_value(value)?)),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Arrays of records become one row per record; an object becomes key/value
/// rows, except that its array fields are rendered as their own tables below.
fn render_table(value: Value) -> String {
    match value {
        Value::Array(items) => render_rows(&items),
        Value::Object(map) => {
            let mut scalars = Vec::new();
            let mut sections = Vec::new();
            for (key, value) in map {
                match value {
                    Value::Array(items) => sections.push(format!("{key}:\n{}", render_rows(&items))),
                    other => scalars.push(vec![key, table::cell(&other)]),
                }
            }
            let mut out = Vec::new();
            if !scalars.is_empty() {
                out.push(table::render(&["key", "value"], &scalars));
            }
            out.extend(sections);
            out.join("\n\n")
        }
        scalar => table::render(&["value"], &[vec![table::cell(&scalar)]]),
    }
}

fn render_rows(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }
    if !items.iter().all(Value::is_object) {
        let rows: Vec<_> = items.iter().map(|item| vec![table::cell(item)]).collect();
        return table::render(&["value"], &rows);
    }

    // Column order follows first appearance, so `id` and `name` lead.
    let mut headers = Vec::<String>::new();
    for key in items.iter().filter_map(Value::as_object).flat_map(|m| m.keys()) {
        if !headers.contains(key) {
            headers.push(key.clone());
        }
    }
    let rows: Vec<Vec<String>> = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|h| map.get(h).map_or_else(|| String::from("-"), table::cell))
                .collect()
        })
        .collect();
    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
    table::render(&header_refs, &rows)
}
