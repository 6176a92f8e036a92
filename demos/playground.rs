//! Playground: resolve tool calls from an API response and render them as text
//!
//! Run: RUST_LOG=genui=trace cargo run --example playground

use colored::Colorize;
use genui::{create_builder, render_nodes, FixSuggestion, Render, ToolCall};
use serde_json::{json, Value};

/// Component references understood by the text renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Card {
    EmptyFields,
    UnknownTool,
}

struct TextRenderer;

impl Render<Card> for TextRenderer {
    type Output = String;

    fn instantiate(&self, component: &Card, props: Value) -> Option<String> {
        let key = props["key"].as_str().unwrap_or_default();
        let text = match component {
            Card::EmptyFields => {
                let rows = props["empty_fields_by_row"]
                    .as_object()
                    .map(|rows| {
                        rows.iter()
                            .map(|(row, fields)| format!("    row {row}: {fields}"))
                            .collect::<Vec<_>>()
                            .join("\n")
                    })
                    .unwrap_or_default();
                format!(
                    "[{}] {} ({}/{} rows analyzed)\n{}",
                    key.dimmed(),
                    props["filename"].as_str().unwrap_or("?").bold(),
                    props["rows_analyzed"],
                    props["total_rows"],
                    rows
                )
            }
            Card::UnknownTool => format!(
                "[{}] {} {}",
                key.dimmed(),
                "Unknown tool:".yellow(),
                props["tool"].as_str().unwrap_or("?")
            ),
        };
        Some(text)
    }
}

/// Pull `tool_calls[].{name, result | arguments}` out of the response
fn extract_tool_calls(ctx: &Value) -> Vec<ToolCall> {
    ctx["apiResponse"]["tool_calls"]
        .as_array()
        .map(|calls| {
            calls
                .iter()
                .map(|call| {
                    let args = [&call["result"], &call["arguments"]]
                        .into_iter()
                        .find(|v| !v.is_null())
                        .cloned()
                        .unwrap_or_else(|| json!({}));
                    ToolCall::new(call["name"].as_str().unwrap_or_default(), args)
                })
                .collect()
        })
        .unwrap_or_default()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let ui = create_builder::<Value, Card>()
        .extract(extract_tool_calls)
        .on_tool("get_empty_fields")
        .component(Card::EmptyFields)
        .map(|args, _| {
            json!({
                "file_id": args["file_id"],
                "filename": args["filename"],
                "total_rows": args["total_rows"],
                "rows_analyzed": args["rows_analyzed"],
                "empty_fields_by_row": args["empty_fields_by_row"],
            })
        })
        .key(|args, _| format!("empty-fields-{}", args["file_id"].as_str().unwrap_or_default()))
        .end()?
        .fallback(Card::UnknownTool)
        .done()?;

    let context = json!({
        "apiResponse": {
            "answer": "response ...",
            "model_used": "gpt-5.2",
            "tool_calls": [
                {
                    "name": "get_empty_fields",
                    "arguments": {},
                    "result": {
                        "file_id": "b8719188-a592-4be9-9d9c-0dc20b8b0e35",
                        "filename": "claims_mapping_test.xlsx",
                        "total_rows": 15,
                        "rows_analyzed": 15,
                        "empty_fields_by_row": {
                            "0": ["Entity Child", "Pharmacy Name", "Date Of Service"],
                            "2": ["Entity Child", "Pharmacy Name"],
                            "4": ["Date Of Service"]
                        }
                    }
                },
                { "name": "summarize_sheet", "arguments": { "sheet": "Claims" } }
            ]
        }
    });

    println!("{}", "genui playground".bold());

    match ui.resolve(&context) {
        Ok(nodes) => {
            for line in render_nodes(&TextRenderer, &nodes) {
                println!("{line}");
            }
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            if let Some(suggestion) = e.fix_suggestion() {
                eprintln!("{} {}", "Fix:".cyan(), suggestion);
            }
        }
    }

    Ok(())
}
