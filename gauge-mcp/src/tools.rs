//! Request dispatch and tool implementations

use serde_json::{json, Value as JsonValue};
use gauge_core::{Decimals, RawValue};
use crate::protocol::{McpError, McpRequest, McpResponse, METHOD_NOT_FOUND};
use crate::session::{ConvertInput, Session};

pub const PROTOCOL_VERSION: &str = "2025-11-25";
pub const SERVER_NAME: &str = "gauge";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn handle_request(session: &mut Session<'_>, request: &McpRequest) -> McpResponse {
    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(&request.params),
        "initialized" | "notifications/initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),

        // Tools
        "tools/list" => handle_tools_list(),
        "tools/call" => handle_tool_call(session, &request.params),

        _ => Err(McpError::new(
            METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        )),
    };

    McpResponse::from_result(request.id.clone(), result)
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    tracing::info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Unit converter for length, mass, volume, area and temperature"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "Gauge keeps one conversion form per connection. Use 'list_categories' and 'list_units' to see valid choices, 'select_category' to switch category, 'convert' to convert a value, and 'history' to see previous results."
    }))
}

fn handle_tools_list() -> Result<JsonValue, McpError> {
    Ok(json!({
        "tools": [
            {
                "name": "list_categories",
                "description": "List the unit categories.",
                "inputSchema": { "type": "object", "properties": {} }
            },
            {
                "name": "list_units",
                "description": "List the units of a category, sorted by symbol.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": { "type": "string", "description": "Category name, e.g. \"Length\"" }
                    },
                    "required": ["category"]
                }
            },
            {
                "name": "select_category",
                "description": "Switch the form to another category. Resets the unit pair to the first two units.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": { "type": "string", "description": "Category name" }
                    },
                    "required": ["category"]
                }
            },
            {
                "name": "swap_units",
                "description": "Exchange the source and target units.",
                "inputSchema": { "type": "object", "properties": {} }
            },
            {
                "name": "convert",
                "description": "Convert a value. Omitted fields keep their current form values.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "value": {
                            "type": ["string", "number"],
                            "description": "Value to convert"
                        },
                        "category": { "type": "string", "description": "Category name" },
                        "from_unit": { "type": "string", "description": "Source unit symbol" },
                        "to_unit": { "type": "string", "description": "Target unit symbol" },
                        "decimals": {
                            "type": "integer",
                            "description": "Decimal places (0-10)",
                            "minimum": 0,
                            "maximum": Decimals::MAX.get()
                        }
                    }
                }
            },
            {
                "name": "history",
                "description": "List successful conversions of this session, oldest first.",
                "inputSchema": { "type": "object", "properties": {} }
            },
            {
                "name": "clear_history",
                "description": "Forget all conversions of this session.",
                "inputSchema": { "type": "object", "properties": {} }
            }
        ]
    }))
}

fn handle_tool_call(session: &mut Session<'_>, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params.as_ref()
        .ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params.get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));
    tracing::debug!(tool = name, "tool call");

    match name {
        "list_categories" => tool_list_categories(session),
        "list_units" => tool_list_units(session, &args),
        "select_category" => tool_select_category(session, &args),
        "swap_units" => tool_swap_units(session),
        "convert" => tool_convert(session, &args),
        "history" => tool_history(session),
        "clear_history" => tool_clear_history(session),
        _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
    }
}

fn text_content(text: impl Into<String>) -> JsonValue {
    json!([{ "type": "text", "text": text.into() }])
}

fn required_str<'a>(args: &'a JsonValue, key: &str) -> Result<&'a str, McpError> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params(format!("Missing {} argument", key)))
}

fn optional_str(args: &JsonValue, key: &str) -> Result<Option<String>, McpError> {
    match args.get(key) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(McpError::invalid_params(format!("{} must be a string", key))),
    }
}

fn optional_value(args: &JsonValue) -> Result<Option<RawValue>, McpError> {
    match args.get("value") {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(RawValue::Text(s.clone()))),
        Some(JsonValue::Number(n)) => n.as_f64()
            .map(|f| Some(RawValue::Number(f)))
            .ok_or_else(|| McpError::invalid_params("value is not representable as a number")),
        Some(_) => Err(McpError::invalid_params("value must be a string or a number")),
    }
}

fn optional_decimals(args: &JsonValue) -> Result<Option<Decimals>, McpError> {
    match args.get("decimals") {
        None | Some(JsonValue::Null) => Ok(None),
        Some(v) => {
            let places = v.as_i64()
                .ok_or_else(|| McpError::invalid_params("decimals must be an integer"))?;
            Ok(Some(Decimals::try_from(places)?))
        }
    }
}

fn tool_list_categories(session: &Session<'_>) -> Result<JsonValue, McpError> {
    let categories = session.registry().categories();
    Ok(json!({
        "content": text_content(categories.join(", ")),
        "categories": categories
    }))
}

fn tool_list_units(session: &Session<'_>, args: &JsonValue) -> Result<JsonValue, McpError> {
    let name = required_str(args, "category")?;
    let category = session.registry().category(name)?;

    let units: Vec<JsonValue> = category.units().iter()
        .map(|u| json!({ "symbol": u.symbol(), "name": u.name() }))
        .collect();

    Ok(json!({
        "content": text_content(category.symbols().join(", ")),
        "category": category.name,
        "temperature": category.is_temperature(),
        "units": units
    }))
}

fn tool_select_category(session: &mut Session<'_>, args: &JsonValue) -> Result<JsonValue, McpError> {
    let name = required_str(args, "category")?;
    let state = session.select_category(name)?;

    Ok(json!({
        "content": text_content(format!("{}: {} → {}", state.category, state.from_unit, state.to_unit)),
        "state": state
    }))
}

fn tool_swap_units(session: &mut Session<'_>) -> Result<JsonValue, McpError> {
    let pair = session.swap_units().clone();
    Ok(json!({
        "content": text_content(format!("{} → {}", pair.from, pair.to)),
        "from_unit": pair.from,
        "to_unit": pair.to
    }))
}

fn tool_convert(session: &mut Session<'_>, args: &JsonValue) -> Result<JsonValue, McpError> {
    let input = ConvertInput {
        value: optional_value(args)?,
        category: optional_str(args, "category")?,
        from_unit: optional_str(args, "from_unit")?,
        to_unit: optional_str(args, "to_unit")?,
        decimals: optional_decimals(args)?,
    };

    let outcome = session.convert(input)?;
    if let Some(err) = &outcome.error {
        tracing::debug!(code = %err.code, "conversion rejected input");
    }

    Ok(json!({
        "content": text_content(outcome.display.clone()),
        "isError": outcome.error.is_some(),
        "outcome": outcome
    }))
}

fn tool_history(session: &Session<'_>) -> Result<JsonValue, McpError> {
    let entries = session.history().entries();
    let text = if entries.is_empty() {
        "No conversions yet".to_string()
    } else {
        entries.join("\n")
    };
    Ok(json!({
        "content": text_content(text),
        "entries": entries
    }))
}

fn tool_clear_history(session: &mut Session<'_>) -> Result<JsonValue, McpError> {
    session.clear_history();
    Ok(json!({
        "content": text_content("History cleared"),
        "entries": []
    }))
}
