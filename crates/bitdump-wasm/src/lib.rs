//! WASM bindings for the `bitdump` word-dump decoder.
//!
//! This crate is the bridge between a browser view and the decode engine.
//! The view owns everything visual (the table, the detail panel, which cell
//! is highlighted); this crate hands it plain JS objects:
//!
//! - **Header**: one entry per column with its word, repeat offset and label.
//! - **Rows**: the cells of each record line, plus how many columns were
//!   missing or tokens left over.
//! - **Decoded words**: the value of a selected cell and every named field.
//!
//! ```text
//! // Pseudo TypeScript example
//! //
//! // const decoder = new WasmInterpreter();          // canonical schema
//! // const header = decoder.header();                // [{ label: "bx" }, { label: "muon#0" }, ...]
//! // const rows = decoder.parseDump(fileText);       // [{ line: 1, cells: [...] }, ...]
//! // const detail = decoder.select("muon", 3, "0000000400000005");
//! // // detail.fields: [{ name: "phi", slice: "9:0", value: "5", hex: "0x5" }, ...]
//! ```
//!
//! Errors are returned as JS strings carrying the error message.

mod convert;

use bitdump::{Interpreter, canonical, schema::FormatSchema};
use wasm_bindgen::prelude::*;

/// Entry point for the WASM module.
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();

        tracing_wasm::set_as_global_default_with_config(
            tracing_wasm::WASMLayerConfigBuilder::new()
                .set_max_level(tracing::Level::WARN)
                .build(),
        );
    }
}

/// A schema that JavaScript can parse dumps and decode cells with.
#[wasm_bindgen]
pub struct WasmInterpreter {
    schema: FormatSchema,
}

impl Default for WasmInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmInterpreter {
    /// Uses the canonical test-vector schema.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmInterpreter {
        WasmInterpreter {
            schema: canonical().clone(),
        }
    }

    /// Builds from a JSON schema description (see `bitdump::serde`).
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(schema_json: &str) -> Result<WasmInterpreter, JsValue> {
        let schema = FormatSchema::from_json(schema_json).map_err(convert::error_to_js)?;
        tracing::debug!(columns = schema.total_columns(), "schema loaded");
        Ok(WasmInterpreter { schema })
    }

    /// The schema as a JSON description.
    #[wasm_bindgen(js_name = schemaJson)]
    pub fn schema_json(&self) -> Result<String, JsValue> {
        self.schema.to_json().map_err(convert::error_to_js)
    }

    /// Column layout for table headers.
    pub fn header(&self) -> Result<JsValue, JsValue> {
        convert::to_js(&convert::header(&self.schema))
    }

    #[wasm_bindgen(js_name = parseLine)]
    pub fn parse_line(&self, line: &str) -> Result<JsValue, JsValue> {
        let row = self.interpreter().parse_line(line);
        convert::to_js(&convert::row_out(None, &row))
    }

    /// Parses a whole dump. Blank lines produce no row.
    #[wasm_bindgen(js_name = parseDump)]
    pub fn parse_dump(&self, text: &str) -> Result<JsValue, JsValue> {
        let rows: Vec<_> = self
            .interpreter()
            .parse_dump(text)
            .map(|(line, row)| convert::row_out(Some(line), &row))
            .collect();

        let incomplete = rows.iter().filter(|r| r.missing > 0 || r.surplus > 0).count();
        if incomplete > 0 {
            tracing::warn!(incomplete, rows = rows.len(), "dump has rows of the wrong length");
        }

        convert::to_js(&rows)
    }

    /// Decodes `token` as the word called `name`.
    pub fn decode(&self, name: &str, token: &str) -> Result<JsValue, JsValue> {
        let decoded = self
            .interpreter()
            .decode_word(name, token)
            .map_err(convert::error_to_js)?;
        convert::to_js(&convert::decoded_out(&decoded, None))
    }

    /// Decodes the cell a user selected.
    pub fn select(&self, name: &str, offset: usize, text: &str) -> Result<JsValue, JsValue> {
        let selection = self
            .interpreter()
            .select(name, offset, text)
            .map_err(convert::error_to_js)?;
        convert::to_js(&convert::selection_out(&selection))
    }
}

impl WasmInterpreter {
    fn interpreter(&self) -> Interpreter<'_> {
        Interpreter::new(&self.schema)
    }
}
