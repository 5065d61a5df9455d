use std::fmt::Display;

use bitdump::{
    Selection,
    decoder::DecodedWord,
    parser::Row,
    schema::{Column, FormatSchema},
};
use serde::Serialize;
use wasm_bindgen::JsValue;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ColumnOut {
    pub index: usize,
    pub name: String,
    pub offset: usize,
    pub label: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CellOut {
    pub column: ColumnOut,
    pub token: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RowOut {
    /// 1-based line in the dump; absent for a single parsed line.
    pub line: Option<usize>,
    pub cells: Vec<CellOut>,
    pub missing: usize,
    pub surplus: usize,
}

// Field values can use all 64 bits, past what a JS number holds exactly,
// so they travel as strings.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FieldOut {
    pub name: String,
    pub slice: String,
    pub value: String,
    pub hex: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DecodedOut {
    pub word: String,
    pub label: Option<String>,
    /// The value as the word displays it.
    pub value: String,
    pub decimal: String,
    pub fields: Vec<FieldOut>,
    /// Plain-text breakdown for a detail panel.
    pub text: String,
}

pub fn column_out(column: &Column<'_>) -> ColumnOut {
    ColumnOut {
        index: column.index,
        name: column.word.name.clone(),
        offset: column.offset,
        label: column.label(),
    }
}

pub fn header(schema: &FormatSchema) -> Vec<ColumnOut> {
    schema.columns().map(|c| column_out(&c)).collect()
}

pub fn row_out(line: Option<usize>, row: &Row<'_, '_>) -> RowOut {
    RowOut {
        line,
        cells: row
            .cells
            .iter()
            .map(|cell| CellOut {
                column: column_out(&cell.column),
                token: cell.token.to_string(),
            })
            .collect(),
        missing: row.missing,
        surplus: row.surplus,
    }
}

pub fn decoded_out(decoded: &DecodedWord<'_>, label: Option<String>) -> DecodedOut {
    DecodedOut {
        word: decoded.word.name.clone(),
        label,
        value: decoded.formatted(),
        decimal: decoded.value.to_string(),
        fields: decoded
            .fields
            .iter()
            .map(|field| FieldOut {
                name: field.name.to_string(),
                slice: field.slice_description(),
                value: field.value.to_string(),
                hex: format!("{:#x}", field.value),
            })
            .collect(),
        text: decoded.to_string(),
    }
}

pub fn selection_out(selection: &Selection<'_>) -> DecodedOut {
    DecodedOut {
        text: selection.to_string(),
        ..decoded_out(&selection.decoded, Some(selection.label.clone()))
    }
}

pub fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

pub fn error_to_js<E: Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[cfg(test)]
mod tests {
    use bitdump::Interpreter;

    use super::*;

    #[test]
    fn test_header() {
        let header = header(bitdump::canonical());
        assert_eq!(header.len(), 60);
        assert_eq!(
            header[2],
            ColumnOut {
                index: 2,
                name: "muon".to_string(),
                offset: 1,
                label: "muon#1".to_string()
            }
        );
    }

    #[test]
    fn test_row_out() {
        let interpreter = Interpreter::canonical();
        let row = interpreter.parse_line("7 0000000000000001");
        let out = row_out(Some(4), &row);
        assert_eq!(out.line, Some(4));
        assert_eq!(out.cells.len(), 2);
        assert_eq!(out.cells[1].column.label, "muon#0");
        assert_eq!(out.cells[1].token, "0000000000000001");
        assert_eq!(out.missing, 58);
    }

    #[test]
    fn test_selection_out() {
        let interpreter = Interpreter::canonical();
        let selection = interpreter.select("muon", 2, "0000000400000005").unwrap();
        let out = selection_out(&selection);

        assert_eq!(out.label.as_deref(), Some("muon#2"));
        assert_eq!(out.value, "0000000400000005");
        assert_eq!(out.decimal, (0x4_0000_0005u64).to_string());
        assert_eq!(out.fields[0].name, "phi");
        assert_eq!(out.fields[0].slice, "9:0");
        assert_eq!(out.fields[0].value, "5");
        assert_eq!(out.fields[5].name, "charge_sign");
        assert_eq!(out.fields[5].hex, "0x1");
        assert!(out.text.starts_with("muon#2\n0000000400000005\nphi [9:0]: 5 (0x5)"));
    }

    #[test]
    fn test_serializes_to_plain_json() {
        let interpreter = Interpreter::canonical();
        let decoded = interpreter.decode_word("bx", "12").unwrap();
        let json = serde_json::to_value(decoded_out(&decoded, None)).unwrap();

        assert_eq!(json["word"], "bx");
        assert_eq!(json["value"], "12");
        assert!(json["label"].is_null());
        assert_eq!(json["fields"].as_array().map(Vec::len), Some(0));
    }
}
