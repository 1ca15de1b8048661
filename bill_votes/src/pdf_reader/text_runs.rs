use std::collections::BTreeMap;

use anyhow::Context;
use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};

use crate::pdf_reader::content_extractor::{tokens_from_texts, TextToken};

// TJ kerning wider than this (thousandths of an em) is a word gap.
const WORD_GAP: f64 = -100.0;

fn collect_text(text: &mut String, encoding: Option<&str>, operands: &[Object]) {
    for operand in operands {
        match operand {
            Object::String(bytes, _) => text.push_str(&Document::decode_text(encoding, bytes)),
            Object::Array(items) => collect_text(text, encoding, items),
            Object::Integer(adjustment) if (*adjustment as f64) < WORD_GAP => text.push(' '),
            Object::Real(adjustment) if f64::from(*adjustment) < WORD_GAP => text.push(' '),
            _ => {}
        }
    }
}

/// Text runs of one page in content stream order. Every text showing
/// operator and every text positioning operator starts a new run.
pub fn page_runs(document: &Document, page_id: ObjectId) -> anyhow::Result<Vec<String>> {
    let encodings = document
        .get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (name, font.get_font_encoding()))
        .collect::<BTreeMap<Vec<u8>, &str>>();
    let content_data = document
        .get_page_content(page_id)
        .context("Failed to read the page content")?;
    let content = Content::decode(&content_data).context("Failed to decode the page content")?;

    let mut runs = vec![];
    let mut current = String::new();
    let mut encoding = None;
    for operation in &content.operations {
        match operation.operator.as_str() {
            "Tf" => {
                let font = operation
                    .operands
                    .first()
                    .context("Missing font operand")?
                    .as_name()
                    .context("Font operand is not a name")?;
                encoding = encodings.get(font).copied();
            }
            "Td" | "TD" | "Tm" | "T*" | "BT" | "ET" => {
                runs.push(std::mem::take(&mut current));
            }
            "Tj" | "TJ" => {
                runs.push(std::mem::take(&mut current));
                collect_text(&mut current, encoding, &operation.operands);
            }
            // ' and " move to the next line first; the string is the last operand.
            "'" | "\"" => {
                runs.push(std::mem::take(&mut current));
                let text = operation.operands.last().map(std::slice::from_ref);
                collect_text(&mut current, encoding, text.unwrap_or_default());
            }
            _ => {}
        }
    }
    runs.push(current);

    Ok(runs)
}

/// Trimmed, non-empty runs as a token stream.
pub fn tokens_from_runs(runs: Vec<String>) -> Vec<TextToken> {
    tokens_from_texts(
        runs.iter()
            .map(|run| run.trim())
            .filter(|run| !run.is_empty()),
    )
}
