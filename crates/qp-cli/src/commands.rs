//! Subcommand implementations

use anyhow::{bail, Context, Result};
use qp_codec::{DeclaredType, Value, ValueCodec};
use qp_infoset::{AttributeDocument, Infoset};
use std::path::Path;

fn load(path: &Path) -> Result<Infoset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Infoset::from_xml(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn load_or_new(path: &Path) -> Result<Infoset> {
    if path.exists() {
        load(path)
    } else {
        tracing::debug!(path = %path.display(), "starting a new infoset");
        Ok(Infoset::new())
    }
}

fn declared(kind: &str) -> Result<DeclaredType> {
    kind.parse::<DeclaredType>()
        .with_context(|| format!("unknown value kind `{kind}`"))
}

/// Stored text of `element.attribute`
///
/// # Errors
/// Returns error if the file is unreadable or the attribute is absent
pub fn get(path: &Path, element: &str, attribute: &str) -> Result<String> {
    let infoset = load(path)?;
    match infoset.get(element, attribute) {
        Some(text) => Ok(text),
        None => bail!("{element} has no attribute {attribute}"),
    }
}

/// Store `value` as `element.attribute` and save the file
///
/// With a kind, the value must decode as that kind and is stored in its
/// canonical form. Returns the stored text.
///
/// # Errors
/// Returns error if the value is invalid for the kind or the file cannot be written
pub fn set(
    codec: &ValueCodec,
    path: &Path,
    element: &str,
    attribute: &str,
    value: &str,
    kind: Option<&str>,
) -> Result<String> {
    let stored = match kind {
        Some(kind) => codec_format(codec, kind, value)?,
        None => value.to_string(),
    };

    let infoset = load_or_new(path)?;
    infoset.set(element, attribute, stored.clone());
    let xml = infoset.to_xml()?;
    std::fs::write(path, xml).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(element, attribute, path = %path.display(), "stored attribute");
    Ok(stored)
}

/// `Element.Attribute=text` lines for every attribute, in document order
///
/// # Errors
/// Returns error if the file is unreadable
pub fn dump(path: &Path) -> Result<Vec<String>> {
    let infoset = load(path)?;
    let root = infoset.snapshot();
    let lines = root
        .children()
        .iter()
        .flat_map(|element| {
            element
                .attributes()
                .map(|(name, text)| format!("{}.{name}={text}", element.name()))
                .collect::<Vec<_>>()
        })
        .collect();
    Ok(lines)
}

/// Canonical stored form of `text` read as `kind`
///
/// # Errors
/// Returns error for unknown kinds or text that does not decode
pub fn codec_format(codec: &ValueCodec, kind: &str, text: &str) -> Result<String> {
    let declared = declared(kind)?;
    let value = codec
        .parse_value(&declared, text)
        .with_context(|| format!("`{text}` is not a valid {declared}"))?;
    Ok(codec.format_value(&declared, &value)?)
}

/// Decoded value of stored `text`
///
/// # Errors
/// Returns error for unknown kinds or text that does not decode
pub fn codec_parse(codec: &ValueCodec, kind: &str, text: &str) -> Result<Value> {
    let declared = declared(kind)?;
    codec
        .parse_value(&declared, text)
        .with_context(|| format!("`{text}` is not a valid {declared}"))
}
