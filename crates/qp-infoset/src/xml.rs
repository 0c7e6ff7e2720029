//! XML reading and writing for element trees

use crate::element::Element;
use crate::error::InfosetError;
use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::{Reader, Writer};
use std::borrow::Cow;

/// Serialize an element tree without indentation
pub(crate) fn write_element(root: &Element) -> Result<String, InfosetError> {
    let mut writer = Writer::new(Vec::new());
    write_node(&mut writer, root)?;
    String::from_utf8(writer.into_inner()).map_err(InfosetError::xml)
}

fn write_node(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<(), InfosetError> {
    let mut start = BytesStart::new(element.name());
    for (name, value) in element.attributes() {
        start.push_attribute(Attribute {
            key: QName(name.as_bytes()),
            value: Cow::Owned(escape_attribute(value).into_bytes()),
        });
    }

    if element.children().is_empty() && element.text().is_none() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(InfosetError::xml);
    }

    writer
        .write_event(Event::Start(start))
        .map_err(InfosetError::xml)?;
    if let Some(text) = element.text() {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(InfosetError::xml)?;
    }
    for child in element.children() {
        write_node(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name())))
        .map_err(InfosetError::xml)
}

/// Escape markup and the whitespace readers would normalize to spaces
fn escape_attribute(value: &str) -> String {
    let escaped = escape(value);
    let mut out = String::with_capacity(escaped.len());
    for c in escaped.chars() {
        match c {
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            '\t' => out.push_str("&#x9;"),
            c => out.push(c),
        }
    }
    out
}

/// Parse a single root element
///
/// Declarations, comments and processing instructions are skipped.
/// Whitespace-only text between child elements is dropped.
pub(crate) fn read_element(text: &str) -> Result<Element, InfosetError> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<(Element, String)> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event().map_err(InfosetError::xml)? {
            Event::Start(start) => stack.push((open(&start)?, String::new())),
            Event::Empty(start) => {
                let element = open(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let (mut element, text) = stack
                    .pop()
                    .ok_or_else(|| InfosetError::structure("unbalanced end tag"))?;
                if !text.is_empty()
                    && (element.children().is_empty() || !text.trim().is_empty())
                {
                    element.set_text(text);
                }
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(content) => {
                let content = content.unescape().map_err(InfosetError::xml)?;
                push_text(&mut stack, &content)?;
            }
            Event::CData(content) => {
                push_text(&mut stack, &String::from_utf8_lossy(&content))?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some((open, _)) = stack.last() {
        return Err(InfosetError::structure(format!(
            "unclosed element <{}>",
            open.name()
        )));
    }
    root.ok_or_else(|| InfosetError::structure("no root element"))
}

fn open(start: &BytesStart<'_>) -> Result<Element, InfosetError> {
    let name = std::str::from_utf8(start.name().into_inner()).map_err(InfosetError::xml)?;
    let mut element = Element::new(name);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(InfosetError::xml)?;
        let key = std::str::from_utf8(attribute.key.as_ref()).map_err(InfosetError::xml)?;
        let value = attribute.unescape_value().map_err(InfosetError::xml)?;
        element.set_attribute(key, value.into_owned());
    }
    Ok(element)
}

fn attach(
    stack: &mut [(Element, String)],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), InfosetError> {
    if let Some((parent, _)) = stack.last_mut() {
        parent.push_child(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(InfosetError::structure("multiple root elements"));
    }
    *root = Some(element);
    Ok(())
}

fn push_text(stack: &mut [(Element, String)], text: &str) -> Result<(), InfosetError> {
    match stack.last_mut() {
        Some((_, buffer)) => {
            buffer.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(InfosetError::structure("text outside the root element")),
    }
}
