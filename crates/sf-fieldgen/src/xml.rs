//! Metadata XML writer.
//!
//! Renders a `serde_json::Value` tree as a Metadata API document:
//!
//! - object keys become child elements, in insertion order;
//! - the `$` key of an object holds that element's attributes;
//! - arrays become one repeated element per item;
//! - strings, numbers and booleans become escaped text;
//! - `null` is omitted.

use std::fmt::Display;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::Value;

use crate::error::{Error, ErrorKind, Result};

/// Key holding the attributes of an element.
pub const ATTRIBUTES_KEY: &str = "$";

const INDENT_SIZE: usize = 4;

/// Render `tree` as a complete XML document with root element `root`.
pub fn to_document(root: &str, tree: &Value) -> Result<String> {
    if !tree.is_object() {
        return Err(Error::new(ErrorKind::Xml(format!(
            "root element <{root}> must be built from an object"
        ))));
    }

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;
    write_element(&mut writer, root, tree)?;

    let mut document = String::from_utf8(writer.into_inner()).map_err(xml_error)?;
    document.push('\n');
    Ok(document)
}

fn write_element(writer: &mut Writer<Vec<u8>>, name: &str, value: &Value) -> Result<()> {
    match value {
        Value::Null => Ok(()),
        Value::Array(items) => {
            for item in items {
                if item.is_array() {
                    return Err(Error::new(ErrorKind::Xml(format!(
                        "element <{name}> cannot hold nested lists"
                    ))));
                }
                write_element(writer, name, item)?;
            }
            Ok(())
        }
        Value::Object(map) => {
            let mut start = BytesStart::new(name);
            if let Some(attributes) = map.get(ATTRIBUTES_KEY) {
                let Value::Object(attributes) = attributes else {
                    return Err(Error::new(ErrorKind::Xml(format!(
                        "attributes of <{name}> must be an object"
                    ))));
                };
                for (key, value) in attributes {
                    start.push_attribute((key.as_str(), scalar_text(key, value)?.as_str()));
                }
            }

            let children: Vec<(&String, &Value)> = map
                .iter()
                .filter(|(key, value)| key.as_str() != ATTRIBUTES_KEY && !value.is_null())
                .collect();

            if children.is_empty() {
                return writer.write_event(Event::Empty(start)).map_err(xml_error);
            }

            writer.write_event(Event::Start(start)).map_err(xml_error)?;
            for (key, child) in children {
                write_element(writer, key, child)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(name)))
                .map_err(xml_error)
        }
        scalar => {
            let text = scalar_text(name, scalar)?;
            writer
                .write_event(Event::Start(BytesStart::new(name)))
                .map_err(xml_error)?;
            writer
                .write_event(Event::Text(BytesText::new(&text)))
                .map_err(xml_error)?;
            writer
                .write_event(Event::End(BytesEnd::new(name)))
                .map_err(xml_error)
        }
    }
}

fn scalar_text(name: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => {
            if let Some(c) = s.chars().find(|&c| !is_xml_char(c)) {
                return Err(Error::new(ErrorKind::Xml(format!(
                    "<{name}> contains U+{:04X}, which XML 1.0 does not allow",
                    c as u32
                ))));
            }
            Ok(s.clone())
        }
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(Error::new(ErrorKind::Xml(format!(
            "<{name}> must hold a string, number or boolean"
        )))),
    }
}

/// Characters allowed in XML 1.0 text: tab, line feed, carriage return and
/// everything from U+0020 except U+FFFE and U+FFFF.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{fffe}' && c != '\u{ffff}')
}

fn xml_error<E: Display>(err: E) -> Error {
    Error::new(ErrorKind::Xml(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars_and_attributes() {
        let tree = json!({
            "$": { "xmlns": "http://soap.sforce.com/2006/04/metadata" },
            "fullName": "Tier__c",
            "length": 80,
            "required": false
        });

        let xml = to_document("CustomField", &tree).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(
            "<CustomField xmlns=\"http://soap.sforce.com/2006/04/metadata\">"
        ));
        assert!(xml.contains("    <fullName>Tier__c</fullName>"));
        assert!(xml.contains("    <length>80</length>"));
        assert!(xml.contains("    <required>false</required>"));
        assert!(!xml.contains("<$>"));
        assert!(xml.ends_with("</CustomField>\n"));
    }

    #[test]
    fn test_arrays_repeat_elements() {
        let tree = json!({
            "types": [{ "members": ["Account.A__c", "Account.B__c"], "name": "CustomField" }],
            "version": "62.0"
        });

        let xml = to_document("Package", &tree).unwrap();
        assert_eq!(xml.matches("<members>").count(), 2);
        assert_eq!(xml.matches("<types>").count(), 1);

        let a = xml.find("Account.A__c").unwrap();
        let b = xml.find("Account.B__c").unwrap();
        let name = xml.find("<name>CustomField</name>").unwrap();
        assert!(a < b && b < name);
    }

    #[test]
    fn test_nested_objects_indent() {
        let tree = json!({
            "valueSet": { "restricted": true, "valueSetDefinition": { "sorted": false } }
        });

        let xml = to_document("CustomField", &tree).unwrap();
        assert!(xml.contains("    <valueSet>"));
        assert!(xml.contains("        <restricted>true</restricted>"));
        assert!(xml.contains("            <sorted>false</sorted>"));
    }

    #[test]
    fn test_escaping() {
        let tree = json!({ "formula": "IF(A < B && C > D, \"x\", 'y')" });
        let xml = to_document("CustomField", &tree).unwrap();
        assert!(xml.contains("&lt;"));
        assert!(xml.contains("&amp;&amp;"));
        assert!(xml.contains("&gt;"));
        assert!(!xml.contains("A < B"));
    }

    #[test]
    fn test_nulls_omitted() {
        let tree = json!({ "label": "Tier", "description": null });
        let xml = to_document("CustomField", &tree).unwrap();
        assert!(!xml.contains("description"));
    }

    #[test]
    fn test_root_must_be_object() {
        let err = to_document("CustomField", &json!("text")).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Xml(_)));
    }

    #[test]
    fn test_nested_lists_rejected() {
        let err = to_document("Package", &json!({ "types": [[1, 2]] })).unwrap_err();
        assert!(err.to_string().contains("nested lists"));
    }

    #[test]
    fn test_control_characters_rejected() {
        let err = to_document("CustomField", &json!({"description": "bell\u{7}"})).unwrap_err();
        match err.kind {
            ErrorKind::Xml(message) => {
                assert!(message.contains("<description>"));
                assert!(message.contains("U+0007"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = to_document("Package", &json!({"$": {"xmlns": "a\u{1}"}})).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Xml(_)));
    }

    #[test]
    fn test_whitespace_controls_allowed() {
        let xml = to_document("CustomField", &json!({"formula": "a\tb\r\nc"})).unwrap();
        assert!(xml.contains("a\tb"));
    }
}
