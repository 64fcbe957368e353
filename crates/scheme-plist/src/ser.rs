//! Canonical XML property list writer

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::{Error, Result};
use crate::value::Value;

const DOCTYPE: &str = r#"plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd""#;

/// Serialize a value as a complete XML plist document.
///
/// Containers are indented with tabs, empty containers collapse to
/// `<dict/>`/`<array/>`, and the output ends with a newline. Equal values
/// always produce identical bytes.
pub fn to_vec(value: &Value) -> Result<Vec<u8>> {
    let mut xml = Writer::new_with_indent(Vec::new(), b'\t', 1);

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    xml.write_event(Event::DocType(BytesText::from_escaped(DOCTYPE)))?;

    let mut root = BytesStart::new("plist");
    root.push_attribute(("version", "1.0"));
    xml.write_event(Event::Start(root))?;
    write_value(&mut xml, value)?;
    xml.write_event(Event::End(BytesEnd::new("plist")))?;

    let mut bytes = xml.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

/// Serialize a value as a complete XML plist document string.
pub fn to_string(value: &Value) -> Result<String> {
    String::from_utf8(to_vec(value)?).map_err(|e| Error::syntax(e.to_string()))
}

fn write_value<W: Write>(xml: &mut Writer<W>, value: &Value) -> Result<()> {
    match value {
        Value::String(s) => write_text_element(xml, "string", s),
        Value::Integer(n) => write_text_element(xml, "integer", &n.to_string()),
        Value::Real(r) => write_text_element(xml, "real", &r.to_string()),
        Value::Date(d) => write_text_element(xml, "date", d),
        Value::Boolean(b) => {
            let name = if *b { "true" } else { "false" };
            xml.write_event(Event::Empty(BytesStart::new(name)))?;
            Ok(())
        }
        Value::Array(items) if items.is_empty() => {
            xml.write_event(Event::Empty(BytesStart::new("array")))?;
            Ok(())
        }
        Value::Array(items) => {
            xml.write_event(Event::Start(BytesStart::new("array")))?;
            for item in items {
                write_value(xml, item)?;
            }
            xml.write_event(Event::End(BytesEnd::new("array")))?;
            Ok(())
        }
        Value::Dictionary(dict) if dict.is_empty() => {
            xml.write_event(Event::Empty(BytesStart::new("dict")))?;
            Ok(())
        }
        Value::Dictionary(dict) => {
            xml.write_event(Event::Start(BytesStart::new("dict")))?;
            for (key, item) in dict.iter() {
                write_text_element(xml, "key", key)?;
                write_value(xml, item)?;
            }
            xml.write_event(Event::End(BytesEnd::new("dict")))?;
            Ok(())
        }
    }
}

fn write_text_element<W: Write>(xml: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
