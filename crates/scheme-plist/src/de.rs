//! XML property list reader
//!
//! Accepts an optional XML declaration and DOCTYPE, then a single `<plist>`
//! root holding exactly one value. Whitespace between elements is ignored;
//! whitespace inside `<string>` and `<key>` is preserved.

use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesRef, BytesStart, Event};

use crate::error::{Error, Result};
use crate::value::{Dictionary, Value};

/// Parse a property list from raw bytes.
pub fn from_slice(bytes: &[u8]) -> Result<Value> {
    let source = std::str::from_utf8(bytes)
        .map_err(|e| Error::syntax(format!("document is not valid UTF-8: {e}")))?;
    from_str(source)
}

/// Parse a property list from text.
pub fn from_str(source: &str) -> Result<Value> {
    Parser {
        reader: Reader::from_str(source),
    }
    .document()
}

/// Structural events with whitespace and prolog noise removed.
enum Token {
    Open { name: String, empty: bool },
    Close(String),
    Eof,
}

struct Parser<'a> {
    reader: Reader<&'a [u8]>,
}

impl Parser<'_> {
    fn document(&mut self) -> Result<Value> {
        match self.next_token()? {
            Token::Open { name, empty: false } if name == "plist" => {}
            Token::Open { name, empty: true } if name == "plist" => {
                return Err(Error::syntax("<plist> has no value"));
            }
            Token::Open { name, .. } | Token::Close(name) => {
                return Err(Error::syntax(format!(
                    "expected <plist> root element, found <{name}>"
                )));
            }
            Token::Eof => return Err(Error::syntax("document is empty")),
        }

        let value = match self.next_token()? {
            Token::Open { name, empty } => self.value(&name, empty)?,
            Token::Close(_) => return Err(Error::syntax("<plist> has no value")),
            Token::Eof => return Err(Error::syntax("unterminated <plist>")),
        };

        match self.next_token()? {
            Token::Close(name) if name == "plist" => {}
            Token::Open { name, .. } => {
                return Err(Error::syntax(format!(
                    "<plist> holds more than one value (found <{name}>)"
                )));
            }
            _ => return Err(Error::syntax("unterminated <plist>")),
        }

        match self.next_token()? {
            Token::Eof => Ok(value),
            _ => Err(Error::syntax("content after </plist>")),
        }
    }

    fn next_token(&mut self) -> Result<Token> {
        loop {
            match self.reader.read_event()? {
                Event::Start(e) => {
                    return Ok(Token::Open {
                        name: element_name(&e)?,
                        empty: false,
                    });
                }
                Event::Empty(e) => {
                    return Ok(Token::Open {
                        name: element_name(&e)?,
                        empty: true,
                    });
                }
                Event::End(e) => return Ok(Token::Close(utf8(e.name().as_ref())?.to_string())),
                Event::Text(e) => {
                    let raw = e.into_inner();
                    if !raw.iter().all(u8::is_ascii_whitespace) {
                        return Err(Error::syntax(format!(
                            "unexpected text {:?} between elements",
                            String::from_utf8_lossy(&raw)
                        )));
                    }
                }
                Event::CData(_) | Event::GeneralRef(_) => {
                    return Err(Error::syntax("unexpected character data between elements"));
                }
                Event::Eof => return Ok(Token::Eof),
                // declaration, doctype, comments, processing instructions
                _ => {}
            }
        }
    }

    fn value(&mut self, name: &str, empty: bool) -> Result<Value> {
        match name {
            "dict" if empty => Ok(Value::Dictionary(Dictionary::new())),
            "dict" => self.dictionary(),
            "array" if empty => Ok(Value::Array(Vec::new())),
            "array" => self.array(),
            "true" | "false" => {
                if !empty {
                    self.expect_close(name)?;
                }
                Ok(Value::Boolean(name == "true"))
            }
            "string" => self.text(name, empty).map(Value::String),
            "integer" => {
                let text = self.text(name, empty)?;
                let trimmed = text.trim();
                trimmed
                    .parse::<i64>()
                    .map(Value::Integer)
                    .map_err(|_| Error::syntax(format!("invalid integer {trimmed:?}")))
            }
            "real" => {
                let text = self.text(name, empty)?;
                let trimmed = text.trim();
                trimmed
                    .parse::<f64>()
                    .map(Value::Real)
                    .map_err(|_| Error::syntax(format!("invalid real {trimmed:?}")))
            }
            "date" => {
                let text = self.text(name, empty)?;
                Ok(Value::Date(text.trim().to_string()))
            }
            other => Err(Error::UnsupportedElement {
                name: other.to_string(),
            }),
        }
    }

    fn dictionary(&mut self) -> Result<Value> {
        let mut dict = Dictionary::new();
        loop {
            let key = match self.next_token()? {
                Token::Close(name) if name == "dict" => return Ok(Value::Dictionary(dict)),
                Token::Open { name, empty } if name == "key" => self.text("key", empty)?,
                Token::Open { name, .. } => {
                    return Err(Error::syntax(format!(
                        "expected <key> inside <dict>, found <{name}>"
                    )));
                }
                Token::Close(name) => {
                    return Err(Error::syntax(format!("unexpected </{name}> inside <dict>")));
                }
                Token::Eof => return Err(Error::syntax("unterminated <dict>")),
            };

            let value = match self.next_token()? {
                Token::Open { name, empty } if name != "key" => self.value(&name, empty)?,
                _ => return Err(Error::syntax(format!("key {key:?} has no value"))),
            };

            if dict.contains_key(&key) {
                return Err(Error::DuplicateKey { key });
            }
            dict.insert(key, value);
        }
    }

    fn array(&mut self) -> Result<Value> {
        let mut items = Vec::new();
        loop {
            match self.next_token()? {
                Token::Close(name) if name == "array" => return Ok(Value::Array(items)),
                Token::Open { name, empty } => items.push(self.value(&name, empty)?),
                Token::Close(name) => {
                    return Err(Error::syntax(format!("unexpected </{name}> inside <array>")));
                }
                Token::Eof => return Err(Error::syntax("unterminated <array>")),
            }
        }
    }

    /// Collect the character content of a leaf element up to its end tag.
    fn text(&mut self, name: &str, empty: bool) -> Result<String> {
        let mut text = String::new();
        if empty {
            return Ok(text);
        }
        loop {
            match self.reader.read_event()? {
                Event::Text(e) => {
                    let raw = e.into_inner();
                    let escaped = utf8(&raw)?;
                    let unescaped =
                        unescape(escaped).map_err(|e| Error::syntax(e.to_string()))?;
                    text.push_str(&unescaped);
                }
                Event::CData(e) => {
                    let raw = e.into_inner();
                    text.push_str(utf8(&raw)?);
                }
                Event::GeneralRef(reference) => text.push_str(&resolve_reference(&reference)?),
                Event::Comment(_) => {}
                Event::End(e) if e.name().as_ref() == name.as_bytes() => return Ok(text),
                Event::Eof => return Err(Error::syntax(format!("unterminated <{name}>"))),
                _ => return Err(Error::syntax(format!("<{name}> must contain only text"))),
            }
        }
    }

    fn expect_close(&mut self, name: &str) -> Result<()> {
        match self.next_token()? {
            Token::Close(found) if found == name => Ok(()),
            _ => Err(Error::syntax(format!("<{name}> must be empty"))),
        }
    }
}

fn element_name(start: &BytesStart<'_>) -> Result<String> {
    utf8(start.name().as_ref()).map(str::to_string)
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| Error::syntax(format!("invalid UTF-8: {e}")))
}

fn resolve_reference(reference: &BytesRef<'_>) -> Result<String> {
    if let Some(ch) = reference
        .resolve_char_ref()
        .map_err(|e| Error::syntax(e.to_string()))?
    {
        return Ok(ch.to_string());
    }
    let name = reference
        .decode()
        .map_err(|e| Error::syntax(e.to_string()))?;
    resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| Error::syntax(format!("unknown entity &{name};")))
}
