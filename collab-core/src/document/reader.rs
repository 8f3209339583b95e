// Recursive-descent reader for snapshot documents.
//
// The grammar is a JSON subset: a top-level object whose values of interest
// are arrays of flat string-valued records. Scan state lives in an explicit
// `Cursor` passed to each production. A syntax error inside a record only
// discards that record; the reader resynchronizes at the record's closing
// brace. Errors outside records are fatal.

use std::collections::{BTreeMap, HashMap};

use crate::error::DocumentError;

/// One flat record: field name → string value. Non-string values are dropped.
pub(crate) type RawRecord = BTreeMap<String, String>;

/// Result of reading one array element.
pub(crate) type RecordSlot = Result<RawRecord, DocumentError>;

/// Every top-level array found in a document, by key.
#[derive(Debug, Default)]
pub(crate) struct RawDocument {
    arrays: HashMap<String, Vec<RecordSlot>>,
}

impl RawDocument {
    /// Remove and return the array stored under the first key present.
    pub(crate) fn take_array(&mut self, keys: &[&str]) -> Option<Vec<RecordSlot>> {
        keys.iter().find_map(|key| self.arrays.remove(*key))
    }

    pub(crate) fn has_array(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| self.arrays.contains_key(*key))
    }
}

#[derive(Debug, Clone, Copy)]
struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), DocumentError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(format!("expected `{expected}`, found {}", self.describe_next())))
        }
    }

    fn describe_next(&self) -> String {
        self.peek()
            .map_or_else(|| "end of input".to_string(), |c| format!("`{c}`"))
    }

    fn error(&self, message: impl Into<String>) -> DocumentError {
        DocumentError::Syntax {
            offset: self.pos,
            message: message.into(),
        }
    }
}

/// Read the top-level object and collect every array-valued member.
///
/// Non-array members are skipped. Fails with
/// [`DocumentError::MalformedDocument`] when the top level is not a
/// well-formed object.
pub(crate) fn parse_document(src: &str) -> Result<RawDocument, DocumentError> {
    let mut cursor = Cursor::new(src);
    parse_top_level(&mut cursor).map_err(|e| match e {
        DocumentError::Syntax { .. } => DocumentError::MalformedDocument(e.to_string()),
        other => other,
    })
}

fn parse_top_level(cursor: &mut Cursor<'_>) -> Result<RawDocument, DocumentError> {
    let mut doc = RawDocument::default();

    cursor.skip_ws();
    cursor.expect('{')?;
    loop {
        cursor.skip_ws();
        if cursor.eat('}') {
            break;
        }
        let key = parse_string(cursor)?;
        cursor.skip_ws();
        cursor.expect(':')?;
        cursor.skip_ws();
        if cursor.peek() == Some('[') {
            let records = parse_record_array(cursor)?;
            doc.arrays.insert(key, records);
        } else {
            skip_value(cursor)?;
        }
        cursor.skip_ws();
        if cursor.eat(',') {
            continue;
        }
        cursor.expect('}')?;
        break;
    }

    Ok(doc)
}

fn parse_record_array(cursor: &mut Cursor<'_>) -> Result<Vec<RecordSlot>, DocumentError> {
    let mut records = Vec::new();

    cursor.expect('[')?;
    loop {
        cursor.skip_ws();
        if cursor.eat(']') {
            break;
        }

        if cursor.peek() == Some('{') {
            let start = *cursor;
            match parse_record(cursor) {
                Ok(record) => records.push(Ok(record)),
                Err(err) => {
                    *cursor = start;
                    skip_balanced(cursor)?;
                    records.push(Err(err));
                }
            }
        } else {
            let err = cursor.error(format!(
                "expected record object, found {}",
                cursor.describe_next()
            ));
            skip_value(cursor)?;
            records.push(Err(err));
        }

        cursor.skip_ws();
        if cursor.eat(',') {
            continue;
        }
        cursor.expect(']')?;
        break;
    }

    Ok(records)
}

fn parse_record(cursor: &mut Cursor<'_>) -> Result<RawRecord, DocumentError> {
    let mut record = RawRecord::new();

    cursor.expect('{')?;
    loop {
        cursor.skip_ws();
        if cursor.eat('}') {
            break;
        }
        let key = parse_string(cursor)?;
        cursor.skip_ws();
        cursor.expect(':')?;
        cursor.skip_ws();
        if cursor.peek() == Some('"') {
            let value = parse_string(cursor)?;
            record.insert(key, value);
        } else {
            skip_value(cursor)?;
        }
        cursor.skip_ws();
        if cursor.eat(',') {
            continue;
        }
        cursor.expect('}')?;
        break;
    }

    Ok(record)
}

/// Read a quoted string, resolving escapes.
fn parse_string(cursor: &mut Cursor<'_>) -> Result<String, DocumentError> {
    cursor.expect('"')?;
    let mut out = String::new();
    loop {
        let Some(c) = cursor.bump() else {
            return Err(cursor.error("unterminated string"));
        };
        match c {
            '"' => return Ok(out),
            '\\' => out.push(parse_escape(cursor)?),
            _ => out.push(c),
        }
    }
}

/// The character after a backslash. Unknown escapes yield the escaped
/// character itself.
fn parse_escape(cursor: &mut Cursor<'_>) -> Result<char, DocumentError> {
    let Some(c) = cursor.bump() else {
        return Err(cursor.error("unterminated escape"));
    };
    Ok(match c {
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'b' => '\u{8}',
        'f' => '\u{c}',
        'u' => parse_unicode_escape(cursor)?,
        other => other,
    })
}

/// `XXXX` after `\u`, combining a following `\uXXXX` low surrogate if needed.
fn parse_unicode_escape(cursor: &mut Cursor<'_>) -> Result<char, DocumentError> {
    let high = parse_hex4(cursor)?;
    let code = if (0xD800..0xDC00).contains(&high) {
        if !(cursor.eat('\\') && cursor.eat('u')) {
            return Err(cursor.error("unpaired high surrogate"));
        }
        let low = parse_hex4(cursor)?;
        if !(0xDC00..0xE000).contains(&low) {
            return Err(cursor.error("invalid low surrogate"));
        }
        0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
    } else {
        high
    };
    char::from_u32(code).ok_or_else(|| cursor.error(format!("invalid code point U+{code:04X}")))
}

fn parse_hex4(cursor: &mut Cursor<'_>) -> Result<u32, DocumentError> {
    let mut value = 0;
    for _ in 0..4 {
        let digit = cursor
            .bump()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| cursor.error("expected 4 hex digits"))?;
        value = value * 16 + digit;
    }
    Ok(value)
}

/// Skip a quoted string without interpreting escapes beyond `\x` pairs.
fn skip_string(cursor: &mut Cursor<'_>) -> Result<(), DocumentError> {
    cursor.expect('"')?;
    loop {
        match cursor.bump() {
            None => return Err(cursor.error("unterminated string")),
            Some('"') => return Ok(()),
            Some('\\') => {
                cursor.bump();
            }
            Some(_) => {}
        }
    }
}

/// Skip any value: string, bracketed structure or bare scalar.
fn skip_value(cursor: &mut Cursor<'_>) -> Result<(), DocumentError> {
    match cursor.peek() {
        Some('"') => skip_string(cursor),
        Some('{' | '[') => skip_balanced(cursor),
        _ => {
            let start = cursor.pos;
            while cursor
                .peek()
                .is_some_and(|c| !matches!(c, ',' | '}' | ']') && !c.is_whitespace())
            {
                cursor.bump();
            }
            if cursor.pos == start {
                Err(cursor.error(format!("expected value, found {}", cursor.describe_next())))
            } else {
                Ok(())
            }
        }
    }
}

/// Skip from an opening `{` or `[` past its matching closer, ignoring
/// brackets inside strings.
fn skip_balanced(cursor: &mut Cursor<'_>) -> Result<(), DocumentError> {
    let mut depth = 0usize;
    loop {
        let Some(c) = cursor.peek() else {
            return Err(cursor.error("unbalanced brackets"));
        };
        match c {
            '"' => {
                skip_string(cursor)?;
                continue;
            }
            '{' | '[' => depth += 1,
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    cursor.bump();
                    return Ok(());
                }
            }
            _ => {}
        }
        cursor.bump();
    }
}
