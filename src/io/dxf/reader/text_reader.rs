//! DXF ASCII text reader

use super::tag::Tag;
use crate::error::Result;
use crate::io::dxf::code_page::{encoding_from_code_page, DEFAULT_FALLBACK_ENCODING};
use crate::io::dxf::DxfCode;
use crate::notification::{NotificationCollection, NotificationType};
use encoding_rs::Encoding;
use log::{debug, warn};
use std::io::BufRead;

/// Forward-only reader producing [`Tag`]s from an ASCII DXF stream.
///
/// Pairs whose code line is not an integer are skipped and recorded as
/// [`NotificationType::MalformedTagPair`]; only I/O faults are returned as
/// errors. The reader also implements `Iterator<Item = Result<Tag>>`.
pub struct DxfTextReader<R: BufRead> {
    reader: R,
    line_number: usize,
    /// Encoding for lines that are not valid UTF-8
    encoding: &'static Encoding,
    /// Set after a `$DWGCODEPAGE` header variable until its value arrives
    awaiting_code_page: bool,
    notifications: NotificationCollection,
}

impl<R: BufRead> DxfTextReader<R> {
    /// Create a new DXF text reader using the default legacy fallback
    pub fn new(reader: R) -> Self {
        Self::with_encoding(reader, DEFAULT_FALLBACK_ENCODING)
    }

    /// Create a new DXF text reader with an explicit legacy fallback
    pub fn with_encoding(reader: R, encoding: &'static Encoding) -> Self {
        Self {
            reader,
            line_number: 0,
            encoding,
            awaiting_code_page: false,
            notifications: NotificationCollection::new(),
        }
    }

    /// The legacy encoding currently applied to non-UTF-8 lines
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Unwrap the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Take the notifications recorded so far
    pub fn take_notifications(&mut self) -> NotificationCollection {
        std::mem::take(&mut self.notifications)
    }

    /// Read a single line, trying UTF-8 first and the legacy encoding second.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        while matches!(bytes.last(), Some(b'\n' | b'\r')) {
            bytes.pop();
        }

        let line = match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(err) => {
                let bytes = err.into_bytes();
                let (decoded, had_errors) = self.encoding.decode_without_bom_handling(&bytes);
                if had_errors {
                    debug!(
                        "line {}: undecodable bytes replaced using {}",
                        self.line_number,
                        self.encoding.name()
                    );
                }
                decoded.into_owned()
            }
        };

        if self.line_number == 1 {
            return Ok(Some(line.trim_start_matches('\u{feff}').to_string()));
        }
        Ok(Some(line))
    }

    /// Read the next well-formed code/value pair.
    pub fn read_tag(&mut self) -> Result<Option<Tag>> {
        loop {
            let code_line = match self.read_line()? {
                Some(line) => line,
                None => return Ok(None),
            };
            let code_line_number = self.line_number;

            let value_line = match self.read_line()? {
                Some(line) => line,
                None => {
                    let reason = "no value line before end of input";
                    self.skip_pair(code_line_number, &code_line, reason);
                    return Ok(None);
                }
            };

            match code_line.trim().parse::<i32>() {
                Ok(code) => {
                    let tag = Tag::new(code, process_string_value(&value_line));
                    self.observe_code_page(&tag);
                    return Ok(Some(tag));
                }
                Err(_) => self.skip_pair(code_line_number, &code_line, "code is not an integer"),
            }
        }
    }

    fn skip_pair(&mut self, line: usize, code_line: &str, reason: &str) {
        warn!("skipping malformed pair at line {}: '{}' ({})", line, code_line, reason);
        self.notifications.notify(
            NotificationType::MalformedTagPair,
            format!("line {}: '{}' ({})", line, code_line.trim(), reason),
        );
    }

    /// Switch the legacy encoding when the header declares `$DWGCODEPAGE`.
    fn observe_code_page(&mut self, tag: &Tag) {
        if self.awaiting_code_page {
            self.awaiting_code_page = false;
            if tag.dxf_code == DxfCode::TextContinuation {
                if let Some(enc) = encoding_from_code_page(&tag.value) {
                    debug!("$DWGCODEPAGE {} selects {}", tag.value.trim(), enc.name());
                    self.encoding = enc;
                }
            }
        } else if tag.dxf_code == DxfCode::HeaderVariable && tag.value.trim() == "$DWGCODEPAGE" {
            self.awaiting_code_page = true;
        }
    }
}

impl<R: BufRead> Iterator for DxfTextReader<R> {
    type Item = Result<Tag>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_tag().transpose()
    }
}

/// Decode DXF caret escapes in a value line
fn process_string_value(value: &str) -> String {
    if !value.contains('^') {
        return value.to_string();
    }
    value
        .replace("^J", "\n")
        .replace("^M", "\r")
        .replace("^I", "\t")
        .replace("^ ", "^")
}
