use crate::error::TransformError;
use crate::mapping::MappingTable;
use crate::resolver::Resolver;
use crate::types::Record;
use crate::xml_path::{PathTracker, XmlPath};
use quick_xml::errors::IllFormedError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fmt::Display;
use std::io::BufRead;
use std::iter::FusedIterator;

/// Streams records from a byte slice.
pub fn transform<'a, 'm>(xml: &'a [u8], table: &'m MappingTable) -> RecordStream<'m, &'a [u8]> {
    RecordStream::new(xml, table)
}

/// Streams records from any buffered reader without reading it fully into memory.
pub fn transform_reader<R: BufRead>(input: R, table: &MappingTable) -> RecordStream<'_, R> {
    RecordStream::new(input, table)
}

/// Eager form of [`transform`]: all records, or the first error.
pub fn collect_records(xml: &[u8], table: &MappingTable) -> Result<Vec<Record>, TransformError> {
    transform(xml, table).collect()
}

enum Token {
    Open(String),
    Close(String),
    Empty(String),
    Text(String),
    Skip,
    Eof,
}

/// One-shot pull sequence of records for a single document.
///
/// Yields `Ok` records in document order. The first error is yielded once and ends the
/// sequence; records already yielded stay valid but the document is incomplete.
pub struct RecordStream<'m, R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    tracker: PathTracker,
    resolver: Resolver<'m>,
    emitted: usize,
    done: bool,
}

impl<'m, R: BufRead> RecordStream<'m, R> {
    pub fn new(input: R, table: &'m MappingTable) -> Self {
        let mut reader = Reader::from_reader(input);
        reader.config_mut().trim_text(false);
        reader.config_mut().check_end_names = true;

        Self {
            reader,
            buf: Vec::new(),
            tracker: PathTracker::new(),
            resolver: Resolver::new(table),
            emitted: 0,
            done: false,
        }
    }

    /// Path of the innermost open element.
    pub fn current_path(&self) -> &XmlPath {
        self.tracker.current()
    }

    /// Byte offset of the tokenizer in the input.
    pub fn byte_position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }

    pub fn emitted(&self) -> usize {
        self.emitted
    }

    fn read_token(&mut self) -> Result<Token, TransformError> {
        self.buf.clear();
        let event = match self.reader.read_event_into(&mut self.buf) {
            Ok(event) => event,
            Err(err) => return Err(tokenizer_error(err, self.reader.error_position() as u64)),
        };
        let position = self.reader.buffer_position() as u64;

        let token = match event {
            Event::Start(start) => Token::Open(decode(start.local_name().into_inner(), position)?),
            Event::End(end) => Token::Close(decode(end.local_name().into_inner(), position)?),
            Event::Empty(start) => {
                Token::Empty(decode(start.local_name().into_inner(), position)?)
            }
            Event::Text(text) => {
                let unescaped = text.unescape().map_err(|e| malformed(position, e))?;
                text_token(&unescaped)
            }
            Event::CData(cdata) => text_token(&decode(&cdata.into_inner(), position)?),
            Event::Eof => Token::Eof,
            _ => Token::Skip,
        };
        Ok(token)
    }

    fn step(&mut self) -> Result<Option<Record>, TransformError> {
        loop {
            match self.read_token()? {
                Token::Open(name) => self.tracker.push(&name),
                Token::Close(name) => self.close(&name)?,
                Token::Empty(name) => {
                    self.tracker.push(&name);
                    self.close(&name)?;
                }
                Token::Text(text) => {
                    if self.tracker.is_empty() {
                        return Err(malformed(
                            self.byte_position(),
                            "text outside the root element",
                        ));
                    }
                    let resolved = self.resolver.resolve(self.tracker.current());
                    self.emitted += 1;
                    return Ok(Some(Record::new(resolved, text)));
                }
                Token::Skip => {}
                Token::Eof => {
                    if let Some(open) = self.tracker.current().leaf() {
                        return Err(malformed(
                            self.byte_position(),
                            format!(
                                "document ended with {} unclosed element(s), innermost <{open}>",
                                self.tracker.depth()
                            ),
                        ));
                    }
                    tracing::debug!("[Walker] Document finished, {} records emitted", self.emitted);
                    return Ok(None);
                }
            }
        }
    }

    fn close(&mut self, name: &str) -> Result<(), TransformError> {
        let position = self.byte_position();
        let open = self
            .tracker
            .pop()
            .map_err(|err| err.at(position, Some(name)))?;
        if open != name {
            return Err(malformed(
                position,
                format!("expected </{open}>, found </{name}>"),
            ));
        }
        Ok(())
    }
}

impl<R: BufRead> Iterator for RecordStream<'_, R> {
    type Item = Result<Record, TransformError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.step() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                tracing::debug!("[Walker] Aborting after {} records: {}", self.emitted, err);
                Some(Err(err))
            }
        }
    }
}

impl<R: BufRead> FusedIterator for RecordStream<'_, R> {}

fn text_token(text: &str) -> Token {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Token::Skip
    } else {
        Token::Text(trimmed.to_string())
    }
}

fn decode(bytes: &[u8], position: u64) -> Result<String, TransformError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| malformed(position, e))
}

fn malformed(position: u64, message: impl Display) -> TransformError {
    TransformError::MalformedXml {
        position,
        message: message.to_string(),
    }
}

fn tokenizer_error(err: quick_xml::Error, position: u64) -> TransformError {
    match err {
        quick_xml::Error::IllFormed(IllFormedError::UnmatchedEndTag(name)) => {
            TransformError::ImbalancedStructure {
                position,
                element: Some(name),
            }
        }
        other => malformed(position, other),
    }
}
