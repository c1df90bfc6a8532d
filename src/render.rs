use crate::error::{RenderError, TransformError};
use crate::types::Record;
use quick_xml::escape::escape;
use std::io::{self, Write};

/// Consumer of a record stream. A changed header is shown on its own line before the
/// `label: text` line.
pub trait RecordSink {
    fn write_record(&mut self, record: &Record) -> io::Result<()>;
    fn finish(&mut self) -> io::Result<()>;
}

/// Drains `records` into `sink` and returns how many were written.
///
/// A transform error stops rendering after the records before it were written; the sink is
/// not finished in that case.
pub fn render<I, S>(records: I, sink: &mut S) -> Result<usize, RenderError>
where
    I: IntoIterator<Item = Result<Record, TransformError>>,
    S: RecordSink + ?Sized,
{
    let mut written = 0;
    for record in records {
        sink.write_record(&record?)?;
        written += 1;
    }
    sink.finish()?;
    Ok(written)
}

pub struct TextSink<W: Write> {
    out: W,
    started: bool,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            started: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordSink for TextSink<W> {
    fn write_record(&mut self, record: &Record) -> io::Result<()> {
        if let (true, Some(header)) = (record.header_changed, record.header.as_deref()) {
            if self.started {
                writeln!(self.out)?;
            }
            writeln!(self.out, "{header}")?;
        }
        writeln!(self.out, "{}", record.line())?;
        self.started = true;
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

pub struct HtmlSink<W: Write> {
    out: W,
    started: bool,
}

impl<W: Write> HtmlSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            started: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn start(&mut self) -> io::Result<()> {
        if !self.started {
            self.started = true;
            writeln!(self.out, "<!DOCTYPE html>")?;
            writeln!(self.out, "<html><head><meta charset=\"utf-8\"></head><body>")?;
        }
        Ok(())
    }
}

impl<W: Write> RecordSink for HtmlSink<W> {
    fn write_record(&mut self, record: &Record) -> io::Result<()> {
        self.start()?;
        if let (true, Some(header)) = (record.header_changed, record.header.as_deref()) {
            writeln!(self.out, "<h3>{}</h3>", escape(header))?;
        }
        writeln!(self.out, "<p>{}</p>", escape(&record.line()))
    }

    fn finish(&mut self) -> io::Result<()> {
        self.start()?;
        writeln!(self.out, "</body></html>")?;
        self.out.flush()
    }
}

/// One JSON object per record and line.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn write_record(&mut self, record: &Record) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, record)?;
        writeln!(self.out)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
