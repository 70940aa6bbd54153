use std::collections::VecDeque;
use std::io::{BufRead, Write};

use cv_core::ConversationError;

pub trait InputSource {
    fn read_line(&mut self) -> Result<String, ConversationError>;
}

pub trait OutputSink {
    fn emit(&mut self, text: &str) -> Result<(), ConversationError>;
}

#[derive(Debug)]
pub struct LineInput<R> {
    reader: R,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> InputSource for LineInput<R> {
    fn read_line(&mut self) -> Result<String, ConversationError> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|error| ConversationError::new("INPUT_READ", error.to_string()))?;
        if read == 0 {
            return Err(ConversationError::new(
                "INPUT_EOF",
                "Input stream ended before a line was available.",
            ));
        }
        Ok(line.trim().to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl InputSource for ScriptedInput {
    fn read_line(&mut self) -> Result<String, ConversationError> {
        self.lines.pop_front().ok_or_else(|| {
            ConversationError::new("INPUT_EOF", "Scripted input has no lines left.")
        })
    }
}

#[derive(Debug)]
pub struct WriterOutput<W> {
    writer: W,
}

impl<W: Write> WriterOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for WriterOutput<W> {
    fn emit(&mut self, text: &str) -> Result<(), ConversationError> {
        writeln!(self.writer, "{}", text)
            .and_then(|_| self.writer.flush())
            .map_err(|error| ConversationError::new("OUTPUT_WRITE", error.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingOutput {
    lines: Vec<String>,
}

impl RecordingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl OutputSink for RecordingOutput {
    fn emit(&mut self, text: &str) -> Result<(), ConversationError> {
        self.lines.push(text.to_string());
        Ok(())
    }
}
