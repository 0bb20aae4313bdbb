use tracing::debug;

use crate::byte_packet_buffer::BytePacketBuffer;
use crate::error::ParseError;
use crate::structure::{DnsHeader, DnsQuestion, DnsRecord};

type Result<T> = std::result::Result<T, ParseError>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Section {
    Question,
    Answer,
    Authority,
    Additional,
    Done,
}

impl Section {
    fn name(self) -> &'static str {
        match self {
            Section::Question => "question",
            Section::Answer => "answer",
            Section::Authority => "authority",
            Section::Additional => "additional",
            Section::Done => "done",
        }
    }

    fn next(self) -> Self {
        match self {
            Section::Question => Section::Answer,
            Section::Answer => Section::Authority,
            Section::Authority => Section::Additional,
            Section::Additional | Section::Done => Section::Done,
        }
    }
}

/// Walks a message one item at a time. Every cursor yields `Ok(None)` once
/// its section is exhausted; sections must be drained in wire order.
pub struct Parser<'a> {
    buf: BytePacketBuffer<'a>,
    counts: [u16; 4],
    section: Section,
    index: u16,
}

impl<'a> Parser<'a> {
    pub fn start(bytes: &'a [u8]) -> Result<(DnsHeader, Parser<'a>)> {
        if bytes.len() < DnsHeader::SIZE {
            return Err(ParseError::UnexpectedEnd(bytes.len()));
        }

        let mut buf = BytePacketBuffer::new(bytes);
        let mut header = DnsHeader::new();
        header.read(&mut buf)?;
        debug!(
            id = header.id,
            qdcount = header.qdcount,
            anscount = header.anscount,
            nscount = header.nscount,
            arcount = header.arcount,
            "parsed header"
        );

        let parser = Parser {
            buf,
            counts: [
                header.qdcount,
                header.anscount,
                header.nscount,
                header.arcount,
            ],
            section: Section::Question,
            index: 0,
        };
        Ok((header, parser))
    }

    pub fn next_question(&mut self) -> Result<Option<DnsQuestion>> {
        if !self.advance(Section::Question)? {
            return Ok(None);
        }

        let mut question = DnsQuestion::new();
        question.read(&mut self.buf)?;
        self.index += 1;

        Ok(Some(question))
    }

    pub fn next_answer(&mut self) -> Result<Option<DnsRecord>> {
        self.next_record(Section::Answer)
    }

    pub fn next_authority(&mut self) -> Result<Option<DnsRecord>> {
        self.next_record(Section::Authority)
    }

    pub fn next_additional(&mut self) -> Result<Option<DnsRecord>> {
        self.next_record(Section::Additional)
    }

    fn next_record(&mut self, section: Section) -> Result<Option<DnsRecord>> {
        if !self.advance(section)? {
            return Ok(None);
        }

        let record = DnsRecord::from(&mut self.buf)?;
        self.index += 1;

        Ok(Some(record))
    }

    // true when `section` has another item waiting at the cursor
    fn advance(&mut self, section: Section) -> Result<bool> {
        if self.section < section {
            return Err(ParseError::SectionNotStarted(section.name()));
        }
        if self.section > section {
            return Ok(false);
        }

        if self.index == self.counts[section as usize] {
            debug!(section = section.name(), items = self.index, "section done");
            self.section = section.next();
            self.index = 0;
            return Ok(false);
        }
        Ok(true)
    }
}
