use crate::error::ParseError;
use crate::structure::DomainName;

type Result<T> = std::result::Result<T, ParseError>;

// compression pointers followed before a name is rejected
const MAX_JUMPS: usize = 10;

// longest name in presentation form, trailing dot included
const MAX_NAME_LEN: usize = 255;

// read cursor over one complete message. names in record bodies may point
// anywhere before them, so the whole message stays reachable.
pub struct BytePacketBuffer<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> BytePacketBuffer<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn read(&mut self) -> Result<u8> {
        let byte = self.get(self.pos)?;
        self.pos += 1;

        Ok(byte)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let res = ((self.read()? as u16) << 8) | (self.read()? as u16);
        Ok(res)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let res = ((self.read_u16()? as u32) << 16) | (self.read_u16()? as u32);
        Ok(res)
    }

    pub fn read_range(&mut self, len: usize) -> Result<&'a [u8]> {
        let range = self.get_range(self.pos, len)?;
        self.pos += len;

        Ok(range)
    }

    fn get(&self, pos: usize) -> Result<u8> {
        self.buf
            .get(pos)
            .copied()
            .ok_or(ParseError::UnexpectedEnd(pos))
    }

    fn get_range(&self, start: usize, len: usize) -> Result<&'a [u8]> {
        start
            .checked_add(len)
            .and_then(|end| self.buf.get(start..end))
            .ok_or(ParseError::UnexpectedEnd(self.buf.len()))
    }

    pub fn read_qname(&mut self) -> Result<DomainName> {
        // locally track pos because we might encounter jumps
        let mut pos = self.pos();
        let mut labels = Vec::new();
        let mut name_len = 1;

        let mut jumped = false;
        let mut jumps_performed = 0;

        loop {
            let len = self.get(pos)?;

            match len & 0xC0 {
                0xC0 => {
                    if jumps_performed >= MAX_JUMPS {
                        return Err(ParseError::TooManyJumps(pos));
                    }

                    // the pointer itself is all the caller consumes
                    if !jumped {
                        self.seek(pos + 2);
                    }

                    let b2 = self.get(pos + 1)? as u16;
                    pos = ((((len as u16) ^ 0xC0) << 8) | b2) as usize;

                    jumped = true;
                    jumps_performed += 1;
                }
                0x00 => {
                    pos += 1;

                    if len == 0 {
                        break;
                    }

                    name_len += len as usize + 1;
                    if name_len > MAX_NAME_LEN {
                        return Err(ParseError::NameTooLong);
                    }

                    let label = self.get_range(pos, len as usize)?;
                    labels.push(String::from_utf8_lossy(label).into_owned());

                    pos += len as usize;
                }
                prefix => return Err(ParseError::ReservedLabelPrefix(prefix)),
            }
        }

        if !jumped {
            self.seek(pos);
        }
        Ok(DomainName::from_labels(labels))
    }
}
