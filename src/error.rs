use thiserror::Error;

/// Every way a byte stream can fail to be a DNS message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected end of message at offset {0}")]
    UnexpectedEnd(usize),

    #[error("too many compression pointers in name at offset {0}")]
    TooManyJumps(usize),

    #[error("domain name exceeds 255 bytes")]
    NameTooLong,

    #[error("reserved label prefix {0:#04x}")]
    ReservedLabelPrefix(u8),

    #[error("record body of type {rtype} does not fit its declared length {rdlength}")]
    BadRdLength { rtype: u16, rdlength: u16 },

    #[error("EDNS option {0} overruns the OPT record")]
    OptionOverrun(u16),

    #[error("{0} section read before the previous section was finished")]
    SectionNotStarted(&'static str),
}
