//! Tagged-record stream decoder.
//!
//! Every HWP stream after decompression is a flat sequence of records. Each
//! record starts with a little-endian header word:
//!
//! ```text
//! bits  0..10  tag id
//! bits 10..20  level (nesting depth)
//! bits 20..32  payload size; 0xFFF means a u32 size follows
//! ```

/// Size-field value announcing an extended 32-bit size.
const EXTENDED_SIZE: u32 = 0xFFF;

/// One decoded record borrowing its payload from the stream buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub tag_id: u16,
    pub level: u16,
    pub payload: &'a [u8],
}

impl<'a> Record<'a> {
    #[inline]
    pub fn size(&self) -> usize {
        self.payload.len()
    }
}

/// Iterator over the records of a buffer.
///
/// Iteration ends at the end of the buffer or at the first record whose
/// header or payload runs past it; [`RecordReader::truncated`] tells the
/// two apart.
pub struct RecordReader<'a> {
    data: &'a [u8],
    offset: usize,
    truncated: bool,
}

impl<'a> RecordReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            truncated: false,
        }
    }

    /// Whether iteration stopped on an incomplete record.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Byte offset of the next record.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn take_u32(&mut self) -> Option<u32> {
        let end = self.offset.checked_add(4)?;
        let bytes = self.data.get(self.offset..end)?;
        self.offset = end;
        Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

impl<'a> Iterator for RecordReader<'a> {
    type Item = Record<'a>;

    fn next(&mut self) -> Option<Record<'a>> {
        if self.truncated || self.offset >= self.data.len() {
            return None;
        }

        let start = self.offset;
        let Some(word) = self.take_u32() else {
            self.truncated = true;
            log::warn!("record header at offset {} is cut short", start);
            return None;
        };
        let tag_id = (word & 0x3FF) as u16;
        let level = ((word >> 10) & 0x3FF) as u16;
        let mut size = word >> 20;
        if size == EXTENDED_SIZE {
            let Some(extended) = self.take_u32() else {
                self.truncated = true;
                log::warn!("extended size of record 0x{:03X} is cut short", tag_id);
                return None;
            };
            size = extended;
        }

        let end = match self.offset.checked_add(size as usize) {
            Some(end) if end <= self.data.len() => end,
            _ => {
                self.truncated = true;
                log::warn!(
                    "record 0x{:03X} at offset {} declares {} bytes, only {} remain",
                    tag_id,
                    start,
                    size,
                    self.data.len() - self.offset
                );
                return None;
            },
        };
        let payload = &self.data[self.offset..end];
        self.offset = end;

        Some(Record {
            tag_id,
            level,
            payload,
        })
    }
}

/// Summary of a [`for_each_record`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadOutcome {
    pub records: usize,
    pub truncated: bool,
}

/// Feed every record of `data` to `handler` in order.
pub fn for_each_record<'a, F>(data: &'a [u8], mut handler: F) -> ReadOutcome
where
    F: FnMut(Record<'a>),
{
    let mut reader = RecordReader::new(data);
    let mut records = 0;
    for record in reader.by_ref() {
        handler(record);
        records += 1;
    }
    ReadOutcome {
        records,
        truncated: reader.truncated(),
    }
}
