//! Permissive FASTA reading and writing
//!
//! # Example
//!
//! ```
//! use fasta_comp::fasta::Reader;
//!
//! let input = b">id1 some description
//! ACGT
//! acgt
//! >id2
//! TGCA
//! ";
//!
//! let mut reader = Reader::new(&input[..]);
//!
//! while let Some(record) = reader.next() {
//!     let record = record.expect("Error reading record");
//!     println!("id: {}", record.id());
//!     println!("{}", record.seq);
//! }
//! ```
//!
//! # Details on parsing behaviour
//!
//! * The parser handles UNIX (LF) and Windows (CRLF) line endings, but not
//!   old Mac-style (CR) endings. FASTA writing always uses UNIX line
//!   endings.
//! * Lines are trimmed of surrounding whitespace. Empty lines (after
//!   trimming) are allowed anywhere in the file, they will just be ignored.
//! * A line starting with `>` begins a new record; the remainder of the
//!   line, trimmed, becomes the record header. The previous record (if any)
//!   is finalized first.
//! * Sequence lines are uppercased and concatenated without separators.
//!   Case therefore never matters to downstream analysis.
//! * Non-blank lines before the first header have no record to belong to
//!   and are silently dropped. Malformed content never causes an error;
//!   only I/O and encoding problems do.
//! * If two consecutive header lines are encountered without intermediate
//!   sequence line, the first record will have an empty sequence. The same
//!   is true if the input ends with a header line.
//! * Empty input (or input without any header line) results in no records
//!   and no error.

use std::error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;
use std::str::{self, Utf8Error};

use memchr::memchr;

use super::policy::{BufPolicy, StdPolicy};
use super::*;
use crate::comp::{self, CompositionStats};

type DefaultPolicy = StdPolicy;

const BUFSIZE: usize = 64 * 1024;

/// Parser for FASTA files.
///
/// The reader keeps at most one input line in its buffer at a time; records
/// are accumulated into owned [`SequenceRecord`](struct.SequenceRecord.html)
/// values with trimmed headers and uppercased, concatenated sequences.
pub struct Reader<R: io::Read, P = DefaultPolicy> {
    buffer: buffer_redux::BufReader<R>,
    position: Position,
    line_position: Position,
    record_position: Option<Position>,
    pending: Option<(String, Position)>,
    finished: bool,
    buf_policy: P,
}

impl<R> Reader<R, DefaultPolicy>
where
    R: io::Read,
{
    /// Creates a new reader with the default buffer size of 64 KiB
    ///
    /// # Example:
    ///
    /// ```
    /// use fasta_comp::fasta::Reader;
    /// let fasta = b">id\nSEQUENCE";
    ///
    /// let mut reader = Reader::new(&fasta[..]);
    /// let record = reader.next().unwrap().unwrap();
    /// assert_eq!(record.head, "id");
    /// assert_eq!(record.seq, "SEQUENCE");
    /// ```
    #[inline]
    pub fn new(reader: R) -> Reader<R, StdPolicy> {
        Reader::with_capacity(reader, BUFSIZE)
    }

    /// Creates a new reader with a given buffer capacity. The minimum
    /// allowed capacity is 1; the buffer grows as needed if a line does not
    /// fit.
    #[inline]
    pub fn with_capacity(reader: R, capacity: usize) -> Reader<R, DefaultPolicy> {
        assert!(capacity >= 1);
        Reader {
            buffer: buffer_redux::BufReader::with_capacity(capacity, reader),
            position: Position::new(1, 0),
            line_position: Position::new(0, 0),
            record_position: None,
            pending: None,
            finished: false,
            buf_policy: StdPolicy,
        }
    }
}

impl Reader<File, DefaultPolicy> {
    /// Creates a reader from a file path.
    ///
    /// An unreadable path is reported here as `io::Error`; the returned
    /// reader itself never fails on file content.
    ///
    /// # Example:
    ///
    /// ```no_run
    /// use fasta_comp::fasta::Reader;
    ///
    /// let mut reader = Reader::from_path("seqs.fasta").unwrap();
    ///
    /// // (... do something with the reader)
    /// ```
    #[inline]
    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Reader<File>> {
        File::open(path).map(Reader::new)
    }
}

impl<R, P> Reader<R, P>
where
    R: io::Read,
    P: BufPolicy,
{
    /// Returns a reader with the given buffer policy applied
    #[inline]
    pub fn set_policy<T: BufPolicy>(self, policy: T) -> Reader<R, T> {
        Reader {
            buffer: self.buffer,
            position: self.position,
            line_position: self.line_position,
            record_position: self.record_position,
            pending: self.pending,
            finished: self.finished,
            buf_policy: policy,
        }
    }

    /// Returns the `BufPolicy` of the reader
    #[inline]
    pub fn policy(&self) -> &P {
        &self.buf_policy
    }

    /// Reads the next FASTA record and returns it as an owned
    /// [SequenceRecord](struct.SequenceRecord.html).
    ///
    /// # Example:
    ///
    /// ```no_run
    /// use fasta_comp::fasta::Reader;
    ///
    /// let mut reader = Reader::from_path("seqs.fasta").unwrap();
    ///
    /// while let Some(record) = reader.next() {
    ///     let record = record.unwrap();
    ///     println!("{}", record.id());
    /// }
    /// ```
    pub fn next(&mut self) -> Option<Result<SequenceRecord, Error>> {
        if self.finished && self.pending.is_none() {
            return None;
        }

        // header stashed by the previous call, or scan for the first marker
        let (head, head_pos) = match self.pending.take() {
            Some(pending) => pending,
            None => loop {
                match try_opt!(self.next_line()) {
                    Some(Line::Marker(head)) => break (head, self.line_position.clone()),
                    // blank lines and stray content before the first record
                    Some(_) => {}
                    None => return None,
                }
            },
        };
        self.record_position = Some(head_pos);

        let mut seq = String::new();
        loop {
            match try_opt!(self.next_line()) {
                Some(Line::Seq(part)) => seq.push_str(&part),
                Some(Line::Blank) => {}
                Some(Line::Marker(head)) => {
                    self.pending = Some((head, self.line_position.clone()));
                    break;
                }
                None => break,
            }
        }

        Some(Ok(SequenceRecord { head, seq }))
    }

    /// Returns the position of the record that was last returned by
    /// `next()` (the line and byte offset of its `>` marker).
    /// If `next()` has not yet been called, `None` will be returned.
    ///
    /// # Example
    ///
    /// ```
    /// use fasta_comp::fasta::{Position, Reader};
    ///
    /// let fasta = b">id1
    /// ACGT
    /// >id2
    /// TGCA";
    ///
    /// let mut reader = Reader::new(&fasta[..]);
    ///
    /// // skip one record
    /// reader.next().unwrap().unwrap();
    /// // second position
    /// reader.next().unwrap().unwrap();
    ///
    /// assert_eq!(reader.position(), Some(&Position::new(3, 10)));
    /// ```
    #[inline]
    pub fn position(&self) -> Option<&Position> {
        self.record_position.as_ref()
    }

    /// Returns a borrowed iterator over all FASTA records.
    ///
    /// # Example
    ///
    /// ```
    /// use fasta_comp::fasta::{Reader, SequenceRecord};
    ///
    /// let fasta = b">id1
    /// ACGT
    /// >id2
    /// tgca";
    ///
    /// let mut reader = Reader::new(&fasta[..]);
    ///
    /// let records: Result<Vec<_>, _> = reader
    ///     .records()
    ///     .collect();
    ///
    /// assert_eq!(records.unwrap(),
    ///     vec![
    ///         SequenceRecord {
    ///             head: "id1".to_string(),
    ///             seq: "ACGT".to_string()
    ///         },
    ///         SequenceRecord {
    ///             head: "id2".to_string(),
    ///             seq: "TGCA".to_string()
    ///         }
    ///     ]
    /// );
    /// ```
    pub fn records(&mut self) -> RecordsIter<R, P> {
        RecordsIter { rdr: self }
    }

    /// Returns an iterator over all FASTA records like `Reader::records()`,
    /// but with the difference that it owns the underlying reader.
    pub fn into_records(self) -> RecordsIntoIter<R, P> {
        RecordsIntoIter { rdr: self }
    }

    // Reads one line, classified. `Ok(None)` at end of input; the reader is
    // finished after `None` or any error.
    fn next_line(&mut self) -> Result<Option<Line>, Error> {
        match self.read_line() {
            Ok(line) => Ok(line),
            Err(e) => {
                self.finished = true;
                Err(e)
            }
        }
    }

    fn read_line(&mut self) -> Result<Option<Line>, Error> {
        let end = match self.next_line_end()? {
            Some(end) => end,
            None => {
                self.finished = true;
                return Ok(None);
            }
        };

        let line = {
            let mut raw = &self.buffer.buffer()[..end];
            if let Some((&b'\n', remaining)) = raw.split_last() {
                raw = remaining;
            }
            let text = str::from_utf8(trim_cr(raw))?.trim();
            if text.is_empty() {
                Line::Blank
            } else if let Some(head) = text.strip_prefix('>') {
                Line::Marker(head.trim().to_string())
            } else {
                Line::Seq(text.to_ascii_uppercase())
            }
        };

        self.line_position = self.position.clone();
        self.position.line += 1;
        self.position.byte += end as u64;
        self.buffer.consume(end);
        Ok(Some(line))
    }

    /// Searches the end of the next line (index one past `\n`, or the end
    /// of the remaining data if the input does not end with a newline),
    /// reading more input and growing the buffer as necessary.
    /// Returns `None` at end of input.
    fn next_line_end(&mut self) -> Result<Option<usize>, Error> {
        let mut searched = 0;
        loop {
            if let Some(pos) = memchr(b'\n', &self.buffer.buffer()[searched..]) {
                return Ok(Some(searched + pos + 1));
            }
            searched = self.buffer.buffer().len();

            // no newline in the buffered data: reclaim the space of already
            // consumed lines, then enlarge the buffer if the line still
            // does not fit
            self.buffer.make_room();
            if searched == self.buffer.capacity() {
                self.grow()?;
            }

            if fill_buf(&mut self.buffer)? == 0 {
                // EOF; a last line without terminator may remain
                return Ok(if searched == 0 { None } else { Some(searched) });
            }
        }
    }

    // grow buffer
    fn grow(&mut self) -> Result<(), Error> {
        let cap = self.buffer.capacity();
        let new_size = self.buf_policy.grow_to(cap).ok_or(Error::BufferLimit)?;
        let additional = new_size - cap;
        self.buffer.reserve(additional);
        Ok(())
    }
}

// One input line, trimmed and classified by the leading marker character.
enum Line {
    Blank,
    Marker(String),
    Seq(String),
}

/// Parses FASTA records from text that is already in memory.
///
/// Reading from a string involves no I/O and no decoding, so unlike
/// [`Reader`](struct.Reader.html) this cannot fail.
///
/// # Example
///
/// ```
/// use fasta_comp::fasta::parse_str;
///
/// let records = parse_str(">seq1\nATCG\n\n>seq2\nGGCC");
///
/// assert_eq!(records[0].head, "seq1");
/// assert_eq!(records[0].seq, "ATCG");
/// assert_eq!(records[1].head, "seq2");
/// assert_eq!(records[1].seq, "GGCC");
/// ```
pub fn parse_str(text: &str) -> Vec<SequenceRecord> {
    Reader::new(text.as_bytes())
        .into_records()
        .map(|record| record.expect("reading from a string cannot fail"))
        .collect()
}

/// Borrowed iterator of `SequenceRecord`
pub struct RecordsIter<'a, R, P = DefaultPolicy>
where
    P: 'a,
    R: io::Read + 'a,
{
    rdr: &'a mut Reader<R, P>,
}

impl<'a, R, P> Iterator for RecordsIter<'a, R, P>
where
    P: BufPolicy + 'a,
    R: io::Read + 'a,
{
    type Item = Result<SequenceRecord, Error>;
    fn next(&mut self) -> Option<Self::Item> {
        self.rdr.next()
    }
}

/// Iterator of `SequenceRecord` that owns the underlying reader
pub struct RecordsIntoIter<R: io::Read, P = DefaultPolicy> {
    rdr: Reader<R, P>,
}

impl<R, P> Iterator for RecordsIntoIter<R, P>
where
    P: BufPolicy,
    R: io::Read,
{
    type Item = Result<SequenceRecord, Error>;
    fn next(&mut self) -> Option<Self::Item> {
        self.rdr.next()
    }
}

/// Holds line number and byte offset of a FASTA record
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    line: u64,
    byte: u64,
}

impl Position {
    pub fn new(line: u64, byte: u64) -> Position {
        Position { line, byte }
    }

    /// Line number (starting with 1)
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Byte offset within the file
    pub fn byte(&self) -> u64 {
        self.byte
    }
}

/// FASTA reading error
///
/// The parser itself is permissive and never rejects file content; all
/// variants concern the input source, not the format.
#[derive(Debug)]
pub enum Error {
    /// io::Error
    Io(io::Error),
    /// Input is not valid UTF-8
    Utf8(Utf8Error),
    /// Size limit of the line buffer was reached, which happens if
    /// `policy::BufPolicy::grow_to()` returned `None`. This does not happen
    /// with the default `policy::StdPolicy`.
    BufferLimit,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Io(ref e) => e.fmt(f),
            Error::Utf8(ref e) => write!(f, "FASTA read error: invalid UTF-8 in input ({})", e),
            Error::BufferLimit => write!(f, "FASTA read error: line buffer limit reached."),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<Utf8Error> for Error {
    fn from(e: Utf8Error) -> Error {
        Error::Utf8(e)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Io(ref e) => Some(e),
            Error::Utf8(ref e) => Some(e),
            Error::BufferLimit => None,
        }
    }
}

/// A FASTA record with a trimmed header and an uppercased sequence,
/// concatenated from all body lines without separators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    pub head: String,
    pub seq: String,
}

impl SequenceRecord {
    /// Returns the ID of the record (everything before an optional space).
    ///
    /// # Example
    ///
    /// ```
    /// use fasta_comp::fasta::parse_str;
    ///
    /// let records = parse_str(">id description here\nACGT");
    /// assert_eq!(records[0].id(), "id");
    /// assert_eq!(records[0].desc(), Some("description here"));
    /// ```
    #[inline]
    pub fn id(&self) -> &str {
        self.head.split(' ').next().unwrap()
    }

    /// Returns the description part of the header (everything after the
    /// first space), if present.
    #[inline]
    pub fn desc(&self) -> Option<&str> {
        self.head.splitn(2, ' ').nth(1)
    }

    /// Returns both the ID and the description of the record (if present).
    /// This should be faster than calling `id()` and `desc()` separately.
    #[inline]
    pub fn id_desc(&self) -> (&str, Option<&str>) {
        let mut h = self.head.splitn(2, ' ');
        (h.next().unwrap(), h.next())
    }

    /// Computes the composition statistics of the record's sequence.
    ///
    /// # Example
    ///
    /// ```
    /// use fasta_comp::fasta::parse_str;
    ///
    /// let records = parse_str(">id\nAACG");
    /// let stats = records[0].composition();
    /// assert_eq!(stats.total(), 4);
    /// assert_eq!(stats.count_of('A'), 2);
    /// ```
    #[inline]
    pub fn composition(&self) -> CompositionStats {
        comp::analyze(&self.seq)
    }

    /// Writes the record to the given `io::Write` instance. The sequence
    /// will occupy one line only.
    #[inline]
    pub fn write<W: io::Write>(&self, writer: W) -> io::Result<()> {
        write_to(writer, &self.head, &self.seq)
    }

    /// Writes the record to the given `io::Write` instance. The sequence is
    /// wrapped to produce multi-line FASTA with a maximum width specified
    /// by `wrap`.
    #[inline]
    pub fn write_wrap<W: io::Write>(&self, mut writer: W, wrap: usize) -> io::Result<()> {
        write_head(&mut writer, &self.head)?;
        write_wrap_seq(&mut writer, &self.seq, wrap)
    }
}

/// Writes data (not necessarily stored in a `SequenceRecord` instance) to
/// the FASTA format.
#[inline]
pub fn write_to<W>(mut writer: W, head: &str, seq: &str) -> io::Result<()>
where
    W: io::Write,
{
    write_head(&mut writer, head)?;
    write_seq(&mut writer, seq)
}

/// Writes only the sequence header.
#[inline]
pub fn write_head<W>(mut writer: W, head: &str) -> io::Result<()>
where
    W: io::Write,
{
    writer.write_all(b">")?;
    writer.write_all(head.as_bytes())?;
    writer.write_all(b"\n")
}

/// Writes only the sequence line.
#[inline]
pub fn write_seq<W>(mut writer: W, seq: &str) -> io::Result<()>
where
    W: io::Write,
{
    writer.write_all(seq.as_bytes())?;
    writer.write_all(b"\n")
}

/// Writes the sequence, wrapping the output to a maximum width specified by
/// `wrap`.
#[inline]
pub fn write_wrap_seq<W>(mut writer: W, seq: &str, wrap: usize) -> io::Result<()>
where
    W: io::Write,
{
    assert!(wrap > 0);
    for chunk in seq.as_bytes().chunks(wrap) {
        writer.write_all(chunk)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}
