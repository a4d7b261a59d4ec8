//! This library reads FASTA files and computes per-sequence composition
//! statistics (symbol alphabet, counts and percentages). It is meant as the
//! core behind viewers and command line tools that need to inspect
//! nucleotide or protein sequence content without reimplementing format
//! parsing or statistical aggregation.
//!
//! The parser is permissive: blank lines are skipped anywhere,
//! stray content before the first header is dropped, and malformed content
//! never causes an error. Only I/O and encoding problems are reported.
//! Records are returned with trimmed headers and uppercased, concatenated
//! sequences, ready for analysis.
//!
//! # More detailed documentation
//!
//! Please refer to the module docs for more information on the exact parsing
//! and analysis behaviour:
//!
//! * [`fasta module`](fasta) and [`fasta::Reader`](fasta/struct.Reader.html)
//! * [`comp module`](comp) and [`comp::analyze`](comp/fn.analyze.html)
//!
//! # Example: reading records
//!
//! This code prints the header of each record in a file:
//!
//! ```no_run
//! use fasta_comp::fasta::Reader;
//!
//! let mut reader = Reader::from_path("seqs.fasta").unwrap();
//!
//! while let Some(record) = reader.next() {
//!     let record = record.expect("Error reading record");
//!     println!("{}", record.head);
//! }
//! ```
//!
//! # Example: analyzing composition
//!
//! Each record's sequence can be handed to the analyzer, which returns the
//! alphabet in ascending order along with counts and percentages:
//!
//! ```
//! use fasta_comp::fasta::Reader;
//!
//! let input = b">seq1
//! acgg
//! GCAT
//! >seq2
//! TTGA";
//!
//! let mut reader = Reader::new(&input[..]);
//!
//! while let Some(record) = reader.next() {
//!     let record = record.expect("Error reading record");
//!     let stats = record.composition();
//!     for (symbol, count) in stats.counts() {
//!         println!("{}\t{}\t{:.2}%", symbol, count, stats.percentage_of(*symbol));
//!     }
//! }
//! ```
//!
//! # In-memory text
//!
//! Text that is already in memory does not involve I/O and can be parsed
//! without any `Result` handling:
//!
//! ```
//! let records = fasta_comp::fasta::parse_str(">id\nACGT");
//! assert_eq!(records.len(), 1);
//! ```
//!
//! # Long lines
//!
//! The readers use a buffer of 64 KiB size, which holds the line currently
//! being parsed. If a longer line is encountered, the buffer automatically
//! grows. How it grows can be configured, and a size limit can be imposed,
//! by applying another policy:
//!
//! ```no_run
//! use fasta_comp::fasta::Reader;
//! use fasta_comp::policy::DoubleUntilLimited;
//!
//! // The buffer doubles its size until 16 MiB, then grows by steps
//! // of 16 MiB. If it reaches 256 MiB, there will be an error.
//! let policy = DoubleUntilLimited::new(1 << 24, 1 << 28);
//! let mut reader = Reader::from_path("input.fasta").unwrap()
//!     .set_policy(policy);
//! // (...)
//! ```
//! For information on how to create a custom policy, refer to the
//! [`policy`](policy) module docs.

extern crate buffer_redux;
extern crate memchr;

#[macro_use]
extern crate serde_derive;
extern crate serde;

use std::io;

macro_rules! try_opt {
    ($expr: expr) => {
        match $expr {
            Ok(item) => item,
            Err(e) => return Some(Err(::std::convert::From::from(e))),
        }
    };
}

pub mod comp;
pub mod fasta;
pub mod policy;

/// Remove a final '\r' from a byte slice
#[inline]
fn trim_cr(line: &[u8]) -> &[u8] {
    if let Some((&b'\r', remaining)) = line.split_last() {
        remaining
    } else {
        line
    }
}

/// Makes sure the buffer is full after this call (unless EOF reached)
/// code adapted from `io::Read::read_exact`
fn fill_buf<R>(
    reader: &mut buffer_redux::BufReader<R, buffer_redux::policy::StdPolicy>,
) -> io::Result<usize>
where
    R: io::Read,
{
    let initial_size = reader.buffer().len();
    let mut num_read = 0;
    while initial_size + num_read < reader.capacity() {
        match reader.read_into_buf() {
            Ok(0) => break,
            Ok(n) => num_read += n,
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(num_read)
}
