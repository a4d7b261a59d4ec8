/// Policy that decides how the line buffer of a reader should grow
///
/// The buffer of [`fasta::Reader`](../fasta/struct.Reader.html) holds one
/// input line at a time and only needs to grow when a single line exceeds
/// it. A policy takes the current buffer size in bytes and returns the new
/// size the buffer should grow to. Returning `None` instead will indicate
/// that the buffer has grown too big; the reader then returns
/// `fasta::Error::BufferLimit`.
///
/// # Example
///
/// ```no_run
/// use fasta_comp::fasta::Reader;
/// use fasta_comp::policy::BufPolicy;
/// use std::io::stdin;
///
/// struct Max64M;
///
/// // This policy lets the buffer double each time, but limits it to
/// // 64 MiB. A line longer than that is certainly not sequence data.
/// impl BufPolicy for Max64M {
///     fn grow_to(&mut self, current_size: usize) -> Option<usize> {
///         if current_size > 1 << 26 {
///             return None;
///         }
///         Some(current_size * 2)
///     }
/// }
///
/// let mut reader = Reader::new(stdin()).set_policy(Max64M);
///
/// while let Some(record) = reader.next() {
///     println!("{}", record.unwrap().id());
/// }
/// ```
pub trait BufPolicy {
    fn grow_to(&mut self, current_size: usize) -> Option<usize>;
}

/// Standard buffer policy: buffer size doubles until it reaches 1 MiB.
/// Above, it will increase in steps of 1 MiB. Buffer size is not limited,
/// it could theoretically grow indefinitely.
pub struct StdPolicy;

impl BufPolicy for StdPolicy {
    fn grow_to(&mut self, current_size: usize) -> Option<usize> {
        Some(if current_size < 1 << 20 {
            current_size * 2
        } else {
            current_size + (1 << 20)
        })
    }
}

/// Buffer size doubles until it reaches `double_until` bytes. Above, it
/// will increase linearly in steps of `double_until`. Buffer size is
/// additionally limited to `limit` bytes; readers will return an error if
/// a line requires more than that.
pub struct DoubleUntilLimited {
    double_until: usize,
    limit: usize,
}

impl DoubleUntilLimited {
    pub fn new(double_until: usize, limit: usize) -> Self {
        DoubleUntilLimited {
            double_until,
            limit,
        }
    }
}

impl BufPolicy for DoubleUntilLimited {
    fn grow_to(&mut self, current_size: usize) -> Option<usize> {
        let new_size = if current_size < self.double_until {
            current_size * 2
        } else {
            current_size + self.double_until
        };
        if new_size <= self.limit {
            Some(new_size)
        } else {
            None
        }
    }
}
