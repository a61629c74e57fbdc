use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicI64, Ordering},
    },
};

///
/// SequenceRef
///
/// `NEXT VALUE FOR name`: every evaluation advances the shared counter, so
/// evaluating it is an externally visible side effect. Clones share the
/// counter.
///

#[derive(Clone, Debug)]
pub struct SequenceRef {
    name: String,
    next: Arc<AtomicI64>,
    increment: i64,
}

impl SequenceRef {
    #[must_use]
    pub fn new(name: impl Into<String>, start: i64, increment: i64) -> Self {
        Self {
            name: name.into(),
            next: Arc::new(AtomicI64::new(start)),
            increment,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the current value and advance the sequence.
    pub fn advance(&self) -> i64 {
        self.next.fetch_add(self.increment, Ordering::SeqCst)
    }

    /// The value the next `advance` will return.
    #[must_use]
    pub fn peek(&self) -> i64 {
        self.next.load(Ordering::SeqCst)
    }
}

impl PartialEq for SequenceRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.next, &other.next)
    }
}

impl Eq for SequenceRef {}

impl fmt::Display for SequenceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NEXT VALUE FOR {}", self.name)
    }
}
