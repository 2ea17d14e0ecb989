//! Custom ID generation for components bound to a store.
//!
//! Every ID starts with the store's header followed by `:`, which is how a
//! store recognises the interactions that belong to it.

use std::sync::atomic::{AtomicU64, Ordering};

pub const SEPARATOR: char = ':';

/// 8 random bytes as 16 lowercase hex characters.
///
/// Both halves of a v4 UUID are folded together so the fixed version and
/// variant bits don't show up in the header.
pub fn random_header() -> String {
    let (high, low) = uuid::Uuid::new_v4().as_u64_pair();
    format!("{:016x}", high ^ low.rotate_left(32))
}

#[derive(Debug)]
pub struct IdGenerator {
    header: String,
    counter: AtomicU64,
}

impl IdGenerator {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            counter: AtomicU64::new(0),
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn next(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}{}{}", self.header, SEPARATOR, n)
    }

    pub fn from_parts<P>(&self, parts: P) -> String
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let mut custom_id = self.header.clone();
        let mut empty = true;

        for part in parts {
            custom_id.push(SEPARATOR);
            custom_id.push_str(part.as_ref());
            empty = false;
        }

        if empty {
            return self.next();
        }

        custom_id
    }

    pub fn owns(&self, custom_id: &str) -> bool {
        self.strip_header(custom_id).is_some()
    }

    fn strip_header<'a>(&self, custom_id: &'a str) -> Option<&'a str> {
        custom_id
            .strip_prefix(self.header.as_str())?
            .strip_prefix(SEPARATOR)
    }

    pub fn strip<'a>(&self, custom_id: &'a str) -> &'a str {
        self.strip_header(custom_id).unwrap_or(custom_id)
    }
}
