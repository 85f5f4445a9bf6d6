use crate::types::MAX_HOSTNAME_LEN;

/// Byte that replaces `.` in a normalized hostname.
pub const SEPARATOR: u8 = 0;

/// Check that a hostname can be looked up at all.
///
/// Only the overall length limit is enforced. Per-label limits (63 bytes) are
/// left to the DNS layer, since hostnames used outside DNS need not follow
/// them. Non-ASCII input (an IDN that was never converted to punycode) is
/// rejected outright, as is an embedded NUL, which would be indistinguishable
/// from a separator once normalized.
pub fn is_valid_hostname(hostname: &[u8]) -> bool {
    if hostname.len() > MAX_HOSTNAME_LEN {
        return false;
    }
    hostname.iter().all(|&b| b.is_ascii() && b != SEPARATOR)
}

/// Lowercased working copy of a hostname with NUL-separated labels.
///
/// Byte positions match the input, so an offset into this buffer is also an
/// offset into the caller's string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedHost {
    buf: Vec<u8>,
}

impl NormalizedHost {
    /// Normalize `hostname`, or return `None` if it is invalid or the
    /// working copy cannot be allocated.
    pub fn new(hostname: &str) -> Option<Self> {
        let bytes = hostname.as_bytes();
        if !is_valid_hostname(bytes) {
            return None;
        }

        let mut buf = Vec::new();
        buf.try_reserve_exact(bytes.len()).ok()?;
        buf.extend(bytes.iter().map(|&b| match b {
            b'.' => SEPARATOR,
            _ => b.to_ascii_lowercase(),
        }));

        Some(Self { buf })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}
