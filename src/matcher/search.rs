use std::cmp::Ordering;

use crate::fault::{fault, FaultHandler};

/// A sibling range whose labels do not resolve in the string table. Already
/// reported to the fault handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CorruptRange;

/// Binary search over siblings sorted by label bytes.
///
/// `label_of` resolves an entry to its label; an entry that does not resolve
/// means the tables are corrupt, which is reported once and ends the search
/// with [`CorruptRange`].
pub(crate) fn find_in_range<'t, E>(
    items: &'t [E],
    target: &[u8],
    faults: &dyn FaultHandler,
    label_of: impl Fn(&'t E) -> Option<&'t [u8]>,
) -> Result<Option<(&'t E, &'t [u8])>, CorruptRange> {
    let (mut lo, mut hi) = (0, items.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let item = &items[mid];
        let Some(label) = label_of(item) else {
            fault!(faults, "string table offset resolves to a label");
            return Err(CorruptRange);
        };
        match target.cmp(label) {
            Ordering::Equal => return Ok(Some((item, label))),
            Ordering::Greater => lo = mid + 1,
            Ordering::Less => hi = mid,
        }
    }
    Ok(None)
}
