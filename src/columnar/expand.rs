//! Broadcasting of group- and chain-level values onto per-atom buffers.
//!
//! Every helper allocates an owned buffer sized to the indexed atom count and fills the
//! half-open range of each unit exactly once. A range that does not fit the buffer is an
//! index-builder defect and is reported as [`Error::InternalIndexFault`].

use super::error::{Error, IndexUnit};

/// Fills `offsets[i]..offsets[i + 1]` of a fresh buffer for every unit `i`.
///
/// # Arguments
///
/// * `offsets` - Unit start offsets including the trailing sentinel.
/// * `len` - Length of the output buffer (the indexed atom count).
/// * `unit` - Granularity of `offsets`, used for fault reporting.
/// * `fill` - Callback receiving the unit ordinal and its mutable atom slice.
///
/// # Returns
///
/// The populated buffer, or the first error raised by a range check or by `fill`.
pub fn fill_ranges<T, F>(offsets: &[usize], len: usize, unit: IndexUnit, mut fill: F) -> Result<Vec<T>, Error>
where
    T: Clone + Default,
    F: FnMut(usize, &mut [T]) -> Result<(), Error>,
{
    let mut out = vec![T::default(); len];
    for (ordinal, bounds) in offsets.windows(2).enumerate() {
        let (start, end) = (bounds[0], bounds[1]);
        let slot = out
            .get_mut(start..end)
            .ok_or_else(|| Error::index_fault(unit, ordinal, start, end, len))?;
        fill(ordinal, slot)?;
    }
    Ok(out)
}

/// Broadcasts one scalar per unit over the unit's atom range.
pub fn broadcast<T, F>(offsets: &[usize], len: usize, unit: IndexUnit, mut value: F) -> Result<Vec<T>, Error>
where
    T: Clone + Default,
    F: FnMut(usize) -> Result<T, Error>,
{
    fill_ranges(offsets, len, unit, |ordinal, slot| {
        slot.fill(value(ordinal)?);
        Ok(())
    })
}

/// Copies one per-atom sub-list per unit into the unit's atom range.
///
/// The sub-list must be exactly as long as the range; anything else means the offsets
/// disagree with the data they were computed from.
pub fn scatter<'s, S, T, F, C>(
    offsets: &[usize],
    len: usize,
    unit: IndexUnit,
    mut source: F,
    convert: C,
) -> Result<Vec<T>, Error>
where
    S: 's,
    T: Clone + Default,
    F: FnMut(usize) -> Result<&'s [S], Error>,
    C: Fn(&S) -> T,
{
    fill_ranges(offsets, len, unit, |ordinal, slot| {
        let values = source(ordinal)?;
        if values.len() != slot.len() {
            let start = offsets[ordinal];
            return Err(Error::index_fault(unit, ordinal, start, start + values.len(), len));
        }
        for (dst, src) in slot.iter_mut().zip(values) {
            *dst = convert(src);
        }
        Ok(())
    })
}

/// Inverts an offset array into a per-atom owner map.
pub fn owners(offsets: &[usize], len: usize, unit: IndexUnit) -> Result<Vec<usize>, Error> {
    broadcast(offsets, len, unit, Ok)
}
