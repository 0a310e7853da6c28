//! Windowed list layout: only rows intersecting the viewport, plus a small
//! overscan, are materialized.
//!
//! Row sizes start at a fixed estimate and are replaced by real sizes as
//! rows get measured. Offsets are recomputed from the current sizes on each
//! query, so a measurement shifts every row below it.

pub const DEFAULT_ESTIMATE: u32 = 50;
pub const DEFAULT_OVERSCAN: usize = 1;

/// One materialized row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualRow {
    pub index: usize,
    /// Offset of the row's leading edge from the top of the list.
    pub start: u32,
    pub size: u32,
}

impl VirtualRow {
    #[must_use]
    pub fn end(&self) -> u32 {
        self.start.saturating_add(self.size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VirtualWindow {
    pub rows: Vec<VirtualRow>,
    /// Extent of the whole list using measured sizes where known.
    pub total_size: u32,
}

#[derive(Debug, Clone)]
pub struct Virtualizer {
    estimate: u32,
    overscan: usize,
    measured: Vec<Option<u32>>,
}

impl Default for Virtualizer {
    fn default() -> Self {
        Self::new(DEFAULT_ESTIMATE, DEFAULT_OVERSCAN)
    }
}

impl Virtualizer {
    #[must_use]
    pub fn new(estimate: u32, overscan: usize) -> Self {
        Self {
            estimate,
            overscan,
            measured: Vec::new(),
        }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.measured.len()
    }

    /// Resizes the list. Measurements for surviving indices are kept.
    pub fn set_count(&mut self, count: usize) {
        self.measured.resize(count, None);
    }

    /// Drops every measurement, reverting all rows to the estimate.
    pub fn reset_measurements(&mut self) {
        self.measured.iter_mut().for_each(|m| *m = None);
    }

    /// Records the real size of row `index`. Returns `true` if the recorded
    /// size changed. Out-of-range indices are ignored.
    pub fn measure(&mut self, index: usize, size: u32) -> bool {
        match self.measured.get_mut(index) {
            Some(slot) if *slot != Some(size) => {
                *slot = Some(size);
                true
            }
            _ => false,
        }
    }

    fn size_of(&self, index: usize) -> u32 {
        self.measured
            .get(index)
            .copied()
            .flatten()
            .unwrap_or(self.estimate)
    }

    /// Start offsets of every row, followed by the total size.
    fn offsets(&self) -> Vec<u32> {
        let mut offsets = Vec::with_capacity(self.count() + 1);
        let mut cursor = 0u32;
        offsets.push(cursor);
        for index in 0..self.count() {
            cursor = cursor.saturating_add(self.size_of(index));
            offsets.push(cursor);
        }
        offsets
    }

    #[must_use]
    pub fn total_size(&self) -> u32 {
        self.offsets().last().copied().unwrap_or(0)
    }

    /// Rows intersecting `[scroll_offset, scroll_offset + viewport)`, widened
    /// by the overscan on each side. A scroll offset past the end is clamped
    /// so the last page stays in view.
    #[must_use]
    pub fn window(&self, scroll_offset: u32, viewport: u32) -> VirtualWindow {
        let offsets = self.offsets();
        let count = self.count();
        let total_size = offsets[count];
        if count == 0 {
            return VirtualWindow {
                rows: Vec::new(),
                total_size,
            };
        }

        let scroll_offset = scroll_offset.min(total_size.saturating_sub(viewport));
        let view_end = scroll_offset.saturating_add(viewport);

        let first = offsets[1..]
            .partition_point(|&row_end| row_end <= scroll_offset)
            .min(count - 1);
        let last = offsets[..count]
            .partition_point(|&row_start| row_start < view_end)
            .saturating_sub(1)
            .max(first);

        let from = first.saturating_sub(self.overscan);
        let to = (last + self.overscan).min(count - 1);

        let rows = (from..=to)
            .map(|index| VirtualRow {
                index,
                start: offsets[index],
                size: offsets[index + 1] - offsets[index],
            })
            .collect();

        VirtualWindow { rows, total_size }
    }
}
