use super::range::Range;

/// The ambient selection of an editing surface.
///
/// Browsers keep one of these per window; here it is an explicit capability
/// handed to whatever needs to read or replace it, so a host can back it with
/// a real platform selection and tests can back it with [`DocumentSelection`].
pub trait SelectionService {
    /// Number of ranges currently selected. Zero means no caret at all.
    fn range_count(&self) -> usize;

    /// The range at `index`, if there is one.
    fn range_at(&self, index: usize) -> Option<Range>;

    fn remove_all_ranges(&mut self);

    fn add_range(&mut self, range: Range);

    /// Replace the whole selection with exactly one range.
    fn set_single_range(&mut self, range: Range) {
        self.remove_all_ranges();
        self.add_range(range);
    }
}

/// In-memory selection. Holds any number of ranges, the way multi-range
/// selections work in some browsers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSelection {
    ranges: Vec<Range>,
}

impl DocumentSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// A selection holding the single range `range`.
    pub fn with_range(range: Range) -> Self {
        Self {
            ranges: vec![range],
        }
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl SelectionService for DocumentSelection {
    fn range_count(&self) -> usize {
        self.ranges.len()
    }

    fn range_at(&self, index: usize) -> Option<Range> {
        self.ranges.get(index).copied()
    }

    fn remove_all_ranges(&mut self) {
        self.ranges.clear();
    }

    fn add_range(&mut self, range: Range) {
        self.ranges.push(range);
    }
}
