//! Position and view-type mapping.
//!
//! [`PositionMap`] translates between the public position space seen by the
//! host (headers, then wrapped items, then footers) and the private position
//! space of the wrapped adapter. [`ViewTypeBands`] assigns and decodes the
//! reserved view types carried by headers and footers.
//!
//! Everything here is pure: both types are small `Copy` snapshots and no
//! method touches an adapter.

use std::fmt;

use super::traits::ViewType;

/// Base of the header view-type band.
pub const DEFAULT_HEADER_BASE: ViewType = i32::MIN;

/// Number of view types in each reserved band.
pub const DEFAULT_BAND_WIDTH: u32 = 1 << 20;

/// Base of the footer view-type band, directly above the header band.
pub const DEFAULT_FOOTER_BASE: ViewType = i32::MIN + DEFAULT_BAND_WIDTH as i32;

/// Which kind of fixed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedKind {
    /// Shown before the wrapped items.
    Header,
    /// Shown after the wrapped items.
    Footer,
}

impl fmt::Display for FixedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => write!(f, "header"),
            Self::Footer => write!(f, "footer"),
        }
    }
}

/// What a public position resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The header at this index.
    Header(usize),
    /// The wrapped item at this private position.
    Item(usize),
    /// The footer at this index.
    Footer(usize),
}

/// Region sizes of a decorated list.
///
/// ```text
/// [0, header_count)                         headers
/// [header_count, header_count + item_count) wrapped items
/// [header_count + item_count, total)        footers
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PositionMap {
    header_count: usize,
    item_count: usize,
    footer_count: usize,
}

impl PositionMap {
    /// Creates a map from the three region sizes.
    pub const fn new(header_count: usize, item_count: usize, footer_count: usize) -> Self {
        Self {
            header_count,
            item_count,
            footer_count,
        }
    }

    /// Number of headers.
    pub const fn header_count(&self) -> usize {
        self.header_count
    }

    /// Number of wrapped items.
    pub const fn item_count(&self) -> usize {
        self.item_count
    }

    /// Number of footers.
    pub const fn footer_count(&self) -> usize {
        self.footer_count
    }

    /// Total number of public positions.
    pub const fn total(&self) -> usize {
        self.header_count
            .saturating_add(self.item_count)
            .saturating_add(self.footer_count)
    }

    /// First public position after the wrapped items.
    const fn footer_start(&self) -> usize {
        self.header_count.saturating_add(self.item_count)
    }

    /// Returns `true` if `position` falls in the header region.
    ///
    /// Always `false` when there are no headers.
    pub const fn is_header_position(&self, position: usize) -> bool {
        position < self.header_count
    }

    /// Returns `true` if `position` is at or after the first footer position.
    ///
    /// This does not check the upper bound; use [`resolve`](Self::resolve)
    /// for a bounds-checked answer.
    pub const fn is_footer_position(&self, position: usize) -> bool {
        position >= self.footer_start()
    }

    /// Returns `true` if `position` falls in the wrapped item region.
    pub const fn is_item_position(&self, position: usize) -> bool {
        !self.is_header_position(position) && !self.is_footer_position(position)
    }

    /// Translates a public position to the wrapped adapter's position.
    ///
    /// Returns `None` for header, footer and out-of-range positions.
    pub fn to_wrapped_position(&self, position: usize) -> Option<usize> {
        self.is_item_position(position)
            .then(|| position - self.header_count)
    }

    /// Translates a wrapped adapter position to the public position.
    ///
    /// Returns `None` if `private` is not a wrapped item.
    pub fn to_public_position(&self, private: usize) -> Option<usize> {
        (private < self.item_count).then(|| private + self.header_count)
    }

    /// Resolves a public position to the slot it displays.
    ///
    /// Returns `None` if `position >= total()`.
    pub fn resolve(&self, position: usize) -> Option<Slot> {
        if self.is_header_position(position) {
            Some(Slot::Header(position))
        } else if self.is_item_position(position) {
            Some(Slot::Item(position - self.header_count))
        } else if position < self.total() {
            Some(Slot::Footer(position - self.footer_start()))
        } else {
            None
        }
    }

    /// Number of grid tracks the item at `position` occupies.
    ///
    /// Headers and footers fill the row; wrapped items take one track.
    pub fn span_size(&self, position: usize, span_count: usize) -> usize {
        if self.is_header_position(position) || self.is_footer_position(position) {
            span_count
        } else {
            1
        }
    }
}

/// The reserved view-type bands for headers and footers.
///
/// The header at index `i` carries `header_base + i`; the footer at index `i`
/// carries `footer_base + i`. Each band holds `width` types. Bands are
/// validated by [`AdapterConfig::validate`](crate::config::AdapterConfig::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewTypeBands {
    header_base: ViewType,
    footer_base: ViewType,
    width: u32,
}

impl Default for ViewTypeBands {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER_BASE, DEFAULT_FOOTER_BASE, DEFAULT_BAND_WIDTH)
    }
}

impl ViewTypeBands {
    /// Creates bands from their bases and common width.
    pub const fn new(header_base: ViewType, footer_base: ViewType, width: u32) -> Self {
        Self {
            header_base,
            footer_base,
            width,
        }
    }

    /// Returns the base view type of a band.
    pub const fn base(&self, kind: FixedKind) -> ViewType {
        match kind {
            FixedKind::Header => self.header_base,
            FixedKind::Footer => self.footer_base,
        }
    }

    /// Number of view types in each band.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of fixed items each band can tag.
    pub fn capacity(&self) -> usize {
        usize::try_from(self.width).unwrap_or(usize::MAX)
    }

    /// Returns the view type for the fixed item at `index`.
    ///
    /// Returns `None` if `index` is beyond the band.
    pub fn tag(&self, kind: FixedKind, index: usize) -> Option<ViewType> {
        if index >= self.capacity() {
            return None;
        }
        let tag = i64::from(self.base(kind)) + i64::try_from(index).ok()?;
        ViewType::try_from(tag).ok()
    }

    /// Returns the index within the band of `kind` that `view_type` encodes.
    pub fn index_in_band(&self, kind: FixedKind, view_type: ViewType) -> Option<usize> {
        let offset = i64::from(view_type) - i64::from(self.base(kind));
        if offset < 0 || offset >= i64::from(self.width) {
            return None;
        }
        usize::try_from(offset).ok()
    }

    /// Returns `true` if `view_type` lies in either reserved band.
    pub fn is_reserved(&self, view_type: ViewType) -> bool {
        self.decode(view_type).is_some()
    }

    /// Decodes a view type into the band and index it encodes.
    pub fn decode(&self, view_type: ViewType) -> Option<(FixedKind, usize)> {
        [FixedKind::Header, FixedKind::Footer]
            .into_iter()
            .find_map(|kind| Some((kind, self.index_in_band(kind, view_type)?)))
    }

    /// Returns `true` if `view_type` tags one of `header_count` headers.
    pub fn is_header_type(&self, view_type: ViewType, header_count: usize) -> bool {
        self.header_index_from_type(view_type)
            .is_some_and(|index| index < header_count)
    }

    /// Returns `true` if `view_type` tags one of `footer_count` footers.
    pub fn is_footer_type(&self, view_type: ViewType, footer_count: usize) -> bool {
        self.footer_index_from_type(view_type)
            .is_some_and(|index| index < footer_count)
    }

    /// Returns the header index `view_type` encodes.
    pub fn header_index_from_type(&self, view_type: ViewType) -> Option<usize> {
        self.index_in_band(FixedKind::Header, view_type)
    }

    /// Returns the footer index `view_type` encodes.
    pub fn footer_index_from_type(&self, view_type: ViewType) -> Option<usize> {
        self.index_in_band(FixedKind::Footer, view_type)
    }

    /// Returns `true` if the header and footer bands share any view type.
    pub fn overlaps(&self) -> bool {
        let width = i64::from(self.width);
        let header = i64::from(self.header_base);
        let footer = i64::from(self.footer_base);
        header < footer + width && footer < header + width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions() {
        // 2 headers, 3 items, 1 footer
        let map = PositionMap::new(2, 3, 1);
        assert_eq!(map.total(), 6);

        assert!(map.is_header_position(0));
        assert!(map.is_header_position(1));
        assert!(!map.is_header_position(2));

        assert!(map.is_item_position(2));
        assert!(map.is_item_position(4));
        assert!(!map.is_item_position(5));

        assert!(map.is_footer_position(5));
        assert!(!map.is_footer_position(4));
    }

    #[test]
    fn test_no_headers() {
        let map = PositionMap::new(0, 2, 0);
        assert!((0..2).all(|p| !map.is_header_position(p)));
        assert_eq!(map.resolve(0), Some(Slot::Item(0)));
        assert_eq!(map.resolve(2), None);
    }

    #[test]
    fn test_resolve() {
        let map = PositionMap::new(2, 3, 1);
        let slots: Vec<_> = (0..7).map(|p| map.resolve(p)).collect();
        assert_eq!(
            slots,
            vec![
                Some(Slot::Header(0)),
                Some(Slot::Header(1)),
                Some(Slot::Item(0)),
                Some(Slot::Item(1)),
                Some(Slot::Item(2)),
                Some(Slot::Footer(0)),
                None,
            ]
        );
    }

    #[test]
    fn test_wrapped_position_translation() {
        let map = PositionMap::new(2, 3, 1);
        assert_eq!(map.to_wrapped_position(1), None);
        assert_eq!(map.to_wrapped_position(2), Some(0));
        assert_eq!(map.to_wrapped_position(4), Some(2));
        assert_eq!(map.to_wrapped_position(5), None);

        assert_eq!(map.to_public_position(0), Some(2));
        assert_eq!(map.to_public_position(2), Some(4));
        assert_eq!(map.to_public_position(3), None);
    }

    #[test]
    fn test_empty_wrapped_adapter() {
        // Footers follow headers directly
        let map = PositionMap::new(1, 0, 2);
        assert_eq!(map.resolve(0), Some(Slot::Header(0)));
        assert_eq!(map.resolve(1), Some(Slot::Footer(0)));
        assert_eq!(map.resolve(2), Some(Slot::Footer(1)));
        assert_eq!(map.to_wrapped_position(1), None);
    }

    #[test]
    fn test_span_size() {
        let map = PositionMap::new(1, 4, 1);
        assert_eq!(map.span_size(0, 3), 3);
        assert_eq!(map.span_size(1, 3), 1);
        assert_eq!(map.span_size(4, 3), 1);
        assert_eq!(map.span_size(5, 3), 3);
    }

    #[test]
    fn test_default_bands() {
        let bands = ViewTypeBands::default();
        assert!(!bands.overlaps());

        assert_eq!(bands.tag(FixedKind::Header, 0), Some(DEFAULT_HEADER_BASE));
        assert_eq!(bands.tag(FixedKind::Footer, 1), Some(DEFAULT_FOOTER_BASE + 1));
        assert_eq!(
            bands.tag(FixedKind::Header, DEFAULT_BAND_WIDTH as usize),
            None
        );

        // Small integer types used by ordinary adapters are never reserved
        assert!((-16..=1024).all(|t| !bands.is_reserved(t)));
    }

    #[test]
    fn test_decode() {
        let bands = ViewTypeBands::default();
        let header = bands.tag(FixedKind::Header, 7).unwrap();
        let footer = bands.tag(FixedKind::Footer, 3).unwrap();

        assert_eq!(bands.decode(header), Some((FixedKind::Header, 7)));
        assert_eq!(bands.decode(footer), Some((FixedKind::Footer, 3)));
        assert_eq!(bands.decode(0), None);
    }

    #[test]
    fn test_type_membership_uses_count() {
        let bands = ViewTypeBands::default();
        let second_header = bands.tag(FixedKind::Header, 1).unwrap();

        assert!(bands.is_header_type(second_header, 2));
        assert!(!bands.is_header_type(second_header, 1));
        assert!(!bands.is_footer_type(second_header, 2));
        assert_eq!(bands.header_index_from_type(second_header), Some(1));
        assert_eq!(bands.footer_index_from_type(second_header), None);
    }

    #[test]
    fn test_overlapping_bands() {
        assert!(ViewTypeBands::new(-100, -95, 10).overlaps());
        assert!(!ViewTypeBands::new(-100, -90, 10).overlaps());
        assert!(ViewTypeBands::new(-100, -100, 1).overlaps());
    }

    #[test]
    fn test_band_near_upper_limit() {
        let bands = ViewTypeBands::new(i32::MAX - 1, 0, 4);
        assert_eq!(bands.tag(FixedKind::Header, 1), Some(i32::MAX));
        assert_eq!(bands.tag(FixedKind::Header, 2), None);
    }
}
