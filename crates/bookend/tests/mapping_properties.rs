//! Property tests for position and view-type mapping.

use std::sync::Arc;

use proptest::prelude::*;

use bookend::AdapterObservable;
use bookend::adapter::{
    FixedKind, FixedView, HeaderFooterAdapter, LayoutParams, ListAdapter, PositionMap, Slot,
    ViewType, ViewTypeBands, Visibility,
};

struct Blank;

impl FixedView for Blank {
    fn set_visibility(&self, _visibility: Visibility) {}
    fn set_layout_params(&self, _params: LayoutParams) {}
}

/// Wrapped adapter with `count` items, item `i` of view type `i`.
struct Numbered {
    count: usize,
    observable: AdapterObservable,
}

impl ListAdapter for Numbered {
    type Holder = usize;

    fn item_count(&self) -> usize {
        self.count
    }

    fn item_view_type(&self, position: usize) -> ViewType {
        position as ViewType
    }

    fn create_view(&self, _view_type: ViewType) -> usize {
        usize::MAX
    }

    fn bind_view(&self, holder: &mut usize, position: usize) {
        *holder = position;
    }

    fn observable(&self) -> &AdapterObservable {
        &self.observable
    }
}

#[derive(Debug, Clone)]
enum Op {
    AddHeader,
    AddFooter,
    RemoveHeader(usize),
    RemoveFooter(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::AddHeader),
        Just(Op::AddFooter),
        (0usize..8).prop_map(Op::RemoveHeader),
        (0usize..8).prop_map(Op::RemoveFooter),
    ]
}

proptest! {
    #[test]
    fn prop_every_position_resolves_once(h in 0usize..20, i in 0usize..50, f in 0usize..20) {
        let map = PositionMap::new(h, i, f);
        prop_assert_eq!(map.total(), h + i + f);

        let slots: Vec<Slot> = (0..map.total()).filter_map(|p| map.resolve(p)).collect();
        prop_assert_eq!(slots.len(), map.total());
        prop_assert_eq!(slots.iter().filter(|s| matches!(s, Slot::Header(_))).count(), h);
        prop_assert_eq!(slots.iter().filter(|s| matches!(s, Slot::Item(_))).count(), i);
        prop_assert_eq!(slots.iter().filter(|s| matches!(s, Slot::Footer(_))).count(), f);
        prop_assert!(map.resolve(map.total()).is_none());
    }

    #[test]
    fn prop_position_translation_round_trips(h in 0usize..20, i in 1usize..50, f in 0usize..20, seed in any::<usize>()) {
        let map = PositionMap::new(h, i, f);
        let private = seed % i;

        let public = map.to_public_position(private).unwrap();
        prop_assert_eq!(public, private + h);
        prop_assert_eq!(map.to_wrapped_position(public), Some(private));
    }

    #[test]
    fn prop_bands_never_collide(index in 0usize..(1 << 20)) {
        let bands = ViewTypeBands::default();
        let header = bands.tag(FixedKind::Header, index).unwrap();
        let footer = bands.tag(FixedKind::Footer, index).unwrap();

        prop_assert_ne!(header, footer);
        prop_assert_eq!(bands.decode(header), Some((FixedKind::Header, index)));
        prop_assert_eq!(bands.decode(footer), Some((FixedKind::Footer, index)));
    }

    #[test]
    fn prop_fixed_view_types_stay_dense(items in 0usize..10, ops in prop::collection::vec(op(), 0..40)) {
        let adapter: HeaderFooterAdapter<Numbered> = HeaderFooterAdapter::new(Arc::new(Numbered {
            count: items,
            observable: AdapterObservable::new(),
        }));
        let bands = adapter.bands();

        for op in ops {
            match op {
                Op::AddHeader => adapter.add_header(Arc::new(Blank) as Arc<dyn FixedView>).unwrap(),
                Op::AddFooter => adapter.add_footer(Arc::new(Blank) as Arc<dyn FixedView>).unwrap(),
                Op::RemoveHeader(n) => {
                    if let Some(view) = adapter.headers().get(n) {
                        prop_assert!(adapter.remove_header(view));
                    }
                }
                Op::RemoveFooter(n) => {
                    if let Some(view) = adapter.footers().get(n) {
                        prop_assert!(adapter.remove_footer(view));
                    }
                }
            }

            let h = adapter.header_count();
            let f = adapter.footer_count();
            prop_assert_eq!(adapter.item_count(), h + items + f);

            for p in 0..adapter.item_count() {
                let view_type = adapter.view_type_at(p).unwrap();
                let expected = if p < h {
                    bands.tag(FixedKind::Header, p).unwrap()
                } else if p < h + items {
                    (p - h) as ViewType
                } else {
                    bands.tag(FixedKind::Footer, p - h - items).unwrap()
                };
                prop_assert_eq!(view_type, expected);
            }
        }
    }
}
