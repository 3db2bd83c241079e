//! Properties of drop reduction that hold for every list and every drop.

use formsmith_dnd::{DragPayload, DropEvent, Edge, TargetData};
use formsmith_layout::reduce;
use formsmith_schema::{DataType, Field, FieldId};
use proptest::prelude::*;

fn list(len: usize) -> Vec<Field> {
    (0..len)
        .map(|i| {
            let id = i64::try_from(i).unwrap();
            Field::new(id, format!("f{i}"), format!("Field {i}"), DataType::Text)
        })
        .collect()
}

fn names(fields: &[Field]) -> Vec<String> {
    fields.iter().map(|f| f.name.clone()).collect()
}

fn arb_edge() -> impl Strategy<Value = Edge> {
    prop_oneof![Just(Edge::Top), Just(Edge::Bottom)]
}

fn move_drop(source: usize, target: usize, edge: Edge) -> DropEvent {
    DropEvent {
        source: DragPayload::CanvasField {
            field_id: FieldId::Int(i64::try_from(source).unwrap()),
        },
        target: TargetData::row(target, edge),
    }
}

fn sidebar_drop(target: TargetData) -> DropEvent {
    DropEvent {
        source: DragPayload::SidebarField(Field::new(
            "new",
            "fresh",
            "Fresh",
            DataType::Text,
        )),
        target,
    }
}

proptest! {
    #[test]
    fn append_grows_by_one_and_keeps_prefix(len in 1usize..12) {
        let before = list(len);
        let out = reduce(&before, &sidebar_drop(TargetData::empty_zone()));
        prop_assert_eq!(out.fields.len(), len + 1);
        prop_assert_eq!(&out.fields[..len], &before[..]);
        prop_assert_eq!(out.fields[len].name.as_str(), "fresh");
    }

    #[test]
    fn top_of_i_equals_bottom_of_previous_for_sidebar(len in 2usize..12, seed in any::<usize>()) {
        let before = list(len);
        let i = 1 + seed % (len - 1);
        let top = reduce(&before, &sidebar_drop(TargetData::row(i, Edge::Top)));
        let bottom = reduce(&before, &sidebar_drop(TargetData::row(i - 1, Edge::Bottom)));
        prop_assert_eq!(top.fields, bottom.fields);
    }

    #[test]
    fn top_of_i_equals_bottom_of_previous_for_moves(
        len in 2usize..12,
        source_seed in any::<usize>(),
        target_seed in any::<usize>(),
    ) {
        let before = list(len);
        let source = source_seed % len;
        let i = 1 + target_seed % (len - 1);
        let top = reduce(&before, &move_drop(source, i, Edge::Top));
        let bottom = reduce(&before, &move_drop(source, i - 1, Edge::Bottom));
        prop_assert_eq!(top.fields, bottom.fields);
    }

    #[test]
    fn drop_on_self_is_identity(len in 1usize..12, seed in any::<usize>(), edge in arb_edge()) {
        let before = list(len);
        let i = seed % len;
        let out = reduce(&before, &move_drop(i, i, edge));
        prop_assert!(!out.changed);
        prop_assert_eq!(out.fields, before);
    }

    #[test]
    fn moves_relocate_exactly_one_element(
        len in 1usize..12,
        source_seed in any::<usize>(),
        target_seed in any::<usize>(),
        edge in arb_edge(),
    ) {
        let before = list(len);
        let source = source_seed % len;
        let target = target_seed % len;
        let out = reduce(&before, &move_drop(source, target, edge));
        prop_assert_eq!(out.fields.len(), len);

        let moved = before[source].name.clone();
        let mut rest_before = names(&before);
        rest_before.retain(|n| n != &moved);
        let mut rest_after = names(&out.fields);
        prop_assert_eq!(rest_after.iter().filter(|n| **n == moved).count(), 1);
        rest_after.retain(|n| n != &moved);
        prop_assert_eq!(rest_after, rest_before);
    }
}
