use bpatch::diff::{AlignmentTable, CostModel, EditOperation, PatchCodec, TieBreak, path, path_cost};
use bpatch::{ByteOrder, DiffEngine, DiffError, LevenshteinDiffEngine, PatchConfig};
use proptest::prelude::*;

fn edits(original: &[u8], target: &[u8], tie_break: TieBreak) -> (AlignmentTable, Vec<EditOperation>) {
    let table = AlignmentTable::compute(original, target, &CostModel::default(), tie_break);
    let ops = path::reconstruct(&table, original, target);
    (table, ops)
}

// Small alphabet so that matches are common
fn bytes_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop_oneof![Just(b'a'), Just(b'b'), Just(b'c'), any::<u8>()], 0..48)
}

fn tie_break_strategy() -> impl Strategy<Value = TieBreak> {
    prop_oneof![
        Just(TieBreak::DeleteInsertReplace),
        Just(TieBreak::ReplaceDeleteInsert)
    ]
}

proptest! {
    #[test]
    fn round_trip(a in bytes_strategy(), b in bytes_strategy(), big in any::<bool>()) {
        let config = PatchConfig {
            byte_order: if big { ByteOrder::Big } else { ByteOrder::Little },
            ..PatchConfig::default()
        };
        let engine = LevenshteinDiffEngine::from_config(&config);

        let patch = engine.compute_diff(&a, &b).unwrap();
        prop_assert_eq!(patch.len() % 6, 0);
        let rebuilt = engine.apply_diff(&a, &patch).unwrap();
        prop_assert_eq!(rebuilt.as_ref(), b.as_slice());
    }

    #[test]
    fn path_cost_matches_table(a in bytes_strategy(), b in bytes_strategy(), tie in tie_break_strategy()) {
        let (table, ops) = edits(&a, &b, tie);
        prop_assert_eq!(path_cost(&ops, &CostModel::default()), table.total_cost());
    }

    #[test]
    fn tie_break_does_not_change_cost(a in bytes_strategy(), b in bytes_strategy()) {
        let (first, _) = edits(&a, &b, TieBreak::DeleteInsertReplace);
        let (second, _) = edits(&a, &b, TieBreak::ReplaceDeleteInsert);
        prop_assert_eq!(first.total_cost(), second.total_cost());
    }

    #[test]
    fn locations_non_decreasing(a in bytes_strategy(), b in bytes_strategy(), tie in tie_break_strategy()) {
        let (_, ops) = edits(&a, &b, tie);
        prop_assert!(ops.windows(2).all(|w| w[0].at() <= w[1].at()));
    }

    #[test]
    fn identity_has_no_edits(a in bytes_strategy()) {
        let (table, ops) = edits(&a, &a, TieBreak::default());
        prop_assert!(ops.is_empty());
        prop_assert_eq!(table.total_cost(), 0);
        let applied = PatchCodec::apply_operations(&a, &[]).unwrap();
        prop_assert_eq!(applied.as_ref(), a.as_slice());
    }

    #[test]
    fn empty_original_is_all_inserts(b in bytes_strategy()) {
        let (_, ops) = edits(&[], &b, TieBreak::default());
        let expected: Vec<_> = b.iter().map(|&value| EditOperation::Insert { at: 0, value }).collect();
        prop_assert_eq!(ops, expected);
    }

    #[test]
    fn empty_target_is_all_deletes(a in bytes_strategy()) {
        let (_, ops) = edits(&a, &[], TieBreak::default());
        let expected: Vec<_> = (0..a.len()).map(|at| EditOperation::Delete { at }).collect();
        prop_assert_eq!(ops, expected);
    }

    #[test]
    fn codec_round_trip(
        raw in prop::collection::vec((0u8..3, any::<u32>(), any::<u8>()), 0..32),
        big in any::<bool>(),
    ) {
        let ops: Vec<EditOperation> = raw
            .into_iter()
            .map(|(tag, at, value)| {
                let at = at as usize;
                match tag {
                    0 => EditOperation::Insert { at, value },
                    1 => EditOperation::Delete { at },
                    _ => EditOperation::Replace { at, value },
                }
            })
            .collect();
        let codec = PatchCodec::new(if big { ByteOrder::Big } else { ByteOrder::Little });

        let encoded = codec.encode(&ops).unwrap();
        prop_assert_eq!(codec.decode(&encoded).unwrap(), ops);
    }

    #[test]
    fn decode_rejects_partial_records(data in prop::collection::vec(any::<u8>(), 1..64)) {
        prop_assume!(data.len() % 6 != 0);
        let result = PatchCodec::default().decode(&data);
        prop_assert!(matches!(result, Err(DiffError::MalformedPatch(_))));
    }

    #[test]
    fn decode_rejects_unknown_tags(tag in 3u8..=255, rest in prop::array::uniform5(any::<u8>())) {
        let mut record = vec![tag];
        record.extend_from_slice(&rest);
        let result = PatchCodec::default().decode(&record);
        prop_assert!(matches!(result, Err(DiffError::MalformedPatch(_))));
    }
}

/// Exhaustive check against every script over a tiny alphabet: no edit
/// sequence reaching the target is cheaper than the computed one.
#[test]
fn no_cheaper_script_for_short_inputs() {
    fn brute_force(a: &[u8], b: &[u8], costs: &CostModel) -> u64 {
        if a.is_empty() {
            return b.len() as u64 * costs.insert;
        }
        if b.is_empty() {
            return a.len() as u64 * costs.delete;
        }
        let diagonal = if a[0] == b[0] { 0 } else { costs.replace };
        (brute_force(&a[1..], &b[1..], costs) + diagonal)
            .min(brute_force(&a[1..], b, costs) + costs.delete)
            .min(brute_force(a, &b[1..], costs) + costs.insert)
    }

    let words: &[&[u8]] = &[b"", b"a", b"ab", b"ba", b"abc", b"cab", b"aabb", b"bcab"];
    let costs = CostModel::default();
    for a in words {
        for b in words {
            let (table, ops) = edits(a, b, TieBreak::default());
            assert_eq!(table.total_cost(), brute_force(a, b, &costs), "{a:?} -> {b:?}");
            assert_eq!(path_cost(&ops, &costs), table.total_cost());
        }
    }
}
