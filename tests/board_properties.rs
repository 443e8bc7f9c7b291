//! Property tests for board invariants.
//!
//! Random operation sequences run against an in-memory board. After every
//! step:
//! - column orders are dense in every pipeline
//! - every lead position points at a column that exists
//! - each lead on a pipeline is listed in exactly one of its columns
//! - the stored collections match the in-memory snapshot

use leadboard::board::ordering::is_dense;
use leadboard::board::{
    Board, BoardOptions, BoardStorage, Column, DeletePolicy, IdStrategy, Lead, MemoryBackend,
    NewLead, Pipeline, PositionMap, Selection,
};
use proptest::prelude::*;
use proptest::sample::Index;

// ============================================================================
// FIXTURES
// ============================================================================

fn lead(id: &str, positions: &[(&str, &str)]) -> Lead {
    Lead {
        id: id.to_string(),
        name: id.to_string(),
        photo_url: String::new(),
        job_title: String::new(),
        company: String::new(),
        tags: Vec::new(),
        connection_status: Default::default(),
        pipeline_positions: positions.iter().copied().collect::<PositionMap>(),
    }
}

fn fixture_board() -> Board<MemoryBackend> {
    let mut storage = BoardStorage::in_memory();
    storage
        .save_pipelines(&[
            Pipeline::new(
                "p",
                "Sales",
                vec![
                    Column::new("a", "New", 0),
                    Column::new("b", "Contacted", 1),
                    Column::new("c", "Deal", 2),
                ],
            ),
            Pipeline::new(
                "q",
                "Marketing",
                vec![Column::new("x", "Prospects", 0), Column::new("y", "MQL", 1)],
            ),
        ])
        .unwrap();
    storage
        .save_leads(&[
            lead("l1", &[("p", "a")]),
            lead("l2", &[("p", "a"), ("q", "x")]),
            lead("l3", &[("p", "b")]),
            lead("l4", &[("p", "c"), ("q", "y")]),
            lead("l5", &[("q", "y")]),
            lead("l6", &[]),
        ])
        .unwrap();
    let options = BoardOptions {
        seed_demo_data: false,
        id_strategy: IdStrategy::Sequential,
        default_pipeline: Some("p".to_string()),
    };
    Board::open(storage, &options).unwrap()
}

fn column_ids(board: &Board<MemoryBackend>, pipeline_id: &str) -> Vec<String> {
    board
        .pipeline(pipeline_id)
        .unwrap()
        .sorted_columns()
        .iter()
        .map(|c| c.id.clone())
        .collect()
}

// ============================================================================
// OPERATIONS
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum PolicyKind {
    Previous,
    Delete,
    Move,
    Add,
}

#[derive(Debug, Clone)]
enum Op {
    AddColumn,
    MoveColumn {
        column: Index,
        order: u32,
    },
    DeleteColumn {
        column: Index,
        policy: PolicyKind,
        target: Index,
    },
    MoveLeads {
        leads: Vec<Index>,
        column: Index,
    },
    AddLead,
    SwitchPipeline,
}

fn arb_policy() -> impl Strategy<Value = PolicyKind> {
    prop_oneof![
        Just(PolicyKind::Previous),
        Just(PolicyKind::Delete),
        Just(PolicyKind::Move),
        Just(PolicyKind::Add),
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::AddColumn),
        (any::<Index>(), 0u32..8).prop_map(|(column, order)| Op::MoveColumn { column, order }),
        (any::<Index>(), arb_policy(), any::<Index>()).prop_map(|(column, policy, target)| {
            Op::DeleteColumn {
                column,
                policy,
                target,
            }
        }),
        (prop::collection::vec(any::<Index>(), 0..4), any::<Index>())
            .prop_map(|(leads, column)| Op::MoveLeads { leads, column }),
        Just(Op::AddLead),
        Just(Op::SwitchPipeline),
    ]
}

fn apply(board: &mut Board<MemoryBackend>, op: &Op) {
    let pid = board.active_pipeline_id().to_string();
    let other = if pid == "p" { "q" } else { "p" };
    let columns = column_ids(board, &pid);

    match op {
        Op::AddColumn => {
            board.add_column(&pid, "Stage").unwrap();
        }
        Op::MoveColumn { column, order } => {
            if columns.is_empty() {
                return;
            }
            let id = column.get(&columns);
            let expected = (*order).min(columns.len() as u32 - 1);
            board.move_column(&pid, id, *order).unwrap();
            assert_eq!(board.pipeline(&pid).unwrap().column(id).unwrap().order, expected);
        }
        Op::DeleteColumn {
            column,
            policy,
            target,
        } => {
            if columns.is_empty() {
                return;
            }
            let id = column.get(&columns).clone();
            let remaining: Vec<&String> = columns.iter().filter(|c| **c != id).collect();
            let other_columns = column_ids(board, other);
            let policy = match policy {
                PolicyKind::Previous => board
                    .pipeline(&pid)
                    .unwrap()
                    .default_delete_policy(&id)
                    .unwrap(),
                PolicyKind::Move if !remaining.is_empty() => DeletePolicy::Move {
                    target_column_id: target.get(&remaining).to_string(),
                },
                PolicyKind::Add if !other_columns.is_empty() => DeletePolicy::Add {
                    target_pipeline_id: other.to_string(),
                    target_column_id: target.get(&other_columns).clone(),
                },
                _ => DeletePolicy::Delete,
            };

            let before = board.column_leads(&pid, &id).len();
            let outcome = board.delete_column_with_policy(&pid, &id, policy).unwrap();
            assert_eq!(outcome.affected_leads, before);
            assert!(board.column_leads(&pid, &id).is_empty());
        }
        Op::MoveLeads { leads, column } => {
            if columns.is_empty() || leads.is_empty() {
                return;
            }
            let ids: Vec<String> = leads
                .iter()
                .map(|i| i.get(board.leads()).id.clone())
                .collect();
            let target = column.get(&columns).clone();
            board.move_leads(&pid, &ids, &target).unwrap();
            for id in &ids {
                assert_eq!(board.lead(id).unwrap().column_in(&pid), Some(target.as_str()));
            }
        }
        Op::AddLead => {
            let result = board.add_lead(&pid, NewLead::named("Prop"));
            if columns.is_empty() {
                assert!(result.is_err());
            } else {
                let lead = result.unwrap();
                assert_eq!(lead.column_in(&pid), Some(columns[0].as_str()));
            }
        }
        Op::SwitchPipeline => {
            board.switch_pipeline(other).unwrap();
        }
    }
}

fn check_invariants(board: &Board<MemoryBackend>) {
    for pipeline in board.pipelines() {
        assert!(is_dense(&pipeline.columns), "gap in {:?}", pipeline.columns);

        let on_pipeline = board
            .leads()
            .iter()
            .filter(|l| l.pipeline_positions.contains(&pipeline.id))
            .count();
        let listed: usize = pipeline
            .columns
            .iter()
            .map(|c| board.column_leads(&pipeline.id, &c.id).len())
            .sum();
        assert_eq!(listed, on_pipeline);
    }

    for lead in board.leads() {
        for (pipeline_id, column_id) in lead.pipeline_positions.iter() {
            let pipeline = board.pipeline(pipeline_id).unwrap();
            assert!(
                pipeline.has_column(column_id),
                "{} points at missing column {}/{}",
                lead.id,
                pipeline_id,
                column_id
            );
        }
    }

    let storage = board.storage();
    assert_eq!(storage.load_pipelines().unwrap(), board.pipelines());
    assert_eq!(storage.load_leads().unwrap(), board.leads());
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_random_operations_preserve_invariants(ops in prop::collection::vec(arb_op(), 1..40)) {
        let mut board = fixture_board();
        for op in &ops {
            apply(&mut board, op);
            check_invariants(&board);
        }
    }

    #[test]
    fn prop_moving_a_column_twice_is_idempotent(column in any::<Index>(), order in 0u32..6) {
        let mut board = fixture_board();
        let columns = column_ids(&board, "p");
        let id = column.get(&columns);

        board.move_column("p", id, order).unwrap();
        let after_first = board.pipeline("p").unwrap().clone();
        let changed = board.move_column("p", id, order).unwrap();

        prop_assert!(!changed);
        prop_assert_eq!(board.pipeline("p").unwrap(), &after_first);
    }

    #[test]
    fn prop_select_all_twice_restores_disjoint_selection(
        initial in prop::collection::btree_set(0u8..20, 0..6),
        column in prop::collection::btree_set(0u8..20, 0..6),
    ) {
        let mut selection = Selection::new();
        for n in &initial {
            selection.select(&format!("x{}", n), true);
        }
        let original = selection.clone();
        let column_ids: Vec<String> = column.iter().map(|n| format!("c{}", n)).collect();

        selection.select_all(column_ids.iter().map(String::as_str));
        selection.select_all(column_ids.iter().map(String::as_str));

        prop_assert_eq!(selection, original);
    }

    #[test]
    fn prop_default_delete_relocates_every_lead(column in any::<Index>()) {
        let mut board = fixture_board();
        let columns = column_ids(&board, "p");
        let id = column.get(&columns).clone();
        let affected: Vec<String> = board
            .column_leads("p", &id)
            .iter()
            .map(|l| l.id.clone())
            .collect();

        board.delete_column("p", &id).unwrap();

        for lead_id in &affected {
            let now = board.lead(lead_id).unwrap().column_in("p");
            prop_assert!(now.is_some());
            prop_assert_ne!(now, Some(id.as_str()));
        }
        prop_assert!(is_dense(&board.pipeline("p").unwrap().columns));
    }
}
