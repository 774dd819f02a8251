//! Tests for the refresh-cycle state machine.

use super::*;

fn en0() -> Vec<InterfaceAddress> {
    vec![InterfaceAddress::v4("en0", "192.168.1.50")]
}

fn failure() -> DiscoveryError {
    DiscoveryError::Spawn {
        program: "/sbin/ifconfig".to_string(),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    }
}

fn labels(board: &StatusBoard) -> Vec<String> {
    board
        .entries()
        .iter()
        .map(|entry| match entry {
            MenuEntry::Row(row) => row.label.clone(),
            MenuEntry::Separator => "---".to_string(),
        })
        .collect()
}

fn row_at(board: &StatusBoard, index: usize) -> &DisplayRow {
    board.entries()[index].as_row().unwrap()
}

/// Board with `en0` discovered in a fresh cycle.
fn partial_board() -> (StatusBoard, CycleId) {
    let mut board = StatusBoard::new();
    let cycle = board.begin_cycle();
    assert_eq!(
        board.apply_discovery(cycle, Ok(en0())),
        DiscoveryOutcome::AwaitingPublic
    );
    (board, cycle)
}

mod lifecycle {
    use super::*;

    #[test]
    fn new_board_is_idle_and_empty() {
        let board = StatusBoard::new();

        assert_eq!(board.phase(), CyclePhase::Idle);
        assert!(board.entries().is_empty());
        assert_eq!(board.cycle().get(), 0);
    }

    #[test]
    fn begin_cycle_increments_id_and_enters_discovering() {
        let mut board = StatusBoard::new();

        let first = board.begin_cycle();
        let second = board.begin_cycle();

        assert!(second > first);
        assert_eq!(board.cycle(), second);
        assert_eq!(board.phase(), CyclePhase::Discovering);
    }

    #[test]
    fn previous_menu_stays_visible_while_discovering() {
        let (mut board, _) = partial_board();
        let before = labels(&board);

        board.begin_cycle();

        assert_eq!(labels(&board), before);
    }

    #[test]
    fn cycle_id_displays_with_hash() {
        let mut board = StatusBoard::new();
        let cycle = board.begin_cycle();
        assert_eq!(cycle.to_string(), "#1");
    }
}

mod discovery {
    use super::*;

    #[test]
    fn interfaces_render_with_loading_placeholders() {
        let (board, _) = partial_board();

        assert_eq!(
            labels(&board),
            [
                "en0: 192.168.1.50",
                "---",
                "Public IPv4: Loading...",
                "Public IPv6: Loading...",
            ]
        );
        assert!(row_at(&board, 0).enabled);
        assert!(!row_at(&board, 2).enabled);
        assert!(!row_at(&board, 3).enabled);
        assert_eq!(board.phase(), CyclePhase::Partial);
    }

    #[test]
    fn empty_discovery_shows_no_connections() {
        let mut board = StatusBoard::new();
        let cycle = board.begin_cycle();

        let outcome = board.apply_discovery(cycle, Ok(vec![]));

        assert_eq!(outcome, DiscoveryOutcome::Settled);
        assert_eq!(labels(&board), ["No active connections"]);
        assert!(!row_at(&board, 0).enabled);
        assert_eq!(board.phase(), CyclePhase::Complete);
    }

    #[test]
    fn failed_discovery_shows_single_error_row() {
        let mut board = StatusBoard::new();
        let cycle = board.begin_cycle();

        let outcome = board.apply_discovery(cycle, Err(failure()));

        assert_eq!(outcome, DiscoveryOutcome::Settled);
        assert_eq!(labels(&board), ["Error reading network status"]);
        assert!(!row_at(&board, 0).enabled);
        assert_eq!(board.phase(), CyclePhase::Complete);
    }

    #[test]
    fn stale_discovery_is_ignored() {
        let mut board = StatusBoard::new();
        let old = board.begin_cycle();
        let current = board.begin_cycle();

        assert_eq!(board.apply_discovery(old, Ok(en0())), DiscoveryOutcome::Stale);
        assert!(board.entries().is_empty());
        assert_eq!(board.phase(), CyclePhase::Discovering);

        assert_eq!(
            board.apply_discovery(current, Ok(en0())),
            DiscoveryOutcome::AwaitingPublic
        );
    }

    #[test]
    fn duplicate_discovery_for_same_cycle_is_ignored() {
        let (mut board, cycle) = partial_board();

        assert_eq!(board.apply_discovery(cycle, Ok(vec![])), DiscoveryOutcome::Stale);
        assert_eq!(labels(&board).len(), 4);
    }

    #[test]
    fn identical_input_gives_identical_interface_rows() {
        let (first, _) = partial_board();
        let (second, _) = partial_board();

        assert_eq!(first.entries(), second.entries());
    }
}

mod public_results {
    use super::*;

    #[test]
    fn both_results_complete_the_cycle() {
        let (mut board, cycle) = partial_board();

        assert!(board.apply_public(
            cycle,
            &PublicAddressResult::found(AddressFamily::V4, "198.51.100.1")
        ));
        assert_eq!(board.phase(), CyclePhase::Partial);
        assert!(board.apply_public(
            cycle,
            &PublicAddressResult::found(AddressFamily::V6, "2001:db8::1")
        ));

        assert_eq!(board.phase(), CyclePhase::Complete);
        assert_eq!(
            labels(&board),
            [
                "en0: 192.168.1.50",
                "---",
                "Public IPv4: 198.51.100.1",
                "Public IPv6: 2001:db8::1",
            ]
        );
        assert!(row_at(&board, 2).enabled);
        assert!(row_at(&board, 3).enabled);
    }

    #[test]
    fn completion_order_does_not_matter() {
        let (mut board, cycle) = partial_board();

        board.apply_public(cycle, &PublicAddressResult::unavailable(AddressFamily::V6));
        board.apply_public(cycle, &PublicAddressResult::found(AddressFamily::V4, "198.51.100.1"));

        assert_eq!(labels(&board)[2], "Public IPv4: 198.51.100.1");
        assert_eq!(labels(&board)[3], "Public IPv6: Unavailable");
        assert_eq!(board.phase(), CyclePhase::Complete);
    }

    #[test]
    fn unavailable_stays_disabled() {
        let (mut board, cycle) = partial_board();

        board.apply_public(cycle, &PublicAddressResult::unavailable(AddressFamily::V4));

        let row = row_at(&board, 2);
        assert_eq!(row.label, "Public IPv4: Unavailable");
        assert!(!row.enabled);
        assert_eq!(board.copy(2), None);
    }

    #[test]
    fn final_state_never_reverts() {
        let (mut board, cycle) = partial_board();
        board.apply_public(cycle, &PublicAddressResult::found(AddressFamily::V4, "198.51.100.1"));

        let reapplied =
            board.apply_public(cycle, &PublicAddressResult::unavailable(AddressFamily::V4));

        assert!(!reapplied);
        assert_eq!(labels(&board)[2], "Public IPv4: 198.51.100.1");
    }

    #[test]
    fn stale_result_is_discarded_after_new_cycle() {
        let (mut board, old) = partial_board();
        let current = board.begin_cycle();
        board.apply_discovery(current, Ok(en0()));

        let applied =
            board.apply_public(old, &PublicAddressResult::found(AddressFamily::V4, "203.0.113.9"));

        assert!(!applied);
        assert_eq!(labels(&board)[2], "Public IPv4: Loading...");
    }

    #[test]
    fn stale_result_is_discarded_while_discovering() {
        let (mut board, old) = partial_board();
        board.begin_cycle();

        assert!(!board.apply_public(
            old,
            &PublicAddressResult::found(AddressFamily::V4, "203.0.113.9")
        ));
        assert_eq!(labels(&board)[2], "Public IPv4: Loading...");
    }

    #[test]
    fn result_without_placeholder_is_ignored() {
        let mut board = StatusBoard::new();
        let cycle = board.begin_cycle();
        board.apply_discovery(cycle, Ok(vec![]));

        assert!(!board.apply_public(
            cycle,
            &PublicAddressResult::found(AddressFamily::V4, "198.51.100.1")
        ));
        assert_eq!(labels(&board), ["No active connections"]);
    }
}

mod copy {
    use super::*;

    #[test]
    fn interface_row_copies_address() {
        let (board, _) = partial_board();
        assert_eq!(board.copy(0).as_deref(), Some("192.168.1.50"));
    }

    #[test]
    fn public_row_copies_after_resolution() {
        let (mut board, cycle) = partial_board();
        assert_eq!(board.copy(3), None);

        board.apply_public(cycle, &PublicAddressResult::found(AddressFamily::V6, "2001:db8::1"));

        assert_eq!(board.copy(3).as_deref(), Some("2001:db8::1"));
    }

    #[test]
    fn separator_and_out_of_range_copy_nothing() {
        let (board, _) = partial_board();
        assert_eq!(board.copy(1), None);
        assert_eq!(board.copy(99), None);
    }
}
