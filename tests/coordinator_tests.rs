use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use mining_sim::api::models::ServerMessage;
use mining_sim::error::MiningError;
use mining_sim::hub::NotificationHub;
use mining_sim::mining::{BlockState, MiningCoordinator, MiningEvent, challenge};

fn coordinator(target: &str, reward: u64, capacity: usize) -> MiningCoordinator {
    MiningCoordinator::new(
        BlockState::new(target, reward),
        "admin123",
        Arc::new(NotificationHub::new(capacity)),
    )
}

#[test]
fn concurrent_solves_advance_sequence_exactly() {
    let c = Arc::new(coordinator("", 3, 16));
    let threads = 8;
    let per_thread = 50;

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let c = Arc::clone(&c);
            thread::spawn(move || {
                let miner = format!("miner-{t}");
                for i in 0..per_thread {
                    c.submit_solution(&miner, &format!("hash-{t}-{i}")).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(c.snapshot().number, 1 + (threads * per_thread) as u64);
    for t in 0..threads {
        assert_eq!(c.balance(&format!("miner-{t}")), 3 * per_thread as u64);
    }
    assert_eq!(c.totals(), (threads, 3 * (threads * per_thread) as u64));
}

#[test]
fn balances_equal_sum_of_rewards() {
    let c = coordinator("", 3, 16);
    let mut expected: HashMap<&str, u64> = HashMap::new();

    for miner in ["alice", "bob", "alice", "carol", "alice", "bob"] {
        let outcome = c.submit_solution(miner, "anything").unwrap();
        *expected.entry(miner).or_insert(0) += 3;
        assert_eq!(outcome.new_balance, expected[miner]);
    }
    for (miner, balance) in &expected {
        assert_eq!(c.balance(miner), *balance);
    }

    let board = c.leaderboard(10);
    assert_eq!(board[0].miner, "alice");
    assert_eq!(board[0].balance, 9);
}

#[test]
fn solving_a_real_hash_is_accepted() {
    let c = coordinator("0", 3, 16);
    let block = c.snapshot();
    let (_nonce, hash) = challenge::search(&block.hash, &block.target, 0, 100_000).unwrap();
    let outcome = c.submit_solution("alice", &hash).unwrap();
    assert_eq!(outcome.solved_number, 1);
    assert_eq!(outcome.block.number, 2);
}

#[test]
fn unauthorized_retarget_never_emits() {
    let c = coordinator("00", 3, 16);
    let (_id, mut rx) = c.join();
    rx.try_recv().unwrap();

    for prefix in ["", "0", "000", "ffff"] {
        assert_eq!(
            c.set_difficulty(prefix, "wrongpass"),
            Err(MiningError::Unauthorized)
        );
    }
    assert_eq!(c.snapshot().target, "00");
    assert!(rx.try_recv().is_err());
}

#[test]
fn late_joiner_sees_current_block_first() {
    let c = coordinator("", 5, 16);
    for i in 0..4 {
        c.submit_solution("alice", &format!("h{i}")).unwrap();
    }
    c.set_difficulty("ab", "admin123").unwrap();

    let (_id, mut rx) = c.join();
    match rx.try_recv().unwrap() {
        MiningEvent::NewBlock(block) => {
            assert_eq!(block.number, 5);
            assert_eq!(block.target, "ab");
            assert_eq!(block.reward, 5);
            assert_eq!(block, c.snapshot());
        }
        other => panic!("expected newBlock, got {other:?}"),
    }
}

#[test]
fn double_leave_does_not_disturb_others() {
    let c = coordinator("", 3, 16);
    let (gone, _rx_gone) = c.join();
    let (_stay, mut rx_stay) = c.join();
    rx_stay.try_recv().unwrap();

    assert!(c.leave(gone));
    assert!(!c.leave(gone));

    c.submit_solution("bob", "x").unwrap();
    assert!(matches!(rx_stay.try_recv().unwrap(), MiningEvent::BlockSolved { .. }));
    assert!(matches!(rx_stay.try_recv().unwrap(), MiningEvent::NewBlock(_)));
    assert_eq!(c.hub().len(), 1);
}

#[test]
fn end_to_end_scenario() {
    let c = coordinator("00", 3, 16);
    let (alice, mut rx_alice) = c.join();
    let (bob, mut rx_bob) = c.join();
    assert_ne!(alice, bob);
    for rx in [&mut rx_alice, &mut rx_bob] {
        assert!(matches!(rx.try_recv().unwrap(), MiningEvent::NewBlock(b) if b.number == 1));
    }

    c.submit_solution("Alice", "00ab12").unwrap();
    for rx in [&mut rx_alice, &mut rx_bob] {
        let solved = ServerMessage::from(&rx.try_recv().unwrap());
        assert!(matches!(
            solved,
            ServerMessage::BlockSolved { ref user, new_balance: 3, block_number: 1, .. } if user == "Alice"
        ));
        match ServerMessage::from(&rx.try_recv().unwrap()) {
            ServerMessage::NewBlock {
                block_number,
                current_block,
            } => {
                assert_eq!(block_number, 2);
                assert_eq!(current_block.target, "00");
                assert_eq!(current_block.reward, 3);
            }
            other => panic!("expected newBlock, got {other:?}"),
        }
    }

    c.set_difficulty("000", "admin123").unwrap();
    for rx in [&mut rx_alice, &mut rx_bob] {
        assert_eq!(
            rx.try_recv().unwrap(),
            MiningEvent::DifficultyChanged {
                target_prefix: "000".into()
            }
        );
    }
    assert_eq!(c.snapshot().target, "000");
    assert_eq!(c.snapshot().number, 2);

    // wrong secret from bob's session: only bob hears about it
    mining_sim::api::ws::handle_client_text(
        &c,
        bob,
        r#"{"type":"setDifficulty","data":{"targetPrefix":"0","password":"wrongpass"}}"#,
    );
    assert_eq!(
        ServerMessage::from(&rx_bob.try_recv().unwrap()),
        ServerMessage::AuthFailed {
            message: "bad secret".into()
        }
    );
    assert!(rx_alice.try_recv().is_err());
    assert_eq!(c.snapshot().target, "000");
}
