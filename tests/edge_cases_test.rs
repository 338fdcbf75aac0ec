// Edge case tests: degenerate transactions and extreme values

use utxo_ledger::identity::Keypair;
use utxo_ledger::ledger::{TxHandler, UtxoPool};
use utxo_ledger::transaction::{TransactionBuilder, TxHash, TxOutput, UtxoId};

fn mint(pool: &mut UtxoPool, recipient: &Keypair, value: i64, tag: u8) -> UtxoId {
    let id = UtxoId::new(TxHash::from_bytes([tag; 32]), 0);
    pool.insert(id, TxOutput::new(recipient.public_key(), value));
    id
}

// ============================================================================
// ZERO-INPUT TRANSACTIONS
// ============================================================================

#[test]
fn test_zero_input_transaction_cannot_create_value() {
    let alice = Keypair::generate();
    let bob = Keypair::generate();
    let mut pool = UtxoPool::new();
    mint(&mut pool, &alice, 10, 0);

    // No inputs, one output of 5: output sum exceeds the empty input sum.
    let t3 = TransactionBuilder::new()
        .pay(bob.public_key(), 5)
        .build()
        .unwrap();

    let handler = TxHandler::new(&pool);
    assert!(!handler.is_valid(&t3).unwrap());
}

#[test]
fn test_empty_transaction_satisfies_conservation() {
    let pool = UtxoPool::new();
    let tx = TransactionBuilder::new().build().unwrap();

    // No inputs and no outputs: sum 0 <= sum 0. The conservation rule is
    // applied as written, so the transaction is valid and its application
    // is a no-op on the pool.
    let mut handler = TxHandler::new(&pool);
    assert!(handler.is_valid(&tx).unwrap());

    let accepted = handler.handle_batch(&[tx.clone(), tx.clone()]).unwrap();
    assert_eq!(accepted.len(), 1);
    assert!(handler.pool().is_empty());
}

#[test]
fn test_zero_input_all_zero_outputs_is_valid() {
    let bob = Keypair::generate();
    let pool = UtxoPool::new();

    let tx = TransactionBuilder::new()
        .pay(bob.public_key(), 0)
        .build()
        .unwrap();

    let handler = TxHandler::new(&pool);
    assert!(handler.is_valid(&tx).unwrap());
}

// ============================================================================
// ZERO AND EXTREME VALUES
// ============================================================================

#[test]
fn test_zero_value_output_is_spendable() {
    let alice = Keypair::generate();
    let bob = Keypair::generate();
    let mut pool = UtxoPool::new();
    let coin = mint(&mut pool, &alice, 10, 0);

    let t1 = TransactionBuilder::new()
        .spend(coin, &alice)
        .pay(bob.public_key(), 0)
        .pay(alice.public_key(), 10)
        .build()
        .unwrap();

    let mut handler = TxHandler::new(&pool);
    let accepted = handler.handle_batch(&[t1.clone()]).unwrap();
    assert_eq!(accepted.len(), 1);

    let zero_coin = UtxoId::new(*t1.hash(), 0);
    assert_eq!(handler.pool().get(&zero_coin).unwrap().value(), 0);

    // The zero-value output can itself be consumed.
    let t2 = TransactionBuilder::new()
        .spend(zero_coin, &bob)
        .build()
        .unwrap();
    assert!(handler.is_valid(&t2).unwrap());
}

#[test]
fn test_value_sums_do_not_overflow() {
    let alice = Keypair::generate();
    let bob = Keypair::generate();
    let mut pool = UtxoPool::new();
    let a = mint(&mut pool, &alice, i64::MAX, 0);
    let b = mint(&mut pool, &alice, i64::MAX, 1);

    // Input and output totals both exceed i64::MAX; accumulation is wide
    // enough that conservation is still judged correctly.
    let tx = TransactionBuilder::new()
        .spend(a, &alice)
        .spend(b, &alice)
        .pay(bob.public_key(), i64::MAX)
        .pay(bob.public_key(), i64::MAX)
        .build()
        .unwrap();

    let handler = TxHandler::new(&pool);
    assert!(handler.is_valid(&tx).unwrap());
}

// ============================================================================
// MULTI-OUTPUT APPLICATION
// ============================================================================

#[test]
fn test_outputs_are_keyed_by_position() {
    let alice = Keypair::generate();
    let bob = Keypair::generate();
    let carol = Keypair::generate();
    let mut pool = UtxoPool::new();
    let coin = mint(&mut pool, &alice, 10, 0);

    let tx = TransactionBuilder::new()
        .spend(coin, &alice)
        .pay(bob.public_key(), 4)
        .pay(carol.public_key(), 6)
        .build()
        .unwrap();

    let mut handler = TxHandler::new(&pool);
    handler.handle_batch(&[tx.clone()]).unwrap();

    assert_eq!(
        handler
            .pool()
            .get(&UtxoId::new(*tx.hash(), 0))
            .unwrap()
            .recipient(),
        &bob.public_key()
    );
    assert_eq!(
        handler
            .pool()
            .get(&UtxoId::new(*tx.hash(), 1))
            .unwrap()
            .recipient(),
        &carol.public_key()
    );
    assert_eq!(handler.pool().len(), 2);
}

#[test]
fn test_long_dependency_chain_in_one_batch() {
    let alice = Keypair::generate();
    let mut pool = UtxoPool::new();
    let mut coin = mint(&mut pool, &alice, 10, 0);

    // Each transaction spends the previous one's output, all in one epoch.
    let mut batch = Vec::new();
    for _ in 0..5 {
        let tx = TransactionBuilder::new()
            .spend(coin, &alice)
            .pay(alice.public_key(), 10)
            .build()
            .unwrap();
        coin = UtxoId::new(*tx.hash(), 0);
        batch.push(tx);
    }

    let mut handler = TxHandler::new(&pool);
    let accepted = handler.handle_batch(&batch).unwrap();
    assert_eq!(accepted.len(), 5);
    assert_eq!(handler.pool().len(), 1);
    assert!(handler.pool().contains(&coin));
}
