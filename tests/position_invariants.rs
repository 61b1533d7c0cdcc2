//! Ordering invariant checks for the position engine.
//!
//! Drives the engine with generated batches of appends, moves, and
//! deletes over the in-memory store and asserts after every committed
//! transaction that each list's card positions are exactly `{1..N}`.
//! Also covers rollback on mid-operation failure and parallel movers
//! racing on the same list.

use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::sync::Arc;

use async_trait::async_trait;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use driftboard::adapters::memory::{InMemoryStore, MemoryUnitOfWork};
use driftboard::domain::board::Card;
use driftboard::domain::foundation::{CardId, ListId, Position};
use driftboard::domain::ordering::{PositionEngine, PositionError};
use driftboard::ports::{PositionStore, Shift, StoreError};

/// One generated edit. Indices are resolved against the live state when
/// the operation runs, so every generated sequence is applicable.
#[derive(Debug, Clone)]
enum Op {
    Append { list: usize },
    Move { list: usize, item: usize, to_list: usize, slot: usize },
    Delete { list: usize, item: usize },
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0usize..3).prop_map(|list| Op::Append { list }),
        4 => (0usize..3, 0usize..16, 0usize..3, 0usize..16).prop_map(
            |(list, item, to_list, slot)| Op::Move {
                list,
                item,
                to_list,
                slot,
            }
        ),
        2 => (0usize..3, 0usize..16).prop_map(|(list, item)| Op::Delete { list, item }),
    ]
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(arb_op(), 1..40)
}

async fn check_contiguous(
    store: &InMemoryStore<Card>,
    lists: &[ListId; 3],
) -> Result<(), TestCaseError> {
    for list in lists {
        let positions: Vec<u32> = store
            .children_of(list)
            .await
            .iter()
            .map(|card| card.position().get())
            .collect();
        let expected: Vec<u32> = (1..=positions.len() as u32).collect();
        prop_assert_eq!(&positions, &expected, "list {} is not contiguous", list);
    }
    Ok(())
}

proptest! {
    /// Property: every committed transaction leaves each list's
    /// positions exactly {1..N}, and exactly the created-minus-deleted
    /// cards survive the whole sequence.
    #[test]
    fn positions_stay_contiguous_under_arbitrary_edits(ops in arb_ops()) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        rt.block_on(async move {
            let store: Arc<InMemoryStore<Card>> = Arc::new(InMemoryStore::new());
            let engine = PositionEngine::new(Arc::clone(&store));
            let lists = [ListId::new(), ListId::new(), ListId::new()];
            let mut alive: HashSet<CardId> = HashSet::new();
            let mut counter = 0u32;

            for op in ops {
                match op {
                    Op::Append { list } => {
                        counter += 1;
                        let mut card = Card::new(
                            CardId::new(),
                            lists[list],
                            format!("card-{counter}"),
                            None,
                        )
                        .unwrap();

                        let mut uow = store.begin().await.unwrap();
                        engine.append(&mut uow, &mut card).await.unwrap();
                        store.commit(uow).await.unwrap();
                        alive.insert(*card.id());
                    }
                    Op::Move { list, item, to_list, slot } => {
                        let children = store.children_of(&lists[list]).await;
                        if children.is_empty() {
                            continue;
                        }
                        let picked = children[item % children.len()].clone();
                        let dest = lists[to_list];

                        let mut uow = store.begin().await.unwrap();
                        let mut card =
                            store.find(&mut uow, picked.id()).await.unwrap().unwrap();
                        let max = store.max_position(&mut uow, &dest).await.unwrap();
                        let target = if dest == lists[list] {
                            // The item occupies one of the max slots already.
                            Position::new(slot as u32 % max + 1)
                        } else {
                            Position::new(slot as u32 % (max + 1) + 1)
                        };
                        engine
                            .relocate(&mut uow, &mut card, dest, target)
                            .await
                            .unwrap();
                        store.commit(uow).await.unwrap();
                    }
                    Op::Delete { list, item } => {
                        let children = store.children_of(&lists[list]).await;
                        if children.is_empty() {
                            continue;
                        }
                        let picked = children[item % children.len()].clone();

                        let mut uow = store.begin().await.unwrap();
                        let card =
                            store.find(&mut uow, picked.id()).await.unwrap().unwrap();
                        engine.remove(&mut uow, &card).await.unwrap();
                        store.commit(uow).await.unwrap();
                        alive.remove(picked.id());
                    }
                }

                check_contiguous(&store, &lists).await?;
            }

            let mut surviving: HashSet<CardId> = HashSet::new();
            for list in &lists {
                for card in store.children_of(list).await {
                    surviving.insert(*card.id());
                }
            }
            prop_assert_eq!(surviving, alive);
            Ok(())
        })?;
    }
}

// =============================================================================
// Rollback on mid-operation failure
// =============================================================================

enum FailPoint {
    Shift,
    Update,
}

/// Store wrapper that fails at a chosen operation so rollback paths can
/// be exercised.
struct FailingStore {
    inner: InMemoryStore<Card>,
    fail_on: FailPoint,
}

#[async_trait]
impl PositionStore for FailingStore {
    type Item = Card;
    type Uow = MemoryUnitOfWork<Card>;

    async fn begin(&self) -> Result<Self::Uow, StoreError> {
        self.inner.begin().await
    }

    async fn commit(&self, uow: Self::Uow) -> Result<(), StoreError> {
        self.inner.commit(uow).await
    }

    async fn find(
        &self,
        uow: &mut Self::Uow,
        id: &CardId,
    ) -> Result<Option<Card>, StoreError> {
        self.inner.find(uow, id).await
    }

    async fn max_position(
        &self,
        uow: &mut Self::Uow,
        parent: &ListId,
    ) -> Result<u32, StoreError> {
        self.inner.max_position(uow, parent).await
    }

    async fn shift_range(
        &self,
        uow: &mut Self::Uow,
        parent: &ListId,
        range: RangeInclusive<u32>,
        shift: Shift,
    ) -> Result<(), StoreError> {
        if matches!(self.fail_on, FailPoint::Shift) {
            return Err(StoreError::backend("injected shift failure"));
        }
        self.inner.shift_range(uow, parent, range, shift).await
    }

    async fn insert(&self, uow: &mut Self::Uow, item: &Card) -> Result<(), StoreError> {
        self.inner.insert(uow, item).await
    }

    async fn update(&self, uow: &mut Self::Uow, item: &Card) -> Result<(), StoreError> {
        if matches!(self.fail_on, FailPoint::Update) {
            return Err(StoreError::backend("injected update failure"));
        }
        self.inner.update(uow, item).await
    }

    async fn delete(&self, uow: &mut Self::Uow, id: &CardId) -> Result<(), StoreError> {
        self.inner.delete(uow, id).await
    }
}

async fn seed_list(store: &InMemoryStore<Card>, list_id: ListId, titles: &[&str]) -> Vec<Card> {
    let engine = PositionEngine::new(Arc::new(store.clone()));
    let mut uow = store.begin().await.unwrap();
    let mut cards = Vec::new();
    for title in titles {
        let mut card = Card::new(CardId::new(), list_id, title.to_string(), None).unwrap();
        engine.append(&mut uow, &mut card).await.unwrap();
        cards.push(card);
    }
    store.commit(uow).await.unwrap();
    cards
}

async fn committed_titles(store: &InMemoryStore<Card>, list_id: &ListId) -> Vec<(String, u32)> {
    store
        .children_of(list_id)
        .await
        .iter()
        .map(|card| (card.title().to_string(), card.position().get()))
        .collect()
}

#[tokio::test]
async fn failure_after_shifts_rolls_back_the_whole_move() {
    let inner: InMemoryStore<Card> = InMemoryStore::new();
    let list_id = ListId::new();
    let cards = seed_list(&inner, list_id, &["a", "b", "c"]).await;

    let store = Arc::new(FailingStore {
        inner: inner.clone(),
        fail_on: FailPoint::Update,
    });
    let engine = PositionEngine::new(Arc::clone(&store));

    let mut card = cards[2].clone();
    {
        let mut uow = store.begin().await.unwrap();
        let result = engine
            .relocate(&mut uow, &mut card, list_id, Position::FIRST)
            .await;
        assert!(matches!(result, Err(PositionError::Store(_))));
        // uow dropped without commit
    }

    assert_eq!(
        committed_titles(&inner, &list_id).await,
        vec![
            ("a".to_string(), 1),
            ("b".to_string(), 2),
            ("c".to_string(), 3)
        ]
    );
}

#[tokio::test]
async fn failure_during_shift_rolls_back_the_whole_move() {
    let inner: InMemoryStore<Card> = InMemoryStore::new();
    let list_id = ListId::new();
    let cards = seed_list(&inner, list_id, &["a", "b", "c"]).await;

    let store = Arc::new(FailingStore {
        inner: inner.clone(),
        fail_on: FailPoint::Shift,
    });
    let engine = PositionEngine::new(Arc::clone(&store));

    let mut card = cards[0].clone();
    {
        let mut uow = store.begin().await.unwrap();
        let result = engine
            .relocate(&mut uow, &mut card, list_id, Position::new(3))
            .await;
        assert!(matches!(result, Err(PositionError::Store(_))));
    }

    assert_eq!(
        committed_titles(&inner, &list_id).await,
        vec![
            ("a".to_string(), 1),
            ("b".to_string(), 2),
            ("c".to_string(), 3)
        ]
    );
}

// =============================================================================
// Concurrent movers
// =============================================================================

#[tokio::test]
async fn parallel_movers_never_leave_gaps_or_duplicates() {
    let store: Arc<InMemoryStore<Card>> = Arc::new(InMemoryStore::new());
    let engine = Arc::new(PositionEngine::new(Arc::clone(&store)));
    let list_id = ListId::new();

    let mut ids = Vec::new();
    {
        let mut uow = store.begin().await.unwrap();
        for i in 0..6 {
            let mut card =
                Card::new(CardId::new(), list_id, format!("card-{i}"), None).unwrap();
            engine.append(&mut uow, &mut card).await.unwrap();
            ids.push(*card.id());
        }
        store.commit(uow).await.unwrap();
    }

    let mut tasks = Vec::new();
    for worker in 0..4usize {
        let store = Arc::clone(&store);
        let engine = Arc::clone(&engine);
        let ids = ids.clone();
        tasks.push(tokio::spawn(async move {
            for step in 0..5usize {
                let card_id = ids[(worker + step * 3) % ids.len()];

                // Each move is its own transaction; the card is re-read
                // inside it because another worker may have shifted it.
                let mut uow = store.begin().await.unwrap();
                let mut card = store.find(&mut uow, &card_id).await.unwrap().unwrap();
                let max = store.max_position(&mut uow, &list_id).await.unwrap();
                let target = Position::new((worker + step) as u32 % max + 1);
                engine
                    .relocate(&mut uow, &mut card, list_id, target)
                    .await
                    .unwrap();
                store.commit(uow).await.unwrap();
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let children = store.children_of(&list_id).await;
    let positions: Vec<u32> = children.iter().map(|card| card.position().get()).collect();
    assert_eq!(positions, vec![1, 2, 3, 4, 5, 6]);

    let surviving: HashSet<CardId> = children.iter().map(|card| *card.id()).collect();
    let expected: HashSet<CardId> = ids.into_iter().collect();
    assert_eq!(surviving, expected);
}
