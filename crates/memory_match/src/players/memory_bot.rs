//! Bot with perfect recall.

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use memory_match_engine::{CardId, SelectOutcome, Session, Symbol};
use tracing::{debug, instrument};

use super::Player;

/// Remembers every symbol it has seen.
///
/// Plays a known pair whenever one is available; otherwise flips the
/// lowest-numbered card it has never seen. It never needs more than
/// `2 * pair_count - 1` moves.
#[derive(Debug, Clone)]
pub struct MemoryBot {
    name: String,
    known: HashMap<Symbol, Vec<CardId>>,
    seen: HashSet<CardId>,
}

impl MemoryBot {
    /// Creates a bot with an empty memory.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            known: HashMap::new(),
            seen: HashSet::new(),
        }
    }

    fn remember(&mut self, card_id: CardId, symbol: &Symbol) {
        self.seen.insert(card_id);
        let ids = self.known.entry(symbol.clone()).or_default();
        if !ids.contains(&card_id) {
            ids.push(card_id);
        }
    }

    fn forget(&mut self, symbol: &Symbol) {
        self.known.remove(symbol);
    }

    /// Symbol of a card, if it has been seen.
    fn symbol_of(&self, card_id: CardId) -> Option<&Symbol> {
        self.known
            .iter()
            .find(|(_, ids)| ids.contains(&card_id))
            .map(|(symbol, _)| symbol)
    }

    /// A fully known pair among `selectable`, lowest ids first.
    fn known_pair(&self, selectable: &[CardId]) -> Option<CardId> {
        self.known
            .values()
            .filter_map(|ids| {
                let open: Vec<CardId> = ids
                    .iter()
                    .copied()
                    .filter(|id| selectable.contains(id))
                    .collect();
                (open.len() >= 2).then(|| open.into_iter().min()).flatten()
            })
            .min()
    }

    /// The partner of `first`, if its location is known.
    fn partner_of(&self, first: CardId, selectable: &[CardId]) -> Option<CardId> {
        let symbol = self.symbol_of(first)?;
        self.known.get(symbol).and_then(|ids| {
            ids.iter()
                .copied()
                .find(|id| *id != first && selectable.contains(id))
        })
    }

    fn unseen(&self, selectable: &[CardId]) -> Option<CardId> {
        selectable
            .iter()
            .copied()
            .find(|id| !self.seen.contains(id))
    }
}

#[async_trait::async_trait]
impl Player for MemoryBot {
    #[instrument(skip(self, session), fields(bot = %self.name))]
    async fn choose_card(&mut self, session: &Session) -> Result<CardId> {
        let selectable = session.selectable_cards();
        let choice = match session.active_selection().first() {
            Some(&first) => self
                .partner_of(first, &selectable)
                .or_else(|| self.unseen(&selectable))
                .or_else(|| selectable.first().copied()),
            None => self
                .known_pair(&selectable)
                .or_else(|| self.unseen(&selectable))
                .or_else(|| selectable.first().copied()),
        };

        match choice {
            Some(card_id) => {
                debug!(card_id, "Bot chose card");
                Ok(card_id)
            }
            None => anyhow::bail!("No selectable cards"),
        }
    }

    fn observe(&mut self, outcome: &SelectOutcome) {
        match outcome {
            SelectOutcome::Ignored { .. } => {}
            SelectOutcome::Revealed { card_id, symbol } => self.remember(*card_id, symbol),
            SelectOutcome::Mismatched {
                first,
                first_symbol,
                second,
                second_symbol,
            } => {
                self.remember(*first, first_symbol);
                self.remember(*second, second_symbol);
            }
            SelectOutcome::Matched {
                first,
                second,
                symbol,
            }
            | SelectOutcome::Completed {
                first,
                second,
                symbol,
                ..
            } => {
                self.seen.insert(*first);
                self.seen.insert(*second);
                self.forget(symbol);
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
