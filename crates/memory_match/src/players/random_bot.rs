//! Bot that flips cards at random.

use anyhow::Result;
use memory_match_engine::{CardId, Session};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use super::Player;

/// Picks uniformly among the selectable cards and remembers nothing.
#[derive(Debug, Clone)]
pub struct RandomBot {
    name: String,
    rng: StdRng,
}

impl RandomBot {
    /// Creates a bot, seeded for reproducible play when `seed` is set.
    pub fn new(name: impl Into<String>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            name: name.into(),
            rng,
        }
    }
}

#[async_trait::async_trait]
impl Player for RandomBot {
    async fn choose_card(&mut self, session: &Session) -> Result<CardId> {
        let selectable = session.selectable_cards();
        let Some(&card_id) = selectable.choose(&mut self.rng) else {
            anyhow::bail!("No selectable cards");
        };
        debug!(bot = %self.name, card_id, "Bot chose card");
        Ok(card_id)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memory_match_engine::BoardSize;

    #[tokio::test]
    async fn test_always_picks_a_selectable_card() {
        let mut session = Session::new();
        session
            .start(BoardSize::FourByFour)
            .expect("Default pool covers 4x4");
        let mut bot = RandomBot::new("bot", Some(5));

        while !session.is_completed() {
            let card_id = bot.choose_card(&session).await.expect("A card");
            assert!(session.selectable_cards().contains(&card_id));
            session.select(card_id);
        }
    }

    #[tokio::test]
    async fn test_same_seed_same_choices() {
        let mut session = Session::new();
        session
            .start(BoardSize::SixBySix)
            .expect("Default pool covers 6x6");
        let mut a = RandomBot::new("a", Some(11));
        let mut b = RandomBot::new("b", Some(11));
        for _ in 0..5 {
            assert_eq!(
                a.choose_card(&session).await.expect("A card"),
                b.choose_card(&session).await.expect("A card")
            );
        }
    }
}
