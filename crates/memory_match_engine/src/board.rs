//! Board layout: sizes, cards, and the board itself.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{BoardError, Symbol};

/// Identifier of a card on a board (0-based position).
pub type CardId = usize;

/// Supported board layouts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Default,
    strum::Display,
    strum::EnumIter,
)]
pub enum BoardSize {
    /// 4x4 grid, 16 cards, 8 pairs.
    #[default]
    #[serde(rename = "4x4")]
    #[strum(serialize = "4x4")]
    FourByFour,
    /// 6x6 grid, 36 cards, 18 pairs.
    #[serde(rename = "6x6")]
    #[strum(serialize = "6x6")]
    SixBySix,
}

impl BoardSize {
    /// Cards per row (and per column).
    pub fn side(self) -> usize {
        match self {
            Self::FourByFour => 4,
            Self::SixBySix => 6,
        }
    }

    /// Total number of cards on the board.
    pub fn card_count(self) -> usize {
        self.side() * self.side()
    }

    /// Number of pairs that must be matched to finish.
    pub fn pair_count(self) -> usize {
        self.card_count() / 2
    }

    /// Label stored alongside results ("4x4" or "6x6").
    pub fn label(self) -> &'static str {
        match self {
            Self::FourByFour => "4x4",
            Self::SixBySix => "6x6",
        }
    }
}

impl FromStr for BoardSize {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "4x4" => Ok(Self::FourByFour),
            "6x6" => Ok(Self::SixBySix),
            other => Err(BoardError::InvalidSize(other.to_string())),
        }
    }
}

impl TryFrom<usize> for BoardSize {
    type Error = BoardError;

    /// Interprets a raw card count.
    fn try_from(card_count: usize) -> Result<Self, Self::Error> {
        match card_count {
            16 => Ok(Self::FourByFour),
            36 => Ok(Self::SixBySix),
            other => Err(BoardError::InvalidSize(format!("{other} cards"))),
        }
    }
}

/// What a player can see of a card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardFace {
    /// Face down.
    Hidden,
    /// Face up, waiting for the turn to resolve.
    Revealed(Symbol),
    /// Permanently matched.
    Resolved(Symbol),
}

/// A single card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    id: CardId,
    symbol: Symbol,
    is_revealed: bool,
    is_resolved: bool,
}

impl Card {
    /// Creates a face-down, unmatched card.
    pub fn new(id: CardId, symbol: Symbol) -> Self {
        Self {
            id,
            symbol,
            is_revealed: false,
            is_resolved: false,
        }
    }

    /// The card's id.
    pub fn id(&self) -> CardId {
        self.id
    }

    /// The card's symbol, regardless of whether it is face up.
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// True while the card is face up pending resolution.
    pub fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    /// True once the card has been matched.
    pub fn is_resolved(&self) -> bool {
        self.is_resolved
    }

    /// True if the card can be picked in the current turn.
    pub fn is_selectable(&self) -> bool {
        !self.is_revealed && !self.is_resolved
    }

    /// The card as a player sees it. Hidden cards do not disclose their symbol.
    pub fn face(&self) -> CardFace {
        if self.is_resolved {
            CardFace::Resolved(self.symbol.clone())
        } else if self.is_revealed {
            CardFace::Revealed(self.symbol.clone())
        } else {
            CardFace::Hidden
        }
    }

    pub(crate) fn reveal(&mut self) {
        self.is_revealed = true;
    }

    pub(crate) fn conceal(&mut self) {
        self.is_revealed = false;
    }

    pub(crate) fn resolve(&mut self) {
        self.is_revealed = false;
        self.is_resolved = true;
    }
}

/// An ordered layout of cards.
///
/// Card ids always equal their position in the layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    size: BoardSize,
    cards: Vec<Card>,
}

impl Board {
    /// Lays out symbols in the given order, assigning ids `0..n`.
    ///
    /// The caller is responsible for the pairing of `symbols`; boards built
    /// through [`crate::generate`] always satisfy it.
    #[instrument(skip(symbols))]
    pub fn from_symbols(size: BoardSize, symbols: Vec<Symbol>) -> Result<Self, BoardError> {
        if symbols.len() != size.card_count() {
            return Err(BoardError::InvalidSize(format!(
                "{} cards for a {} board",
                symbols.len(),
                size
            )));
        }
        let cards = symbols
            .into_iter()
            .enumerate()
            .map(|(id, symbol)| Card::new(id, symbol))
            .collect();
        Ok(Self { size, cards })
    }

    /// The board layout.
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// All cards in layout order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Gets the card with the given id.
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    /// Number of cards on the board.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns true if the board has no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Ids of cards that are neither revealed nor resolved.
    pub fn selectable_ids(&self) -> Vec<CardId> {
        self.cards
            .iter()
            .filter(|card| card.is_selectable())
            .map(Card::id)
            .collect()
    }

    /// Number of cards already matched.
    pub fn resolved_count(&self) -> usize {
        self.cards.iter().filter(|card| card.is_resolved()).count()
    }

    pub(crate) fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id)
    }

    pub(crate) fn resolve_pair(&mut self, first: CardId, second: CardId) {
        for card in self.cards.iter_mut().filter(|c| c.id == first || c.id == second) {
            card.resolve();
        }
    }

    pub(crate) fn conceal_pair(&mut self, first: CardId, second: CardId) {
        for card in self.cards.iter_mut().filter(|c| c.id == first || c.id == second) {
            card.conceal();
        }
    }

    /// Formats the board as a grid, hiding face-down cards.
    pub fn display(&self) -> String {
        let side = self.size.side();
        self.cards
            .chunks(side)
            .map(|row| {
                row.iter()
                    .map(|card| match card.face() {
                        CardFace::Hidden => format!("{:>2}", card.id()),
                        CardFace::Revealed(symbol) => format!("[{symbol}]"),
                        CardFace::Resolved(symbol) => symbol.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(n: usize) -> Vec<Symbol> {
        (0..n / 2)
            .flat_map(|i| [Symbol::from(format!("s{i}")), Symbol::from(format!("s{i}"))])
            .collect()
    }

    #[test]
    fn test_board_size_labels_parse() {
        assert_eq!("4x4".parse::<BoardSize>(), Ok(BoardSize::FourByFour));
        assert_eq!("6x6".parse::<BoardSize>(), Ok(BoardSize::SixBySix));
        assert_eq!(BoardSize::SixBySix.to_string(), "6x6");
    }

    #[test]
    fn test_unsupported_label_is_invalid_size() {
        assert!(matches!(
            "5x5".parse::<BoardSize>(),
            Err(BoardError::InvalidSize(_))
        ));
    }

    #[test]
    fn test_card_count_conversion() {
        assert_eq!(BoardSize::try_from(16), Ok(BoardSize::FourByFour));
        assert_eq!(BoardSize::try_from(36), Ok(BoardSize::SixBySix));
        assert!(matches!(
            BoardSize::try_from(0),
            Err(BoardError::InvalidSize(_))
        ));
        assert!(matches!(
            BoardSize::try_from(20),
            Err(BoardError::InvalidSize(_))
        ));
    }

    #[test]
    fn test_pair_counts() {
        assert_eq!(BoardSize::FourByFour.pair_count(), 8);
        assert_eq!(BoardSize::SixBySix.pair_count(), 18);
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&BoardSize::FourByFour).expect("Serialize");
        assert_eq!(json, "\"4x4\"");
    }

    #[test]
    fn test_from_symbols_assigns_sequential_ids() {
        let board = Board::from_symbols(BoardSize::FourByFour, symbols(16)).expect("Valid");
        let ids: Vec<_> = board.cards().iter().map(Card::id).collect();
        assert_eq!(ids, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn test_from_symbols_wrong_length_rejected() {
        let result = Board::from_symbols(BoardSize::FourByFour, symbols(36));
        assert!(matches!(result, Err(BoardError::InvalidSize(_))));
    }

    #[test]
    fn test_hidden_face_does_not_leak_symbol() {
        let mut card = Card::new(0, Symbol::from("A"));
        assert_eq!(card.face(), CardFace::Hidden);
        card.reveal();
        assert_eq!(card.face(), CardFace::Revealed(Symbol::from("A")));
        card.resolve();
        assert_eq!(card.face(), CardFace::Resolved(Symbol::from("A")));
        assert!(!card.is_revealed());
    }
}
