//! Static card catalog: the 52 ranked cards, two jokers and the card-back
//! sentinel, keyed by the deck API's two-character codes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Base URL of the deck API's static card images.
pub const CARD_IMAGE_BASE: &str = "https://deckofcardsapi.com/static/img";

/// Code of the card-back sentinel (decorative board corners, deck image).
pub const CARD_BACK_CODE: &str = "BK";

/// Placeholder shown in the discard slot before anything was discarded.
pub const BLANK_CARD_IMAGE: &str = "./images/Blank-Playing-Card.png";

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Suit {
    Spades,
    Diamonds,
    Clubs,
    Hearts,
    /// Black joker.
    Black,
    /// Red joker.
    Red,
    /// Card-back sentinel.
    Back,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "ACE")]
    Ace,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "JACK")]
    Jack,
    #[serde(rename = "QUEEN")]
    Queen,
    #[serde(rename = "KING")]
    King,
    #[serde(rename = "JOKER")]
    Joker,
    #[serde(rename = "BK")]
    Back,
}

/// One catalog entry. Immutable; only ever handed out as `&'static Card`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct Card {
    pub code: &'static str,
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    /// Display-image reference for this card.
    pub fn image(&self) -> String {
        if self.code == CARD_BACK_CODE {
            format!("{CARD_IMAGE_BASE}/back.png")
        } else {
            format!("{CARD_IMAGE_BASE}/{}.png", self.code)
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.suit == Suit::Back
    }

    pub fn is_joker(&self) -> bool {
        self.rank == Rank::Joker
    }
}

/// A card code as it travels through the shared document.
///
/// Not validated on construction: codes arriving from a remote writer may be
/// unknown, and lookups through [`CardCode::card`] treat that as absent.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardCode(String);

impl CardCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn card(&self) -> Option<&'static Card> {
        card_by_code(&self.0)
    }
}

impl fmt::Display for CardCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<&'static Card> for CardCode {
    fn from(card: &'static Card) -> Self {
        Self::new(card.code)
    }
}

macro_rules! card {
    ($code:literal, $suit:ident, $rank:ident) => {
        Card {
            code: $code,
            suit: Suit::$suit,
            rank: Rank::$rank,
        }
    };
}

/// Every card known to the game, in deck API order, sentinel last.
pub static CATALOG: [Card; 55] = [
    card!("AS", Spades, Ace),
    card!("2S", Spades, Two),
    card!("3S", Spades, Three),
    card!("4S", Spades, Four),
    card!("5S", Spades, Five),
    card!("6S", Spades, Six),
    card!("7S", Spades, Seven),
    card!("8S", Spades, Eight),
    card!("9S", Spades, Nine),
    card!("0S", Spades, Ten),
    card!("JS", Spades, Jack),
    card!("QS", Spades, Queen),
    card!("KS", Spades, King),
    card!("AD", Diamonds, Ace),
    card!("2D", Diamonds, Two),
    card!("3D", Diamonds, Three),
    card!("4D", Diamonds, Four),
    card!("5D", Diamonds, Five),
    card!("6D", Diamonds, Six),
    card!("7D", Diamonds, Seven),
    card!("8D", Diamonds, Eight),
    card!("9D", Diamonds, Nine),
    card!("0D", Diamonds, Ten),
    card!("JD", Diamonds, Jack),
    card!("QD", Diamonds, Queen),
    card!("KD", Diamonds, King),
    card!("AC", Clubs, Ace),
    card!("2C", Clubs, Two),
    card!("3C", Clubs, Three),
    card!("4C", Clubs, Four),
    card!("5C", Clubs, Five),
    card!("6C", Clubs, Six),
    card!("7C", Clubs, Seven),
    card!("8C", Clubs, Eight),
    card!("9C", Clubs, Nine),
    card!("0C", Clubs, Ten),
    card!("JC", Clubs, Jack),
    card!("QC", Clubs, Queen),
    card!("KC", Clubs, King),
    card!("AH", Hearts, Ace),
    card!("2H", Hearts, Two),
    card!("3H", Hearts, Three),
    card!("4H", Hearts, Four),
    card!("5H", Hearts, Five),
    card!("6H", Hearts, Six),
    card!("7H", Hearts, Seven),
    card!("8H", Hearts, Eight),
    card!("9H", Hearts, Nine),
    card!("0H", Hearts, Ten),
    card!("JH", Hearts, Jack),
    card!("QH", Hearts, Queen),
    card!("KH", Hearts, King),
    card!("X1", Black, Joker),
    card!("X2", Red, Joker),
    card!("BK", Back, Back),
];

pub fn card_by_code(code: &str) -> Option<&'static Card> {
    CATALOG.iter().find(|card| card.code == code)
}

/// Reverse lookup from an image reference back to its card.
pub fn card_by_image(image: &str) -> Option<&'static Card> {
    CATALOG.iter().find(|card| card.image() == image)
}

pub fn card_back() -> &'static Card {
    &CATALOG[CATALOG.len() - 1]
}

/// The 52 ranked cards of a standard deck (no jokers, no sentinel).
pub fn standard_deck() -> impl Iterator<Item = &'static Card> {
    CATALOG
        .iter()
        .filter(|card| !card.is_joker() && !card.is_sentinel())
}
