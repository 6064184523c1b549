use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Number of seats at every table.
pub const SEAT_COUNT: usize = 8;

/// Largest whole number a browser `Number` represents exactly (2^53 - 1).
pub const MAX_WHOLE_NUMBER: u64 = 9_007_199_254_740_991;

/// Server-assigned game identifier.
pub type GameId = u64;

/// A seat index that has been checked to lie in `0..SEAT_COUNT`.
///
/// Decodes from a number (`emptySeats`) or a numeric string (`players` keys,
/// which stay strings when a snapshot is buffered inside a tagged enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct SeatIndex(u8);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("seat {0} is outside the table (0-7)")]
pub struct InvalidSeat(pub usize);

impl SeatIndex {
    pub fn new(index: usize) -> Result<Self, InvalidSeat> {
        if index < SEAT_COUNT {
            Ok(Self(index as u8))
        } else {
            Err(InvalidSeat(index))
        }
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }

    /// Every seat, ascending.
    pub fn all() -> impl Iterator<Item = SeatIndex> {
        (0..SEAT_COUNT as u8).map(SeatIndex)
    }
}

impl TryFrom<u8> for SeatIndex {
    type Error = InvalidSeat;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value as usize)
    }
}

impl From<SeatIndex> for u8 {
    fn from(seat: SeatIndex) -> Self {
        seat.0
    }
}

impl<'de> Deserialize<'de> for SeatIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SeatVisitor)
    }
}

struct SeatVisitor;

impl<'de> Visitor<'de> for SeatVisitor {
    type Value = SeatIndex;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a seat index between 0 and {}", SEAT_COUNT - 1)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<SeatIndex, E> {
        usize::try_from(value)
            .ok()
            .and_then(|index| SeatIndex::new(index).ok())
            .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(value), &self))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<SeatIndex, E> {
        u64::try_from(value)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
            .and_then(|value| self.visit_u64(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<SeatIndex, E> {
        value
            .parse::<u64>()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
            .and_then(|value| self.visit_u64(value))
    }
}

impl fmt::Display for SeatIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ink colour of a suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuitColor {
    Red,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub fn glyph(self) -> &'static str {
        match self {
            Suit::Spades => "\u{2660}",
            Suit::Hearts => "\u{2665}",
            Suit::Diamonds => "\u{2666}",
            Suit::Clubs => "\u{2663}",
        }
    }

    pub fn color(self) -> SuitColor {
        match self {
            Suit::Hearts | Suit::Diamonds => SuitColor::Red,
            Suit::Spades | Suit::Clubs => SuitColor::Black,
        }
    }
}

/// One card as the server chooses to show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub face_down: bool,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub suit: Option<Suit>,
}

impl CardView {
    /// Rank and suit of a face-up card.
    ///
    /// Returns `None` for face-down cards even when the payload carries a
    /// value, and for face-up cards missing either half.
    pub fn face(&self) -> Option<(&str, Suit)> {
        if self.face_down {
            return None;
        }
        Some((self.value.as_deref()?, self.suit?))
    }
}

impl fmt::Display for CardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.face() {
            Some((value, suit)) => write!(f, "{value}{}", suit.glyph()),
            None => f.write_str("??"),
        }
    }
}

/// A seated player, display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub name: String,
    pub chips: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cards: Vec<CardView>,
}

/// Complete table state returned by the status and create endpoints.
///
/// Always replaces any previously held snapshot wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    #[serde(rename = "gameID")]
    pub game_id: GameId,
    #[serde(default)]
    pub game_title: Option<String>,
    #[serde(default)]
    pub starter_chips: Option<u64>,
    pub blind_size: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub empty_seats: BTreeSet<SeatIndex>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub players: BTreeMap<SeatIndex, PlayerView>,
}

impl GameSnapshot {
    /// Title shown above the table.
    pub fn title(&self) -> String {
        match &self.game_title {
            Some(title) if !title.is_empty() => title.clone(),
            _ => format!("Game #{}", self.game_id),
        }
    }

    /// The player sitting at `seat`, unless the seat is listed as empty.
    pub fn occupant(&self, seat: SeatIndex) -> Option<&PlayerView> {
        if self.empty_seats.contains(&seat) {
            return None;
        }
        self.players.get(&seat)
    }
}

/// Go encodes nil maps and slices as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /api/v1/game/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRequest {
    #[serde(rename = "gameID")]
    pub game_id: GameId,
    pub passphrase: String,
}

/// Body of `POST /api/v1/game/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub passphrase: String,
    pub starter_chips: u64,
    pub blind_size: u64,
}

// ---------------------------------------------------------------------------
// Numeric form input
// ---------------------------------------------------------------------------

/// Parse a form field as a whole number.
///
/// The parsed value, printed back, must equal the input exactly, so signs,
/// whitespace, leading zeros, fractions and exponents are all rejected.
/// Zero is accepted.
pub fn parse_whole_number(input: &str) -> Option<u64> {
    let value: u64 = input.parse().ok()?;
    if value > MAX_WHOLE_NUMBER || value.to_string() != input {
        return None;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(i: usize) -> SeatIndex {
        SeatIndex::new(i).unwrap()
    }

    #[test]
    fn whole_numbers() {
        assert_eq!(parse_whole_number("10"), Some(10));
        assert_eq!(parse_whole_number("0"), Some(0));
        assert_eq!(parse_whole_number("9007199254740991"), Some(MAX_WHOLE_NUMBER));
    }

    #[test]
    fn rejected_numbers() {
        assert_eq!(parse_whole_number("10.5"), None);
        assert_eq!(parse_whole_number("-1"), None);
        assert_eq!(parse_whole_number(""), None);
        assert_eq!(parse_whole_number("Infinity"), None);
        assert_eq!(parse_whole_number("+5"), None);
        assert_eq!(parse_whole_number("007"), None);
        assert_eq!(parse_whole_number(" 7"), None);
        assert_eq!(parse_whole_number("1e3"), None);
        assert_eq!(parse_whole_number("9007199254740993"), None);
    }

    #[test]
    fn seat_index_bounds() {
        assert_eq!(SeatIndex::new(7).map(SeatIndex::get), Ok(7));
        assert_eq!(SeatIndex::new(8), Err(InvalidSeat(8)));
        assert_eq!(SeatIndex::all().count(), SEAT_COUNT);
    }

    #[test]
    fn decodes_server_snapshot() {
        let json = r#"{
            "gameID": 3,
            "starterChips": 500,
            "blindSize": 10,
            "emptySeats": [0, 2, 3, 4, 5, 6, 7],
            "players": {"1": {"name": "ann", "chips": 480, "seat": 1}}
        }"#;
        let snap: GameSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.game_id, 3);
        assert_eq!(snap.starter_chips, Some(500));
        assert_eq!(snap.empty_seats.len(), 7);
        assert_eq!(snap.players[&seat(1)].chips, 480);
        assert!(snap.players[&seat(1)].cards.is_empty());
        assert_eq!(snap.title(), "Game #3");
    }

    #[test]
    fn decodes_null_collections() {
        let json = r#"{"gameID": 7, "starterChips": 100, "blindSize": 2, "emptySeats": null, "players": null}"#;
        let snap: GameSnapshot = serde_json::from_str(json).unwrap();
        assert!(snap.empty_seats.is_empty());
        assert!(snap.players.is_empty());
    }

    #[test]
    fn rejects_out_of_range_seats() {
        let players = r#"{"gameID": 1, "blindSize": 2, "players": {"8": {"name": "x", "chips": 1}}}"#;
        assert!(serde_json::from_str::<GameSnapshot>(players).is_err());

        let empty = r#"{"gameID": 1, "blindSize": 2, "emptySeats": [9]}"#;
        assert!(serde_json::from_str::<GameSnapshot>(empty).is_err());

        let negative = r#"{"gameID": 1, "blindSize": 2, "emptySeats": [-1]}"#;
        assert!(serde_json::from_str::<GameSnapshot>(negative).is_err());
    }

    #[test]
    fn seats_decode_from_numbers_and_strings() {
        assert_eq!(serde_json::from_str::<SeatIndex>("3").unwrap(), seat(3));
        assert_eq!(serde_json::from_str::<SeatIndex>(r#""3""#).unwrap(), seat(3));
        assert!(serde_json::from_str::<SeatIndex>(r#""x""#).is_err());
        assert!(serde_json::from_str::<SeatIndex>(r#""8""#).is_err());
        assert_eq!(serde_json::to_string(&seat(5)).unwrap(), "5");
    }

    #[test]
    fn buffered_snapshot_keeps_its_players() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "kind")]
        enum Wrapped {
            Table { snapshot: GameSnapshot },
        }

        let json = r#"{"gameID": 2, "blindSize": 5, "emptySeats": [1], "players": {"0": {"name": "ann", "chips": 50}}}"#;
        let snapshot: GameSnapshot = serde_json::from_str(json).unwrap();
        let wrapped = Wrapped::Table { snapshot };
        let encoded = serde_json::to_string(&wrapped).unwrap();
        let decoded: Wrapped = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, wrapped);
        let Wrapped::Table { snapshot } = decoded;
        assert_eq!(snapshot.players[&seat(0)].name, "ann");
    }

    #[test]
    fn face_down_cards_hide_their_face() {
        let card = CardView {
            face_down: true,
            value: Some("K".into()),
            suit: Some(Suit::Clubs),
        };
        assert_eq!(card.face(), None);
        assert_eq!(card.to_string(), "??");

        let card = CardView {
            face_down: false,
            ..card
        };
        assert_eq!(card.face(), Some(("K", Suit::Clubs)));
        assert_eq!(card.to_string(), "K\u{2663}");
    }

    #[test]
    fn suit_colors() {
        assert_eq!(Suit::Hearts.color(), SuitColor::Red);
        assert_eq!(Suit::Diamonds.color(), SuitColor::Red);
        assert_eq!(Suit::Spades.color(), SuitColor::Black);
        assert_eq!(Suit::Clubs.color(), SuitColor::Black);
    }

    #[test]
    fn request_bodies_use_server_field_names() {
        let status = serde_json::to_value(StatusRequest {
            game_id: 4,
            passphrase: "pw".into(),
        })
        .unwrap();
        assert_eq!(status, serde_json::json!({"gameID": 4, "passphrase": "pw"}));

        let create = serde_json::to_value(CreateGameRequest {
            passphrase: "pw".into(),
            starter_chips: 100,
            blind_size: 10,
        })
        .unwrap();
        assert_eq!(
            create,
            serde_json::json!({"passphrase": "pw", "starterChips": 100, "blindSize": 10})
        );
    }
}
