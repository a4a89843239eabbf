use super::card::Card;
use super::hand::Hand;
use rand::Rng;

/// Deck extends Hand with sampling without replacement.
/// The remaining deck of a simulation is the full deck less every
/// card a caller has fixed (dealt, kept, played, or cut).
#[derive(Debug, Clone, Copy)]
pub struct Deck(Hand);

impl From<Deck> for Hand {
    fn from(deck: Deck) -> Self {
        deck.0
    }
}
impl From<Hand> for Deck {
    fn from(hand: Hand) -> Self {
        Self(hand)
    }
}

impl Deck {
    pub fn new() -> Self {
        Self(Hand::full())
    }
    pub fn size(&self) -> usize {
        self.0.size()
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.0.contains(card)
    }
    /// the deck less a set of cards already accounted for
    pub fn without(&self, hand: &Hand) -> Self {
        Self(self.0.minus(hand))
    }
    pub fn remove(&mut self, card: Card) {
        self.0.remove(card);
    }

    /// remove a uniformly random card from the deck
    pub fn draw<R: Rng>(&mut self, rng: &mut R) -> Card {
        assert!(self.size() > 0, "draw from an empty deck");
        let i = rng.random_range(0..self.size());
        let mut deck = u64::from(self.0);
        for _ in 0..i {
            deck &= deck - 1;
        }
        let card = Card::from(deck.trailing_zeros() as u8);
        self.remove(card);
        card
    }

    /// remove n random cards from the deck
    pub fn deal<R: Rng>(&mut self, n: usize, rng: &mut R) -> Hand {
        (0..n).map(|_| self.draw(rng)).collect()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
