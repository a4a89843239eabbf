#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Suit {
    #[default]
    Club = 0,
    Diamond = 1,
    Heart = 2,
    Spade = 3,
}

impl Suit {
    pub const MAX: Self = Suit::Spade;
    pub const MIN: Self = Suit::Club;
    pub const COUNT: usize = 4;
    const GLYPHS: [char; 4] = ['♣', '♦', '♥', '♠'];
    const LETTERS: [char; 4] = ['C', 'D', 'H', 'S'];

    pub const fn all() -> [Self; 4] {
        [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade]
    }
}

impl From<u8> for Suit {
    fn from(n: u8) -> Suit {
        match n {
            0 => Suit::Club,
            1 => Suit::Diamond,
            2 => Suit::Heart,
            3 => Suit::Spade,
            _ => panic!("Invalid suit u8: {}", n),
        }
    }
}
impl From<Suit> for u8 {
    fn from(s: Suit) -> u8 {
        s as u8
    }
}

/// accepts either the glyph or the english letter, any case
impl TryFrom<char> for Suit {
    type Error = anyhow::Error;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::GLYPHS
            .iter()
            .position(|g| *g == c)
            .or_else(|| {
                Self::LETTERS
                    .iter()
                    .position(|l| *l == c.to_ascii_uppercase())
            })
            .map(|i| Suit::from(i as u8))
            .ok_or_else(|| anyhow::anyhow!("invalid suit: {}", c))
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", Self::GLYPHS[*self as usize])
    }
}
