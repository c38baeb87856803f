use fastrand::Rng;

pub type Rgb = (u8, u8, u8);

/// Firework colors, named after the salt that produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    LithiumPink,
    StrontiumRed,
    PotassiumViolet,
    SodiumYellow,
    CalciumOrange,
    CopperGreen,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::LithiumPink,
        Color::StrontiumRed,
        Color::PotassiumViolet,
        Color::SodiumYellow,
        Color::CalciumOrange,
        Color::CopperGreen,
    ];

    pub fn rgb(self) -> Rgb {
        match self {
            Color::LithiumPink => (158, 44, 129),
            Color::StrontiumRed => (236, 60, 22),
            Color::PotassiumViolet => (243, 135, 112),
            Color::SodiumYellow => (254, 230, 172),
            Color::CalciumOrange => (203, 64, 7),
            Color::CopperGreen => (77, 199, 46),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::LithiumPink => "pink",
            Color::StrontiumRed => "red",
            Color::PotassiumViolet => "violet",
            Color::SodiumYellow => "yellow",
            Color::CalciumOrange => "orange",
            Color::CopperGreen => "green",
        }
    }

    pub fn random(rng: &mut Rng) -> Self {
        Self::ALL[rng.usize(0..Self::ALL.len())]
    }

    /// Pick from `palette`, or from every color when it is empty.
    pub fn random_from(rng: &mut Rng, palette: &[Color]) -> Self {
        if palette.is_empty() {
            Self::random(rng)
        } else {
            palette[rng.usize(0..palette.len())]
        }
    }

    /// `amount` distinct colors in random order. Clamped to the palette size.
    pub fn sample(rng: &mut Rng, amount: usize) -> Vec<Color> {
        let mut all = Self::ALL;
        rng.shuffle(&mut all);
        all[..amount.min(all.len())].to_vec()
    }
}
