//! The five endings.

/// A terminal outcome of the story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ending {
    /// Claimed the heart and defeated the Shadow Queen.
    Power,
    /// Claimed the heart without hearing the whispers.
    Ruler,
    /// Sealed the heart with the crystal.
    Guardian,
    /// Destroyed the heart.
    Liberator,
    /// Left the heart alone.
    Wanderer,
}

impl Ending {
    /// All endings.
    pub const ALL: [Ending; 5] = [
        Ending::Power,
        Ending::Ruler,
        Ending::Guardian,
        Ending::Liberator,
        Ending::Wanderer,
    ];

    /// Short identifier.
    pub fn key(self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Ruler => "ruler",
            Self::Guardian => "guardian",
            Self::Liberator => "liberator",
            Self::Wanderer => "wanderer",
        }
    }

    /// Heading shown when the ending is reached.
    pub fn title(self) -> &'static str {
        match self {
            Self::Power => "The Crown of Shadows",
            Self::Ruler => "The Heart's Regent",
            Self::Guardian => "The Silent Watch",
            Self::Liberator => "The Breaking",
            Self::Wanderer => "The Open Road",
        }
    }

    /// Closing narration.
    pub fn text(self) -> &'static str {
        match self {
            Self::Power => {
                "The Shadow Queen unravels into smoke, and her whispers become yours. \
                 The heart beats in time with your own. Emberfall will kneel, \
                 and you are no longer sure that is a bad thing."
            }
            Self::Ruler => {
                "You lift the heart and its warmth settles into your bones. \
                 The Spire answers to you now. You rule it carefully, \
                 and the valley prospers under a strange new lord."
            }
            Self::Guardian => {
                "The crystal sings as it closes over the heart. The Spire falls \
                 quiet. Someone must watch the seal, and you stay, \
                 a guardian no song will remember."
            }
            Self::Liberator => {
                "The heart shatters. Light floods the chamber and the Spire groans, \
                 then crumbles. Whatever held the valley in its grip is gone."
            }
            Self::Wanderer => {
                "You turn from the heart and walk back down the stair. \
                 Some powers are better left alone. The road is long \
                 and there are other places to see."
            }
        }
    }
}

impl std::fmt::Display for Ending {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
