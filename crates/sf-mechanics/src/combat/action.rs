//! Combat actions and event logging.

/// Who is acting or being acted upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// The player.
    Player,
    /// An enemy, by index into the encounter's enemy list.
    Enemy(usize),
}

/// An action resolved during a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatAction {
    /// A blow against a target.
    Attack {
        /// Who was hit.
        target: Actor,
        /// Damage dealt.
        damage: i32,
    },
    /// Reach for an item. `None` when the pack was empty or the choice was cancelled.
    UseItem {
        /// Name of the consumed item.
        item: Option<String>,
    },
    /// Brace for +2 defense until the end of the round.
    Defend,
    /// Try to run.
    Flee {
        /// Whether the escape worked.
        escaped: bool,
    },
}

impl std::fmt::Display for CombatAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attack {
                target: Actor::Player,
                damage,
            } => write!(f, "Attack player for {damage}"),
            Self::Attack {
                target: Actor::Enemy(i),
                damage,
            } => write!(f, "Attack enemy #{i} for {damage}"),
            Self::UseItem { item: Some(name) } => write!(f, "Use {name}"),
            Self::UseItem { item: None } => write!(f, "Use nothing"),
            Self::Defend => write!(f, "Defend"),
            Self::Flee { escaped: true } => write!(f, "Flee (escaped)"),
            Self::Flee { escaped: false } => write!(f, "Flee (failed)"),
        }
    }
}

/// A recorded combat event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatEvent {
    /// Which round this happened in (1-based).
    pub round: u32,
    /// Who acted.
    pub actor: Actor,
    /// What was done.
    pub action: CombatAction,
}
