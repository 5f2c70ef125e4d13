use std::fmt;

/// Unique identifier for any actor tracked in the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the controllable player character.
    pub const PLAYER: Self = Self(0);

    /// Returns true if this entity represents the player.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::PLAYER
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
///
/// The floor index lives on the actor, not here: every grid query in the
/// engine is already scoped to a single floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position shifted by the given delta.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Integer resource meter (e.g., health, stamina) tracked per actor.
///
/// Every mutation keeps `current` within `[0, maximum]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    /// Creates a meter filled to its maximum.
    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    /// Sets the current value, clamped to the meter bounds.
    pub fn set(&mut self, value: u32) {
        self.current = value.min(self.maximum);
    }

    /// Adds up to `amount`, returning how much was actually restored.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.missing());
        self.current += gained;
        gained
    }

    /// Removes up to `amount`, returning how much was actually drained.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.current);
        self.current -= lost;
        lost
    }

    /// Raises the maximum and restores the same amount (level-up growth).
    pub fn grow(&mut self, amount: u32) {
        self.maximum = self.maximum.saturating_add(amount);
        self.restore(amount);
    }

    pub fn missing(&self) -> u32 {
        self.maximum - self.current
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Returns true when `current / maximum <= percent / 100`, computed exactly.
    pub fn at_or_below_percent(&self, percent: u32) -> bool {
        u64::from(self.current) * 100 <= u64::from(self.maximum) * u64::from(percent)
    }

    /// Returns true when `current / maximum < percent / 100`, computed exactly.
    pub fn below_percent(&self, percent: u32) -> bool {
        u64::from(self.current) * 100 < u64::from(self.maximum) * u64::from(percent)
    }

    /// Current value as a rounded percentage of the maximum (0 for an empty maximum).
    pub fn percent(&self) -> u32 {
        if self.maximum == 0 {
            return 0;
        }
        ((u64::from(self.current) * 200 + u64::from(self.maximum)) / (u64::from(self.maximum) * 2))
            as u32
    }
}
