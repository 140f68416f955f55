//! External collaborator hooks
//!
//! The game loop fires these at documented trigger points and never reads
//! anything back: sound/music playback, screen transitions, and persistent
//! storage all live outside the core. A host is constructed per play
//! session and passed by reference wherever the loop needs it.

/// Sound effects the platformer loop requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    /// Player leaves the ground
    Jump,
    /// Coin (or generic pickup) collected
    Coin,
    /// Star collected
    Star,
    /// Extra life gained
    Success,
    /// Enemy stomped
    Bounce,
    /// Hazard hit with lives remaining
    Hit,
    /// Game over
    Lose,
}

/// Summary shown on the win screen
#[derive(Debug, Clone, PartialEq)]
pub struct WinStats {
    pub coins: u32,
    pub stars: u32,
    /// Completion time in seconds, time bonuses already subtracted
    pub time_secs: f32,
    pub score: u32,
}

/// Fire-and-forget side calls out of the game loop.
///
/// Every method defaults to a no-op so hosts only implement what they
/// surface; the core keeps running without sound, screens or storage.
pub trait GameHost {
    fn play_sound(&mut self, _sound: Sound) {}
    fn play_music(&mut self, _track: &str) {}
    fn stop_music(&mut self) {}
    fn show_win_screen(&mut self, _stats: &WinStats) {}
    fn show_encouragement(&mut self, _message: &str) {}
    fn add_coins(&mut self, _amount: u32) {}
    fn record_high_score(&mut self, _level_id: &str, _score: u32) {}
    fn unlock_achievement(&mut self, _achievement_id: &str) {}
}

/// Host that swallows every call; for tests and headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl GameHost for NullHost {}
