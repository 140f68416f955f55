//! Playkit demo driver
//!
//! Runs a sample platformer level headlessly with scripted input and logs
//! every host call, exercising the full stack (level parsing, physics,
//! particles, game loop) outside of the test suite.

use playkit::consts::FIXED_TIMESTEP_MS;
use playkit::{FrameInput, GameHost, GamePhase, LevelDocument, Outcome, PlatformerGame, Sound, WinStats};

/// Host that logs every side call instead of performing it
#[derive(Default)]
struct LoggingHost;

impl GameHost for LoggingHost {
    fn play_sound(&mut self, sound: Sound) {
        log::info!("sound: {sound:?}");
    }
    fn play_music(&mut self, track: &str) {
        log::info!("music on: {track}");
    }
    fn stop_music(&mut self) {
        log::info!("music off");
    }
    fn show_win_screen(&mut self, stats: &WinStats) {
        log::info!(
            "win screen: {} coins, {} stars, {:.1}s, score {}",
            stats.coins,
            stats.stars,
            stats.time_secs,
            stats.score
        );
    }
    fn show_encouragement(&mut self, message: &str) {
        log::info!("encouragement: {message}");
    }
    fn add_coins(&mut self, amount: u32) {
        log::info!("bank +{amount} coins");
    }
    fn record_high_score(&mut self, level_id: &str, score: u32) {
        log::info!("high score for {level_id}: {score}");
    }
    fn unlock_achievement(&mut self, achievement_id: &str) {
        log::info!("achievement unlocked: {achievement_id}");
    }
}

fn sample_level() -> serde_json::Result<LevelDocument> {
    serde_json::from_value(serde_json::json!({
        "type": "platformer",
        "id": "demo-meadow",
        "canvas": { "width": 2400.0, "height": 600.0, "backgroundColor": "#87CEEB" },
        "objects": [
            { "x": 0.0, "y": 500.0, "width": 2400.0, "height": 60.0, "type": "grass",
              "blockData": { "solid": true, "friction": 0.8, "icon": "🟩" } },
            { "x": 360.0, "y": 400.0, "width": 120.0, "height": 30.0, "type": "cloud",
              "blockData": { "solid": true, "oneWay": true, "icon": "☁️" } },
            { "x": 300.0, "y": 440.0, "width": 30.0, "height": 30.0, "type": "coin",
              "blockData": { "points": 10, "icon": "🪙" } },
            { "x": 520.0, "y": 440.0, "width": 30.0, "height": 30.0, "type": "coin",
              "blockData": { "points": 10, "icon": "🪙" } },
            { "x": 700.0, "y": 430.0, "width": 30.0, "height": 30.0, "type": "star",
              "blockData": { "points": 50, "icon": "⭐" } },
            { "x": 900.0, "y": 460.0, "width": 40.0, "height": 40.0, "type": "slime",
              "blockData": { "category": "enemy", "range": 80.0, "icon": "🟢" } },
            { "x": 1200.0, "y": 460.0, "width": 40.0, "height": 40.0, "type": "spikes",
              "blockData": { "deadly": true, "icon": "🔺" } },
            { "x": 2200.0, "y": 420.0, "width": 60.0, "height": 80.0, "type": "flag",
              "blockData": { "goal": true, "icon": "🏁" } }
        ],
        "drawings": [
            { "type": "rectangle", "x": 1400.0, "y": 430.0, "width": 160.0, "height": 20.0,
              "color": "#8B4513", "isSolid": true }
        ],
        "settings": { "livesCount": 3 },
        "character": { "emoji": "🦊" }
    }))
}

fn main() {
    env_logger::init();

    let level = match sample_level() {
        Ok(level) => level,
        Err(err) => {
            log::error!("sample level is malformed: {err}");
            return;
        }
    };

    let mut game = match PlatformerGame::new(level, 42) {
        Ok(game) => game,
        Err(err) => {
            log::error!("level failed to load: {err}");
            return;
        }
    };
    game.set_viewport(800.0, 600.0);

    let mut host = LoggingHost;
    game.start(&mut host);

    // Scripted run: hold right, hop every second or so
    let mut frame: u32 = 0;
    let outcome = loop {
        let input = FrameInput {
            right: true,
            jump: frame % 70 < 4,
            ..Default::default()
        };
        game.advance(&input, FIXED_TIMESTEP_MS, &mut host);
        frame += 1;

        match game.phase() {
            GamePhase::Ended(outcome) => break Some(outcome),
            _ if frame > 60 * 60 => break None,
            _ => {}
        }
    };

    match outcome {
        Some(Outcome::Won) => log::info!(
            "finished in {} frames: score {}, {}/{} stars",
            frame,
            game.score(),
            game.stars(),
            game.total_stars()
        ),
        Some(Outcome::GameOver) => log::info!("game over after {} frames", frame),
        None => log::warn!("demo timed out without reaching the goal"),
    }
}
