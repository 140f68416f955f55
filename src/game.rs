//! Platformer game loop
//!
//! Drives one authored level from load to a win/lose outcome. The host owns
//! the frame scheduler and calls [`PlatformerGame::advance`] once per frame
//! with the real elapsed time; the loop applies input, steps the physics
//! world, resolves the game-level overlaps (collect, hazard, enemy, goal)
//! and keeps the camera and effects current. Platforms are physics bodies;
//! collectibles, hazards, enemies and the goal are trigger zones checked by
//! plain rectangle overlap against the player - they never enter the
//! physics world.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::host::{GameHost, Sound, WinStats};
use crate::level::{BlockRole, Drawing, DrawingKind, LevelDocument, PlacedObject};
use crate::render::{self, CameraPainter, Painter};
use crate::sim::{collision, BodyId, BodySpec, InvalidBodySpec, ParticleSystem, PhysicsWorld, Rect};
use crate::tuning::PhysicsTuning;

const MUSIC_TRACK: &str = "adventure";

const ENCOURAGEMENTS: [&str; 5] = [
    "You can do it!",
    "Almost there!",
    "Try again, hero!",
    "Keep going!",
    "Don't give up!",
];

/// Session lifecycle.
///
/// `Idle -> Loaded -> Running <-> Paused; Running -> Ended -> Loaded`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// No level loaded (after `stop`)
    Idle,
    /// Level loaded, waiting for `start`
    Loaded,
    Running,
    Paused,
    Ended(Outcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    GameOver,
}

/// Input sampled by the host for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// The player's render state, synced from its physics body every frame
#[derive(Debug, Clone)]
struct Player {
    pos: Vec2,
    size: Vec2,
    emoji: String,
    /// 1 facing right, -1 facing left
    facing: f32,
    jumping: bool,
    on_ground: bool,
}

impl Player {
    fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }
}

#[derive(Debug, Clone)]
struct Platform {
    rect: Rect,
    icon: Option<String>,
    /// Set for platforms drawn with the editor's drawing tools
    fill: Option<u32>,
    #[allow(dead_code)]
    body: BodyId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CollectibleKind {
    Coin,
    Star,
    Other,
}

#[derive(Debug, Clone)]
struct Collectible {
    rect: Rect,
    kind: CollectibleKind,
    points: u32,
    extra_life: bool,
    extra_time: f32,
    icon: Option<String>,
    collected: bool,
}

#[derive(Debug, Clone)]
struct Hazard {
    rect: Rect,
    icon: Option<String>,
}

#[derive(Debug, Clone)]
struct Enemy {
    rect: Rect,
    icon: Option<String>,
    start_x: f32,
    direction: f32,
    speed: f32,
    range: f32,
    #[allow(dead_code)]
    flying: bool,
}

#[derive(Debug, Clone)]
struct Goal {
    rect: Rect,
    icon: Option<String>,
}

/// Floating "+N" feedback near a pickup
#[derive(Debug, Clone)]
struct ScorePopup {
    pos: Vec2,
    text: String,
    ttl_ms: f32,
}

/// One platformer play session over one level document
pub struct PlatformerGame {
    level: LevelDocument,
    seed: u64,

    world: PhysicsWorld,
    particles: ParticleSystem,
    rng: Pcg32,

    player: Player,
    player_body: BodyId,
    platforms: Vec<Platform>,
    collectibles: Vec<Collectible>,
    hazards: Vec<Hazard>,
    enemies: Vec<Enemy>,
    goal: Option<Goal>,
    popups: Vec<ScorePopup>,

    score: u32,
    coins: u32,
    stars: u32,
    total_stars: u32,
    lives: u32,
    elapsed_ms: f32,
    time_bonus_secs: f32,

    camera_x: f32,
    viewport: Vec2,
    background: u32,

    phase: GamePhase,
    jump_held: bool,
    restart_timer_ms: f32,
}

impl PlatformerGame {
    /// Load a level into a fresh session. The seed drives the cosmetic
    /// randomness only; the same seed and inputs replay the same session.
    pub fn new(level: LevelDocument, seed: u64) -> Result<Self, InvalidBodySpec> {
        let background = render::parse_color(&level.canvas.background_color).unwrap_or_else(|| {
            log::warn!(
                "unparseable background color {:?}, using sky blue",
                level.canvas.background_color
            );
            0x87CEEB
        });

        let mut game = Self {
            level,
            seed,
            world: PhysicsWorld::new(PhysicsTuning::PLATFORMER),
            particles: ParticleSystem::new(seed),
            rng: Pcg32::seed_from_u64(seed ^ 0x9E37_79B9),
            player: Player {
                pos: Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
                size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
                emoji: String::new(),
                facing: 1.0,
                jumping: false,
                on_ground: false,
            },
            player_body: BodyId(0),
            platforms: Vec::new(),
            collectibles: Vec::new(),
            hazards: Vec::new(),
            enemies: Vec::new(),
            goal: None,
            popups: Vec::new(),
            score: 0,
            coins: 0,
            stars: 0,
            total_stars: 0,
            lives: DEFAULT_LIVES,
            elapsed_ms: 0.0,
            time_bonus_secs: 0.0,
            camera_x: 0.0,
            viewport: Vec2::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT),
            background,
            phase: GamePhase::Idle,
            jump_held: false,
            restart_timer_ms: 0.0,
        };
        game.load_level()?;
        Ok(game)
    }

    /// Size of the visible area, used for camera clamping and rendering
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn stars(&self) -> u32 {
        self.stars
    }

    pub fn total_stars(&self) -> u32 {
        self.total_stars
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn camera_x(&self) -> f32 {
        self.camera_x
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed_ms / 1000.0
    }

    pub fn player_position(&self) -> Vec2 {
        self.player.pos
    }

    /// Rebuild every entity and physics body from the level document
    fn load_level(&mut self) -> Result<(), InvalidBodySpec> {
        self.world.clear();
        self.particles.clear();
        self.particles.reseed(self.seed);
        self.rng = Pcg32::seed_from_u64(self.seed ^ 0x9E37_79B9);
        self.platforms.clear();
        self.collectibles.clear();
        self.hazards.clear();
        self.enemies.clear();
        self.goal = None;
        self.popups.clear();

        self.player.pos = Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y);
        self.player.facing = 1.0;
        self.player.jumping = false;
        self.player.on_ground = false;
        self.player.emoji = self
            .level
            .character
            .as_ref()
            .map(|c| c.emoji.clone())
            .unwrap_or_else(|| "🤖".to_string());

        self.player_body = self.world.create_body(BodySpec {
            x: PLAYER_SPAWN_X,
            y: PLAYER_SPAWN_Y,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            mass: 1.0,
            restitution: Some(0.0),
            friction: Some(PLAYER_FRICTION),
            ..Default::default()
        })?;

        let objects = self.level.objects.clone();
        for obj in &objects {
            self.spawn_object(obj);
        }

        let drawings = self.level.drawings.clone();
        for drawing in &drawings {
            if drawing.is_solid {
                self.spawn_drawn_platform(drawing);
            }
        }

        self.total_stars = self
            .collectibles
            .iter()
            .filter(|c| c.kind == CollectibleKind::Star)
            .count() as u32;

        self.score = 0;
        self.coins = 0;
        self.stars = 0;
        let lives = self.level.settings.lives_count;
        self.lives = if lives == 0 { DEFAULT_LIVES } else { lives };
        self.elapsed_ms = 0.0;
        self.time_bonus_secs = 0.0;
        self.camera_x = 0.0;
        self.jump_held = false;
        self.restart_timer_ms = 0.0;
        self.phase = GamePhase::Loaded;

        log::info!(
            "level loaded: {} platforms, {} collectibles, {} hazards, {} enemies, goal: {}",
            self.platforms.len(),
            self.collectibles.len(),
            self.hazards.len(),
            self.enemies.len(),
            self.goal.is_some(),
        );
        Ok(())
    }

    fn spawn_object(&mut self, obj: &PlacedObject) {
        let rect = Rect::new(obj.x, obj.y, obj.width, obj.height);
        let icon = obj.block_data.icon.clone();

        match obj.block_data.role() {
            Some(BlockRole::Platform {
                friction,
                bouncy,
                one_way,
                ..
            }) => {
                let spec = BodySpec {
                    x: rect.x,
                    y: rect.y,
                    width: rect.width,
                    height: rect.height,
                    is_static: true,
                    friction: Some(friction),
                    restitution: Some(if bouncy { 0.8 } else { 0.0 }),
                    one_way,
                    ..Default::default()
                };
                match self.world.create_body(spec) {
                    Ok(body) => self.platforms.push(Platform {
                        rect,
                        icon,
                        fill: None,
                        body,
                    }),
                    Err(err) => {
                        log::warn!("skipping malformed platform at ({}, {}): {err}", obj.x, obj.y)
                    }
                }
            }
            Some(BlockRole::Collectible {
                points,
                extra_life,
                extra_time,
            }) => {
                let kind = match obj.kind.as_str() {
                    "coin" => CollectibleKind::Coin,
                    "star" => CollectibleKind::Star,
                    _ => CollectibleKind::Other,
                };
                self.collectibles.push(Collectible {
                    rect,
                    kind,
                    points,
                    extra_life,
                    extra_time,
                    icon,
                    collected: false,
                });
            }
            Some(BlockRole::Hazard) => self.hazards.push(Hazard { rect, icon }),
            Some(BlockRole::Enemy {
                range,
                speed,
                flying,
            }) => self.enemies.push(Enemy {
                rect,
                icon,
                start_x: obj.x,
                direction: 1.0,
                speed,
                range,
                flying,
            }),
            Some(BlockRole::Goal) => self.goal = Some(Goal { rect, icon }),
            None => {}
        }
    }

    fn spawn_drawn_platform(&mut self, drawing: &Drawing) {
        if drawing.kind != DrawingKind::Rectangle {
            return;
        }
        let rect = Rect::new(
            drawing.x.unwrap_or(0.0),
            drawing.y.unwrap_or(0.0),
            drawing.width.unwrap_or(0.0),
            drawing.height.unwrap_or(0.0),
        );
        let spec = BodySpec {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            is_static: true,
            ..Default::default()
        };
        match self.world.create_body(spec) {
            Ok(body) => self.platforms.push(Platform {
                rect,
                icon: None,
                fill: render::parse_color(&drawing.color).or(Some(0x8B4513)),
                body,
            }),
            Err(err) => log::warn!("skipping malformed drawn platform: {err}"),
        }
    }

    /// Begin (or rejoin) play; starts the background music
    pub fn start(&mut self, host: &mut dyn GameHost) {
        if self.phase == GamePhase::Idle {
            log::warn!("start called with no level loaded");
            return;
        }
        self.phase = GamePhase::Running;
        host.play_music(MUSIC_TRACK);
    }

    /// Freeze the session; the host must stop scheduling frames
    pub fn pause(&mut self, host: &mut dyn GameHost) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
            host.stop_music();
        }
    }

    /// Continue from the current state without reloading
    pub fn resume(&mut self, host: &mut dyn GameHost) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
            host.play_music(MUSIC_TRACK);
        }
    }

    /// Reload the level from scratch and start running
    pub fn restart(&mut self, host: &mut dyn GameHost) {
        match self.load_level() {
            Ok(()) => self.start(host),
            Err(err) => {
                log::error!("restart failed: {err}");
                self.phase = GamePhase::Idle;
            }
        }
    }

    /// Leave play mode. The host must cancel its scheduled frame callback;
    /// a stray late `advance` against a stopped session is ignored.
    pub fn stop(&mut self, host: &mut dyn GameHost) {
        self.phase = GamePhase::Idle;
        host.stop_music();
    }

    /// Run one frame. Only advances while Running, except that a finished
    /// game-over session counts down to its automatic restart.
    pub fn advance(&mut self, input: &FrameInput, dt_ms: f32, host: &mut dyn GameHost) {
        match self.phase {
            GamePhase::Running => self.update(input, dt_ms, host),
            GamePhase::Ended(Outcome::GameOver) => {
                self.restart_timer_ms -= dt_ms;
                if self.restart_timer_ms <= 0.0 {
                    self.restart(host);
                }
            }
            _ => {}
        }
    }

    fn update(&mut self, input: &FrameInput, dt_ms: f32, host: &mut dyn GameHost) {
        self.elapsed_ms += dt_ms;

        self.handle_input(input, host);
        self.world.step(dt_ms);
        self.sync_player();
        self.update_enemies();

        if self.check_interactions(host) {
            return;
        }

        self.update_camera();

        for popup in &mut self.popups {
            popup.ttl_ms -= dt_ms;
        }
        self.popups.retain(|p| p.ttl_ms > 0.0);

        self.particles.update();
    }

    fn handle_input(&mut self, input: &FrameInput, host: &mut dyn GameHost) {
        let Some(body) = self.world.body(self.player_body) else {
            return;
        };
        let vel = body.vel;
        let on_ground = body.on_ground;

        if input.left {
            self.world.set_velocity(self.player_body, -RUN_SPEED, vel.y);
            self.player.facing = -1.0;
        } else if input.right {
            self.world.set_velocity(self.player_body, RUN_SPEED, vel.y);
            self.player.facing = 1.0;
        } else {
            // Glide to a stop instead of snapping
            self.world
                .set_velocity(self.player_body, vel.x * IDLE_DECAY, vel.y);
        }

        // Edge-triggered: holding the key while airborne must not re-jump
        if input.jump && !self.jump_held && on_ground {
            let vx = self
                .world
                .body(self.player_body)
                .map(|b| b.vel.x)
                .unwrap_or(0.0);
            self.world.set_velocity(self.player_body, vx, JUMP_SPEED);
            self.player.jumping = true;
            host.play_sound(Sound::Jump);
        }
        self.jump_held = input.jump;
    }

    fn sync_player(&mut self) {
        if let Some(body) = self.world.body(self.player_body) {
            self.player.pos = body.pos;
            self.player.on_ground = body.on_ground;
            if body.on_ground {
                self.player.jumping = false;
            }
        }
    }

    fn update_enemies(&mut self) {
        for enemy in &mut self.enemies {
            enemy.rect.x += enemy.speed * enemy.direction;
            if enemy.rect.x > enemy.start_x + enemy.range {
                enemy.direction = -1.0;
            } else if enemy.rect.x < enemy.start_x - enemy.range {
                enemy.direction = 1.0;
            }
        }
    }

    /// Game-level overlap outcomes, checked after physics so they always
    /// see post-resolution positions. Returns true when the session ended
    /// (or respawned through a full reload) this frame.
    fn check_interactions(&mut self, host: &mut dyn GameHost) -> bool {
        for i in 0..self.collectibles.len() {
            if !self.collectibles[i].collected
                && collision::aabbs_intersect(&self.player.rect(), &self.collectibles[i].rect)
            {
                self.collect_item(i, host);
            }
        }

        for i in 0..self.hazards.len() {
            if collision::aabbs_intersect(&self.player.rect(), &self.hazards[i].rect)
                && self.hit_hazard(host)
            {
                return true;
            }
        }

        let player_vy = self
            .world
            .body(self.player_body)
            .map(|b| b.vel.y)
            .unwrap_or(0.0);
        let mut i = 0;
        while i < self.enemies.len() {
            let enemy = &self.enemies[i];
            if collision::aabbs_intersect(&self.player.rect(), &enemy.rect) {
                let stomped = player_vy > 0.0
                    && self.player.rect().bottom() < enemy.rect.y + enemy.rect.height / 2.0;
                if stomped {
                    self.defeat_enemy(i, host);
                    continue;
                } else if self.hit_hazard(host) {
                    return true;
                }
            }
            i += 1;
        }

        if let Some(goal) = &self.goal {
            if collision::aabbs_intersect(&self.player.rect(), &goal.rect) {
                self.win(host);
                return true;
            }
        }

        // Falling past the level bottom is an implicit hazard
        if self.player.pos.y > self.level.canvas.height + FALL_MARGIN && self.hit_hazard(host) {
            return true;
        }

        false
    }

    /// Idempotent: a collectible awards points exactly once even while the
    /// overlap persists across frames
    fn collect_item(&mut self, index: usize, host: &mut dyn GameHost) {
        let item = &mut self.collectibles[index];
        item.collected = true;

        let center = item.rect.center();
        let corner = Vec2::new(item.rect.x, item.rect.y);
        let (kind, points, extra_life, extra_time) =
            (item.kind, item.points, item.extra_life, item.extra_time);

        if points > 0 {
            self.score += points;
            match kind {
                CollectibleKind::Coin => {
                    self.coins += 1;
                    host.play_sound(Sound::Coin);
                    self.particles.coin_collect(center.x, center.y);
                }
                CollectibleKind::Star => {
                    self.stars += 1;
                    host.play_sound(Sound::Star);
                    self.particles.star_collect(center.x, center.y);
                }
                CollectibleKind::Other => host.play_sound(Sound::Coin),
            }
        }

        if extra_life {
            self.lives += 1;
            host.play_sound(Sound::Success);
        }

        if extra_time > 0.0 {
            self.time_bonus_secs += extra_time;
            self.popups.push(ScorePopup {
                pos: corner,
                text: format!("+{extra_time}s"),
                ttl_ms: POPUP_LIFETIME_MS,
            });
        }

        let text = if points > 0 {
            format!("+{points}")
        } else {
            "+".to_string()
        };
        self.popups.push(ScorePopup {
            pos: corner,
            text,
            ttl_ms: POPUP_LIFETIME_MS,
        });
    }

    fn defeat_enemy(&mut self, index: usize, host: &mut dyn GameHost) {
        let enemy = self.enemies.remove(index);
        self.score += STOMP_SCORE;

        let vx = self
            .world
            .body(self.player_body)
            .map(|b| b.vel.x)
            .unwrap_or(0.0);
        self.world
            .set_velocity(self.player_body, vx, STOMP_BOUNCE_SPEED);

        host.play_sound(Sound::Bounce);
        let center = enemy.rect.center();
        self.particles.explosion(center.x, center.y, 0xFF6B6B);
        self.popups.push(ScorePopup {
            pos: Vec2::new(enemy.rect.x, enemy.rect.y),
            text: format!("+{STOMP_SCORE}"),
            ttl_ms: POPUP_LIFETIME_MS,
        });
    }

    /// Returns true when the hit ended the session (game over)
    fn hit_hazard(&mut self, host: &mut dyn GameHost) -> bool {
        self.lives = self.lives.saturating_sub(1);

        if self.lives == 0 {
            self.game_over(host);
            return true;
        }

        // Respawn with progress kept
        host.play_sound(Sound::Hit);
        if let Some(body) = self.world.body_mut(self.player_body) {
            body.pos = Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y);
            body.vel = Vec2::ZERO;
        }
        self.player.pos = Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y);
        let message = ENCOURAGEMENTS[self.rng.random_range(0..ENCOURAGEMENTS.len())];
        host.show_encouragement(message);
        false
    }

    fn update_camera(&mut self) {
        let target = self.player.pos.x - self.viewport.x / 2.0;
        self.camera_x += (target - self.camera_x) * CAMERA_LERP;
        let max = (self.level.canvas.width - self.viewport.x).max(0.0);
        self.camera_x = self.camera_x.clamp(0.0, max);
    }

    fn win(&mut self, host: &mut dyn GameHost) {
        self.phase = GamePhase::Ended(Outcome::Won);
        host.stop_music();

        let time_secs = (self.elapsed_ms / 1000.0 - self.time_bonus_secs).max(0.0);
        let stats = WinStats {
            coins: self.coins,
            stars: self.stars,
            time_secs,
            score: self.score,
        };

        host.add_coins(self.coins);
        let level_id = self.level.id.as_deref().unwrap_or(&self.level.kind);
        host.record_high_score(level_id, self.score);
        host.show_win_screen(&stats);
        host.unlock_achievement("first_win");

        log::info!("level won: score {}, time {:.1}s", self.score, time_secs);
    }

    fn game_over(&mut self, host: &mut dyn GameHost) {
        self.phase = GamePhase::Ended(Outcome::GameOver);
        self.restart_timer_ms = GAME_OVER_RESTART_MS;
        host.play_sound(Sound::Lose);
        host.stop_music();
        log::info!("game over: score {}", self.score);
    }

    /// Draw the current frame. Entities render in world space shifted by
    /// the camera; the background fills the viewport.
    pub fn render(&self, painter: &mut dyn Painter) {
        painter.fill_rect(
            &Rect::new(0.0, 0.0, self.viewport.x, self.viewport.y),
            self.background,
            1.0,
        );

        let mut camera = CameraPainter::new(painter, Vec2::new(self.camera_x, 0.0));

        for platform in &self.platforms {
            if let Some(fill) = platform.fill {
                camera.fill_rect(&platform.rect, fill, 1.0);
            } else if let Some(icon) = &platform.icon {
                let size = platform.rect.width.min(platform.rect.height) * 0.8;
                camera.text(icon, platform.rect.center(), size, 0.0, false, 1.0);
            }
        }

        for item in &self.collectibles {
            if item.collected {
                continue;
            }
            if let Some(icon) = &item.icon {
                camera.text(icon, item.rect.center(), item.rect.width * 0.8, 0.0, false, 1.0);
            }
        }

        for hazard in &self.hazards {
            if let Some(icon) = &hazard.icon {
                camera.text(icon, hazard.rect.center(), hazard.rect.width * 0.8, 0.0, false, 1.0);
            }
        }

        for enemy in &self.enemies {
            if let Some(icon) = &enemy.icon {
                camera.text(icon, enemy.rect.center(), enemy.rect.width * 0.8, 0.0, false, 1.0);
            }
        }

        if let Some(goal) = &self.goal {
            if let Some(icon) = &goal.icon {
                camera.text(icon, goal.rect.center(), goal.rect.width * 0.8, 0.0, false, 1.0);
            }
        }

        camera.text(
            &self.player.emoji,
            self.player.rect().center(),
            self.player.size.x * 0.9,
            0.0,
            self.player.facing < 0.0,
            1.0,
        );

        for popup in &self.popups {
            camera.text(
                &popup.text,
                popup.pos,
                16.0,
                0.0,
                false,
                popup.ttl_ms / POPUP_LIFETIME_MS,
            );
        }

        self.particles.draw(&mut camera);
    }
}
