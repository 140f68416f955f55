//! Level document
//!
//! The serializable level the editor produces and the game loops consume.
//! Every field tolerates absence so a hand-edited or truncated document
//! still loads; missing values default to zero/false. Saving a loaded
//! document reproduces it exactly (the save/load round trip the editor and
//! game share).

use serde::{Deserialize, Serialize};

use crate::consts;

/// A complete authored level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDocument {
    /// Genre key, e.g. "platformer"
    #[serde(rename = "type")]
    pub kind: String,
    /// Saved-game identifier, used for high-score persistence
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub canvas: CanvasSpec,
    #[serde(default)]
    pub objects: Vec<PlacedObject>,
    #[serde(default)]
    pub drawings: Vec<Drawing>,
    #[serde(default)]
    pub settings: LevelSettings,
    #[serde(default)]
    pub character: Option<Character>,
}

/// Level dimensions and background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasSpec {
    #[serde(default = "default_canvas_width")]
    pub width: f32,
    #[serde(default = "default_canvas_height")]
    pub height: f32,
    #[serde(default = "default_background")]
    pub background_color: String,
}

fn default_canvas_width() -> f32 {
    1600.0
}

fn default_canvas_height() -> f32 {
    600.0
}

fn default_background() -> String {
    "#87CEEB".to_string()
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            background_color: default_background(),
        }
    }
}

/// One block placed on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedObject {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    /// Block id from the palette, e.g. "coin" or "star"
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub block_data: BlockData,
}

/// Behavior properties of a placed block, straight from the block catalog
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockData {
    #[serde(default)]
    pub solid: bool,
    #[serde(default)]
    pub bounce: bool,
    #[serde(default)]
    pub moving: bool,
    #[serde(default)]
    pub one_way: bool,
    #[serde(default)]
    pub friction: Option<f32>,
    #[serde(default)]
    pub points: Option<u32>,
    #[serde(default)]
    pub extra_life: bool,
    /// Seconds subtracted from the recorded completion time
    #[serde(default)]
    pub extra_time: Option<f32>,
    #[serde(default)]
    pub deadly: bool,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub goal: bool,
    #[serde(default)]
    pub range: Option<f32>,
    #[serde(default)]
    pub speed: Option<f32>,
    #[serde(default)]
    pub flying: bool,
}

/// Freehand or shape drawing placed by the editor's drawing tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drawing {
    #[serde(rename = "type")]
    pub kind: DrawingKind,
    #[serde(default)]
    pub points: Option<Vec<Point>>,
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub is_solid: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawingKind {
    Freehand,
    Rectangle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Per-level gameplay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelSettings {
    #[serde(default = "default_lives")]
    pub lives_count: u32,
}

fn default_lives() -> u32 {
    consts::DEFAULT_LIVES
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            lives_count: default_lives(),
        }
    }
}

/// The character chosen in the picker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub emoji: String,
}

/// The closed set of gameplay roles a placed block can take.
///
/// The game loop switches on this instead of probing optional property
/// bags; a block that matches none of the roles is pure decoration.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockRole {
    Platform {
        friction: f32,
        bouncy: bool,
        one_way: bool,
        moving: bool,
    },
    Collectible {
        points: u32,
        extra_life: bool,
        extra_time: f32,
    },
    Hazard,
    Enemy {
        range: f32,
        speed: f32,
        flying: bool,
    },
    Goal,
}

/// Ground friction for platforms that don't specify one
const DEFAULT_PLATFORM_FRICTION: f32 = 0.8;

impl BlockData {
    /// Classify this property bag into its gameplay role
    pub fn role(&self) -> Option<BlockRole> {
        if self.solid {
            return Some(BlockRole::Platform {
                friction: self.friction.unwrap_or(DEFAULT_PLATFORM_FRICTION),
                bouncy: self.bounce,
                one_way: self.one_way,
                moving: self.moving,
            });
        }
        if self.points.is_some() || self.extra_life || self.extra_time.is_some() {
            return Some(BlockRole::Collectible {
                points: self.points.unwrap_or(0),
                extra_life: self.extra_life,
                extra_time: self.extra_time.unwrap_or(0.0),
            });
        }
        if self.deadly {
            return Some(BlockRole::Hazard);
        }
        if self.category.as_deref() == Some("enemy") {
            return Some(BlockRole::Enemy {
                range: self.range.unwrap_or(consts::ENEMY_RANGE),
                speed: self.speed.unwrap_or(consts::ENEMY_SPEED),
                flying: self.flying,
            });
        }
        if self.goal {
            return Some(BlockRole::Goal);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_document() -> serde_json::Value {
        json!({
            "type": "platformer",
            "id": "my-level",
            "canvas": { "width": 1600.0, "height": 600.0, "backgroundColor": "#87CEEB" },
            "objects": [
                { "x": 0.0, "y": 500.0, "width": 800.0, "height": 40.0, "type": "grass",
                  "blockData": { "solid": true, "friction": 0.8, "icon": "🟩" } },
                { "x": 200.0, "y": 440.0, "width": 30.0, "height": 30.0, "type": "coin",
                  "blockData": { "points": 10, "icon": "🪙" } },
                { "x": 400.0, "y": 460.0, "width": 40.0, "height": 40.0, "type": "spikes",
                  "blockData": { "deadly": true, "icon": "🔺" } }
            ],
            "drawings": [
                { "type": "rectangle", "x": 500.0, "y": 420.0, "width": 120.0, "height": 20.0,
                  "color": "#8B4513", "isSolid": true },
                { "type": "freehand", "points": [ { "x": 1.0, "y": 2.0 }, { "x": 3.0, "y": 4.0 } ],
                  "color": "#000000", "isSolid": false }
            ],
            "settings": { "livesCount": 3 },
            "character": { "emoji": "🤖" }
        })
    }

    #[test]
    fn document_round_trips_losslessly() {
        let doc: LevelDocument = serde_json::from_value(sample_document()).unwrap();
        let saved = serde_json::to_string(&doc).unwrap();
        let reloaded: LevelDocument = serde_json::from_str(&saved).unwrap();
        assert_eq!(doc, reloaded);
        assert_eq!(doc.objects, reloaded.objects);
        assert_eq!(doc.drawings, reloaded.drawings);
    }

    #[test]
    fn missing_fields_default_instead_of_failing() {
        let doc: LevelDocument = serde_json::from_value(json!({
            "type": "platformer",
            "objects": [ { "x": 1.0, "y": 2.0 } ]
        }))
        .unwrap();

        assert_eq!(doc.settings.lives_count, 3);
        assert_eq!(doc.canvas.width, 1600.0);
        assert!(doc.character.is_none());
        assert_eq!(doc.objects[0].width, 0.0);
        assert_eq!(doc.objects[0].block_data, BlockData::default());
        assert!(doc.objects[0].block_data.role().is_none());
    }

    #[test]
    fn classification_covers_every_role() {
        let solid = BlockData {
            solid: true,
            bounce: true,
            friction: Some(0.5),
            ..Default::default()
        };
        assert_eq!(
            solid.role(),
            Some(BlockRole::Platform {
                friction: 0.5,
                bouncy: true,
                one_way: false,
                moving: false,
            })
        );

        let coin = BlockData {
            points: Some(10),
            ..Default::default()
        };
        assert_eq!(
            coin.role(),
            Some(BlockRole::Collectible {
                points: 10,
                extra_life: false,
                extra_time: 0.0,
            })
        );

        let heart = BlockData {
            extra_life: true,
            ..Default::default()
        };
        assert!(matches!(
            heart.role(),
            Some(BlockRole::Collectible {
                extra_life: true,
                ..
            })
        ));

        let spikes = BlockData {
            deadly: true,
            ..Default::default()
        };
        assert_eq!(spikes.role(), Some(BlockRole::Hazard));

        let slime = BlockData {
            category: Some("enemy".to_string()),
            range: Some(60.0),
            ..Default::default()
        };
        assert_eq!(
            slime.role(),
            Some(BlockRole::Enemy {
                range: 60.0,
                speed: 2.0,
                flying: false,
            })
        );

        let flag = BlockData {
            goal: true,
            ..Default::default()
        };
        assert_eq!(flag.role(), Some(BlockRole::Goal));
    }

    #[test]
    fn solid_wins_over_other_properties() {
        // A bag that claims several roles classifies as a platform
        let confused = BlockData {
            solid: true,
            deadly: true,
            points: Some(5),
            ..Default::default()
        };
        assert!(matches!(confused.role(), Some(BlockRole::Platform { .. })));
    }
}
