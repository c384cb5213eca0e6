//! Render pass over a snapshot.
//!
//! The simulation never touches a graphics API. The host supplies a
//! `TextureProvider` to resolve sprite sheets once, and a `SpriteRenderer`
//! that receives one `SpriteDraw` per drawable, back to front.

use std::fmt;

use glam::{Vec2, Vec4};

use shepherd_core::constants::{LAZER_FRAMES, ROCKET_RETICLE_SIZE, UNIT_WALK_FRAMES};
use shepherd_core::enums::{HazardFamily, HazardPhase};
use shepherd_core::state::{GameStateSnapshot, HazardView};
use shepherd_core::types::Rect;

/// Opaque handle to a texture owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Resolves texture names to host handles.
pub trait TextureProvider {
    fn texture(&self, name: &str) -> Option<TextureHandle>;
}

/// Which cell of a sprite sheet to draw. Cells are laid out left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteFrame {
    pub index: u32,
    pub count: u32,
}

/// One textured quad centred on `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub texture: TextureHandle,
    pub position: Vec2,
    pub size: Vec2,
    pub rotation: f32,
    /// RGBA tint.
    pub color: Vec4,
    pub frame: Option<SpriteFrame>,
}

pub trait SpriteRenderer {
    fn draw_sprite(&mut self, sprite: &SpriteDraw);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpriteSheetError {
    MissingTexture(String),
}

impl fmt::Display for SpriteSheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTexture(name) => write!(f, "missing texture '{name}'"),
        }
    }
}

impl std::error::Error for SpriteSheetError {}

/// Every texture the render pass needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSheet {
    pub background: TextureHandle,
    pub unit: TextureHandle,
    pub selection_box: TextureHandle,
    pub lazer: TextureHandle,
    pub lazer_exploded: TextureHandle,
    pub rocket: TextureHandle,
    pub rocket_exploded: TextureHandle,
    pub rocket_target: TextureHandle,
    pub power_up: TextureHandle,
}

impl SpriteSheet {
    pub const TEXTURE_NAMES: [&'static str; 9] = [
        "background",
        "sheep",
        "selection_box",
        "lazer",
        "lazer_exploded",
        "rocket",
        "rocket_exploded",
        "rocket_target",
        "power_up",
    ];

    /// Resolve every texture up front. Fails on the first name the provider lacks.
    pub fn load(provider: &impl TextureProvider) -> Result<Self, SpriteSheetError> {
        let get = |name: &str| {
            provider
                .texture(name)
                .ok_or_else(|| SpriteSheetError::MissingTexture(name.to_string()))
        };
        Ok(Self {
            background: get("background")?,
            unit: get("sheep")?,
            selection_box: get("selection_box")?,
            lazer: get("lazer")?,
            lazer_exploded: get("lazer_exploded")?,
            rocket: get("rocket")?,
            rocket_exploded: get("rocket_exploded")?,
            rocket_target: get("rocket_target")?,
            power_up: get("power_up")?,
        })
    }
}

const WHITE: Vec4 = Vec4::ONE;
const SELECTED_TINT: Vec4 = Vec4::new(0.6, 0.8, 1.0, 1.0);
const SELECTION_BOX_TINT: Vec4 = Vec4::new(1.0, 1.0, 1.0, 0.3);
/// Telegraphing lazers are drawn faint.
const TELEGRAPH_TINT: Vec4 = Vec4::new(1.0, 1.0, 1.0, 0.4);

/// Draw one frame: background, lazers, power-ups, units, rockets with reticles, selection box.
pub fn draw_frame(
    snapshot: &GameStateSnapshot,
    selection: Option<Rect>,
    sheet: &SpriteSheet,
    renderer: &mut impl SpriteRenderer,
) {
    renderer.draw_sprite(&SpriteDraw {
        texture: sheet.background,
        position: snapshot.world_size / 2.0,
        size: snapshot.world_size,
        rotation: 0.0,
        color: WHITE,
        frame: None,
    });

    for hazard in hazards_of(snapshot, HazardFamily::Lazer) {
        let (texture, color, frame) = match hazard.phase {
            HazardPhase::Spawning => (sheet.lazer, TELEGRAPH_TINT, lazer_frame(hazard)),
            HazardPhase::Active => (sheet.lazer, WHITE, lazer_frame(hazard)),
            _ => (sheet.lazer_exploded, WHITE, None),
        };
        renderer.draw_sprite(&SpriteDraw {
            texture,
            position: hazard.position,
            size: hazard.size,
            rotation: hazard.rotation,
            color,
            frame,
        });
    }

    for power_up in &snapshot.power_ups {
        renderer.draw_sprite(&SpriteDraw {
            texture: sheet.power_up,
            position: power_up.position,
            size: power_up.size,
            rotation: 0.0,
            color: WHITE,
            frame: None,
        });
    }

    for unit in &snapshot.units {
        renderer.draw_sprite(&SpriteDraw {
            texture: sheet.unit,
            position: unit.position,
            size: unit.size,
            rotation: 0.0,
            color: if unit.selected { SELECTED_TINT } else { WHITE },
            frame: Some(SpriteFrame {
                index: unit.frame,
                count: UNIT_WALK_FRAMES,
            }),
        });
    }

    for hazard in hazards_of(snapshot, HazardFamily::Rocket) {
        let texture = if hazard.phase == HazardPhase::Detonated {
            sheet.rocket_exploded
        } else {
            sheet.rocket
        };
        renderer.draw_sprite(&SpriteDraw {
            texture,
            position: hazard.position,
            size: hazard.size,
            rotation: hazard.rotation,
            color: WHITE,
            frame: None,
        });
        if let Some(target) = hazard.target_position {
            renderer.draw_sprite(&SpriteDraw {
                texture: sheet.rocket_target,
                position: target,
                size: Vec2::splat(ROCKET_RETICLE_SIZE),
                rotation: 0.0,
                color: WHITE,
                frame: None,
            });
        }
    }

    if let Some(rect) = selection {
        renderer.draw_sprite(&SpriteDraw {
            texture: sheet.selection_box,
            position: rect.center(),
            size: rect.size,
            rotation: 0.0,
            color: SELECTION_BOX_TINT,
            frame: None,
        });
    }
}

fn hazards_of(
    snapshot: &GameStateSnapshot,
    family: HazardFamily,
) -> impl Iterator<Item = &HazardView> {
    snapshot
        .hazards
        .iter()
        .filter(move |h| h.family == family && h.phase != HazardPhase::Removed)
}

fn lazer_frame(hazard: &HazardView) -> Option<SpriteFrame> {
    Some(SpriteFrame {
        index: hazard.frame,
        count: LAZER_FRAMES,
    })
}
