//! Translates raw per-frame input into player commands.
//!
//! The host polls its input device and hands over one `InputSnapshot`
//! per frame. `InputController` keeps the drag-selection box between
//! frames and emits commands on the edges: left press starts a box,
//! left release selects, right press moves, `S` stops.

use std::collections::HashSet;

use glam::Vec2;

use shepherd_core::commands::PlayerCommand;
use shepherd_core::enums::{ButtonAction, Key, MouseButton};
use shepherd_core::types::Rect;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
}

/// Input state for one frame. `mouse` is in world coordinates.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    pub button: Option<MouseButton>,
    pub action: ButtonAction,
    pub previous_action: ButtonAction,
    pub modifiers: Modifiers,
    pub mouse: Vec2,
    pub keys: HashSet<Key>,
}

#[derive(Debug, Clone, Default)]
pub struct InputController {
    drag_origin: Option<Vec2>,
    selection: Option<Rect>,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The drag box currently on screen, normalised to a top-left corner and positive size.
    pub fn selection_box(&self) -> Option<Rect> {
        self.selection
    }

    pub fn process(&mut self, input: &InputSnapshot) -> Vec<PlayerCommand> {
        let mut commands = Vec::new();

        match (input.button, input.previous_action, input.action) {
            (Some(MouseButton::Left), ButtonAction::Release, ButtonAction::Press) => {
                self.drag_origin = Some(input.mouse);
                self.selection = Some(Rect::from_corners(input.mouse, input.mouse));
            }
            (Some(MouseButton::Left), ButtonAction::Press, ButtonAction::Press) => {
                if let Some(origin) = self.drag_origin {
                    self.selection = Some(Rect::from_corners(origin, input.mouse));
                }
            }
            (Some(MouseButton::Left), ButtonAction::Press, ButtonAction::Release) => {
                if let Some(origin) = self.drag_origin.take() {
                    let rect = Rect::from_corners(origin, input.mouse);
                    commands.push(PlayerCommand::SelectInBox {
                        min: rect.min,
                        max: rect.max(),
                        additive: input.modifiers.shift,
                    });
                }
                self.selection = None;
            }
            (Some(MouseButton::Right), ButtonAction::Release, ButtonAction::Press) => {
                commands.push(PlayerCommand::MoveSelected {
                    target: input.mouse,
                });
            }
            _ => {}
        }

        if input.keys.contains(&Key::S) {
            commands.push(PlayerCommand::StopSelected);
        }

        commands
    }
}
