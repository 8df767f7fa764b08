use crate::{config::Demo, render::PolygonMode};
use winit::event::{ElementState, VirtualKeyCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Exit,
    SetPolygonMode(PolygonMode),
    CheckErrors,
}

/// Translates a key press into the action it triggers in `demo`.
///
/// Releases never trigger anything.
pub fn map_key(
    demo: Demo,
    keycode: Option<VirtualKeyCode>,
    state: ElementState,
) -> Option<InputAction> {
    if state != ElementState::Pressed {
        return None;
    }

    match (keycode?, demo) {
        (VirtualKeyCode::Escape, _) => Some(InputAction::Exit),
        (VirtualKeyCode::E, _) => Some(InputAction::CheckErrors),
        (VirtualKeyCode::Right, Demo::Rectangle) => {
            Some(InputAction::SetPolygonMode(PolygonMode::Line))
        }
        (VirtualKeyCode::Left, Demo::Rectangle) => {
            Some(InputAction::SetPolygonMode(PolygonMode::Fill))
        }
        _ => None,
    }
}
