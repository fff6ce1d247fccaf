use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::{CursorLeft, CursorMoved};

use crate::camera::ViewportSize;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerNdc>()
            .add_systems(PreUpdate, track_pointer);
    }
}

/// Latest pointer position, in window pixels and normalized device
/// coordinates (x right, y up, both in [-1, 1])
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct PointerNdc {
    pub window_position: Option<Vec2>,
    pub ndc: Option<Vec2>,
}

impl PointerNdc {
    pub fn clear(&mut self) {
        self.window_position = None;
        self.ndc = None;
    }
}

/// Window pixels (top-left origin) to NDC
///
/// `None` for a degenerate window.
pub fn window_to_ndc(position: Vec2, size: Vec2) -> Option<Vec2> {
    if size.x <= 0.0 || size.y <= 0.0 {
        return None;
    }

    Some(Vec2::new(
        position.x / size.x * 2.0 - 1.0,
        -(position.y / size.y) * 2.0 + 1.0,
    ))
}

fn track_pointer(
    mut cursor_moved: MessageReader<CursorMoved>,
    mut cursor_left: MessageReader<CursorLeft>,
    mut touches: MessageReader<TouchInput>,
    viewport: Res<ViewportSize>,
    mut pointer: ResMut<PointerNdc>,
) {
    let mut latest = None;
    let mut left = false;

    for e in cursor_moved.read() {
        // last event wins; top-left origin
        latest = Some(e.position);
        left = false;
    }

    if cursor_left.read().count() > 0 {
        left = true;
    }

    for ev in touches.read() {
        match ev.phase {
            TouchPhase::Started | TouchPhase::Moved => {
                latest = Some(ev.position);
                left = false;
            }
            TouchPhase::Ended | TouchPhase::Canceled => left = true,
        }
    }

    if left {
        pointer.clear();
        return;
    }

    // A resize under a still cursor moves its NDC
    let resized = pointer.window_position.filter(|_| viewport.is_changed());
    let Some(position) = latest.or(resized) else {
        return;
    };

    pointer.window_position = Some(position);
    pointer.ndc = window_to_ndc(position, viewport.0);
}
