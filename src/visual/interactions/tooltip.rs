use bevy::prelude::*;

use crate::{input::PointerNdc, visual::interactions::pointer::HoverState};

/// Tooltip sits this far right of and above the cursor, in pixels
const CURSOR_OFFSET: Vec2 = Vec2::new(10.0, -10.0);

const FONT_SIZE: f32 = 12.0;

#[derive(Component)]
pub struct Tooltip;

pub fn tooltip_text(label: &str) -> String {
    format!("Node Type: {label}")
}

/// Top-left corner of the tooltip for a cursor at `cursor` window pixels
pub fn tooltip_anchor(cursor: Vec2) -> Vec2 {
    cursor + CURSOR_OFFSET
}

pub fn spawn_tooltip(mut commands: Commands) {
    commands.spawn((
        Tooltip,
        Text::new(""),
        TextFont {
            font_size: FONT_SIZE,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            padding: UiRect::axes(Val::Px(8.0), Val::Px(4.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
        Visibility::Hidden,
    ));
}

/// System: Follow the cursor and show the hovered node's category
pub fn update_tooltip(
    hover: Res<HoverState>,
    pointer: Res<PointerNdc>,
    mut tooltips: Query<(&mut Text, &mut Node, &mut Visibility), With<Tooltip>>,
) {
    let Ok((mut text, mut node, mut visibility)) = tooltips.single_mut() else {
        return;
    };

    let (Some(label), Some(cursor)) = (hover.label.as_deref(), pointer.window_position) else {
        *visibility = Visibility::Hidden;
        return;
    };

    let anchor = tooltip_anchor(cursor);
    node.left = Val::Px(anchor.x);
    node.top = Val::Px(anchor.y);

    let content = tooltip_text(label);
    if text.0 != content {
        text.0 = content;
    }
    *visibility = Visibility::Visible;
}
