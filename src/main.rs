use bevy::prelude::*;

mod camera;
mod config;
mod graph;
mod input;
mod network;
mod visual;

use camera::CameraPlugin;
use input::InputPlugin;

use crate::visual::plugin::NetworkPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Knot Network".into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(ClearColor(Color::BLACK))
    .add_plugins(CameraPlugin)
    .add_plugins(InputPlugin)
    .add_plugins(NetworkPlugin);

    app.run();
}
