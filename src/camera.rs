use bevy::input::mouse::{AccumulatedMouseScroll, MouseScrollUnit};
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use bevy::window::WindowResized;
use std::f32::consts::TAU;

/// Vertical field of view in degrees
const FOV_DEGREES: f32 = 75.0;

const START_DISTANCE: f32 = 60.0;
const MIN_DISTANCE: f32 = 15.0;
const MAX_DISTANCE: f32 = 150.0;

const ZOOM_SPEED: f32 = 0.6;
const ZOOM_DAMPING: f32 = 0.1;

/// One full turn every 60 / 0.3 seconds
const AUTO_ROTATE_SPEED: f32 = 0.3 * TAU / 60.0;

/// Pixel-based scroll deltas are this many pixels per wheel line
const PIXELS_PER_LINE: f32 = 100.0;

const FOG_START: f32 = 10.0;
const FOG_END: f32 = 120.0;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitRig>()
            .init_resource::<ViewportSize>()
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (track_viewport_size, zoom_from_scroll, orbit_camera)
                    .chain()
                    .in_set(CameraSet),
            );
    }
}

/// Camera motion for the frame; anything reading the camera runs after it
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CameraSet;

#[derive(Component)]
pub struct MainCamera;

/// Orbit state: the camera circles the origin on the XZ plane
#[derive(Resource, Debug, Clone, Copy)]
pub struct OrbitRig {
    pub distance: f32,
    pub target_distance: f32,
    pub angle: f32,
}

impl Default for OrbitRig {
    fn default() -> Self {
        Self {
            distance: START_DISTANCE,
            target_distance: START_DISTANCE,
            angle: 0.0,
        }
    }
}

impl OrbitRig {
    /// Push the zoom target by `lines` wheel notches; positive zooms in
    pub fn scroll(&mut self, lines: f32) {
        self.target_distance = zoom_target(self.target_distance, lines);
    }

    /// Ease toward the zoom target and follow the clock for rotation
    pub fn advance(&mut self, elapsed_secs: f32) {
        self.distance = damp_toward(self.distance, self.target_distance, ZOOM_DAMPING);
        self.angle = auto_rotate_angle(elapsed_secs);
    }

    pub fn eye(&self) -> Vec3 {
        orbit_eye(self.angle, self.distance)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(Vec3::ZERO, Vec3::Y)
    }
}

/// Logical window size, kept current across resizes
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize(pub Vec2);

impl Default for ViewportSize {
    fn default() -> Self {
        Self(Vec2::new(1280.0, 720.0))
    }
}

pub fn auto_rotate_angle(elapsed_secs: f32) -> f32 {
    (elapsed_secs * AUTO_ROTATE_SPEED).rem_euclid(TAU)
}

pub fn zoom_target(current: f32, lines: f32) -> f32 {
    let scaled = current * ZOOM_SPEED.powf(lines * 0.1);
    if scaled.is_finite() {
        scaled.clamp(MIN_DISTANCE, MAX_DISTANCE)
    } else {
        current.clamp(MIN_DISTANCE, MAX_DISTANCE)
    }
}

pub fn damp_toward(current: f32, target: f32, damping: f32) -> f32 {
    current + (target - current) * damping
}

pub fn orbit_eye(angle: f32, distance: f32) -> Vec3 {
    Vec3::new(angle.sin() * distance, 0.0, angle.cos() * distance)
}

fn setup_camera(mut commands: Commands, rig: Res<OrbitRig>) {
    let projection = Projection::Perspective(PerspectiveProjection {
        fov: FOV_DEGREES.to_radians(),
        near: 0.1,
        far: 1000.0,
        ..default()
    });

    commands.spawn((
        Camera3d::default(),
        projection,
        rig.transform(),
        DistanceFog {
            color: Color::BLACK,
            falloff: FogFalloff::Linear {
                start: FOG_START,
                end: FOG_END,
            },
            ..default()
        },
        MainCamera,
    ));
}

fn track_viewport_size(
    mut resized: MessageReader<WindowResized>,
    mut viewport: ResMut<ViewportSize>,
    windows: Query<&Window>,
) {
    // Seed from the window on the first frame, then follow resize messages
    if viewport.is_added() {
        if let Ok(window) = windows.single() {
            viewport.0 = Vec2::new(window.width(), window.height());
        }
    }

    for event in resized.read() {
        let size = Vec2::new(event.width, event.height);
        if size != viewport.0 {
            viewport.0 = size;
            debug!("Viewport resized to {}x{}", size.x, size.y);
        }
    }
}

fn zoom_from_scroll(scroll: Res<AccumulatedMouseScroll>, mut rig: ResMut<OrbitRig>) {
    if scroll.delta.y == 0.0 {
        return;
    }

    let lines = match scroll.unit {
        MouseScrollUnit::Line => scroll.delta.y,
        MouseScrollUnit::Pixel => scroll.delta.y / PIXELS_PER_LINE,
    };
    rig.scroll(lines);
}

fn orbit_camera(
    time: Res<Time>,
    mut rig: ResMut<OrbitRig>,
    mut cameras: Query<&mut Transform, With<MainCamera>>,
) {
    rig.advance(time.elapsed_secs());

    for mut transform in &mut cameras {
        *transform = rig.transform();
    }
}
