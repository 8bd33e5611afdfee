use bevy::{
    prelude::*,
    sprite::Anchor,
    window::{PresentMode, WindowResized, WindowResolution},
};
use board_core::{
    draw::{Color as CoreColor, DrawContext},
    BoardSurface, Drawable, Glyph, GlyphStyle, Piece, Square,
};
use rand::seq::SliceRandom;

const WINDOW_SIZE: f32 = 800.0;
const PIECE_EDGE: f32 = 64.0;
const PIECE_FONT_SIZE: f32 = 56.0;
const PIECE_FONT_FAMILY: &str = "FreeSerif";

// z layers: background sprites first, piece glyphs on top.
const BACKGROUND_Z: f32 = 0.0;
const PIECE_Z: f32 = 10.0;

pub struct BoardUiPlugin;

impl Plugin for BoardUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Chess Board".into(),
                resolution: WindowResolution::new(WINDOW_SIZE, WINDOW_SIZE),
                present_mode: PresentMode::AutoVsync,
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .init_resource::<DragState>()
        .add_systems(Startup, setup)
        .add_systems(Update, (handle_resize, handle_drag, sync_pieces).chain());
    }
}

#[derive(Resource)]
struct BoardRes(BoardSurface);

/// The drag in progress, if any: a piece index and the cursor's offset from
/// the piece origin at grab time.
#[derive(Resource, Default)]
struct DragState(Option<(usize, Vec2)>);

#[derive(Component, Clone, Copy)]
struct BackgroundLayer;

#[derive(Component, Clone, Copy)]
struct PieceSprite;

/// `DrawContext` on top of bevy: each primitive spawns a sprite or Text2d
/// entity tagged with the layer marker, so a layer can be despawned and
/// repainted wholesale.
///
/// Core coordinates are top-left origin, y down; bevy world coordinates are
/// centered, y up. `to_world` converts, and every entity uses a top-left
/// anchor so the two systems agree on what a position means.
struct ScenePainter<'a, 'w, 's, M: Component + Copy> {
    commands: &'a mut Commands<'w, 's>,
    assets: &'a AssetServer,
    width: f32,
    height: f32,
    z: f32,
    marker: M,
}

impl<'a, 'w, 's, M: Component + Copy> ScenePainter<'a, 'w, 's, M> {
    fn new(
        commands: &'a mut Commands<'w, 's>,
        assets: &'a AssetServer,
        surface: &BoardSurface,
        base_z: f32,
        marker: M,
    ) -> Self {
        Self {
            commands,
            assets,
            width: surface.width(),
            height: surface.height(),
            z: base_z,
            marker,
        }
    }

    fn to_world(&mut self, x: f32, y: f32) -> Vec3 {
        let z = self.z;
        self.z += 0.01; // later draws stack on top
        Vec3::new(x - self.width / 2.0, self.height / 2.0 - y, z)
    }

    fn font(&self, style: &GlyphStyle) -> Handle<Font> {
        self.assets.load(format!("fonts/{}.ttf", style.family))
    }
}

impl<M: Component + Copy> DrawContext for ScenePainter<'_, '_, '_, M> {
    fn clear(&mut self, color: CoreColor) {
        let size = Vec2::new(self.width, self.height);
        let translation = self.to_world(0.0, 0.0);
        self.commands.spawn((
            SpriteBundle {
                sprite: Sprite {
                    color: Color::rgb(color.r, color.g, color.b),
                    custom_size: Some(size),
                    anchor: Anchor::TopLeft,
                    ..default()
                },
                transform: Transform::from_translation(translation),
                ..default()
            },
            self.marker,
        ));
    }

    fn fill_rect(&mut self, rect: board_core::Rect, color: CoreColor) {
        let translation = self.to_world(rect.x, rect.y);
        self.commands.spawn((
            SpriteBundle {
                sprite: Sprite {
                    color: Color::rgb(color.r, color.g, color.b),
                    custom_size: Some(Vec2::new(rect.w, rect.h)),
                    anchor: Anchor::TopLeft,
                    ..default()
                },
                transform: Transform::from_translation(translation),
                ..default()
            },
            self.marker,
        ));
    }

    fn text_extent(&self, text: &str, style: &GlyphStyle) -> (f32, f32) {
        // Bevy lays text out asynchronously, so there is no synchronous
        // glyph metric to ask for; estimate from the font size instead.
        (style.size * 0.5 * text.chars().count() as f32, style.size)
    }

    fn draw_text(&mut self, text: &str, style: &GlyphStyle, x: f32, y: f32, color: CoreColor) {
        let font = self.font(style);
        let translation = self.to_world(x, y);
        self.commands.spawn((
            Text2dBundle {
                text: Text::from_section(
                    text,
                    TextStyle {
                        font,
                        font_size: style.size,
                        color: Color::rgb(color.r, color.g, color.b),
                    },
                ),
                text_anchor: Anchor::TopLeft,
                transform: Transform::from_translation(translation),
                ..default()
            },
            self.marker,
        ));
    }
}

fn setup(mut commands: Commands, asset_server: Res<AssetServer>) {
    // Camera
    commands.spawn(Camera2dBundle::default());

    // Board with one of each glyph scattered over distinct random squares
    let mut board = BoardSurface::new(WINDOW_SIZE, WINDOW_SIZE);
    spawn_demo_pieces(&mut board);

    // Initial background pass
    let mut painter = ScenePainter::new(
        &mut commands,
        &asset_server,
        &board,
        BACKGROUND_Z,
        BackgroundLayer,
    );
    board.render_background(&mut painter);

    commands.insert_resource(BoardRes(board));
}

fn spawn_demo_pieces(board: &mut BoardSurface) {
    let mut squares: Vec<Square> = (0..8)
        .flat_map(|rank| (0..8).map(move |file| Square { rank, file }))
        .collect();
    squares.shuffle(&mut rand::thread_rng());

    for (glyph, square) in Glyph::ALL.into_iter().zip(squares) {
        let style = GlyphStyle::new(PIECE_FONT_FAMILY, PIECE_FONT_SIZE);
        // The code is ours, so construction cannot fail
        if let Ok(piece) = Piece::at(glyph.code(), style, PIECE_EDGE, square) {
            board.insert(piece);
        }
    }
}

fn handle_resize(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut resize_events: EventReader<WindowResized>,
    mut board: ResMut<BoardRes>,
    background: Query<Entity, With<BackgroundLayer>>,
) {
    let Some(event) = resize_events.read().last() else {
        return;
    };

    // Restore the centering invariant before anything repaints
    board.0.resize(event.width, event.height);

    for entity in background.iter() {
        commands.entity(entity).despawn();
    }
    let mut painter = ScenePainter::new(
        &mut commands,
        &asset_server,
        &board.0,
        BACKGROUND_Z,
        BackgroundLayer,
    );
    board.0.render_background(&mut painter);
}

fn handle_drag(
    windows: Query<&Window>,
    mouse_button: Res<Input<MouseButton>>,
    mut board: ResMut<BoardRes>,
    mut drag: ResMut<DragState>,
) {
    let window = windows.single();

    // Window coordinates are top-left origin, matching the surface
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    if mouse_button.just_pressed(MouseButton::Left) {
        drag.0 = pick_piece(&board.0, cursor);
    } else if mouse_button.just_released(MouseButton::Left) {
        if let Some((index, grab)) = drag.0.take() {
            let origin = cursor - grab;
            let center_x = origin.x + PIECE_EDGE / 2.0;
            let center_y = origin.y + PIECE_EDGE / 2.0;
            let target =
                Square::from_pixel(center_x, center_y, board.0.width(), board.0.height());
            board.0.set_origin(index, (origin.x, origin.y));
            board.0.settle(index, target);
            match target {
                Some(square) => info!("piece {} settled on {}", index, square.to_algebraic()),
                None => info!("piece {} dropped off the board", index),
            }
        }
    } else if mouse_button.pressed(MouseButton::Left) {
        if let Some((index, grab)) = drag.0 {
            let origin = cursor - grab;
            board.0.set_origin(index, (origin.x, origin.y));
        }
    }
}

/// Topmost piece under the cursor, with the cursor's offset inside its box.
fn pick_piece(board: &BoardSurface, cursor: Vec2) -> Option<(usize, Vec2)> {
    for index in (0..board.len()).rev() {
        let piece = board.piece(index)?;
        let (x, y) = piece.origin();
        let (w, h) = piece.measure();
        if cursor.x >= x && cursor.x <= x + w && cursor.y >= y && cursor.y <= y + h {
            return Some((index, cursor - Vec2::new(x, y)));
        }
    }
    None
}

/// Foreground pass: whenever the board changed, repaint every piece glyph
/// in insertion order at the origin the surface maintains.
fn sync_pieces(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    board: Res<BoardRes>,
    sprites: Query<Entity, With<PieceSprite>>,
) {
    if !board.is_changed() {
        return;
    }

    for entity in sprites.iter() {
        commands.entity(entity).despawn();
    }

    let mut painter =
        ScenePainter::new(&mut commands, &asset_server, &board.0, PIECE_Z, PieceSprite);
    for piece in board.0.pieces() {
        let (x, y) = piece.origin();
        piece.paint(&mut painter, x, y);
    }
}
