use bevy::prelude::*;
use board_ui::BoardUiPlugin;

fn main() {
    App::new()
        .add_plugins(BoardUiPlugin)
        .run();
}
