pub mod card;
pub mod create_form;
pub mod fatal_screen;
pub mod game_screen;
pub mod landing;
pub mod login_form;
pub mod poker_table;
pub mod seat;
