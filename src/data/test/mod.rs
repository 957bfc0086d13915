mod game_category;
mod habitue;
mod party;
mod user;
