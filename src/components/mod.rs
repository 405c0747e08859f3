pub mod game_card;
pub mod score_header;
