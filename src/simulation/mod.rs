pub mod random_game;
