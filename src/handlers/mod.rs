pub mod assets;
pub mod export;
pub mod games;
pub mod highscores;
pub mod runs;
