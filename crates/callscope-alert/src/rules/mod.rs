pub mod long_duration;
pub mod low_score;
pub mod no_next_step;
pub mod risk_words;
