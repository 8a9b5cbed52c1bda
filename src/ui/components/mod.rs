pub mod menu;
pub mod progress_bar;
pub mod report;
pub mod training_card;
pub mod word_list;
