pub mod health;
pub mod history;
pub mod languages;
pub mod phrases;
pub mod translate;
