pub mod detection;
pub mod history;
pub mod phrases;
pub mod translator;
