pub mod answer;
pub mod question;
pub mod search;
pub mod vote;
