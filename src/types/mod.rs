pub mod answer;
pub mod question;
pub mod response;
pub mod search;
pub mod vote;
