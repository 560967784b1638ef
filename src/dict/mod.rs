pub mod cache;
pub mod manager;
pub mod personal;
pub mod wordlist;
