pub mod output;
pub mod run;
