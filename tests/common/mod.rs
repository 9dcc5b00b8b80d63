pub mod assertions;
pub mod scripted_runner;
