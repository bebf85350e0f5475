//! Administrative command-line tooling.

pub mod seeder;
