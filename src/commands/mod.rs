mod utils;

pub mod draft;
pub mod help;
pub mod info;
pub mod owner;

use crate::discord::{Data, Error};

/// Every command the framework registers.
pub fn list() -> Vec<poise::Command<Data, Error>> {
    vec![
        draft::draft(),
        draft::pick(),
        draft::getrec(),
        draft::players(),
        draft::myteam(),
        info::compare(),
        info::news(),
        help::help(),
        owner::quit(),
    ]
}
