#[macro_use]
extern crate rocket;

pub mod api;
pub mod common;
pub mod config;
pub mod models;
pub mod workflow;

use rocket::data::{Limits, ToByteUnit};

use crate::api::handlers::media::generate_media_routes;
use crate::api::handlers::page::generate_page_routes;
use crate::config::AppConfig;

pub fn build_rocket(config: AppConfig) -> rocket::Rocket<rocket::Build> {
    // Uploads are whole videos; the default form limits are far too small.
    let limits = Limits::default()
        .limit("file", 512.mebibytes())
        .limit("data-form", 2.gibibytes());
    let figment = rocket::Config::figment().merge(("limits", limits));

    rocket::custom(figment)
        .manage(config)
        .mount("/", generate_page_routes())
        .mount("/", generate_media_routes())
}
