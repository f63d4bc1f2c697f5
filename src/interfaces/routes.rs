use actix_web::web;

use crate::handlers::home::home;

mod entries;
mod json_error;
mod photos;
mod project;
mod reports;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api/v1")
            .configure(project::config_routes)
            .configure(entries::config_routes)
            .configure(photos::config_routes)
            .configure(reports::config_routes),
    );

    cfg.configure(json_error::config_routes);
}
