use actix_web::web;

use crate::handlers::{export, project};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/project")
            .route(web::get().to(project::get_project))
            .route(web::put().to(project::update_project)),
    );

    cfg.service(web::resource("/stats").route(web::get().to(project::get_stats)));

    cfg.service(web::resource("/export").route(web::get().to(export::export_data)));
}
