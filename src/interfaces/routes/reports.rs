use actix_web::web;

use crate::handlers::reports;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .service(web::resource("/full").route(web::get().to(reports::full_report))),
    );
}
