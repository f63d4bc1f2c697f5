use actix_web::web;

use crate::handlers::{entries, reports};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/entries")
            .service(
                web::resource("")
                    .route(web::get().to(entries::list_entries))
                    .route(web::post().to(entries::create_entry)),
            )
            .service(
                web::resource("/{entry_id}")
                    .route(web::get().to(entries::get_entry))
                    .route(web::delete().to(entries::delete_entry)),
            )
            .service(
                web::resource("/{entry_id}/report").route(web::get().to(reports::entry_report)),
            ),
    );
}
