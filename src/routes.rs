use crate::{
    api::{vacation_plan, vacation_type},
    auth::middleware::auth_middleware,
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let submit_limiter = build_limiter(config.rate_submit_per_min);
    let protected_limiter = build_limiter(config.rate_protected_per_min);

    // Protected routes; tokens are minted by the external identity service.
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
             // authentication
            .wrap(protected_limiter) // rate limiting
            .service(
                web::scope("/vacation")
                    // /vacation
                    .service(
                        web::resource("")
                            .route(web::get().to(vacation_plan::plan_list))
                            .route(
                                web::post()
                                    .wrap(submit_limiter)
                                    .to(vacation_plan::submit_plan),
                            ),
                    )
                    // /vacation/conflicts
                    .service(
                        web::resource("/conflicts")
                            .route(web::post().to(vacation_plan::query_conflicts)),
                    )
                    // /vacation/{id}
                    .service(
                        web::resource("/{id}").route(web::get().to(vacation_plan::get_plan)),
                    )
                    // /vacation/{id}/decide
                    .service(
                        web::resource("/{id}/decide")
                            .route(web::put().to(vacation_plan::decide_plan)),
                    )
                    // /vacation/{id}/withdraw
                    .service(
                        web::resource("/{id}/withdraw")
                            .route(web::put().to(vacation_plan::withdraw_plan)),
                    ),
            )
            .service(
                web::scope("/vacation-type")
                    // /vacation-type
                    .service(
                        web::resource("")
                            .route(web::post().to(vacation_type::create_vacation_type))
                            .route(web::get().to(vacation_type::list_vacation_types)),
                    ),
            ),
    );
}

// SUBMIT
//  └─ plan inserted at department_pending + level-1 approval request
//
// DECIDE (per level)
//  ├─ approve → next pending level, or approved at level 3
//  └─ reject  → rejected (terminal)
//
// Status writes are conditional on the expected current status; a racing
// second decision gets 409.
