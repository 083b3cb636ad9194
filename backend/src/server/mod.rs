//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod state_builders;

pub use config::ServerConfig;

#[cfg(feature = "metrics")]
pub(crate) use metrics::prometheus_metrics;
#[cfg(feature = "metrics")]
use metrics::MetricsLayer;
use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::routes::{api_services, not_found};
use backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn session_middleware(
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build()
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let api = web::scope("/api")
        .wrap(session_middleware(key, cookie_secure, same_site))
        .configure(api_services);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(not_found))
}

/// Bind the HTTP server and mark it ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool: _,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::http::header::{LOCATION, SET_COOKIE};
    use actix_web::test;
    use backend::outbound::memory::MemoryStore;
    use backend::domain::ports::FixturePasswordHasher;
    use backend::test_support::{FIXTURE_PASSWORD, MutableClock, fixture_timestamp};
    use serde_json::{Value, json};

    fn deps() -> AppDependencies {
        let clock = Arc::new(MutableClock::new(fixture_timestamp()));
        let state = HttpState::from_store(
            Arc::new(MemoryStore::default()),
            Arc::new(FixturePasswordHasher),
            clock,
        );
        let health = web::Data::new(HealthState::new());
        health.mark_ready();
        AppDependencies {
            health_state: health,
            http_state: web::Data::new(state),
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        }
    }

    #[actix_web::test]
    async fn serves_api_probes_and_fallback() {
        let app = test::init_service(build_app(deps())).await;

        let courses =
            test::call_service(&app, test::TestRequest::get().uri("/api/courses").to_request())
                .await;
        assert_eq!(courses.status(), StatusCode::OK);

        let probe =
            test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request())
                .await;
        assert_eq!(probe.status(), StatusCode::OK);

        let missing =
            test::call_service(&app, test::TestRequest::get().uri("/nowhere").to_request()).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(missing).await;
        assert_eq!(body["error"]["message"], "Not Found");
    }

    #[actix_web::test]
    async fn login_issues_a_session_cookie() {
        let app = test::init_service(build_app(deps())).await;

        let registered = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/users")
                .set_json(json!({
                    "fullName": "Joe Smith",
                    "emailAddress": "joe@smith.com",
                    "password": FIXTURE_PASSWORD,
                    "confirmPassword": FIXTURE_PASSWORD
                }))
                .to_request(),
        )
        .await;
        assert_eq!(registered.status(), StatusCode::CREATED);
        assert_eq!(
            registered.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
            Some("/")
        );

        let login = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/login")
                .set_json(json!({"emailAddress": "joe@smith.com", "password": FIXTURE_PASSWORD}))
                .to_request(),
        )
        .await;
        assert_eq!(login.status(), StatusCode::OK);
        let cookie = login
            .headers()
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .expect("session cookie");
        assert!(cookie.starts_with("session="));
        assert!(cookie.contains("HttpOnly"));
    }
}
