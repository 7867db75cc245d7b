use actix_session::{config::PersistentSession, storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use actix_web::http::header;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{App, HttpServer};
use env_logger::Env;
use gameabyss::db::init_db;
use gameabyss::middleware::ClientCtx;
use rand::{distributions::Alphanumeric, Rng};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_lib_mods();
    init_our_mods();
    init_db(std::env::var("DATABASE_URL").expect("DATABASE_URL must be set.")).await;

    let secret_key = match std::env::var("SECRET_KEY") {
        Ok(key) => Key::from(key.as_bytes()),
        Err(err) => {
            let random_string: String = rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(128)
                .map(char::from)
                .collect();
            log::warn!("SECRET_KEY was invalid. Reason: {:?}\r\nThis means the key used for signing session cookies will invalidate every time the application is restarted. A secret key must be at least 64 bytes to be accepted.\r\n\r\nNeed a key? How about:\r\n{}", err, random_string);
            Key::from(random_string.as_bytes())
        }
    };

    HttpServer::new(move || {
        // Order of middleware IS IMPORTANT and is in REVERSE EXECUTION ORDER.
        App::new()
            // Security headers - applied to all responses
            .wrap(
                DefaultHeaders::new()
                    .add((header::X_FRAME_OPTIONS, "DENY"))
                    .add((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
                    .add(("Referrer-Policy", "strict-origin-when-cross-origin")),
            )
            .wrap(ClientCtx::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_same_site(SameSite::Lax)
                    .cookie_secure(false) // Allow HTTP for development
                    .session_lifecycle(PersistentSession::default())
                    .build(),
            )
            .wrap(Logger::new("%a %{User-Agent}i"))
            .configure(gameabyss::web::configure)
    })
    .bind("0.0.0.0:8080")?
    .run()
    .await
}

/// Initialize third party crates we rely on but don't have control over.
pub fn init_lib_mods() {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}

/// Initialize all local mods.
pub fn init_our_mods() {
    gameabyss::app_config::init();
}
