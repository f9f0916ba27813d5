use actix_cors::Cors;
use actix_web::{get, middleware::Logger, web, App, HttpResponse, HttpServer, Responder};
use anyhow::Result;

use careops_be::database::{
    init_database,
    repositories::{ActivityRepository, SalaryRepository, SalarySettingRepository, UserRepository},
};
use careops_be::handlers::{salaries, salary_settings};
use careops_be::{Config, SalaryService};

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("CareOps API v1.0")
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init();

    log::info!("Starting CareOps API server...");

    // Load configuration
    let config = Config::from_env()?;
    log::info!("Configuration loaded (environment: {})", config.environment);

    // Initialize database
    let pool = init_database(&config.database_url).await?;
    log::info!("Database initialized");

    // Initialize repositories and services
    let user_repository = UserRepository::new(pool.clone());
    let setting_repository = SalarySettingRepository::new(pool.clone());
    let activity_repository = ActivityRepository::new(pool.clone());
    let salary_repository = SalaryRepository::new(pool.clone());
    let salary_service = SalaryService::new(
        user_repository.clone(),
        setting_repository.clone(),
        activity_repository.clone(),
        salary_repository.clone(),
    );

    let setting_repo_data = web::Data::new(setting_repository);
    let salary_repo_data = web::Data::new(salary_repository);
    let salary_service_data = web::Data::new(salary_service);

    let client_base_url = config.client_base_url.clone();
    let server_address = config.server_address();
    log::info!("Server starting on http://{}", server_address);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(setting_repo_data.clone())
            .app_data(salary_repo_data.clone())
            .app_data(salary_service_data.clone())
            .wrap(
                Cors::default()
                    .allowed_origin(&client_base_url)
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                    .allowed_headers(vec![
                        "Authorization",
                        "Content-Type",
                        "Accept",
                        "X-Requested-With",
                    ])
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(hello)
            .service(health)
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/salary-calculation")
                            .route(
                                "/calculate/{nurse_id}/{year_month}",
                                web::get().to(salaries::calculate_preview),
                            )
                            .route("/calculate", web::post().to(salaries::calculate_and_save)),
                    )
                    .service(
                        web::scope("/salaries")
                            .route("", web::get().to(salaries::list_salaries))
                            .route("", web::post().to(salaries::create_salary))
                            .route(
                                "/nurse/{nurse_id}/{year_month}",
                                web::get().to(salaries::get_salary_by_nurse_month),
                            )
                            .route("/{id}", web::get().to(salaries::get_salary))
                            .route("/{id}", web::put().to(salaries::update_salary))
                            .route("/{id}", web::delete().to(salaries::delete_salary)),
                    )
                    .service(
                        web::scope("/salary-settings")
                            .route("", web::get().to(salary_settings::list_settings))
                            .route("", web::post().to(salary_settings::create_setting))
                            .route("/{key}", web::get().to(salary_settings::get_setting))
                            .route("/{key}", web::put().to(salary_settings::update_setting))
                            .route("/{key}", web::delete().to(salary_settings::delete_setting)),
                    ),
            )
    })
    .bind(&server_address)?
    .run()
    .await?;

    Ok(())
}
