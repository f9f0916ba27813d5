use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::SalarySettingInput;
use crate::database::repositories::SalarySettingRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSalarySettingRequest {
    pub value: BigDecimal,
    pub description: Option<String>,
    pub updated_by: Option<Uuid>,
}

pub async fn list_settings(
    repository: web::Data<SalarySettingRepository>,
) -> Result<HttpResponse, AppError> {
    let settings = repository.get_all().await.map_err(|e| {
        log::error!("Failed to list salary settings: {}", e);
        AppError::from(e)
    })?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(settings)))
}

pub async fn get_setting(
    path: web::Path<String>,
    repository: web::Data<SalarySettingRepository>,
) -> Result<HttpResponse, AppError> {
    let key = path.into_inner();

    let setting = repository
        .get(&key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Salary setting not found: {}", key)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(setting)))
}

pub async fn create_setting(
    input: web::Json<SalarySettingInput>,
    repository: web::Data<SalarySettingRepository>,
) -> Result<HttpResponse, AppError> {
    let setting = repository.set(input.into_inner()).await.map_err(|e| {
        log::error!("Failed to save salary setting: {}", e);
        AppError::from(e)
    })?;

    Ok(HttpResponse::Created().json(ApiResponse::success(setting)))
}

pub async fn update_setting(
    path: web::Path<String>,
    input: web::Json<UpdateSalarySettingRequest>,
    repository: web::Data<SalarySettingRepository>,
) -> Result<HttpResponse, AppError> {
    let key = path.into_inner();
    let request = input.into_inner();

    let setting = repository
        .set(SalarySettingInput {
            key,
            value: request.value,
            description: request.description,
            updated_by: request.updated_by,
        })
        .await
        .map_err(|e| {
            log::error!("Failed to update salary setting: {}", e);
            AppError::from(e)
        })?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(setting)))
}

pub async fn delete_setting(
    path: web::Path<String>,
    repository: web::Data<SalarySettingRepository>,
) -> Result<HttpResponse, AppError> {
    let key = path.into_inner();

    let deleted = repository.delete(&key).await?;
    if !deleted {
        return Err(AppError::NotFound(format!(
            "Salary setting not found: {}",
            key
        )));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Salary setting deleted",
    )))
}
