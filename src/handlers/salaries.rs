use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::{NurseSalaryInput, NurseSalaryPatch, SalaryQuery, YearMonth};
use crate::database::repositories::SalaryRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::SalaryService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateSalaryRequest {
    pub nurse_id: String,
    pub year_month: YearMonth,
}

fn parse_year_month(raw: &str) -> Result<YearMonth, AppError> {
    raw.parse().map_err(AppError::BadRequest)
}

/// GET /salary-calculation/calculate/{nurse_id}/{year_month} returns a
/// transient breakdown for preview; nothing is persisted.
pub async fn calculate_preview(
    path: web::Path<(String, String)>,
    service: web::Data<SalaryService>,
) -> Result<HttpResponse, AppError> {
    let (nurse_id, raw_month) = path.into_inner();
    let year_month = parse_year_month(&raw_month)?;

    let breakdown = service.calculate(&nurse_id, year_month).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(breakdown)))
}

/// POST /salary-calculation/calculate calculates and upserts the salary
/// record for (nurse_id, year_month), returning the saved row.
pub async fn calculate_and_save(
    input: web::Json<CalculateSalaryRequest>,
    service: web::Data<SalaryService>,
) -> Result<HttpResponse, AppError> {
    let request = input.into_inner();

    let salary = service
        .calculate_and_save(&request.nurse_id, request.year_month)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(salary)))
}

pub async fn list_salaries(
    query: web::Query<SalaryQuery>,
    repository: web::Data<SalaryRepository>,
) -> Result<HttpResponse, AppError> {
    let salaries = repository.list(query.into_inner()).await.map_err(|e| {
        log::error!("Failed to list salary records: {}", e);
        AppError::from(e)
    })?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(salaries)))
}

/// GET /salaries/nurse/{nurse_id}/{year_month} looks up the single salary
/// record for one nurse and one period.
pub async fn get_salary_by_nurse_month(
    path: web::Path<(String, String)>,
    repository: web::Data<SalaryRepository>,
) -> Result<HttpResponse, AppError> {
    let (nurse_id, raw_month) = path.into_inner();
    let year_month = parse_year_month(&raw_month)?;

    let salary = repository
        .find_by_nurse_month(&nurse_id, year_month)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Salary record not found: {} {}",
                nurse_id, year_month
            ))
        })?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(salary)))
}

pub async fn get_salary(
    path: web::Path<Uuid>,
    repository: web::Data<SalaryRepository>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let salary = repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Salary record not found: {}", id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(salary)))
}

/// POST /salaries is the direct administrative insert. A duplicate
/// (nurse_id, year_month) pair is rejected with 409 rather than upserted.
pub async fn create_salary(
    input: web::Json<NurseSalaryInput>,
    repository: web::Data<SalaryRepository>,
) -> Result<HttpResponse, AppError> {
    let salary = repository.insert(input.into_inner()).await.map_err(|e| {
        log::error!("Failed to insert salary record: {}", e);
        AppError::from(e)
    })?;

    Ok(HttpResponse::Created().json(ApiResponse::success(salary)))
}

pub async fn update_salary(
    path: web::Path<Uuid>,
    input: web::Json<NurseSalaryPatch>,
    repository: web::Data<SalaryRepository>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let salary = repository
        .update(id, input.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Salary record not found: {}", id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(salary)))
}

pub async fn delete_salary(
    path: web::Path<Uuid>,
    repository: web::Data<SalaryRepository>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let deleted = repository.delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!(
            "Salary record not found: {}",
            id
        )));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Salary record deleted",
    )))
}
