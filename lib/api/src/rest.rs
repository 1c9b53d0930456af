use crate::config::ApiConfig;
use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use chrono::NaiveDate;
use orgpulse_core::{
    find_by_id, ingest, MemberRecord, PartnershipRecord, ProgramRecord, ScoringContext,
};
use orgpulse_scoring::{score_members, score_partnerships, score_programs, InsightsReport};
use orgpulse_similarity::{FeatureSchema, SimilarResponse, SimilarityRanker};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Deserialize)]
struct MembersRequest {
    today: Option<NaiveDate>,
    members: Vec<MemberRecord>,
}

#[derive(Deserialize)]
struct SimilarMembersRequest {
    today: Option<NaiveDate>,
    members: Vec<MemberRecord>,
    member_id: String,
    limit: Option<usize>,
    schema: Option<FeatureSchema>,
}

#[derive(Deserialize)]
struct PartnershipsRequest {
    today: Option<NaiveDate>,
    partnerships: Vec<PartnershipRecord>,
}

#[derive(Deserialize)]
struct ProgramsRequest {
    today: Option<NaiveDate>,
    programs: Vec<ProgramRecord>,
}

#[derive(Deserialize)]
struct InsightsRequest {
    today: Option<NaiveDate>,
    members: Option<Vec<MemberRecord>>,
    partnerships: Option<Vec<PartnershipRecord>>,
    programs: Option<Vec<ProgramRecord>>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(config: ApiConfig) -> std::io::Result<()> {
        let bind = (config.host.clone(), config.port);
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(config.clone()))
                .configure(routes)
        })
        .bind(bind)?
        .run()
        .await
    }
}

/// Register every endpoint. Handlers expect `web::Data<ApiConfig>` in app data.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/members/engagement", web::post().to(members_engagement))
        .route("/members/similar", web::post().to(similar_members))
        .route("/partnerships/effectiveness", web::post().to(partnerships_effectiveness))
        .route("/programs/performance", web::post().to(programs_performance))
        .route("/insights", web::post().to(insights));
}

fn context(today: Option<NaiveDate>) -> ScoringContext {
    today.map(ScoringContext::new).unwrap_or_else(ScoringContext::now)
}

fn bad_request(error: impl std::fmt::Display) -> HttpResponse {
    warn!(%error, "rejected request");
    HttpResponse::BadRequest().json(serde_json::json!({
        "error": error.to_string()
    }))
}

async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

async fn members_engagement(req: web::Json<MembersRequest>) -> ActixResult<HttpResponse> {
    let ctx = context(req.today);
    let members = match ingest::ingest_members(&req.members) {
        Ok(rows) => rows,
        Err(e) => return Ok(bad_request(e)),
    };

    info!(rows = members.len(), today = %ctx.today, "scoring member engagement");
    let scored = score_members(&members, &ctx);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": scored
    })))
}

async fn similar_members(
    config: web::Data<ApiConfig>,
    req: web::Json<SimilarMembersRequest>,
) -> ActixResult<HttpResponse> {
    let ctx = context(req.today);
    let members = match ingest::ingest_members(&req.members) {
        Ok(rows) => rows,
        Err(e) => return Ok(bad_request(e)),
    };

    let ranker = match req.schema.clone() {
        Some(schema) => match SimilarityRanker::try_new(schema) {
            Ok(ranker) => ranker,
            Err(e) => return Ok(bad_request(e)),
        },
        None => SimilarityRanker::members(),
    };

    if let Err(e) = find_by_id(&members, &req.member_id) {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": e.to_string()
        })));
    }

    let limit = req.limit.unwrap_or(config.default_similar_limit);
    info!(rows = members.len(), member_id = %req.member_id, limit, "ranking similar members");

    let scored = score_members(&members, &ctx);
    let ranked = ranker.find_similar(&scored, &req.member_id, limit);
    let candidates = members.len().saturating_sub(1);
    Ok(HttpResponse::Ok().json(SimilarResponse::from_ranked(ranked, candidates)))
}

async fn partnerships_effectiveness(
    req: web::Json<PartnershipsRequest>,
) -> ActixResult<HttpResponse> {
    let ctx = context(req.today);
    let partnerships = match ingest::ingest_partnerships(&req.partnerships, &ctx) {
        Ok(rows) => rows,
        Err(e) => return Ok(bad_request(e)),
    };

    info!(rows = partnerships.len(), today = %ctx.today, "scoring partnership effectiveness");
    let scored = score_partnerships(&partnerships, &ctx);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": scored
    })))
}

async fn programs_performance(req: web::Json<ProgramsRequest>) -> ActixResult<HttpResponse> {
    let ctx = context(req.today);
    let programs = match ingest::ingest_programs(&req.programs, &ctx) {
        Ok(rows) => rows,
        Err(e) => return Ok(bad_request(e)),
    };

    info!(rows = programs.len(), today = %ctx.today, "scoring program performance");
    let scored = score_programs(&programs, &ctx);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": scored
    })))
}

async fn insights(req: web::Json<InsightsRequest>) -> ActixResult<HttpResponse> {
    let ctx = context(req.today);

    let members = match req.members.as_deref().map(ingest::ingest_members).transpose() {
        Ok(rows) => rows.map(|rows| score_members(&rows, &ctx)),
        Err(e) => return Ok(bad_request(e)),
    };
    let partnerships = match req
        .partnerships
        .as_deref()
        .map(|rows| ingest::ingest_partnerships(rows, &ctx))
        .transpose()
    {
        Ok(rows) => rows.map(|rows| score_partnerships(&rows, &ctx)),
        Err(e) => return Ok(bad_request(e)),
    };
    let programs = match req
        .programs
        .as_deref()
        .map(|rows| ingest::ingest_programs(rows, &ctx))
        .transpose()
    {
        Ok(rows) => rows.map(|rows| score_programs(&rows, &ctx)),
        Err(e) => return Ok(bad_request(e)),
    };

    info!(today = %ctx.today, "building insights report");
    let report = InsightsReport::build(
        members.as_deref(),
        partnerships.as_deref(),
        programs.as_deref(),
        &ctx,
    );
    Ok(HttpResponse::Ok().json(report))
}
