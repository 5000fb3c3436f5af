use super::validation::validate;
use super::{ApiContext, ApiError};
use crate::schema::{npl, sflp, Entity, Record};
use crate::store::{self, Store};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, MethodRouter};
use axum::{Json, Router};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Builds the `/api` routes for every collection of both templates.
pub fn router(ctx: ApiContext) -> Router {
    Routes::new(&ctx.root_view)
        .deletable::<npl::Portfolio>()
        .resource::<npl::PortfolioSnapshot>()
        .resource::<npl::CounterpartyGroup>()
        .resource::<npl::Counterparty>()
        .resource::<npl::Loan>()
        .resource::<npl::PropertyCollateral>()
        .resource::<npl::NonPropertyCollateral>()
        .resource::<npl::Enforcement>()
        .resource::<npl::Forbearance>()
        .resource::<npl::ExternalCollection>()
        .deletable::<sflp::Portfolio>()
        .resource::<sflp::PortfolioSnapshot>()
        .resource::<sflp::Loan>()
        .resource::<sflp::LoanState>()
        .resource::<sflp::Counterparty>()
        .resource::<sflp::CounterpartyState>()
        .resource::<sflp::PropertyCollateral>()
        .resource::<sflp::PropertyCollateralState>()
        .resource::<sflp::Enforcement>()
        .resource::<sflp::Forbearance>()
        .resource::<sflp::RepaymentSchedule>()
        .finish()
        .with_state(ctx)
}

struct Routes {
    root_view: String,
    router: Router<ApiContext>,
    /// Collection links per template segment, served by the index endpoints.
    index: BTreeMap<&'static str, Map<String, JsonValue>>,
}

impl Routes {
    fn new(root_view: &str) -> Self {
        Self {
            root_view: root_view.to_string(),
            router: Router::new(),
            index: BTreeMap::new(),
        }
    }

    fn resource<E: Entity>(self) -> Self {
        self.register::<E>(get(detail::<E>))
    }

    /// Like [`Routes::resource`], with `DELETE` on the detail route.
    fn deletable<E: Entity>(self) -> Self {
        self.register::<E>(get(detail::<E>).delete(remove::<E>))
    }

    fn register<E: Entity>(mut self, item: MethodRouter<ApiContext>) -> Self {
        let collection = collection_path::<E>();
        let link = format!("{}{collection}", self.root_view);
        self.index
            .entry(E::TEMPLATE.api_segment())
            .or_default()
            .insert(E::COLLECTION.to_string(), JsonValue::String(link));

        let items = get(list::<E>).post(create::<E>);
        self.router = self
            .router
            .route(&collection, items.clone())
            .route(&format!("{collection}/"), items)
            .route(&format!("{collection}/:id"), item.clone())
            .route(&format!("{collection}/:id/"), item);
        self
    }

    fn finish(self) -> Router<ApiContext> {
        let mut root = Map::new();
        let mut router = self.router;
        for (segment, collections) in self.index {
            let path = format!("/api/{segment}");
            root.insert(
                segment.to_string(),
                JsonValue::String(format!("{}{path}", self.root_view)),
            );
            let body = JsonValue::Object(collections);
            router = router.route(&path, get(move || async move { Json(body) }));
        }
        let root = JsonValue::Object(root);
        router.route("/api", get(move || async move { Json(root) }))
    }
}

fn collection_path<E: Entity>() -> String {
    format!("/api/{}/{}", E::TEMPLATE.api_segment(), E::COLLECTION)
}

fn link<E: Entity>(root_view: &str, id: i64) -> String {
    format!("{root_view}{}/{id}", collection_path::<E>())
}

/// Ids that do not parse are reported as missing records.
fn record_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim().parse::<i64>().map_err(|_| ApiError::NotFound)
}

/// Runs store work on the blocking pool so SQLite calls never stall the executor.
async fn blocking<T, F>(ctx: &ApiContext, work: F) -> Result<T, ApiError>
where
    F: FnOnce(&Store) -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    let store = ctx.store.clone();
    tokio::task::spawn_blocking(move || work(&store)).await?
}

async fn list<E: Entity>(State(ctx): State<ApiContext>) -> Result<Json<Vec<JsonValue>>, ApiError> {
    let records = blocking(&ctx, |store| Ok(store.list::<E>()?)).await?;
    debug!(table = E::TABLE, count = records.len(), "listing records");
    let summaries = records
        .iter()
        .map(|record| summary(record, &ctx.root_view))
        .collect();
    Ok(Json(summaries))
}

fn summary<E: Entity>(record: &Record<E>, root_view: &str) -> JsonValue {
    let mut item = Map::new();
    item.insert("id".to_string(), JsonValue::from(record.id));
    if let Some(key) = E::NATURAL_KEY {
        let value = record
            .fields
            .natural_key()
            .map_or(JsonValue::Null, JsonValue::from);
        item.insert(key.to_string(), value);
    }
    item.insert(
        "link".to_string(),
        JsonValue::String(link::<E>(root_view, record.id)),
    );
    JsonValue::Object(item)
}

async fn detail<E: Entity>(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Record<E>>, ApiError> {
    let id = record_id(&id)?;
    let record = blocking(&ctx, move |store| Ok(store.get::<E>(id)?)).await?;
    record.map(Json).ok_or(ApiError::NotFound)
}

async fn create<E: Entity>(
    State(ctx): State<ApiContext>,
    payload: Result<Json<JsonValue>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload.map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;
    let record = blocking(&ctx, move |store| {
        store.transaction(|tx| {
            let fields = validate::<E>(tx, body)?;
            Ok::<_, ApiError>(store::insert(tx, &fields)?)
        })
    })
    .await?;
    info!(table = E::TABLE, id = record.id, "record created");
    Ok((StatusCode::CREATED, Json(record)).into_response())
}

async fn remove<E: Entity>(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = record_id(&id)?;
    if blocking(&ctx, move |store| Ok(store.delete::<E>(id)?)).await? {
        info!(table = E::TABLE, id, "record deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    const ROOT: &str = "http://testserver";

    fn app() -> (Router, Arc<Store>) {
        let store = Arc::new(Store::in_memory().expect("store"));
        (router(ApiContext::new(store.clone(), ROOT)), store)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, JsonValue) {
        let response = app.clone().oneshot(request).await.expect("route executes");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = if bytes.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&bytes).expect("json payload")
        };
        (status, body)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).expect("request")
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn portfolio(store: &Store, name: &str) -> i64 {
        store
            .insert(&sflp::Portfolio {
                name: Some(name.to_string()),
                ..sflp::Portfolio::default()
            })
            .expect("insert")
            .id
    }

    #[tokio::test]
    async fn list_returns_identifier_and_link() {
        let (app, store) = app();
        let id = portfolio(&store, "Agency 2020");

        let (status, body) = send(&app, get_request("/api/sflp_data/portfolios")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{
                "id": id,
                "name": "Agency 2020",
                "link": format!("{ROOT}/api/sflp_data/portfolios/{id}")
            }])
        );

        let (status, body) = send(&app, get_request("/api/npl_data/loans/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn detail_returns_fields_and_timestamps() {
        let (app, store) = app();
        let id = portfolio(&store, "Agency 2020");

        let uri = format!("/api/sflp_data/portfolios/{id}/");
        let (status, body) = send(&app, get_request(&uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], json!(id));
        assert_eq!(body["name"], json!("Agency 2020"));
        assert_eq!(body["description"], JsonValue::Null);
        assert!(body["creation_date"].is_string());
        assert!(body["last_change_date"].is_string());
    }

    #[tokio::test]
    async fn missing_records_are_not_found() {
        let (app, _) = app();
        for uri in [
            "/api/npl_data/counterparties/1",
            "/api/sflp_data/loan_states/7",
            "/api/sflp_data/loans/abc",
        ] {
            let (status, body) = send(&app, get_request(uri)).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body, json!({ "detail": "Not found." }));
        }
    }

    #[tokio::test]
    async fn create_validates_and_persists() {
        let (app, store) = app();
        let portfolio_id = portfolio(&store, "Agency 2020");

        let (status, body) = send(
            &app,
            post_json(
                "/api/sflp_data/loans",
                &json!({
                    "loan_identifier": "100001",
                    "portfolio_id": portfolio_id,
                    "channel": 0,
                    "first_payment_date": "2019-05-01"
                })
                .to_string(),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["loan_identifier"], json!("100001"));
        assert_eq!(body["first_payment_date"], json!("2019-05-01"));

        let id = body["id"].as_i64().expect("id");
        let uri = format!("/api/sflp_data/loans/{id}");
        let (status, detail) = send(&app, get_request(&uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["portfolio_id"], json!(portfolio_id));
    }

    #[tokio::test]
    async fn invalid_bodies_persist_nothing() {
        let (app, store) = app();

        let (status, body) = send(
            &app,
            post_json("/api/sflp_data/loans", r#"{"channel": 9, "portfolio_id": 5}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["loan_identifier"], json!(["This field is required."]));
        assert_eq!(body["channel"], json!(["\"9\" is not a valid choice."]));
        assert_eq!(
            body["portfolio_id"],
            json!(["Invalid pk \"5\" - object does not exist."])
        );
        assert_eq!(store.count::<sflp::Loan>().expect("count"), 0);

        let (status, body) = send(&app, post_json("/api/npl_data/loans", "{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn deleting_a_portfolio_cascades() {
        let (app, store) = app();
        let portfolio_id = portfolio(&store, "Agency 2020");
        store
            .insert(&sflp::Loan {
                loan_identifier: Some("100001".to_string()),
                portfolio_id: Some(portfolio_id),
                ..sflp::Loan::default()
            })
            .expect("insert loan");

        let uri = format!("/api/sflp_data/portfolios/{portfolio_id}");
        let delete = || Request::delete(uri.as_str()).body(Body::empty()).expect("request");

        let (status, _) = send(&app, delete()).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(store.count::<sflp::Loan>().expect("count"), 0);

        let (status, _) = send(&app, delete()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn only_portfolios_can_be_deleted() {
        let (app, _) = app();
        let response = app
            .oneshot(
                Request::delete("/api/npl_data/loans/1")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn index_lists_templates_and_collections() {
        let (app, _) = app();

        let (status, body) = send(&app, get_request("/api")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "npl_data": format!("{ROOT}/api/npl_data"),
                "sflp_data": format!("{ROOT}/api/sflp_data")
            })
        );

        let (_, npl) = send(&app, get_request("/api/npl_data")).await;
        assert_eq!(npl.as_object().expect("object").len(), 10);
        assert_eq!(
            npl["nonproperty_collateral"],
            json!(format!("{ROOT}/api/npl_data/nonproperty_collateral"))
        );

        let (_, sflp) = send(&app, get_request("/api/sflp_data")).await;
        assert_eq!(sflp.as_object().expect("object").len(), 11);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_creates_all_persist() {
        let (app, store) = app();
        let mut tasks = tokio::task::JoinSet::new();
        for n in 0..8 {
            let app = app.clone();
            tasks.spawn(async move {
                let body = json!({ "name": format!("Portfolio {n}") }).to_string();
                send(&app, post_json("/api/npl_data/portfolios", &body)).await.0
            });
        }
        while let Some(status) = tasks.join_next().await {
            assert_eq!(status.expect("task joins"), StatusCode::CREATED);
        }
        assert_eq!(store.count::<npl::Portfolio>().expect("count"), 8);
    }

    #[tokio::test]
    async fn a_failed_store_task_is_a_server_error() {
        let (_, store) = app();
        let ctx = ApiContext::new(store, ROOT);

        let result = blocking(&ctx, |_: &Store| -> Result<(), ApiError> {
            panic!("store task aborted")
        })
        .await;
        let err = result.expect_err("task panicked");
        assert!(matches!(err, ApiError::Worker(_)));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
