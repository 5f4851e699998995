//! Date-ranged reports and their CSV export

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Json, Response},
};
use shared::{Order, ProcessId, process_info};

use crate::core::export::CSV_CONTENT_TYPE;
use crate::core::{ReportQuery, report_filename, select_for_export, write_csv};
use crate::error::WebServerResult;
use crate::traits::{OrderStore, UserStore};
use crate::types::{ExportRequest, ReportRequest};
use crate::web::extract::JsonBody;
use crate::webserver_impl::WebServer;

/// `POST /api/reports`: orders created in the range, in storage order
pub async fn run_report<O, U>(
    State(webserver): State<WebServer<O, U>>,
    JsonBody(request): JsonBody<ReportRequest>,
) -> WebServerResult<Json<Vec<Order>>>
where
    O: OrderStore + 'static,
    U: UserStore + 'static,
{
    let query = ReportQuery::from_request(&request, webserver.utc_offset())?;
    let orders = webserver.orders().list().await?;

    Ok(Json(query.apply(orders)))
}

/// `POST /api/reports/export`: CSV of the selected report rows
pub async fn export_report<O, U>(
    State(webserver): State<WebServer<O, U>>,
    JsonBody(request): JsonBody<ExportRequest>,
) -> WebServerResult<Response>
where
    O: OrderStore + 'static,
    U: UserStore + 'static,
{
    let offset = webserver.utc_offset();
    let query = ReportQuery::from_request(&request.report, offset)?;
    let orders = webserver.orders().list().await?;

    let rows = select_for_export(query.apply(orders), &request.selected)?;
    let csv = write_csv(&rows, offset)?;
    let filename = report_filename(query.start(), query.end(), offset);

    process_info!(ProcessId::current(), "📤 Exported {} orders to {}", rows.len(), filename);

    Ok((
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")),
        ],
        csv,
    )
        .into_response())
}
