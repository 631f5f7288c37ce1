use std::convert::Infallible;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};
use warp::http::StatusCode;
use warp::reply::{Html, Json, WithStatus};
use warp::{Filter, Rejection, Reply};

use crate::core::error::{NetworkResult, ScanError};
use crate::core::types::{PortTarget, ScanResult};
use crate::core::Scanner;
use crate::modules::connect::PortProbe;
use crate::modules::ping::HostProbe;
use crate::modules::render;
use crate::sockparse::parse_port_range;

const FORM_LIMIT: u64 = 4 * 1024;

#[derive(Debug, Deserialize)]
pub struct AddressForm {
    pub prefix: String,
}

/// Port bounds stay text until parsed, so bad input gets a readable error.
#[derive(Debug, Deserialize)]
pub struct PortForm {
    pub host: String,
    pub start_port: String,
    pub end_port: String,
}

#[derive(Debug, Deserialize)]
pub struct PortQuery {
    pub host: String,
    pub start: String,
    pub end: String,
}

/// Every page and API endpoint of the front end.
pub fn routes<H, P>(
    scanner: Arc<Scanner<H, P>>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone
where
    H: HostProbe,
    P: PortProbe,
{
    let home = warp::get()
        .and(warp::path::end())
        .map(|| warp::reply::html(render::home_page()));

    let health = warp::get()
        .and(warp::path!("health"))
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    let address_form = warp::get()
        .and(warp::path!("ping-ip"))
        .map(|| warp::reply::html(render::address_form()));

    let address_scan = warp::post()
        .and(warp::path!("ping-ip"))
        .and(warp::body::content_length_limit(FORM_LIMIT))
        .and(warp::body::form())
        .and(with_scanner(scanner.clone()))
        .and_then(scan_addresses::<H, P>);

    let port_form = warp::get()
        .and(warp::path!("ping-port"))
        .map(|| warp::reply::html(render::port_form()));

    let port_scan = warp::post()
        .and(warp::path!("ping-port"))
        .and(warp::body::content_length_limit(FORM_LIMIT))
        .and(warp::body::form())
        .and(with_scanner(scanner.clone()))
        .and_then(scan_ports::<H, P>);

    let api_addresses = warp::get()
        .and(warp::path!("api" / "addresses"))
        .and(warp::query::<AddressForm>())
        .and(with_scanner(scanner.clone()))
        .and_then(api_scan_addresses::<H, P>);

    let api_ports = warp::get()
        .and(warp::path!("api" / "ports"))
        .and(warp::query::<PortQuery>())
        .and(with_scanner(scanner))
        .and_then(api_scan_ports::<H, P>);

    home.or(health)
        .or(address_form)
        .or(address_scan)
        .or(port_form)
        .or(port_scan)
        .or(api_addresses)
        .or(api_ports)
        .with(warp::trace::request())
}

fn with_scanner<H, P>(
    scanner: Arc<Scanner<H, P>>,
) -> impl Filter<Extract = (Arc<Scanner<H, P>>,), Error = Infallible> + Clone
where
    H: HostProbe,
    P: PortProbe,
{
    warp::any().map(move || scanner.clone())
}

fn error_status(err: &ScanError) -> StatusCode {
    if err.is_user_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

async fn port_sweep<H: HostProbe, P: PortProbe>(
    scanner: &Scanner<H, P>,
    host: &str,
    start: &str,
    end: &str,
) -> NetworkResult<ScanResult<PortTarget>> {
    let (start, end) = parse_port_range(start, end)?;
    scanner.scan_port_range(host, start, end).await
}

async fn scan_addresses<H: HostProbe, P: PortProbe>(
    form: AddressForm,
    scanner: Arc<Scanner<H, P>>,
) -> Result<WithStatus<Html<String>>, Infallible> {
    info!(prefix = %form.prefix, "address sweep requested");
    let (body, status) = match scanner.scan_address_range(&form.prefix).await {
        Ok(result) => (render::address_results(&form.prefix, &result), StatusCode::OK),
        Err(e) => {
            warn!(error = %e, "address sweep failed");
            (render::error_page(&e.to_string()), error_status(&e))
        }
    };
    Ok(warp::reply::with_status(warp::reply::html(body), status))
}

async fn scan_ports<H: HostProbe, P: PortProbe>(
    form: PortForm,
    scanner: Arc<Scanner<H, P>>,
) -> Result<WithStatus<Html<String>>, Infallible> {
    info!(host = %form.host, start = %form.start_port, end = %form.end_port, "port sweep requested");
    let sweep = port_sweep(&scanner, &form.host, &form.start_port, &form.end_port).await;
    let (body, status) = match sweep {
        Ok(result) => (render::port_results(&form.host, &result), StatusCode::OK),
        Err(e) => {
            warn!(error = %e, "port sweep failed");
            (render::error_page(&e.to_string()), error_status(&e))
        }
    };
    Ok(warp::reply::with_status(warp::reply::html(body), status))
}

fn json_reply<T: serde::Serialize>(result: NetworkResult<T>) -> WithStatus<Json> {
    match result {
        Ok(value) => warp::reply::with_status(warp::reply::json(&value), StatusCode::OK),
        Err(e) => {
            warn!(error = %e, "api sweep failed");
            let body = serde_json::json!({ "error": e.to_string() });
            warp::reply::with_status(warp::reply::json(&body), error_status(&e))
        }
    }
}

async fn api_scan_addresses<H: HostProbe, P: PortProbe>(
    query: AddressForm,
    scanner: Arc<Scanner<H, P>>,
) -> Result<WithStatus<Json>, Infallible> {
    Ok(json_reply(scanner.scan_address_range(&query.prefix).await))
}

async fn api_scan_ports<H: HostProbe, P: PortProbe>(
    query: PortQuery,
    scanner: Arc<Scanner<H, P>>,
) -> Result<WithStatus<Json>, Infallible> {
    Ok(json_reply(
        port_sweep(&scanner, &query.host, &query.start, &query.end).await,
    ))
}
