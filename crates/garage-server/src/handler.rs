//! Request validation and status mapping.
//!
//! [`dispatch`] is the whole HTTP contract minus the socket: it parses
//! the form body, validates fields, calls the engine once and maps the
//! outcome to a status code and a JSON payload.

use std::collections::HashMap;

use garage_core::{AllocError, SpaceAddress};
use garage_engine::{ParkRequest, SharedGarage};
use hyper::{Method, StatusCode};
use log::{debug, error};
use serde::Serialize;

/// Status code and serialized JSON body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    /// Response status.
    pub status: StatusCode,
    /// JSON payload.
    pub body: Vec<u8>,
}

impl Reply {
    fn json(status: StatusCode, payload: &impl Serialize) -> Self {
        let body = serde_json::to_vec(payload).unwrap_or_else(|e| {
            error!("failed to encode response: {e}");
            b"{}".to_vec()
        });
        Self { status, body }
    }

    fn error(status: StatusCode, message: &'static str) -> Self {
        Self::json(status, &ErrorBody { error: message })
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

#[derive(Serialize)]
struct ParkBody {
    level: u32,
    row: u32,
    space: u32,
}

#[derive(Serialize)]
struct UnparkBody {
    amount: f64,
}

/// Route one request.
///
/// Only `POST /park` and `POST /unpark` are served; anything else is a
/// 404. `body` is read as `application/x-www-form-urlencoded`.
pub fn dispatch(garage: &SharedGarage, method: &Method, path: &str, body: &[u8]) -> Reply {
    debug!("handling {method} request: {path}");
    let reply = match path {
        "/park" if *method == Method::POST => park(garage, &parse_form(body)),
        "/unpark" if *method == Method::POST => unpark(garage, &parse_form(body)),
        _ => Reply::error(StatusCode::NOT_FOUND, "Unsupported Command"),
    };
    debug!("{method} {path} -> {}", reply.status);
    reply
}

/// Decode a form body. The first value of a repeated key wins.
fn parse_form(body: &[u8]) -> HashMap<String, String> {
    let mut form = HashMap::new();
    for (key, value) in url::form_urlencoded::parse(body) {
        form.entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    form
}

fn park(garage: &SharedGarage, form: &HashMap<String, String>) -> Reply {
    let Some(size) = form.get("size") else {
        return Reply::error(StatusCode::BAD_REQUEST, "Need to supply car size");
    };
    if size.is_empty() {
        return Reply::error(StatusCode::BAD_REQUEST, "Invalid car size");
    }
    let is_large_car = size == "large_car";

    let wants_handicapped = match form.get("has_handicapped_placard").map(String::as_str) {
        None => {
            return Reply::error(
                StatusCode::BAD_REQUEST,
                "Need to supply *has_handicapped_placard* arg",
            )
        }
        Some("1") => true,
        Some("0") => false,
        Some(_) => {
            return Reply::error(
                StatusCode::BAD_REQUEST,
                "Invalid *has_handicapped_placard* value",
            )
        }
    };

    match garage.park(ParkRequest::new(wants_handicapped, is_large_car)) {
        Ok(parked) => {
            let (level, row, space) = parked.address.to_one_based();
            Reply::json(StatusCode::OK, &ParkBody { level, row, space })
        }
        Err(AllocError::NoSpaceAvailable { .. }) => {
            Reply::error(StatusCode::NOT_ACCEPTABLE, "Unable to allocate space")
        }
        Err(e) => {
            error!("park failed: {e}");
            Reply::error(StatusCode::INTERNAL_SERVER_ERROR, "Invalid parking time")
        }
    }
}

fn unpark(garage: &SharedGarage, form: &HashMap<String, String>) -> Reply {
    let (Some(level), Some(row), Some(space)) =
        (form.get("level"), form.get("row"), form.get("space"))
    else {
        return Reply::error(StatusCode::BAD_REQUEST, "Invalid -unpark- parameters");
    };
    let Some(address) = parse_address(level, row, space) else {
        return Reply::error(StatusCode::BAD_REQUEST, "Invalid -unpark- values");
    };

    match garage.unpark(address) {
        Ok(bill) => Reply::json(
            StatusCode::OK,
            &UnparkBody {
                amount: bill.amount.as_dollars(),
            },
        ),
        Err(AllocError::InvalidAddress(_)) => {
            Reply::error(StatusCode::BAD_REQUEST, "Invalid -unpark- values")
        }
        Err(AllocError::SlotAlreadyFree { .. }) => {
            Reply::error(StatusCode::PRECONDITION_FAILED, "No car in this space")
        }
        Err(e) => {
            error!("unpark failed: {e}");
            Reply::error(StatusCode::INTERNAL_SERVER_ERROR, "Invalid parking time")
        }
    }
}

fn parse_address(level: &str, row: &str, space: &str) -> Option<SpaceAddress> {
    let level = level.trim().parse().ok()?;
    let row = row.trim().parse().ok()?;
    let space = space.trim().parse().ok()?;
    SpaceAddress::from_one_based(level, row, space).ok()
}
